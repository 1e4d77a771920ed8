use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use tracing::instrument;

use crate::application::ports::{ConversationStore, StoreError};
use crate::domain::{Conversation, Message, SessionId};

const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Process-local session store. A session idle for longer than the configured
/// timeout is reseeded when it is next touched, and idle sessions of other
/// users are swept at most once per sweep interval from either access path.
pub struct InMemoryConversationStore {
    sessions: DashMap<SessionId, Conversation>,
    system_prompt: String,
    idle_timeout: Duration,
    last_sweep_ms: AtomicI64,
}

impl InMemoryConversationStore {
    pub fn new(system_prompt: impl Into<String>, idle_timeout: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            system_prompt: system_prompt.into(),
            idle_timeout,
            last_sweep_ms: AtomicI64::new(Utc::now().timestamp_millis()),
        }
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn seed(&self, session_id: SessionId) -> Conversation {
        Conversation::seeded(session_id, &self.system_prompt)
    }

    fn idle_cutoff(&self) -> Option<DateTime<Utc>> {
        let idle_timeout = TimeDelta::from_std(self.idle_timeout).ok()?;
        Utc::now().checked_sub_signed(idle_timeout)
    }

    fn sweep_interval_ms(&self) -> i64 {
        let interval = self.idle_timeout.min(MAX_SWEEP_INTERVAL);
        i64::try_from(interval.as_millis()).unwrap_or(i64::MAX)
    }

    /// Drops every idle session, unless another caller swept recently.
    fn sweep_idle(&self) {
        let now_ms = Utc::now().timestamp_millis();
        let last_ms = self.last_sweep_ms.load(Ordering::Relaxed);
        if now_ms.saturating_sub(last_ms) < self.sweep_interval_ms() {
            return;
        }
        if self
            .last_sweep_ms
            .compare_exchange(last_ms, now_ms, Ordering::AcqRel, Ordering::Relaxed)
            .is_err()
        {
            return;
        }

        let Some(cutoff) = self.idle_cutoff() else {
            return;
        };
        let before = self.sessions.len();
        self.sessions
            .retain(|_, conversation| !conversation.is_idle_since(cutoff));
        let evicted = before.saturating_sub(self.sessions.len());
        if evicted > 0 {
            tracing::debug!(evicted, "Evicted idle sessions");
        }
    }

    /// Runs `f` on the live conversation for `session_id`, seeding it first
    /// when it is missing or has gone idle.
    fn with_session<T>(&self, session_id: SessionId, f: impl FnOnce(&mut Conversation) -> T) -> T {
        self.sweep_idle();

        let cutoff = self.idle_cutoff();
        let mut conversation = self
            .sessions
            .entry(session_id)
            .or_insert_with(|| self.seed(session_id));
        if cutoff.is_some_and(|cutoff| conversation.is_idle_since(cutoff)) {
            tracing::debug!(session_id = %session_id, "Reseeding idle session");
            *conversation = self.seed(session_id);
        }
        f(&mut conversation)
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    #[instrument(skip(self), fields(session_id = %session_id))]
    async fn get_or_init(&self, session_id: SessionId) -> Result<Conversation, StoreError> {
        Ok(self.with_session(session_id, |conversation| {
            conversation.touch();
            conversation.clone()
        }))
    }

    #[instrument(skip(self, message), fields(session_id = %session_id, role = %message.role))]
    async fn append(
        &self,
        session_id: SessionId,
        message: Message,
    ) -> Result<Conversation, StoreError> {
        Ok(self.with_session(session_id, |conversation| {
            conversation.push(message);
            conversation.clone()
        }))
    }

    #[instrument(skip(self), fields(session_id = %session_id))]
    async fn reset(&self, session_id: SessionId) -> Result<(), StoreError> {
        self.sessions.remove(&session_id);
        Ok(())
    }
}
