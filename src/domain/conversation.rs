use super::{Message, MessageRole, SessionId};
use chrono::{DateTime, Utc};

/// Ordered prompt history of one session. The first message is always the
/// system preamble it was seeded with.
#[derive(Debug, Clone)]
pub struct Conversation {
    pub session_id: SessionId,
    pub messages: Vec<Message>,
    /// Last time the session was read or written; drives idle eviction.
    pub last_active_at: DateTime<Utc>,
}

impl Conversation {
    pub fn seeded(session_id: SessionId, system_prompt: &str) -> Self {
        Self {
            session_id,
            messages: vec![Message::system(system_prompt)],
            last_active_at: Utc::now(),
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.touch();
    }

    pub fn touch(&mut self) {
        self.last_active_at = Utc::now();
    }

    pub fn is_idle_since(&self, cutoff: DateTime<Utc>) -> bool {
        self.last_active_at < cutoff
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn system_message(&self) -> Option<&Message> {
        self.messages
            .first()
            .filter(|message| message.role == MessageRole::System)
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}
