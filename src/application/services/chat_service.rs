use std::sync::Arc;

use crate::application::ports::{ConversationStore, LlmClient, LlmClientError, StoreError};
use crate::domain::{Conversation, Message, PhotoCatalog, SessionId};

/// Runs one conversational turn per submitted message.
///
/// History keeps the raw model output. Photo markers are expanded only when
/// a reply or the history is displayed.
pub struct ChatService<L>
where
    L: LlmClient,
{
    llm_client: Arc<L>,
    store: Arc<dyn ConversationStore>,
    photos: Arc<PhotoCatalog>,
}

impl<L> ChatService<L>
where
    L: LlmClient,
{
    pub fn new(
        llm_client: Arc<L>,
        store: Arc<dyn ConversationStore>,
        photos: Arc<PhotoCatalog>,
    ) -> Self {
        Self {
            llm_client,
            store,
            photos,
        }
    }

    pub fn photos(&self) -> &PhotoCatalog {
        &self.photos
    }

    #[tracing::instrument(skip(self, user_text), fields(session_id = %session_id))]
    pub async fn handle_turn(
        &self,
        session_id: SessionId,
        user_text: &str,
    ) -> Result<TurnOutcome, ChatServiceError> {
        let user_text = user_text.trim();

        if user_text.is_empty() {
            tracing::debug!("Blank input, no turn taken");
            let conversation = self.store.get_or_init(session_id).await?;
            return Ok(TurnOutcome {
                reply: None,
                conversation,
            });
        }

        let conversation = self
            .store
            .append(session_id, Message::user(user_text))
            .await?;

        tracing::debug!(
            prompt_messages = conversation.len(),
            "Requesting completion"
        );

        let reply = self
            .llm_client
            .complete(&conversation.messages)
            .await
            .map_err(ChatServiceError::Completion)?;

        let conversation = self
            .store
            .append(session_id, Message::assistant(reply.clone()))
            .await?;

        tracing::info!(
            history_len = conversation.len(),
            reply_chars = reply.len(),
            "Chat turn completed"
        );

        Ok(TurnOutcome {
            reply: Some(reply),
            conversation,
        })
    }

    pub async fn history(&self, session_id: SessionId) -> Result<Conversation, ChatServiceError> {
        Ok(self.store.get_or_init(session_id).await?)
    }

    #[tracing::instrument(skip(self), fields(session_id = %session_id))]
    pub async fn reset(&self, session_id: SessionId) -> Result<(), ChatServiceError> {
        self.store.reset(session_id).await?;
        tracing::info!("Conversation reset");
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// Raw assistant text, `None` when the input was blank.
    pub reply: Option<String>,
    pub conversation: Conversation,
}

#[derive(Debug, thiserror::Error)]
pub enum ChatServiceError {
    #[error("store: {0}")]
    Store(#[from] StoreError),
    #[error("completion: {0}")]
    Completion(LlmClientError),
}
