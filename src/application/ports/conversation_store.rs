use crate::domain::{Conversation, Message, SessionId};
use async_trait::async_trait;

use super::StoreError;

/// Per-session conversation storage.
///
/// Implementations seed a conversation with the system preamble the first
/// time a session is seen, and again after a reset.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    async fn get_or_init(&self, session_id: SessionId) -> Result<Conversation, StoreError>;

    /// Appends to the end of the session's history and returns the updated conversation.
    async fn append(
        &self,
        session_id: SessionId,
        message: Message,
    ) -> Result<Conversation, StoreError>;

    async fn reset(&self, session_id: SessionId) -> Result<(), StoreError>;
}
