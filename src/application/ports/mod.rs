mod conversation_store;
mod llm_client;
mod store_error;

pub use conversation_store::ConversationStore;
pub use llm_client::{LlmClient, LlmClientError};
pub use store_error::StoreError;
