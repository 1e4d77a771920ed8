mod chat;
mod error;
mod health;

pub use chat::{ChatForm, chat_page_handler, chat_turn_handler, reset_handler};
pub use error::ChatPageError;
pub use health::health_handler;
