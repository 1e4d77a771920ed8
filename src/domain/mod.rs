mod conversation;
mod message;
mod message_role;
mod photo_catalog;
mod session_id;

pub use conversation::Conversation;
pub use message::Message;
pub use message_role::MessageRole;
pub use photo_catalog::{DisplaySegment, PhotoCatalog, PhotoRef};
pub use session_id::SessionId;
