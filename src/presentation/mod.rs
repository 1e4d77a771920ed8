pub mod config;
pub mod handlers;
pub mod router;
pub mod session;
pub mod state;

pub use self::config::{Environment, Settings};
pub use router::create_router;
pub use session::{SessionCookie, signing_key};
pub use state::AppState;
