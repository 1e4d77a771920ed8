mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    ChatSettings, LlmProvider, LlmSettings, LoggingSettings, ServerSettings, SessionSettings,
    Settings,
};
