use crate::presentation::config::{Environment, LoggingSettings};

/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: Environment,
    pub level: String,
    pub json_format: bool,
}

impl TracingConfig {
    pub fn from_settings(environment: Environment, logging: &LoggingSettings) -> Self {
        Self {
            environment,
            level: logging.level.clone(),
            json_format: logging.enable_json,
        }
    }

    /// Filter used when `RUST_LOG` is not set.
    pub fn default_filter(&self) -> String {
        format!("{},chatterbox=debug,tower_http=debug", self.level)
    }
}
