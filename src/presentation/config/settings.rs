use std::collections::HashMap;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File};
use serde::Deserialize;

use super::Environment;

const ENV_PREFIX: &str = "APP";
const BASE_SETTINGS_FILE: &str = "appsettings";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub session: SessionSettings,
    pub chat: ChatSettings,
    #[serde(default)]
    pub photos: HashMap<String, String>,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[serde(rename = "openai")]
    OpenAi,
    Azure,
    Compatible,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub api_key: String,
    pub base_url: Option<String>,
    pub azure_endpoint: Option<String>,
    pub api_version: String,
    pub chat_model: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub secret: Option<String>,
    pub cookie_name: String,
    pub secure: bool,
    pub idle_timeout_minutes: u64,
}

impl SessionSettings {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_minutes.saturating_mul(60))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatSettings {
    pub system_prompt: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Builder holding only the built-in defaults. `llm.api_key` has no
    /// default and must come from a later source.
    pub fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("llm.provider", "azure")?
            .set_default("llm.api_version", "2024-02-15-preview")?
            .set_default("llm.chat_model", "gpt-4.1")?
            .set_default("session.cookie_name", "chat_session")?
            .set_default("session.secure", false)?
            .set_default("session.idle_timeout_minutes", 24 * 60)?
            .set_default("chat.system_prompt", "You are a helpful assistant.")?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)
    }

    /// Defaults, then `appsettings.toml`, then `appsettings.{environment}.toml`,
    /// then `APP_`-prefixed environment variables (`APP_LLM__API_KEY`).
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name(BASE_SETTINGS_FILE).required(false))
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}
