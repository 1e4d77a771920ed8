use chatterbox::presentation::config::{LlmProvider, Settings};
use chatterbox::presentation::{SessionCookie, signing_key};

fn settings_with(overrides: &[(&str, &str)]) -> Result<Settings, config::ConfigError> {
    let mut builder = Settings::builder()?;
    for (key, value) in overrides {
        builder = builder.set_override(*key, *value)?;
    }
    builder.build()?.try_deserialize()
}

#[test]
fn given_only_api_key_when_loading_settings_then_defaults_apply() {
    let settings = settings_with(&[("llm.api_key", "secret-key")]).unwrap();

    assert_eq!(settings.server.port, 3000);
    assert_eq!(settings.llm.provider, LlmProvider::Azure);
    assert_eq!(settings.llm.chat_model, "gpt-4.1");
    assert_eq!(settings.llm.api_version, "2024-02-15-preview");
    assert!(settings.llm.timeout_seconds.is_none());
    assert_eq!(settings.session.cookie_name, "chat_session");
    assert!(settings.session.secret.is_none());
    assert_eq!(settings.session.idle_timeout().as_secs(), 24 * 60 * 60);
    assert_eq!(settings.chat.system_prompt, "You are a helpful assistant.");
    assert!(settings.photos.is_empty());
    assert!(!settings.logging.enable_json);
}

#[test]
fn given_missing_api_key_when_loading_settings_then_fails() {
    assert!(settings_with(&[]).is_err());
}

#[test]
fn given_overrides_when_loading_settings_then_they_win_over_defaults() {
    let settings = settings_with(&[
        ("llm.api_key", "k"),
        ("llm.provider", "openai"),
        ("session.idle_timeout_minutes", "5"),
        ("photos.profile", "https://x/p.jpg"),
    ])
    .unwrap();

    assert_eq!(settings.llm.provider, LlmProvider::OpenAi);
    assert_eq!(settings.session.idle_timeout().as_secs(), 300);
    assert_eq!(
        settings.photos.get("profile").map(String::as_str),
        Some("https://x/p.jpg")
    );

    let cookie = SessionCookie::from_settings(&settings.session);
    assert_eq!(cookie.max_age.whole_seconds(), 300);
    assert_eq!(cookie.name, "chat_session");
}

#[test]
fn given_secret_when_deriving_signing_key_then_key_is_stable() {
    let first = signing_key(Some("correct horse battery staple"));
    let second = signing_key(Some("correct horse battery staple"));
    let other = signing_key(Some("another secret"));

    assert_eq!(first.master(), second.master());
    assert_ne!(first.master(), other.master());
}
