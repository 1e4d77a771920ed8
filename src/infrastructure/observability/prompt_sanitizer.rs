use std::sync::LazyLock;

use regex::Regex;

const MAX_VISIBLE_CHARS: usize = 100;

static SENSITIVE_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?P<key>bearer |api[_-]?key=|password=|secret=|token=)[^\s&"']+"#).unwrap()
});

/// Shortens user text for log output and masks anything that looks like a credential.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = trimmed.chars().count();
    let visible = if total_chars > MAX_VISIBLE_CHARS {
        let head: String = trimmed.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{}... ({} chars total)", head, total_chars)
    } else {
        trimmed.to_string()
    };

    SENSITIVE_VALUE
        .replace_all(&visible, "${key}[REDACTED]")
        .into_owned()
}
