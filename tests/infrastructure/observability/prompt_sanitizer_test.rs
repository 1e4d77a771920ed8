use chatterbox::infrastructure::observability::sanitize_prompt;

#[test]
fn given_empty_prompt_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_prompt(""), "[EMPTY]");
    assert_eq!(sanitize_prompt("   "), "[EMPTY]");
}

#[test]
fn given_short_prompt_when_sanitizing_then_returns_trimmed_prompt() {
    assert_eq!(
        sanitize_prompt("  Tell me about Bala's hobbies "),
        "Tell me about Bala's hobbies"
    );
}

#[test]
fn given_long_prompt_when_sanitizing_then_truncates_with_length() {
    let prompt = "a".repeat(150);
    let result = sanitize_prompt(&prompt);
    assert!(result.starts_with(&"a".repeat(100)));
    assert!(result.ends_with("... (150 chars total)"));
}

#[test]
fn given_long_multibyte_prompt_when_sanitizing_then_truncates_on_char_boundary() {
    let prompt = "é".repeat(120);
    let result = sanitize_prompt(&prompt);
    assert!(result.starts_with(&"é".repeat(100)));
    assert!(result.contains("(120 chars total)"));
}

#[test]
fn given_bearer_token_when_sanitizing_then_redacts_token() {
    let result = sanitize_prompt("Authorization: Bearer sk-abc123xyz please");
    assert!(result.contains("Bearer [REDACTED] please"));
    assert!(!result.contains("sk-abc123xyz"));
}

#[test]
fn given_repeated_credentials_when_sanitizing_then_redacts_all_of_them() {
    let result = sanitize_prompt("api_key=one&password=two token=three");
    assert_eq!(
        result,
        "api_key=[REDACTED]&password=[REDACTED] token=[REDACTED]"
    );
}
