//! API key redaction for logs

/// Suffix replacing everything after the key's first `.`
pub const REDACTED_SUFFIX: &str = ".***REDACTED***";

/// Shown in place of a key that has no user prefix to keep
pub const KEY_NOT_SET: &str = "API Key not set";

/// The user ID part of an API key (everything before the first `.`)
pub fn user_from_api_key(api_key: &str) -> &str {
    api_key
        .split_once('.')
        .map(|(user, _)| user)
        .unwrap_or(api_key)
}

/// Mask an API key so it can be logged
pub fn redact_api_key(api_key: &str) -> String {
    if api_key.len() > 4 && api_key.contains('.') {
        format!("{}{}", user_from_api_key(api_key), REDACTED_SUFFIX)
    } else {
        KEY_NOT_SET.to_string()
    }
}
