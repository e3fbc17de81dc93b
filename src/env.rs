//! Environment variable names used by this crate for convenient
//! configuration of [`Logger`](crate::logger::Logger) from services.
//!
//! These are purely helpers; the context types remain decoupled from
//! environment access.

use crate::error::ConfigError;

/// Logical service name stamped on every record.
pub const LOG_CONTEXT_SERVICE_NAME_ENV: &str = "LOG_CONTEXT_SERVICE_NAME";

/// Whether request bodies are captured by default (`true`/`false`).
pub const LOG_CONTEXT_CAPTURE_BODY_ENV: &str = "LOG_CONTEXT_CAPTURE_BODY";

/// Comma-separated header names to redact, replacing the default set.
pub const LOG_CONTEXT_REDACTED_HEADERS_ENV: &str = "LOG_CONTEXT_REDACTED_HEADERS";

/// Parse a boolean flag. Accepts `1/0`, `true/false`, `yes/no`, `on/off`
/// in any case.
pub fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Split a comma-separated list, dropping blank entries.
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
