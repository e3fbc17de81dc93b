//! Correlation id resolution.
//!
//! A request keeps the id its caller sent in `X-Correlation-ID`; requests
//! without one get a fresh random UUID v4.

use axum::http::{HeaderMap, HeaderValue};
use std::fmt;
use uuid::Uuid;

/// Inbound header carrying the caller's correlation id.
pub const HEADER_X_CORRELATION_ID: &str = "x-correlation-id";

/// Identifier threading together every record of one logical request.
///
/// Never empty: both constructors guarantee at least one visible character.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Generate a new random id (UUID v4, hyphenated lowercase).
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Accept an inbound value, trimmed. Returns `None` when nothing is
    /// left after trimming.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Read the id from `X-Correlation-ID`. Values that are not visible
    /// ASCII are treated as absent.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get(HEADER_X_CORRELATION_ID)
            .and_then(|v: &HeaderValue| v.to_str().ok())
            .and_then(Self::parse)
    }

    /// Prefer the inbound value, otherwise generate a new id.
    pub fn resolve(inbound: Option<&str>) -> Self {
        inbound.and_then(Self::parse).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CorrelationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
