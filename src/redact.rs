//! Redaction of sensitive header values in a raw header block.
//!
//! Values are replaced by their CRC-32 digest rendered as 8 lowercase hex
//! digits. The digest is not meant to protect against brute force; it only
//! lets two log lines be compared for "same credential" without printing it.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;

/// Header names redacted by [`HeaderRedactor::default`].
pub const DEFAULT_REDACTED_HEADERS: &[&str] = &["Authorization", "Cookie", "set-cookie"];

/// Finds `Name: value` lines for a set of header names and replaces the
/// value with [`checksum`] of the original value.
///
/// Matching is case-insensitive and line-anchored. The captured value stops
/// before `\r` or `\n`, so line terminators are preserved and never hashed.
#[derive(Debug, Clone)]
pub struct HeaderRedactor {
    /// `None` redacts nothing.
    pattern: Option<Regex>,
}

impl HeaderRedactor {
    /// Build a redactor for a custom set of header names.
    ///
    /// Names are matched literally. An empty set yields a redactor that
    /// leaves every block untouched.
    pub fn with_headers<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let alternatives: Vec<String> = names
            .into_iter()
            .map(|n| regex::escape(n.as_ref().trim()))
            .filter(|n| !n.is_empty())
            .collect();
        if alternatives.is_empty() {
            return Self { pattern: None };
        }
        match Regex::new(&build_pattern(&alternatives)) {
            Ok(pattern) => Self { pattern: Some(pattern) },
            Err(e) => {
                tracing::warn!(error = %e, "custom header redaction set rejected, using defaults");
                Self::default()
            }
        }
    }

    /// Redact every matching header line in `block`.
    pub fn redact<'a>(&self, block: &'a str) -> Cow<'a, str> {
        match &self.pattern {
            Some(pattern) => pattern
                .replace_all(block, |caps: &Captures| format!("{}{}", &caps[1], checksum(&caps[2]))),
            None => Cow::Borrowed(block),
        }
    }
}

impl Default for HeaderRedactor {
    fn default() -> Self {
        Self {
            pattern: Some(default_pattern().clone()),
        }
    }
}

fn build_pattern(alternatives: &[String]) -> String {
    // Only horizontal whitespace after the colon: `\s` would run across an
    // empty value into the next line.
    format!(r"(?im)^((?:{}):[ \t]*)([^\r\n]*)", alternatives.join("|"))
}

fn default_pattern() -> &'static Regex {
    static INSTANCE: OnceLock<Regex> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let alternatives: Vec<String> = DEFAULT_REDACTED_HEADERS.iter().map(|n| regex::escape(n)).collect();
        // Built from constants; cannot fail.
        Regex::new(&build_pattern(&alternatives)).expect("valid header redaction regex")
    })
}

/// CRC-32 (IEEE) of `value` as exactly 8 lowercase hex digits.
pub fn checksum(value: &str) -> String {
    format!("{:08x}", crc32fast::hash(value.as_bytes()))
}

/// Redact `block` with the default header set.
pub fn redact_headers(block: &str) -> Cow<'_, str> {
    HeaderRedactor::default().redact(block)
}
