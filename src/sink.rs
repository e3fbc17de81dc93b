use crate::record::AppRecord;
use std::fmt;

/// Severity attached to an emitted message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Info,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Info => "info",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destination for messages emitted by a
/// [`LogContext`](crate::context::LogContext).
///
/// Implementations decide where the message and its [`AppRecord`] end up
/// (stdout, a `tracing` subscriber, an in-memory buffer for tests, ...).
///
/// Emission is fire-and-forget: the methods return nothing and the context
/// never observes sink failures. Implementations that perform I/O should
/// handle or report their own errors.
pub trait LogSink: Send + Sync {
    /// Record an error-level message.
    fn error(&self, message: &str, record: &AppRecord);

    /// Record an info-level message.
    fn info(&self, message: &str, record: &AppRecord);

    /// Record a warning-level message.
    fn warning(&self, message: &str, record: &AppRecord);

    /// Dispatch to the method matching `severity`.
    ///
    /// Default implementation forwards to [`error`](Self::error),
    /// [`info`](Self::info) or [`warning`](Self::warning).
    fn emit(&self, severity: Severity, message: &str, record: &AppRecord) {
        match severity {
            Severity::Error => self.error(message, record),
            Severity::Info => self.info(message, record),
            Severity::Warning => self.warning(message, record),
        }
    }
}
