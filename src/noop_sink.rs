use crate::record::AppRecord;
use crate::sink::LogSink;

/// A sink that simply drops all messages.
///
/// Useful for background jobs that need a context for correlation but no
/// output, and for tests that don't care about what gets emitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl LogSink for NoopSink {
    fn error(&self, _message: &str, _record: &AppRecord) {}

    fn info(&self, _message: &str, _record: &AppRecord) {}

    fn warning(&self, _message: &str, _record: &AppRecord) {}
}
