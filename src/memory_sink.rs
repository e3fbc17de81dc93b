use crate::record::AppRecord;
use crate::sink::{LogSink, Severity};
use std::sync::{Mutex, MutexGuard};

/// One message captured by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emitted {
    pub severity: Severity,
    pub message: String,
    /// Snapshot of the record at the moment of emission.
    pub record: AppRecord,
}

/// Sink that keeps every emitted message in memory.
///
/// Intended for tests: inject it into a context, drive the code under test,
/// then inspect [`entries`](MemorySink::entries).
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<Emitted>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything captured so far, in emission order.
    pub fn entries(&self) -> Vec<Emitted> {
        self.lock().clone()
    }

    /// Captured entries with the given severity.
    pub fn entries_with(&self, severity: Severity) -> Vec<Emitted> {
        self.lock()
            .iter()
            .filter(|e| e.severity == severity)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop all captured entries.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Emitted>> {
        // A panicking test thread must not hide what was captured.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, severity: Severity, message: &str, record: &AppRecord) {
        self.lock().push(Emitted {
            severity,
            message: message.to_string(),
            record: record.clone(),
        });
    }
}

impl LogSink for MemorySink {
    fn error(&self, message: &str, record: &AppRecord) {
        self.push(Severity::Error, message, record);
    }

    fn info(&self, message: &str, record: &AppRecord) {
        self.push(Severity::Info, message, record);
    }

    fn warning(&self, message: &str, record: &AppRecord) {
        self.push(Severity::Warning, message, record);
    }
}
