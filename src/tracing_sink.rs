use crate::context::{FIELD_FILE, FIELD_LINE};
use crate::record::AppRecord;
use crate::sink::{LogSink, Severity};

/// Sink that re-emits each message as a `tracing` event.
///
/// The most useful record fields are attached as individual event fields;
/// the full record is attached as a JSON string under `record`. Output
/// formatting is left to whichever subscriber is installed, see
/// [`init_tracing`](crate::init::init_tracing).
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    fn dispatch(&self, severity: Severity, message: &str, record: &AppRecord) {
        let correlation_id = record.correlation_id.as_deref().unwrap_or_default();
        let function = record.function.as_deref().unwrap_or_default();
        let file = record.field(FIELD_FILE).unwrap_or_default();
        let line = record.field(FIELD_LINE).unwrap_or_default();
        let response_time_ms = record.response_time_ms.unwrap_or_default();
        let payload = record.to_json().to_string();

        match severity {
            Severity::Error => tracing::error!(
                correlation_id,
                function,
                file,
                line,
                response_time_ms,
                record = %payload,
                "{}",
                message
            ),
            Severity::Info => tracing::info!(
                correlation_id,
                function,
                file,
                line,
                response_time_ms,
                record = %payload,
                "{}",
                message
            ),
            Severity::Warning => tracing::warn!(
                correlation_id,
                function,
                file,
                line,
                response_time_ms,
                record = %payload,
                "{}",
                message
            ),
        }
    }
}

impl LogSink for TracingSink {
    fn error(&self, message: &str, record: &AppRecord) {
        self.dispatch(Severity::Error, message, record);
    }

    fn info(&self, message: &str, record: &AppRecord) {
        self.dispatch(Severity::Info, message, record);
    }

    fn warning(&self, message: &str, record: &AppRecord) {
        self.dispatch(Severity::Warning, message, record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn events_carry_record_fields() {
        let buffer = Buffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let mut record = AppRecord::new();
        record
            .correlation_id("777")
            .function("handlers::create")
            .additional_field("line", "12");

        tracing::subscriber::with_default(subscriber, || {
            TracingSink.warning("disk almost full", &record);
        });

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("disk almost full"));
        assert!(output.contains("correlation_id=\"777\""));
        assert!(output.contains("function=\"handlers::create\""));
    }
}
