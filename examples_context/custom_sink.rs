use std::sync::Arc;

use request_log_context::record::AppRecord;
use request_log_context::sink::LogSink;
use request_log_context::{log_error, log_info, Logger};

/// Example of plugging in a completely custom destination by implementing
/// the `LogSink` trait directly.
struct StdoutSink;

impl StdoutSink {
    fn print(&self, level: &str, message: &str, record: &AppRecord) {
        println!("[{level}] {message} {}", record.to_json());
    }
}

impl LogSink for StdoutSink {
    fn error(&self, message: &str, record: &AppRecord) {
        self.print("ERROR", message, record);
    }

    fn info(&self, message: &str, record: &AppRecord) {
        self.print("INFO", message, record);
    }

    fn warning(&self, message: &str, record: &AppRecord) {
        self.print("WARN", message, record);
    }
}

#[tokio::main]
async fn main() {
    let logger = Logger::new(Arc::new(StdoutSink));

    // No request: a background job still gets a correlation id.
    let mut ctx = logger.context_for(None).await;
    log_info!(ctx, "nightly reconciliation started");
    log_error!(ctx, std::io::Error::new(std::io::ErrorKind::TimedOut, "ledger unavailable"));
}
