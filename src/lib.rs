pub mod record;
pub mod sink;
pub mod memory_sink;
pub mod noop_sink;
pub mod tracing_sink;

pub mod redact;
pub mod correlation;
pub mod snapshot;
pub mod message;
pub mod caller;
pub mod context;

pub mod env;
pub mod error;
pub mod init;
pub mod logger;

pub use context::LogContext;
pub use correlation::CorrelationId;
pub use logger::{Logger, LoggerConfig};
pub use message::Message;
pub use record::AppRecord;
pub use sink::{LogSink, Severity};
