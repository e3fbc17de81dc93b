use crate::context::LogContext;
use crate::env::{
    parse_flag, parse_list, LOG_CONTEXT_CAPTURE_BODY_ENV, LOG_CONTEXT_REDACTED_HEADERS_ENV,
    LOG_CONTEXT_SERVICE_NAME_ENV,
};
use crate::error::ConfigError;
use crate::record::AppRecord;
use crate::redact::{HeaderRedactor, DEFAULT_REDACTED_HEADERS};
use crate::sink::LogSink;
use axum::body::Body;
use axum::http::Request;
use std::fmt;
use std::sync::Arc;

/// Settings shared by every context a [`Logger`] creates.
///
/// **Fields**
/// - `service_name`: stamped on each new record when set.
/// - `capture_body`: body capture flag used by [`Logger::context_for`].
/// - `redacted_headers`: header names whose values are replaced by a
///   digest in request snapshots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggerConfig {
    pub service_name: Option<String>,
    pub capture_body: bool,
    pub redacted_headers: Vec<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            service_name: None,
            capture_body: false,
            redacted_headers: DEFAULT_REDACTED_HEADERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl LoggerConfig {
    /// Load overrides from the process environment, see [`crate::env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load overrides through `lookup`; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(name) = lookup(LOG_CONTEXT_SERVICE_NAME_ENV).filter(|s| !s.trim().is_empty()) {
            config.service_name = Some(name.trim().to_string());
        }
        if let Some(flag) = lookup(LOG_CONTEXT_CAPTURE_BODY_ENV) {
            config.capture_body = parse_flag(LOG_CONTEXT_CAPTURE_BODY_ENV, &flag)?;
        }
        if let Some(list) = lookup(LOG_CONTEXT_REDACTED_HEADERS_ENV) {
            config.redacted_headers = parse_list(&list);
        }
        Ok(config)
    }
}

/// Factory for [`LogContext`]s.
///
/// Holds the sink and configuration so request handlers only need
/// `logger.context_for(Some(&mut request)).await`. Each context gets its own
/// handle to the sink at creation; replacing the sink with
/// [`set_sink`](Logger::set_sink) affects contexts created afterwards.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
    config: LoggerConfig,
    redactor: HeaderRedactor,
}

impl Logger {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self::with_config(sink, LoggerConfig::default())
    }

    pub fn with_config(sink: Arc<dyn LogSink>, config: LoggerConfig) -> Self {
        let redactor = HeaderRedactor::with_headers(&config.redacted_headers);
        Self { sink, config, redactor }
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub fn sink(&self) -> &Arc<dyn LogSink> {
        &self.sink
    }

    pub fn set_sink(&mut self, sink: Arc<dyn LogSink>) {
        self.sink = sink;
    }

    /// Fresh, uninitialized context.
    pub fn context(&self) -> LogContext {
        let mut record = AppRecord::new();
        if let Some(name) = &self.config.service_name {
            record.service_name(name.as_str());
        }
        LogContext::new(Arc::clone(&self.sink))
            .with_record(record)
            .with_redactor(self.redactor.clone())
    }

    /// Fresh context already initialized for `request`, capturing the body
    /// when the configuration says so.
    pub async fn context_for(&self, request: Option<&mut Request<Body>>) -> LogContext {
        let mut ctx = self.context();
        ctx.init(request, self.config.capture_body).await;
        ctx
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").field("config", &self.config).finish_non_exhaustive()
    }
}
