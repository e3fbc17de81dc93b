//! Per-request logging context.
//!
//! A [`LogContext`] is created once per inbound request (usually through
//! [`Logger::context_for`](crate::logger::Logger::context_for)), lives on the
//! stack of the task handling that request and is dropped with it. It is not
//! synchronized; hand a [`duplicate`](LogContext::duplicate) to any task that
//! runs concurrently.

use crate::caller::CallSite;
use crate::correlation::CorrelationId;
use crate::message::Message;
use crate::record::AppRecord;
use crate::redact::HeaderRedactor;
use crate::sink::{LogSink, Severity};
use crate::snapshot::RequestSnapshot;
use axum::body::Body;
use axum::http::Request;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

/// Additional-field key holding the emitting source file.
pub const FIELD_FILE: &str = "file";
/// Additional-field key holding the emitting source line.
pub const FIELD_LINE: &str = "line";

/// Request-scoped logging state: start time, correlation id and the
/// structured record attached to every emitted message.
#[derive(Clone)]
pub struct LogContext {
    start_time: Option<DateTime<Utc>>,
    correlation_id: Option<CorrelationId>,
    record: AppRecord,
    sink: Arc<dyn LogSink>,
    redactor: HeaderRedactor,
}

impl LogContext {
    /// Empty context writing to `sink`. Call [`init`](Self::init) before
    /// emitting.
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            start_time: None,
            correlation_id: None,
            record: AppRecord::new(),
            sink,
            redactor: HeaderRedactor::default(),
        }
    }

    /// Start from a pre-filled record instead of an empty one.
    pub fn with_record(mut self, record: AppRecord) -> Self {
        self.record = record;
        self
    }

    /// Use a custom header redactor for request snapshots.
    pub fn with_redactor(mut self, redactor: HeaderRedactor) -> Self {
        self.redactor = redactor;
        self
    }

    /// Pin the correlation id before [`init`](Self::init), e.g. for a
    /// background job continuing the work of an earlier request. `init`
    /// never replaces an id that is already set.
    pub fn with_correlation_id(mut self, correlation_id: CorrelationId) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    /// Prepare the context for a request.
    ///
    /// - The start time is reset to now on every call.
    /// - The correlation id is resolved only while unset: from the
    ///   request's `X-Correlation-ID` header, else a new UUID v4. It is
    ///   written into the record on every call.
    /// - With a request, its method, URI and redacted header block are
    ///   recorded; with `capture_body` the body is recorded as well and
    ///   put back on the request intact.
    ///
    /// Without a request (background work) only the first two steps run.
    pub async fn init(&mut self, request: Option<&mut Request<Body>>, capture_body: bool) -> &mut Self {
        self.start_time = Some(Utc::now());

        let correlation_id = match &self.correlation_id {
            Some(id) => id.clone(),
            None => request
                .as_deref()
                .and_then(|r| CorrelationId::from_headers(r.headers()))
                .unwrap_or_default(),
        };
        self.record.correlation_id(correlation_id.as_str());
        self.correlation_id = Some(correlation_id);

        if let Some(request) = request {
            let snapshot = RequestSnapshot::capture(request, capture_body, &self.redactor).await;
            self.record
                .method(snapshot.method)
                .full_path(snapshot.full_path)
                .request_header(snapshot.header_block);
            if let Some(body) = snapshot.body {
                self.record.request_body(body);
            }
        }
        self
    }

    /// Independent copy for handing off to another task.
    ///
    /// The record, including its additional fields, is deep-copied; the
    /// start time and correlation id are copied by value. Only the sink
    /// handle is shared.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    pub fn record(&self) -> &AppRecord {
        &self.record
    }

    /// Direct access to the record, e.g. to set the account id. Changes
    /// show up in every later emission.
    pub fn record_mut(&mut self) -> &mut AppRecord {
        &mut self.record
    }

    pub fn correlation_id(&self) -> Option<&CorrelationId> {
        self.correlation_id.as_ref()
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    pub fn set_start_time(&mut self, start_time: DateTime<Utc>) {
        self.start_time = Some(start_time);
    }

    /// Milliseconds since [`init`](Self::init); 0 before it.
    pub fn elapsed_ms(&self) -> i64 {
        self.start_time
            .map(|start| (Utc::now() - start).num_milliseconds())
            .unwrap_or(0)
    }

    /// Emit an error-level message from `site`, usually
    /// [`call_site!()`](crate::call_site) or via [`log_error!`](crate::log_error).
    ///
    /// Any error type converts through [`Message::failure`]:
    /// `ctx.error(call_site!(), Message::failure(&err))`.
    pub fn error(&mut self, site: CallSite, message: impl Into<Message>) {
        self.emit(Severity::Error, site, message.into());
    }

    pub fn info(&mut self, site: CallSite, message: impl Into<Message>) {
        self.emit(Severity::Info, site, message.into());
    }

    pub fn warning(&mut self, site: CallSite, message: impl Into<Message>) {
        self.emit(Severity::Warning, site, message.into());
    }

    fn emit(&mut self, severity: Severity, site: CallSite, message: Message) {
        let message = message.into_string();
        self.stamp(site);
        self.sink.emit(severity, &message, &self.record);
    }

    /// Refresh the per-emission fields of the record.
    fn stamp(&mut self, site: CallSite) {
        let elapsed = self.elapsed_ms();
        self.record.function(site.short_function());
        self.record
            .additional_field(FIELD_FILE, site.file)
            .additional_field(FIELD_LINE, site.line.to_string())
            .response_time_ms(elapsed);
        if let Some(id) = &self.correlation_id {
            self.record.correlation_id(id.as_str());
        }
    }
}

impl fmt::Debug for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogContext")
            .field("start_time", &self.start_time)
            .field("correlation_id", &self.correlation_id)
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}
