use axum::body::{to_bytes, Body};
use axum::http::Request;
use regex::Regex;
use request_log_context::context::{FIELD_FILE, FIELD_LINE};
use request_log_context::memory_sink::MemorySink;
use request_log_context::redact::checksum;
use request_log_context::{call_site, log_error, log_info, log_warning, LogContext, Logger, LoggerConfig, Message, Severity};
use serde_json::json;
use std::sync::Arc;

fn request(with_correlation_id: bool, body: &'static str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("PATCH")
        .uri("http://domain.org/path1/path2?q1=v1")
        .header("Authorization", "My authorization")
        .header("Cookie", "My secret cookie")
        .header("Set-Cookie", "My secret set-cookie");
    if with_correlation_id {
        builder = builder.header("X-Correlation-ID", " 777 ");
    }
    builder.body(Body::from(body)).unwrap()
}

fn logger() -> (Arc<MemorySink>, Logger) {
    let sink = Arc::new(MemorySink::new());
    let logger = Logger::new(sink.clone());
    (sink, logger)
}

#[tokio::test]
async fn init_records_request_without_body() {
    let (_, logger) = logger();
    let mut req = request(true, "My Body");
    let mut ctx = logger.context();
    ctx.init(Some(&mut req), false).await;

    let record = ctx.record();
    assert_eq!(record.correlation_id.as_deref(), Some("777"));
    assert_eq!(record.method.as_deref(), Some("PATCH"));
    assert_eq!(record.full_path.as_deref(), Some("http://domain.org/path1/path2?q1=v1"));
    assert_eq!(record.request_body, None);

    let expected = format!(
        "PATCH /path1/path2?q1=v1 HTTP/1.1\r\n\
         Host: domain.org\r\n\
         Authorization: {}\r\n\
         Cookie: {}\r\n\
         Set-Cookie: {}\r\n\
         X-Correlation-Id: 777\r\n\
         \r\n",
        checksum("My authorization"),
        checksum("My secret cookie"),
        checksum("My secret set-cookie"),
    );
    assert_eq!(record.request_header.as_deref(), Some(expected.as_str()));
}

#[tokio::test]
async fn init_captures_body_and_keeps_it_readable() {
    let (_, logger) = logger();
    let mut req = request(true, "My Body");
    let ctx = logger_context_with_body(&logger, &mut req).await;

    assert_eq!(ctx.record().request_body.as_deref(), Some("My Body"));
    let downstream = to_bytes(req.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&downstream[..], b"My Body");
}

async fn logger_context_with_body(logger: &Logger, req: &mut Request<Body>) -> LogContext {
    let mut ctx = logger.context();
    ctx.init(Some(req), true).await;
    ctx
}

#[tokio::test]
async fn missing_correlation_header_yields_uuid_v4() {
    let (_, logger) = logger();
    let mut req = request(false, "My Body1");
    let ctx = logger.context_for(Some(&mut req)).await;

    let pattern = Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$").unwrap();
    let id = ctx.record().correlation_id.clone().unwrap();
    assert!(pattern.is_match(&id), "{id}");
    assert_eq!(ctx.correlation_id().unwrap().as_str(), id);
}

#[tokio::test]
async fn redacted_header_block_never_contains_secrets() {
    let (_, logger) = logger();
    let mut req = request(true, "");
    let ctx = logger.context_for(Some(&mut req)).await;

    let block = ctx.record().request_header.clone().unwrap();
    for secret in ["My authorization", "My secret cookie", "My secret set-cookie"] {
        assert!(!block.contains(secret), "{secret} leaked in {block}");
    }
    let digest = Regex::new(r"Authorization: [0-9a-f]{8}\r\n").unwrap();
    assert!(digest.is_match(&block));
}

#[tokio::test]
async fn config_controls_body_capture() {
    let sink = Arc::new(MemorySink::new());
    let config = LoggerConfig {
        capture_body: true,
        ..LoggerConfig::default()
    };
    let logger = Logger::with_config(sink, config);

    let mut req = request(false, "{\"a\":1}");
    let ctx = logger.context_for(Some(&mut req)).await;
    assert_eq!(ctx.record().request_body.as_deref(), Some("{\"a\":1}"));
}

#[tokio::test]
async fn duplicate_is_independent() {
    let (_, logger) = logger();
    let mut original = logger.context_for(None).await;
    original.record_mut().account_id("accountId");
    log_info!(original, "stamp");

    let mut copy = original.duplicate();
    assert_eq!(copy.record(), original.record());
    assert_eq!(copy.start_time(), original.start_time());
    assert_eq!(copy.correlation_id(), original.correlation_id());

    copy.set_start_time(original.start_time().unwrap() + chrono::Duration::seconds(2));
    copy.record_mut().additional_field("somethingnew", "yes").account_id("other");

    assert_ne!(copy.start_time(), original.start_time());
    assert_eq!(original.record().field("somethingnew"), None);
    assert_eq!(original.record().account_id.as_deref(), Some("accountId"));
    assert_eq!(copy.record().field("somethingnew"), Some("yes"));
}

#[tokio::test]
async fn duplicate_can_move_to_another_task() {
    let (sink, logger) = logger();
    let mut ctx = logger.context_for(None).await;
    let mut background = ctx.duplicate();

    tokio::spawn(async move {
        log_warning!(background, "from background");
    })
    .await
    .unwrap();
    log_info!(ctx, "from request");

    let entries = sink.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].record.correlation_id, entries[1].record.correlation_id);
}

#[tokio::test]
async fn info_forwards_message_and_caller_once() {
    let (sink, logger) = logger();
    let mut ctx = logger.context_for(None).await;

    let line = line!() + 1;
    log_info!(ctx, "hello");

    let entries = sink.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, Severity::Info);
    assert_eq!(entries[0].message, "hello");
    let record = &entries[0].record;
    assert_eq!(record.function.as_deref(), Some("context::info_forwards_message_and_caller_once"));
    assert!(record.field(FIELD_FILE).unwrap().ends_with("context.rs"));
    assert_eq!(record.field(FIELD_LINE).unwrap(), line.to_string());
    assert!(record.response_time_ms.unwrap() >= 0);
    assert!(sink.entries_with(Severity::Error).is_empty());
}

fn handler(ctx: &mut LogContext) {
    ctx.info(call_site!(), "hello");
}

#[test]
fn explicit_call_site_names_the_handler() {
    let sink = Arc::new(MemorySink::new());
    let mut ctx = LogContext::new(sink.clone());

    handler(&mut ctx);

    let record = &sink.entries()[0].record;
    assert_eq!(record.function.as_deref(), Some("context::handler"));
    assert!(record.field(FIELD_FILE).unwrap().ends_with("context.rs"));
}

#[test]
fn macro_records_calling_function() {
    let sink = Arc::new(MemorySink::new());
    let mut ctx = LogContext::new(sink.clone());

    log_info!(ctx, "user {} created", 7);

    let entry = &sink.entries()[0];
    assert_eq!(entry.message, "user 7 created");
    assert_eq!(entry.record.function.as_deref(), Some("context::macro_records_calling_function"));
}

#[test]
fn each_severity_reaches_matching_sink_method() {
    let sink = Arc::new(MemorySink::new());
    let mut ctx = LogContext::new(sink.clone());

    log_error!(ctx, std::io::Error::new(std::io::ErrorKind::Other, "err message"));
    log_warning!(ctx, "careful");
    log_info!(ctx, json!({"b": 1, "a": null}));

    let entries = sink.entries();
    assert_eq!(entries[0].severity, Severity::Error);
    assert_eq!(entries[0].message, "err message");
    assert_eq!(entries[1].severity, Severity::Warning);
    assert_eq!(entries[2].severity, Severity::Info);
    assert_eq!(entries[2].message, r#"{"a":null,"b":1}"#);
}

#[test]
fn structured_message_with_mixed_types() {
    let sink = Arc::new(MemorySink::new());
    let mut ctx = LogContext::new(sink.clone());

    let value = json!({
        "true": true,
        "null": null,
        "int": 777,
        "empty": "",
        "float": 777.7,
        "false": false,
        "string": "string",
        "int string": "777",
    });
    log_error!(ctx, Message::from(value));

    assert_eq!(
        sink.entries()[0].message,
        r#"{"empty":"","false":false,"float":777.7,"int":777,"int string":"777","null":null,"string":"string","true":true}"#
    );
}
