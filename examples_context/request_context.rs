use axum::body::{to_bytes, Body};
use axum::http::Request;
use request_log_context::init::{init_logger, TracingConfig};
use request_log_context::{log_info, log_warning, LogContext, LoggerConfig};

/// Walk one request through the usual lifecycle: build a context for it,
/// log from the handler, hand a copy to background work.
#[tokio::main]
async fn main() {
    let config = LoggerConfig {
        service_name: Some("orders".to_string()),
        capture_body: true,
        ..LoggerConfig::default()
    };
    let tracing = TracingConfig {
        json: true,
        ..TracingConfig::default()
    };
    let logger = init_logger(config, tracing).expect("tracing already initialized");

    let mut request = Request::builder()
        .method("POST")
        .uri("/orders?dry_run=true")
        .header("host", "api.example.org")
        .header("authorization", "Bearer super-secret")
        .header("x-correlation-id", "demo-123")
        .body(Body::from(r#"{"sku":"A-1","qty":2}"#))
        .expect("valid request");

    let mut ctx = logger.context_for(Some(&mut request)).await;
    ctx.record_mut().account_id("acct-42");

    handle(&mut ctx, request).await;

    let mut background = ctx.duplicate();
    tokio::spawn(async move {
        log_warning!(background, "stock below threshold for {}", "A-1");
    })
    .await
    .expect("background task");
}

async fn handle(ctx: &mut LogContext, request: Request<Body>) {
    // The body is still readable after the context captured it.
    let body = to_bytes(request.into_body(), usize::MAX).await.unwrap_or_default();
    log_info!(ctx, "order accepted ({} bytes)", body.len());
}
