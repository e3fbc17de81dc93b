//! Textual snapshot of an inbound request for logging.

use crate::error::SnapshotError;
use crate::redact::HeaderRedactor;
use axum::body::{to_bytes, Body, Bytes};
use axum::http::{header, HeaderName, Request};

/// Headers left out of the dump. `Host` is written first on its own line.
fn excluded_from_dump(name: &HeaderName) -> bool {
    *name == header::HOST || *name == header::TRANSFER_ENCODING || *name == header::TRAILER
}

/// What a [`LogContext`](crate::context::LogContext) records about a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSnapshot {
    pub method: String,
    /// The request URI exactly as received. Scheme and host are only
    /// present when the request carried them.
    pub full_path: String,
    /// Redacted request line and headers. Empty when the dump failed.
    pub header_block: String,
    /// Captured body, when requested. Empty when reading failed.
    pub body: Option<String>,
}

impl RequestSnapshot {
    /// Build a snapshot of `request`.
    ///
    /// With `capture_body`, the body is buffered once and replaced by an
    /// identical in-memory body, so handlers further down can still read
    /// it. Failures never propagate: they leave the affected field empty.
    pub async fn capture(request: &mut Request<Body>, capture_body: bool, redactor: &HeaderRedactor) -> Self {
        let header_block = match dump_request_head(request) {
            Ok(dump) => redactor.redact(&dump).into_owned(),
            Err(e) => {
                tracing::debug!(error = %e, "skipping request header dump");
                String::new()
            }
        };

        let body = if capture_body {
            match buffer_body(request).await {
                Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
                Err(e) => {
                    tracing::warn!(error = %e, "request body not captured");
                    Some(String::new())
                }
            }
        } else {
            None
        };

        Self {
            method: request.method().to_string(),
            full_path: request.uri().to_string(),
            header_block,
            body,
        }
    }
}

/// Render the request line and headers in HTTP/1 wire form, without body.
///
/// ```text
/// POST /path?q=1 HTTP/1.1\r\n
/// Host: example.org\r\n
/// Authorization: ...\r\n
/// X-Correlation-Id: 777\r\n
/// \r\n
/// ```
///
/// Header names are written in canonical form and sorted; a header with
/// several values produces one line per value. Values are trimmed.
///
/// The request line always carries the origin-form target. An
/// absolute-form URI (`http://host/path`) is split into its path and query
/// on the request line and its authority on the `Host` line, unless the
/// request already has a `Host` header.
pub fn dump_request_head<B>(request: &Request<B>) -> Result<String, SnapshotError> {
    let uri = request.uri();
    let target = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    let mut out = format!("{} {} {:?}\r\n", request.method(), target, request.version());

    let host = match request.headers().get(header::HOST) {
        Some(value) => Some(value.to_str().map_err(|_| SnapshotError::HeaderValue {
            name: canonical_name(header::HOST.as_str()),
        })?),
        None => uri.authority().map(|a| a.as_str()),
    };
    if let Some(host) = host.map(str::trim).filter(|h| !h.is_empty()) {
        out.push_str("Host: ");
        out.push_str(host);
        out.push_str("\r\n");
    }

    let mut lines = Vec::with_capacity(request.headers().len());
    for (name, value) in request.headers() {
        if excluded_from_dump(name) {
            continue;
        }
        let name = canonical_name(name.as_str());
        let value = value
            .to_str()
            .map_err(|_| SnapshotError::HeaderValue { name: name.clone() })?;
        lines.push((name, value.trim()));
    }
    // Stable: values of one header keep their original order.
    lines.sort_by(|a, b| a.0.cmp(&b.0));

    for (name, value) in lines {
        out.push_str(&name);
        out.push_str(": ");
        out.push_str(value);
        out.push_str("\r\n");
    }
    out.push_str("\r\n");
    Ok(out)
}

/// Read the whole body into memory and put an identical body back.
///
/// On failure the request is left with an empty body.
pub async fn buffer_body(request: &mut Request<Body>) -> Result<Bytes, SnapshotError> {
    let body = std::mem::take(request.body_mut());
    match to_bytes(body, usize::MAX).await {
        Ok(bytes) => {
            *request.body_mut() = Body::from(bytes.clone());
            Ok(bytes)
        }
        Err(e) => Err(SnapshotError::Body(e.to_string())),
    }
}

/// `x-correlation-id` -> `X-Correlation-Id`.
fn canonical_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = true;
    for c in name.chars() {
        if upper {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        upper = c == '-';
    }
    out
}
