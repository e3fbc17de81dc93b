use serde::Serialize;
use std::collections::BTreeMap;

/// Structured payload attached to every message emitted by a
/// [`LogContext`](crate::context::LogContext).
///
/// Setters are fluent: each mutates the record in place and returns it so
/// calls can be chained. Unset fields are omitted when serialized.
///
/// The record owns all of its storage, including the additional fields, so
/// `clone()` yields a fully independent copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub additional_fields: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_header: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

impl AppRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn service_name(&mut self, value: impl Into<String>) -> &mut Self {
        self.service_name = Some(value.into());
        self
    }

    /// Short identifier of the function that emitted the message.
    pub fn function(&mut self, value: impl Into<String>) -> &mut Self {
        self.function = Some(value.into());
        self
    }

    /// Insert a free-form field. An existing key is overwritten.
    pub fn additional_field(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.additional_fields.insert(key.into(), value.into());
        self
    }

    pub fn response_time_ms(&mut self, value: i64) -> &mut Self {
        self.response_time_ms = Some(value);
        self
    }

    pub fn correlation_id(&mut self, value: impl Into<String>) -> &mut Self {
        self.correlation_id = Some(value.into());
        self
    }

    pub fn full_path(&mut self, value: impl Into<String>) -> &mut Self {
        self.full_path = Some(value.into());
        self
    }

    pub fn method(&mut self, value: impl Into<String>) -> &mut Self {
        self.method = Some(value.into());
        self
    }

    /// Redacted request line and header block.
    pub fn request_header(&mut self, value: impl Into<String>) -> &mut Self {
        self.request_header = Some(value.into());
        self
    }

    pub fn request_body(&mut self, value: impl Into<String>) -> &mut Self {
        self.request_body = Some(value.into());
        self
    }

    pub fn account_id(&mut self, value: impl Into<String>) -> &mut Self {
        self.account_id = Some(value.into());
        self
    }

    /// Look up a previously inserted additional field.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.additional_fields.get(key).map(String::as_str)
    }

    /// Serialize the whole record as a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::Value::Object(Default::default()))
    }
}
