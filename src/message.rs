use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt;

/// Message accepted by the emission methods of
/// [`LogContext`](crate::context::LogContext).
///
/// Each variant has exactly one canonical string form, see
/// [`Message::into_string`].
///
/// Text, `serde_json::Value`, `std::io::Error`, `serde_json::Error` and
/// boxed errors convert directly. Any other error type goes through
/// [`Message::failure`]:
///
/// ```ignore
/// log_error!(ctx, Message::failure(&err));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Plain text, emitted as is.
    Text(String),
    /// Descriptive text of an error.
    Failure(String),
    /// Arbitrary structured value, emitted as compact JSON with object keys
    /// sorted lexicographically.
    Structured(Value),
}

impl Message {
    /// Capture the `Display` text of an error. Use this for error types
    /// without a `From` impl, such as an application's own `thiserror` enum.
    pub fn failure(err: &(dyn Error + '_)) -> Self {
        Message::Failure(err.to_string())
    }

    /// Convert any serializable value.
    ///
    /// A value whose `Serialize` impl fails is kept as its `Debug` text.
    pub fn structured<T: Serialize + fmt::Debug + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(v) => Message::Structured(v),
            Err(e) => {
                tracing::debug!(error = %e, "message is not serializable, using debug text");
                Message::Text(format!("{:?}", value))
            }
        }
    }

    /// Canonical string form of the message.
    pub fn into_string(self) -> String {
        match self {
            Message::Text(s) | Message::Failure(s) => s,
            Message::Structured(Value::String(s)) => s,
            // serde_json maps are BTreeMap-backed, so keys come out sorted.
            Message::Structured(v) => v.to_string(),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Text(s) | Message::Failure(s) => f.write_str(s),
            Message::Structured(Value::String(s)) => f.write_str(s),
            Message::Structured(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for Message {
    fn from(value: &str) -> Self {
        Message::Text(value.to_string())
    }
}

impl From<String> for Message {
    fn from(value: String) -> Self {
        Message::Text(value)
    }
}

impl From<&String> for Message {
    fn from(value: &String) -> Self {
        Message::Text(value.clone())
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        Message::Structured(value)
    }
}

impl From<Box<dyn Error + Send + Sync>> for Message {
    fn from(value: Box<dyn Error + Send + Sync>) -> Self {
        Message::failure(&*value)
    }
}

impl From<&(dyn Error + 'static)> for Message {
    fn from(value: &(dyn Error + 'static)) -> Self {
        Message::failure(value)
    }
}

impl From<std::io::Error> for Message {
    fn from(value: std::io::Error) -> Self {
        Message::failure(&value)
    }
}

impl From<serde_json::Error> for Message {
    fn from(value: serde_json::Error) -> Self {
        Message::failure(&value)
    }
}
