/// Error raised while building a request snapshot.
///
/// These never reach the caller of
/// [`LogContext::init`](crate::context::LogContext::init): the context
/// degrades to an empty header block or body instead.
#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    #[error("header {name} has a value that is not visible ASCII")]
    HeaderValue { name: String },

    #[error("failed to read request body: {0}")]
    Body(String),
}

/// Error returned when loading configuration from the environment.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a boolean, got {value:?}")]
    InvalidBool { key: String, value: String },
}
