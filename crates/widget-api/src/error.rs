//! Error types for widget-api.

use goguide_widget_client::Error as ClientError;

/// Result type alias for widget-api construction.
pub type Result<T> = std::result::Result<T, Error>;

/// Error building an API client.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("Client error: {0}")]
    Client(String),

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

impl From<ClientError> for Error {
    fn from(err: ClientError) -> Self {
        Error {
            kind: ErrorKind::Client(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error {
            kind: ErrorKind::InvalidBaseUrl(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}

/// The service catalog could not be loaded.
#[derive(Debug, thiserror::Error)]
#[error("Failed to load services: {cause}")]
pub struct CatalogLoadError {
    /// Human-readable cause.
    pub cause: String,
    #[source]
    pub source: Option<ClientError>,
}

impl From<ClientError> for CatalogLoadError {
    fn from(err: ClientError) -> Self {
        let cause = match err.status() {
            Some(status) => format!("server responded with HTTP {status}"),
            None => err.to_string(),
        };
        Self {
            cause,
            source: Some(err),
        }
    }
}

/// An appointment could not be created.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The backend rejected the request with field messages.
    #[error("{}", .messages.join("; "))]
    Validation { status: u16, messages: Vec<String> },

    /// Transport failure, unparsable body, or a rejection without messages.
    #[error("Submission failed: {0}")]
    Submission(#[source] ClientError),
}

impl SubmitError {
    /// All validation messages joined with `"; "`, if any.
    pub fn joined_messages(&self) -> Option<String> {
        match self {
            SubmitError::Validation { messages, .. } => Some(messages.join("; ")),
            SubmitError::Submission(_) => None,
        }
    }
}

impl From<ClientError> for SubmitError {
    fn from(err: ClientError) -> Self {
        let messages = err.api_body().map(flatten_messages).unwrap_or_default();
        match err.status() {
            Some(status) if !messages.is_empty() => SubmitError::Validation { status, messages },
            _ => SubmitError::Submission(err),
        }
    }
}

/// Flatten a `field -> [messages]` body into its messages, in field order.
///
/// String values, nested lists and nested objects are all tolerated; other
/// scalars are ignored.
pub fn flatten_messages(body: &serde_json::Value) -> Vec<String> {
    fn walk(value: &serde_json::Value, out: &mut Vec<String>) {
        match value {
            serde_json::Value::String(s) if !s.trim().is_empty() => out.push(s.clone()),
            serde_json::Value::Array(items) => items.iter().for_each(|item| walk(item, out)),
            serde_json::Value::Object(map) => map.values().for_each(|item| walk(item, out)),
            _ => {}
        }
    }

    let mut out = Vec::new();
    walk(body, &mut out);
    out
}
