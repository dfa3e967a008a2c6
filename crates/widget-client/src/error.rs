//! Errors raised while talking to the booking backend.

pub type Result<T> = std::result::Result<T, Error>;

/// A failed exchange with the backend.
///
/// `kind` says what went wrong; `source` keeps the underlying library error
/// for logging.
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

    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Status code of the rejecting response.
    pub fn status(&self) -> Option<u16> {
        match self.kind {
            ErrorKind::Http { status, .. } | ErrorKind::Api { status, .. } => Some(status),
            _ => None,
        }
    }

    /// The decoded body of a structured rejection, e.g.
    /// `{"client_phone": ["Неверный номер"]}`.
    pub fn api_body(&self) -> Option<&serde_json::Value> {
        match &self.kind {
            ErrorKind::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// True when no response arrived at all.
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Timeout | ErrorKind::Connection(_))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Non-success status with a body that is not a JSON object or array.
    #[error("backend responded with HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Non-success status with a JSON object or array body.
    #[error("backend rejected the request with HTTP {status}")]
    Api {
        status: u16,
        body: serde_json::Value,
    },

    #[error("backend did not answer in time")]
    Timeout,

    #[error("could not reach backend: {0}")]
    Connection(String),

    /// Payload could not be encoded or decoded.
    #[error("malformed JSON: {0}")]
    Json(String),

    /// The underlying HTTP client could not be built.
    #[error("client configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = match err.status() {
            _ if err.is_timeout() => ErrorKind::Timeout,
            _ if err.is_connect() => ErrorKind::Connection(err.to_string()),
            _ if err.is_decode() => ErrorKind::Json(err.to_string()),
            Some(status) => ErrorKind::Http {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => ErrorKind::Other(err.to_string()),
        };
        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}
