//! Backend responses.

use serde::de::DeserializeOwned;

use crate::error::{Error, ErrorKind, Result};

/// Longest plain-text error body kept in [`ErrorKind::Http`].
const MAX_MESSAGE_LEN: usize = 300;

#[derive(Debug)]
pub struct Response {
    inner: reqwest::Response,
}

impl Response {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    pub fn is_success(&self) -> bool {
        self.inner.status().is_success()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    pub async fn text(self) -> Result<String> {
        Ok(self.inner.text().await?)
    }

    /// Decode the body. The text is read first so that a body that is not
    /// JSON is reported as [`ErrorKind::Json`] instead of a transport error.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let body = self.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Turning non-2xx responses into [`Error`]s.
pub trait ResponseExt: Sized {
    fn check_api_error(self) -> impl std::future::Future<Output = Result<Self>> + Send;
}

impl ResponseExt for Response {
    async fn check_api_error(self) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        let status = self.status();
        let body = self.text().await.unwrap_or_default();
        Err(rejection(status, &body))
    }
}

/// Field-message maps and message lists stay structured; anything else is
/// kept as a trimmed string.
fn rejection(status: u16, body: &str) -> Error {
    let kind = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value @ (serde_json::Value::Object(_) | serde_json::Value::Array(_))) => {
            ErrorKind::Api { status, body: value }
        }
        _ => ErrorKind::Http {
            status,
            message: clip(body.trim()),
        },
    };
    Error::new(kind)
}

fn clip(message: &str) -> String {
    if message.len() <= MAX_MESSAGE_LEN {
        return message.to_string();
    }
    let cut = (0..=MAX_MESSAGE_LEN)
        .rev()
        .find(|&i| message.is_char_boundary(i))
        .unwrap_or(0);
    format!("{}...[truncated]", &message[..cut])
}
