//! Booking backend API client.
//!
//! This client wraps `WidgetHttpClient` from `widget-client` and exposes the
//! two endpoints the widget talks to. Each endpoint lives in its own module
//! as an `impl BookingApiClient` block.

mod appointments;
mod catalog;

use goguide_widget_client::{ClientConfig, WidgetHttpClient};
use url::Url;

use crate::error::Result;

/// Client for the catalog and appointment endpoints under one API base.
///
/// # Example
///
/// ```rust,ignore
/// use goguide_widget_api::BookingApiClient;
///
/// let client = BookingApiClient::new("https://example.com/api")?;
/// let catalog = client.fetch_services(Some("7")).await?;
/// for service in &catalog {
///     println!("{}", service.display_label());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BookingApiClient {
    client: WidgetHttpClient,
    api_base: String,
}

impl BookingApiClient {
    /// Create a client for `api_base`, e.g. `https://example.com/api`,
    /// with HTTP settings from [`ClientConfig::from_env`].
    pub fn new(api_base: impl Into<String>) -> Result<Self> {
        Self::with_config(api_base, ClientConfig::from_env())
    }

    /// Create a client with custom HTTP configuration.
    pub fn with_config(api_base: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let client = WidgetHttpClient::new(config)?;
        Self::from_client(client, api_base)
    }

    /// Create a client from an existing `WidgetHttpClient`.
    pub fn from_client(client: WidgetHttpClient, api_base: impl Into<String>) -> Result<Self> {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Url::parse(&api_base)?;
        Ok(Self { client, api_base })
    }

    pub fn inner(&self) -> &WidgetHttpClient {
        &self.client
    }

    /// API base without a trailing slash.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Absolute URL of an endpoint, always with a trailing slash.
    pub(crate) fn endpoint(&self, name: &str) -> String {
        format!("{}/{}/", self.api_base, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_endpoint_joining() {
        let client = BookingApiClient::new("https://example.com/api/").unwrap();
        assert_eq!(client.api_base(), "https://example.com/api");
        assert_eq!(client.endpoint("services"), "https://example.com/api/services/");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = BookingApiClient::new("not a url").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidBaseUrl(_)));
    }
}
