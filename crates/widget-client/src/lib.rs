//! # widget-client
//!
//! HTTP plumbing under the booking API: a `reqwest` client configured for a
//! single backend origin, a small request builder, and decoding of non-2xx
//! responses into [`Error`]s that keep the backend's JSON field messages.
//!
//! Requests are never retried. The widget shows the failure and the visitor
//! decides whether to try again.
//!
//! ```rust,ignore
//! use goguide_widget_client::{ClientConfig, WidgetHttpClient};
//!
//! let client = WidgetHttpClient::new(ClientConfig::default())?;
//! let services: serde_json::Value = client
//!     .send_json(client.get("https://example.com/api/services/").accept_json())
//!     .await?;
//! ```

mod client;
mod config;
mod error;
mod request;
mod response;

pub use client::WidgetHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder, TIMEOUT_ENV};
pub use error::{Error, ErrorKind, Result};
pub use request::{RequestBuilder, RequestMethod};
pub use response::{Response, ResponseExt};

/// Sent as `User-Agent` on every request.
pub const USER_AGENT: &str = concat!("goguide-booking-widget/", env!("CARGO_PKG_VERSION"));
