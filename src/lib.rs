//! # goguide-booking-widget
//!
//! An embeddable booking widget: a themeable form that loads a service
//! catalog, submits appointments, and shows untrusted 360° tour fragments in
//! a sandboxed preview. A companion configurator edits the widget's theme and
//! options and regenerates its embed snippet.
//!
//! ## Security
//!
//! - Tour fragments only ever reach the page as the escaped `srcdoc` of a
//!   sandboxed frame; they are never inserted into the host document
//! - Inline frames are never granted `allow-same-origin`
//! - Every rendered value is HTML-escaped; theme values are CSS-sanitized
//!
//! ## Crates
//!
//! - **goguide-widget-client** - HTTP infrastructure: client, requests, responses, errors
//! - **goguide-widget-config** - Configuration model, presets, embed snippet codec
//! - **goguide-widget-api** - Service catalog and appointment endpoints
//! - **goguide-widget-preview** - Sandboxed preview surface and page-level host
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use goguide_booking_widget::form::{BookingFormController, InputField};
//! use goguide_booking_widget::preview::PreviewHost;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // no data-api-base: the API is https://example.com/api
//!     let attrs = vec![("data-bu-id".to_string(), "7".to_string())];
//!     let host = Arc::new(PreviewHost::default());
//!     let mut form = BookingFormController::from_element(&attrs, "", "https://example.com", host)?;
//!
//!     form.attach().await;
//!     form.edit(InputField::Name, "Anna");
//!     form.edit(InputField::Phone, "+79990000000");
//!     form.edit(InputField::StartAt, "2026-05-01T10:00");
//!     form.edit(InputField::EndAt, "2026-05-01T12:00");
//!     form.submit().await?;
//!
//!     println!("{}", form.render()?);
//!     Ok(())
//! }
//! ```

pub mod configurator;
pub mod form;

// Re-export all crates for convenient access
pub use goguide_widget_api as api;
pub use goguide_widget_client as client;
pub use goguide_widget_config as config;
pub use goguide_widget_preview as preview;

pub use configurator::{ConfiguratorController, SavedConfiguration};
pub use form::BookingFormController;
