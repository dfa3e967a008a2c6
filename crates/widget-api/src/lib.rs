//! # widget-api
//!
//! Typed client for the booking backend the widget talks to:
//!
//! - `GET {api_base}/services/?business_unit={id}`: the service catalog
//! - `POST {api_base}/appointments/`: appointment creation
//!
//! Catalog loads fail with [`CatalogLoadError`]; submissions fail with
//! [`SubmitError`], which separates backend validation messages from
//! everything else.

mod appointment;
pub mod catalog;
mod client;
mod error;

pub use appointment::{AppointmentConfirmation, AppointmentRequest, PaymentStatus};
pub use catalog::{Price, Service, ServiceCatalog};
pub use client::BookingApiClient;
pub use error::{flatten_messages, CatalogLoadError, Error, ErrorKind, Result, SubmitError};
