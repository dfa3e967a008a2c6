//! End-to-end tests of the booking widget against a mock backend.
//!
//! Run with:
//!   cargo test --test integration

#[path = "integration/common.rs"]
mod common;
#[path = "integration/configurator.rs"]
mod configurator;
#[path = "integration/form.rs"]
mod form;
#[path = "integration/preview.rs"]
mod preview;
