//! Regenerate an embed snippet from the command line.
//!
//! Reads an existing snippet on stdin (may be empty), optionally applies a
//! preset, and prints the new snippet followed by the persisted JSON blob.
//!
//! ```sh
//! export WIDGET_API_BASE='https://example.com/api'
//! export WIDGET_BUSINESS_UNIT='7'
//! echo '' | cargo run --bin embed-snippet -- light
//! ```

use std::io::Read;

use anyhow::{bail, Context, Result};
use goguide_booking_widget::ConfiguratorController;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let preset = std::env::args().nth(1);

    let mut snippet = String::new();
    std::io::stdin()
        .read_to_string(&mut snippet)
        .context("Failed to read snippet from stdin")?;

    let persisted_blob = match std::env::var("WIDGET_CONFIG_FILE") {
        Ok(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read persisted configuration from {path}"))?,
        Err(_) => String::new(),
    };

    let mut configurator = ConfiguratorController::new();
    configurator.load(&snippet, &persisted_blob);

    if configurator.connection().api_base.is_empty() {
        let api_base = std::env::var("WIDGET_API_BASE")
            .context("Snippet has no data-api-base and WIDGET_API_BASE is not set")?;
        let business_unit = std::env::var("WIDGET_BUSINESS_UNIT")
            .ok()
            .filter(|id| !id.is_empty());
        configurator.set_connection(api_base, business_unit);
    }

    if let Some(name) = preset {
        if !configurator.apply_preset(&name) {
            bail!(
                "Unknown preset {name:?}; available: {}",
                configurator.preset_names().join(", ")
            );
        }
    }

    let saved = configurator.save();
    println!("{}", saved.snippet);
    println!();
    println!("{}", saved.persisted_blob);
    Ok(())
}
