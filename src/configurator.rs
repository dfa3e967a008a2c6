//! Operator-facing configurator.
//!
//! Loads an existing embed snippet together with the persisted configuration
//! blob, lets the operator edit typed fields and apply presets, and emits the
//! regenerated snippet plus the blob the backend stores in its hidden
//! `widget_config` field.

use tracing::{debug, info};

use goguide_widget_config::embed::{self, Connection, UnknownAttrs};
use goguide_widget_config::{resolve, ConfigField, FieldValue, PresetCatalog, WidgetConfig};

/// What [`ConfiguratorController::save`] produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedConfiguration {
    /// Value for the hidden `widget_config` field.
    pub persisted_blob: String,
    /// Two-line embed snippet.
    pub snippet: String,
}

/// Editing state of the configurator page.
#[derive(Debug, Clone, Default)]
pub struct ConfiguratorController {
    form: WidgetConfig,
    connection: Connection,
    unknown_attrs: UnknownAttrs,
}

impl ConfiguratorController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the form from an existing snippet and persisted blob.
    ///
    /// Attributes present on the snippet win over the blob; fields neither
    /// mentions fall back to defaults.
    pub fn load(&mut self, existing_snippet: &str, persisted_blob: &str) {
        let decoded = embed::decode(existing_snippet);
        let overrides = embed::element_attributes(existing_snippet)
            .map(|attrs| embed::overrides_from_attributes(&attrs))
            .unwrap_or_default();

        self.form = resolve::resolve(&overrides, persisted_blob);
        self.connection = decoded.connection;
        self.unknown_attrs = decoded.unknown_attrs;
        debug!(
            overrides = overrides.len(),
            unknown_attrs = self.unknown_attrs.len(),
            "Configurator loaded"
        );
    }

    pub fn form(&self) -> &WidgetConfig {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut WidgetConfig {
        &mut self.form
    }

    /// Set one field; false when the value's kind does not fit the field.
    pub fn set_field(&mut self, field: ConfigField, value: impl Into<FieldValue>) -> bool {
        self.form.set(field, value.into())
    }

    /// Overwrite theme fields from a preset. Labels and options are kept.
    pub fn apply_preset(&mut self, name: &str) -> bool {
        if !PresetCatalog::contains(name) {
            debug!(preset = name, "Unknown preset");
            return false;
        }
        self.form.theme = resolve::apply_preset(&self.form.theme, name);
        true
    }

    pub fn preset_names(&self) -> Vec<&'static str> {
        PresetCatalog::names().collect()
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn set_connection(&mut self, api_base: impl Into<String>, business_unit_id: Option<String>) {
        self.connection = Connection::new(api_base, business_unit_id);
    }

    pub fn unknown_attrs(&self) -> &UnknownAttrs {
        &self.unknown_attrs
    }

    /// Serialize the form and regenerate the snippet.
    pub fn save(&self) -> SavedConfiguration {
        let saved = SavedConfiguration {
            persisted_blob: resolve::serialize(&self.form),
            snippet: embed::encode(&self.form, &self.connection, &self.unknown_attrs),
        };
        info!(api_base = %self.connection.api_base, "Configuration saved");
        saved
    }
}
