//! Effective configuration: precedence, presets and persistence.
//!
//! Precedence is fixed: per-attribute overrides, then the persisted blob,
//! then built-in defaults. Every function here is pure.

use crate::layer::ConfigLayer;
use crate::model::{ThemeConfig, WidgetConfig};
use crate::presets::PresetCatalog;

/// Merge the three configuration tiers into one effective config.
///
/// A malformed `persisted_blob` counts as empty.
pub fn resolve(overrides: &ConfigLayer, persisted_blob: &str) -> WidgetConfig {
    let mut config = WidgetConfig::default();
    ConfigLayer::from_blob(persisted_blob).apply_to(&mut config);
    overrides.apply_to(&mut config);
    config
}

/// Apply the named preset on top of `theme`.
///
/// Fields the preset does not name keep their current value. An unknown name
/// returns `theme` unchanged; use [`PresetCatalog::contains`] to report it.
pub fn apply_preset(theme: &ThemeConfig, name: &str) -> ThemeConfig {
    let Some(preset) = PresetCatalog::get(name) else {
        return theme.clone();
    };
    let mut config = WidgetConfig {
        theme: theme.clone(),
        ..WidgetConfig::default()
    };
    preset.apply_to(&mut config);
    config.theme
}

/// Persisted JSON form of `config`, every field included.
pub fn serialize(config: &WidgetConfig) -> String {
    ConfigLayer::from_config(config).to_json().to_string()
}

/// Inverse of [`serialize`]. Empty or invalid input yields the defaults.
pub fn deserialize(blob: &str) -> WidgetConfig {
    resolve(&ConfigLayer::new(), blob)
}
