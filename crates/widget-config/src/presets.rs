//! Named theme bundles.
//!
//! A preset is a partial theme: it only ever names theme fields. New presets
//! are added to [`PRESETS`] and need no change anywhere else.

use crate::layer::ConfigLayer;
use crate::model::{ConfigField, Section};

/// A named, static theme bundle.
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    pub name: &'static str,
    pub theme: &'static [(ConfigField, &'static str)],
}

/// Built-in presets.
pub static PRESETS: &[Preset] = &[
    Preset {
        name: "dark",
        theme: &[
            (ConfigField::Primary, "#0f172a"),
            (ConfigField::Panel, "#0b1324"),
            (ConfigField::Accent, "#64ffda"),
            (ConfigField::Text, "#e2e8f0"),
            (ConfigField::Muted, "#94a3b8"),
            (ConfigField::Border, "#1e293b"),
            (ConfigField::Shadow, "0 10px 40px rgba(0,0,0,0.25)"),
            (ConfigField::Radius, "12px"),
        ],
    },
    Preset {
        name: "light",
        theme: &[
            (ConfigField::Primary, "#ffffff"),
            (ConfigField::Panel, "#f8fafc"),
            (ConfigField::Accent, "#2563eb"),
            (ConfigField::Text, "#0f172a"),
            (ConfigField::Muted, "#475569"),
            (ConfigField::Border, "#e2e8f0"),
            (ConfigField::Shadow, "0 12px 40px rgba(15,23,42,0.12)"),
            (ConfigField::Radius, "12px"),
        ],
    },
];

/// Read-only lookup over [`PRESETS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PresetCatalog;

impl PresetCatalog {
    pub fn names() -> impl Iterator<Item = &'static str> {
        PRESETS.iter().map(|preset| preset.name)
    }

    pub fn contains(name: &str) -> bool {
        PRESETS.iter().any(|preset| preset.name == name)
    }

    /// The preset's theme layer. Entries outside the theme section are
    /// filtered out, so a preset can never touch labels or options.
    pub fn get(name: &str) -> Option<ConfigLayer> {
        let preset = PRESETS.iter().find(|preset| preset.name == name)?;
        let layer: ConfigLayer = preset
            .theme
            .iter()
            .map(|(field, value)| (*field, (*value).into()))
            .collect();
        Some(layer.only(Section::Theme))
    }
}
