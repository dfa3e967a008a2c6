//! Booking widget configuration.
//!
//! - [`model`]: typed theme, labels and options with their defaults
//! - [`layer`]: sparse layers and the persisted JSON blob
//! - [`resolve`]: three-tier precedence, presets, persistence
//! - [`embed`]: the embed snippet codec
//!
//! # Example
//!
//! ```rust
//! use goguide_widget_config::{embed, resolve, Connection, UnknownAttrs};
//!
//! let overrides = embed::overrides_from_attributes(&[
//!     ("data-primary".to_string(), "#ffffff".to_string()),
//! ]);
//! let config = resolve::resolve(&overrides, r#"{"labels":{"submit":"Go"}}"#);
//! assert_eq!(config.theme.primary, "#ffffff");
//! assert_eq!(config.labels.submit, "Go");
//!
//! let snippet = embed::encode(
//!     &config,
//!     &Connection::new("https://example.com/api", Some("7".into())),
//!     &UnknownAttrs::new(),
//! );
//! assert_eq!(embed::decode(&snippet).config, config);
//! ```

pub mod embed;
pub mod layer;
pub mod model;
pub mod presets;
pub mod resolve;
pub mod security;

pub use embed::{Connection, DecodedSnippet, UnknownAttrs};
pub use layer::ConfigLayer;
pub use model::{
    BehaviorOptions, ConfigField, FieldKind, FieldValue, LabelConfig, Section, ThemeConfig,
    WidgetConfig,
};
pub use presets::{Preset, PresetCatalog, PRESETS};
