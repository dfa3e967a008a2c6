//! Sparse configuration layers and three-tier resolution.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::model::{ConfigField, FieldValue, Section, WidgetConfig};

/// Key the first configurator generation used for the card width.
const LEGACY_WIDTH_KEY: &str = "width";

/// A sparse set of field assignments.
///
/// Overrides, the persisted blob, presets and decoded snippets are all
/// expressed as layers; a field absent from a layer leaves the value below it
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    values: BTreeMap<ConfigField, FieldValue>,
}

impl ConfigLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every field of `config`, as a fully populated layer.
    pub fn from_config(config: &WidgetConfig) -> Self {
        let values = ConfigField::ALL
            .into_iter()
            .map(|field| (field, config.get(field)))
            .collect();
        Self { values }
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, field: ConfigField, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Assign a field. Values whose kind does not match the field are dropped.
    pub fn set(&mut self, field: ConfigField, value: impl Into<FieldValue>) -> bool {
        let value = value.into();
        if value.kind() != field.kind() {
            debug!(?field, "Ignoring value of mismatched kind");
            return false;
        }
        self.values.insert(field, value);
        true
    }

    pub fn get(&self, field: ConfigField) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    pub fn remove(&mut self, field: ConfigField) -> Option<FieldValue> {
        self.values.remove(&field)
    }

    pub fn contains(&self, field: ConfigField) -> bool {
        self.values.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConfigField, &FieldValue)> {
        self.values.iter().map(|(field, value)| (*field, value))
    }

    /// Restrict the layer to one section.
    pub fn only(&self, section: Section) -> Self {
        let values = self
            .values
            .iter()
            .filter(|(field, _)| field.section() == section)
            .map(|(field, value)| (*field, value.clone()))
            .collect();
        Self { values }
    }

    /// Write every assignment of this layer onto `config`.
    pub fn apply_to(&self, config: &mut WidgetConfig) {
        for (field, value) in &self.values {
            config.set(*field, value.clone());
        }
    }

    /// Read a layer from a persisted JSON blob.
    ///
    /// Accepts the nested `{"theme":{..},"labels":{..},"options":{..}}` form
    /// and the flat form written by the first configurator generation. Empty
    /// input, invalid JSON, and non-object JSON all yield an empty layer.
    /// Individual fields of the wrong type are skipped.
    pub fn from_blob(blob: &str) -> Self {
        let blob = blob.trim();
        if blob.is_empty() {
            return Self::new();
        }

        let value: serde_json::Value = match serde_json::from_str(blob) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "Persisted widget configuration is not valid JSON; using defaults");
                return Self::new();
            }
        };

        let Some(object) = value.as_object() else {
            warn!("Persisted widget configuration is not a JSON object; using defaults");
            return Self::new();
        };

        let nested = [Section::Theme, Section::Labels, Section::Options]
            .iter()
            .any(|section| object.get(section.key()).is_some_and(|v| v.is_object()));

        let mut layer = Self::new();
        for field in ConfigField::ALL {
            let raw = if nested {
                object
                    .get(field.section().key())
                    .and_then(|section| section.get(field.key()))
            } else {
                object.get(field.key()).or_else(|| {
                    (field == ConfigField::CardWidth)
                        .then(|| object.get(LEGACY_WIDTH_KEY))
                        .flatten()
                })
            };

            let Some(raw) = raw else { continue };
            if raw.is_null() {
                continue;
            }
            match FieldValue::from_json(field.kind(), raw) {
                Some(value) => {
                    layer.values.insert(field, value);
                }
                None => debug!(?field, "Skipping persisted field with unexpected type"),
            }
        }
        layer
    }

    /// Nested JSON representation, sections omitted when empty.
    pub fn to_json(&self) -> serde_json::Value {
        let mut root = serde_json::Map::new();
        for (field, value) in &self.values {
            let section = root
                .entry(field.section().key())
                .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
            if let serde_json::Value::Object(map) = section {
                map.insert(field.key().to_string(), value.to_json());
            }
        }
        serde_json::Value::Object(root)
    }
}

impl FromIterator<(ConfigField, FieldValue)> for ConfigLayer {
    fn from_iter<I: IntoIterator<Item = (ConfigField, FieldValue)>>(iter: I) -> Self {
        let mut layer = Self::new();
        for (field, value) in iter {
            layer.set(field, value);
        }
        layer
    }
}
