//! Embed snippet codec.
//!
//! The embed snippet is two lines of HTML an operator pastes into a page:
//!
//! ```text
//! <script src="https://example.com/static/widget/booking-widget.js" defer></script>
//! <booking-widget data-bu-id="7" data-api-base="https://example.com/api" data-primary="#fff"></booking-widget>
//! ```
//!
//! [`ATTRIBUTES`] is the single table mapping element attributes to
//! configuration fields. [`decode`] and [`encode`] are inverses on every field
//! in that table; attributes the table does not know are carried through.

use tracing::debug;

use crate::layer::ConfigLayer;
use crate::model::{ConfigField, FieldKind, FieldValue, WidgetConfig};
use crate::security::html;

/// Custom element name of the widget.
pub const ELEMENT_NAME: &str = "booking-widget";

/// Path of the widget bundle relative to the backend origin.
pub const SCRIPT_PATH: &str = "/static/widget/booking-widget.js";

/// API path under the page origin when an element names no API base.
pub const DEFAULT_API_PATH: &str = "/api";

pub const ATTR_API_BASE: &str = "data-api-base";
pub const ATTR_BUSINESS_UNIT: &str = "data-bu-id";

/// Element attribute ⇄ configuration field.
pub static ATTRIBUTES: &[(&str, ConfigField)] = &[
    ("data-primary", ConfigField::Primary),
    ("data-panel", ConfigField::Panel),
    ("data-accent", ConfigField::Accent),
    ("data-text", ConfigField::Text),
    ("data-muted", ConfigField::Muted),
    ("data-border", ConfigField::Border),
    ("data-shadow", ConfigField::Shadow),
    ("data-radius", ConfigField::Radius),
    ("data-font-family", ConfigField::FontFamily),
    ("data-preview-height", ConfigField::PreviewHeight),
    ("data-width", ConfigField::CardWidth),
    ("data-label-title", ConfigField::LabelTitle),
    ("data-label-service", ConfigField::LabelService),
    ("data-label-start", ConfigField::LabelStart),
    ("data-label-end", ConfigField::LabelEnd),
    ("data-label-name", ConfigField::LabelName),
    ("data-label-phone", ConfigField::LabelPhone),
    ("data-label-email", ConfigField::LabelEmail),
    ("data-label-submit", ConfigField::LabelSubmit),
    ("data-label-preview", ConfigField::LabelPreview),
    ("data-label-success", ConfigField::LabelSuccess),
    ("data-hide-email", ConfigField::HideEmail),
    ("data-email-optional", ConfigField::EmailOptional),
    ("data-hide-end", ConfigField::HideEnd),
    ("data-auto-open-preview", ConfigField::AutoOpenPreview),
    ("data-preview-autoclose-ms", ConfigField::PreviewAutoCloseMs),
    ("data-scroll-into-view", ConfigField::ScrollIntoView),
    ("data-phone-placeholder", ConfigField::PhonePlaceholder),
];

/// Field addressed by an attribute name.
pub fn field_for(attribute: &str) -> Option<ConfigField> {
    ATTRIBUTES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(attribute))
        .map(|(_, field)| *field)
}

/// Attribute name of a field.
pub fn attribute_for(field: ConfigField) -> &'static str {
    ATTRIBUTES
        .iter()
        .find(|(_, f)| *f == field)
        .map(|(name, _)| *name)
        .unwrap_or_default()
}

fn is_reserved(attribute: &str) -> bool {
    attribute.eq_ignore_ascii_case(ATTR_API_BASE)
        || attribute.eq_ignore_ascii_case(ATTR_BUSINESS_UNIT)
        || field_for(attribute).is_some()
}

/// Where a widget instance talks to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Connection {
    /// Base URL of the REST API, e.g. `https://example.com/api`.
    pub api_base: String,
    pub business_unit_id: Option<String>,
}

impl Connection {
    pub fn new(api_base: impl Into<String>, business_unit_id: Option<String>) -> Self {
        Self {
            api_base: api_base.into(),
            business_unit_id,
        }
    }

    /// Origin serving the widget bundle: the API base without its `/api`
    /// suffix.
    pub fn asset_origin(&self) -> &str {
        let base = self.api_base.trim_end_matches('/');
        base.strip_suffix("/api").unwrap_or(base)
    }

    pub fn script_src(&self) -> String {
        format!("{}{}", self.asset_origin(), SCRIPT_PATH)
    }

    /// Connection of a live element. A missing or blank `data-api-base`
    /// falls back to `{page_origin}/api`, the backend serving the page.
    pub fn from_attributes(attrs: &[(String, String)], page_origin: &str) -> Self {
        let attr = |name: &str| {
            attrs
                .iter()
                .find(|(n, _)| n.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.trim())
                .filter(|v| !v.is_empty())
        };
        let api_base = match attr(ATTR_API_BASE) {
            Some(base) => base.to_string(),
            None => format!("{}{DEFAULT_API_PATH}", page_origin.trim_end_matches('/')),
        };
        Self::new(api_base, attr(ATTR_BUSINESS_UNIT).map(str::to_string))
    }
}

/// Attributes the codec does not recognize, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnknownAttrs(Vec<(String, String)>);

impl UnknownAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing the value of an existing one whose name
    /// matches case-insensitively. Names are kept as first written.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(&name)) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let idx = self.0.iter().position(|(n, _)| n.eq_ignore_ascii_case(name))?;
        Some(self.0.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything [`decode`] recovers from a snippet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedSnippet {
    pub config: WidgetConfig,
    pub connection: Connection,
    pub unknown_attrs: UnknownAttrs,
    /// `src` of the snippet's script tag, when present.
    pub script_src: Option<String>,
}

/// Parse an embed snippet.
///
/// A snippet without a widget element decodes to defaults.
pub fn decode(snippet: &str) -> DecodedSnippet {
    let script_src = find_start_tag(snippet, "script").and_then(|attrs| {
        attrs
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("src"))
            .map(|(_, value)| value)
    });

    let Some(attrs) = element_attributes(snippet) else {
        debug!("No widget element in snippet; decoding to defaults");
        return DecodedSnippet {
            script_src,
            ..DecodedSnippet::default()
        };
    };

    let mut connection = Connection::default();
    let mut unknown_attrs = UnknownAttrs::new();
    for (name, value) in &attrs {
        if name.eq_ignore_ascii_case(ATTR_API_BASE) {
            connection.api_base = value.clone();
        } else if name.eq_ignore_ascii_case(ATTR_BUSINESS_UNIT) {
            connection.business_unit_id = Some(value.clone()).filter(|v| !v.is_empty());
        } else if field_for(name).is_none() && unknown_attrs.get(name).is_none() {
            unknown_attrs.insert(name.clone(), value.clone());
        }
    }

    let mut config = WidgetConfig::default();
    overrides_from_attributes(&attrs).apply_to(&mut config);

    DecodedSnippet {
        config,
        connection,
        unknown_attrs,
        script_src,
    }
}

/// Attributes of the snippet's widget element, names as written and values
/// decoded, in source order. `None` when there is no element.
pub fn element_attributes(snippet: &str) -> Option<Vec<(String, String)>> {
    find_start_tag(snippet, ELEMENT_NAME)
}

/// Configuration layer carried by an element's attributes.
///
/// Only attributes that are present produce entries: boolean attributes are
/// true when their value is exactly `"true"`, and an unparsable millisecond
/// value is skipped. For duplicated names the first occurrence wins.
pub fn overrides_from_attributes(attrs: &[(String, String)]) -> ConfigLayer {
    let mut layer = ConfigLayer::new();
    for (name, value) in attrs {
        let Some(field) = field_for(name) else {
            continue;
        };
        if layer.contains(field) {
            continue;
        }
        let parsed = match field.kind() {
            FieldKind::Text => Some(FieldValue::Text(value.clone())),
            FieldKind::Flag => Some(FieldValue::Flag(value == "true")),
            FieldKind::Millis => value.trim().parse().ok().map(FieldValue::Millis),
        };
        match parsed {
            Some(parsed) => {
                layer.set(field, parsed);
            }
            None => debug!(attribute = %name, "Ignoring unparsable attribute value"),
        }
    }
    layer
}

/// Emit the two-line embed snippet.
///
/// Attributes equal to their built-in default are omitted. Unknown attributes
/// are appended unchanged, except those whose name collides with a
/// recognized attribute.
pub fn encode(config: &WidgetConfig, connection: &Connection, unknown_attrs: &UnknownAttrs) -> String {
    let mut attrs: Vec<(&str, String)> = Vec::new();

    if let Some(ref id) = connection.business_unit_id {
        attrs.push((ATTR_BUSINESS_UNIT, id.clone()));
    }
    if !connection.api_base.is_empty() {
        attrs.push((ATTR_API_BASE, connection.api_base.clone()));
    }

    for (name, field) in ATTRIBUTES {
        let value = config.get(*field);
        if value == field.default_value() {
            continue;
        }
        let rendered = match value {
            FieldValue::Text(s) => s,
            FieldValue::Flag(b) => b.to_string(),
            FieldValue::Millis(ms) => ms.to_string(),
        };
        attrs.push((*name, rendered));
    }

    for (name, value) in unknown_attrs.iter() {
        if is_reserved(name) {
            continue;
        }
        attrs.push((name, value.to_string()));
    }

    let mut element = format!("<{ELEMENT_NAME}");
    for (name, value) in &attrs {
        element.push(' ');
        element.push_str(name);
        element.push_str("=\"");
        element.push_str(&html::escape_attr(value));
        element.push('"');
    }
    element.push_str(&format!("></{ELEMENT_NAME}>"));

    let script = format!(
        "<script src=\"{}\" defer></script>",
        html::escape_attr(&connection.script_src())
    );

    format!("{script}\n{element}")
}

/// Locate the first `<tag ...>` start tag and return its attributes with
/// decoded values.
fn find_start_tag(html_text: &str, tag: &str) -> Option<Vec<(String, String)>> {
    let lower = html_text.to_ascii_lowercase();
    let needle = format!("<{tag}");
    let mut from = 0;

    while let Some(pos) = lower[from..].find(&needle) {
        let start = from + pos + needle.len();
        let boundary = lower.as_bytes().get(start).copied();
        if matches!(boundary, None | Some(b' ' | b'\t' | b'\n' | b'\r' | b'>' | b'/')) {
            return Some(parse_attributes(&html_text[start..]));
        }
        from = start;
    }
    None
}

/// Parse attributes up to the closing `>` of a start tag.
fn parse_attributes(input: &str) -> Vec<(String, String)> {
    let bytes = input.as_bytes();
    let mut attrs = Vec::new();
    let mut i = 0;

    let skip_ws = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        i
    };

    loop {
        i = skip_ws(i);
        if i >= bytes.len() || bytes[i] == b'>' {
            break;
        }
        if bytes[i] == b'/' {
            i += 1;
            continue;
        }

        let name_start = i;
        while i < bytes.len()
            && !bytes[i].is_ascii_whitespace()
            && !matches!(bytes[i], b'=' | b'>' | b'/')
        {
            i += 1;
        }
        let name = input[name_start..i].to_string();

        i = skip_ws(i);
        let mut value = String::new();
        if i < bytes.len() && bytes[i] == b'=' {
            i = skip_ws(i + 1);
            if i < bytes.len() && matches!(bytes[i], b'"' | b'\'') {
                let quote = bytes[i];
                let value_start = i + 1;
                let value_end = input[value_start..]
                    .bytes()
                    .position(|b| b == quote)
                    .map_or(input.len(), |p| value_start + p);
                value = html::unescape(&input[value_start..value_end]);
                i = (value_end + 1).min(input.len());
            } else {
                let value_start = i;
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                    i += 1;
                }
                value = html::unescape(&input[value_start..i]);
            }
        }

        if !name.is_empty() {
            attrs.push((name, value));
        }
    }
    attrs
}
