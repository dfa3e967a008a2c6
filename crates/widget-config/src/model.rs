//! Typed widget configuration: theme tokens, UI labels and behaviour options.
//!
//! Every configurable value is described once by a [`ConfigField`] variant:
//! its section, JSON key, value kind and default. Layers, presets, the
//! persisted blob and the embed attribute table all address values through
//! this enum, so a new option is added in one place.

use serde::{Deserialize, Serialize};

/// Visual tokens, each a CSS-valid string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeConfig {
    pub primary: String,
    pub panel: String,
    pub accent: String,
    pub text: String,
    pub muted: String,
    pub border: String,
    pub shadow: String,
    pub radius: String,
    pub font_family: String,
    pub preview_height: String,
    pub card_width: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            primary: "#0f172a".to_string(),
            panel: "#0b1324".to_string(),
            accent: "#64ffda".to_string(),
            text: "#e2e8f0".to_string(),
            muted: "#94a3b8".to_string(),
            border: "#1e293b".to_string(),
            shadow: "0 10px 40px rgba(0,0,0,0.25)".to_string(),
            radius: "12px".to_string(),
            font_family: "'Inter', system-ui, -apple-system, sans-serif".to_string(),
            preview_height: "70vh".to_string(),
            card_width: "640px".to_string(),
        }
    }
}

/// Display strings for the booking form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub title: String,
    pub service: String,
    pub start: String,
    pub end: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub submit: String,
    pub preview: String,
    pub success: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            title: "Онлайн-бронирование".to_string(),
            service: "Услуга / номер".to_string(),
            start: "Дата и время начала".to_string(),
            end: "Дата и время окончания".to_string(),
            name: "Имя".to_string(),
            phone: "Телефон".to_string(),
            email: "Email".to_string(),
            submit: "Забронировать".to_string(),
            preview: "Смотреть 360°".to_string(),
            success: "Бронирование создано. Мы свяжемся для подтверждения.".to_string(),
        }
    }
}

/// Behaviour switches for a widget instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BehaviorOptions {
    pub hide_email: bool,
    pub email_optional: bool,
    pub hide_end: bool,
    pub auto_open_preview: bool,
    /// Zero disables auto-close.
    pub preview_auto_close_ms: u64,
    pub scroll_into_view: bool,
    pub phone_placeholder: String,
}

impl Default for BehaviorOptions {
    fn default() -> Self {
        Self {
            hide_email: false,
            email_optional: true,
            hide_end: false,
            auto_open_preview: false,
            preview_auto_close_ms: 0,
            scroll_into_view: false,
            phone_placeholder: "+7...".to_string(),
        }
    }
}

/// The effective configuration of one widget instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub theme: ThemeConfig,
    pub labels: LabelConfig,
    pub options: BehaviorOptions,
}

/// Top-level grouping of configuration fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Theme,
    Labels,
    Options,
}

impl Section {
    /// Key of the section object in the persisted JSON blob.
    pub fn key(self) -> &'static str {
        match self {
            Section::Theme => "theme",
            Section::Labels => "labels",
            Section::Options => "options",
        }
    }
}

/// The shape of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Flag,
    Millis,
}

/// A single field value, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Millis(u64),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Flag(_) => FieldKind::Flag,
            FieldValue::Millis(_) => FieldKind::Millis,
        }
    }

    /// Read a value of the given kind from JSON, accepting the string forms
    /// that hand-edited blobs tend to contain (`"true"`, `"2000"`).
    pub fn from_json(kind: FieldKind, value: &serde_json::Value) -> Option<Self> {
        match (kind, value) {
            (FieldKind::Text, serde_json::Value::String(s)) => Some(FieldValue::Text(s.clone())),
            (FieldKind::Flag, serde_json::Value::Bool(b)) => Some(FieldValue::Flag(*b)),
            (FieldKind::Flag, serde_json::Value::String(s)) => match s.as_str() {
                "true" => Some(FieldValue::Flag(true)),
                "false" => Some(FieldValue::Flag(false)),
                _ => None,
            },
            (FieldKind::Millis, serde_json::Value::Number(n)) => n.as_u64().map(FieldValue::Millis),
            (FieldKind::Millis, serde_json::Value::String(s)) => {
                s.trim().parse().ok().map(FieldValue::Millis)
            }
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Text(s) => serde_json::Value::String(s.clone()),
            FieldValue::Flag(b) => serde_json::Value::Bool(*b),
            FieldValue::Millis(ms) => serde_json::Value::from(*ms),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Millis(value)
    }
}

/// Every configurable field of [`WidgetConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigField {
    Primary,
    Panel,
    Accent,
    Text,
    Muted,
    Border,
    Shadow,
    Radius,
    FontFamily,
    PreviewHeight,
    CardWidth,
    LabelTitle,
    LabelService,
    LabelStart,
    LabelEnd,
    LabelName,
    LabelPhone,
    LabelEmail,
    LabelSubmit,
    LabelPreview,
    LabelSuccess,
    HideEmail,
    EmailOptional,
    HideEnd,
    AutoOpenPreview,
    PreviewAutoCloseMs,
    ScrollIntoView,
    PhonePlaceholder,
}

impl ConfigField {
    pub const ALL: [ConfigField; 28] = [
        ConfigField::Primary,
        ConfigField::Panel,
        ConfigField::Accent,
        ConfigField::Text,
        ConfigField::Muted,
        ConfigField::Border,
        ConfigField::Shadow,
        ConfigField::Radius,
        ConfigField::FontFamily,
        ConfigField::PreviewHeight,
        ConfigField::CardWidth,
        ConfigField::LabelTitle,
        ConfigField::LabelService,
        ConfigField::LabelStart,
        ConfigField::LabelEnd,
        ConfigField::LabelName,
        ConfigField::LabelPhone,
        ConfigField::LabelEmail,
        ConfigField::LabelSubmit,
        ConfigField::LabelPreview,
        ConfigField::LabelSuccess,
        ConfigField::HideEmail,
        ConfigField::EmailOptional,
        ConfigField::HideEnd,
        ConfigField::AutoOpenPreview,
        ConfigField::PreviewAutoCloseMs,
        ConfigField::ScrollIntoView,
        ConfigField::PhonePlaceholder,
    ];

    pub fn section(self) -> Section {
        use ConfigField::*;
        match self {
            Primary | Panel | Accent | Text | Muted | Border | Shadow | Radius | FontFamily
            | PreviewHeight | CardWidth => Section::Theme,
            LabelTitle | LabelService | LabelStart | LabelEnd | LabelName | LabelPhone
            | LabelEmail | LabelSubmit | LabelPreview | LabelSuccess => Section::Labels,
            HideEmail | EmailOptional | HideEnd | AutoOpenPreview | PreviewAutoCloseMs
            | ScrollIntoView | PhonePlaceholder => Section::Options,
        }
    }

    /// JSON key of the field inside its section.
    pub fn key(self) -> &'static str {
        use ConfigField::*;
        match self {
            Primary => "primary",
            Panel => "panel",
            Accent => "accent",
            Text => "text",
            Muted => "muted",
            Border => "border",
            Shadow => "shadow",
            Radius => "radius",
            FontFamily => "fontFamily",
            PreviewHeight => "previewHeight",
            CardWidth => "cardWidth",
            LabelTitle => "title",
            LabelService => "service",
            LabelStart => "start",
            LabelEnd => "end",
            LabelName => "name",
            LabelPhone => "phone",
            LabelEmail => "email",
            LabelSubmit => "submit",
            LabelPreview => "preview",
            LabelSuccess => "success",
            HideEmail => "hideEmail",
            EmailOptional => "emailOptional",
            HideEnd => "hideEnd",
            AutoOpenPreview => "autoOpenPreview",
            PreviewAutoCloseMs => "previewAutoCloseMs",
            ScrollIntoView => "scrollIntoView",
            PhonePlaceholder => "phonePlaceholder",
        }
    }

    pub fn kind(self) -> FieldKind {
        use ConfigField::*;
        match self {
            HideEmail | EmailOptional | HideEnd | AutoOpenPreview | ScrollIntoView => {
                FieldKind::Flag
            }
            PreviewAutoCloseMs => FieldKind::Millis,
            _ => FieldKind::Text,
        }
    }

    /// Built-in default, the lowest precedence tier.
    pub fn default_value(self) -> FieldValue {
        WidgetConfig::default().get(self)
    }
}

impl WidgetConfig {
    /// Read one field.
    pub fn get(&self, field: ConfigField) -> FieldValue {
        use ConfigField::*;
        let (t, l, o) = (&self.theme, &self.labels, &self.options);
        match field {
            Primary => t.primary.as_str().into(),
            Panel => t.panel.as_str().into(),
            Accent => t.accent.as_str().into(),
            Text => t.text.as_str().into(),
            Muted => t.muted.as_str().into(),
            Border => t.border.as_str().into(),
            Shadow => t.shadow.as_str().into(),
            Radius => t.radius.as_str().into(),
            FontFamily => t.font_family.as_str().into(),
            PreviewHeight => t.preview_height.as_str().into(),
            CardWidth => t.card_width.as_str().into(),
            LabelTitle => l.title.as_str().into(),
            LabelService => l.service.as_str().into(),
            LabelStart => l.start.as_str().into(),
            LabelEnd => l.end.as_str().into(),
            LabelName => l.name.as_str().into(),
            LabelPhone => l.phone.as_str().into(),
            LabelEmail => l.email.as_str().into(),
            LabelSubmit => l.submit.as_str().into(),
            LabelPreview => l.preview.as_str().into(),
            LabelSuccess => l.success.as_str().into(),
            HideEmail => o.hide_email.into(),
            EmailOptional => o.email_optional.into(),
            HideEnd => o.hide_end.into(),
            AutoOpenPreview => o.auto_open_preview.into(),
            PreviewAutoCloseMs => o.preview_auto_close_ms.into(),
            ScrollIntoView => o.scroll_into_view.into(),
            PhonePlaceholder => o.phone_placeholder.as_str().into(),
        }
    }

    /// Write one field. Returns false, leaving the config untouched, when the
    /// value's kind does not match the field's kind.
    pub fn set(&mut self, field: ConfigField, value: FieldValue) -> bool {
        use ConfigField::*;
        match value {
            FieldValue::Text(s) => {
                let slot = match field {
                    Primary => &mut self.theme.primary,
                    Panel => &mut self.theme.panel,
                    Accent => &mut self.theme.accent,
                    Text => &mut self.theme.text,
                    Muted => &mut self.theme.muted,
                    Border => &mut self.theme.border,
                    Shadow => &mut self.theme.shadow,
                    Radius => &mut self.theme.radius,
                    FontFamily => &mut self.theme.font_family,
                    PreviewHeight => &mut self.theme.preview_height,
                    CardWidth => &mut self.theme.card_width,
                    LabelTitle => &mut self.labels.title,
                    LabelService => &mut self.labels.service,
                    LabelStart => &mut self.labels.start,
                    LabelEnd => &mut self.labels.end,
                    LabelName => &mut self.labels.name,
                    LabelPhone => &mut self.labels.phone,
                    LabelEmail => &mut self.labels.email,
                    LabelSubmit => &mut self.labels.submit,
                    LabelPreview => &mut self.labels.preview,
                    LabelSuccess => &mut self.labels.success,
                    PhonePlaceholder => &mut self.options.phone_placeholder,
                    _ => return false,
                };
                *slot = s;
            }
            FieldValue::Flag(b) => {
                let slot = match field {
                    HideEmail => &mut self.options.hide_email,
                    EmailOptional => &mut self.options.email_optional,
                    HideEnd => &mut self.options.hide_end,
                    AutoOpenPreview => &mut self.options.auto_open_preview,
                    ScrollIntoView => &mut self.options.scroll_into_view,
                    _ => return false,
                };
                *slot = b;
            }
            FieldValue::Millis(ms) => match field {
                PreviewAutoCloseMs => self.options.preview_auto_close_ms = ms,
                _ => return false,
            },
        }
        true
    }
}
