use std::sync::LazyLock;

use minijinja::{AutoEscape, Environment};
use serde::Serialize;

use goguide_widget_config::security::css;
use goguide_widget_config::{LabelConfig, ThemeConfig};

use super::state::{FormInput, FormState};

/// One entry of the service selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceOption {
    pub id: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerKind {
    Success,
    Error,
}

/// The message box under the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
}

/// Everything the form shows, derived from controller state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub state: FormState,
    pub options: Vec<ServiceOption>,
    pub selected_id: Option<String>,
    pub show_preview_link: bool,
    pub submit_disabled: bool,
    pub status_text: String,
    pub banner: Option<Banner>,
    pub show_email: bool,
    pub email_required: bool,
    pub show_end: bool,
    pub phone_placeholder: String,
    /// Ask the host to scroll the banner into view.
    pub scroll_into_view: bool,
    pub input: FormInput,
}

/// Theme values made safe for a `style` attribute.
#[derive(Serialize)]
struct ThemeVars {
    primary: String,
    panel: String,
    accent: String,
    text: String,
    muted: String,
    border: String,
    shadow: String,
    radius: String,
    font_family: String,
    card_width: String,
}

impl From<&ThemeConfig> for ThemeVars {
    fn from(theme: &ThemeConfig) -> Self {
        Self {
            primary: css::sanitize_value(&theme.primary),
            panel: css::sanitize_value(&theme.panel),
            accent: css::sanitize_value(&theme.accent),
            text: css::sanitize_value(&theme.text),
            muted: css::sanitize_value(&theme.muted),
            border: css::sanitize_value(&theme.border),
            shadow: css::sanitize_value(&theme.shadow),
            radius: css::sanitize_value(&theme.radius),
            font_family: css::sanitize_value(&theme.font_family),
            card_width: css::sanitize_value(&theme.card_width),
        }
    }
}

static ENV: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|name| {
        if name.ends_with(".html") {
            AutoEscape::Html
        } else {
            AutoEscape::None
        }
    });
    if let Err(err) = env.add_template("form.html", include_str!("../../templates/form.html")) {
        tracing::error!(error = %err, "Failed to load embedded form template");
    }
    env
});

/// Shadow-root markup for `view`.
pub(crate) fn render(
    view: &FormView,
    labels: &LabelConfig,
    theme: &ThemeConfig,
) -> Result<String, minijinja::Error> {
    let tpl = ENV.get_template("form.html")?;
    tpl.render(minijinja::context! {
        view => view,
        labels => labels,
        theme => ThemeVars::from(theme),
    })
}
