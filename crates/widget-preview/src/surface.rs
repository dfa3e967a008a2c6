//! Isolated rendering surfaces.
//!
//! A surface is a sandboxed `<iframe>`. Inline fragments travel only as the
//! escaped `srcdoc` attribute value, so fragment markup is never parsed as
//! part of the host document. Top-level navigation is never granted.

use serde::Serialize;

use goguide_widget_config::security::css;
use goguide_widget_config::ThemeConfig;

use crate::error::PreviewRenderError;
use crate::templates::render_template;

/// Sandbox tokens granted to a surface. Scripts are always allowed; tours
/// are interactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SandboxPolicy {
    pub allow_forms: bool,
    pub allow_popups: bool,
    /// Only valid for [`SurfaceSource::Remote`].
    pub allow_same_origin: bool,
}

impl Default for SandboxPolicy {
    fn default() -> Self {
        Self {
            allow_forms: true,
            allow_popups: true,
            allow_same_origin: false,
        }
    }
}

impl SandboxPolicy {
    pub fn with_same_origin(mut self) -> Self {
        self.allow_same_origin = true;
        self
    }

    /// Value of the `sandbox` attribute.
    pub fn tokens(&self) -> String {
        let mut tokens = vec!["allow-scripts"];
        if self.allow_forms {
            tokens.push("allow-forms");
        }
        if self.allow_popups {
            tokens.push("allow-popups");
        }
        if self.allow_same_origin {
            tokens.push("allow-same-origin");
        }
        tokens.join(" ")
    }
}

/// Where the surface's document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceSource {
    /// Untrusted markup rendered as an opaque-origin `srcdoc` document.
    Inline(String),
    /// A document served from a separate origin.
    Remote(String),
}

/// A constructed, ready-to-mount sandboxed frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IsolatedSurface {
    #[serde(skip_serializing_if = "Option::is_none")]
    srcdoc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    src: Option<String>,
    sandbox: String,
    height: String,
    radius: String,
    background: String,
    text: String,
    border: String,
}

impl IsolatedSurface {
    /// Build a surface for `source`, themed from `theme`.
    pub fn new(
        source: SurfaceSource,
        policy: SandboxPolicy,
        theme: &ThemeConfig,
    ) -> Result<Self, PreviewRenderError> {
        let (srcdoc, src) = match source {
            SurfaceSource::Inline(fragment) => {
                if policy.allow_same_origin {
                    return Err(PreviewRenderError::SameOriginInline);
                }
                if fragment.trim().is_empty() {
                    return Err(PreviewRenderError::EmptyFragment);
                }
                (Some(inline_document(&fragment, theme)), None)
            }
            SurfaceSource::Remote(raw) => {
                let url = url::Url::parse(&raw)
                    .map_err(|e| PreviewRenderError::InvalidRemoteUrl(format!("{raw}: {e}")))?;
                if !matches!(url.scheme(), "https" | "http") {
                    return Err(PreviewRenderError::InvalidRemoteUrl(raw));
                }
                (None, Some(url.to_string()))
            }
        };

        Ok(Self {
            srcdoc,
            src,
            sandbox: policy.tokens(),
            height: css::sanitize_value(&theme.preview_height),
            radius: css::sanitize_value(&theme.radius),
            background: css::sanitize_value(&theme.panel),
            text: css::sanitize_value(&theme.text),
            border: css::sanitize_value(&theme.border),
        })
    }

    /// The unescaped `srcdoc` document of an inline surface.
    pub fn srcdoc(&self) -> Option<&str> {
        self.srcdoc.as_deref()
    }

    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    pub fn sandbox(&self) -> &str {
        &self.sandbox
    }

    /// The `<iframe>` element as HTML.
    pub fn markup(&self) -> Result<String, PreviewRenderError> {
        Ok(render_template(
            "surface.html",
            minijinja::context! { surface => self },
        )?)
    }
}

/// Standalone document for an inline fragment, inheriting the panel colours.
fn inline_document(fragment: &str, theme: &ThemeConfig) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\">\
         <style>html,body{{margin:0;padding:0;background:{bg};color:{fg};font-family:{font};}}\
         iframe,img,video{{max-width:100%;}}</style></head><body>{fragment}</body></html>",
        bg = css::sanitize_value(&theme.panel),
        fg = css::sanitize_value(&theme.text),
        font = css::sanitize_value(&theme.font_family),
    )
}
