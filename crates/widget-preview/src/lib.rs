//! # widget-preview
//!
//! Renders untrusted 360° tour fragments without giving them the host page.
//!
//! Fragments are mounted in a sandboxed `<iframe>` whose document is the
//! attribute-escaped `srcdoc`; the modal holding it is a single
//! page-level container owned by [`PreviewHost`]. Each widget instance drives
//! the modal through its own [`SandboxedPreview`].
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use goguide_widget_config::ThemeConfig;
//! use goguide_widget_preview::{PreviewHost, PreviewOutcome, SandboxedPreview};
//!
//! let host = Arc::new(PreviewHost::default());
//! let mut preview = SandboxedPreview::new(Arc::clone(&host));
//!
//! let outcome = preview.open("<div id=\"pano\"></div>", &ThemeConfig::default());
//! assert!(matches!(outcome, PreviewOutcome::Shown { .. }));
//!
//! let page = host.render().unwrap().unwrap();
//! assert!(page.contains("<iframe"));
//! assert!(!page.contains("<div id=\"pano\">"));
//! ```

mod error;
mod host;
mod preview;
mod surface;
mod templates;

pub use error::PreviewRenderError;
pub use host::{HostCapabilities, PreviewContainer, PreviewHost, CONTAINER_ID};
pub use preview::{PreviewOutcome, SandboxedPreview};
pub use surface::{IsolatedSurface, SandboxPolicy, SurfaceSource};
