//! Error types for widget-preview.

/// Why a preview surface could not be shown.
///
/// These never reach the visitor: [`SandboxedPreview::open`] logs them and
/// reports [`PreviewOutcome::Unavailable`].
///
/// [`SandboxedPreview::open`]: crate::SandboxedPreview::open
/// [`PreviewOutcome::Unavailable`]: crate::PreviewOutcome::Unavailable
#[derive(Debug, thiserror::Error)]
pub enum PreviewRenderError {
    #[error("Fragment is empty")]
    EmptyFragment,

    /// An inline document would inherit the host origin.
    #[error("Inline surfaces cannot be granted same-origin access")]
    SameOriginInline,

    #[error("Host page does not support sandboxed frames")]
    SandboxUnsupported,

    #[error("Invalid remote surface URL: {0}")]
    InvalidRemoteUrl(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}
