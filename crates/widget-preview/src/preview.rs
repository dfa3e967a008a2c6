//! Per-instance preview controller.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use goguide_widget_config::ThemeConfig;

use crate::error::PreviewRenderError;
use crate::host::{PreviewContainer, PreviewHost};
use crate::surface::{IsolatedSurface, SandboxPolicy, SurfaceSource};

/// Result of [`SandboxedPreview::open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewOutcome {
    /// The surface is mounted; `generation` identifies this showing.
    Shown { generation: u64 },
    /// Nothing could be shown and the modal is hidden. The booking flow is
    /// unaffected and the visitor sees no error.
    Unavailable,
}

/// Opens and closes the shared preview modal on behalf of one widget
/// instance, and owns that instance's auto-close timer.
#[derive(Debug)]
pub struct SandboxedPreview {
    host: Arc<PreviewHost>,
    policy: SandboxPolicy,
    auto_close: Option<Duration>,
    timer: Option<JoinHandle<()>>,
}

impl SandboxedPreview {
    pub fn new(host: Arc<PreviewHost>) -> Self {
        Self {
            host,
            policy: SandboxPolicy::default(),
            auto_close: None,
            timer: None,
        }
    }

    pub fn with_policy(mut self, policy: SandboxPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Close automatically `ms` milliseconds after each open; 0 disables.
    pub fn with_auto_close_ms(mut self, ms: u64) -> Self {
        self.set_auto_close_ms(ms);
        self
    }

    pub fn set_auto_close_ms(&mut self, ms: u64) {
        self.auto_close = (ms > 0).then(|| Duration::from_millis(ms));
    }

    pub fn host(&self) -> &Arc<PreviewHost> {
        &self.host
    }

    /// Show an inline fragment.
    ///
    /// Failures are logged and reported as [`PreviewOutcome::Unavailable`];
    /// whatever the modal showed before is closed.
    pub fn open(&mut self, fragment: &str, theme: &ThemeConfig) -> PreviewOutcome {
        self.open_surface(SurfaceSource::Inline(fragment.to_string()), theme)
    }

    /// Show any surface source; see [`open`](Self::open).
    pub fn open_surface(&mut self, source: SurfaceSource, theme: &ThemeConfig) -> PreviewOutcome {
        match self.try_open(source, theme) {
            Ok(generation) => PreviewOutcome::Shown { generation },
            Err(PreviewRenderError::EmptyFragment) => {
                debug!("Nothing to preview");
                PreviewOutcome::Unavailable
            }
            Err(err) => {
                warn!(error = %err, "Preview surface unavailable");
                PreviewOutcome::Unavailable
            }
        }
    }

    /// [`open_surface`](Self::open_surface), reporting why it failed.
    pub fn try_open(
        &mut self,
        source: SurfaceSource,
        theme: &ThemeConfig,
    ) -> Result<u64, PreviewRenderError> {
        self.cancel_timer();

        let surface = match self.build_surface(source, theme) {
            Ok(surface) => surface,
            Err(err) => {
                // no stale fragment stays on screen
                if let Some(container) = self.host.container() {
                    container.close();
                }
                return Err(err);
            }
        };

        let container = self.host.get_or_create();
        let generation = container.show_surface(surface);
        debug!(generation, "Preview opened");
        self.schedule_auto_close(container, generation);
        Ok(generation)
    }

    fn build_surface(
        &self,
        source: SurfaceSource,
        theme: &ThemeConfig,
    ) -> Result<IsolatedSurface, PreviewRenderError> {
        if !self.host.capabilities().sandboxed_frames {
            return Err(PreviewRenderError::SandboxUnsupported);
        }
        IsolatedSurface::new(source, self.policy, theme)
    }

    /// Hide the modal, clear its content and cancel the pending auto-close.
    pub fn close(&mut self) {
        self.cancel_timer();
        if let Some(container) = self.host.container() {
            container.close();
        }
    }

    pub fn is_open(&self) -> bool {
        self.host
            .container()
            .is_some_and(|container| container.is_visible())
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    fn schedule_auto_close(&mut self, container: Arc<PreviewContainer>, generation: u64) {
        let Some(delay) = self.auto_close else {
            return;
        };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!("No async runtime; preview auto-close disabled");
            return;
        };
        self.timer = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if container.close_if_current(generation) {
                debug!(generation, "Preview auto-closed");
            }
        }));
    }
}

impl Drop for SandboxedPreview {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
