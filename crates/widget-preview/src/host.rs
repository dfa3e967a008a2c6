//! The page-level preview container.
//!
//! Every widget instance on a page shares one modal container. The
//! [`PreviewHost`] owns it and is handed to each [`SandboxedPreview`] as an
//! `Arc`, so sharing is explicit and a test can stand up as many pages as it
//! needs.
//!
//! [`SandboxedPreview`]: crate::SandboxedPreview

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::debug;

use crate::error::PreviewRenderError;
use crate::surface::IsolatedSurface;
use crate::templates::render_template;

/// DOM id of the container element.
pub const CONTAINER_ID: &str = "booking-widget-preview-host";

/// What the embedding environment can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCapabilities {
    /// Sandboxed `<iframe>` elements are available.
    pub sandboxed_frames: bool,
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self {
            sandboxed_frames: true,
        }
    }
}

/// Owner of the single preview container of a page.
#[derive(Debug, Default)]
pub struct PreviewHost {
    capabilities: HostCapabilities,
    container: Mutex<Option<Arc<PreviewContainer>>>,
    creations: AtomicUsize,
}

impl PreviewHost {
    pub fn new(capabilities: HostCapabilities) -> Self {
        Self {
            capabilities,
            ..Self::default()
        }
    }

    pub fn capabilities(&self) -> HostCapabilities {
        self.capabilities
    }

    /// The container, created on first use.
    pub fn get_or_create(&self) -> Arc<PreviewContainer> {
        let mut slot = self.container.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slot.get_or_insert_with(|| {
            let n = self.creations.fetch_add(1, Ordering::Relaxed) + 1;
            debug!(creations = n, "Created preview container");
            Arc::new(PreviewContainer::default())
        }))
    }

    /// The container if it has been created.
    pub fn container(&self) -> Option<Arc<PreviewContainer>> {
        self.container
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_created(&self) -> bool {
        self.container().is_some()
    }

    /// Drop the container; the next [`get_or_create`](Self::get_or_create)
    /// builds a fresh one.
    pub fn reset(&self) {
        let previous = self
            .container
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(container) = previous {
            container.close();
        }
    }

    /// How many containers this host has created over its lifetime.
    pub fn creations(&self) -> usize {
        self.creations.load(Ordering::Relaxed)
    }

    /// Page-level markup of the container, `None` before it is created.
    pub fn render(&self) -> Result<Option<String>, PreviewRenderError> {
        self.container().map(|c| c.render()).transpose()
    }
}

#[derive(Debug, Default)]
struct ContainerState {
    visible: bool,
    surface: Option<IsolatedSurface>,
    generation: u64,
}

/// The modal element and its current content.
///
/// Every content change bumps a generation counter; scheduled work records
/// the generation it belongs to and becomes a no-op once it moves on.
#[derive(Debug, Default)]
pub struct PreviewContainer {
    state: Mutex<ContainerState>,
}

#[derive(Serialize)]
struct ModalContext<'a> {
    container_id: &'static str,
    visible: bool,
    surface: Option<&'a IsolatedSurface>,
}

impl PreviewContainer {
    fn lock(&self) -> MutexGuard<'_, ContainerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the content with `surface` and show the modal.
    pub fn show_surface(&self, surface: IsolatedSurface) -> u64 {
        let mut state = self.lock();
        state.surface = None;
        state.generation += 1;
        state.surface = Some(surface);
        state.visible = true;
        state.generation
    }

    /// Hide the modal and clear its content.
    pub fn close(&self) {
        let mut state = self.lock();
        state.visible = false;
        state.surface = None;
        state.generation += 1;
    }

    /// [`close`](Self::close), but only while `generation` is current.
    pub fn close_if_current(&self, generation: u64) -> bool {
        let mut state = self.lock();
        if state.generation != generation || !state.visible {
            return false;
        }
        state.visible = false;
        state.surface = None;
        state.generation += 1;
        true
    }

    pub fn is_visible(&self) -> bool {
        self.lock().visible
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    pub fn surface(&self) -> Option<IsolatedSurface> {
        self.lock().surface.clone()
    }

    /// Modal markup for the host page.
    pub fn render(&self) -> Result<String, PreviewRenderError> {
        let state = self.lock();
        let ctx = ModalContext {
            container_id: CONTAINER_ID,
            visible: state.visible,
            surface: state.surface.as_ref(),
        };
        Ok(render_template("preview_modal.html", ctx)?)
    }
}
