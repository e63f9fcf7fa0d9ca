//! Context header redirection.
//!
//! A third-party "context header" feature renders from whichever viewport is
//! active. While multipage mode is on, only the left-most pane's context is
//! meaningful, so [`ContextRedirect`] activates that pane around each render
//! and puts focus back afterwards.
//!
//! The host looks the renderer up in a single place, the [`ContextSlot`].
//! Installing the redirect wraps whatever renderer occupies the slot; the
//! slot remembers the installation and never wraps twice.

use crate::host::{ActiveViewportGuard, Host};
use crate::layout::leftmost_viewport;
use crate::model::ViewportId;
use crate::state::ModeRegistry;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// Failure reported by a context renderer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Context renderer failed: {0}")]
pub struct ContextError(pub String);

/// The context-update entry point.
pub trait ContextRenderer {
    /// Refresh the context display for the active viewport.
    fn render(&mut self, host: &mut dyn Host) -> Result<(), ContextError>;
}

impl<F> ContextRenderer for F
where
    F: FnMut(&mut dyn Host) -> Result<(), ContextError>,
{
    fn render(&mut self, host: &mut dyn Host) -> Result<(), ContextError> {
        self(host)
    }
}

/// Renders from the left-most pane whenever the active document is in
/// multipage mode; otherwise delegates unchanged.
///
/// If the redirected render fails, the renderer is invoked again without
/// redirection and that result is returned, so the feature degrades instead
/// of failing.
pub struct ContextRedirect {
    inner: Box<dyn ContextRenderer>,
    modes: ModeRegistry,
}

impl ContextRedirect {
    /// Wrap `inner`, consulting `modes` on every render.
    pub fn new(inner: Box<dyn ContextRenderer>, modes: ModeRegistry) -> Self {
        Self { inner, modes }
    }

    fn redirect_target(&self, host: &dyn Host) -> Option<ViewportId> {
        let active = host.active_viewport()?;
        let document = host.viewport_document(active).ok()?;
        let group = host.viewport_group(active).ok()?;
        if !self.modes.is_enabled(document, group) {
            return None;
        }
        leftmost_viewport(host, document, group).filter(|&anchor| host.viewport_is_valid(anchor))
    }

    fn render_from(&mut self, host: &mut dyn Host, anchor: ViewportId) -> Result<(), ContextError> {
        let mut guard = ActiveViewportGuard::activate(host, anchor)
            .map_err(|err| ContextError(err.to_string()))?;
        self.inner.render(&mut *guard)
    }
}

impl ContextRenderer for ContextRedirect {
    fn render(&mut self, host: &mut dyn Host) -> Result<(), ContextError> {
        if let Some(anchor) = self.redirect_target(host) {
            match self.render_from(host, anchor) {
                Ok(()) => return Ok(()),
                Err(err) => {
                    warn!(%anchor, error = %err, "Redirected context render failed, falling back");
                }
            }
        }
        self.inner.render(host)
    }
}

/// Where the host looks up "the" context renderer.
#[derive(Default)]
pub struct ContextSlot {
    renderer: Option<Box<dyn ContextRenderer>>,
    redirect: Option<ModeRegistry>,
}

impl fmt::Debug for ContextSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextSlot")
            .field("registered", &self.renderer.is_some())
            .field("redirect_installed", &self.redirect.is_some())
            .finish()
    }
}

impl ContextSlot {
    /// Create an empty slot (no third-party renderer present).
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a renderer in the slot, replacing any previous one.
    ///
    /// If the redirect is already installed, the new renderer is wrapped too.
    pub fn register(&mut self, renderer: Box<dyn ContextRenderer>) {
        self.renderer = Some(match &self.redirect {
            Some(modes) => Box::new(ContextRedirect::new(renderer, modes.clone())),
            None => renderer,
        });
    }

    /// Whether a renderer is present.
    pub fn is_registered(&self) -> bool {
        self.renderer.is_some()
    }

    /// Whether the redirect has been installed.
    pub fn is_redirect_installed(&self) -> bool {
        self.redirect.is_some()
    }

    /// Wrap the registered renderer in a [`ContextRedirect`].
    ///
    /// Returns `true` only on the call that installs it. Without a registered
    /// renderer nothing happens and a later call may still install.
    pub fn install_redirect(&mut self, modes: &ModeRegistry) -> bool {
        if self.redirect.is_some() {
            return false;
        }
        let Some(inner) = self.renderer.take() else {
            debug!("No context renderer registered; redirect not installed");
            return false;
        };
        self.renderer = Some(Box::new(ContextRedirect::new(inner, modes.clone())));
        self.redirect = Some(modes.clone());
        debug!("Context redirect installed");
        true
    }

    /// Invoke the renderer in the slot. An empty slot renders nothing.
    pub fn render(&mut self, host: &mut dyn Host) -> Result<(), ContextError> {
        match self.renderer.as_mut() {
            Some(renderer) => renderer.render(host),
            None => Ok(()),
        }
    }
}
