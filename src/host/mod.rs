//! Host capability interface.
//!
//! The host application owns every document, window group and viewport. The
//! paging engine never holds on to host objects between calls: it receives a
//! `&mut impl Host` for the duration of one operation, resolves what it needs
//! through it, and lets go.
//!
//! [`MemoryHost`] is a complete in-memory implementation used by tests,
//! benchmarks and the demo binary.

pub mod guard;
pub mod memory;

pub use guard::ActiveViewportGuard;
pub use memory::MemoryHost;

use crate::model::{BaseView, DocumentId, GroupId, HostError, ViewportId};

/// Window-manager capabilities consumed by the paging engine.
///
/// Line numbers are 1-based. Heights are visible text rows; a collapsed or
/// hidden viewport reports a height of 0.
pub trait Host {
    /// Viewports of `group` in the host's own stable iteration order.
    ///
    /// This order is not required to match on-screen placement.
    fn group_viewports(&self, group: GroupId) -> Vec<ViewportId>;

    /// Whether `viewport` still exists.
    fn viewport_is_valid(&self, viewport: ViewportId) -> bool;

    /// Whether `document` is still loaded.
    fn document_is_valid(&self, document: DocumentId) -> bool;

    /// Document currently displayed in `viewport`.
    fn viewport_document(&self, viewport: ViewportId) -> Result<DocumentId, HostError>;

    /// Group `viewport` belongs to.
    fn viewport_group(&self, viewport: ViewportId) -> Result<GroupId, HostError>;

    /// Visible height of `viewport` in lines.
    fn viewport_height(&self, viewport: ViewportId) -> Result<usize, HostError>;

    /// Horizontal screen position (column) of `viewport`'s left edge.
    fn viewport_position(&self, viewport: ViewportId) -> Result<usize, HostError>;

    /// Document line shown on `viewport`'s first row.
    fn top_line(&self, viewport: ViewportId) -> Result<usize, HostError>;

    /// Scroll `viewport` so `line` is shown on its first row.
    ///
    /// This is a direct write; it does not propagate through scroll binding.
    fn set_top_line(&mut self, viewport: ViewportId, line: usize) -> Result<(), HostError>;

    /// Whether `viewport` follows scrolling of its scroll-bound siblings.
    fn scroll_bound(&self, viewport: ViewportId) -> Result<bool, HostError>;

    /// Set the scroll-bound flag of `viewport`.
    fn set_scroll_bound(&mut self, viewport: ViewportId, bound: bool) -> Result<(), HostError>;

    /// The viewport that currently has focus, if any.
    fn active_viewport(&self) -> Option<ViewportId>;

    /// Move focus to `viewport` without emitting focus notifications.
    fn set_active_viewport(&mut self, viewport: ViewportId) -> Result<(), HostError>;

    /// Snapshot the active viewport's view.
    ///
    /// Hosts only expose view snapshots for the active viewport, so reading
    /// another viewport's view requires activating it first.
    fn save_view(&self) -> Result<BaseView, HostError>;

    /// Total number of lines in `document`.
    fn line_count(&self, document: DocumentId) -> Result<usize, HostError>;

    /// Create a vertical split next to `from`, bound to `document`.
    ///
    /// The host decides where the new viewport lands and may focus it.
    fn split_vertical(
        &mut self,
        from: ViewportId,
        document: DocumentId,
    ) -> Result<ViewportId, HostError>;
}

/// Layout-affecting notifications delivered serially by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// A document was just displayed in the viewport.
    DocumentDisplayed(ViewportId),
    /// The viewport gained focus.
    ViewportEntered(ViewportId),
    /// The viewport changed size.
    ViewportResized(ViewportId),
    /// A viewport showing `document` in `group` was closed.
    ViewportClosed {
        /// Document the closed viewport was showing.
        document: DocumentId,
        /// Group the closed viewport belonged to.
        group: GroupId,
    },
}

impl HostEvent {
    /// Viewport the event is about, if it still exists.
    pub fn viewport(&self) -> Option<ViewportId> {
        match *self {
            Self::DocumentDisplayed(viewport)
            | Self::ViewportEntered(viewport)
            | Self::ViewportResized(viewport) => Some(viewport),
            Self::ViewportClosed { .. } => None,
        }
    }
}
