//! Layout engine: assigns each pane its page.
//!
//! One pass reads the left-most (anchor) pane's current top line and height,
//! derives the page span from the configured overlap, binds every pane's
//! scrolling, then scrolls pane `i` (1-based, left to right) to
//! `clamp(base_top + span * (i - 1))` against its own height.
//!
//! A pass is a pure function of the anchor's top line, the pane heights, the
//! overlap and the document length, so running it again without any
//! intervening change rewrites the same offsets.

use super::clamp::clamp_top;
use super::discovery::discover_viewports;
use super::span::page_span;
use crate::host::{ActiveViewportGuard, Host};
use crate::model::{DocumentId, GroupId, HostError, Overlap, ViewportId};
use std::fmt;
use tracing::{debug, trace};

/// Why a layout pass did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No viewport in the group shows the document.
    NoViewports,
    /// The document is no longer loaded.
    InvalidDocument,
    /// The anchor pane has no visible rows and cannot anchor a layout.
    CollapsedAnchor(ViewportId),
}

/// Final placement of one pane after a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanePlacement {
    /// The pane.
    pub viewport: ViewportId,
    /// 1-based page index, left to right.
    pub page: usize,
    /// Top line written to the pane.
    pub top_line: usize,
    /// Pane height used for clamping.
    pub height: usize,
}

impl PanePlacement {
    /// Last document line visible in the pane (may exceed the document length).
    pub fn bottom_line(&self) -> usize {
        (self.top_line + self.height).saturating_sub(1)
    }
}

/// A completed multi-pane layout pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPass {
    /// Lines advanced per page.
    pub span: usize,
    /// Overlap the span was derived from.
    pub overlap: Overlap,
    /// Document length at the time of the pass.
    pub total_lines: usize,
    /// Placements in left-to-right order. Panes closed mid-pass are absent.
    pub panes: Vec<PanePlacement>,
}

impl LayoutPass {
    /// Top lines of the placed panes, left to right.
    pub fn top_lines(&self) -> Vec<usize> {
        self.panes.iter().map(|pane| pane.top_line).collect()
    }
}

/// Result of [`LayoutEngine::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutOutcome {
    /// Precondition not met; nothing was touched.
    Skipped(SkipReason),
    /// Exactly one pane: bound, offset untouched.
    Single(ViewportId),
    /// Every pane was bound and scrolled to its page.
    Applied(LayoutPass),
}

impl LayoutOutcome {
    /// The completed pass, if panes were laid out.
    pub fn pass(&self) -> Option<&LayoutPass> {
        match self {
            Self::Applied(pass) => Some(pass),
            _ => None,
        }
    }
}

impl fmt::Display for LayoutOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped(SkipReason::NoViewports) => write!(f, "no panes show this document"),
            Self::Skipped(SkipReason::InvalidDocument) => write!(f, "document is not loaded"),
            Self::Skipped(SkipReason::CollapsedAnchor(anchor)) => {
                write!(f, "anchor {anchor} is collapsed; layout skipped")
            }
            Self::Single(viewport) => write!(f, "single pane {viewport} (scroll-bound)"),
            Self::Applied(pass) => {
                write!(
                    f,
                    "{} panes, span {} (overlap {}), {} lines",
                    pass.panes.len(),
                    pass.span,
                    pass.overlap,
                    pass.total_lines
                )?;
                for pane in &pass.panes {
                    write!(
                        f,
                        "\n  page {}: {} lines {}-{}",
                        pane.page,
                        pane.viewport,
                        pane.top_line,
                        pane.bottom_line().min(pass.total_lines.max(pane.top_line))
                    )?;
                }
                Ok(())
            }
        }
    }
}

/// Computes and writes pane offsets for one (document, group) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutEngine {
    overlap: Overlap,
}

impl LayoutEngine {
    /// Create an engine paging with `overlap` shared lines.
    pub fn new(overlap: Overlap) -> Self {
        Self { overlap }
    }

    /// Currently configured overlap.
    pub fn overlap(&self) -> Overlap {
        self.overlap
    }

    /// Change the overlap; takes effect on the next pass.
    pub fn set_overlap(&mut self, overlap: Overlap) {
        self.overlap = overlap;
    }

    /// Run one layout pass.
    ///
    /// # Errors
    ///
    /// Propagates host failures. The active viewport is restored even then.
    pub fn apply<H: Host + ?Sized>(
        &self,
        host: &mut H,
        document: DocumentId,
        group: GroupId,
    ) -> Result<LayoutOutcome, HostError> {
        if !host.document_is_valid(document) {
            return Ok(LayoutOutcome::Skipped(SkipReason::InvalidDocument));
        }

        let viewports = discover_viewports(host, document, group);
        let Some(&anchor) = viewports.first() else {
            return Ok(LayoutOutcome::Skipped(SkipReason::NoViewports));
        };

        if viewports.len() == 1 {
            host.set_scroll_bound(anchor, true)?;
            return Ok(LayoutOutcome::Single(anchor));
        }

        let anchor_height = host.viewport_height(anchor)?;
        if anchor_height == 0 {
            return Ok(LayoutOutcome::Skipped(SkipReason::CollapsedAnchor(anchor)));
        }
        let span = page_span(anchor_height, self.overlap);

        let base = {
            let guard = ActiveViewportGuard::activate(&mut *host, anchor)?;
            guard.save_view()?
        };

        for &viewport in &viewports {
            if host.viewport_is_valid(viewport) {
                host.set_scroll_bound(viewport, true)?;
            }
        }

        let total_lines = host.line_count(document)?;
        let mut panes = Vec::with_capacity(viewports.len());
        for (offset, &viewport) in viewports.iter().enumerate() {
            if !host.viewport_is_valid(viewport) {
                continue;
            }
            let height = host.viewport_height(viewport)?;
            let desired = base.top_line.saturating_add(span.saturating_mul(offset));
            let top_line = clamp_top(desired, total_lines, height);
            host.set_top_line(viewport, top_line)?;
            trace!(%viewport, page = offset + 1, desired, top_line, height, "Placed pane");
            panes.push(PanePlacement {
                viewport,
                page: offset + 1,
                top_line,
                height,
            });
        }

        debug!(
            %document,
            %group,
            panes = panes.len(),
            span,
            base_top = base.top_line,
            "Applied multipage layout"
        );

        Ok(LayoutOutcome::Applied(LayoutPass {
            span,
            overlap: self.overlap,
            total_lines,
            panes,
        }))
    }
}

/// Clear the scroll-bound flag on every pane of `group` showing `document`.
///
/// Offsets are left where they are. Returns the number of panes released.
pub fn release_panes<H: Host + ?Sized>(
    host: &mut H,
    document: DocumentId,
    group: GroupId,
) -> Result<usize, HostError> {
    let viewports = discover_viewports(host, document, group);
    let mut released = 0;
    for viewport in viewports {
        if host.viewport_is_valid(viewport) {
            host.set_scroll_bound(viewport, false)?;
            released += 1;
        }
    }
    Ok(released)
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
