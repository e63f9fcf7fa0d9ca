//! Page span calculation.

use crate::model::Overlap;

/// Lines advanced per additional page: `max(1, height - overlap)`.
///
/// `height` is the visible line count of the anchor (left-most) pane. An
/// overlap at or above the height degrades to a one-line advance.
pub fn page_span(height: usize, overlap: Overlap) -> usize {
    height.saturating_sub(overlap.get()).max(1)
}
