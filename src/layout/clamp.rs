//! Top-of-view clamping.

/// Nearest valid top line for a pane of `viewport_height` rows.
///
/// `min(max(desired, 1), max(1, total_lines - viewport_height + 1))`: the
/// top line is never below 1, and never so far down that the last document
/// line would sit above the pane's final row.
pub fn clamp_top(desired: usize, total_lines: usize, viewport_height: usize) -> usize {
    let last_top = (total_lines + 1).saturating_sub(viewport_height).max(1);
    desired.max(1).min(last_top)
}
