//! Small value types shared by the layout pipeline.

use serde::Deserialize;
use std::fmt;

/// Number of lines shared between the visible ranges of two adjacent panes.
///
/// Non-negative by construction. There is no upper bound: an overlap at or
/// above the anchor height degrades to a one-line page span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct Overlap(usize);

impl Overlap {
    /// One shared line, so the last line of a page reappears atop the next.
    pub const DEFAULT: Self = Self(1);

    /// Contiguous paging with no shared lines.
    pub const NONE: Self = Self(0);

    /// Create an overlap of `lines` lines.
    pub fn new(lines: usize) -> Self {
        Self(lines)
    }

    /// Get the raw line count.
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for Overlap {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Overlap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of the anchor viewport's view, taken at the start of one layout pass.
///
/// Lives only for the duration of that pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseView {
    /// 1-based document line at the first visible row.
    pub top_line: usize,
}

impl BaseView {
    /// Create a snapshot anchored at `top_line`.
    pub fn new(top_line: usize) -> Self {
        Self { top_line }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_overlap_is_one_line() {
        assert_eq!(Overlap::default().get(), 1);
    }

    #[test]
    fn overlap_deserializes_from_bare_integer() {
        #[derive(Deserialize)]
        struct Wrapper {
            overlap: Overlap,
        }
        let parsed: Wrapper = toml::from_str("overlap = 4").expect("valid toml");
        assert_eq!(parsed.overlap, Overlap::new(4));
    }

    #[test]
    fn overlap_rejects_negative_values() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Wrapper {
            overlap: Overlap,
        }
        let parsed: Result<Wrapper, _> = toml::from_str("overlap = -1");
        assert!(parsed.is_err(), "negative overlap must not deserialize");
    }
}
