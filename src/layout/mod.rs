//! Pane layout (core algorithms).
//!
//! Discovery, page span, clamping, the layout pass itself, and provisioning
//! of extra panes. Everything here talks to the host only through
//! [`Host`](crate::host::Host).

pub mod clamp;
pub mod discovery;
pub mod engine;
pub mod provision;
pub mod span;

// Re-export for convenience
pub use clamp::clamp_top;
pub use discovery::{discover_viewports, leftmost_viewport};
pub use engine::{
    release_panes, LayoutEngine, LayoutOutcome, LayoutPass, PanePlacement, SkipReason,
};
pub use provision::ensure_columns;
pub use span::page_span;
