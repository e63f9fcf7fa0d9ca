//! Mode state and host event routing.
//!
//! Pure with respect to the host: every transition takes the host by
//! reference and holds nothing across calls.

pub mod event_handler;
pub mod mode;

// Re-export for convenience
pub use event_handler::{handle_host_event, RouteOutcome};
pub use mode::{FlagScope, ModeController, ModeRegistry, ModeState, ModeTransition};
