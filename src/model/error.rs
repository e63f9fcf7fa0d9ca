//! Error types for multipage.
//!
//! # Error Hierarchy
//!
//! - [`MultipageError`] - Top-level error returned by the session surface
//!   - [`HostError`] - A host capability call failed (stale handle, refused split)
//!   - [`CommandError`](crate::command::CommandError) - Command line could not be parsed
//!
//! # Recovery Strategy
//!
//! Nothing here is fatal to the host. Layout passes triggered by host events
//! log host failures and carry on; the next routed event re-runs the pass.
//! Only explicit commands surface errors to their caller.

use crate::command::CommandError;
use crate::model::{DocumentId, GroupId, ViewportId};
use thiserror::Error;

/// Failure reported by a [`Host`](crate::host::Host) capability call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The viewport was closed (or never existed).
    #[error("Viewport {0} is not valid")]
    InvalidViewport(ViewportId),

    /// The document was unloaded (or never existed).
    #[error("Document {0} is not valid")]
    InvalidDocument(DocumentId),

    /// The window group was closed (or never existed).
    #[error("Window group {0} is not valid")]
    InvalidGroup(GroupId),

    /// The host has no active viewport to read or restore.
    #[error("Host has no active viewport")]
    NoActiveViewport,

    /// The host refused to create a split.
    #[error("Failed to split viewport {from}: {reason}")]
    SplitFailed {
        /// Viewport the split was requested from.
        from: ViewportId,
        /// Host-provided reason.
        reason: String,
    },
}

/// Top-level error for the session surface.
#[derive(Debug, Error)]
pub enum MultipageError {
    /// A host call failed while running a command.
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// The command line was rejected.
    #[error("Invalid command: {0}")]
    Command(#[from] CommandError),
}
