//! Domain model types (pure).
//!
//! Identifiers, small values and the error taxonomy shared by every layer.

pub mod error;
pub mod identifiers;
pub mod values;

// Re-export for convenience
pub use error::{HostError, MultipageError};
pub use identifiers::{DocumentId, GroupId, ViewportId};
pub use values::{BaseView, Overlap};
