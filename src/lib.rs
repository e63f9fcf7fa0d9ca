//! Multipage
//!
//! Lays several side-by-side panes over one document so that each shows the
//! next page of it, like columns of a newspaper, and keeps them paging
//! together while the user scrolls.
//!
//! The editor, terminal multiplexer or viewer hosting the panes is reached
//! only through the [`host::Host`] trait; [`host::MemoryHost`] is a complete
//! in-memory implementation used by tests and the demo binary.

pub mod command;
pub mod config;
pub mod context;
pub mod host;
pub mod layout;
pub mod logging;
pub mod model;
pub mod session;
pub mod state;

pub use command::{parse_command, CommandError, PageCommand};
pub use host::{Host, HostEvent, MemoryHost};
pub use layout::{LayoutEngine, LayoutOutcome};
pub use model::{DocumentId, GroupId, HostError, MultipageError, Overlap, ViewportId};
pub use session::{CommandReport, Multipage};
pub use state::{FlagScope, ModeController, ModeState};
