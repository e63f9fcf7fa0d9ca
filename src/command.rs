//! User command surface.
//!
//! Command lines are parsed with clap's multicall mode, so the first word
//! names the command the same way `argv[0]` names a busybox applet:
//!
//! ```text
//! enable [N]    turn multipage on, splitting until N panes show the document
//! disable       turn multipage off, leaving pane offsets where they are
//! toggle [N]    whichever of the two applies
//! status        report the current layout
//! overlap N     lines shared between adjacent pages from now on
//! ```

use clap::{Parser, Subcommand};
use thiserror::Error;

/// A command line could not be turned into a [`PageCommand`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Nothing but whitespace was given.
    #[error("Empty command")]
    Empty,

    /// Unknown command, bad argument, or an explicit help request.
    #[error("{0}")]
    Invalid(String),
}

/// One multipage command.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum PageCommand {
    /// Enable multipage mode for the current document
    Enable {
        /// Split until this many panes show the document
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        columns: Option<u32>,
    },

    /// Disable multipage mode for the current document
    Disable,

    /// Toggle multipage mode for the current document
    Toggle {
        /// Split until this many panes show the document when enabling
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        columns: Option<u32>,
    },

    /// Show the current page layout
    Status,

    /// Set how many lines adjacent pages share
    Overlap {
        /// Shared lines (0 for none)
        lines: usize,
    },
}

impl PageCommand {
    /// Requested pane count as a plain `usize`.
    pub fn columns(&self) -> Option<usize> {
        match self {
            PageCommand::Enable { columns } | PageCommand::Toggle { columns } => {
                columns.map(|n| n as usize)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Parser)]
#[command(multicall = true)]
struct CommandLine {
    #[command(subcommand)]
    command: PageCommand,
}

/// Parse one command line such as `"enable 3"`.
///
/// # Errors
///
/// [`CommandError::Empty`] for blank input, [`CommandError::Invalid`] with
/// clap's rendered message for everything clap rejects.
pub fn parse_command(line: &str) -> Result<PageCommand, CommandError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Err(CommandError::Empty);
    }

    CommandLine::try_parse_from(words)
        .map(|parsed| parsed.command)
        .map_err(|err| CommandError::Invalid(err.render().to_string().trim_end().to_string()))
}
