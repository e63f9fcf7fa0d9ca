//! Session wiring.
//!
//! [`Multipage`] is what a host embeds: it owns the mode controller and the
//! context slot, runs user commands against whatever the active viewport
//! shows, and forwards host notifications to the event router.

use crate::command::{parse_command, PageCommand};
use crate::config::ResolvedConfig;
use crate::context::{ContextError, ContextRenderer, ContextSlot};
use crate::host::{Host, HostEvent};
use crate::layout::{discover_viewports, LayoutEngine, LayoutOutcome};
use crate::model::{DocumentId, GroupId, HostError, MultipageError, Overlap, ViewportId};
use crate::state::{
    handle_host_event, ModeController, ModeRegistry, ModeState, ModeTransition, RouteOutcome,
};
use std::fmt;
use tracing::{debug, info};

/// Result of one executed command, printable for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandReport {
    /// Mode is on and the panes were laid out.
    Enabled {
        /// Document the command applied to.
        document: DocumentId,
        /// What the layout pass did.
        outcome: LayoutOutcome,
    },
    /// Mode is off.
    Disabled {
        /// Document the command applied to.
        document: DocumentId,
        /// Panes whose scroll binding was cleared.
        released: usize,
    },
    /// Current state without changing anything.
    Status {
        /// Document shown in the active viewport.
        document: DocumentId,
        /// Mode state of that document in the active group.
        state: ModeState,
        /// Panes showing the document, left to right, with their top lines.
        panes: Vec<(ViewportId, usize)>,
    },
    /// The overlap changed.
    OverlapSet {
        /// New overlap.
        overlap: Overlap,
        /// Re-layout of the active document, when it is enabled.
        outcome: Option<LayoutOutcome>,
    },
}

impl fmt::Display for CommandReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled { document, outcome } => {
                write!(f, "multipage enabled for {document}: {outcome}")
            }
            Self::Disabled { document, released } => {
                write!(f, "multipage disabled for {document}: {released} panes released")
            }
            Self::Status {
                document,
                state,
                panes,
            } => {
                let state = match state {
                    ModeState::Enabled => "enabled",
                    ModeState::Disabled => "disabled",
                };
                write!(f, "{document}: multipage {state}, {} panes", panes.len())?;
                for (viewport, top_line) in panes {
                    write!(f, "\n  {viewport} top {top_line}")?;
                }
                Ok(())
            }
            Self::OverlapSet { overlap, outcome } => {
                write!(f, "overlap set to {overlap}")?;
                if let Some(outcome) = outcome {
                    write!(f, ": {outcome}")?;
                }
                Ok(())
            }
        }
    }
}

/// One multipage session inside a host.
#[derive(Debug, Default)]
pub struct Multipage {
    controller: ModeController,
    context: ContextSlot,
}

impl Multipage {
    /// Wrap an existing controller.
    pub fn new(controller: ModeController) -> Self {
        Self {
            controller,
            context: ContextSlot::new(),
        }
    }

    /// Build a session from resolved configuration.
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(ModeController::new(
            ModeRegistry::new(config.flag_scope),
            LayoutEngine::new(config.overlap),
        ))
    }

    /// The mode controller.
    pub fn controller(&self) -> &ModeController {
        &self.controller
    }

    /// Shared handle onto the enabled flags.
    pub fn modes(&self) -> &ModeRegistry {
        self.controller.modes()
    }

    /// Register the optional context renderer and install the redirect.
    ///
    /// Safe to call repeatedly: the redirect is installed at most once, and a
    /// renderer passed on a later call replaces the previous one (still
    /// redirected). Returns `true` on the call that installed the redirect.
    pub fn setup(&mut self, renderer: Option<Box<dyn ContextRenderer>>) -> bool {
        if let Some(renderer) = renderer {
            self.context.register(renderer);
        }
        let installed = self.context.install_redirect(self.controller.modes());
        debug!(installed, context = ?self.context, "Multipage setup");
        installed
    }

    /// Parse and execute one command line.
    pub fn run_line<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        line: &str,
    ) -> Result<CommandReport, MultipageError> {
        let command = parse_command(line)?;
        self.execute(host, command)
    }

    /// Execute a command against the document in the active viewport.
    ///
    /// # Errors
    ///
    /// [`HostError::NoActiveViewport`] when nothing is focused, or whatever
    /// host failure interrupted the layout.
    pub fn execute<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        command: PageCommand,
    ) -> Result<CommandReport, MultipageError> {
        let (document, group) = active_pair(&*host)?;
        let columns = command.columns();

        let report = match command {
            PageCommand::Enable { .. } => CommandReport::Enabled {
                document,
                outcome: self.controller.enable(host, document, group, columns)?,
            },
            PageCommand::Disable => CommandReport::Disabled {
                document,
                released: self.controller.disable(host, document, group)?,
            },
            PageCommand::Toggle { .. } => {
                match self.controller.toggle(host, document, group, columns)? {
                    ModeTransition::Enabled(outcome) => {
                        CommandReport::Enabled { document, outcome }
                    }
                    ModeTransition::Disabled { released } => {
                        CommandReport::Disabled { document, released }
                    }
                }
            }
            PageCommand::Status => self.status_of(&*host, document, group)?,
            PageCommand::Overlap { lines } => {
                let overlap = Overlap::new(lines);
                self.controller.set_overlap(overlap);
                info!(%overlap, "Overlap changed");
                let outcome = if self.controller.modes().is_enabled(document, group) {
                    Some(self.controller.engine().apply(host, document, group)?)
                } else {
                    None
                };
                CommandReport::OverlapSet { overlap, outcome }
            }
        };
        Ok(report)
    }

    /// Report the state of the document in the active viewport.
    pub fn status<H: Host + ?Sized>(&self, host: &H) -> Result<CommandReport, MultipageError> {
        let (document, group) = active_pair(host)?;
        Ok(self.status_of(host, document, group)?)
    }

    fn status_of<H: Host + ?Sized>(
        &self,
        host: &H,
        document: DocumentId,
        group: GroupId,
    ) -> Result<CommandReport, HostError> {
        let panes = discover_viewports(host, document, group)
            .into_iter()
            .map(|viewport| Ok((viewport, host.top_line(viewport)?)))
            .collect::<Result<Vec<_>, HostError>>()?;
        Ok(CommandReport::Status {
            document,
            state: self.controller.state(document, group),
            panes,
        })
    }

    /// Route one host notification.
    pub fn handle_event<H: Host + ?Sized>(&self, host: &mut H, event: HostEvent) -> RouteOutcome {
        handle_host_event(&self.controller, host, event)
    }

    /// Route a batch of host notifications in order.
    pub fn handle_events<H, I>(&self, host: &mut H, events: I) -> Vec<RouteOutcome>
    where
        H: Host + ?Sized,
        I: IntoIterator<Item = HostEvent>,
    {
        events
            .into_iter()
            .map(|event| self.handle_event(host, event))
            .collect()
    }

    /// Refresh the context display through the slot.
    pub fn render_context(&mut self, host: &mut dyn Host) -> Result<(), ContextError> {
        self.context.render(host)
    }
}

fn active_pair<H: Host + ?Sized>(host: &H) -> Result<(DocumentId, GroupId), HostError> {
    let active = host.active_viewport().ok_or(HostError::NoActiveViewport)?;
    Ok((host.viewport_document(active)?, host.viewport_group(active)?))
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
