//! Multipage mode state machine.
//!
//! Each document starts `Disabled`. `enable` and `disable` are explicit;
//! `toggle` picks whichever applies. The enabled flags live in a
//! [`ModeRegistry`] owned by the session and shared by handle with the event
//! router and the context redirect, which only ever read it.

use crate::host::Host;
use crate::layout::{ensure_columns, release_panes, LayoutEngine, LayoutOutcome};
use crate::model::{DocumentId, GroupId, HostError, Overlap};
use serde::Deserialize;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use tracing::info;

/// How far an enabled flag reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagScope {
    /// Enabling a document enables it in every group it appears in.
    #[default]
    Document,
    /// Enabling applies only to the (document, group) pair it was issued in.
    Group,
}

/// Whether multipage mode is on for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeState {
    /// Panes are independent (initial state).
    #[default]
    Disabled,
    /// Panes page through the document in lockstep.
    Enabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct FlagKey {
    document: DocumentId,
    group: Option<GroupId>,
}

/// Session-scoped enabled flags.
///
/// Cloning yields another handle onto the same flags.
#[derive(Debug, Clone, Default)]
pub struct ModeRegistry {
    scope: FlagScope,
    enabled: Rc<RefCell<HashSet<FlagKey>>>,
}

impl ModeRegistry {
    /// Create an empty registry keyed according to `scope`.
    pub fn new(scope: FlagScope) -> Self {
        Self {
            scope,
            enabled: Rc::default(),
        }
    }

    /// Scope the flags are keyed by.
    pub fn scope(&self) -> FlagScope {
        self.scope
    }

    /// Current state of `document` as seen from `group`.
    pub fn state(&self, document: DocumentId, group: GroupId) -> ModeState {
        if self.enabled.borrow().contains(&self.key(document, group)) {
            ModeState::Enabled
        } else {
            ModeState::Disabled
        }
    }

    /// Shorthand for `state(..) == ModeState::Enabled`.
    pub fn is_enabled(&self, document: DocumentId, group: GroupId) -> bool {
        self.state(document, group) == ModeState::Enabled
    }

    /// Record `state` for `document` as seen from `group`.
    pub fn set(&self, document: DocumentId, group: GroupId, state: ModeState) {
        let key = self.key(document, group);
        let mut enabled = self.enabled.borrow_mut();
        match state {
            ModeState::Enabled => {
                enabled.insert(key);
            }
            ModeState::Disabled => {
                enabled.remove(&key);
            }
        }
    }

    /// Number of enabled flags.
    pub fn enabled_count(&self) -> usize {
        self.enabled.borrow().len()
    }

    fn key(&self, document: DocumentId, group: GroupId) -> FlagKey {
        FlagKey {
            document,
            group: match self.scope {
                FlagScope::Document => None,
                FlagScope::Group => Some(group),
            },
        }
    }
}

/// What a [`ModeController::toggle`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeTransition {
    /// Mode was switched on and the panes laid out.
    Enabled(LayoutOutcome),
    /// Mode was switched off and `released` panes unbound.
    Disabled {
        /// Panes whose scroll binding was cleared.
        released: usize,
    },
}

/// Routes enable/disable/toggle requests to the layout engine.
#[derive(Debug, Clone, Default)]
pub struct ModeController {
    modes: ModeRegistry,
    engine: LayoutEngine,
}

impl ModeController {
    /// Create a controller over `modes`, laying out with `engine`.
    pub fn new(modes: ModeRegistry, engine: LayoutEngine) -> Self {
        Self { modes, engine }
    }

    /// The enabled flags.
    pub fn modes(&self) -> &ModeRegistry {
        &self.modes
    }

    /// The layout engine.
    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    /// Change the overlap used from the next layout pass on.
    pub fn set_overlap(&mut self, overlap: Overlap) {
        self.engine.set_overlap(overlap);
    }

    /// Current state of `document` in `group`.
    pub fn state(&self, document: DocumentId, group: GroupId) -> ModeState {
        self.modes.state(document, group)
    }

    /// Turn multipage mode on and lay the panes out.
    ///
    /// With `columns` of at least 1, missing panes are split off first.
    /// Enabling an enabled document re-provisions and re-lays out, which also
    /// refreshes the layout after a manual resize.
    pub fn enable<H: Host + ?Sized>(
        &self,
        host: &mut H,
        document: DocumentId,
        group: GroupId,
        columns: Option<usize>,
    ) -> Result<LayoutOutcome, HostError> {
        self.modes.set(document, group, ModeState::Enabled);
        info!(%document, %group, ?columns, "Multipage enabled");

        if let Some(columns) = columns.filter(|&n| n > 0) {
            ensure_columns(host, document, group, columns)?;
        }
        self.engine.apply(host, document, group)
    }

    /// Turn multipage mode off and unbind the panes. Offsets stay put.
    ///
    /// Returns the number of panes released.
    pub fn disable<H: Host + ?Sized>(
        &self,
        host: &mut H,
        document: DocumentId,
        group: GroupId,
    ) -> Result<usize, HostError> {
        self.modes.set(document, group, ModeState::Disabled);
        info!(%document, %group, "Multipage disabled");
        release_panes(host, document, group)
    }

    /// `disable` when enabled, otherwise `enable` with `columns`.
    pub fn toggle<H: Host + ?Sized>(
        &self,
        host: &mut H,
        document: DocumentId,
        group: GroupId,
        columns: Option<usize>,
    ) -> Result<ModeTransition, HostError> {
        match self.state(document, group) {
            ModeState::Enabled => {
                let released = self.disable(host, document, group)?;
                Ok(ModeTransition::Disabled { released })
            }
            ModeState::Disabled => {
                let outcome = self.enable(host, document, group, columns)?;
                Ok(ModeTransition::Enabled(outcome))
            }
        }
    }
}

#[cfg(test)]
#[path = "mode_tests.rs"]
mod tests;
