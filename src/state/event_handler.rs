//! Host event routing.
//!
//! Keeps pane layout consistent across host-level changes without the user
//! re-enabling anything: whenever a document is displayed in a viewport or a
//! viewport is entered, the pair it belongs to is laid out again if enabled,
//! or that viewport is unbound if not. Resizes and closes re-lay out enabled
//! pairs so the survivors close ranks.
//!
//! Host failures here are logged and swallowed; the next event retries.

use super::mode::{ModeController, ModeState};
use crate::host::{Host, HostEvent};
use crate::layout::LayoutOutcome;
use crate::model::{DocumentId, GroupId, HostError, ViewportId};
use tracing::warn;

/// What routing one event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Nothing to do (stale viewport, or a disabled pair that needs no cleanup).
    Ignored,
    /// The pair is enabled and was laid out.
    LaidOut(LayoutOutcome),
    /// The pair is disabled and the viewport was unbound.
    Unbound(ViewportId),
    /// A host call failed; state will be refreshed by a later event.
    Failed(HostError),
}

/// Route one host notification.
pub fn handle_host_event<H: Host + ?Sized>(
    controller: &ModeController,
    host: &mut H,
    event: HostEvent,
) -> RouteOutcome {
    let result = match event {
        HostEvent::DocumentDisplayed(viewport) | HostEvent::ViewportEntered(viewport) => {
            resync_viewport(controller, host, viewport, true)
        }
        HostEvent::ViewportResized(viewport) => resync_viewport(controller, host, viewport, false),
        HostEvent::ViewportClosed { document, group } => {
            relayout_if_enabled(controller, host, document, group)
        }
    };

    result.unwrap_or_else(|err| {
        warn!(?event, error = %err, "Layout refresh failed");
        RouteOutcome::Failed(err)
    })
}

fn resync_viewport<H: Host + ?Sized>(
    controller: &ModeController,
    host: &mut H,
    viewport: ViewportId,
    unbind_when_disabled: bool,
) -> Result<RouteOutcome, HostError> {
    if !host.viewport_is_valid(viewport) {
        return Ok(RouteOutcome::Ignored);
    }
    let document = host.viewport_document(viewport)?;
    let group = host.viewport_group(viewport)?;

    match controller.state(document, group) {
        ModeState::Enabled => Ok(RouteOutcome::LaidOut(
            controller.engine().apply(host, document, group)?,
        )),
        ModeState::Disabled if unbind_when_disabled => {
            host.set_scroll_bound(viewport, false)?;
            Ok(RouteOutcome::Unbound(viewport))
        }
        ModeState::Disabled => Ok(RouteOutcome::Ignored),
    }
}

fn relayout_if_enabled<H: Host + ?Sized>(
    controller: &ModeController,
    host: &mut H,
    document: DocumentId,
    group: GroupId,
) -> Result<RouteOutcome, HostError> {
    if controller.state(document, group) == ModeState::Disabled {
        return Ok(RouteOutcome::Ignored);
    }
    Ok(RouteOutcome::LaidOut(
        controller.engine().apply(host, document, group)?,
    ))
}

#[cfg(test)]
#[path = "event_handler_tests.rs"]
mod tests;
