//! Viewport provisioning.

use super::discovery::discover_viewports;
use crate::host::{ActiveViewportGuard, Host};
use crate::model::{DocumentId, GroupId, HostError, ViewportId};
use tracing::debug;

/// Make sure at least `columns` viewports of `group` show `document`.
///
/// Missing panes are created as vertical splits, each chained from the one
/// created before it. The first split comes from the right-most pane already
/// showing the document, or from the active viewport when none does (falling
/// back to any viewport of the group). The previously active viewport is
/// focused again afterwards.
///
/// Returns the re-discovered left-to-right pane list; host-assigned positions
/// of new splits are only known after creation. If the group has no viewport
/// to split from, the (empty) current list is returned unchanged.
///
/// # Errors
///
/// A refused split aborts provisioning; panes created before it stay open.
pub fn ensure_columns<H: Host + ?Sized>(
    host: &mut H,
    document: DocumentId,
    group: GroupId,
    columns: usize,
) -> Result<Vec<ViewportId>, HostError> {
    let existing = discover_viewports(host, document, group);
    if existing.len() >= columns {
        return Ok(existing);
    }

    let Some(mut origin) = split_origin(host, group, &existing) else {
        return Ok(existing);
    };

    let missing = columns - existing.len();
    {
        let mut guard = ActiveViewportGuard::preserve(&mut *host);
        for _ in 0..missing {
            origin = guard.split_vertical(origin, document)?;
        }
    }

    debug!(%document, %group, created = missing, columns, "Provisioned panes");
    Ok(discover_viewports(host, document, group))
}

fn split_origin<H: Host + ?Sized>(
    host: &H,
    group: GroupId,
    existing: &[ViewportId],
) -> Option<ViewportId> {
    if let Some(&rightmost) = existing.last() {
        return Some(rightmost);
    }
    host.active_viewport()
        .filter(|&active| host.viewport_group(active) == Ok(group))
        .or_else(|| host.group_viewports(group).into_iter().next())
}
