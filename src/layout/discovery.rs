//! Viewport discovery.

use crate::host::Host;
use crate::model::{DocumentId, GroupId, ViewportId};

/// Viewports of `group` showing `document`, ordered left to right.
///
/// Viewports whose position cannot be read (closed mid-query) are left out.
/// Equal positions keep the host's iteration order. Returns an empty list
/// when nothing shows the document.
pub fn discover_viewports<H: Host + ?Sized>(
    host: &H,
    document: DocumentId,
    group: GroupId,
) -> Vec<ViewportId> {
    let mut found: Vec<(usize, ViewportId)> = host
        .group_viewports(group)
        .into_iter()
        .filter(|&viewport| host.viewport_is_valid(viewport))
        .filter(|&viewport| host.viewport_document(viewport) == Ok(document))
        .filter_map(|viewport| {
            host.viewport_position(viewport)
                .ok()
                .map(|position| (position, viewport))
        })
        .collect();

    // Stable: ties keep host order.
    found.sort_by_key(|&(position, _)| position);
    found.into_iter().map(|(_, viewport)| viewport).collect()
}

/// Left-most viewport of `group` showing `document`, if any.
pub fn leftmost_viewport<H: Host + ?Sized>(
    host: &H,
    document: DocumentId,
    group: GroupId,
) -> Option<ViewportId> {
    discover_viewports(host, document, group).into_iter().next()
}
