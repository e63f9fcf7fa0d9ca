//! In-memory host.
//!
//! Models a vertical-split window manager closely enough to exercise the
//! paging engine end to end: splits land to the right of their origin, the
//! newly created split takes focus, user-driven scrolling propagates through
//! scroll-bound siblings, and every user-visible change queues the
//! notification a real host would emit.

use super::{Host, HostEvent};
use crate::layout::clamp_top;
use crate::model::{BaseView, DocumentId, GroupId, HostError, ViewportId};
use std::collections::BTreeMap;

/// Default text width of a pane, used to derive horizontal positions.
const DEFAULT_PANE_WIDTH: usize = 80;

#[derive(Debug, Clone)]
struct DocumentEntry {
    line_count: usize,
    valid: bool,
}

#[derive(Debug, Clone)]
struct ViewportEntry {
    document: DocumentId,
    group: GroupId,
    height: usize,
    top_line: usize,
    scroll_bound: bool,
}

/// Deterministic in-memory [`Host`].
///
/// [`Host::group_viewports`] reports viewports in creation order, which after
/// a split is generally *not* their left-to-right order.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    documents: BTreeMap<DocumentId, DocumentEntry>,
    /// Left-to-right placement per group.
    groups: BTreeMap<GroupId, Vec<ViewportId>>,
    viewports: BTreeMap<ViewportId, ViewportEntry>,
    active: Option<ViewportId>,
    next_document: u64,
    next_group: u64,
    next_viewport: u64,
    pane_width: usize,
    split_failure: Option<String>,
    activations: usize,
    events: Vec<HostEvent>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// Create a host with no documents, groups or viewports.
    pub fn new() -> Self {
        Self {
            documents: BTreeMap::new(),
            groups: BTreeMap::new(),
            viewports: BTreeMap::new(),
            active: None,
            next_document: 1,
            next_group: 1,
            next_viewport: 1000,
            pane_width: DEFAULT_PANE_WIDTH,
            split_failure: None,
            activations: 0,
            events: Vec::new(),
        }
    }

    /// Load a document with `line_count` lines.
    pub fn add_document(&mut self, line_count: usize) -> DocumentId {
        let id = DocumentId::new(self.next_document);
        self.next_document += 1;
        self.documents.insert(
            id,
            DocumentEntry {
                line_count,
                valid: true,
            },
        );
        id
    }

    /// Open an empty window group.
    pub fn add_group(&mut self) -> GroupId {
        let id = GroupId::new(self.next_group);
        self.next_group += 1;
        self.groups.insert(id, Vec::new());
        id
    }

    /// Place a new viewport at the right edge of `group`, showing `document`
    /// from line 1.
    ///
    /// Setup helper: emits no events. The first viewport opened becomes active.
    pub fn open_viewport(
        &mut self,
        group: GroupId,
        document: DocumentId,
        height: usize,
    ) -> ViewportId {
        let id = self.allocate_viewport(document, group, height, 1, false);
        self.groups.entry(group).or_default().push(id);
        if self.active.is_none() {
            self.active = Some(id);
        }
        id
    }

    /// Change a document's length, as an edit would.
    pub fn set_line_count(&mut self, document: DocumentId, line_count: usize) {
        if let Some(entry) = self.documents.get_mut(&document) {
            entry.line_count = line_count;
        }
    }

    /// Unload a document. Viewports showing it stay open.
    pub fn unload_document(&mut self, document: DocumentId) {
        if let Some(entry) = self.documents.get_mut(&document) {
            entry.valid = false;
        }
    }

    /// Make subsequent splits fail with `reason` (`None` to succeed again).
    pub fn set_split_failure(&mut self, reason: Option<&str>) {
        self.split_failure = reason.map(str::to_string);
    }

    /// Resize a viewport, as dragging a separator would.
    pub fn resize(&mut self, viewport: ViewportId, height: usize) {
        if let Some(entry) = self.viewports.get_mut(&viewport) {
            entry.height = height;
            self.events.push(HostEvent::ViewportResized(viewport));
        }
    }

    /// User-driven focus change.
    pub fn focus(&mut self, viewport: ViewportId) {
        if self.viewports.contains_key(&viewport) {
            self.active = Some(viewport);
            self.events.push(HostEvent::ViewportEntered(viewport));
        }
    }

    /// Show another document in an existing viewport, from line 1.
    pub fn display(&mut self, viewport: ViewportId, document: DocumentId) {
        if let Some(entry) = self.viewports.get_mut(&viewport) {
            entry.document = document;
            entry.top_line = 1;
            self.events.push(HostEvent::DocumentDisplayed(viewport));
        }
    }

    /// Close a viewport. If it was active, focus moves to its left neighbour
    /// (or the new left-most viewport of the group).
    pub fn close(&mut self, viewport: ViewportId) {
        let Some(entry) = self.viewports.remove(&viewport) else {
            return;
        };
        let order = self.groups.entry(entry.group).or_default();
        let index = order.iter().position(|&v| v == viewport);
        order.retain(|&v| v != viewport);
        let neighbour = index.and_then(|i| order.get(i.saturating_sub(1)).copied());

        self.events.push(HostEvent::ViewportClosed {
            document: entry.document,
            group: entry.group,
        });

        if self.active == Some(viewport) {
            self.active = neighbour.or_else(|| self.viewports.keys().next().copied());
            if let Some(next) = self.active {
                self.events.push(HostEvent::ViewportEntered(next));
            }
        }
    }

    /// User-driven scroll of `viewport` by `delta` lines.
    ///
    /// When the viewport is scroll-bound, every other scroll-bound viewport
    /// of the same group moves by the same delta, each clamped to its own
    /// bounds, so relative offsets are preserved away from the document ends.
    pub fn scroll_by(&mut self, viewport: ViewportId, delta: isize) -> Result<(), HostError> {
        let origin = self
            .viewports
            .get(&viewport)
            .cloned()
            .ok_or(HostError::InvalidViewport(viewport))?;

        let followers: Vec<ViewportId> = if origin.scroll_bound {
            self.viewports
                .iter()
                .filter(|(id, entry)| {
                    **id != viewport && entry.group == origin.group && entry.scroll_bound
                })
                .map(|(id, _)| *id)
                .collect()
        } else {
            Vec::new()
        };

        for id in std::iter::once(viewport).chain(followers) {
            let (document, height, top) = match self.viewports.get(&id) {
                Some(entry) => (entry.document, entry.height, entry.top_line),
                None => continue,
            };
            let total = self.line_count(document).unwrap_or(0);
            let desired = top.saturating_add_signed(delta);
            let clamped = clamp_top(desired, total, height);
            if let Some(entry) = self.viewports.get_mut(&id) {
                entry.top_line = clamped;
            }
        }
        Ok(())
    }

    /// Take every notification emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of successful [`Host::set_active_viewport`] calls so far.
    pub fn activation_count(&self) -> usize {
        self.activations
    }

    /// Viewports of `group` in on-screen left-to-right order.
    pub fn placement(&self, group: GroupId) -> Vec<ViewportId> {
        self.groups.get(&group).cloned().unwrap_or_default()
    }

    fn allocate_viewport(
        &mut self,
        document: DocumentId,
        group: GroupId,
        height: usize,
        top_line: usize,
        scroll_bound: bool,
    ) -> ViewportId {
        let id = ViewportId::new(self.next_viewport);
        self.next_viewport += 1;
        self.viewports.insert(
            id,
            ViewportEntry {
                document,
                group,
                height,
                top_line,
                scroll_bound,
            },
        );
        id
    }

    fn entry(&self, viewport: ViewportId) -> Result<&ViewportEntry, HostError> {
        self.viewports
            .get(&viewport)
            .ok_or(HostError::InvalidViewport(viewport))
    }

    fn entry_mut(&mut self, viewport: ViewportId) -> Result<&mut ViewportEntry, HostError> {
        self.viewports
            .get_mut(&viewport)
            .ok_or(HostError::InvalidViewport(viewport))
    }
}

impl Host for MemoryHost {
    fn group_viewports(&self, group: GroupId) -> Vec<ViewportId> {
        self.viewports
            .iter()
            .filter(|(_, entry)| entry.group == group)
            .map(|(id, _)| *id)
            .collect()
    }

    fn viewport_is_valid(&self, viewport: ViewportId) -> bool {
        self.viewports.contains_key(&viewport)
    }

    fn document_is_valid(&self, document: DocumentId) -> bool {
        self.documents.get(&document).is_some_and(|doc| doc.valid)
    }

    fn viewport_document(&self, viewport: ViewportId) -> Result<DocumentId, HostError> {
        Ok(self.entry(viewport)?.document)
    }

    fn viewport_group(&self, viewport: ViewportId) -> Result<GroupId, HostError> {
        Ok(self.entry(viewport)?.group)
    }

    fn viewport_height(&self, viewport: ViewportId) -> Result<usize, HostError> {
        Ok(self.entry(viewport)?.height)
    }

    fn viewport_position(&self, viewport: ViewportId) -> Result<usize, HostError> {
        let group = self.entry(viewport)?.group;
        let index = self
            .groups
            .get(&group)
            .and_then(|order| order.iter().position(|&v| v == viewport))
            .ok_or(HostError::InvalidViewport(viewport))?;
        // One separator column between adjacent panes.
        Ok(index * (self.pane_width + 1))
    }

    fn top_line(&self, viewport: ViewportId) -> Result<usize, HostError> {
        Ok(self.entry(viewport)?.top_line)
    }

    fn set_top_line(&mut self, viewport: ViewportId, line: usize) -> Result<(), HostError> {
        self.entry_mut(viewport)?.top_line = line;
        Ok(())
    }

    fn scroll_bound(&self, viewport: ViewportId) -> Result<bool, HostError> {
        Ok(self.entry(viewport)?.scroll_bound)
    }

    fn set_scroll_bound(&mut self, viewport: ViewportId, bound: bool) -> Result<(), HostError> {
        self.entry_mut(viewport)?.scroll_bound = bound;
        Ok(())
    }

    fn active_viewport(&self) -> Option<ViewportId> {
        self.active
    }

    fn set_active_viewport(&mut self, viewport: ViewportId) -> Result<(), HostError> {
        self.entry(viewport)?;
        self.active = Some(viewport);
        self.activations += 1;
        Ok(())
    }

    fn save_view(&self) -> Result<BaseView, HostError> {
        let active = self.active.ok_or(HostError::NoActiveViewport)?;
        Ok(BaseView::new(self.entry(active)?.top_line))
    }

    fn line_count(&self, document: DocumentId) -> Result<usize, HostError> {
        self.documents
            .get(&document)
            .filter(|doc| doc.valid)
            .map(|doc| doc.line_count)
            .ok_or(HostError::InvalidDocument(document))
    }

    fn split_vertical(
        &mut self,
        from: ViewportId,
        document: DocumentId,
    ) -> Result<ViewportId, HostError> {
        let origin = self.entry(from)?.clone();
        if !self.document_is_valid(document) {
            return Err(HostError::InvalidDocument(document));
        }
        if let Some(reason) = &self.split_failure {
            return Err(HostError::SplitFailed {
                from,
                reason: reason.clone(),
            });
        }

        // The new split inherits the origin's view and window options.
        let top_line = if origin.document == document {
            origin.top_line
        } else {
            1
        };
        let id = self.allocate_viewport(
            document,
            origin.group,
            origin.height,
            top_line,
            origin.scroll_bound,
        );

        let order = self.groups.entry(origin.group).or_default();
        let index = order.iter().position(|&v| v == from).map_or(order.len(), |i| i + 1);
        order.insert(index, id);

        self.active = Some(id);
        self.events.push(HostEvent::DocumentDisplayed(id));
        self.events.push(HostEvent::ViewportEntered(id));
        Ok(id)
    }
}
