//! The panel layout model
//!
//! This module provides [`PanelTree`], the owner of one layout: the split
//! tree, the detached-window registry, the active group and the event bus.
//! Every structural operation goes through it.
//!
//! # Example
//!
//! ```
//! use panelgrid_core::layout::{ContentId, LayoutZone, PanelTree};
//!
//! let mut tree = PanelTree::new();
//! let editor = ContentId::new();
//! let logs = ContentId::new();
//!
//! let main = tree.add_panel(editor, "Editor", LayoutZone::Default, None).unwrap();
//! assert_eq!(main, tree.main_group().id());
//!
//! // Put the logs in a new group to the right of the Main Group
//! let right = tree.add_panel(logs, "Logs", LayoutZone::Right, None).unwrap();
//! assert_eq!(tree.all_groups().len(), 2);
//!
//! // Removing the only panel of an ordinary group deletes the group
//! tree.remove_panel(logs).unwrap();
//! assert!(tree.group(right).is_none());
//! assert_eq!(tree.all_groups().len(), 1);
//! ```
//!
//! # Invariants
//!
//! After every public operation the Main Group exists and is reachable, no
//! ordinary group is empty, no split other than the root has fewer than two
//! children, and every content handle lives in at most one group or window.

use super::error::{LayoutError, LayoutResult};
use super::events::{EventBus, LayoutEvent, Subscription};
use super::group::{Panel, TabGroup};
use super::snapshot::LayoutSnapshot;
use super::tree::{SplitNode, SplitTree};
use super::types::{ContentId, GroupId, LayoutZone, Orientation, SplitId, WindowId};
use super::window::{DetachedWindow, WindowRegistry};

/// Where a piece of content currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentLocation {
    /// Docked as a tab of a group.
    Docked(GroupId),
    /// Shown in a detached window.
    Detached(WindowId),
}

/// Everything discarded by [`PanelTree::restore_default_layout`].
///
/// The host disposes of the content these refer to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutReset {
    /// Panels that were docked, in layout order.
    pub panels: Vec<Panel>,
    /// Windows that were open, in creation order.
    pub windows: Vec<DetachedWindow>,
}

/// A tab/panel layout: split tree, tab groups and detached windows.
///
/// `PanelTree` is single-threaded. Read accessors take `&self` and may be
/// called at any time between mutations.
#[derive(Debug)]
pub struct PanelTree {
    tree: SplitTree,
    windows: WindowRegistry,
    active: GroupId,
    root_orientation: Orientation,
    events: EventBus,
}

impl PanelTree {
    /// Creates a layout holding a single empty Main Group under a
    /// horizontal root.
    #[must_use]
    pub fn new() -> Self {
        Self::with_root_orientation(Orientation::Horizontal)
    }

    /// Creates a layout whose root split has `orientation`. Resets rebuild
    /// the root with the same orientation.
    #[must_use]
    pub fn with_root_orientation(orientation: Orientation) -> Self {
        let tree = SplitTree::with_orientation(orientation);
        let active = tree.main_id();
        Self {
            tree,
            windows: WindowRegistry::new(),
            active,
            root_orientation: orientation,
            events: EventBus::new(),
        }
    }

    /// Registers an event handler; dropping the returned subscription
    /// unsubscribes it.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: FnMut(&LayoutEvent) + 'static,
    {
        self.events.subscribe(handler)
    }

    // ========================================================================
    // Structural Operations
    // ========================================================================

    /// Adds `content` to the layout.
    ///
    /// With `LayoutZone::Default` the panel is appended as a tab of `anchor`
    /// (the Main Group when `None`). An edge zone creates a new group next
    /// to the anchor, see [`PanelTree::split_around`]. If the content is
    /// already docked its existing tab is focused and that group returned.
    ///
    /// # Errors
    ///
    /// - `ContentDetached` if the content lives in a detached window
    /// - `GroupNotFound` if `anchor` does not exist
    pub fn add_panel(
        &mut self,
        content: ContentId,
        title: impl Into<String>,
        zone: LayoutZone,
        anchor: Option<GroupId>,
    ) -> LayoutResult<GroupId> {
        if self.windows.find_content(content).is_some() {
            return Err(LayoutError::ContentDetached(content));
        }
        if let Some(existing) = self.tree.find_content(content) {
            self.tree.group_mut(existing)?.focus(content);
            self.active = existing;
            tracing::debug!(%content, group = %existing, "content already docked, focused existing tab");
            return Ok(existing);
        }

        let anchor = anchor.unwrap_or_else(|| self.tree.main_id());
        if self.tree.group(anchor).is_none() {
            return Err(LayoutError::GroupNotFound(anchor));
        }

        let panel = Panel::new(content, title);
        let group = if zone.is_edge() {
            self.tree.split_around(anchor, zone, panel)?
        } else {
            let index = self.tree.group_mut(anchor)?.push(panel);
            tracing::debug!(%content, group = %anchor, index, "added panel as tab");
            anchor
        };
        self.active = group;
        self.settle();
        Ok(group)
    }

    /// Adds `content` in a new group on the `zone` side of `anchor`.
    ///
    /// A `Default` zone cannot split; the request is logged and the panel
    /// is added as a tab of the anchor instead.
    ///
    /// # Errors
    ///
    /// Same as [`PanelTree::add_panel`].
    pub fn split_around(
        &mut self,
        anchor: GroupId,
        zone: LayoutZone,
        content: ContentId,
        title: impl Into<String>,
    ) -> LayoutResult<GroupId> {
        if !zone.is_edge() {
            tracing::warn!(%anchor, %zone, "cannot split around a group without an edge zone, adding as tab");
        }
        self.add_panel(content, title, zone, Some(anchor))
    }

    /// Removes the panel for `content` and returns it for disposal.
    ///
    /// An ordinary group left empty is deleted and its parent split is
    /// collapse-checked.
    ///
    /// # Errors
    ///
    /// - `ContentDetached` if the content lives in a detached window
    /// - `ContentNotFound` if the content is not docked
    pub fn remove_panel(&mut self, content: ContentId) -> LayoutResult<Panel> {
        if self.windows.find_content(content).is_some() {
            return Err(LayoutError::ContentDetached(content));
        }
        let taken = self.tree.take_panel(content)?;
        tracing::debug!(
            %content,
            group = %taken.group,
            group_removed = taken.group_removed,
            "removed panel"
        );
        self.settle();
        Ok(taken.panel)
    }

    /// Moves a docked panel into a new detached window.
    ///
    /// The panel's pinned flag does not carry over.
    ///
    /// # Errors
    ///
    /// - `ContentDetached` if the content is already detached
    /// - `ContentNotFound` if the content is not docked
    pub fn detach_panel(&mut self, content: ContentId) -> LayoutResult<WindowId> {
        if self.windows.find_content(content).is_some() {
            return Err(LayoutError::ContentDetached(content));
        }
        let taken = self.tree.take_panel(content)?;
        let title = taken.panel.title;
        let window = self.windows.open(content, title.clone());
        tracing::debug!(%content, %window, source = %taken.group, "detached panel");
        self.settle();
        self.events.emit(&LayoutEvent::PanelDetached {
            content,
            title,
            window,
        });
        Ok(window)
    }

    /// Closes a detached window and hands its content back for disposal.
    ///
    /// The content is not docked again.
    ///
    /// # Errors
    ///
    /// Returns `WindowNotFound` if the window is not registered.
    pub fn close_window(&mut self, window: WindowId) -> LayoutResult<DetachedWindow> {
        let closed = self.windows.close(window)?;
        tracing::debug!(%window, content = %closed.content, "closed detached window");
        Ok(closed)
    }

    /// Moves `content` into `target_group` at `target_index` and makes it
    /// the current tab.
    ///
    /// The content may come from another group, from the same group
    /// (reorder) or from a detached window, which is closed. The index is
    /// clamped to the valid range. Repeating the same call is a no-op.
    ///
    /// # Errors
    ///
    /// - `GroupNotFound` if the target group does not exist
    /// - `ContentNotFound` if the content is neither docked nor detached
    pub fn reattach_from_drag(
        &mut self,
        content: ContentId,
        target_group: GroupId,
        target_index: usize,
    ) -> LayoutResult<GroupId> {
        let target = self
            .tree
            .group(target_group)
            .ok_or(LayoutError::GroupNotFound(target_group))?;

        let source_group = match self.locate(content)? {
            ContentLocation::Docked(source) if source == target_group => {
                let index = target_index.min(target.len().saturating_sub(1));
                let group = self.tree.group_mut(target_group)?;
                if group.position(content) == Some(index) {
                    group.focus(content);
                    self.active = target_group;
                    tracing::trace!(%content, group = %target_group, index, "reattach is a no-op");
                    return Ok(target_group);
                }
                let panel = group
                    .remove(content)
                    .ok_or(LayoutError::ContentNotFound(content))?;
                group.insert(index, panel);
                tracing::debug!(%content, group = %target_group, index, "reordered tab");
                Some(source)
            }
            ContentLocation::Docked(source) => {
                let taken = self.tree.take_panel(content)?;
                let index = self.tree.group_mut(target_group)?.insert(target_index, taken.panel);
                tracing::debug!(
                    %content,
                    source = %source,
                    target = %target_group,
                    index,
                    source_removed = taken.group_removed,
                    "moved panel between groups"
                );
                Some(source)
            }
            ContentLocation::Detached(window) => {
                let closed = self.windows.close(window)?;
                let panel = Panel::new(content, closed.title);
                let index = self.tree.group_mut(target_group)?.insert(target_index, panel);
                tracing::debug!(%content, %window, target = %target_group, index, "docked detached window");
                None
            }
        };

        self.active = target_group;
        self.settle();
        self.events.emit(&LayoutEvent::PanelMoveCompleted {
            content,
            source_group,
            target_group,
        });
        Ok(target_group)
    }

    /// Drag-to-split: moves `content` into a new group on the `zone` side of
    /// `target_group`.
    ///
    /// Dropping the only panel of a group on that group's own edge changes
    /// nothing. A `Default` zone is treated as a tab drop at the end of the
    /// target.
    ///
    /// # Errors
    ///
    /// - `GroupNotFound` if the target group does not exist
    /// - `ContentNotFound` if the content is neither docked nor detached
    pub fn move_to_split(
        &mut self,
        content: ContentId,
        target_group: GroupId,
        zone: LayoutZone,
    ) -> LayoutResult<GroupId> {
        if !zone.is_edge() {
            tracing::warn!(%content, target = %target_group, "split drop without an edge zone, adding as tab");
            return self.reattach_from_drag(content, target_group, usize::MAX);
        }
        let target = self
            .tree
            .group(target_group)
            .ok_or(LayoutError::GroupNotFound(target_group))?;

        let location = self.locate(content)?;
        if location == ContentLocation::Docked(target_group) && target.len() == 1 {
            tracing::debug!(%content, group = %target_group, "split onto own sole group ignored");
            return Ok(target_group);
        }

        let (panel, source_group) = match location {
            ContentLocation::Docked(source) => (self.tree.take_panel(content)?.panel, Some(source)),
            ContentLocation::Detached(window) => {
                let closed = self.windows.close(window)?;
                (Panel::new(content, closed.title), None)
            }
        };
        let group = self.tree.split_around(target_group, zone, panel)?;

        self.active = group;
        self.settle();
        self.events.emit(&LayoutEvent::PanelMoveCompleted {
            content,
            source_group,
            target_group: group,
        });
        Ok(group)
    }

    // ========================================================================
    // Pinning
    // ========================================================================

    /// Sets the pinned flag of a docked panel.
    ///
    /// Fires `PanelPinToggled` when the flag changes.
    ///
    /// # Errors
    ///
    /// - `ContentDetached` if the content lives in a detached window
    /// - `ContentNotFound` if the content is not docked
    pub fn set_pinned(&mut self, content: ContentId, pinned: bool) -> LayoutResult<()> {
        if self.windows.find_content(content).is_some() {
            return Err(LayoutError::ContentDetached(content));
        }
        let panel = self
            .tree
            .panel_mut(content)
            .ok_or(LayoutError::ContentNotFound(content))?;
        if panel.pinned == pinned {
            return Ok(());
        }
        panel.pinned = pinned;
        tracing::debug!(%content, pinned, "pin state changed");
        self.events
            .emit(&LayoutEvent::PanelPinToggled { content, pinned });
        Ok(())
    }

    /// Flips the pinned flag and returns the new state.
    ///
    /// # Errors
    ///
    /// Same as [`PanelTree::set_pinned`].
    pub fn toggle_pinned(&mut self, content: ContentId) -> LayoutResult<bool> {
        let pinned = !self.is_pinned(content);
        self.set_pinned(content, pinned)?;
        Ok(pinned)
    }

    /// Returns the pinned flag; `false` for content that is not docked.
    #[must_use]
    pub fn is_pinned(&self, content: ContentId) -> bool {
        self.tree.panels().any(|p| p.content == content && p.pinned)
    }

    /// Returns `(content, pinned)` for every docked panel in layout order.
    #[must_use]
    pub fn pin_states(&self) -> Vec<(ContentId, bool)> {
        self.all_groups()
            .into_iter()
            .flat_map(|g| g.panels().iter().map(|p| (p.content, p.pinned)))
            .collect()
    }

    // ========================================================================
    // Bulk Operations
    // ========================================================================

    /// Removes every unpinned docked panel and returns them for disposal.
    ///
    /// Empty groups and degenerate splits are collapsed afterwards. If the
    /// Main Group ends up empty it is replaced by a fresh empty Main Group in
    /// the same slot. Detached windows are not touched.
    pub fn clear_unpinned(&mut self) -> Vec<Panel> {
        let removed = self.tree.take_unpinned();
        self.tree.collapse_pass();
        let renewed = self.tree.renew_main_if_empty();
        tracing::debug!(
            removed = removed.len(),
            main_renewed = renewed.is_some(),
            "cleared unpinned panels"
        );
        self.settle();
        removed
    }

    /// Closes every window and rebuilds the layout as a root split holding
    /// one fresh Main Group. The root keeps the orientation the layout was
    /// created with.
    ///
    /// Returns the discarded panels and windows for disposal.
    pub fn restore_default_layout(&mut self) -> LayoutReset {
        let windows = self.windows.close_all();
        let panels = self.tree.drain_panels();
        self.tree = SplitTree::with_orientation(self.root_orientation);
        self.active = self.tree.main_id();
        tracing::debug!(
            panels = panels.len(),
            windows = windows.len(),
            "restored default layout"
        );
        self.settle();
        self.events.emit(&LayoutEvent::LayoutReset);
        LayoutReset { panels, windows }
    }

    // ========================================================================
    // Focus
    // ========================================================================

    /// Makes `content` the current tab of its group and that group active.
    ///
    /// # Errors
    ///
    /// Returns `ContentNotFound` if the content is not docked.
    pub fn focus_panel(&mut self, content: ContentId) -> LayoutResult<GroupId> {
        let group = self
            .tree
            .find_content(content)
            .ok_or(LayoutError::ContentNotFound(content))?;
        self.tree.group_mut(group)?.focus(content);
        self.active = group;
        Ok(group)
    }

    /// Returns the current tab of `group`.
    #[must_use]
    pub fn current_panel(&self, group: GroupId) -> Option<&Panel> {
        self.tree.group(group).and_then(TabGroup::current_panel)
    }

    /// Marks `group` as the active group.
    ///
    /// # Errors
    ///
    /// Returns `GroupNotFound` if the group does not exist.
    pub fn set_active_group(&mut self, group: GroupId) -> LayoutResult<()> {
        if self.tree.group(group).is_none() {
            return Err(LayoutError::GroupNotFound(group));
        }
        self.active = group;
        Ok(())
    }

    /// Returns the active group. Falls back to Main when the active group
    /// is removed.
    #[must_use]
    pub const fn active_group(&self) -> GroupId {
        self.active
    }

    // ========================================================================
    // Read Accessors
    // ========================================================================

    /// Returns every group depth-first, left to right.
    #[must_use]
    pub fn all_groups(&self) -> Vec<&TabGroup> {
        self.tree
            .group_ids()
            .into_iter()
            .filter_map(|id| self.tree.group(id))
            .collect()
    }

    /// Returns the Main Group.
    #[must_use]
    pub fn main_group(&self) -> &TabGroup {
        self.tree.main()
    }

    /// Returns a group by ID.
    #[must_use]
    pub fn group(&self, id: GroupId) -> Option<&TabGroup> {
        self.tree.group(id)
    }

    /// Returns a split by ID.
    #[must_use]
    pub fn split(&self, id: SplitId) -> Option<&SplitNode> {
        self.tree.split(id)
    }

    /// Returns the root split.
    #[must_use]
    pub fn root(&self) -> &SplitNode {
        self.tree.root()
    }

    /// Returns the underlying split tree.
    #[must_use]
    pub const fn tree(&self) -> &SplitTree {
        &self.tree
    }

    /// Returns the group hosting `content`.
    #[must_use]
    pub fn group_of(&self, content: ContentId) -> Option<GroupId> {
        self.tree.find_content(content)
    }

    /// Returns the window showing `content`.
    #[must_use]
    pub fn window_of(&self, content: ContentId) -> Option<WindowId> {
        self.windows.find_content(content).map(|w| w.id)
    }

    /// Returns where `content` lives, if anywhere.
    #[must_use]
    pub fn location_of(&self, content: ContentId) -> Option<ContentLocation> {
        self.group_of(content)
            .map(ContentLocation::Docked)
            .or_else(|| self.window_of(content).map(ContentLocation::Detached))
    }

    fn locate(&self, content: ContentId) -> LayoutResult<ContentLocation> {
        self.location_of(content)
            .ok_or(LayoutError::ContentNotFound(content))
    }

    /// Returns true if `content` is docked or detached.
    #[must_use]
    pub fn contains_content(&self, content: ContentId) -> bool {
        self.location_of(content).is_some()
    }

    /// Returns true if a docked panel or a detached window has `title`.
    #[must_use]
    pub fn is_content_open(&self, title: &str) -> bool {
        self.tree.panels().any(|p| p.title == title)
            || self.windows.windows().iter().any(|w| w.title == title)
    }

    /// Returns the number of docked panels.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.tree.panels().count()
    }

    /// Returns the open detached windows in creation order.
    #[must_use]
    pub fn detached_windows(&self) -> &[DetachedWindow] {
        self.windows.windows()
    }

    /// Captures a serialisable description of the current layout.
    #[must_use]
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot::capture(self)
    }

    /// Checks every structural invariant, including that no content is both
    /// docked and detached.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` describing the first broken invariant.
    pub fn validate(&self) -> LayoutResult<()> {
        self.tree.validate()?;
        let mut seen = std::collections::HashSet::new();
        for window in self.windows.windows() {
            if !seen.insert(window.content) || self.tree.find_content(window.content).is_some() {
                return Err(LayoutError::InvariantViolation(format!(
                    "{} placed more than once",
                    window.content
                )));
            }
        }
        if self.tree.group(self.active).is_none() {
            return Err(LayoutError::InvariantViolation(format!(
                "active group {} does not exist",
                self.active
            )));
        }
        Ok(())
    }

    /// Restores invariants after a mutation.
    ///
    /// A violation is a bug: debug builds panic, release builds log it and
    /// run a repair pass.
    fn settle(&mut self) {
        if self.tree.group(self.active).is_none() {
            self.active = self.tree.main_id();
        }
        let result = self.validate();
        debug_assert!(result.is_ok(), "{result:?}");
        if let Err(err) = result {
            tracing::error!(error = %err, "repairing layout");
            self.tree.collapse_pass();
            if self.tree.ensure_main() {
                tracing::error!(main = %self.tree.main_id(), "recreated main group");
            }
            if self.tree.group(self.active).is_none() {
                self.active = self.tree.main_id();
            }
        }
    }
}

impl Default for PanelTree {
    fn default() -> Self {
        Self::new()
    }
}
