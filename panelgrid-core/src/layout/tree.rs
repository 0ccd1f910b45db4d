//! Split tree structure for panel layouts
//!
//! This module provides the arena that owns every split container and tab
//! group of a layout. Splits are interior nodes with an orientation and an
//! ordered list of children; tab groups are the leaves.
//!
//! # Tree Structure
//!
//! ```text
//! Split(Horizontal)            <- root, never collapsed
//! ├── Group A
//! └── Split(Vertical)
//!     ├── Group B (main)
//!     └── Group C
//! ```
//!
//! Nodes reference each other by ID. Every node except the root records its
//! parent so that emptiness can be propagated bottom-up.

use std::collections::{HashMap, HashSet};

use super::error::{LayoutError, LayoutResult};
use super::group::{Panel, TabGroup};
use super::types::{ContentId, GroupId, LayoutZone, NodeRef, Orientation, SplitId};

/// An interior node of the split tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitNode {
    id: SplitId,
    orientation: Orientation,
    pub(crate) children: Vec<NodeRef>,
    pub(crate) parent: Option<SplitId>,
}

impl SplitNode {
    fn new(orientation: Orientation, parent: Option<SplitId>) -> Self {
        Self {
            id: SplitId::new(),
            orientation,
            children: Vec::new(),
            parent,
        }
    }

    /// Returns the split ID.
    #[must_use]
    pub const fn id(&self) -> SplitId {
        self.id
    }

    /// Returns the split orientation.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns the children in layout order.
    #[must_use]
    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }

    /// Returns the parent split, `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<SplitId> {
        self.parent
    }
}

/// Arena owning the splits and tab groups of one layout.
#[derive(Debug, Clone)]
pub struct SplitTree {
    root: SplitId,
    main: GroupId,
    splits: HashMap<SplitId, SplitNode>,
    groups: HashMap<GroupId, TabGroup>,
}

/// A panel taken out of the tree, with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TakenPanel {
    /// The removed panel.
    pub panel: Panel,
    /// Group the panel was removed from.
    pub group: GroupId,
    /// Tab index the panel occupied.
    pub index: usize,
    /// True if the group became empty and was deleted.
    pub group_removed: bool,
}

impl SplitTree {
    /// Creates a tree with a horizontal root holding one empty Main Group.
    #[must_use]
    pub fn new() -> Self {
        Self::with_orientation(Orientation::Horizontal)
    }

    /// Creates a tree whose root split has the given orientation.
    #[must_use]
    pub fn with_orientation(orientation: Orientation) -> Self {
        let mut root = SplitNode::new(orientation, None);
        let main = TabGroup::new(root.id);
        root.children.push(NodeRef::Group(main.id()));

        let root_id = root.id;
        let main_id = main.id();
        Self {
            root: root_id,
            main: main_id,
            splits: HashMap::from([(root_id, root)]),
            groups: HashMap::from([(main_id, main)]),
        }
    }

    /// Returns the root split ID.
    #[must_use]
    pub const fn root_id(&self) -> SplitId {
        self.root
    }

    /// Returns the root split.
    #[must_use]
    pub fn root(&self) -> &SplitNode {
        &self.splits[&self.root]
    }

    /// Returns the Main Group ID.
    #[must_use]
    pub const fn main_id(&self) -> GroupId {
        self.main
    }

    /// Returns the Main Group.
    #[must_use]
    pub fn main(&self) -> &TabGroup {
        &self.groups[&self.main]
    }

    /// Returns a group by ID.
    #[must_use]
    pub fn group(&self, id: GroupId) -> Option<&TabGroup> {
        self.groups.get(&id)
    }

    pub(crate) fn group_mut(&mut self, id: GroupId) -> LayoutResult<&mut TabGroup> {
        self.groups.get_mut(&id).ok_or(LayoutError::GroupNotFound(id))
    }

    /// Returns a split by ID.
    #[must_use]
    pub fn split(&self, id: SplitId) -> Option<&SplitNode> {
        self.splits.get(&id)
    }

    fn split_mut(&mut self, id: SplitId) -> LayoutResult<&mut SplitNode> {
        self.splits.get_mut(&id).ok_or(LayoutError::SplitNotFound(id))
    }

    /// Returns the number of tab groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Returns the number of splits, root included.
    #[must_use]
    pub fn split_count(&self) -> usize {
        self.splits.len()
    }

    // ========================================================================
    // Tree Traversal Methods
    // ========================================================================

    /// Returns all group IDs depth-first, left to right.
    #[must_use]
    pub fn group_ids(&self) -> Vec<GroupId> {
        let mut ids = Vec::with_capacity(self.groups.len());
        self.collect_groups(NodeRef::Split(self.root), &mut ids);
        ids
    }

    fn collect_groups(&self, node: NodeRef, ids: &mut Vec<GroupId>) {
        match node {
            NodeRef::Group(id) => ids.push(id),
            NodeRef::Split(id) => {
                if let Some(split) = self.splits.get(&id) {
                    for child in &split.children {
                        self.collect_groups(*child, ids);
                    }
                }
            }
        }
    }

    /// Returns all split IDs in post-order (children before parents).
    #[must_use]
    pub fn split_ids_post_order(&self) -> Vec<SplitId> {
        let mut ids = Vec::with_capacity(self.splits.len());
        self.collect_splits_post_order(self.root, &mut ids);
        ids
    }

    fn collect_splits_post_order(&self, id: SplitId, ids: &mut Vec<SplitId>) {
        if let Some(split) = self.splits.get(&id) {
            for child in &split.children {
                if let NodeRef::Split(child_id) = child {
                    self.collect_splits_post_order(*child_id, ids);
                }
            }
            ids.push(id);
        }
    }

    /// Returns the depth of the tree. A root holding only groups has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth_of(self.root)
    }

    fn depth_of(&self, id: SplitId) -> usize {
        self.splits.get(&id).map_or(0, |split| {
            1 + split
                .children
                .iter()
                .filter_map(|c| c.as_split())
                .map(|c| self.depth_of(c))
                .max()
                .unwrap_or(0)
        })
    }

    /// Returns the group hosting `content`.
    #[must_use]
    pub fn find_content(&self, content: ContentId) -> Option<GroupId> {
        self.groups
            .values()
            .find(|g| g.contains(content))
            .map(TabGroup::id)
    }

    /// Iterates over every docked panel, in no particular order.
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.groups.values().flat_map(|g| g.panels().iter())
    }

    pub(crate) fn panel_mut(&mut self, content: ContentId) -> Option<&mut Panel> {
        self.groups
            .values_mut()
            .find_map(|g| g.panel_mut(content))
    }

    fn parent_of(&self, node: NodeRef) -> Option<SplitId> {
        match node {
            NodeRef::Group(id) => self.groups.get(&id).map(TabGroup::parent),
            NodeRef::Split(id) => self.splits.get(&id).and_then(SplitNode::parent),
        }
    }

    fn set_parent(&mut self, node: NodeRef, parent: SplitId) {
        match node {
            NodeRef::Group(id) => {
                if let Some(group) = self.groups.get_mut(&id) {
                    group.parent = parent;
                }
            }
            NodeRef::Split(id) => {
                if let Some(split) = self.splits.get_mut(&id) {
                    split.parent = Some(parent);
                }
            }
        }
    }

    fn index_in_parent(&self, node: NodeRef) -> LayoutResult<(SplitId, usize)> {
        let parent = self.parent_of(node).ok_or_else(|| {
            LayoutError::InvariantViolation(format!("{node} has no parent"))
        })?;
        let index = self
            .splits
            .get(&parent)
            .and_then(|s| s.children.iter().position(|c| *c == node))
            .ok_or_else(|| {
                LayoutError::InvariantViolation(format!("{node} missing from its parent {parent}"))
            })?;
        Ok((parent, index))
    }

    // ========================================================================
    // Tree Mutation Methods
    // ========================================================================

    /// Creates a new group holding `panel` next to `anchor`.
    ///
    /// If the anchor's parent already has the orientation the zone needs,
    /// the group is inserted directly before (Left/Top) or after
    /// (Right/Bottom) the anchor. Otherwise a new split with that
    /// orientation takes the anchor's slot and holds the anchor and the new
    /// group in zone order.
    ///
    /// # Errors
    ///
    /// - `InvalidZone` for `LayoutZone::Default`
    /// - `GroupNotFound` if the anchor does not exist
    pub fn split_around(
        &mut self,
        anchor: GroupId,
        zone: LayoutZone,
        panel: Panel,
    ) -> LayoutResult<GroupId> {
        let orientation = zone
            .orientation()
            .ok_or_else(|| LayoutError::InvalidZone(format!("cannot split around {zone}")))?;
        if !self.groups.contains_key(&anchor) {
            return Err(LayoutError::GroupNotFound(anchor));
        }
        let anchor_node = NodeRef::Group(anchor);
        let (parent_id, anchor_index) = self.index_in_parent(anchor_node)?;
        let parent_orientation = self.split_mut(parent_id)?.orientation;
        let before = zone.inserts_before();

        if parent_orientation == orientation {
            let group = TabGroup::with_panel(parent_id, panel);
            let group_id = group.id();
            let at = if before { anchor_index } else { anchor_index + 1 };
            self.split_mut(parent_id)?
                .children
                .insert(at, NodeRef::Group(group_id));
            self.groups.insert(group_id, group);
            tracing::debug!(
                anchor = %anchor,
                group = %group_id,
                %zone,
                "inserted group into existing split"
            );
            return Ok(group_id);
        }

        let mut split = SplitNode::new(orientation, Some(parent_id));
        let group = TabGroup::with_panel(split.id, panel);
        let group_id = group.id();
        let new_node = NodeRef::Group(group_id);
        split.children = if before {
            vec![new_node, anchor_node]
        } else {
            vec![anchor_node, new_node]
        };

        let split_id = split.id;
        self.split_mut(parent_id)?.children[anchor_index] = NodeRef::Split(split_id);
        self.set_parent(anchor_node, split_id);
        self.splits.insert(split_id, split);
        self.groups.insert(group_id, group);
        tracing::debug!(
            anchor = %anchor,
            group = %group_id,
            split = %split_id,
            %orientation,
            "wrapped anchor in new split"
        );
        Ok(group_id)
    }

    /// Removes `content` from whichever group hosts it.
    ///
    /// An ordinary group left empty is deleted and its parent collapse
    /// checked. The Main Group is kept even when empty.
    pub fn take_panel(&mut self, content: ContentId) -> LayoutResult<TakenPanel> {
        let group_id = self
            .find_content(content)
            .ok_or(LayoutError::ContentNotFound(content))?;
        let group = self.group_mut(group_id)?;
        let index = group
            .position(content)
            .ok_or(LayoutError::ContentNotFound(content))?;
        let panel = group
            .remove(content)
            .ok_or(LayoutError::ContentNotFound(content))?;
        let group_removed = group.is_empty() && group_id != self.main;

        if group_removed {
            self.remove_group(group_id);
        }
        Ok(TakenPanel {
            panel,
            group: group_id,
            index,
            group_removed,
        })
    }

    /// Deletes an ordinary group and collapse-checks its parent.
    ///
    /// The Main Group is never removed.
    pub(crate) fn remove_group(&mut self, id: GroupId) {
        if id == self.main {
            return;
        }
        if let Some(parent) = self.unlink_group(id) {
            self.collapse_split(parent);
        }
    }

    fn unlink_group(&mut self, id: GroupId) -> Option<SplitId> {
        let group = self.groups.remove(&id)?;
        let parent = group.parent();
        if let Some(split) = self.splits.get_mut(&parent) {
            split.children.retain(|c| *c != NodeRef::Group(id));
        }
        tracing::debug!(group = %id, parent = %parent, "removed empty group");
        Some(parent)
    }

    /// Collapses a split that has fewer than two children.
    ///
    /// An empty split is removed from its parent; a split with a single
    /// child is replaced in its parent's slot by that child. Both cases
    /// recurse into the parent. The root is never collapsed.
    pub fn collapse_split(&mut self, id: SplitId) {
        if id == self.root {
            return;
        }
        let Some(split) = self.splits.get(&id) else {
            return;
        };
        let Some(parent) = split.parent else {
            return;
        };
        let children = split.children.clone();

        match children.as_slice() {
            [] => {
                self.splits.remove(&id);
                if let Some(parent_split) = self.splits.get_mut(&parent) {
                    parent_split.children.retain(|c| *c != NodeRef::Split(id));
                }
                tracing::debug!(split = %id, "removed empty split");
                self.collapse_split(parent);
            }
            [only] => {
                let child = *only;
                self.splits.remove(&id);
                if let Some(parent_split) = self.splits.get_mut(&parent) {
                    for slot in &mut parent_split.children {
                        if *slot == NodeRef::Split(id) {
                            *slot = child;
                        }
                    }
                }
                self.set_parent(child, parent);
                tracing::debug!(split = %id, promoted = %child, "collapsed single-child split");
                self.collapse_split(parent);
            }
            _ => {}
        }
    }

    /// Tree-wide cleanup: deletes empty ordinary groups, then collapses
    /// splits bottom-up.
    pub fn collapse_pass(&mut self) {
        let main = self.main;
        let mut empty: Vec<GroupId> = self
            .groups
            .values()
            .filter(|g| g.is_empty() && g.id() != main)
            .map(TabGroup::id)
            .collect();
        empty.sort_by_key(|id| id.0);
        for id in empty {
            self.unlink_group(id);
        }

        for id in self.split_ids_post_order() {
            if self.splits.contains_key(&id) {
                self.collapse_split(id);
            }
        }
    }

    /// Replaces an empty Main Group with a fresh one in the same slot.
    ///
    /// Returns the ID of the retired group, or `None` if Main had panels.
    pub fn renew_main_if_empty(&mut self) -> Option<GroupId> {
        let old = self.groups.get(&self.main)?;
        if !old.is_empty() {
            return None;
        }
        let old_id = old.id();
        let parent = old.parent();
        let fresh = TabGroup::new(parent);
        let fresh_id = fresh.id();

        let split = self.splits.get_mut(&parent)?;
        for slot in &mut split.children {
            if *slot == NodeRef::Group(old_id) {
                *slot = NodeRef::Group(fresh_id);
            }
        }
        self.groups.remove(&old_id);
        self.groups.insert(fresh_id, fresh);
        self.main = fresh_id;
        tracing::debug!(old = %old_id, new = %fresh_id, "renewed empty main group");
        Some(old_id)
    }

    /// Makes sure a Main Group exists and is reachable from the root.
    ///
    /// Returns true if a new Main Group had to be created.
    pub fn ensure_main(&mut self) -> bool {
        if self.group_ids().contains(&self.main) {
            return false;
        }
        if let Some(stale) = self.groups.remove(&self.main) {
            tracing::warn!(group = %stale.id(), "dropping unreachable main group");
        }
        let root = self.root;
        let main = TabGroup::new(root);
        let main_id = main.id();
        self.groups.insert(main_id, main);
        if let Some(split) = self.splits.get_mut(&root) {
            split.children.push(NodeRef::Group(main_id));
        }
        self.main = main_id;
        true
    }

    /// Drains every group and returns their panels in layout order.
    pub fn drain_panels(&mut self) -> Vec<Panel> {
        let order = self.group_ids();
        let mut panels = Vec::new();
        for id in order {
            if let Some(group) = self.groups.get_mut(&id) {
                panels.extend(group.take_all());
            }
        }
        panels
    }

    /// Removes every unpinned panel from every group, in layout order.
    pub fn take_unpinned(&mut self) -> Vec<Panel> {
        let order = self.group_ids();
        let mut panels = Vec::new();
        for id in order {
            if let Some(group) = self.groups.get_mut(&id) {
                panels.extend(group.take_unpinned());
            }
        }
        panels
    }

    // ========================================================================
    // Invariants
    // ========================================================================

    /// Checks every structural invariant of the tree.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` describing the first broken invariant.
    pub fn validate(&self) -> LayoutResult<()> {
        let violation = |msg: String| Err(LayoutError::InvariantViolation(msg));

        let root = match self.splits.get(&self.root) {
            Some(root) => root,
            None => return violation("root split missing".into()),
        };
        if root.parent.is_some() {
            return violation("root split has a parent".into());
        }

        let mut seen_splits = HashSet::new();
        let mut seen_groups = HashSet::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if !seen_splits.insert(id) {
                return violation(format!("{id} reachable twice"));
            }
            let Some(split) = self.splits.get(&id) else {
                return violation(format!("{id} referenced but missing"));
            };
            if id != self.root && split.children.len() < 2 {
                return violation(format!(
                    "{id} has {} children but is not the root",
                    split.children.len()
                ));
            }
            for child in &split.children {
                if self.parent_of(*child) != Some(id) {
                    return violation(format!("{child} has wrong parent (expected {id})"));
                }
                match child {
                    NodeRef::Split(child_id) => stack.push(*child_id),
                    NodeRef::Group(group_id) => {
                        if !seen_groups.insert(*group_id) {
                            return violation(format!("{group_id} reachable twice"));
                        }
                    }
                }
            }
        }

        if seen_splits.len() != self.splits.len() {
            return violation("unreachable split in arena".into());
        }
        if seen_groups.len() != self.groups.len() {
            return violation("unreachable group in arena".into());
        }
        if !seen_groups.contains(&self.main) {
            return violation("main group is not reachable".into());
        }

        let mut contents = HashSet::new();
        for group in self.groups.values() {
            if group.is_empty() && group.id() != self.main {
                return violation(format!("{} is empty", group.id()));
            }
            match group.current_index() {
                None if !group.is_empty() => {
                    return violation(format!("{} has tabs but no current tab", group.id()));
                }
                Some(idx) if idx >= group.len() => {
                    return violation(format!("{} current index out of range", group.id()));
                }
                _ => {}
            }
            for panel in group.panels() {
                if !contents.insert(panel.content) {
                    return violation(format!("{} docked twice", panel.content));
                }
            }
        }
        Ok(())
    }
}

impl Default for SplitTree {
    fn default() -> Self {
        Self::new()
    }
}
