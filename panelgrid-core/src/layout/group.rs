//! Tab groups and the panels they host
//!
//! A [`TabGroup`] is a leaf of the split tree: an ordered list of
//! [`Panel`]s with at most one current (visible) tab. Content handles are
//! unique within a group.

use serde::{Deserialize, Serialize};

use super::types::{ContentId, GroupId, SplitId};

/// A single piece of content hosted in a tab group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    /// Host-owned content handle.
    pub content: ContentId,
    /// Tab title.
    pub title: String,
    /// Pinned panels survive `clear_unpinned`.
    pub pinned: bool,
}

impl Panel {
    /// Creates an unpinned panel.
    #[must_use]
    pub fn new(content: ContentId, title: impl Into<String>) -> Self {
        Self {
            content,
            title: title.into(),
            pinned: false,
        }
    }
}

/// A tab group: ordered panels plus the index of the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabGroup {
    id: GroupId,
    pub(crate) parent: SplitId,
    panels: Vec<Panel>,
    current: Option<usize>,
}

impl TabGroup {
    /// Creates an empty group attached to `parent`.
    #[must_use]
    pub fn new(parent: SplitId) -> Self {
        Self {
            id: GroupId::new(),
            parent,
            panels: Vec::new(),
            current: None,
        }
    }

    /// Creates a group holding a single (current) panel.
    #[must_use]
    pub fn with_panel(parent: SplitId, panel: Panel) -> Self {
        Self {
            id: GroupId::new(),
            parent,
            panels: vec![panel],
            current: Some(0),
        }
    }

    /// Returns the group ID.
    #[must_use]
    pub const fn id(&self) -> GroupId {
        self.id
    }

    /// Returns the split that owns this group.
    #[must_use]
    pub const fn parent(&self) -> SplitId {
        self.parent
    }

    /// Returns the panels in tab order.
    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Returns the number of tabs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Returns true if the group has no tabs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Returns the index of the current tab.
    #[must_use]
    pub const fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Returns the current tab.
    #[must_use]
    pub fn current_panel(&self) -> Option<&Panel> {
        self.current.and_then(|idx| self.panels.get(idx))
    }

    /// Returns the tab index of `content`.
    #[must_use]
    pub fn position(&self, content: ContentId) -> Option<usize> {
        self.panels.iter().position(|p| p.content == content)
    }

    /// Returns true if `content` is one of this group's tabs.
    #[must_use]
    pub fn contains(&self, content: ContentId) -> bool {
        self.position(content).is_some()
    }

    /// Returns the panel for `content`.
    #[must_use]
    pub fn panel(&self, content: ContentId) -> Option<&Panel> {
        self.panels.iter().find(|p| p.content == content)
    }

    pub(crate) fn panel_mut(&mut self, content: ContentId) -> Option<&mut Panel> {
        self.panels.iter_mut().find(|p| p.content == content)
    }

    /// Inserts a panel at `index` (clamped to the tab count) and makes it
    /// current. Returns the index it landed at.
    pub(crate) fn insert(&mut self, index: usize, panel: Panel) -> usize {
        debug_assert!(!self.contains(panel.content), "duplicate content in group");
        let index = index.min(self.panels.len());
        self.panels.insert(index, panel);
        self.current = Some(index);
        index
    }

    /// Appends a panel and makes it current.
    pub(crate) fn push(&mut self, panel: Panel) -> usize {
        self.insert(self.panels.len(), panel)
    }

    /// Removes the tab for `content`.
    ///
    /// When the current tab is removed, the tab that slides into its index
    /// becomes current (or the new last tab).
    pub(crate) fn remove(&mut self, content: ContentId) -> Option<Panel> {
        let index = self.position(content)?;
        let panel = self.panels.remove(index);
        self.current = match self.current {
            _ if self.panels.is_empty() => None,
            Some(cur) if cur > index => Some(cur - 1),
            Some(cur) if cur == index => Some(index.min(self.panels.len() - 1)),
            other => other,
        };
        Some(panel)
    }

    /// Makes `content` the current tab.
    pub(crate) fn focus(&mut self, content: ContentId) -> bool {
        match self.position(content) {
            Some(idx) => {
                self.current = Some(idx);
                true
            }
            None => false,
        }
    }

    /// Removes every unpinned tab and returns them in tab order.
    ///
    /// The current tab stays current if it was pinned; otherwise the first
    /// surviving tab at or before its old index takes over.
    pub(crate) fn take_unpinned(&mut self) -> Vec<Panel> {
        let current_content = self.current_panel().map(|p| p.content);
        let old_current = self.current;
        let (kept, removed): (Vec<Panel>, Vec<Panel>) =
            std::mem::take(&mut self.panels).into_iter().partition(|p| p.pinned);
        self.panels = kept;

        self.current = if self.panels.is_empty() {
            None
        } else if let Some(idx) = current_content.and_then(|c| self.position(c)) {
            Some(idx)
        } else {
            old_current.map(|idx| idx.min(self.panels.len() - 1))
        };
        removed
    }

    /// Drops every tab and returns them.
    pub(crate) fn take_all(&mut self) -> Vec<Panel> {
        self.current = None;
        std::mem::take(&mut self.panels)
    }
}
