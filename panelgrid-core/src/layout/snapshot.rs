//! Serialisable layout snapshots
//!
//! A [`LayoutSnapshot`] is a read-only copy of a layout's structure, used
//! for display, JSON export and comparing layouts in tests. It is never fed
//! back into a `PanelTree`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::group::Panel;
use super::model::PanelTree;
use super::types::{GroupId, NodeRef, Orientation, SplitId};
use super::window::DetachedWindow;

/// Snapshot of a whole layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    /// The root split.
    pub root: NodeSnapshot,
    /// Main Group ID.
    pub main: GroupId,
    /// Active group ID.
    pub active: GroupId,
    /// Detached windows in creation order.
    pub windows: Vec<DetachedWindow>,
}

/// Snapshot of one node of the split tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeSnapshot {
    /// A split container.
    Split {
        /// Split ID.
        id: SplitId,
        /// Layout direction.
        orientation: Orientation,
        /// Children in layout order.
        children: Vec<NodeSnapshot>,
    },
    /// A tab group.
    Group(GroupSnapshot),
}

/// Snapshot of a tab group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    /// Group ID.
    pub id: GroupId,
    /// Index of the current tab.
    pub current: Option<usize>,
    /// Tabs in order.
    pub panels: Vec<Panel>,
}

impl LayoutSnapshot {
    /// Captures the current state of `tree`.
    #[must_use]
    pub fn capture(tree: &PanelTree) -> Self {
        Self {
            root: capture_node(tree, NodeRef::Split(tree.root().id())),
            main: tree.main_group().id(),
            active: tree.active_group(),
            windows: tree.detached_windows().to_vec(),
        }
    }

    /// Returns the number of groups in the snapshot.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.root.group_count()
    }

    /// Serialises the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn capture_node(tree: &PanelTree, node: NodeRef) -> NodeSnapshot {
    match node {
        NodeRef::Group(id) => {
            let (current, panels) = tree
                .group(id)
                .map(|g| (g.current_index(), g.panels().to_vec()))
                .unwrap_or_default();
            NodeSnapshot::Group(GroupSnapshot {
                id,
                current,
                panels,
            })
        }
        NodeRef::Split(id) => {
            let (orientation, children) = tree
                .split(id)
                .map(|s| {
                    (
                        s.orientation(),
                        s.children()
                            .iter()
                            .map(|c| capture_node(tree, *c))
                            .collect(),
                    )
                })
                .unwrap_or_default();
            NodeSnapshot::Split {
                id,
                orientation,
                children,
            }
        }
    }
}

impl NodeSnapshot {
    fn group_count(&self) -> usize {
        match self {
            Self::Group(_) => 1,
            Self::Split { children, .. } => children.iter().map(Self::group_count).sum(),
        }
    }

    fn write_tree(
        &self,
        f: &mut fmt::Formatter<'_>,
        depth: usize,
        layout: &LayoutSnapshot,
    ) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            Self::Split {
                orientation,
                children,
                ..
            } => {
                writeln!(f, "{indent}Split {orientation}")?;
                for child in children {
                    child.write_tree(f, depth + 1, layout)?;
                }
            }
            Self::Group(group) => {
                write!(f, "{indent}Group")?;
                if group.id == layout.main {
                    write!(f, " main")?;
                }
                if group.id == layout.active {
                    write!(f, " active")?;
                }
                writeln!(f)?;
                for (index, panel) in group.panels.iter().enumerate() {
                    let marker = if group.current == Some(index) { '>' } else { '-' };
                    write!(f, "{indent}  {marker} {:?}", panel.title)?;
                    if panel.pinned {
                        write!(f, " [pinned]")?;
                    }
                    writeln!(f)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for LayoutSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.write_tree(f, 0, self)?;
        for window in &self.windows {
            writeln!(f, "Window {:?}", window.title)?;
        }
        Ok(())
    }
}
