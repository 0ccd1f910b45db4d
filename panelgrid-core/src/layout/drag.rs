//! Drag-and-drop sessions
//!
//! A drag is a short synchronous sequence: [`DragSession::begin`] when the
//! tab is picked up, any number of read-only [`DragSession::hover`] calls
//! while the pointer moves, then either [`DragSession::drop_at`] or
//! [`DragSession::cancel`]. Only `drop_at` mutates the tree, and only when
//! the drop lands on a valid zone of an existing group.
//!
//! Hit testing belongs to the host, which implements [`DropTargetOracle`]
//! with its toolkit's geometry.

use crate::drag_drop::{DropAction, DropZone, DropZoneMetrics, Point, Size, classify_drop_zone_with};

use super::error::{LayoutError, LayoutResult};
use super::model::{ContentLocation, PanelTree};
use super::types::{ContentId, GroupId};

/// The group under a screen point, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupHit {
    /// Group under the pointer.
    pub group: GroupId,
    /// Size of the group's content area.
    pub size: Size,
    /// Pointer position relative to the group's top-left corner.
    pub local: Point,
    /// Tab slot under the pointer when hovering the tab bar.
    pub tab_index: Option<usize>,
}

impl GroupHit {
    /// Creates a hit outside the tab bar.
    #[must_use]
    pub const fn new(group: GroupId, size: Size, local: Point) -> Self {
        Self {
            group,
            size,
            local,
            tab_index: None,
        }
    }
}

/// Host-side hit testing.
pub trait DropTargetOracle {
    /// Returns the group under `screen`, if any.
    fn group_at(&self, screen: Point) -> Option<GroupHit>;
}

impl<F> DropTargetOracle for F
where
    F: Fn(Point) -> Option<GroupHit>,
{
    fn group_at(&self, screen: Point) -> Option<GroupHit> {
        self(screen)
    }
}

/// Where a drop would land, used to paint the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    /// Target group.
    pub group: GroupId,
    /// Zone within the target.
    pub zone: DropZone,
    /// Tab slot when hovering the tab bar.
    pub tab_index: Option<usize>,
}

/// Result of finishing a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Nothing changed.
    Cancelled,
    /// The panel became a tab of `group`.
    Tabbed {
        /// Group now hosting the panel.
        group: GroupId,
    },
    /// The panel got a new group next to the target.
    Split {
        /// The newly created group.
        group: GroupId,
    },
}

/// An in-progress tab drag.
#[derive(Debug, Clone)]
pub struct DragSession {
    content: ContentId,
    origin: ContentLocation,
    metrics: DropZoneMetrics,
}

impl DragSession {
    /// Starts dragging `content`.
    ///
    /// # Errors
    ///
    /// Returns `ContentNotFound` if the content is neither docked nor
    /// detached.
    pub fn begin(tree: &PanelTree, content: ContentId) -> LayoutResult<Self> {
        let origin = tree
            .location_of(content)
            .ok_or(LayoutError::ContentNotFound(content))?;
        tracing::trace!(%content, ?origin, "drag started");
        Ok(Self {
            content,
            origin,
            metrics: DropZoneMetrics::default(),
        })
    }

    /// Uses `metrics` instead of the default drop-zone geometry.
    #[must_use]
    pub const fn with_metrics(mut self, metrics: DropZoneMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Returns the dragged content.
    #[must_use]
    pub const fn content(&self) -> ContentId {
        self.content
    }

    /// Returns where the drag started.
    #[must_use]
    pub const fn origin(&self) -> ContentLocation {
        self.origin
    }

    /// Resolves the drop target under `screen` without touching the tree.
    ///
    /// Returns `None` when no existing group is under the pointer or the
    /// point classifies as `DropZone::None`.
    #[must_use]
    pub fn hover(
        &self,
        tree: &PanelTree,
        oracle: &impl DropTargetOracle,
        screen: Point,
    ) -> Option<DropTarget> {
        let hit = oracle.group_at(screen)?;
        tree.group(hit.group)?;
        let zone = if hit.tab_index.is_some() {
            DropZone::Center
        } else {
            classify_drop_zone_with(&self.metrics, hit.size, hit.local)
        };
        (zone != DropZone::None).then_some(DropTarget {
            group: hit.group,
            zone,
            tab_index: hit.tab_index,
        })
    }

    /// Finishes the drag at `screen`.
    ///
    /// A drop outside every group, on `DropZone::None`, or for content that
    /// moved since the drag began leaves the tree unchanged. A drop on the
    /// body of the group already hosting the tab only focuses it; reordering
    /// needs a tab-bar slot.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying move.
    pub fn drop_at(
        self,
        tree: &mut PanelTree,
        oracle: &impl DropTargetOracle,
        screen: Point,
    ) -> LayoutResult<DropOutcome> {
        if tree.location_of(self.content) != Some(self.origin) {
            tracing::warn!(content = %self.content, "drag origin is stale, dropping nothing");
            return Ok(DropOutcome::Cancelled);
        }
        let Some(target) = self.hover(tree, oracle, screen) else {
            tracing::debug!(content = %self.content, x = screen.x, y = screen.y, "drop outside any group");
            return Ok(DropOutcome::Cancelled);
        };

        match target.zone.action() {
            DropAction::Ignore => Ok(DropOutcome::Cancelled),
            DropAction::AddTab => match target.tab_index {
                Some(index) => {
                    let group = tree.reattach_from_drag(self.content, target.group, index)?;
                    Ok(DropOutcome::Tabbed { group })
                }
                // Body drop on the group already hosting the tab only focuses it
                None if self.origin == ContentLocation::Docked(target.group) => {
                    let group = tree.focus_panel(self.content)?;
                    tracing::debug!(content = %self.content, %group, "body drop on own group, focused tab");
                    Ok(DropOutcome::Tabbed { group })
                }
                None => {
                    let group =
                        tree.reattach_from_drag(self.content, target.group, usize::MAX)?;
                    Ok(DropOutcome::Tabbed { group })
                }
            },
            DropAction::Split(zone) => {
                let group = tree.move_to_split(self.content, target.group, zone)?;
                Ok(DropOutcome::Split { group })
            }
        }
    }

    /// Abandons the drag. The tree is not touched.
    pub fn cancel(self) {
        tracing::trace!(content = %self.content, "drag cancelled");
    }
}
