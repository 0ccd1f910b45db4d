//! Core type definitions for the panel layout
//!
//! This module contains the identifier newtypes and small enums shared by
//! the tree, the tab groups, the window registry and the drag session.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque handle for a piece of panel content owned by the host UI.
///
/// The layout never owns or inspects the content; it only tracks where the
/// handle currently lives (a tab group or a detached window).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentId(pub Uuid);

impl ContentId {
    /// Creates a new random content ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a content ID from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ContentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Content({})", self.0)
    }
}

/// Unique identifier for a tab group (a leaf of the split tree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub Uuid);

impl GroupId {
    /// Creates a new random group ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Group({})", self.0)
    }
}

/// Unique identifier for a split container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SplitId(pub Uuid);

impl SplitId {
    /// Creates a new random split ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SplitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SplitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Split({})", self.0)
    }
}

/// Unique identifier for a detached window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowId(pub Uuid);

impl WindowId {
    /// Creates a new random window ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WindowId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Window({})", self.0)
    }
}

/// Orientation of a split container.
///
/// A horizontal split lays its children out left to right, a vertical split
/// stacks them top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Children side by side (left to right).
    #[default]
    Horizontal,
    /// Children stacked (top to bottom).
    Vertical,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "Horizontal"),
            Self::Vertical => write!(f, "Vertical"),
        }
    }
}

/// Where a new or moved panel should land relative to an anchor group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutZone {
    /// Add as a tab to the anchor (the Main Group when no anchor is given).
    #[default]
    Default,
    /// New group to the left of the anchor.
    Left,
    /// New group to the right of the anchor.
    Right,
    /// New group above the anchor.
    Top,
    /// New group below the anchor.
    Bottom,
}

impl LayoutZone {
    /// Returns the split orientation this zone requires, `None` for `Default`.
    #[must_use]
    pub const fn orientation(self) -> Option<Orientation> {
        match self {
            Self::Default => None,
            Self::Left | Self::Right => Some(Orientation::Horizontal),
            Self::Top | Self::Bottom => Some(Orientation::Vertical),
        }
    }

    /// Returns true if the new group goes before the anchor in child order.
    #[must_use]
    pub const fn inserts_before(self) -> bool {
        matches!(self, Self::Left | Self::Top)
    }

    /// Returns true for the four edge zones.
    #[must_use]
    pub const fn is_edge(self) -> bool {
        !matches!(self, Self::Default)
    }
}

impl fmt::Display for LayoutZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Default => "default",
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        };
        f.write_str(name)
    }
}

impl FromStr for LayoutZone {
    type Err = super::error::LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" | "tab" | "center" => Ok(Self::Default),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            other => Err(super::error::LayoutError::InvalidZone(other.to_string())),
        }
    }
}

/// A child slot of a split container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    /// A nested split container.
    Split(SplitId),
    /// A tab group leaf.
    Group(GroupId),
}

impl NodeRef {
    /// Returns the group ID if this slot holds a group.
    #[must_use]
    pub const fn as_group(self) -> Option<GroupId> {
        match self {
            Self::Group(id) => Some(id),
            Self::Split(_) => None,
        }
    }

    /// Returns the split ID if this slot holds a split.
    #[must_use]
    pub const fn as_split(self) -> Option<SplitId> {
        match self {
            Self::Split(id) => Some(id),
            Self::Group(_) => None,
        }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Split(id) => id.fmt(f),
            Self::Group(id) => id.fmt(f),
        }
    }
}
