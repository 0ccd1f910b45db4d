//! Error types for layout operations
//!
//! Every fallible `PanelTree` operation returns [`LayoutResult`]. The
//! not-found family never leaves a partial mutation behind: lookups happen
//! before the tree is touched.

use super::types::{ContentId, GroupId, SplitId, WindowId};

/// Errors that can occur during layout operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// The content handle is not docked in any group.
    #[error("content not found: {0}")]
    ContentNotFound(ContentId),

    /// The specified group does not exist in the tree.
    #[error("group not found: {0}")]
    GroupNotFound(GroupId),

    /// The specified split does not exist in the tree.
    #[error("split not found: {0}")]
    SplitNotFound(SplitId),

    /// The specified detached window is not registered.
    #[error("window not found: {0}")]
    WindowNotFound(WindowId),

    /// The content lives in a detached window and cannot be docked twice.
    #[error("content is detached: {0}")]
    ContentDetached(ContentId),

    /// A zone or orientation that cannot be applied to the request.
    #[error("invalid zone: {0}")]
    InvalidZone(String),

    /// A structural invariant of the tree does not hold.
    #[error("layout invariant violated: {0}")]
    InvariantViolation(String),
}

impl LayoutError {
    /// Returns true for the not-found family of errors.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ContentNotFound(_)
                | Self::GroupNotFound(_)
                | Self::SplitNotFound(_)
                | Self::WindowNotFound(_)
        )
    }
}

/// Result type for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;
