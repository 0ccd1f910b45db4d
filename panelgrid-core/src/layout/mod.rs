//! Tab/panel layout engine
//!
//! This module provides the data model and structural operations of a
//! split/tab-group layout: a tree whose interior nodes are splits and whose
//! leaves are tab groups, plus a flat registry of detached windows.
//!
//! # Architecture
//!
//! - **Arena-owned tree**: splits and groups live in maps keyed by ID and
//!   refer to each other by ID
//! - **Permanent Main Group**: the default landing spot for new panels, never
//!   removed even when empty
//! - **Bottom-up collapse**: empty groups are deleted and single-child splits
//!   promote their child
//! - **Synchronous events**: hosts subscribe with RAII tokens
//!
//! # Module Structure
//!
//! - `types` - Identifiers, `Orientation`, `LayoutZone`, `NodeRef`
//! - `group` - Tab groups (`TabGroup`, `Panel`)
//! - `tree` - Split tree arena (`SplitTree`, `SplitNode`)
//! - `window` - Detached windows (`WindowRegistry`, `DetachedWindow`)
//! - `model` - The layout owner (`PanelTree`)
//! - `drag` - Drag sessions (`DragSession`, `DropTargetOracle`)
//! - `events` - Event bus (`LayoutEvent`, `Subscription`)
//! - `snapshot` - Serialisable snapshots (`LayoutSnapshot`)
//! - `error` - Error types (`LayoutError`)
//!
//! # Example
//!
//! ```
//! use panelgrid_core::layout::{ContentId, LayoutZone, PanelTree};
//!
//! let mut tree = PanelTree::new();
//! let content = ContentId::new();
//!
//! tree.add_panel(content, "Terminal", LayoutZone::Default, None).unwrap();
//! tree.set_pinned(content, true).unwrap();
//!
//! // Pinned panels survive a cleanup
//! assert!(tree.clear_unpinned().is_empty());
//! assert!(tree.is_pinned(content));
//! ```

mod drag;
mod error;
mod events;
mod group;
mod model;
mod snapshot;
mod tree;
mod types;
mod window;

pub use drag::{DragSession, DropOutcome, DropTarget, DropTargetOracle, GroupHit};
pub use error::{LayoutError, LayoutResult};
pub use events::{EventBus, LayoutEvent, Subscription};
pub use group::{Panel, TabGroup};
pub use model::{ContentLocation, LayoutReset, PanelTree};
pub use snapshot::{GroupSnapshot, LayoutSnapshot, NodeSnapshot};
pub use tree::{SplitNode, SplitTree, TakenPanel};
pub use types::{ContentId, GroupId, LayoutZone, NodeRef, Orientation, SplitId, WindowId};
pub use window::{DetachedWindow, WindowRegistry};
