//! panelgrid Core Library
//!
//! This crate provides a toolkit-independent tab/panel layout engine in the
//! style of code editors: recursive splits of tab groups with
//! drag-to-reorder, drag-to-split, detach-to-window, pinning and automatic
//! cleanup of empty containers.
//!
//! # Crate Structure
//!
//! - [`layout`] - The layout tree (`PanelTree`), drag sessions and events
//! - [`drag_drop`] - Drop-zone geometry and classification
//! - [`config`] - Settings and persistence
//! - [`tracing`] - Structured logging setup

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod config;
pub mod drag_drop;
pub mod layout;
pub mod tracing;

pub use config::{ConfigError, ConfigManager, ConfigResult, LayoutSettings};
pub use drag_drop::{
    DropAction, DropZone, DropZoneMetrics, Point, Rect, Size, classify_drop_zone,
    classify_drop_zone_with, preview_rect,
};
pub use layout::{
    ContentId, DragSession, DropOutcome, GroupId, LayoutError, LayoutEvent, LayoutResult,
    LayoutSnapshot, LayoutZone, Orientation, Panel, PanelTree, SplitId, Subscription, TabGroup,
    WindowId,
};
pub use tracing::{TracingConfig, TracingError, TracingLevel, TracingOutput, init_tracing};
