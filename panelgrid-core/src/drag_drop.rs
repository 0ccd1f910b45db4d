//! Drop-zone model for tab drag-and-drop
//!
//! This module provides the pure geometry behind drag-to-split: given the
//! size of a tab group and a point inside it, decide which drop zone the
//! point falls in. It has no UI dependencies so the rules can be
//! property-tested directly.
//!
//! # Zones
//!
//! ```text
//! +---------------------------+
//! |          Top              |
//! |---+-------------------+---|
//! |   |       Full        |   |
//! | L |   +-----------+   | R |
//! |   |   |  Center   |   |   |
//! |   |   +-----------+   |   |
//! |---+-------------------+---|
//! |         Bottom            |
//! +---------------------------+
//! ```
//!
//! Edges win over the center and are tested in the order Left, Right, Top,
//! Bottom, so corners belong to the left and right edges.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::layout::LayoutZone;

/// Width and height of a tab group, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Size {
    /// Creates a size.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns the shorter side.
    #[must_use]
    pub fn min_side(self) -> i32 {
        self.width.min(self.height)
    }
}

/// A point in pixels, relative to the top-left corner of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal offset.
    pub x: i32,
    /// Vertical offset.
    pub y: i32,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle used for drop previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Creates a rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Classification of a drag-release point relative to a tab group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropZone {
    /// Outside the group.
    #[default]
    None,
    /// Inside the group but neither on an edge nor in the center.
    Full,
    /// Near the left border.
    Left,
    /// Near the right border.
    Right,
    /// Near the top border.
    Top,
    /// Near the bottom border.
    Bottom,
    /// Inside the centered rectangle.
    Center,
}

/// What a drop in a given zone does to the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropAction {
    /// Nothing happens.
    Ignore,
    /// The panel becomes a tab of the target group.
    AddTab,
    /// The panel gets a new group split next to the target.
    Split(LayoutZone),
}

impl DropZone {
    /// Maps the zone to the layout action it triggers.
    ///
    /// `Center` and `Full` both add a tab; `Full` is only a stronger visual
    /// affordance.
    #[must_use]
    pub const fn action(self) -> DropAction {
        match self {
            Self::None => DropAction::Ignore,
            Self::Full | Self::Center => DropAction::AddTab,
            Self::Left => DropAction::Split(LayoutZone::Left),
            Self::Right => DropAction::Split(LayoutZone::Right),
            Self::Top => DropAction::Split(LayoutZone::Top),
            Self::Bottom => DropAction::Split(LayoutZone::Bottom),
        }
    }

    /// Returns true for the four edge zones.
    #[must_use]
    pub const fn is_edge(self) -> bool {
        matches!(self, Self::Left | Self::Right | Self::Top | Self::Bottom)
    }
}

impl fmt::Display for DropZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Full => "full",
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Center => "center",
        };
        f.write_str(name)
    }
}

/// Constants of the drop-zone geometry.
///
/// `edge = clamp(min(w, h) / edge_divisor, edge_min, edge_max)` and
/// `center = clamp(min(w, h) / center_divisor, center_min, center_max)`,
/// in integer arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropZoneMetrics {
    /// Smallest edge band width.
    pub edge_min: i32,
    /// Largest edge band width.
    pub edge_max: i32,
    /// Divisor applied to the shorter side for the edge band.
    pub edge_divisor: i32,
    /// Smallest center inset.
    pub center_min: i32,
    /// Largest center inset.
    pub center_max: i32,
    /// Divisor applied to the shorter side for the center inset.
    pub center_divisor: i32,
}

impl Default for DropZoneMetrics {
    fn default() -> Self {
        Self {
            edge_min: 16,
            edge_max: 100,
            edge_divisor: 4,
            center_min: 24,
            center_max: 150,
            center_divisor: 3,
        }
    }
}

impl DropZoneMetrics {
    /// Width of the edge bands for a group of `size`.
    #[must_use]
    pub fn edge(&self, size: Size) -> i32 {
        clamp_band(size.min_side(), self.edge_divisor, self.edge_min, self.edge_max)
    }

    /// Inset of the center rectangle for a group of `size`.
    #[must_use]
    pub fn center(&self, size: Size) -> i32 {
        clamp_band(
            size.min_side(),
            self.center_divisor,
            self.center_min,
            self.center_max,
        )
    }

    /// Returns true if the divisors are positive, the minimums are not
    /// negative and each band has `min <= max`.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.edge_divisor > 0
            && self.center_divisor > 0
            && self.edge_min >= 0
            && self.center_min >= 0
            && self.edge_min <= self.edge_max
            && self.center_min <= self.center_max
    }
}

/// `min(max, max(min, side / divisor))`; a non-positive divisor yields `min`.
fn clamp_band(side: i32, divisor: i32, min: i32, max: i32) -> i32 {
    let raw = if divisor > 0 { side / divisor } else { min };
    raw.max(min).min(max)
}

/// Classifies `point` inside a group of `size` with the default metrics.
#[must_use]
pub fn classify_drop_zone(size: Size, point: Point) -> DropZone {
    classify_drop_zone_with(&DropZoneMetrics::default(), size, point)
}

/// Classifies `point` inside a group of `size`.
///
/// # Arguments
/// * `metrics` - Band constants
/// * `size` - Group size
/// * `point` - Point relative to the group's top-left corner
///
/// # Returns
/// `None` outside `[0, w) x [0, h)`, an edge zone within `edge` of a border
/// (Left, Right, Top, Bottom priority), `Center` inside the rectangle inset
/// by `center`, otherwise `Full`.
#[must_use]
pub fn classify_drop_zone_with(metrics: &DropZoneMetrics, size: Size, point: Point) -> DropZone {
    let Size { width, height } = size;
    let Point { x, y } = point;

    if width <= 0 || height <= 0 || x < 0 || y < 0 || x >= width || y >= height {
        return DropZone::None;
    }

    let edge = metrics.edge(size);
    if x < edge {
        return DropZone::Left;
    }
    if x > width.saturating_sub(edge) {
        return DropZone::Right;
    }
    if y < edge {
        return DropZone::Top;
    }
    if y > height.saturating_sub(edge) {
        return DropZone::Bottom;
    }

    let center = metrics.center(size);
    if (center..=width.saturating_sub(center)).contains(&x)
        && (center..=height.saturating_sub(center)).contains(&y)
    {
        DropZone::Center
    } else {
        DropZone::Full
    }
}

/// Returns the area the overlay highlights for `zone`, or `None` when the
/// drop would be ignored.
///
/// Edge zones preview the half of the group the new split will occupy.
#[must_use]
pub fn preview_rect(size: Size, zone: DropZone) -> Option<Rect> {
    let Size { width, height } = size;
    let half_w = (width / 2).max(1);
    let half_h = (height / 2).max(1);
    match zone {
        DropZone::None => None,
        DropZone::Full | DropZone::Center => Some(Rect::new(0, 0, width, height)),
        DropZone::Left => Some(Rect::new(0, 0, half_w, height)),
        DropZone::Right => Some(Rect::new(width - half_w, 0, half_w, height)),
        DropZone::Top => Some(Rect::new(0, 0, width, half_h)),
        DropZone::Bottom => Some(Rect::new(0, height - half_h, width, half_h)),
    }
}
