//! Property-based tests for drop-zone classification
//!
//! These tests verify that every point maps to exactly the zone the band
//! geometry dictates, and that drag sessions never mutate the layout unless
//! a valid drop happens.

use proptest::prelude::*;
use panelgrid_core::drag_drop::{
    DropAction, DropZone, DropZoneMetrics, Point, Size, classify_drop_zone, preview_rect,
};
use panelgrid_core::layout::{
    ContentId, DragSession, DropOutcome, GroupHit, LayoutZone, PanelTree,
};

/// Strategy for generating realistic group sizes
fn size_strategy() -> impl Strategy<Value = Size> {
    (1i32..2000, 1i32..2000).prop_map(|(w, h)| Size::new(w, h))
}

/// Strategy for generating a size and a point inside it
fn inside_strategy() -> impl Strategy<Value = (Size, Point)> {
    size_strategy().prop_flat_map(|size| {
        (0..size.width, 0..size.height).prop_map(move |(x, y)| (size, Point::new(x, y)))
    })
}

// ============================================================================
// Classification
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Points inside the group are never classified as None
    #[test]
    fn prop_inside_points_have_a_zone((size, point) in inside_strategy()) {
        prop_assert_ne!(classify_drop_zone(size, point), DropZone::None);
    }

    /// Points outside the group are always None
    #[test]
    fn prop_outside_points_are_none(size in size_strategy(), dx in 0i32..500, dy in -500i32..2500) {
        let left = Point::new(-1 - dx, dy);
        let right = Point::new(size.width + dx, dy);
        prop_assert_eq!(classify_drop_zone(size, left), DropZone::None);
        prop_assert_eq!(classify_drop_zone(size, right), DropZone::None);
    }

    /// The classification agrees with the band formula and priority order
    #[test]
    fn prop_classification_matches_bands((size, point) in inside_strategy()) {
        let metrics = DropZoneMetrics::default();
        let side = size.width.min(size.height);
        let edge = (side / 4).clamp(16, 100);
        let center = (side / 3).clamp(24, 150);
        prop_assert_eq!(metrics.edge(size), edge);
        prop_assert_eq!(metrics.center(size), center);

        let expected = if point.x < edge {
            DropZone::Left
        } else if point.x > size.width - edge {
            DropZone::Right
        } else if point.y < edge {
            DropZone::Top
        } else if point.y > size.height - edge {
            DropZone::Bottom
        } else if point.x >= center
            && point.x <= size.width - center
            && point.y >= center
            && point.y <= size.height - center
        {
            DropZone::Center
        } else {
            DropZone::Full
        };
        prop_assert_eq!(classify_drop_zone(size, point), expected);
    }

    /// Edge zones split, Center and Full add a tab
    #[test]
    fn prop_zone_actions_are_consistent((size, point) in inside_strategy()) {
        let zone = classify_drop_zone(size, point);
        match zone.action() {
            DropAction::Ignore => prop_assert_eq!(zone, DropZone::None),
            DropAction::AddTab => {
                prop_assert!(matches!(zone, DropZone::Center | DropZone::Full));
            }
            DropAction::Split(layout_zone) => {
                prop_assert!(zone.is_edge());
                prop_assert_eq!(layout_zone.to_string(), zone.to_string());
            }
        }
    }

    /// Preview rectangles stay within the group
    #[test]
    fn prop_preview_rect_within_bounds((size, point) in inside_strategy()) {
        let zone = classify_drop_zone(size, point);
        let rect = preview_rect(size, zone).expect("inside points have a preview");
        prop_assert!(rect.x >= 0 && rect.y >= 0);
        prop_assert!(rect.x + rect.width <= size.width.max(1));
        prop_assert!(rect.y + rect.height <= size.height.max(1));
    }
}

// ============================================================================
// Concrete Drop-Zone Cases
// ============================================================================

#[test]
fn classify_300_by_200_reference_points() {
    let size = Size::new(300, 200);
    assert_eq!(classify_drop_zone(size, Point::new(5, 100)), DropZone::Left);
    assert_eq!(classify_drop_zone(size, Point::new(295, 100)), DropZone::Right);
    assert_eq!(classify_drop_zone(size, Point::new(150, 100)), DropZone::Center);
    assert_eq!(classify_drop_zone(size, Point::new(150, 60)), DropZone::Full);
    // Within the 50px top band
    assert_eq!(classify_drop_zone(size, Point::new(150, 20)), DropZone::Top);
}

// ============================================================================
// Drag Sessions
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Hovering anywhere never changes the layout
    #[test]
    fn prop_hover_is_read_only((size, point) in inside_strategy()) {
        let mut tree = PanelTree::new();
        let a = ContentId::new();
        tree.add_panel(a, "A", LayoutZone::Default, None).unwrap();
        tree.add_panel(ContentId::new(), "B", LayoutZone::Right, None).unwrap();
        let main = tree.main_group().id();
        let before = tree.snapshot();
        let oracle = move |p: Point| Some(GroupHit::new(main, size, p));

        let session = DragSession::begin(&tree, a).unwrap();
        let target = session.hover(&tree, &oracle, point);
        session.cancel();

        prop_assert!(target.is_some());
        prop_assert_eq!(tree.snapshot(), before);
    }

    /// A drop either cancels without change or leaves a valid layout
    #[test]
    fn prop_drop_keeps_layout_valid((size, point) in inside_strategy(), outside in any::<bool>()) {
        let mut tree = PanelTree::new();
        let a = ContentId::new();
        tree.add_panel(a, "A", LayoutZone::Default, None).unwrap();
        tree.add_panel(ContentId::new(), "B", LayoutZone::Bottom, None).unwrap();
        let main = tree.main_group().id();
        let before = tree.snapshot();
        let oracle = move |p: Point| (!outside).then(|| GroupHit::new(main, size, p));

        let outcome = DragSession::begin(&tree, a)
            .unwrap()
            .drop_at(&mut tree, &oracle, point)
            .unwrap();

        if outcome == DropOutcome::Cancelled {
            prop_assert_eq!(tree.snapshot(), before);
        }
        prop_assert!(tree.validate().is_ok());
        prop_assert!(tree.contains_content(a));
    }
}
