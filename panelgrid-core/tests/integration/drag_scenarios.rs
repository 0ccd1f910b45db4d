//! Drag-and-drop sessions against a multi-group layout

use std::cell::RefCell;
use std::rc::Rc;

use panelgrid_core::drag_drop::{DropZone, Point, Size};
use panelgrid_core::layout::{
    ContentId, DragSession, DropOutcome, DropTargetOracle, GroupHit, GroupId, LayoutEvent,
    LayoutZone, PanelTree,
};

/// Two groups side by side, each 400x300, laid out on one screen row
struct SideBySide {
    left: GroupId,
    right: GroupId,
}

impl DropTargetOracle for SideBySide {
    fn group_at(&self, screen: Point) -> Option<GroupHit> {
        let size = Size::new(400, 300);
        if !(0..size.height).contains(&screen.y) {
            return None;
        }
        match screen.x {
            0..400 => Some(GroupHit::new(self.left, size, screen)),
            400..800 => Some(GroupHit::new(
                self.right,
                size,
                Point::new(screen.x - 400, screen.y),
            )),
            _ => None,
        }
    }
}

fn layout() -> (PanelTree, SideBySide, ContentId, ContentId, ContentId) {
    let mut tree = PanelTree::new();
    let (a, b, c) = (ContentId::new(), ContentId::new(), ContentId::new());
    let left = tree.add_panel(a, "A", LayoutZone::Default, None).unwrap();
    tree.add_panel(b, "B", LayoutZone::Default, None).unwrap();
    let right = tree.add_panel(c, "C", LayoutZone::Right, None).unwrap();
    (tree, SideBySide { left, right }, a, b, c)
}

#[test]
fn cancelled_drag_leaves_layout_unchanged() {
    let (tree, oracle, a, _, _) = layout();
    let before = tree.snapshot();

    let session = DragSession::begin(&tree, a).unwrap();
    for x in (0..800).step_by(37) {
        let _ = session.hover(&tree, &oracle, Point::new(x, 150));
    }
    session.cancel();

    assert_eq!(tree.snapshot(), before);
}

#[test]
fn hover_reports_zone_for_overlay() {
    let (tree, oracle, a, _, _) = layout();
    let session = DragSession::begin(&tree, a).unwrap();

    let target = session.hover(&tree, &oracle, Point::new(790, 150)).unwrap();

    assert_eq!(target.group, oracle.right);
    assert_eq!(target.zone, DropZone::Right);
    assert!(session.hover(&tree, &oracle, Point::new(900, 150)).is_none());
}

#[test]
fn drop_into_other_group_center_moves_tab() {
    let (mut tree, oracle, a, b, c) = layout();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let _sub = tree.subscribe(move |e| sink.borrow_mut().push(e.clone()));

    let outcome = DragSession::begin(&tree, a)
        .unwrap()
        .drop_at(&mut tree, &oracle, Point::new(600, 150))
        .unwrap();

    assert_eq!(outcome, DropOutcome::Tabbed { group: oracle.right });
    let right = tree.group(oracle.right).unwrap();
    assert_eq!(right.panels().len(), 2);
    assert_eq!(right.position(c), Some(0));
    assert_eq!(right.current_panel().unwrap().content, a);
    assert_eq!(tree.group_of(b), Some(oracle.left));
    assert_eq!(
        events.borrow().as_slice(),
        &[LayoutEvent::PanelMoveCompleted {
            content: a,
            source_group: Some(oracle.left),
            target_group: oracle.right,
        }]
    );
}

#[test]
fn drop_on_top_edge_creates_vertical_split() {
    let (mut tree, oracle, _, _, c) = layout();

    let outcome = DragSession::begin(&tree, c)
        .unwrap()
        .drop_at(&mut tree, &oracle, Point::new(200, 10))
        .unwrap();

    let DropOutcome::Split { group } = outcome else {
        panic!("expected a split, got {outcome:?}");
    };
    // The right group lost its only panel and is gone
    assert!(tree.group(oracle.right).is_none());
    assert_eq!(tree.group_of(c), Some(group));
    assert_eq!(tree.all_groups().len(), 2);
    tree.validate().unwrap();
}

#[test]
fn sole_panel_dropped_on_own_edge_changes_nothing() {
    let (mut tree, oracle, _, _, c) = layout();
    let before = tree.snapshot();

    DragSession::begin(&tree, c)
        .unwrap()
        .drop_at(&mut tree, &oracle, Point::new(405, 150))
        .unwrap();

    assert_eq!(tree.snapshot(), before);
}

#[test]
fn detached_window_can_be_dragged_back() {
    let (mut tree, oracle, a, _, _) = layout();
    tree.detach_panel(a).unwrap();

    let outcome = DragSession::begin(&tree, a)
        .unwrap()
        .drop_at(&mut tree, &oracle, Point::new(5, 150))
        .unwrap();

    assert!(matches!(outcome, DropOutcome::Split { .. }));
    assert!(tree.detached_windows().is_empty());
    assert!(tree.group_of(a).is_some());
}

#[test]
fn drop_after_layout_reset_is_cancelled() {
    let (mut tree, oracle, a, _, _) = layout();
    let session = DragSession::begin(&tree, a).unwrap();
    tree.restore_default_layout();
    let before = tree.snapshot();

    let outcome = session
        .drop_at(&mut tree, &oracle, Point::new(200, 150))
        .unwrap();

    assert_eq!(outcome, DropOutcome::Cancelled);
    assert_eq!(tree.snapshot(), before);
}

#[test]
fn body_drop_on_own_group_only_focuses() {
    let mut tree = PanelTree::new();
    let (a, b, c) = (ContentId::new(), ContentId::new(), ContentId::new());
    let main = tree.add_panel(a, "A", LayoutZone::Default, None).unwrap();
    tree.add_panel(b, "B", LayoutZone::Default, None).unwrap();
    tree.add_panel(c, "C", LayoutZone::Default, None).unwrap();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let _sub = tree.subscribe(move |e| sink.borrow_mut().push(e.clone()));
    let oracle = move |p: Point| Some(GroupHit::new(main, Size::new(300, 200), p));

    for point in [Point::new(150, 100), Point::new(150, 60)] {
        let outcome = DragSession::begin(&tree, a)
            .unwrap()
            .drop_at(&mut tree, &oracle, point)
            .unwrap();
        assert_eq!(outcome, DropOutcome::Tabbed { group: main });
    }

    let order: Vec<ContentId> = tree.main_group().panels().iter().map(|p| p.content).collect();
    assert_eq!(order, vec![a, b, c]);
    assert_eq!(tree.main_group().current_panel().unwrap().content, a);
    assert_eq!(tree.active_group(), main);
    assert!(events.borrow().is_empty());
}
