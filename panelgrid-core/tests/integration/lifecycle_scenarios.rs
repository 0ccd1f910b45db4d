//! Detach, pin, event and reset lifecycles

use std::cell::RefCell;
use std::rc::Rc;

use panelgrid_core::layout::{
    ContentId, LayoutError, LayoutEvent, LayoutZone, PanelTree, Subscription,
};

fn record(tree: &PanelTree) -> (Rc<RefCell<Vec<LayoutEvent>>>, Subscription) {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let sub = tree.subscribe(move |e| sink.borrow_mut().push(e.clone()));
    (events, sub)
}

#[test]
fn detach_then_close_window_destroys_content() {
    let mut tree = PanelTree::new();
    let logs = ContentId::new();
    tree.add_panel(logs, "Logs", LayoutZone::Right, None).unwrap();

    let window = tree.detach_panel(logs).unwrap();
    assert_eq!(tree.all_groups().len(), 1);
    assert!(tree.is_content_open("Logs"));

    let closed = tree.close_window(window).unwrap();

    assert_eq!(closed.title, "Logs");
    assert!(!tree.is_content_open("Logs"));
    assert!(!tree.contains_content(logs));
    assert!(matches!(
        tree.close_window(window),
        Err(LayoutError::WindowNotFound(_))
    ));
}

#[test]
fn pin_survives_group_moves_but_not_detach() {
    let mut tree = PanelTree::new();
    let a = ContentId::new();
    let b = ContentId::new();
    tree.add_panel(a, "A", LayoutZone::Default, None).unwrap();
    let right = tree.add_panel(b, "B", LayoutZone::Right, None).unwrap();
    tree.set_pinned(a, true).unwrap();

    tree.reattach_from_drag(a, right, 0).unwrap();
    assert!(tree.is_pinned(a));

    tree.detach_panel(a).unwrap();
    assert!(!tree.is_pinned(a));
    assert!(matches!(
        tree.set_pinned(a, true),
        Err(LayoutError::ContentDetached(_))
    ));

    tree.reattach_from_drag(a, right, 0).unwrap();
    assert!(!tree.is_pinned(a));
}

#[test]
fn events_fire_in_operation_order() {
    let mut tree = PanelTree::new();
    let a = ContentId::new();
    tree.add_panel(a, "A", LayoutZone::Default, None).unwrap();
    let (events, sub) = record(&tree);

    tree.set_pinned(a, true).unwrap();
    let window = tree.detach_panel(a).unwrap();
    let main = tree.main_group().id();
    tree.reattach_from_drag(a, main, 0).unwrap();
    tree.restore_default_layout();

    assert_eq!(
        events.borrow().as_slice(),
        &[
            LayoutEvent::PanelPinToggled {
                content: a,
                pinned: true
            },
            LayoutEvent::PanelDetached {
                content: a,
                title: "A".into(),
                window
            },
            LayoutEvent::PanelMoveCompleted {
                content: a,
                source_group: None,
                target_group: main
            },
            LayoutEvent::LayoutReset,
        ]
    );

    drop(sub);
    tree.restore_default_layout();
    assert_eq!(events.borrow().len(), 4);
}

#[test]
fn add_and_remove_do_not_fire_events() {
    let mut tree = PanelTree::new();
    let (events, _sub) = record(&tree);
    let a = ContentId::new();

    tree.add_panel(a, "A", LayoutZone::Left, None).unwrap();
    tree.remove_panel(a).unwrap();

    assert!(events.borrow().is_empty());
}

#[test]
fn restore_default_layout_returns_everything_for_disposal() {
    let mut tree = PanelTree::new();
    let ids: Vec<ContentId> = (0..4).map(|_| ContentId::new()).collect();
    tree.add_panel(ids[0], "A", LayoutZone::Default, None).unwrap();
    tree.add_panel(ids[1], "B", LayoutZone::Left, None).unwrap();
    tree.add_panel(ids[2], "C", LayoutZone::Bottom, None).unwrap();
    tree.add_panel(ids[3], "D", LayoutZone::Default, None).unwrap();
    tree.detach_panel(ids[3]).unwrap();
    let old_main = tree.main_group().id();

    let reset = tree.restore_default_layout();

    let titles: Vec<&str> = reset.panels.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["B", "A", "C"]);
    assert_eq!(reset.windows.len(), 1);
    assert_eq!(reset.windows[0].content, ids[3]);
    assert_ne!(tree.main_group().id(), old_main);
    assert_eq!(tree.all_groups().len(), 1);
    assert_eq!(tree.active_group(), tree.main_group().id());
    tree.validate().unwrap();
}

#[test]
fn is_content_open_matches_titles() {
    let mut tree = PanelTree::new();
    tree.add_panel(ContentId::new(), "Signals", LayoutZone::Default, None)
        .unwrap();

    assert!(tree.is_content_open("Signals"));
    assert!(!tree.is_content_open("Servers"));
}
