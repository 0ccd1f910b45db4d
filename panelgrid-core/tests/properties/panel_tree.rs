//! Property-based tests for `PanelTree` structural invariants
//!
//! These tests apply random operation sequences and verify that the Main
//! Group survives, empty containers are collapsed and no content is placed
//! twice.

use std::collections::HashSet;

use proptest::prelude::*;
use panelgrid_core::layout::{
    ContentId, GroupId, LayoutSnapshot, LayoutZone, NodeRef, NodeSnapshot, PanelTree,
};

// ============================================================================
// Test Strategies
// ============================================================================

/// Number of distinct content handles the operations draw from
const POOL: usize = 8;

fn content(index: usize) -> ContentId {
    ContentId::from_uuid(uuid::Uuid::from_u128(0x1000 + (index % POOL) as u128))
}

fn zone_strategy() -> impl Strategy<Value = LayoutZone> {
    prop_oneof![
        Just(LayoutZone::Default),
        Just(LayoutZone::Left),
        Just(LayoutZone::Right),
        Just(LayoutZone::Top),
        Just(LayoutZone::Bottom),
    ]
}

fn edge_zone_strategy() -> impl Strategy<Value = LayoutZone> {
    prop_oneof![
        Just(LayoutZone::Left),
        Just(LayoutZone::Right),
        Just(LayoutZone::Top),
        Just(LayoutZone::Bottom),
    ]
}

/// An operation on a `PanelTree`; indices are reduced modulo the pool or
/// the current group count when applied
#[derive(Debug, Clone)]
enum TreeOperation {
    Add {
        item: usize,
        zone: LayoutZone,
        anchor: usize,
    },
    Remove {
        item: usize,
    },
    SplitAround {
        item: usize,
        zone: LayoutZone,
        anchor: usize,
    },
    Detach {
        item: usize,
    },
    Reattach {
        item: usize,
        group: usize,
        index: usize,
    },
    MoveToSplit {
        item: usize,
        group: usize,
        zone: LayoutZone,
    },
    TogglePin {
        item: usize,
    },
    CloseWindow {
        window: usize,
    },
    ClearUnpinned,
}

fn operation_strategy() -> impl Strategy<Value = TreeOperation> {
    prop_oneof![
        4 => (0..POOL, zone_strategy(), 0usize..8)
            .prop_map(|(item, zone, anchor)| TreeOperation::Add { item, zone, anchor }),
        2 => (0..POOL).prop_map(|item| TreeOperation::Remove { item }),
        2 => (0..POOL, edge_zone_strategy(), 0usize..8)
            .prop_map(|(item, zone, anchor)| TreeOperation::SplitAround { item, zone, anchor }),
        1 => (0..POOL).prop_map(|item| TreeOperation::Detach { item }),
        2 => (0..POOL, 0usize..8, 0usize..6)
            .prop_map(|(item, group, index)| TreeOperation::Reattach { item, group, index }),
        2 => (0..POOL, 0usize..8, edge_zone_strategy())
            .prop_map(|(item, group, zone)| TreeOperation::MoveToSplit { item, group, zone }),
        1 => (0..POOL).prop_map(|item| TreeOperation::TogglePin { item }),
        1 => (0usize..4).prop_map(|window| TreeOperation::CloseWindow { window }),
        1 => Just(TreeOperation::ClearUnpinned),
    ]
}

fn operations_strategy(max_ops: usize) -> impl Strategy<Value = Vec<TreeOperation>> {
    proptest::collection::vec(operation_strategy(), 0..=max_ops)
}

fn pick_group(tree: &PanelTree, index: usize) -> GroupId {
    let groups = tree.all_groups();
    groups[index % groups.len()].id()
}

/// Apply an operation, ignoring errors (not-found paths are part of the mix)
fn apply_operation(tree: &mut PanelTree, op: &TreeOperation) {
    match op {
        TreeOperation::Add { item, zone, anchor } => {
            let anchor = pick_group(tree, *anchor);
            let _ = tree.add_panel(content(*item), format!("P{item}"), *zone, Some(anchor));
        }
        TreeOperation::Remove { item } => {
            let _ = tree.remove_panel(content(*item));
        }
        TreeOperation::SplitAround { item, zone, anchor } => {
            let anchor = pick_group(tree, *anchor);
            let _ = tree.split_around(anchor, *zone, content(*item), format!("P{item}"));
        }
        TreeOperation::Detach { item } => {
            let _ = tree.detach_panel(content(*item));
        }
        TreeOperation::Reattach { item, group, index } => {
            let group = pick_group(tree, *group);
            let _ = tree.reattach_from_drag(content(*item), group, *index);
        }
        TreeOperation::MoveToSplit { item, group, zone } => {
            let group = pick_group(tree, *group);
            let _ = tree.move_to_split(content(*item), group, *zone);
        }
        TreeOperation::TogglePin { item } => {
            let _ = tree.toggle_pinned(content(*item));
        }
        TreeOperation::CloseWindow { window } => {
            let windows: Vec<_> = tree.detached_windows().iter().map(|w| w.id).collect();
            if !windows.is_empty() {
                let _ = tree.close_window(windows[window % windows.len()]);
            }
        }
        TreeOperation::ClearUnpinned => {
            let _ = tree.clear_unpinned();
        }
    }
}

/// Walks the tree through the public API and checks every structural
/// invariant independently of `PanelTree::validate`
fn check_invariants(tree: &PanelTree) -> Result<(), TestCaseError> {
    let root = tree.root();
    prop_assert!(root.parent().is_none());

    let mut groups = Vec::new();
    let mut stack = vec![root.id()];
    while let Some(id) = stack.pop() {
        let split = tree.split(id).expect("split reachable from root exists");
        if id != root.id() {
            prop_assert!(
                split.children().len() >= 2,
                "non-root split with {} children",
                split.children().len()
            );
        }
        for child in split.children() {
            match child {
                NodeRef::Split(child) => {
                    prop_assert_eq!(tree.split(*child).and_then(|s| s.parent()), Some(id));
                    stack.push(*child);
                }
                NodeRef::Group(group) => {
                    let g = tree.group(*group).expect("group reachable from root exists");
                    prop_assert_eq!(g.parent(), id);
                    groups.push(*group);
                }
            }
        }
    }

    let main = tree.main_group().id();
    prop_assert_eq!(groups.iter().filter(|g| **g == main).count(), 1);

    let mut seen = HashSet::new();
    for id in &groups {
        let group = tree.group(*id).expect("listed group exists");
        prop_assert!(*id == main || !group.is_empty(), "empty ordinary group");
        if group.is_empty() {
            prop_assert!(group.current_index().is_none());
        } else {
            prop_assert!(group.current_index().is_some_and(|i| i < group.len()));
        }
        for panel in group.panels() {
            prop_assert!(seen.insert(panel.content), "content docked twice");
        }
    }
    for window in tree.detached_windows() {
        prop_assert!(seen.insert(window.content), "content docked and detached");
    }
    prop_assert!(tree.group(tree.active_group()).is_some());
    prop_assert!(tree.validate().is_ok());
    Ok(())
}

/// Snapshot with focus information stripped, for structural comparison
fn structure(snapshot: &LayoutSnapshot) -> String {
    fn walk(node: &NodeSnapshot, out: &mut String) {
        match node {
            NodeSnapshot::Split {
                id,
                orientation,
                children,
            } => {
                out.push_str(&format!("S({id},{orientation})["));
                for child in children {
                    walk(child, out);
                }
                out.push(']');
            }
            NodeSnapshot::Group(group) => {
                out.push_str(&format!("G({})[", group.id));
                for panel in &group.panels {
                    out.push_str(&format!("{}:{},", panel.content, panel.pinned));
                }
                out.push(']');
            }
        }
    }
    let mut out = String::new();
    walk(&snapshot.root, &mut out);
    out.push_str(&format!("main={}", snapshot.main));
    for window in &snapshot.windows {
        out.push_str(&format!("W({})", window.content));
    }
    out
}

fn build(ops: &[TreeOperation]) -> PanelTree {
    let mut tree = PanelTree::new();
    for op in ops {
        apply_operation(&mut tree, op);
    }
    tree
}

// ============================================================================
// Property 1: Invariant Preservation
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every public operation leaves the tree structurally valid
    #[test]
    fn prop_invariants_hold_after_every_operation(ops in operations_strategy(40)) {
        let mut tree = PanelTree::new();
        check_invariants(&tree)?;
        for op in &ops {
            apply_operation(&mut tree, op);
            check_invariants(&tree)?;
        }
    }

    /// Failed operations never mutate the tree
    #[test]
    fn prop_not_found_paths_do_not_mutate(ops in operations_strategy(20)) {
        let mut tree = build(&ops);
        let before = tree.snapshot();
        let stranger = ContentId::new();

        prop_assert!(tree.remove_panel(stranger).is_err());
        prop_assert!(tree.detach_panel(stranger).is_err());
        prop_assert!(tree.set_pinned(stranger, true).is_err());
        let main = tree.main_group().id();
        prop_assert!(tree.reattach_from_drag(stranger, main, 0).is_err());
        prop_assert!(tree.move_to_split(stranger, main, LayoutZone::Left).is_err());
        prop_assert!(tree.reattach_from_drag(content(0), GroupId::new(), 0).is_err());

        prop_assert_eq!(tree.snapshot(), before);
    }
}

// ============================================================================
// Property 2: Add/Remove Round-Trip
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Adding fresh content and removing it restores the structure
    #[test]
    fn prop_add_remove_round_trip(ops in operations_strategy(25), zone in zone_strategy()) {
        let mut tree = build(&ops);
        let before = structure(&tree.snapshot());
        let fresh = ContentId::new();

        tree.add_panel(fresh, "T", zone, None).unwrap();
        tree.remove_panel(fresh).unwrap();

        prop_assert_eq!(structure(&tree.snapshot()), before);
    }
}

// ============================================================================
// Property 3: Reattach Idempotence
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(150))]

    /// Repeating a reattach with the same arguments changes nothing
    #[test]
    fn prop_reattach_is_idempotent(
        ops in operations_strategy(25),
        item in 0..POOL,
        group in 0usize..8,
        index in 0usize..8,
    ) {
        let mut tree = build(&ops);
        let target = pick_group(&tree, group);
        let item = content(item);

        if tree.reattach_from_drag(item, target, index).is_ok() {
            let once = tree.snapshot();
            tree.reattach_from_drag(item, target, index).unwrap();
            prop_assert_eq!(tree.snapshot(), once);
            prop_assert_eq!(tree.current_panel(target).map(|p| p.content), Some(item));
        }
    }
}

// ============================================================================
// Property 5: Main Group Permanence
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Clearing a layout with nothing pinned leaves exactly one empty Main
    #[test]
    fn prop_clear_unpinned_keeps_single_empty_main(ops in operations_strategy(30)) {
        let mut tree = build(&ops);
        for (content, pinned) in tree.pin_states() {
            if pinned {
                tree.set_pinned(content, false).unwrap();
            }
        }
        let windows = tree.detached_windows().len();

        tree.clear_unpinned();

        prop_assert!(tree.main_group().is_empty());
        prop_assert_eq!(tree.all_groups().len(), 1);
        prop_assert_eq!(tree.panel_count(), 0);
        prop_assert_eq!(tree.detached_windows().len(), windows);
        prop_assert_eq!(tree.root().children().len(), 1);
        check_invariants(&tree)?;
    }

    /// Pinned panels survive `clear_unpinned` with their group order intact
    #[test]
    fn prop_clear_unpinned_keeps_pinned(ops in operations_strategy(30)) {
        let mut tree = build(&ops);
        let pinned: Vec<ContentId> = tree
            .pin_states()
            .into_iter()
            .filter_map(|(c, p)| p.then_some(c))
            .collect();

        let removed = tree.clear_unpinned();

        prop_assert!(removed.iter().all(|p| !p.pinned));
        let survivors: Vec<ContentId> = tree.pin_states().into_iter().map(|(c, _)| c).collect();
        prop_assert_eq!(survivors, pinned);
        check_invariants(&tree)?;
    }
}

// ============================================================================
// Property 7: No Duplicate Placement
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Adding the same content twice yields one focused panel
    #[test]
    fn prop_no_duplicate_placement(
        ops in operations_strategy(25),
        first in zone_strategy(),
        second in zone_strategy(),
    ) {
        let mut tree = build(&ops);
        let item = ContentId::new();

        let g1 = tree.add_panel(item, "T", first, None).unwrap();
        prop_assert_eq!(tree.current_panel(g1).map(|p| p.content), Some(item));
        let g2 = tree.add_panel(item, "T", second, None).unwrap();

        prop_assert_eq!(g1, g2);
        let count = tree.pin_states().iter().filter(|(c, _)| *c == item).count();
        prop_assert_eq!(count, 1);
        prop_assert_eq!(tree.current_panel(g2).map(|p| p.content), Some(item));
        check_invariants(&tree)?;
    }
}

// ============================================================================
// Reset
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Restoring the default layout hands back every placed content
    #[test]
    fn prop_restore_returns_everything(ops in operations_strategy(30)) {
        let mut tree = build(&ops);
        let docked = tree.panel_count();
        let windows = tree.detached_windows().len();

        let reset = tree.restore_default_layout();

        prop_assert_eq!(reset.panels.len(), docked);
        prop_assert_eq!(reset.windows.len(), windows);
        prop_assert_eq!(tree.all_groups().len(), 1);
        prop_assert!(tree.main_group().is_empty());
        check_invariants(&tree)?;
    }
}
