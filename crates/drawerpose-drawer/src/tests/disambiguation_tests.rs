use super::*;

use drawerpose_foundation::ScrollState;
use std::collections::HashMap;

/// content(1) > list(2, vertical scroll) > row(3) > button(4, no-drag)
///            > header(5)
struct Tree {
    parents: HashMap<u64, u64>,
    no_drag: Vec<u64>,
    list: ScrollState,
}

impl Tree {
    fn new(list: ScrollState) -> Self {
        let parents = [(2, 1), (3, 2), (4, 3), (5, 1)].into_iter().collect();
        Self {
            parents,
            no_drag: vec![4],
            list,
        }
    }
}

impl ElementTree for Tree {
    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.parents.get(&element.0).copied().map(ElementId)
    }

    fn has_marker(&self, element: ElementId, marker: ElementMarker) -> bool {
        match marker {
            ElementMarker::NoDrag => self.no_drag.contains(&element.0),
            ElementMarker::DrawerContent => element.0 == 1,
        }
    }

    fn scrollable(&self, element: ElementId, orientation: Orientation) -> Option<Rc<dyn ScrollableState>> {
        (element.0 == 2 && orientation == Orientation::Vertical)
            .then(|| Rc::new(self.list.clone()) as Rc<dyn ScrollableState>)
    }
}

fn policy() -> DragStartPolicy {
    DragStartPolicy {
        orientation: Orientation::Vertical,
        handle_scrollable_elements: true,
        at_most_open: true,
        scroll_threshold: 10.0,
        content: None,
    }
}

#[test]
fn no_target_drags() {
    assert!(matches!(classify_pointer_down(None, &policy()), DragStart::Drag));
}

#[test]
fn nested_scrollable_defers() {
    let tree = Tree::new(ScrollState::with_range(50.0, 200.0));
    let start = classify_pointer_down(Some(HitTarget::new(&tree, ElementId(3))), &policy());
    assert!(matches!(start, DragStart::DeferToScroll(_)));
}

#[test]
fn no_drag_marker_wins_over_scrollable() {
    let tree = Tree::new(ScrollState::with_range(50.0, 200.0));
    let start = classify_pointer_down(Some(HitTarget::new(&tree, ElementId(4))), &policy());
    assert!(matches!(start, DragStart::Ignore));
}

#[test]
fn outside_scrollable_drags() {
    let tree = Tree::new(ScrollState::with_range(50.0, 200.0));
    let start = classify_pointer_down(Some(HitTarget::new(&tree, ElementId(5))), &policy());
    assert!(matches!(start, DragStart::Drag));
}

#[test]
fn handoff_disabled_or_not_fully_open_drags() {
    let tree = Tree::new(ScrollState::with_range(50.0, 200.0));
    let target = Some(HitTarget::new(&tree, ElementId(3)));

    let disabled = DragStartPolicy {
        handle_scrollable_elements: false,
        ..policy()
    };
    assert!(matches!(classify_pointer_down(target, &disabled), DragStart::Drag));

    let partially_open = DragStartPolicy {
        at_most_open: false,
        ..policy()
    };
    assert!(matches!(classify_pointer_down(target, &partially_open), DragStart::Drag));
}

#[test]
fn wrong_axis_scrollable_is_ignored() {
    let tree = Tree::new(ScrollState::with_range(50.0, 200.0));
    let horizontal = DragStartPolicy {
        orientation: Orientation::Horizontal,
        ..policy()
    };
    let start = classify_pointer_down(Some(HitTarget::new(&tree, ElementId(3))), &horizontal);
    assert!(matches!(start, DragStart::Drag));
}

#[test]
fn walk_stops_at_the_content_root() {
    // Element 9 hangs above the content root and is marked no-drag; it must
    // never be reached.
    let mut tree = Tree::new(ScrollState::with_range(0.0, 0.0));
    tree.parents.insert(1, 9);
    tree.no_drag.push(9);
    let start = classify_pointer_down(Some(HitTarget::new(&tree, ElementId(5))), &policy());
    assert!(matches!(start, DragStart::Drag));

    let explicit = DragStartPolicy {
        content: Some(ElementId(5)),
        ..policy()
    };
    tree.no_drag.push(1);
    let start = classify_pointer_down(Some(HitTarget::new(&tree, ElementId(5))), &explicit);
    assert!(matches!(start, DragStart::Drag));
}

#[test]
fn scrollable_consumes_until_exhausted_then_slack_builds() {
    let list = ScrollState::with_range(50.0, 200.0);
    let mut handoff = ScrollHandoff::new(Rc::new(list.clone()), 10.0);

    // Pointer moves toward the closed edge: the list scrolls back to its start.
    for _ in 0..5 {
        assert_eq!(handoff.feed(10.0), HandoffStep::Scrolled);
    }
    assert_eq!(list.value(), 0.0);
    assert_eq!(handoff.slack(), 0.0);

    assert_eq!(handoff.feed(6.0), HandoffStep::Scrolled);
    assert_eq!(handoff.feed(4.0), HandoffStep::Scrolled);
    match handoff.feed(7.0) {
        HandoffStep::Transfer { excess } => assert!((excess - 7.0).abs() < 1e-4),
        other => panic!("expected a transfer, got {other:?}"),
    }
}

#[test]
fn opposite_slack_transfers_too() {
    let list = ScrollState::with_range(200.0, 200.0);
    let mut handoff = ScrollHandoff::new(Rc::new(list), 10.0);
    assert_eq!(handoff.feed(-8.0), HandoffStep::Scrolled);
    match handoff.feed(-8.0) {
        HandoffStep::Transfer { excess } => assert!((excess + 6.0).abs() < 1e-4),
        other => panic!("expected a transfer, got {other:?}"),
    }
}
