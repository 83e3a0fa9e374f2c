//! In-memory element tree for disambiguation tests.

use std::collections::HashMap;
use std::rc::Rc;

use drawerpose_drawer::HitTarget;
use drawerpose_foundation::{
    ElementId, ElementMarker, ElementTree, Orientation, ScrollState, ScrollableState,
};

#[derive(Default)]
struct FakeElement {
    parent: Option<ElementId>,
    markers: Vec<ElementMarker>,
    scroll: Option<(Orientation, ScrollState)>,
}

/// Element tree assembled by hand.
///
/// ```
/// use drawerpose_foundation::{ElementMarker, Orientation, ScrollState};
/// use drawerpose_testing::FakeElementTree;
///
/// let mut tree = FakeElementTree::new();
/// let content = tree.root(ElementMarker::DrawerContent);
/// let list = tree.child(content);
/// tree.make_scrollable(list, Orientation::Vertical, ScrollState::with_range(0.0, 300.0));
/// let row = tree.child(list);
/// assert_eq!(tree.ancestors(row), vec![row, list, content]);
/// ```
#[derive(Default)]
pub struct FakeElementTree {
    elements: HashMap<ElementId, FakeElement>,
    next_id: u64,
}

impl FakeElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, parent: Option<ElementId>) -> ElementId {
        self.next_id += 1;
        let id = ElementId(self.next_id);
        self.elements.insert(
            id,
            FakeElement {
                parent,
                ..FakeElement::default()
            },
        );
        id
    }

    /// Adds a parentless element carrying `marker`.
    pub fn root(&mut self, marker: ElementMarker) -> ElementId {
        let id = self.insert(None);
        self.mark(id, marker);
        id
    }

    pub fn child(&mut self, parent: ElementId) -> ElementId {
        self.insert(Some(parent))
    }

    pub fn mark(&mut self, element: ElementId, marker: ElementMarker) {
        if let Some(entry) = self.elements.get_mut(&element) {
            entry.markers.push(marker);
        }
    }

    pub fn make_scrollable(&mut self, element: ElementId, orientation: Orientation, state: ScrollState) {
        if let Some(entry) = self.elements.get_mut(&element) {
            entry.scroll = Some((orientation, state));
        }
    }

    pub fn hit(&self, element: ElementId) -> HitTarget<'_> {
        HitTarget::new(self, element)
    }

    pub fn ancestors(&self, element: ElementId) -> Vec<ElementId> {
        drawerpose_foundation::Ancestors::new(self, element).collect()
    }
}

impl ElementTree for FakeElementTree {
    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.elements.get(&element).and_then(|entry| entry.parent)
    }

    fn has_marker(&self, element: ElementId, marker: ElementMarker) -> bool {
        self.elements
            .get(&element)
            .is_some_and(|entry| entry.markers.contains(&marker))
    }

    fn scrollable(&self, element: ElementId, orientation: Orientation) -> Option<Rc<dyn ScrollableState>> {
        let (axis, state) = self.elements.get(&element)?.scroll.as_ref()?;
        (*axis == orientation).then(|| Rc::new(state.clone()) as Rc<dyn ScrollableState>)
    }
}
