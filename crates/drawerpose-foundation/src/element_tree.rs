//! Read-only view of the host's element hierarchy.
//!
//! The drawer engine never touches a real DOM. Hosts expose the few facts it
//! needs (parent links, opt-out markers, scrollable regions) through
//! [`ElementTree`].

use crate::scrollable::{Orientation, ScrollableState};
use smallvec::SmallVec;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// Markers a host attaches to elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementMarker {
    /// Pointer-downs inside this subtree never start a drawer drag.
    NoDrag,
    /// Root of the drawer content; ancestor walks stop here.
    DrawerContent,
}

impl ElementMarker {
    /// Attribute name hosts conventionally map to this marker.
    pub fn attribute_name(self) -> &'static str {
        match self {
            ElementMarker::NoDrag => "data-drawer-no-drag",
            ElementMarker::DrawerContent => "data-drawer-content",
        }
    }
}

pub trait ElementTree {
    fn parent(&self, element: ElementId) -> Option<ElementId>;

    fn has_marker(&self, element: ElementId, marker: ElementMarker) -> bool;

    /// Scrollable state of `element` if it scrolls along `orientation`.
    fn scrollable(
        &self,
        element: ElementId,
        orientation: Orientation,
    ) -> Option<Rc<dyn ScrollableState>>;
}

/// Walks from an element to the root, the element itself first.
pub struct Ancestors<'a> {
    tree: &'a dyn ElementTree,
    next: Option<ElementId>,
    visited: SmallVec<[ElementId; 16]>,
}

impl<'a> Ancestors<'a> {
    pub fn new(tree: &'a dyn ElementTree, start: ElementId) -> Self {
        Self {
            tree,
            next: Some(start),
            visited: SmallVec::new(),
        }
    }
}

impl Iterator for Ancestors<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let current = self.next.take()?;
        if self.visited.contains(&current) {
            log::warn!("element tree has a parent cycle at {current:?}");
            return None;
        }
        self.visited.push(current);
        self.next = self.tree.parent(current);
        Some(current)
    }
}
