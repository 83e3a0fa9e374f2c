//! Deciding whether a pointer-down drags the drawer or scrolls its content.

use std::fmt;
use std::rc::Rc;

use drawerpose_foundation::{
    Ancestors, ElementId, ElementMarker, ElementTree, Orientation, ScrollableState,
};

/// Element a pointer-down landed on, with the tree it lives in.
#[derive(Clone, Copy)]
pub struct HitTarget<'a> {
    pub tree: &'a dyn ElementTree,
    pub element: ElementId,
}

impl<'a> HitTarget<'a> {
    pub fn new(tree: &'a dyn ElementTree, element: ElementId) -> Self {
        Self { tree, element }
    }
}

impl fmt::Debug for HitTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HitTarget")
            .field("element", &self.element)
            .finish_non_exhaustive()
    }
}

/// Facts about the drawer needed to classify a pointer-down.
#[derive(Debug, Clone, Copy)]
pub struct DragStartPolicy {
    pub orientation: Orientation,
    pub handle_scrollable_elements: bool,
    /// Scroll handoff only happens from the most open snap point.
    pub at_most_open: bool,
    pub scroll_threshold: f32,
    /// Walks stop here even without a [`ElementMarker::DrawerContent`] marker.
    pub content: Option<ElementId>,
}

pub enum DragStart {
    /// Opt-out marker on the path: leave the gesture alone.
    Ignore,
    Drag,
    /// Feed movement to a nested scrollable first.
    DeferToScroll(ScrollHandoff),
}

impl fmt::Debug for DragStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DragStart::Ignore => f.write_str("Ignore"),
            DragStart::Drag => f.write_str("Drag"),
            DragStart::DeferToScroll(handoff) => f.debug_tuple("DeferToScroll").field(handoff).finish(),
        }
    }
}

/// Classifies a pointer-down on `target`.
///
/// The walk covers the target and its ancestors up to the content root. Any
/// [`ElementMarker::NoDrag`] on that path ignores the gesture; otherwise the
/// nearest scrollable on the drawer's axis gets first claim on movement,
/// provided the policy allows it.
pub fn classify_pointer_down(target: Option<HitTarget<'_>>, policy: &DragStartPolicy) -> DragStart {
    let Some(HitTarget { tree, element }) = target else {
        return DragStart::Drag;
    };

    let mut scrollable: Option<Rc<dyn ScrollableState>> = None;
    for ancestor in Ancestors::new(tree, element) {
        if tree.has_marker(ancestor, ElementMarker::NoDrag) {
            log::trace!("pointer-down under no-drag element {ancestor:?}");
            return DragStart::Ignore;
        }
        if scrollable.is_none() && policy.handle_scrollable_elements {
            scrollable = tree.scrollable(ancestor, policy.orientation);
        }
        if Some(ancestor) == policy.content || tree.has_marker(ancestor, ElementMarker::DrawerContent) {
            break;
        }
    }

    match scrollable {
        Some(scrollable) if policy.at_most_open => {
            DragStart::DeferToScroll(ScrollHandoff::new(scrollable, policy.scroll_threshold))
        }
        _ => DragStart::Drag,
    }
}

/// Result of feeding pointer movement to a [`ScrollHandoff`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HandoffStep {
    /// Movement stayed with the scrollable (or within the threshold).
    Scrolled,
    /// The drawer takes over; `excess` pointer travel beyond the threshold
    /// should move it immediately.
    Transfer { excess: f32 },
}

/// Scrollable that receives movement until it stops consuming it.
pub struct ScrollHandoff {
    scrollable: Rc<dyn ScrollableState>,
    threshold: f32,
    slack: f32,
}

impl ScrollHandoff {
    pub fn new(scrollable: Rc<dyn ScrollableState>, threshold: f32) -> Self {
        Self {
            scrollable,
            threshold: threshold.max(0.0),
            slack: 0.0,
        }
    }

    pub fn scrollable(&self) -> &Rc<dyn ScrollableState> {
        &self.scrollable
    }

    /// Signed pointer travel the scrollable did not consume.
    pub fn slack(&self) -> f32 {
        self.slack
    }

    /// Scrolls by `pointer_delta` (content follows the pointer) and
    /// accumulates whatever the scrollable leaves unconsumed.
    pub fn feed(&mut self, pointer_delta: f32) -> HandoffStep {
        let consumed = self.scrollable.consume_scroll_delta(-pointer_delta);
        let unconsumed = pointer_delta + consumed;
        self.slack += unconsumed;
        if self.slack.abs() > self.threshold {
            let excess = self.slack - self.threshold.copysign(self.slack);
            log::debug!(
                "scroll handoff: slack {:.1} passed threshold {:.1}",
                self.slack,
                self.threshold
            );
            HandoffStep::Transfer { excess }
        } else {
            HandoffStep::Scrolled
        }
    }
}

impl fmt::Debug for ScrollHandoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollHandoff")
            .field("scroll_offset", &self.scrollable.scroll_offset())
            .field("threshold", &self.threshold)
            .field("slack", &self.slack)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/disambiguation_tests.rs"]
mod tests;
