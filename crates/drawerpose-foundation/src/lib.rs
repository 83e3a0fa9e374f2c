//! Input and scrolling foundations for Drawerpose.
//!
//! Nothing here knows about drawers: these are the pointer event model, the
//! drag velocity tracker, and the contracts a host tree and its scrollable
//! regions implement so the drawer engine can inspect them.

pub mod element_tree;
pub mod gesture_constants;
pub mod pointer;
pub mod scroll_state;
pub mod scrollable;
pub mod velocity_tracker;

pub use drawerpose_ui_graphics::{Point, Rect, Size};
pub use element_tree::{Ancestors, ElementId, ElementMarker, ElementTree};
pub use pointer::{PointerEvent, PointerEventKind, PointerId};
pub use scroll_state::ScrollState;
pub use scrollable::{Orientation, ScrollableState};
pub use velocity_tracker::{DistanceSample, DragVelocityTracker, VelocityWindow};

#[cfg(test)]
#[path = "tests/scroll_state_tests.rs"]
mod scroll_state_tests;
