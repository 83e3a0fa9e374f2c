//! Values rendering code reads from a drawer.

use drawerpose_ui_graphics::{Point, Rect, Size};

use crate::side::Side;
use crate::snap_points::SnapPointSpec;
use crate::transition::TransitionState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawerGeometry {
    pub side: Side,
    pub size: f32,
    /// Distance pushed toward the closed edge. Same sign convention on every
    /// side; negative while overdragged past fully open.
    pub translate: f32,
    pub open_percentage: f32,
    /// `None` while closed.
    pub active_snap_point: Option<SnapPointSpec>,
}

impl DrawerGeometry {
    /// Screen-space offset to apply to the drawer element.
    pub fn translation(&self) -> Point {
        self.side.translation(self.translate)
    }

    /// Rect the drawer element covers inside `viewport`: anchored to its edge,
    /// spanning the cross axis, then moved by [`Self::translation`].
    pub fn bounds(&self, viewport: Size) -> Rect {
        let resting = match self.side {
            Side::Bottom => Rect::from_origin_size(
                Point::new(0.0, viewport.height - self.size),
                Size::new(viewport.width, self.size),
            ),
            Side::Top => Rect::from_origin_size(Point::ZERO, Size::new(viewport.width, self.size)),
            Side::Right => Rect::from_origin_size(
                Point::new(viewport.width - self.size, 0.0),
                Size::new(self.size, viewport.height),
            ),
            Side::Left => Rect::from_origin_size(Point::ZERO, Size::new(self.size, viewport.height)),
        };
        let offset = self.translation();
        resting.translate(offset.x, offset.y)
    }
}

/// `1 - translate / size`, clamped to `[0, 1]`.
pub fn open_percentage(translate: f32, size: f32, open: bool) -> f32 {
    if size <= 0.0 {
        return if open { 1.0 } else { 0.0 };
    }
    (1.0 - translate / size).clamp(0.0, 1.0)
}

/// Everything observers are told after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawerSnapshot {
    pub geometry: DrawerGeometry,
    pub is_open: bool,
    pub is_present: bool,
    pub is_dragging: bool,
    pub is_transitioning: bool,
    pub transition_state: TransitionState,
    /// Size the drawer element should be laid out at; lags behind
    /// `geometry.size` during a resize transition.
    pub rendered_size: f32,
}
