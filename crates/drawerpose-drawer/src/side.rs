use drawerpose_foundation::Orientation;
use drawerpose_ui_graphics::Point;

/// Viewport edge the drawer is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    Top,
    Right,
    #[default]
    Bottom,
    Left,
}

impl Side {
    /// Axis the drawer moves along.
    pub fn orientation(self) -> Orientation {
        match self {
            Side::Top | Side::Bottom => Orientation::Vertical,
            Side::Left | Side::Right => Orientation::Horizontal,
        }
    }

    /// +1 when pointer motion along the positive axis pushes the drawer
    /// toward its closed edge, -1 otherwise.
    #[inline]
    pub fn closing_sign(self) -> f32 {
        match self {
            Side::Bottom | Side::Right => 1.0,
            Side::Top | Side::Left => -1.0,
        }
    }

    /// Pointer position along the drawer's axis.
    pub fn axis_position(self, position: Point) -> f32 {
        self.orientation().component(position.x, position.y)
    }

    /// Converts pointer motion along the axis into offset motion
    /// (positive = toward closed).
    pub fn offset_delta(self, pointer_delta: f32) -> f32 {
        pointer_delta * self.closing_sign()
    }

    /// Screen-space translation for a drawer pushed `translate` pixels
    /// toward its closed edge.
    pub fn translation(self, translate: f32) -> Point {
        match self {
            Side::Bottom => Point::new(0.0, translate),
            Side::Top => Point::new(0.0, -translate),
            Side::Right => Point::new(translate, 0.0),
            Side::Left => Point::new(-translate, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dragging_toward_the_edge_closes() {
        assert_eq!(Side::Bottom.offset_delta(20.0), 20.0);
        assert_eq!(Side::Top.offset_delta(-20.0), 20.0);
        assert_eq!(Side::Right.offset_delta(20.0), 20.0);
        assert_eq!(Side::Left.offset_delta(-20.0), 20.0);
    }

    #[test]
    fn translation_points_at_the_anchor_edge() {
        assert_eq!(Side::Bottom.translation(10.0), Point::new(0.0, 10.0));
        assert_eq!(Side::Top.translation(10.0), Point::new(0.0, -10.0));
        assert_eq!(Side::Left.translation(10.0), Point::new(-10.0, 0.0));
        assert_eq!(Side::Right.orientation(), Orientation::Horizontal);
        assert_eq!(Side::Top.axis_position(Point::new(3.0, 7.0)), 7.0);
    }
}
