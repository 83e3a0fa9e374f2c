//! Contract for regions that consume scroll deltas.

/// Orientation for scrolling - horizontal or vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Component of a 2D delta along this orientation.
    pub fn component(self, dx: f32, dy: f32) -> f32 {
        match self {
            Orientation::Horizontal => dx,
            Orientation::Vertical => dy,
        }
    }
}

/// Scroll state holder that consumes deltas.
///
/// Offsets grow toward the end of the content; `0` is the start.
pub trait ScrollableState {
    /// Consume a scroll delta and return the amount consumed.
    ///
    /// Implementations clamp to their scroll range, so the result may be
    /// smaller in magnitude than `delta` (zero at the bound).
    fn consume_scroll_delta(&self, delta: f32) -> f32;

    fn scroll_offset(&self) -> f32;

    fn max_scroll_offset(&self) -> f32;

    fn is_scroll_in_progress(&self) -> bool {
        false
    }

    /// Distance left to scroll in the direction of `delta`'s sign.
    fn remaining_scroll(&self, delta: f32) -> f32 {
        if delta > 0.0 {
            (self.max_scroll_offset() - self.scroll_offset()).max(0.0)
        } else if delta < 0.0 {
            self.scroll_offset().max(0.0)
        } else {
            0.0
        }
    }
}
