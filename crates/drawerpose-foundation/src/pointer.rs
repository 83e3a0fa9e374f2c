use drawerpose_ui_graphics::Point;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::OnceLock;
use web_time::Instant;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    /// The platform took the pointer away (gesture stolen, pointer left the window).
    Cancel,
}

fn epoch() -> Instant {
    static EPOCH: OnceLock<Instant> = OnceLock::new();
    *EPOCH.get_or_init(Instant::now)
}

/// Milliseconds since the first pointer event of this process.
pub fn uptime_millis() -> u64 {
    epoch().elapsed().as_millis() as u64
}

/// Pointer event with consumption tracking.
///
/// A handler that acts on an event consumes it; the host then suppresses the
/// platform default (native scrolling, text selection).
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    /// Position in viewport coordinates.
    pub position: Point,
    pub timestamp_millis: u64,
    consumed: Rc<Cell<bool>>,
}

impl PointerEvent {
    /// Creates an event stamped with the current time.
    pub fn new(kind: PointerEventKind, position: Point) -> Self {
        Self {
            id: 0,
            kind,
            position,
            timestamp_millis: uptime_millis(),
            consumed: Rc::new(Cell::new(false)),
        }
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Down, Point::new(x, y))
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Move, Point::new(x, y))
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Up, Point::new(x, y))
    }

    pub fn cancel(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Cancel, Point::new(x, y))
    }

    pub fn with_id(mut self, id: PointerId) -> Self {
        self.id = id;
        self
    }

    pub fn at_millis(mut self, timestamp_millis: u64) -> Self {
        self.timestamp_millis = timestamp_millis;
        self
    }

    pub fn consume(&self) {
        self.consumed.set(true);
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }

    /// Up and Cancel both end the gesture.
    pub fn ends_gesture(&self) -> bool {
        matches!(self.kind, PointerEventKind::Up | PointerEventKind::Cancel)
    }
}
