//! Robot that drives a [`DrawerState`] through scripted gestures.
//!
//! The robot owns a runtime whose frames only advance when asked, plus a
//! millisecond clock used to stamp pointer events. Positions are given along
//! the drawer's axis; the robot builds the matching viewport point for the
//! configured side.
//!
//! # Example
//!
//! ```
//! use drawerpose_drawer::{DrawerConfig, SnapPointSpec};
//! use drawerpose_testing::DrawerRobot;
//!
//! let config = DrawerConfig::new()
//!     .with_snap_points([SnapPointSpec::Fraction(0.5), SnapPointSpec::OPEN]);
//! let mut robot = DrawerRobot::new(config, 400.0).unwrap();
//! robot.open_and_settle();
//! assert_eq!(robot.drawer().translate(), 0.0);
//! ```

use std::rc::Rc;
use std::sync::Arc;

use drawerpose_core::{DefaultScheduler, Runtime};
use drawerpose_drawer::{DialogHost, DrawerConfig, DrawerError, DrawerState, HitTarget};
use drawerpose_foundation::{Orientation, PointerEvent};
use drawerpose_ui_graphics::Point;

use crate::host::RecordingDialogHost;

/// One 60Hz frame.
pub const FRAME_NANOS: u64 = 16_666_667;

const MAX_SETTLE_FRAMES: usize = 2_000;

pub struct DrawerRobot {
    runtime: Runtime,
    host: Rc<RecordingDialogHost>,
    drawer: DrawerState,
    frame_nanos: u64,
    now_ms: u64,
    pointer: f32,
}

impl DrawerRobot {
    pub fn new(config: DrawerConfig, size: f32) -> Result<Self, DrawerError> {
        Self::with_host(config, size, RecordingDialogHost::new())
    }

    /// Robot whose drawer reports to `host`.
    pub fn with_host(
        config: DrawerConfig,
        size: f32,
        host: RecordingDialogHost,
    ) -> Result<Self, DrawerError> {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let host = Rc::new(host);
        let drawer = DrawerState::new(
            config,
            runtime.handle(),
            host.clone() as Rc<dyn DialogHost>,
        )?;
        drawer.set_size(size)?;
        Ok(Self {
            runtime,
            host,
            drawer,
            frame_nanos: 0,
            now_ms: 0,
            pointer: 0.0,
        })
    }

    pub fn drawer(&self) -> &DrawerState {
        &self.drawer
    }

    pub fn host(&self) -> &RecordingDialogHost {
        &self.host
    }

    /// Opens the drawer, runs the opening transition to completion and
    /// forgets the host calls it produced.
    pub fn open_and_settle(&mut self) {
        self.drawer.open();
        self.settle();
        self.host.take_calls();
    }

    pub fn advance_frame(&mut self) {
        self.frame_nanos += FRAME_NANOS;
        self.runtime.handle().drain_frame_callbacks(self.frame_nanos);
    }

    pub fn pump_frames(&mut self, frames: usize) {
        for _ in 0..frames {
            self.advance_frame();
        }
    }

    pub fn has_pending_frames(&self) -> bool {
        self.runtime.handle().has_frame_callbacks()
    }

    /// Advances frames until no animation is waiting for one.
    ///
    /// Panics if animations keep running past a generous frame budget.
    pub fn settle(&mut self) {
        for _ in 0..MAX_SETTLE_FRAMES {
            if !self.has_pending_frames() {
                return;
            }
            self.advance_frame();
        }
        panic!("drawer animations did not settle within {MAX_SETTLE_FRAMES} frames");
    }

    /// Moves the pointer clock forward without sending events.
    pub fn advance_millis(&mut self, millis: u64) {
        self.now_ms += millis;
    }

    pub fn now_millis(&self) -> u64 {
        self.now_ms
    }

    fn point(&self, axis: f32) -> Point {
        match self.drawer.side().orientation() {
            Orientation::Vertical => Point::new(0.0, axis),
            Orientation::Horizontal => Point::new(axis, 0.0),
        }
    }

    /// Presses at `axis` over `target`.
    pub fn press(&mut self, axis: f32, target: Option<HitTarget<'_>>) -> PointerEvent {
        self.pointer = axis;
        let point = self.point(axis);
        let event = PointerEvent::down(point.x, point.y).at_millis(self.now_ms);
        self.drawer.pointer_down(&event, target);
        event
    }

    pub fn move_to(&mut self, axis: f32) -> PointerEvent {
        self.pointer = axis;
        let point = self.point(axis);
        let event = PointerEvent::moved(point.x, point.y).at_millis(self.now_ms);
        self.drawer.pointer_move(&event);
        event
    }

    pub fn release(&mut self) -> PointerEvent {
        let point = self.point(self.pointer);
        let event = PointerEvent::up(point.x, point.y).at_millis(self.now_ms);
        self.drawer.pointer_up(&event);
        event
    }

    pub fn cancel(&mut self) -> PointerEvent {
        let point = self.point(self.pointer);
        let event = PointerEvent::cancel(point.x, point.y).at_millis(self.now_ms);
        self.drawer.pointer_cancel(&event);
        event
    }

    /// Moves the pointer so the drawer is pushed `offset_delta` pixels
    /// toward closed (negative pulls it open), in `steps` moves `step_ms`
    /// apart. The pointer stays down.
    pub fn drag_by(&mut self, offset_delta: f32, steps: u32, step_ms: u64) {
        let steps = steps.max(1);
        let start = self.pointer;
        let pointer_delta = offset_delta * self.drawer.side().closing_sign();
        for step in 1..=steps {
            self.advance_millis(step_ms);
            self.move_to(start + pointer_delta * step as f32 / steps as f32);
        }
    }

    /// Full press, drag and release starting at `from` with no hit target.
    pub fn swipe(&mut self, from: f32, offset_delta: f32, steps: u32, step_ms: u64) {
        self.press(from, None);
        self.drag_by(offset_delta, steps, step_ms);
        self.release();
    }

    /// Fast swipe: `offset_delta` covered in five moves 10ms apart.
    pub fn flick(&mut self, from: f32, offset_delta: f32) {
        self.swipe(from, offset_delta, 5, 10);
    }
}

impl std::fmt::Debug for DrawerRobot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawerRobot")
            .field("drawer", &self.drawer)
            .field("frame_nanos", &self.frame_nanos)
            .field("now_ms", &self.now_ms)
            .finish_non_exhaustive()
    }
}
