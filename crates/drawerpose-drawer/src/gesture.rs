//! Pointer tracking for a single drag.
//!
//! The controller only knows about offsets. Applying damping, picking the
//! release target and animating there is left to the drawer, which owns the
//! geometry.

use std::fmt;
use std::rc::Rc;

use drawerpose_foundation::{DragVelocityTracker, PointerEvent, PointerId, ScrollableState};

use crate::disambiguation::{DragStart, HandoffStep, ScrollHandoff};
use crate::side::Side;
use crate::snap_points::{find_closest_snap_point, ResolvedSnapPoint};

/// State of one continuous drag. Exists exactly while the drawer is dragging.
pub struct DragSession {
    pub pointer_id: PointerId,
    /// Undamped offset when the drag began.
    pub start_offset: f32,
    /// Snap point the drawer rested at when the drag began.
    pub start_index: Option<usize>,
    /// Undamped offset following the pointer.
    pub raw_offset: f32,
    /// Pointer position along the drawer axis.
    pub last_position: f32,
    pub last_timestamp: u64,
    pub velocity: DragVelocityTracker,
    /// Scrollable the drag was handed off from.
    pub active_scrollable: Option<Rc<dyn ScrollableState>>,
}

impl DragSession {
    fn new(
        event: &PointerEvent,
        side: Side,
        offset: f32,
        start_index: Option<usize>,
        cache_reset_ms: u64,
    ) -> Self {
        let mut velocity = DragVelocityTracker::new(cache_reset_ms);
        velocity.start(event.timestamp_millis);
        Self {
            pointer_id: event.id,
            start_offset: offset,
            start_index,
            raw_offset: offset,
            last_position: side.axis_position(event.position),
            last_timestamp: event.timestamp_millis,
            velocity,
            active_scrollable: None,
        }
    }

    /// Offset travelled since the drag began.
    pub fn distance(&self) -> f32 {
        self.raw_offset - self.start_offset
    }
}

impl fmt::Debug for DragSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragSession")
            .field("pointer_id", &self.pointer_id)
            .field("start_offset", &self.start_offset)
            .field("start_index", &self.start_index)
            .field("raw_offset", &self.raw_offset)
            .field("last_timestamp", &self.last_timestamp)
            .field("samples", &self.velocity.sample_count())
            .field("from_scrollable", &self.active_scrollable.is_some())
            .finish()
    }
}

/// Pointer-down deferred to a nested scrollable.
struct PendingHandoff {
    pointer_id: PointerId,
    handoff: ScrollHandoff,
    start_index: Option<usize>,
    last_position: f32,
}

#[derive(Default)]
enum Tracking {
    #[default]
    None,
    Pending(PendingHandoff),
    Dragging(DragSession),
}

/// What a pointer-move did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    Ignored,
    /// A nested scrollable took the movement.
    Scrolled,
    /// The drawer follows the pointer to `raw_offset`. `started` is set on
    /// the move that handed control over from a scrollable.
    Dragged { raw_offset: f32, started: bool },
}

/// Offsets a drag was released with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release {
    pub offset: f32,
    pub offset_with_velocity: f32,
    pub start_index: Option<usize>,
}

#[derive(Default)]
pub struct GestureController {
    tracking: Tracking,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.tracking, Tracking::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.tracking {
            Tracking::Dragging(session) => Some(session),
            _ => None,
        }
    }

    /// Whether a pointer is down, dragging or not.
    pub fn is_tracking(&self) -> bool {
        !matches!(self.tracking, Tracking::None)
    }

    pub fn active_pointer(&self) -> Option<PointerId> {
        match &self.tracking {
            Tracking::None => None,
            Tracking::Pending(pending) => Some(pending.pointer_id),
            Tracking::Dragging(session) => Some(session.pointer_id),
        }
    }

    /// Starts tracking `event` from `offset`. Returns whether a drag session
    /// opened immediately.
    pub fn begin(
        &mut self,
        event: &PointerEvent,
        start: DragStart,
        side: Side,
        offset: f32,
        start_index: Option<usize>,
        cache_reset_ms: u64,
    ) -> bool {
        match start {
            DragStart::Ignore => {
                self.tracking = Tracking::None;
                false
            }
            DragStart::Drag => {
                log::debug!("drag started at offset {offset:.1}");
                self.tracking = Tracking::Dragging(DragSession::new(
                    event,
                    side,
                    offset,
                    start_index,
                    cache_reset_ms,
                ));
                true
            }
            DragStart::DeferToScroll(handoff) => {
                log::debug!("pointer-down deferred to nested scrollable");
                self.tracking = Tracking::Pending(PendingHandoff {
                    pointer_id: event.id,
                    handoff,
                    start_index,
                    last_position: side.axis_position(event.position),
                });
                false
            }
        }
    }

    /// Follows the pointer. `offset` is the drawer's current offset, used if
    /// this move hands control over from a scrollable.
    pub fn pointer_move(
        &mut self,
        event: &PointerEvent,
        side: Side,
        offset: f32,
        cache_reset_ms: u64,
    ) -> MoveOutcome {
        if self.active_pointer() != Some(event.id) {
            log::trace!("ignoring move from inactive pointer {}", event.id);
            return MoveOutcome::Ignored;
        }
        let position = side.axis_position(event.position);

        match &mut self.tracking {
            Tracking::None => MoveOutcome::Ignored,
            Tracking::Pending(pending) => {
                let pointer_delta = position - pending.last_position;
                pending.last_position = position;
                let HandoffStep::Transfer { excess } = pending.handoff.feed(pointer_delta) else {
                    return MoveOutcome::Scrolled;
                };

                let Tracking::Pending(pending) = std::mem::take(&mut self.tracking) else {
                    return MoveOutcome::Ignored;
                };
                let mut session = DragSession::new(event, side, offset, pending.start_index, cache_reset_ms);
                let delta = side.offset_delta(excess);
                session.raw_offset += delta;
                session.velocity.add_sample(delta, event.timestamp_millis);
                session.active_scrollable = Some(Rc::clone(pending.handoff.scrollable()));
                let raw_offset = session.raw_offset;
                self.tracking = Tracking::Dragging(session);
                MoveOutcome::Dragged {
                    raw_offset,
                    started: true,
                }
            }
            Tracking::Dragging(session) => {
                let delta = side.offset_delta(position - session.last_position);
                session.last_position = position;
                session.last_timestamp = event.timestamp_millis;
                session.raw_offset += delta;
                session.velocity.add_sample(delta, event.timestamp_millis);
                log::trace!("drag raw offset {:.1} (delta {delta:.1})", session.raw_offset);
                MoveOutcome::Dragged {
                    raw_offset: session.raw_offset,
                    started: false,
                }
            }
        }
    }

    /// Ends the gesture for `event`'s pointer. Returns the release offsets if
    /// a drag session was open; `offset` is the displayed offset at release.
    pub fn release(
        &mut self,
        event: &PointerEvent,
        offset: f32,
        velocity_function: &dyn Fn(f32, f32) -> f32,
    ) -> Option<Release> {
        if self.active_pointer() != Some(event.id) {
            log::trace!("ignoring release from inactive pointer {}", event.id);
            return None;
        }
        match std::mem::take(&mut self.tracking) {
            Tracking::Dragging(session) => {
                let window = session.velocity.window(event.timestamp_millis);
                let extra = if window.is_empty() {
                    0.0
                } else {
                    velocity_function(window.distance, window.elapsed_ms as f32)
                };
                log::debug!(
                    "drag released at offset {offset:.1}, projected {:.1} ({:.3} px/ms)",
                    offset + extra,
                    window.velocity()
                );
                Some(Release {
                    offset,
                    offset_with_velocity: offset + extra,
                    start_index: session.start_index,
                })
            }
            Tracking::Pending(_) | Tracking::None => None,
        }
    }

    /// Drops any tracking without producing a release.
    pub fn reset(&mut self) {
        self.tracking = Tracking::None;
    }
}

impl fmt::Debug for GestureController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tracking {
            Tracking::None => f.write_str("GestureController(idle)"),
            Tracking::Pending(pending) => f
                .debug_struct("GestureController")
                .field("pending", &pending.handoff)
                .finish(),
            Tracking::Dragging(session) => f
                .debug_struct("GestureController")
                .field("session", session)
                .finish(),
        }
    }
}

/// Snap point a release settles on. Without skipping, the target stays within
/// one index of the point the drag started from.
pub fn release_target(
    snap_points: &[ResolvedSnapPoint],
    release: &Release,
    allow_skipping_snap_points: bool,
) -> Option<ResolvedSnapPoint> {
    let closest = *find_closest_snap_point(
        snap_points,
        release.offset,
        release.offset_with_velocity,
        allow_skipping_snap_points,
    )?;
    match release.start_index {
        Some(start) if !allow_skipping_snap_points => {
            let last = snap_points.len().saturating_sub(1);
            let start = start.min(last);
            let index = closest
                .index
                .clamp(start.saturating_sub(1), (start + 1).min(last));
            snap_points.get(index).copied()
        }
        _ => Some(closest),
    }
}

#[cfg(test)]
#[path = "tests/gesture_tests.rs"]
mod tests;
