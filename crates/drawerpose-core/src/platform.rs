//! Platform abstraction traits for the Drawerpose runtime.
//!
//! The runtime never drives its own frame loop. Hosts implement
//! [`RuntimeScheduler`] to learn when a frame is wanted (for example by
//! calling `requestAnimationFrame`) and then call
//! [`RuntimeHandle::drain_frame_callbacks`](crate::RuntimeHandle::drain_frame_callbacks).

/// Schedules work for the runtime.
///
/// Implementations must be safe to use from multiple threads.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Scheduler that ignores frame requests. Hosts that poll
/// [`Runtime::needs_frame`](crate::Runtime::needs_frame) can use this.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}
