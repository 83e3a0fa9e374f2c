//! Core runtime for Drawerpose.
//!
//! Everything in the drawer engine runs on one thread and advances only when
//! the host delivers an event or a frame. This crate provides the pieces that
//! make that explicit: a frame-callback queue ([`Runtime`]), a [`FrameClock`]
//! for scheduling single-shot frame work, and [`Listeners`] for notifying
//! observers after a batch of state changes.

pub mod frame_clock;
pub mod listeners;
pub mod platform;
pub mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock, NextFrame};
pub use listeners::{ListenerId, Listeners, Subscription};
pub use platform::{DefaultScheduler, RuntimeScheduler};
pub use runtime::{Runtime, RuntimeHandle};

pub type FrameCallbackId = u64;

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod runtime_tests;

#[cfg(test)]
#[path = "tests/listeners_tests.rs"]
mod listeners_tests;
