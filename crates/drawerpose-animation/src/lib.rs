//! Animation system for Drawerpose
//!
//! Time-based tweens, spring physics and fling decay, all advanced by the
//! runtime's frame clock.

mod animation;
mod decay_spec;

pub use animation::*;
pub use decay_spec::*;
