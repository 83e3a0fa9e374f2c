//! Shared gesture constants.
//!
//! All distances are in logical pixels. For very high-density touch screens
//! hosts may want to scale them by the device's DPI factor.

/// Slack given to a nested scrollable before a drag transfers to the drawer.
///
/// Movement the scrollable does not consume accumulates against this value;
/// once exceeded, the drawer takes over.
pub const DEFAULT_SCROLL_THRESHOLD: f32 = 10.0;

/// Gap between drag samples after which the velocity history is discarded.
///
/// Prevents a drag that paused and then resumed from reporting the pause-free
/// velocity of its earlier motion.
pub const DEFAULT_VELOCITY_CACHE_RESET_MS: u64 = 200;

/// Maximum fling velocity in logical pixels per second.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Bound approached by the default overdrag damping curve.
pub const DEFAULT_DAMP_LIMIT: f32 = 80.0;
