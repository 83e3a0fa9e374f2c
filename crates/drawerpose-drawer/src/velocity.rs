//! Release velocity projection.

use drawerpose_animation::SplineBasedDecaySpec;
use drawerpose_foundation::gesture_constants::MAX_FLING_VELOCITY;

/// Extra offset a release carries, given the `distance` moved over the last
/// `time_ms` milliseconds of the drag.
///
/// The drag speed is capped at [`MAX_FLING_VELOCITY`] px/s and projected
/// through the spline fling decay, so the result keeps the sign of
/// `distance`.
pub fn default_velocity_function(distance: f32, time_ms: f32) -> f32 {
    if time_ms <= 0.0 || distance == 0.0 || !distance.is_finite() {
        return 0.0;
    }
    let velocity = (distance / time_ms * 1000.0).clamp(-MAX_FLING_VELOCITY, MAX_FLING_VELOCITY);
    SplineBasedDecaySpec::new(1.0).target_value(0.0, velocity)
}
