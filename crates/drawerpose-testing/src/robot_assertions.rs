//! Assertion helpers for drawer robot tests.

use drawerpose_drawer::{DrawerState, TransitionState};

/// Assert that a value is within `tolerance` of `expected`.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that the drawer is idle and resting at `translate`.
pub fn assert_resting_at(drawer: &DrawerState, translate: f32, msg: &str) {
    assert_eq!(
        drawer.transition_state(),
        TransitionState::Idle,
        "{}: drawer still in transition",
        msg
    );
    assert!(!drawer.is_dragging(), "{}: drawer still dragging", msg);
    assert_approx_eq(drawer.translate(), translate, 0.5, msg);
}

/// Assert that `is_dragging` agrees with the presence of a drag session.
pub fn assert_drag_consistent(drawer: &DrawerState, msg: &str) {
    let snapshot = drawer.snapshot();
    assert_eq!(
        snapshot.is_dragging,
        drawer.is_dragging(),
        "{}: snapshot disagrees with drawer",
        msg
    );
    if snapshot.is_dragging {
        assert!(
            snapshot.transition_state.is_idle(),
            "{}: dragging while {}",
            msg,
            snapshot.transition_state
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approx_eq_accepts_values_within_tolerance() {
        assert_approx_eq(10.2, 10.0, 0.5, "close enough");
    }

    #[test]
    #[should_panic(expected = "too far")]
    fn approx_eq_rejects_distant_values() {
        assert_approx_eq(12.0, 10.0, 0.5, "too far");
    }
}
