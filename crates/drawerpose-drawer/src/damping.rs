//! Resistance past the open and closed extremes.

use drawerpose_foundation::gesture_constants::DEFAULT_DAMP_LIMIT;

/// `d / (1 + d / 80)`: linear at first, never exceeding 80px.
pub fn default_damp(overdrag: f32) -> f32 {
    if overdrag <= 0.0 || !overdrag.is_finite() {
        return 0.0;
    }
    overdrag / (1.0 + overdrag / DEFAULT_DAMP_LIMIT)
}

/// Maps a raw, undamped translate to the one that is displayed.
///
/// Inside `[0, size]` the raw value passes through unchanged. Beyond either
/// end only `damp(overdrag)` of the overdrag is shown.
pub fn damped_translate(raw: f32, size: f32, damp: impl Fn(f32) -> f32) -> f32 {
    if raw < 0.0 {
        -damp(-raw).max(0.0)
    } else if raw > size {
        size + damp(raw - size).max(0.0)
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_curve_is_monotonic_and_bounded() {
        let mut previous = 0.0;
        for step in 1..=200 {
            let damped = default_damp(step as f32 * 10.0);
            assert!(damped > previous);
            assert!(damped < DEFAULT_DAMP_LIMIT);
            assert!(damped < step as f32 * 10.0);
            previous = damped;
        }
        assert_eq!(default_damp(0.0), 0.0);
        assert_eq!(default_damp(-5.0), 0.0);
    }

    #[test]
    fn inside_bounds_is_untouched() {
        for raw in [0.0, 1.0, 150.0, 400.0] {
            assert_eq!(damped_translate(raw, 400.0, default_damp), raw);
        }
    }

    #[test]
    fn overdrag_is_resisted_on_both_ends() {
        let past_open = damped_translate(-80.0, 400.0, default_damp);
        assert_eq!(past_open, -40.0);

        let past_closed = damped_translate(480.0, 400.0, default_damp);
        assert_eq!(past_closed, 440.0);
    }

    #[test]
    fn custom_curves_are_honoured() {
        let stiff = |d: f32| d * 0.1;
        assert_eq!(damped_translate(-100.0, 400.0, stiff), -10.0);
    }
}
