//! Spline-based fling decay.
//!
//! Used to project how far a released drag would coast, which is what lets a
//! quick flick carry the drawer past a neighbouring snap point.

use std::sync::LazyLock;

const INFLECTION: f32 = 0.35;
const START_TENSION: f32 = 0.5;
const END_TENSION: f32 = 1.0;
const P1: f32 = START_TENSION * INFLECTION;
const P2: f32 = 1.0 - END_TENSION * (1.0 - INFLECTION);

const NB_SAMPLES: usize = 100;

/// Distance fraction travelled at each of `NB_SAMPLES + 1` evenly spaced times.
static SPLINE_POSITIONS: LazyLock<[f32; NB_SAMPLES + 1]> = LazyLock::new(|| {
    let mut positions = [0.0f32; NB_SAMPLES + 1];
    let mut x_min = 0.0f32;

    for (i, slot) in positions.iter_mut().enumerate().take(NB_SAMPLES) {
        let alpha = i as f32 / NB_SAMPLES as f32;

        let mut x_max = 1.0f32;
        let (x, coef) = loop {
            let x_mid = x_min + (x_max - x_min) / 2.0;
            let c = 3.0 * x_mid * (1.0 - x_mid);
            let tx = c * ((1.0 - x_mid) * P1 + x_mid * P2) + x_mid * x_mid * x_mid;
            if (tx - alpha).abs() < 1e-5 {
                break (x_mid, c);
            }
            if tx > alpha {
                x_max = x_mid;
            } else {
                x_min = x_mid;
            }
        };
        *slot = coef * ((1.0 - x) * START_TENSION + x) + x * x * x;
    }

    positions[NB_SAMPLES] = 1.0;
    positions
});

/// Fraction of the total fling distance covered at `time` (0.0 to 1.0).
pub fn fling_distance_fraction(time: f32) -> f32 {
    let clamped = time.clamp(0.0, 1.0);
    let index = (NB_SAMPLES as f32 * clamped) as usize;
    if index >= NB_SAMPLES {
        return 1.0;
    }
    let t_inf = index as f32 / NB_SAMPLES as f32;
    let t_sup = (index + 1) as f32 / NB_SAMPLES as f32;
    let d_inf = SPLINE_POSITIONS[index];
    let d_sup = SPLINE_POSITIONS[index + 1];
    d_inf + (clamped - t_inf) * (d_sup - d_inf) / (t_sup - t_inf)
}

const GRAVITY_EARTH: f32 = 9.80665;
const INCHES_PER_METER: f32 = 39.37;
/// `(ln(0.78) / ln(0.9)).abs()`
const DECELERATION_RATE: f32 = 2.358_201_6;

fn compute_deceleration(friction: f32, density: f32) -> f32 {
    GRAVITY_EARTH * INCHES_PER_METER * density * 160.0 * friction
}

/// Physical fling model parameterised by friction and screen density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingCalculator {
    friction: f32,
    physical_coefficient: f32,
}

impl FlingCalculator {
    pub const DEFAULT_FRICTION: f32 = 0.015;

    pub fn new(friction: f32, density: f32) -> Self {
        Self {
            friction,
            physical_coefficient: compute_deceleration(0.84, density),
        }
    }

    pub fn with_density(density: f32) -> Self {
        Self::new(Self::DEFAULT_FRICTION, density)
    }

    fn spline_deceleration(&self, velocity: f32) -> f64 {
        (INFLECTION as f64 * velocity.abs() as f64
            / (self.friction * self.physical_coefficient) as f64)
            .ln()
    }

    /// Duration of a fling in milliseconds. Zero for a zero velocity.
    pub fn fling_duration(&self, velocity: f32) -> i64 {
        if velocity == 0.0 || !velocity.is_finite() {
            return 0;
        }
        let l = self.spline_deceleration(velocity);
        (1000.0 * (l / (DECELERATION_RATE as f64 - 1.0)).exp()) as i64
    }

    /// Unsigned distance a fling at `velocity` px/s travels before stopping.
    pub fn fling_distance(&self, velocity: f32) -> f32 {
        if velocity == 0.0 || !velocity.is_finite() {
            return 0.0;
        }
        let l = self.spline_deceleration(velocity);
        let decel_minus_one = DECELERATION_RATE as f64 - 1.0;
        self.friction
            * self.physical_coefficient
            * (DECELERATION_RATE as f64 / decel_minus_one * l).exp() as f32
    }
}

/// Decay animation whose end point depends only on the initial velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineBasedDecaySpec {
    calculator: FlingCalculator,
}

impl SplineBasedDecaySpec {
    pub fn new(density: f32) -> Self {
        Self {
            calculator: FlingCalculator::with_density(density),
        }
    }

    pub fn with_calculator(calculator: FlingCalculator) -> Self {
        Self { calculator }
    }

    pub fn duration_nanos(&self, initial_velocity: f32) -> i64 {
        self.calculator.fling_duration(initial_velocity) * 1_000_000
    }

    pub fn value_at_nanos(&self, play_time_nanos: i64, initial_value: f32, initial_velocity: f32) -> f32 {
        let duration_ms = self.calculator.fling_duration(initial_velocity);
        let fraction = if duration_ms > 0 {
            (play_time_nanos / 1_000_000) as f32 / duration_ms as f32
        } else {
            1.0
        };
        initial_value
            + self.calculator.fling_distance(initial_velocity)
                * initial_velocity.signum()
                * fling_distance_fraction(fraction)
    }

    /// Where the fling comes to rest.
    pub fn target_value(&self, initial_value: f32, initial_velocity: f32) -> f32 {
        if initial_velocity == 0.0 {
            return initial_value;
        }
        initial_value + self.calculator.fling_distance(initial_velocity) * initial_velocity.signum()
    }
}
