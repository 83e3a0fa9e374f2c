//! Tween and spring animations driven by the frame clock.
//!
//! An [`Animatable`] owns one value. Each `animate_to*` call replaces the
//! running animation outright: the previous completion callback is dropped
//! without being invoked, so at most one completion is ever pending.

use std::cell::RefCell;
use std::rc::Rc;

use drawerpose_core::{FrameCallbackRegistration, RuntimeHandle};

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction as f64
    }
}

/// Trait for values that can participate in spring animations.
pub trait SpringScalar: Lerp + Clone {
    /// Convert the value to `f32` for physics calculations.
    fn to_f32(&self) -> f32;

    /// Fraction of the way from `start` to `target` that `value` represents.
    fn spring_progress(start: &Self, target: &Self, value: f32) -> f32 {
        let start_val = start.to_f32();
        let target_val = target.to_f32();

        if (target_val - start_val).abs() < f32::EPSILON {
            1.0
        } else {
            (value - start_val) / (target_val - start_val)
        }
    }

    fn is_near_target(current: &Self, target: &Self, threshold: f32) -> bool {
        (current.to_f32() - target.to_f32()).abs() <= threshold
    }
}

impl SpringScalar for f32 {
    fn to_f32(&self) -> f32 {
        *self
    }
}

impl SpringScalar for f64 {
    fn to_f32(&self) -> f32 {
        *self as f32
    }
}

/// Easing curves for tween animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    LinearEasing,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Material standard curve.
    FastOutSlowInEasing,
    LinearOutSlowInEasing,
    FastOutLinearEasing,
    /// CSS-style `cubic-bezier(x1, y1, x2, y2)`.
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl Easing {
    /// The drawer's open/close curve, `cubic-bezier(0.32, 0.72, 0, 1)`.
    pub const DRAWER: Easing = Easing::CubicBezier {
        x1: 0.32,
        y1: 0.72,
        x2: 0.0,
        y2: 1.0,
    };

    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        match *self {
            Easing::LinearEasing => fraction,
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowInEasing => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::LinearOutSlowInEasing => cubic_bezier(0.0, 0.0, 0.2, 1.0, fraction),
            Easing::FastOutLinearEasing => cubic_bezier(0.4, 0.0, 1.0, 1.0, fraction),
            Easing::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(x1, y1, x2, y2, fraction),
        }
    }
}

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    fn sample_curve(a: f32, b: f32, c: f32, t: f32) -> f32 {
        ((a * t + b) * t + c) * t
    }

    fn sample_derivative(a: f32, b: f32, c: f32, t: f32) -> f32 {
        (3.0 * a * t + 2.0 * b) * t + c
    }

    // Newton-Raphson for the parametric t matching x, bisection if it stalls.
    let mut t = fraction;
    let mut converged = false;
    for _ in 0..8 {
        let x = sample_curve(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            converged = true;
            break;
        }
        let dx = sample_derivative(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !converged {
        let mut t0 = 0.0;
        let mut t1 = 1.0;
        t = fraction;
        for _ in 0..24 {
            let delta = sample_curve(ax, bx, cx, t) - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                t1 = t;
            } else {
                t0 = t;
            }
            t = 0.5 * (t0 + t1);
        }
    }

    sample_curve(ay, by, cy, t)
}

/// Tween specification: duration, easing and optional delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
    pub delay_millis: u64,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::LinearEasing)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowInEasing)
    }
}

/// Damped harmonic oscillator parameters.
///
/// Thresholds are in value units (pixels for the drawer) and value units per
/// second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 = critically damped, < 1.0 bounces, > 1.0 is sluggish.
    pub damping_ratio: f32,
    pub stiffness: f32,
    pub velocity_threshold: f32,
    pub position_threshold: f32,
}

impl SpringSpec {
    pub fn default_spring() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            velocity_threshold: 0.5,
            position_threshold: 0.1,
        }
    }

    pub fn bouncy() -> Self {
        Self {
            damping_ratio: 0.5,
            ..Self::default_spring()
        }
    }

    pub fn stiff() -> Self {
        Self {
            stiffness: 3000.0,
            ..Self::default_spring()
        }
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    Tween(AnimationSpec),
    Spring(SpringSpec),
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Tween(AnimationSpec::default())
    }
}

/// Integration step for spring physics, in seconds.
const SPRING_TIMESTEP: f32 = 1.0 / 240.0;

/// Frames longer than this are integrated as if they were this long.
const MAX_FRAME_SECONDS: f32 = 0.1;

type ValueListener<T> = Rc<dyn Fn(&T)>;

/// A value animated on the frame clock.
pub struct Animatable<T: SpringScalar + 'static> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

struct AnimatableInner<T: SpringScalar + 'static> {
    runtime: RuntimeHandle,
    current: T,
    /// Value units per second, spring animations only.
    velocity: f32,
    start: T,
    target: T,
    animation_type: AnimationType,
    start_time_nanos: Option<u64>,
    last_frame_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    running: bool,
    on_value: Option<ValueListener<T>>,
    on_end: Option<Box<dyn FnOnce()>>,
}

impl<T: SpringScalar + 'static> AnimatableInner<T> {
    fn cancel_running(&mut self) {
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
        self.on_end = None;
        self.running = false;
        self.start_time_nanos = None;
        self.last_frame_nanos = None;
    }

    fn settle(&mut self) {
        self.current = self.target.clone();
        self.start = self.target.clone();
        self.velocity = 0.0;
        self.running = false;
        self.start_time_nanos = None;
        self.last_frame_nanos = None;
    }
}

impl<T: SpringScalar + 'static> Animatable<T> {
    pub fn new(initial: T, runtime: RuntimeHandle) -> Self {
        let inner = AnimatableInner {
            runtime,
            current: initial.clone(),
            velocity: 0.0,
            start: initial.clone(),
            target: initial,
            animation_type: AnimationType::default(),
            start_time_nanos: None,
            last_frame_nanos: None,
            registration: None,
            running: false,
            on_value: None,
            on_end: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Called with every value produced by a frame. Not called by `snap_to`.
    pub fn set_on_value_change(&self, listener: impl Fn(&T) + 'static) {
        self.inner.borrow_mut().on_value = Some(Rc::new(listener));
    }

    pub fn value(&self) -> T {
        self.inner.borrow().current.clone()
    }

    pub fn target(&self) -> T {
        self.inner.borrow().target.clone()
    }

    pub fn velocity(&self) -> f32 {
        self.inner.borrow().velocity
    }

    pub fn animation_type(&self) -> AnimationType {
        self.inner.borrow().animation_type
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }

    pub fn animate_to(&self, target: T, animation: AnimationType) {
        self.start_animation(target, animation, None);
    }

    /// Like [`animate_to`](Self::animate_to), running `on_end` once the value
    /// settles on `target`. Replacing or stopping the animation drops
    /// `on_end` without calling it.
    pub fn animate_to_then(
        &self,
        target: T,
        animation: AnimationType,
        on_end: impl FnOnce() + 'static,
    ) {
        self.start_animation(target, animation, Some(Box::new(on_end)));
    }

    fn start_animation(
        &self,
        target: T,
        animation: AnimationType,
        on_end: Option<Box<dyn FnOnce()>>,
    ) {
        {
            let mut inner = self.inner.borrow_mut();
            let carried_velocity = inner.velocity;
            inner.cancel_running();
            inner.start = inner.current.clone();
            inner.target = target;
            inner.animation_type = animation;
            inner.velocity = match animation {
                AnimationType::Spring(_) => carried_velocity,
                AnimationType::Tween(_) => 0.0,
            };
            inner.running = true;
            inner.on_end = on_end;
        }
        Self::schedule_frame(&self.inner);
    }

    /// Jumps to `target` and cancels any running animation.
    pub fn snap_to(&self, target: T) {
        let mut inner = self.inner.borrow_mut();
        inner.cancel_running();
        inner.current = target.clone();
        inner.start = target.clone();
        inner.target = target;
        inner.velocity = 0.0;
    }

    /// Cancels any running animation, leaving the value where it is.
    pub fn stop(&self) -> T {
        let mut inner = self.inner.borrow_mut();
        inner.cancel_running();
        inner.target = inner.current.clone();
        inner.start = inner.current.clone();
        inner.velocity = 0.0;
        inner.current.clone()
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) {
        let clock = {
            let inner = this.borrow();
            if inner.registration.is_some() || !inner.running {
                return;
            }
            inner.runtime.frame_clock()
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        if !registration.is_active() {
            log::warn!("animation requested a frame after its runtime was dropped");
        }
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, frame_time_nanos: u64) {
        let (value, listener, finished) = {
            let mut inner = this.borrow_mut();
            inner.registration = None;
            if !inner.running {
                return;
            }

            let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
            let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);

            let finished = if T::is_near_target(&inner.start, &inner.target, f32::EPSILON)
                && T::is_near_target(&inner.current, &inner.target, f32::EPSILON)
                && inner.velocity == 0.0
            {
                inner.settle();
                true
            } else {
                match inner.animation_type {
                    AnimationType::Tween(spec) => Self::step_tween(&mut inner, spec, elapsed_nanos),
                    AnimationType::Spring(spec) => {
                        Self::step_spring(&mut inner, spec, frame_time_nanos)
                    }
                }
            };

            (inner.current.clone(), inner.on_value.clone(), finished)
        };

        let on_end = if finished {
            this.borrow_mut().on_end.take()
        } else {
            Self::schedule_frame(this);
            None
        };

        if let Some(listener) = listener {
            listener(&value);
        }
        if let Some(on_end) = on_end {
            on_end();
        }
    }

    fn step_tween(inner: &mut AnimatableInner<T>, spec: AnimationSpec, elapsed_nanos: u64) -> bool {
        let delay_nanos = spec.delay_millis * 1_000_000;
        if elapsed_nanos < delay_nanos {
            return false;
        }
        let duration_nanos = (spec.duration_millis * 1_000_000).max(1);
        let linear_progress =
            ((elapsed_nanos - delay_nanos) as f32 / duration_nanos as f32).clamp(0.0, 1.0);
        if linear_progress >= 1.0 {
            inner.settle();
            return true;
        }
        let progress = spec.easing.transform(linear_progress);
        inner.current = inner.start.lerp(&inner.target, progress);
        false
    }

    fn step_spring(
        inner: &mut AnimatableInner<T>,
        spec: SpringSpec,
        frame_time_nanos: u64,
    ) -> bool {
        let last = inner.last_frame_nanos.replace(frame_time_nanos);
        let dt = match last {
            Some(last) => {
                (frame_time_nanos.saturating_sub(last) as f32 / 1_000_000_000.0)
                    .min(MAX_FRAME_SECONDS)
            }
            None => 0.0,
        };
        if dt == 0.0 {
            return false;
        }

        let stiffness = spec.stiffness;
        let damping = 2.0 * spec.damping_ratio * stiffness.sqrt();
        let target = inner.target.to_f32();
        let mut position = inner.current.to_f32();
        let mut velocity = inner.velocity;

        // Semi-implicit Euler in value space.
        let mut integrated = 0.0f32;
        while integrated < dt {
            let step = SPRING_TIMESTEP.min(dt - integrated);
            let force = -stiffness * (position - target) - damping * velocity;
            velocity += force * step;
            position += velocity * step;
            integrated += step;
        }

        inner.velocity = velocity;
        let progress = T::spring_progress(&inner.start, &inner.target, position);
        inner.current = inner.start.lerp(&inner.target, progress);

        let at_rest = velocity.abs() < spec.velocity_threshold;
        let near_target = T::is_near_target(&inner.current, &inner.target, spec.position_threshold);
        if at_rest && near_target {
            inner.settle();
            true
        } else {
            false
        }
    }
}

impl<T: SpringScalar + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
