//! Host-supplied drawer configuration.

use std::fmt;
use std::rc::Rc;

use drawerpose_animation::{AnimationSpec, AnimationType, Easing, SpringSpec};
use drawerpose_foundation::gesture_constants::{
    DEFAULT_SCROLL_THRESHOLD, DEFAULT_VELOCITY_CACHE_RESET_MS,
};

use crate::damping::default_damp;
use crate::error::{DrawerError, PointError};
use crate::side::Side;
use crate::snap_points::{effective_snap_points, validate_break_points, BreakPointSpec, SnapPointSpec};
use crate::transition::TransitionState;
use crate::velocity::default_velocity_function;

/// Duration of the open, close and resize tweens.
pub const DRAWER_TRANSITION_MILLIS: u64 = 500;

/// Overdrag distance to displayed distance.
pub type DampFunction = Rc<dyn Fn(f32) -> f32>;

/// `(distance, elapsed_ms)` of the final drag window to the extra offset a
/// release carries.
pub type VelocityFunction = Rc<dyn Fn(f32, f32) -> f32>;

/// Animation used for each transition phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawerTransitions {
    pub opening: AnimationType,
    pub closing: AnimationType,
    pub snapping: AnimationType,
    pub resizing: AnimationType,
}

impl DrawerTransitions {
    pub fn for_state(&self, state: TransitionState) -> Option<AnimationType> {
        match state {
            TransitionState::Idle => None,
            TransitionState::Opening => Some(self.opening),
            TransitionState::Closing => Some(self.closing),
            TransitionState::Snapping => Some(self.snapping),
            TransitionState::Resizing => Some(self.resizing),
        }
    }
}

impl Default for DrawerTransitions {
    fn default() -> Self {
        let tween = AnimationType::Tween(AnimationSpec::tween(DRAWER_TRANSITION_MILLIS, Easing::DRAWER));
        Self {
            opening: tween,
            closing: tween,
            snapping: AnimationType::Spring(SpringSpec::default()),
            resizing: tween,
        }
    }
}

/// Drawer configuration. Every field has a default; adjust with the
/// `with_*` builders.
#[derive(Clone)]
pub struct DrawerConfig {
    /// Resting positions ordered from most closed to most open. Fewer than two
    /// points behave as plain closed/open.
    pub snap_points: Vec<SnapPointSpec>,
    /// One per gap between snap points. `None` picks the nearest point.
    pub break_points: Option<Vec<BreakPointSpec>>,
    /// Point the drawer opens to. Defaults to the most open point.
    pub default_snap_point: Option<SnapPointSpec>,
    pub side: Side,
    pub velocity_cache_reset_ms: u64,
    pub allow_skipping_snap_points: bool,
    pub handle_scrollable_elements: bool,
    /// Unconsumed pointer travel a nested scrollable absorbs before the
    /// drawer takes over.
    pub scroll_threshold: f32,
    pub transition_resize: bool,
    pub damp_function: DampFunction,
    pub velocity_function: VelocityFunction,
    pub transitions: DrawerTransitions,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            snap_points: Vec::new(),
            break_points: None,
            default_snap_point: None,
            side: Side::default(),
            velocity_cache_reset_ms: DEFAULT_VELOCITY_CACHE_RESET_MS,
            allow_skipping_snap_points: false,
            handle_scrollable_elements: true,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            transition_resize: false,
            damp_function: Rc::new(default_damp),
            velocity_function: Rc::new(default_velocity_function),
            transitions: DrawerTransitions::default(),
        }
    }
}

impl DrawerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snap_points(mut self, points: impl IntoIterator<Item = SnapPointSpec>) -> Self {
        self.snap_points = points.into_iter().collect();
        self
    }

    /// Parses textual points (`"0.5"`, `"120px"`), failing on the first
    /// malformed entry.
    pub fn try_with_snap_points<'a>(
        self,
        points: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, PointError> {
        let parsed = points
            .into_iter()
            .map(str::parse)
            .collect::<Result<Vec<SnapPointSpec>, _>>()?;
        Ok(self.with_snap_points(parsed))
    }

    pub fn with_break_points(mut self, points: impl IntoIterator<Item = BreakPointSpec>) -> Self {
        self.break_points = Some(points.into_iter().collect());
        self
    }

    pub fn try_with_break_points<'a>(
        self,
        points: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, PointError> {
        let parsed = points
            .into_iter()
            .map(str::parse)
            .collect::<Result<Vec<BreakPointSpec>, _>>()?;
        Ok(self.with_break_points(parsed))
    }

    pub fn with_default_snap_point(mut self, point: SnapPointSpec) -> Self {
        self.default_snap_point = Some(point);
        self
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn with_velocity_cache_reset(mut self, millis: u64) -> Self {
        self.velocity_cache_reset_ms = millis;
        self
    }

    pub fn with_allow_skipping_snap_points(mut self, allow: bool) -> Self {
        self.allow_skipping_snap_points = allow;
        self
    }

    pub fn with_handle_scrollable_elements(mut self, handle: bool) -> Self {
        self.handle_scrollable_elements = handle;
        self
    }

    pub fn with_scroll_threshold(mut self, threshold: f32) -> Self {
        self.scroll_threshold = threshold;
        self
    }

    pub fn with_transition_resize(mut self, transition: bool) -> Self {
        self.transition_resize = transition;
        self
    }

    pub fn with_damp_function(mut self, damp: impl Fn(f32) -> f32 + 'static) -> Self {
        self.damp_function = Rc::new(damp);
        self
    }

    pub fn with_velocity_function(mut self, velocity: impl Fn(f32, f32) -> f32 + 'static) -> Self {
        self.velocity_function = Rc::new(velocity);
        self
    }

    pub fn with_transitions(mut self, transitions: DrawerTransitions) -> Self {
        self.transitions = transitions;
        self
    }

    /// Snap points the drawer actually uses, after degenerate lists expand.
    pub fn effective_snap_points(&self) -> Vec<SnapPointSpec> {
        effective_snap_points(&self.snap_points).into_vec()
    }

    /// Index of the point the drawer opens to.
    pub fn default_snap_index(&self) -> Result<usize, DrawerError> {
        let points = effective_snap_points(&self.snap_points);
        match self.default_snap_point {
            None => Ok(points.len().saturating_sub(1)),
            Some(point) => points
                .iter()
                .position(|candidate| candidate.same_point(&point))
                .ok_or(DrawerError::UnknownSnapPoint { point }),
        }
    }

    /// Checks everything that does not depend on the drawer size. Pixel and
    /// fraction points are only compared once a size is known.
    pub fn validate(&self) -> Result<(), DrawerError> {
        if !self.scroll_threshold.is_finite() || self.scroll_threshold < 0.0 {
            return Err(DrawerError::InvalidThreshold {
                name: "scroll_threshold",
                value: self.scroll_threshold,
            });
        }
        validate_break_points(&self.snap_points, self.break_points.as_deref())?;

        for (index, pair) in self.snap_points.windows(2).enumerate() {
            let out_of_order = match (pair[0], pair[1]) {
                (SnapPointSpec::Fraction(previous), SnapPointSpec::Fraction(next))
                | (SnapPointSpec::Pixels(previous), SnapPointSpec::Pixels(next)) => next < previous,
                _ => false,
            };
            if out_of_order {
                // Reported as offsets on a unit-sized drawer.
                let offset_of = |point| crate::snap_points::resolve_point(point, 1.0);
                return Err(DrawerError::UnsortedSnapPoints {
                    index: index + 1,
                    offset: offset_of(pair[1]),
                    previous: offset_of(pair[0]),
                });
            }
        }

        self.default_snap_index().map(|_| ())
    }
}

impl fmt::Debug for DrawerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawerConfig")
            .field("snap_points", &self.snap_points)
            .field("break_points", &self.break_points)
            .field("default_snap_point", &self.default_snap_point)
            .field("side", &self.side)
            .field("velocity_cache_reset_ms", &self.velocity_cache_reset_ms)
            .field("allow_skipping_snap_points", &self.allow_skipping_snap_points)
            .field("handle_scrollable_elements", &self.handle_scrollable_elements)
            .field("scroll_threshold", &self.scroll_threshold)
            .field("transition_resize", &self.transition_resize)
            .field("transitions", &self.transitions)
            .finish_non_exhaustive()
    }
}
