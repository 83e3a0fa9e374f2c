//! The drawer handle.
//!
//! [`DrawerState`] owns everything about one drawer instance: geometry, the
//! active gesture, the transition state machine and the animation driving
//! `translate`. Nested drawers are simply separate handles.
//!
//! Every entry point finishes recomputing derived values before observers are
//! notified, once per event. Dialog host calls come after that. Observers and
//! hosts may call back into the drawer.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use drawerpose_animation::Animatable;
use drawerpose_core::{Listeners, RuntimeHandle, Subscription};
use drawerpose_foundation::{ElementId, PointerEvent, PointerEventKind};
use smallvec::SmallVec;

use crate::config::DrawerConfig;
use crate::damping::damped_translate;
use crate::disambiguation::{classify_pointer_down, DragStart, DragStartPolicy, HitTarget};
use crate::error::DrawerError;
use crate::gesture::{release_target, GestureController, MoveOutcome};
use crate::host::DialogHost;
use crate::side::Side;
use crate::snap_points::{effective_snap_points, resolve_snap_points, ResolvedSnapPoint, SnapPointSpec};
use crate::snapshot::{open_percentage, DrawerGeometry, DrawerSnapshot};
use crate::transition::{TransitionDriver, TransitionState, TransitionTicket};

/// A snap target within this distance of the closed offset dismisses.
const DISMISS_EPSILON: f32 = 0.5;

/// Translate within this distance of a snap point counts as resting on it.
const REST_EPSILON: f32 = 0.5;

enum HostCall {
    OpenChange(bool),
    ScrollLock(bool),
}

/// Side effects collected while the drawer is borrowed.
#[derive(Default)]
struct Effects {
    host_calls: SmallVec<[HostCall; 2]>,
    changed: bool,
}

struct DrawerInner {
    config: DrawerConfig,
    host: Rc<dyn DialogHost>,
    shared: Weak<DrawerShared>,
    size: f32,
    rendered_size: f32,
    snap_points: Vec<ResolvedSnapPoint>,
    translate: f32,
    open: bool,
    active_index: usize,
    gesture: GestureController,
    driver: TransitionDriver,
    animator: Animatable<f32>,
    transition_target: f32,
    /// The running snap ends on the closed offset.
    dismissing: bool,
}

struct DrawerShared {
    inner: RefCell<DrawerInner>,
    listeners: Listeners<DrawerSnapshot>,
}

/// Handle to one drawer. Clones share the same drawer.
#[derive(Clone)]
pub struct DrawerState {
    shared: Rc<DrawerShared>,
}

/// Snap points for `size`. Before the first measurement every point sits at
/// offset 0.
fn resolve_for_size(config: &DrawerConfig, size: f32) -> Result<Vec<ResolvedSnapPoint>, DrawerError> {
    if size > 0.0 {
        return resolve_snap_points(&config.snap_points, config.break_points.as_deref(), size);
    }
    Ok(effective_snap_points(&config.snap_points)
        .into_iter()
        .enumerate()
        .map(|(index, value)| ResolvedSnapPoint {
            index,
            value,
            offset: 0.0,
            lower_break_point: None,
            upper_break_point: None,
        })
        .collect())
}

impl DrawerState {
    /// Creates a closed drawer. Configuration mistakes are reported here.
    pub fn new(
        config: DrawerConfig,
        runtime: RuntimeHandle,
        host: Rc<dyn DialogHost>,
    ) -> Result<Self, DrawerError> {
        config.validate()?;
        let active_index = config.default_snap_index()?;
        let snap_points = resolve_for_size(&config, 0.0)?;

        let shared = Rc::new_cyclic(|weak: &Weak<DrawerShared>| {
            let animator = Animatable::new(0.0f32, runtime);
            let frames = weak.clone();
            animator.set_on_value_change(move |value| {
                if let Some(shared) = frames.upgrade() {
                    DrawerState { shared }.on_animation_frame(*value);
                }
            });
            DrawerShared {
                inner: RefCell::new(DrawerInner {
                    config,
                    host,
                    shared: weak.clone(),
                    size: 0.0,
                    rendered_size: 0.0,
                    snap_points,
                    translate: 0.0,
                    open: false,
                    active_index,
                    gesture: GestureController::new(),
                    driver: TransitionDriver::new(),
                    animator,
                    transition_target: 0.0,
                    dismissing: false,
                }),
                listeners: Listeners::new(),
            }
        });
        Ok(Self { shared })
    }

    fn update<R>(&self, apply: impl FnOnce(&mut DrawerInner, &mut Effects) -> R) -> R {
        let mut effects = Effects::default();
        let (result, host, snapshot) = {
            let mut inner = self.shared.inner.borrow_mut();
            let result = apply(&mut inner, &mut effects);
            (result, Rc::clone(&inner.host), inner.snapshot())
        };
        if effects.changed {
            self.shared.listeners.notify(&snapshot);
        }
        for call in effects.host_calls {
            match call {
                HostCall::OpenChange(open) => host.on_open_change(open),
                HostCall::ScrollLock(locked) => host.set_scroll_lock(locked),
            }
        }
        result
    }

    fn read<R>(&self, f: impl FnOnce(&DrawerInner) -> R) -> R {
        f(&self.shared.inner.borrow())
    }

    /// Registers an observer, called once after every event that changed
    /// anything.
    pub fn subscribe(&self, listener: impl Fn(&DrawerSnapshot) + 'static) -> Subscription {
        self.shared.listeners.subscribe(listener)
    }

    /// Measured drawer extent along its axis.
    pub fn set_size(&self, size: f32) -> Result<(), DrawerError> {
        if !size.is_finite() || size < 0.0 {
            return Err(DrawerError::InvalidThreshold { name: "size", value: size });
        }
        self.update(|inner, effects| inner.set_size(size, effects))
    }

    /// Replaces the configuration, keeping the current position where
    /// possible.
    pub fn set_config(&self, config: DrawerConfig) -> Result<(), DrawerError> {
        config.validate()?;
        self.update(|inner, effects| inner.set_config(config, effects))
    }

    /// Follows the dialog's open state.
    pub fn set_open(&self, open: bool) {
        self.update(|inner, effects| {
            if open {
                inner.open(effects)
            } else {
                inner.close(effects)
            }
        })
    }

    pub fn open(&self) {
        self.set_open(true);
    }

    pub fn close(&self) {
        self.set_open(false);
    }

    /// Animates to a configured snap point.
    pub fn set_active_snap_point(&self, point: SnapPointSpec) -> Result<(), DrawerError> {
        self.update(|inner, effects| inner.set_active_snap_point(point, effects))
    }

    /// `target` is the element the pointer went down on, if the host can
    /// tell.
    pub fn pointer_down(&self, event: &PointerEvent, target: Option<HitTarget<'_>>) {
        let content = self.read(|inner| Rc::clone(&inner.host)).content_element();
        self.update(|inner, effects| inner.pointer_down(event, target, content, effects))
    }

    pub fn pointer_move(&self, event: &PointerEvent) {
        self.update(|inner, effects| inner.pointer_move(event, effects))
    }

    pub fn pointer_up(&self, event: &PointerEvent) {
        self.update(|inner, effects| inner.release(event, effects))
    }

    /// Treated as a pointer-up: the drawer always settles on a snap point.
    pub fn pointer_cancel(&self, event: &PointerEvent) {
        self.update(|inner, effects| inner.release(event, effects))
    }

    pub fn handle_pointer_event(&self, event: &PointerEvent, target: Option<HitTarget<'_>>) {
        match event.kind {
            PointerEventKind::Down => self.pointer_down(event, target),
            PointerEventKind::Move => self.pointer_move(event),
            PointerEventKind::Up => self.pointer_up(event),
            PointerEventKind::Cancel => self.pointer_cancel(event),
        }
    }

    /// The host saw the running CSS transition end.
    pub fn on_transition_end(&self) {
        self.update(|inner, effects| {
            if let Some(ticket) = inner.driver.current() {
                inner.finish_transition(ticket, effects);
            }
        })
    }

    /// The presence tracker reports whether content is still mounted.
    pub fn on_presence_change(&self, present: bool) {
        self.update(|inner, effects| match inner.driver.current() {
            Some(ticket) if !present && ticket.state() == TransitionState::Closing => {
                inner.finish_transition(ticket, effects);
            }
            _ => log::trace!("presence {present} ignored in {}", inner.driver.state()),
        })
    }

    fn on_animation_frame(&self, value: f32) {
        self.update(|inner, effects| {
            if inner.driver.state().is_idle() || inner.gesture.is_dragging() {
                return;
            }
            inner.translate = value;
            effects.changed = true;
        })
    }

    fn on_animation_end(&self, ticket: TransitionTicket) {
        self.update(|inner, effects| inner.finish_transition(ticket, effects))
    }

    pub fn side(&self) -> Side {
        self.read(|inner| inner.config.side)
    }

    pub fn size(&self) -> f32 {
        self.read(|inner| inner.size)
    }

    pub fn rendered_size(&self) -> f32 {
        self.read(|inner| inner.rendered_size)
    }

    pub fn translate(&self) -> f32 {
        self.read(|inner| inner.translate)
    }

    pub fn open_percentage(&self) -> f32 {
        self.read(|inner| open_percentage(inner.translate, inner.size, inner.open))
    }

    pub fn is_open(&self) -> bool {
        self.read(|inner| inner.open)
    }

    /// Open, or still animating closed.
    pub fn is_present(&self) -> bool {
        self.read(DrawerInner::is_present)
    }

    pub fn is_dragging(&self) -> bool {
        self.read(|inner| inner.gesture.is_dragging())
    }

    pub fn is_transitioning(&self) -> bool {
        self.read(|inner| inner.driver.is_transitioning(inner.gesture.is_dragging()))
    }

    pub fn transition_state(&self) -> TransitionState {
        self.read(|inner| inner.driver.state())
    }

    pub fn active_snap_point(&self) -> Option<SnapPointSpec> {
        self.read(DrawerInner::active_snap_point)
    }

    pub fn snap_points(&self) -> Vec<ResolvedSnapPoint> {
        self.read(|inner| inner.snap_points.clone())
    }

    pub fn geometry(&self) -> DrawerGeometry {
        self.read(DrawerInner::geometry)
    }

    pub fn snapshot(&self) -> DrawerSnapshot {
        self.read(DrawerInner::snapshot)
    }
}

impl fmt::Debug for DrawerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shared.inner.try_borrow() {
            Ok(inner) => f
                .debug_struct("DrawerState")
                .field("snapshot", &inner.snapshot())
                .field("gesture", &inner.gesture)
                .finish(),
            Err(_) => f.write_str("DrawerState(<busy>)"),
        }
    }
}

impl DrawerInner {
    fn is_present(&self) -> bool {
        self.open || self.driver.state() == TransitionState::Closing
    }

    fn active_snap_point(&self) -> Option<SnapPointSpec> {
        if !self.open {
            return None;
        }
        self.snap_points.get(self.active_index).map(|point| point.value)
    }

    fn active_offset(&self) -> f32 {
        self.snap_points
            .get(self.active_index)
            .map_or(0.0, |point| point.offset)
    }

    fn geometry(&self) -> DrawerGeometry {
        DrawerGeometry {
            side: self.config.side,
            size: self.size,
            translate: self.translate,
            open_percentage: open_percentage(self.translate, self.size, self.open),
            active_snap_point: self.active_snap_point(),
        }
    }

    fn snapshot(&self) -> DrawerSnapshot {
        let is_dragging = self.gesture.is_dragging();
        DrawerSnapshot {
            geometry: self.geometry(),
            is_open: self.open,
            is_present: self.is_present(),
            is_dragging,
            is_transitioning: self.driver.is_transitioning(is_dragging),
            transition_state: self.driver.state(),
            rendered_size: self.rendered_size,
        }
    }

    fn default_index(&self) -> usize {
        self.config
            .default_snap_index()
            .unwrap_or_else(|_| self.snap_points.len().saturating_sub(1))
    }

    fn is_closed_offset(&self, offset: f32) -> bool {
        self.size > 0.0 && offset >= self.size - DISMISS_EPSILON
    }

    /// Resting on the most open snap point.
    fn at_most_open(&self) -> bool {
        let Some(most_open) = self.snap_points.last() else {
            return false;
        };
        self.driver.state().is_idle()
            && self.active_index == most_open.index
            && (self.translate - most_open.offset).abs() <= REST_EPSILON
    }

    fn start_transition(&mut self, state: TransitionState, target: f32, effects: &mut Effects) {
        let ticket = self.driver.begin(state);
        self.transition_target = target;
        effects.changed = true;

        let animation = self.config.transitions.for_state(state).unwrap_or_default();
        self.animator.snap_to(self.translate);
        let shared = self.shared.clone();
        self.animator.animate_to_then(target, animation, move || {
            if let Some(shared) = shared.upgrade() {
                DrawerState { shared }.on_animation_end(ticket);
            }
        });
    }

    fn finish_transition(&mut self, ticket: TransitionTicket, effects: &mut Effects) {
        if !self.driver.complete(ticket) {
            return;
        }
        effects.changed = true;
        let target = self.transition_target;
        self.animator.snap_to(target);
        self.translate = target;

        match ticket.state() {
            TransitionState::Closing => {
                effects.host_calls.push(HostCall::ScrollLock(false));
            }
            TransitionState::Resizing => {
                self.rendered_size = self.size;
            }
            TransitionState::Snapping if self.dismissing => {
                log::debug!("drawer dismissed by drag");
                self.dismissing = false;
                self.open = false;
                self.active_index = self.default_index();
                effects.host_calls.push(HostCall::OpenChange(false));
                effects.host_calls.push(HostCall::ScrollLock(false));
            }
            TransitionState::Opening | TransitionState::Snapping | TransitionState::Idle => {}
        }
    }

    /// Stops whatever is animating, leaving `translate` where it is.
    fn interrupt_transition(&mut self, effects: &mut Effects) {
        let Some(cancelled) = self.driver.cancel() else {
            return;
        };
        self.translate = self.animator.stop();
        if cancelled == TransitionState::Resizing {
            self.rendered_size = self.size;
        }
        self.dismissing = false;
        effects.changed = true;
    }

    fn open(&mut self, effects: &mut Effects) {
        if self.open {
            return;
        }
        log::debug!("drawer opening");
        self.open = true;
        self.dismissing = false;
        self.gesture.reset();
        self.active_index = self.default_index();
        if self.driver.state().is_idle() {
            self.translate = self.size;
        }
        effects.host_calls.push(HostCall::ScrollLock(true));
        let target = self.active_offset();
        self.start_transition(TransitionState::Opening, target, effects);
    }

    fn close(&mut self, effects: &mut Effects) {
        if !self.open {
            return;
        }
        log::debug!("drawer closing");
        self.open = false;
        self.dismissing = false;
        self.gesture.reset();
        let target = self.size;
        self.start_transition(TransitionState::Closing, target, effects);
    }

    fn set_size(&mut self, size: f32, effects: &mut Effects) -> Result<(), DrawerError> {
        let snap_points = resolve_for_size(&self.config, size)?;
        if size == self.size {
            return Ok(());
        }
        let previous = self.size;
        log::debug!("drawer resized {previous:.1} -> {size:.1}");
        self.size = size;
        self.snap_points = snap_points;
        effects.changed = true;

        if let Some(raw_offset) = self.gesture.session().map(|session| session.raw_offset) {
            self.rendered_size = size;
            self.translate = damped_translate(raw_offset, size, &*self.config.damp_function);
            return Ok(());
        }

        match self.driver.state() {
            TransitionState::Idle if !self.open => {
                self.rendered_size = size;
                self.translate = size;
                self.animator.snap_to(size);
            }
            TransitionState::Idle if self.config.transition_resize && previous > 0.0 => {
                let target = self.active_offset();
                self.start_transition(TransitionState::Resizing, target, effects);
            }
            TransitionState::Idle => {
                self.rendered_size = size;
                self.translate = self.active_offset();
                self.animator.snap_to(self.translate);
            }
            TransitionState::Resizing => {
                let target = self.active_offset();
                self.start_transition(TransitionState::Resizing, target, effects);
            }
            TransitionState::Closing => {
                self.rendered_size = size;
                self.start_transition(TransitionState::Closing, size, effects);
            }
            state @ (TransitionState::Opening | TransitionState::Snapping) => {
                self.rendered_size = size;
                let target = if self.dismissing {
                    size
                } else {
                    self.active_offset()
                };
                self.start_transition(state, target, effects);
            }
        }
        Ok(())
    }

    fn set_config(&mut self, config: DrawerConfig, effects: &mut Effects) -> Result<(), DrawerError> {
        let snap_points = resolve_for_size(&config, self.size)?;
        let default_index = config.default_snap_index()?;
        if self.config.side != config.side {
            self.gesture.reset();
        }
        self.config = config;
        if self.active_index >= snap_points.len() {
            self.active_index = default_index;
        }
        self.snap_points = snap_points;
        effects.changed = true;

        if self.driver.state().is_idle() && !self.gesture.is_dragging() {
            self.translate = if self.open {
                self.active_offset()
            } else {
                self.size
            };
            self.animator.snap_to(self.translate);
        }
        Ok(())
    }

    fn set_active_snap_point(
        &mut self,
        point: SnapPointSpec,
        effects: &mut Effects,
    ) -> Result<(), DrawerError> {
        let index = self
            .snap_points
            .iter()
            .position(|candidate| candidate.value.same_point(&point))
            .ok_or(DrawerError::UnknownSnapPoint { point })?;
        self.active_index = index;
        effects.changed = true;
        if !self.open || self.gesture.is_dragging() {
            return Ok(());
        }
        let target = self.active_offset();
        self.dismissing = self.is_closed_offset(target);
        self.start_transition(TransitionState::Snapping, target, effects);
        Ok(())
    }

    fn pointer_down(
        &mut self,
        event: &PointerEvent,
        target: Option<HitTarget<'_>>,
        content: Option<ElementId>,
        effects: &mut Effects,
    ) {
        if !self.open {
            log::trace!("pointer-down on a closed drawer ignored");
            return;
        }
        if let Some(active) = self.gesture.active_pointer() {
            if active != event.id {
                log::trace!("pointer {} ignored while {active} is active", event.id);
                return;
            }
        }

        let policy = DragStartPolicy {
            orientation: self.config.side.orientation(),
            handle_scrollable_elements: self.config.handle_scrollable_elements,
            at_most_open: self.at_most_open(),
            scroll_threshold: self.config.scroll_threshold,
            content,
        };
        let start = classify_pointer_down(target, &policy);
        if matches!(start, DragStart::Ignore) {
            return;
        }

        self.interrupt_transition(effects);
        let dragging = self.gesture.begin(
            event,
            start,
            self.config.side,
            self.translate,
            Some(self.active_index),
            self.config.velocity_cache_reset_ms,
        );
        if dragging {
            event.consume();
            effects.changed = true;
        }
    }

    fn pointer_move(&mut self, event: &PointerEvent, effects: &mut Effects) {
        if !self.open {
            return;
        }
        let outcome = self.gesture.pointer_move(
            event,
            self.config.side,
            self.translate,
            self.config.velocity_cache_reset_ms,
        );
        match outcome {
            MoveOutcome::Ignored => {}
            MoveOutcome::Scrolled => event.consume(),
            MoveOutcome::Dragged { raw_offset, .. } => {
                self.translate = damped_translate(raw_offset, self.size, &*self.config.damp_function);
                event.consume();
                effects.changed = true;
            }
        }
    }

    fn release(&mut self, event: &PointerEvent, effects: &mut Effects) {
        let velocity_function = Rc::clone(&self.config.velocity_function);
        let Some(release) = self.gesture.release(event, self.translate, &*velocity_function) else {
            return;
        };
        event.consume();
        effects.changed = true;

        let Some(target) = release_target(
            &self.snap_points,
            &release,
            self.config.allow_skipping_snap_points,
        ) else {
            return;
        };
        log::debug!(
            "release settles on snap point {} ({}) at offset {:.1}",
            target.index,
            target.value,
            target.offset
        );
        self.active_index = target.index;
        self.dismissing = self.is_closed_offset(target.offset);
        self.start_transition(TransitionState::Snapping, target.offset, effects);
    }
}

#[cfg(test)]
#[path = "tests/drawer_tests.rs"]
mod tests;
