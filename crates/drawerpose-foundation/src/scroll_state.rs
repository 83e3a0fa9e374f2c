//! In-memory scroll position holder.

use crate::scrollable::ScrollableState;
use drawerpose_core::{Listeners, Subscription};
use std::cell::Cell;
use std::rc::Rc;

/// Minimum change that counts as a scroll.
const SCROLL_EPSILON: f32 = 0.001;

/// Scroll position clamped to `[0, max_value]`.
///
/// Clones share the same position.
#[derive(Clone)]
pub struct ScrollState {
    inner: Rc<ScrollStateInner>,
}

struct ScrollStateInner {
    value: Cell<f32>,
    max_value: Cell<f32>,
    in_progress: Cell<bool>,
    listeners: Listeners<f32>,
}

impl ScrollState {
    pub fn new(initial: f32) -> Self {
        Self {
            inner: Rc::new(ScrollStateInner {
                value: Cell::new(initial.max(0.0)),
                max_value: Cell::new(initial.max(0.0)),
                in_progress: Cell::new(false),
                listeners: Listeners::new(),
            }),
        }
    }

    /// Scroll state with `max_value` of scroll range, positioned at `initial`.
    pub fn with_range(initial: f32, max_value: f32) -> Self {
        let state = Self::new(0.0);
        state.set_max_value(max_value);
        state.scroll_to(initial);
        state
    }

    pub fn value(&self) -> f32 {
        self.inner.value.get()
    }

    pub fn max_value(&self) -> f32 {
        self.inner.max_value.get()
    }

    pub fn set_max_value(&self, max: f32) {
        let max = max.max(0.0);
        self.inner.max_value.set(max);
        if self.value() > max {
            self.set_value(max);
        }
    }

    /// Scrolls by `delta`, clamped to the range. Returns the amount scrolled.
    pub fn dispatch_raw_delta(&self, delta: f32) -> f32 {
        let current = self.value();
        let new_value = (current + delta).clamp(0.0, self.max_value());
        let actual_delta = new_value - current;
        if actual_delta.abs() > SCROLL_EPSILON {
            self.set_value(new_value);
            actual_delta
        } else {
            0.0
        }
    }

    pub fn scroll_to(&self, position: f32) {
        self.set_value(position.clamp(0.0, self.max_value()));
    }

    pub fn set_scroll_in_progress(&self, in_progress: bool) {
        self.inner.in_progress.set(in_progress);
    }

    /// Called with the new position whenever it changes.
    pub fn on_change(&self, listener: impl Fn(&f32) + 'static) -> Subscription {
        self.inner.listeners.subscribe(listener)
    }

    fn set_value(&self, value: f32) {
        if self.inner.value.replace(value) != value {
            self.inner.listeners.notify(&value);
        }
    }
}

impl ScrollableState for ScrollState {
    fn consume_scroll_delta(&self, delta: f32) -> f32 {
        self.dispatch_raw_delta(delta)
    }

    fn scroll_offset(&self) -> f32 {
        self.value()
    }

    fn max_scroll_offset(&self) -> f32 {
        self.max_value()
    }

    fn is_scroll_in_progress(&self) -> bool {
        self.inner.in_progress.get()
    }
}

impl std::fmt::Debug for ScrollState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollState")
            .field("value", &self.value())
            .field("max_value", &self.max_value())
            .finish()
    }
}
