//! Transition state machine.
//!
//! At most one transition runs at a time. Every transition that starts gets a
//! fresh [`TransitionTicket`]; completions carrying an older ticket are
//! ignored, so a transition that was cancelled or replaced can never reset a
//! newer one back to idle.

use std::fmt;

/// Animated phase the drawer is in. Dragging is tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransitionState {
    #[default]
    Idle,
    Opening,
    Closing,
    Snapping,
    Resizing,
}

impl TransitionState {
    pub fn as_str(self) -> &'static str {
        match self {
            TransitionState::Idle => "idle",
            TransitionState::Opening => "opening",
            TransitionState::Closing => "closing",
            TransitionState::Snapping => "snapping",
            TransitionState::Resizing => "resizing",
        }
    }

    pub fn is_idle(self) -> bool {
        self == TransitionState::Idle
    }
}

impl fmt::Display for TransitionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTicket {
    generation: u64,
    state: TransitionState,
}

impl TransitionTicket {
    pub fn state(&self) -> TransitionState {
        self.state
    }
}

#[derive(Debug, Default)]
pub struct TransitionDriver {
    state: TransitionState,
    generation: u64,
}

impl TransitionDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    /// Starts `state`, replacing whatever was running.
    pub fn begin(&mut self, state: TransitionState) -> TransitionTicket {
        self.generation += 1;
        if !self.state.is_idle() && self.state != state {
            log::debug!("transition {} replaced by {}", self.state, state);
        } else {
            log::debug!("transition {} started", state);
        }
        self.state = state;
        TransitionTicket {
            generation: self.generation,
            state,
        }
    }

    /// Abandons the running transition. Returns what was running.
    pub fn cancel(&mut self) -> Option<TransitionState> {
        if self.state.is_idle() {
            return None;
        }
        let cancelled = self.state;
        self.generation += 1;
        self.state = TransitionState::Idle;
        log::debug!("transition {} cancelled", cancelled);
        Some(cancelled)
    }

    /// Ticket of the running transition.
    pub fn current(&self) -> Option<TransitionTicket> {
        (!self.state.is_idle()).then_some(TransitionTicket {
            generation: self.generation,
            state: self.state,
        })
    }

    /// Returns to idle if `ticket` belongs to the running transition.
    pub fn complete(&mut self, ticket: TransitionTicket) -> bool {
        if ticket.generation != self.generation || self.state.is_idle() {
            log::trace!("ignoring stale {} completion", ticket.state);
            return false;
        }
        log::debug!("transition {} finished", self.state);
        self.state = TransitionState::Idle;
        true
    }

    pub fn is_transitioning(&self, is_dragging: bool) -> bool {
        is_dragging || !self.state.is_idle()
    }
}
