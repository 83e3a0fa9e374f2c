//! Drag-to-dismiss, snap-to-position drawer engine.
//!
//! A drawer slides in from a viewport edge, follows the pointer while
//! dragged, and settles on one of its configured snap points. This crate turns
//! pointer, resize and animation-end events into a `translate` value and a
//! transition state that rendering code applies. It never touches a real
//! element tree: hosts describe theirs through
//! [`drawerpose_foundation::ElementTree`] and receive open-state and
//! scroll-lock changes through [`DialogHost`].
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use std::sync::Arc;
//! use drawerpose_core::{DefaultScheduler, Runtime};
//! use drawerpose_drawer::{DrawerConfig, DrawerState, NoopDialogHost, SnapPointSpec};
//!
//! let runtime = Runtime::new(Arc::new(DefaultScheduler));
//! let config = DrawerConfig::new()
//!     .with_snap_points([SnapPointSpec::Fraction(0.5), SnapPointSpec::OPEN]);
//! let drawer = DrawerState::new(config, runtime.handle(), Rc::new(NoopDialogHost))?;
//! drawer.set_size(400.0)?;
//! drawer.open();
//! assert!(drawer.is_transitioning());
//! # Ok::<(), drawerpose_drawer::DrawerError>(())
//! ```

pub mod config;
pub mod damping;
pub mod disambiguation;
pub mod drawer;
pub mod error;
pub mod gesture;
pub mod host;
pub mod side;
pub mod snap_points;
pub mod snapshot;
pub mod transition;
pub mod velocity;

pub use config::{DampFunction, DrawerConfig, DrawerTransitions, VelocityFunction, DRAWER_TRANSITION_MILLIS};
pub use damping::{damped_translate, default_damp};
pub use disambiguation::{
    classify_pointer_down, DragStart, DragStartPolicy, HandoffStep, HitTarget, ScrollHandoff,
};
pub use drawer::DrawerState;
pub use error::{DrawerError, PointError};
pub use gesture::{release_target, DragSession, GestureController, MoveOutcome, Release};
pub use host::{DialogHost, NoopDialogHost};
pub use side::Side;
pub use snap_points::{
    effective_snap_points, find_closest_snap_point, resolve_point, resolve_point_str,
    resolve_snap_point, resolve_snap_point_at, resolve_snap_points, BreakPointSpec,
    ResolvedSnapPoint, SnapPointSpec,
};
pub use snapshot::{DrawerGeometry, DrawerSnapshot};
pub use transition::{TransitionDriver, TransitionState, TransitionTicket};
pub use velocity::default_velocity_function;

pub mod prelude {
    pub use crate::{
        DialogHost, DrawerConfig, DrawerError, DrawerSnapshot, DrawerState, HitTarget, Side,
        SnapPointSpec, TransitionState,
    };
}
