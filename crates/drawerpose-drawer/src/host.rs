//! The dialog substrate the drawer sits on.

use drawerpose_foundation::ElementId;

/// Open state, scroll locking and the content element belong to the dialog
/// layer; the drawer only reports into it.
///
/// Calls happen after the drawer has finished updating, so implementations may
/// call back into the drawer.
pub trait DialogHost {
    /// The drawer dismissed itself (a drag released onto the closed position).
    fn on_open_change(&self, open: bool);

    fn set_scroll_lock(&self, locked: bool);

    /// Drawer content root. Ancestor walks during disambiguation stop here.
    fn content_element(&self) -> Option<ElementId> {
        None
    }
}

/// Host that ignores every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDialogHost;

impl DialogHost for NoopDialogHost {
    fn on_open_change(&self, _open: bool) {}

    fn set_scroll_lock(&self, _locked: bool) {}
}
