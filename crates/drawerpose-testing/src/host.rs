//! Dialog host that records what the drawer tells it.

use std::cell::{Cell, RefCell};

use drawerpose_drawer::DialogHost;
use drawerpose_foundation::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCall {
    OpenChange(bool),
    ScrollLock(bool),
}

#[derive(Debug, Default)]
pub struct RecordingDialogHost {
    calls: RefCell<Vec<HostCall>>,
    content: Cell<Option<ElementId>>,
    scroll_locked: Cell<bool>,
}

impl RecordingDialogHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host whose drawer content root is `content`.
    pub fn with_content(content: ElementId) -> Self {
        let host = Self::default();
        host.content.set(Some(content));
        host
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.borrow().clone()
    }

    /// Returns and forgets the calls recorded so far.
    pub fn take_calls(&self) -> Vec<HostCall> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked.get()
    }
}

impl DialogHost for RecordingDialogHost {
    fn on_open_change(&self, open: bool) {
        self.calls.borrow_mut().push(HostCall::OpenChange(open));
    }

    fn set_scroll_lock(&self, locked: bool) {
        self.scroll_locked.set(locked);
        self.calls.borrow_mut().push(HostCall::ScrollLock(locked));
    }

    fn content_element(&self) -> Option<ElementId> {
        self.content.get()
    }
}
