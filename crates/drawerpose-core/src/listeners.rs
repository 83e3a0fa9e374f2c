//! Change listeners with drop-to-unsubscribe handles.
//!
//! Notification snapshots the listener list first, so a listener may
//! subscribe or unsubscribe (including itself) while being notified.

use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

pub type ListenerId = u64;

type Listener<T> = Rc<dyn Fn(&T)>;

struct ListenersInner<T> {
    entries: RefCell<SmallVec<[(ListenerId, Listener<T>); 4]>>,
    next_id: Cell<ListenerId>,
}

/// Registry of `Fn(&T)` callbacks.
pub struct Listeners<T: 'static> {
    inner: Rc<ListenersInner<T>>,
}

impl<T: 'static> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Listeners<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ListenersInner {
                entries: RefCell::new(SmallVec::new()),
                next_id: Cell::new(1),
            }),
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .entries
            .borrow_mut()
            .push((id, Rc::new(listener)));
        let weak: Weak<ListenersInner<T>> = Rc::downgrade(&self.inner);
        Subscription {
            id,
            unsubscribe: Some(Box::new(move |id| {
                if let Some(inner) = weak.upgrade() {
                    inner.entries.borrow_mut().retain(|(entry, _)| *entry != id);
                }
            })),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn notify(&self, value: &T) {
        let snapshot: SmallVec<[Listener<T>; 4]> = self
            .inner
            .entries
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(value);
        }
    }
}

impl<T: 'static> Clone for Listeners<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Keeps a listener registered until dropped.
#[must_use = "dropping a Subscription unregisters the listener"]
pub struct Subscription {
    id: ListenerId,
    unsubscribe: Option<Box<dyn FnOnce(ListenerId)>>,
}

impl Subscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Leaves the listener registered for the lifetime of the registry.
    pub fn detach(mut self) {
        self.unsubscribe.take();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
