//! Change listeners and the handles that release them.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

/// A change callback. It receives no payload; read the new state from the
/// source that notified it.
pub type Listener = Rc<dyn Fn()>;

new_key_type! {
    struct ListenerKey;
}

/// An unordered set of listeners.
///
/// [`notify`](Self::notify) walks a snapshot of the membership taken when it
/// starts, so callbacks may subscribe or unsubscribe freely. A listener
/// removed partway through a pass is skipped; one added partway through is
/// first called on the next pass.
#[derive(Clone, Default)]
pub struct ListenerSet {
    listeners: Rc<RefCell<SlotMap<ListenerKey, Listener>>>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, listener: Listener) -> Subscription {
        let key = self.listeners.borrow_mut().insert(listener);
        let listeners: Weak<RefCell<SlotMap<ListenerKey, Listener>>> =
            Rc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                // Drop the listener after the borrow ends; it may own the set.
                let removed = listeners.borrow_mut().remove(key);
                drop(removed);
            }
        })
    }

    pub fn notify(&self) {
        let keys: SmallVec<[ListenerKey; 8]> = self.listeners.borrow().keys().collect();
        for key in keys {
            // The borrow must end before the callback runs.
            let listener = self.listeners.borrow().get(key).cloned();
            if let Some(listener) = listener {
                listener();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }
}

/// Handle returned when registering a listener.
///
/// [`unsubscribe`](Self::unsubscribe) may be called any number of times; only
/// the first call does anything. Dropping the handle does *not* unsubscribe.
#[must_use = "dropping a Subscription keeps the listener registered forever"]
pub struct Subscription {
    release: Cell<Option<Box<dyn FnOnce()>>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Cell::new(Some(Box::new(release))),
        }
    }

    /// A handle with nothing to release, for sources that never notify.
    pub fn noop() -> Self {
        Self {
            release: Cell::new(None),
        }
    }

    pub fn unsubscribe(&self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    pub fn is_active(&self) -> bool {
        let release = self.release.take();
        let active = release.is_some();
        self.release.set(release);
        active
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
