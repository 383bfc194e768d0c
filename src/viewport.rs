//! Cached viewport width with resize notifications.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use crate::listener::{Listener, ListenerSet, Subscription};
use crate::surface::Surface;

/// Tracks the width of one surface.
///
/// The tracker registers a single resize listener on its surface when it is
/// created and keeps it for as long as the surface lives; the listener only
/// holds a weak reference back, so dropping the tracker is enough to silence
/// it. Without a surface the width stays at 0 and listeners never run.
pub struct ViewportTracker {
    width: Cell<u32>,
    surface: Option<Rc<dyn Surface>>,
    listeners: ListenerSet,
    _resize: Option<Subscription>,
}

impl ViewportTracker {
    pub fn new(surface: Rc<dyn Surface>) -> Rc<Self> {
        Self::with_surface(Some(surface))
    }

    /// A tracker with no surface.
    pub fn headless() -> Rc<Self> {
        Self::with_surface(None)
    }

    pub fn with_surface(surface: Option<Rc<dyn Surface>>) -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| {
            let width = surface.as_ref().map_or(0, |surface| surface.inner_width());
            let resize = surface.as_ref().map(|surface| {
                let this = this.clone();
                surface.on_resize(Rc::new(move || {
                    if let Some(tracker) = this.upgrade() {
                        tracker.handle_resize();
                    }
                }))
            });
            Self {
                width: Cell::new(width),
                surface,
                listeners: ListenerSet::new(),
                _resize: resize,
            }
        })
    }

    pub fn width(&self) -> u32 {
        self.width.get()
    }

    /// Calls `listener` after every resize, once the new width is readable
    /// through [`width`](Self::width).
    pub fn on_resize(&self, listener: Listener) -> Subscription {
        self.listeners.insert(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn handle_resize(&self) {
        let Some(surface) = &self.surface else {
            return;
        };
        let width = surface.inner_width();
        tracing::trace!(
            from = self.width.get(),
            to = width,
            listeners = self.listeners.len(),
            "viewport resized"
        );
        self.width.set(width);
        self.listeners.notify();
    }
}
