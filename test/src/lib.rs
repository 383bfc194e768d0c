//! Testing utilities for Floem responsive breakpoints.
//!
//! This crate provides helpers for driving breakpoint queries and signals
//! against a [`SimulatedSurface`] instead of a real window.
//!
//! # Example
//!
//! ```rust,ignore
//! use floem_breakpoints_test::prelude::*;
//!
//! #[test]
//! fn test_resize_notifies() {
//!     let (surface, responsive) = simulated(500);
//!     let counter = ChangeCounter::new();
//!     let _sub = responsive.viewport().on_resize(counter.listener());
//!
//!     surface.resize(900);
//!
//!     assert_eq!(counter.count(), 1);
//! }
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use floem_breakpoints::{Listener, Responsive, SimulatedSurface};

/// Prelude module for convenient imports in tests.
pub mod prelude {
    pub use super::{ChangeCounter, WidthLog, simulated};
    pub use floem_breakpoints::*;
    pub use floem_reactive::{SignalGet, SignalUpdate, create_effect, create_rw_signal};
}

/// A simulated surface of the given width and a [`Responsive`] bound to it,
/// using the default breakpoints.
pub fn simulated(width: u32) -> (Rc<SimulatedSurface>, Responsive) {
    let surface = SimulatedSurface::new(width);
    let responsive = Responsive::new(surface.clone());
    (surface, responsive)
}

/// Counts how often its listeners are called.
#[derive(Clone, Default)]
pub struct ChangeCounter {
    count: Rc<Cell<usize>>,
}

impl ChangeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener that bumps this counter. Every listener handed out shares
    /// the same count.
    pub fn listener(&self) -> Listener {
        let count = self.count.clone();
        Rc::new(move || count.set(count.get() + 1))
    }

    pub fn count(&self) -> usize {
        self.count.get()
    }

    pub fn reset(&self) {
        self.count.set(0);
    }
}

/// Records a value each time its listener runs, in call order.
#[derive(Clone, Default)]
pub struct WidthLog {
    seen: Rc<RefCell<Vec<u32>>>,
}

impl WidthLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener that logs `read()` every time it is called.
    pub fn listener(&self, read: impl Fn() -> u32 + 'static) -> Listener {
        let seen = self.seen.clone();
        Rc::new(move || seen.borrow_mut().push(read()))
    }

    pub fn seen(&self) -> Vec<u32> {
        self.seen.borrow().clone()
    }
}
