//! The platform side: whatever can report its width, announce resizes and
//! evaluate range media queries.
//!
//! A host without a rendering surface (a test runner, a server rendering the
//! initial frame) passes `None` wherever a surface is expected. In that case
//! widths read as 0 and every query evaluates to `false`.

use std::rc::Rc;

use crate::listener::{Listener, Subscription};

mod simulated;

pub use simulated::SimulatedSurface;

/// A rendering surface whose width drives responsive queries.
pub trait Surface {
    /// Current width of the content area in pixels.
    fn inner_width(&self) -> u32;

    /// Registers `listener` to be called after every resize.
    fn on_resize(&self, listener: Listener) -> Subscription;

    /// Builds a live evaluator for `query`. Strings the platform can't read
    /// produce a list that never matches.
    fn match_media(&self, query: &str) -> Rc<dyn MediaQueryList>;
}

/// A media query bound to a surface, tracking whether it currently matches.
pub trait MediaQueryList {
    /// The query string this list was created with.
    fn media(&self) -> &str;

    fn matches(&self) -> bool;

    /// Registers `listener` to be called whenever [`matches`](Self::matches)
    /// flips.
    fn add_change_listener(&self, listener: Listener) -> Subscription;
}
