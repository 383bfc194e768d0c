//! # Floem breakpoints
//! Responsive breakpoints for Floem: named width thresholds, the range media
//! queries derived from them, and signals that follow a surface as it
//! resizes.
//!
//! ## Example
//! ```rust,ignore
//! use floem_breakpoints::{BreakpointSet, Responsive, SimulatedSurface};
//!
//! let surface = SimulatedSurface::new(800);
//! let responsive = Responsive::new(surface.clone());
//!
//! assert!(responsive.up("md")?);
//! assert!(responsive.only("md")?);
//! assert_eq!(
//!     responsive.query_only("md")?.to_string(),
//!     "(min-width: 768px) and (max-width: 1023.98px)"
//! );
//!
//! let wide = responsive.use_up("lg")?;
//! surface.resize(1100);
//! assert!(wide.get());
//! ```
//!
//! ## Breakpoints
//! A [`BreakpointSet`] maps names to pixel widths. The default set is
//! `xs 480`, `sm 640`, `md 768`, `lg 1024`, `xl 1280` and `2xl 1536`.
//! [`Responsive::configure`] replaces it wholesale; names that are not in the
//! new set stop resolving.
//!
//! Anywhere a size is accepted, a plain pixel value can be passed instead of
//! a name. Pixel values skip validation.
//!
//! ## Queries
//! The [`query`] module builds [`MediaQuery`] values:
//!
//! - `up(size)`: at least `size` wide.
//! - `down(size)`: narrower than `size`.
//! - `only(name)`: from `name` up to the next breakpoint.
//! - `not(name)`: anything outside `only(name)`.
//! - `between(min, max)`: from `min` up to `max`.
//!
//! Upper bounds are written as `bound - 0.02px`, see [`query::EPSILON`].
//!
//! ## Surfaces
//! A [`Surface`] is the platform side. Without one, widths read 0 and every
//! query is `false`; [`SimulatedSurface`] is an in-memory implementation for
//! tests and headless hosts.

pub mod breakpoints;
pub mod error;
pub mod listener;
pub mod query;
pub mod responsive;
pub mod store;
pub mod surface;
pub mod viewport;

pub use breakpoints::{BreakpointSet, Breakpoints};
pub use error::{BreakpointError, ParseMediaQueryError};
pub use listener::{Listener, ListenerSet, Subscription};
pub use query::{BreakpointValue, MediaQuery, RangeClause};
pub use responsive::Responsive;
pub use store::{
    ExternalStore, MediaQueryStore, RenderMode, StoreSignal, ViewportStore, media_query_signal,
    sync_external_store,
};
pub use surface::{MediaQueryList, SimulatedSurface, Surface};
pub use viewport::ViewportTracker;
