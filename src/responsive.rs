//! The composition root tying breakpoints, a surface and a viewport tracker
//! together.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use floem_reactive::ReadSignal;

use crate::breakpoints::{BreakpointSet, Breakpoints};
use crate::error::Result;
use crate::query::{self, BreakpointValue, MediaQuery};
use crate::store::{
    MediaQueryStore, RenderMode, StoreSignal, ViewportStore, media_query_signal,
    sync_external_store,
};
use crate::surface::Surface;
use crate::viewport::ViewportTracker;

/// Breakpoint queries against one surface.
///
/// Build one per window (or one headless instance) at startup and hand it to
/// the views that need it. The `up`/`down`/`only`/`not`/`between` methods
/// evaluate once, right now; the `use_*` methods return signals that follow
/// the surface as it resizes.
///
/// ```rust,ignore
/// let responsive = Responsive::new(surface);
/// responsive.configure(BreakpointSet::from([("compact", 0.0), ("wide", 900.0)]));
///
/// let wide = responsive.use_up("wide")?;
/// create_effect(move |_| println!("wide layout: {}", wide.get()));
/// ```
pub struct Responsive {
    breakpoints: RefCell<Breakpoints>,
    surface: Option<Rc<dyn Surface>>,
    viewport: Rc<ViewportTracker>,
    mode: RenderMode,
}

impl Responsive {
    pub fn new(surface: Rc<dyn Surface>) -> Self {
        Self::with_surface(Some(surface))
    }

    /// No surface: widths read 0 and every query is `false`.
    pub fn headless() -> Self {
        Self::with_surface(None)
    }

    pub fn with_surface(surface: Option<Rc<dyn Surface>>) -> Self {
        let viewport = ViewportTracker::with_surface(surface.clone());
        Self {
            breakpoints: RefCell::new(Breakpoints::default()),
            surface,
            viewport,
            mode: RenderMode::Client,
        }
    }

    /// Sets how signals from the `use_*` methods are seeded.
    pub fn render_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replaces the breakpoint set. Call this before creating signals; ones
    /// that already exist keep the widths they were built with.
    pub fn configure(&self, set: BreakpointSet) {
        self.breakpoints.borrow_mut().configure(set);
    }

    /// Borrows the current registry.
    ///
    /// [`configure`](Self::configure) panics while the returned `Ref` is
    /// alive. To walk the set and reconfigure along the way, use
    /// [`sorted_breakpoints`](Self::sorted_breakpoints).
    pub fn breakpoints(&self) -> Ref<'_, Breakpoints> {
        self.breakpoints.borrow()
    }

    /// An owned copy of the breakpoints, ascending by width.
    pub fn sorted_breakpoints(&self) -> Vec<(String, f64)> {
        self.breakpoints.borrow().sorted().to_vec()
    }

    pub fn viewport(&self) -> &Rc<ViewportTracker> {
        &self.viewport
    }

    pub fn surface(&self) -> Option<&Rc<dyn Surface>> {
        self.surface.as_ref()
    }

    pub fn width(&self) -> u32 {
        self.viewport.width()
    }

    pub fn query_up(&self, size: impl Into<BreakpointValue>) -> Result<MediaQuery> {
        query::up(&self.breakpoints.borrow(), size)
    }

    pub fn query_down(&self, size: impl Into<BreakpointValue>) -> Result<MediaQuery> {
        query::down(&self.breakpoints.borrow(), size)
    }

    pub fn query_only(&self, name: &str) -> Result<MediaQuery> {
        query::only(&self.breakpoints.borrow(), name)
    }

    pub fn query_not(&self, name: &str) -> Result<MediaQuery> {
        query::not(&self.breakpoints.borrow(), name)
    }

    pub fn query_between(
        &self,
        min_size: impl Into<BreakpointValue>,
        max_size: impl Into<BreakpointValue>,
    ) -> Result<MediaQuery> {
        query::between(&self.breakpoints.borrow(), min_size, max_size)
    }

    pub fn up(&self, size: impl Into<BreakpointValue>) -> Result<bool> {
        Ok(self.evaluate(&self.query_up(size)?))
    }

    pub fn down(&self, size: impl Into<BreakpointValue>) -> Result<bool> {
        Ok(self.evaluate(&self.query_down(size)?))
    }

    pub fn only(&self, name: &str) -> Result<bool> {
        Ok(self.evaluate(&self.query_only(name)?))
    }

    pub fn not(&self, name: &str) -> Result<bool> {
        Ok(self.evaluate(&self.query_not(name)?))
    }

    pub fn between(
        &self,
        min_size: impl Into<BreakpointValue>,
        max_size: impl Into<BreakpointValue>,
    ) -> Result<bool> {
        Ok(self.evaluate(&self.query_between(min_size, max_size)?))
    }

    /// Asks the surface whether `query` matches right now.
    pub fn evaluate(&self, query: &MediaQuery) -> bool {
        self.surface
            .as_ref()
            .is_some_and(|surface| surface.match_media(&query.to_string()).matches())
    }

    /// Evaluates `query` against the tracker's cached width instead of the
    /// surface. Bounds are inclusive, exactly as the surface reads them, so
    /// the two agree at every whole-pixel width.
    pub fn matches_width(&self, query: &MediaQuery) -> bool {
        self.surface.is_some() && query.matches(self.viewport.width() as f64)
    }

    pub fn use_viewport(&self) -> StoreSignal<u32> {
        sync_external_store(ViewportStore::new(self.viewport.clone()), self.mode)
    }

    pub fn use_up(&self, size: impl Into<BreakpointValue>) -> Result<StoreSignal<bool>> {
        Ok(self.use_query(&self.query_up(size)?))
    }

    pub fn use_down(&self, size: impl Into<BreakpointValue>) -> Result<StoreSignal<bool>> {
        Ok(self.use_query(&self.query_down(size)?))
    }

    pub fn use_only(&self, name: &str) -> Result<StoreSignal<bool>> {
        Ok(self.use_query(&self.query_only(name)?))
    }

    pub fn use_not(&self, name: &str) -> Result<StoreSignal<bool>> {
        Ok(self.use_query(&self.query_not(name)?))
    }

    pub fn use_between(
        &self,
        min_size: impl Into<BreakpointValue>,
        max_size: impl Into<BreakpointValue>,
    ) -> Result<StoreSignal<bool>> {
        Ok(self.use_query(&self.query_between(min_size, max_size)?))
    }

    pub fn use_query(&self, query: &MediaQuery) -> StoreSignal<bool> {
        let store = MediaQueryStore::new(self.surface.as_ref(), query.to_string());
        sync_external_store(store, self.mode)
    }

    /// A signal over a query string that may change, see
    /// [`media_query_signal`].
    pub fn use_media_query(&self, query: impl Fn() -> String + 'static) -> ReadSignal<bool> {
        media_query_signal(self.surface.clone(), self.mode, query)
    }
}
