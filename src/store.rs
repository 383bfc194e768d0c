//! Bridges external, mutable responsive state into `floem_reactive` signals.
//!
//! An [`ExternalStore`] is anything that can be subscribed to, read now, and
//! read for a server render. [`sync_external_store`] turns one into a signal
//! that views can track; [`media_query_signal`] additionally swaps the
//! underlying media query whenever a reactive query string changes.

use std::rc::Rc;

use floem_reactive::{ReadSignal, SignalGet, SignalUpdate, create_effect, create_signal};

use crate::listener::{Listener, Subscription};
use crate::surface::{MediaQueryList, Surface};
use crate::viewport::ViewportTracker;

/// Whether views are being rendered against a live surface or produced
/// ahead of time on a server.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RenderMode {
    #[default]
    Client,
    /// Stores report their server snapshot and are never subscribed, so the
    /// output does not depend on the machine doing the rendering.
    Server,
}

pub trait ExternalStore {
    type Value: Clone + PartialEq + 'static;

    /// Calls `on_change` whenever [`snapshot`](Self::snapshot) may have
    /// changed.
    fn subscribe(&self, on_change: Listener) -> Subscription;

    fn snapshot(&self) -> Self::Value;

    fn server_snapshot(&self) -> Self::Value;
}

/// The tracked viewport width. Server renders see 0.
pub struct ViewportStore {
    tracker: Rc<ViewportTracker>,
}

impl ViewportStore {
    pub fn new(tracker: Rc<ViewportTracker>) -> Self {
        Self { tracker }
    }
}

impl ExternalStore for ViewportStore {
    type Value = u32;

    fn subscribe(&self, on_change: Listener) -> Subscription {
        self.tracker.on_resize(on_change)
    }

    fn snapshot(&self) -> u32 {
        self.tracker.width()
    }

    fn server_snapshot(&self) -> u32 {
        0
    }
}

/// Whether one media query string currently matches.
///
/// The media query list is created once, when the store is, and reused for
/// every subscription. Without a surface the store never matches and
/// subscribing does nothing.
pub struct MediaQueryStore {
    query: String,
    list: Option<Rc<dyn MediaQueryList>>,
}

impl MediaQueryStore {
    pub fn new(surface: Option<&Rc<dyn Surface>>, query: impl Into<String>) -> Self {
        let query = query.into();
        let list = surface.map(|surface| surface.match_media(&query));
        Self { query, list }
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

impl ExternalStore for MediaQueryStore {
    type Value = bool;

    fn subscribe(&self, on_change: Listener) -> Subscription {
        match &self.list {
            Some(list) => list.add_change_listener(on_change),
            None => Subscription::noop(),
        }
    }

    fn snapshot(&self) -> bool {
        self.list.as_ref().is_some_and(|list| list.matches())
    }

    fn server_snapshot(&self) -> bool {
        false
    }
}

/// A signal kept in step with an [`ExternalStore`].
///
/// Dropping it releases the store subscription; the signal keeps its last
/// value.
pub struct StoreSignal<T: 'static> {
    value: ReadSignal<T>,
    subscription: Subscription,
}

impl<T: Clone + 'static> StoreSignal<T> {
    /// Reads the value and subscribes the running effect to it.
    pub fn get(&self) -> T {
        self.value.get()
    }

    pub fn get_untracked(&self) -> T {
        self.value.get_untracked()
    }

    pub fn read_signal(&self) -> ReadSignal<T> {
        self.value
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_active()
    }
}

impl<T: 'static> Drop for StoreSignal<T> {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}

/// Creates a signal from `store` in the current scope.
///
/// On the client the signal starts at the store's snapshot and is refreshed
/// on every change notification, written only when the value differs. On a
/// server it holds the server snapshot and the store is never subscribed.
pub fn sync_external_store<S>(store: S, mode: RenderMode) -> StoreSignal<S::Value>
where
    S: ExternalStore + 'static,
{
    if mode == RenderMode::Server {
        let (value, _) = create_signal(store.server_snapshot());
        return StoreSignal {
            value,
            subscription: Subscription::noop(),
        };
    }

    let (value, set_value) = create_signal(store.snapshot());
    let store = Rc::new(store);
    let subscription = store.subscribe(Rc::new({
        let store = store.clone();
        move || {
            // The signal's scope may be gone while the subscription lives on.
            let Some(current) = value.try_get_untracked() else {
                return;
            };
            let next = store.snapshot();
            if current != next {
                set_value.set(next);
            }
        }
    }));
    StoreSignal {
        value,
        subscription,
    }
}

/// The media query currently backing a [`media_query_signal`].
struct ActiveQuery {
    store: Rc<MediaQueryStore>,
    subscription: Subscription,
}

impl Drop for ActiveQuery {
    fn drop(&mut self) {
        tracing::debug!(query = self.store.query(), "releasing media query");
        self.subscription.unsubscribe();
    }
}

/// Creates a signal that is `true` while the query returned by `query`
/// matches.
///
/// `query` runs inside an effect, so it may read other signals. When the
/// string it produces changes, the old media query listener is released
/// and a fresh list is created and subscribed; an unchanged string keeps the
/// existing list. Server renders get a constant `false`.
pub fn media_query_signal(
    surface: Option<Rc<dyn Surface>>,
    mode: RenderMode,
    query: impl Fn() -> String + 'static,
) -> ReadSignal<bool> {
    let (matches, set_matches) = create_signal(false);
    if mode == RenderMode::Server {
        return matches;
    }

    create_effect(move |prev: Option<ActiveQuery>| {
        let media = query();
        if let Some(prev) = prev {
            if prev.store.query() == media {
                return prev;
            }
            // Dropping releases the old listener.
            drop(prev);
        }

        tracing::debug!(query = %media, "subscribing to media query");
        let store = Rc::new(MediaQueryStore::new(surface.as_ref(), media));
        set_matches.set(store.snapshot());
        let subscription = store.subscribe(Rc::new({
            let store = Rc::downgrade(&store);
            move || {
                if let Some(store) = store.upgrade() {
                    set_matches.set(store.snapshot());
                }
            }
        }));
        ActiveQuery {
            store,
            subscription,
        }
    });

    matches
}
