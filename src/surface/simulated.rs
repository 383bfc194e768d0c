//! An in-memory surface for headless hosts and tests.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

use super::{MediaQueryList, Surface};
use crate::listener::{Listener, ListenerSet, Subscription};
use crate::query::MediaQuery;

/// A surface whose width is set by hand.
///
/// Media query strings are read with [`MediaQuery::from_str`]. Calling
/// [`resize`](Self::resize) updates the width, re-evaluates every live media
/// query list, runs the resize listeners and then runs the change listeners
/// of the lists whose result flipped.
///
/// [`MediaQuery::from_str`]: std::str::FromStr::from_str
pub struct SimulatedSurface {
    width: Cell<u32>,
    resize_listeners: ListenerSet,
    lists: RefCell<Vec<Weak<SimulatedMediaQueryList>>>,
}

impl SimulatedSurface {
    pub fn new(width: u32) -> Rc<Self> {
        Rc::new(Self {
            width: Cell::new(width),
            resize_listeners: ListenerSet::new(),
            lists: RefCell::new(Vec::new()),
        })
    }

    pub fn width(&self) -> u32 {
        self.width.get()
    }

    pub fn resize(&self, width: u32) {
        self.width.set(width);

        let flipped: SmallVec<[Rc<SimulatedMediaQueryList>; 4]> = {
            let mut lists = self.lists.borrow_mut();
            lists.retain(|list| list.strong_count() > 0);
            lists
                .iter()
                .filter_map(Weak::upgrade)
                .filter(|list| list.update(width))
                .collect()
        };

        self.resize_listeners.notify();
        for list in flipped {
            list.listeners.notify();
        }
    }

    /// Number of media query lists still alive.
    pub fn live_media_queries(&self) -> usize {
        self.lists
            .borrow()
            .iter()
            .filter(|list| list.strong_count() > 0)
            .count()
    }

    pub fn resize_listener_count(&self) -> usize {
        self.resize_listeners.len()
    }
}

impl Surface for SimulatedSurface {
    fn inner_width(&self) -> u32 {
        self.width.get()
    }

    fn on_resize(&self, listener: Listener) -> Subscription {
        self.resize_listeners.insert(listener)
    }

    fn match_media(&self, query: &str) -> Rc<dyn MediaQueryList> {
        let parsed = match query.parse::<MediaQuery>() {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                tracing::warn!(query, %err, "media query never matches");
                None
            }
        };
        let list = Rc::new(SimulatedMediaQueryList {
            media: query.to_string(),
            matches: Cell::new(false),
            query: parsed,
            listeners: ListenerSet::new(),
        });
        list.update(self.width.get());
        let mut lists = self.lists.borrow_mut();
        lists.retain(|live| live.strong_count() > 0);
        lists.push(Rc::downgrade(&list));
        list
    }
}

struct SimulatedMediaQueryList {
    media: String,
    query: Option<MediaQuery>,
    matches: Cell<bool>,
    listeners: ListenerSet,
}

impl SimulatedMediaQueryList {
    /// Re-evaluates against `width`, returning whether the result changed.
    fn update(&self, width: u32) -> bool {
        let matches = self
            .query
            .as_ref()
            .is_some_and(|query| query.matches(width as f64));
        self.matches.replace(matches) != matches
    }
}

impl MediaQueryList for SimulatedMediaQueryList {
    fn media(&self) -> &str {
        &self.media
    }

    fn matches(&self) -> bool {
        self.matches.get()
    }

    fn add_change_listener(&self, listener: Listener) -> Subscription {
        self.listeners.insert(listener)
    }
}
