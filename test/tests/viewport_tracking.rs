//! Tests for viewport width tracking and resize notification.
//!
//! These tests verify that:
//! - The cached width is updated before any resize listener runs
//! - Every listener registered before a resize runs exactly once for it
//! - Unsubscribing is idempotent and leaves other listeners alone
//! - Listeners may subscribe and unsubscribe from inside a notification

use std::cell::RefCell;
use std::rc::Rc;

use floem_breakpoints_test::prelude::*;

#[test]
fn test_width_is_current_inside_listeners() {
    let (surface, responsive) = simulated(320);
    let log = WidthLog::new();
    let tracker = Rc::downgrade(responsive.viewport());
    let _sub = responsive.viewport().on_resize(log.listener(move || {
        tracker.upgrade().map_or(0, |tracker| tracker.width())
    }));

    surface.resize(1024);
    surface.resize(600);

    assert_eq!(log.seen(), [1024, 600]);
    assert_eq!(responsive.width(), 600);
}

#[test]
fn test_each_listener_runs_once_per_resize() {
    let (surface, responsive) = simulated(320);
    let counters: Vec<_> = (0..5).map(|_| ChangeCounter::new()).collect();
    let _subs: Vec<_> = counters
        .iter()
        .map(|counter| responsive.viewport().on_resize(counter.listener()))
        .collect();

    surface.resize(400);
    surface.resize(500);

    for counter in &counters {
        assert_eq!(counter.count(), 2);
    }
}

#[test]
fn test_unsubscribe_twice() {
    let (surface, responsive) = simulated(320);
    let first = ChangeCounter::new();
    let second = ChangeCounter::new();
    let first_sub = responsive.viewport().on_resize(first.listener());
    let _second_sub = responsive.viewport().on_resize(second.listener());

    first_sub.unsubscribe();
    first_sub.unsubscribe();
    surface.resize(900);

    assert_eq!(first.count(), 0);
    assert_eq!(second.count(), 1);
    assert_eq!(responsive.viewport().listener_count(), 1);
}

#[test]
fn test_self_unsubscribe_during_notification() {
    let (surface, responsive) = simulated(320);
    let counter = ChangeCounter::new();
    let handle: Rc<RefCell<Option<Subscription>>> = Rc::default();

    let sub = responsive.viewport().on_resize({
        let handle = handle.clone();
        let bump = counter.listener();
        Rc::new(move || {
            bump();
            if let Some(sub) = handle.borrow().as_ref() {
                sub.unsubscribe();
            }
        })
    });
    *handle.borrow_mut() = Some(sub);

    surface.resize(400);
    surface.resize(500);

    assert_eq!(counter.count(), 1);
    assert_eq!(responsive.viewport().listener_count(), 0);
}

#[test]
fn test_subscribe_during_notification_starts_next_pass() {
    let (surface, responsive) = simulated(320);
    let late = ChangeCounter::new();
    let late_subs: Rc<RefCell<Vec<Subscription>>> = Rc::default();

    let viewport = Rc::downgrade(responsive.viewport());
    let _sub = responsive.viewport().on_resize({
        let late = late.clone();
        let late_subs = late_subs.clone();
        Rc::new(move || {
            if let Some(viewport) = viewport.upgrade() {
                if late_subs.borrow().is_empty() {
                    let sub = viewport.on_resize(late.listener());
                    late_subs.borrow_mut().push(sub);
                }
            }
        })
    });

    surface.resize(400);
    assert_eq!(late.count(), 0);
    surface.resize(500);
    assert_eq!(late.count(), 1);
}

#[test]
fn test_headless_tracker() {
    let responsive = Responsive::headless();
    let counter = ChangeCounter::new();
    let sub = responsive.viewport().on_resize(counter.listener());

    assert_eq!(responsive.width(), 0);
    assert_eq!(responsive.use_viewport().get_untracked(), 0);

    sub.unsubscribe();
    sub.unsubscribe();
    assert_eq!(counter.count(), 0);
}

#[test]
fn test_single_surface_listener_per_tracker() {
    let surface = SimulatedSurface::new(800);
    let responsive = Responsive::new(surface.clone());
    assert_eq!(surface.resize_listener_count(), 1);

    // Views subscribe to the tracker, never to the surface directly.
    let _width = responsive.use_viewport();
    assert_eq!(surface.resize_listener_count(), 1);
}
