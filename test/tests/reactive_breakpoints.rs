//! Tests for breakpoint signals and their effects.
//!
//! These tests verify that:
//! - Effects re-run when a breakpoint starts or stops matching, and only then
//! - The viewport signal follows every resize
//! - Server renders see `false` and 0 no matter how wide the surface is
//! - A reactive query string re-resolves its media query when it changes

use std::cell::Cell;
use std::rc::Rc;

use floem_breakpoints_test::prelude::*;

#[test]
fn test_effect_runs_when_breakpoint_flips() {
    let (surface, responsive) = simulated(500);
    let wide = responsive.use_up("md").unwrap();
    let runs = Rc::new(Cell::new(0));
    let last = Rc::new(Cell::new(false));

    let read = wide.read_signal();
    create_effect({
        let runs = runs.clone();
        let last = last.clone();
        move |_| {
            runs.set(runs.get() + 1);
            last.set(read.get());
        }
    });
    assert_eq!(runs.get(), 1);
    assert!(!last.get());

    surface.resize(800);
    assert_eq!(runs.get(), 2);
    assert!(last.get());

    // Still wider than md: the signal keeps its value and the effect stays put.
    surface.resize(1200);
    assert_eq!(runs.get(), 2);

    surface.resize(767);
    assert_eq!(runs.get(), 3);
    assert!(!last.get());
}

#[test]
fn test_viewport_signal_follows_resizes() {
    let (surface, responsive) = simulated(500);
    let width = responsive.use_viewport();
    let log = Rc::new(std::cell::RefCell::new(Vec::new()));

    let read = width.read_signal();
    create_effect({
        let log = log.clone();
        move |_| log.borrow_mut().push(read.get())
    });

    surface.resize(640);
    surface.resize(1280);
    assert_eq!(*log.borrow(), [500, 640, 1280]);
    assert_eq!(width.get_untracked(), 1280);
}

#[test]
fn test_all_hooks() {
    let (surface, responsive) = simulated(700);
    let up = responsive.use_up("sm").unwrap();
    let down = responsive.use_down("md").unwrap();
    let only = responsive.use_only("sm").unwrap();
    let not = responsive.use_not("sm").unwrap();
    let between = responsive.use_between("xs", "lg").unwrap();

    assert!(up.get_untracked());
    assert!(down.get_untracked());
    assert!(only.get_untracked());
    assert!(!not.get_untracked());
    assert!(between.get_untracked());

    surface.resize(1100);
    assert!(up.get_untracked());
    assert!(!down.get_untracked());
    assert!(!only.get_untracked());
    assert!(not.get_untracked());
    assert!(!between.get_untracked());
}

#[test]
fn test_hook_errors_propagate() {
    let (_surface, responsive) = simulated(700);
    assert!(matches!(
        responsive.use_up("huge"),
        Err(BreakpointError::UnknownBreakpoint { .. })
    ));
    assert!(matches!(
        responsive.use_between("xl", "xs"),
        Err(BreakpointError::InvalidRange { .. })
    ));
}

#[test]
fn test_server_render_is_deterministic() {
    let surface = SimulatedSurface::new(1600);
    let responsive = Responsive::new(surface.clone()).render_mode(RenderMode::Server);

    let width = responsive.use_viewport();
    let wide = responsive.use_up("xs").unwrap();
    let narrow = responsive.use_down("2xl").unwrap();
    assert_eq!(width.get_untracked(), 0);
    assert!(!wide.get_untracked());
    assert!(!narrow.get_untracked());

    surface.resize(300);
    assert_eq!(width.get_untracked(), 0);
    assert!(!narrow.get_untracked());
    assert_eq!(responsive.viewport().listener_count(), 0);
}

#[test]
fn test_headless_signals_are_false() {
    let responsive = Responsive::headless();
    let up = responsive.use_up(0u32).unwrap();
    let down = responsive.use_down("2xl").unwrap();
    let dynamic = responsive.use_media_query(|| "(min-width: 0px)".to_string());
    assert!(!up.get_untracked());
    assert!(!down.get_untracked());
    assert!(!dynamic.get_untracked());
}

#[test]
fn test_query_follows_breakpoint_name() {
    let (surface, responsive) = simulated(900);
    let responsive = Rc::new(responsive);
    let name = create_rw_signal("md".to_string());

    let matches = responsive.use_media_query({
        let responsive = responsive.clone();
        move || {
            let name = name.get();
            responsive
                .query_up(name.as_str())
                .map(|query| query.to_string())
                .unwrap_or_else(|err| panic!("{err}"))
        }
    });
    assert!(matches.get_untracked());
    assert_eq!(surface.live_media_queries(), 1);

    name.set("lg".to_string());
    assert!(!matches.get_untracked());
    assert_eq!(surface.live_media_queries(), 1);

    surface.resize(1100);
    assert!(matches.get_untracked());

    name.set("2xl".to_string());
    assert!(!matches.get_untracked());
    assert_eq!(surface.live_media_queries(), 1);
}

#[test]
fn test_dropped_signals_release_listeners() {
    let (surface, responsive) = simulated(900);
    let signals: Vec<_> = ["xs", "sm", "md"]
        .into_iter()
        .map(|name| responsive.use_only(name).unwrap())
        .collect();
    let width = responsive.use_viewport();
    assert_eq!(surface.live_media_queries(), 3);
    assert_eq!(responsive.viewport().listener_count(), 1);

    drop(signals);
    drop(width);
    assert_eq!(surface.live_media_queries(), 0);
    assert_eq!(responsive.viewport().listener_count(), 0);
}
