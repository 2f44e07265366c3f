use std::cell::Cell;

use super::*;
use crate::events::ManualEventSource;

fn wired() -> (Rc<ManualEventSource>, Rc<Cell<u32>>, Subscription) {
    let source = ManualEventSource::new();
    let shared: SharedEventSource = source.clone();
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    let sub = on_click_or_tap(&shared, move |_| counter.set(counter.get() + 1)).unwrap();
    (source, hits, sub)
}

fn tap(source: &ManualEventSource, from: Point, to: Point) {
    source.dispatch(&Event::touch(EventKind::TouchStart, from));
    source.dispatch(&Event::touch(EventKind::TouchEnd, to));
}

// =============================================================
// TapState
// =============================================================

#[test]
fn small_travel_is_a_tap() {
    let mut state = TapState::new(SwipeThreshold::default());
    state.touch_start(Point::new(0.0, 0.0));
    assert!(state.touch_end(Point::new(3.0, 2.0)));
}

#[test]
fn threshold_is_inclusive() {
    let mut state = TapState::new(SwipeThreshold::default());
    state.touch_start(Point::new(0.0, 0.0));
    assert!(!state.touch_end(Point::new(7.0, 0.0)));
    assert!(!state.touch_end(Point::new(0.0, -10.0)));
    assert!(state.touch_end(Point::new(6.9, 9.9)));
}

#[test]
fn touch_end_without_start_does_not_fire() {
    let mut state = TapState::default();
    assert!(!state.touch_end(Point::new(0.0, 0.0)));
}

#[test]
fn click_after_touch_clears_latch_once() {
    let mut state = TapState::default();
    state.touch_start(Point::default());
    assert!(state.is_touch());
    assert!(!state.click());
    assert!(!state.is_touch());
    assert!(state.click());
}

// =============================================================
// on_click_or_tap
// =============================================================

#[test]
fn tap_within_threshold_fires_once() {
    let (source, hits, _sub) = wired();
    tap(&source, Point::new(0.0, 0.0), Point::new(3.0, 2.0));
    assert_eq!(hits.get(), 1);
}

#[test]
fn horizontal_swipe_is_suppressed() {
    let (source, hits, _sub) = wired();
    tap(&source, Point::new(0.0, 0.0), Point::new(20.0, 0.0));
    assert_eq!(hits.get(), 0);
}

#[test]
fn synthetic_click_after_tap_does_not_double_fire() {
    let (source, hits, _sub) = wired();
    tap(&source, Point::new(0.0, 0.0), Point::new(1.0, 1.0));
    source.dispatch(&Event::new(EventKind::Click));
    assert_eq!(hits.get(), 1);
}

#[test]
fn synthetic_click_after_swipe_stays_suppressed() {
    let (source, hits, _sub) = wired();
    tap(&source, Point::new(0.0, 0.0), Point::new(0.0, 40.0));
    source.dispatch(&Event::new(EventKind::Click));
    assert_eq!(hits.get(), 0);
}

#[test]
fn mouse_clicks_fire_every_time() {
    let (source, hits, _sub) = wired();
    source.dispatch(&Event::new(EventKind::Click));
    source.dispatch(&Event::new(EventKind::Click));
    assert_eq!(hits.get(), 2);
}

#[test]
fn callback_receives_the_triggering_event() {
    let source = ManualEventSource::new();
    let shared: SharedEventSource = source.clone();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let _sub = on_click_or_tap(&shared, move |event| log.borrow_mut().push(event.kind)).unwrap();

    tap(&source, Point::new(5.0, 5.0), Point::new(5.0, 6.0));
    source.dispatch(&Event::new(EventKind::Click));
    source.dispatch(&Event::new(EventKind::Click));
    assert_eq!(*seen.borrow(), vec![EventKind::TouchEnd, EventKind::Click]);
}

#[test]
fn custom_threshold_widens_taps() {
    let source = ManualEventSource::new();
    let shared: SharedEventSource = source.clone();
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    let _sub = on_click_or_tap_with(&shared, SwipeThreshold { x: 30.0, y: 30.0 }, move |_| {
        counter.set(counter.get() + 1);
    })
    .unwrap();
    tap(&source, Point::new(0.0, 0.0), Point::new(20.0, 0.0));
    assert_eq!(hits.get(), 1);
}

#[test]
fn cancel_detaches_all_three_listeners() {
    let (source, hits, sub) = wired();
    sub.cancel();
    assert_eq!(source.listener_count(EventKind::TouchStart), 0);
    assert_eq!(source.listener_count(EventKind::TouchEnd), 0);
    assert_eq!(source.listener_count(EventKind::Click), 0);
    source.dispatch(&Event::new(EventKind::Click));
    assert_eq!(hits.get(), 0);
}

#[test]
fn refused_click_listener_leaves_nothing_attached() {
    let source = ManualEventSource::new();
    source.refuse(EventKind::Click);
    let shared: SharedEventSource = source.clone();

    assert!(on_click_or_tap(&shared, |_| {}).is_err());
    assert_eq!(source.listener_count(EventKind::TouchStart), 0);
    assert_eq!(source.listener_count(EventKind::TouchEnd), 0);
}
