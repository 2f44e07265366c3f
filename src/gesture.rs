//! Click-or-tap disambiguation.
//!
//! Touch devices fire `touchstart`, `touchend`, then a synthetic `click` for
//! the same physical tap. [`TapState`] latches on touch so that trailing click
//! is swallowed, and treats a touch that travelled too far as a swipe.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::{DEFAULT_SWIPE_X_PX, DEFAULT_SWIPE_Y_PX};
use crate::error::Result;
use crate::events::{Event, EventKind, Handler, Point, SharedEventSource, Subscription};

/// Travel (in CSS pixels) at or beyond which a touch counts as a swipe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeThreshold {
    pub x: f64,
    pub y: f64,
}

impl Default for SwipeThreshold {
    fn default() -> Self {
        Self { x: DEFAULT_SWIPE_X_PX, y: DEFAULT_SWIPE_Y_PX }
    }
}

/// Touch latch plus the start point of the current touch.
#[derive(Clone, Debug, Default)]
pub struct TapState {
    threshold: SwipeThreshold,
    is_touch: bool,
    start: Option<Point>,
}

impl TapState {
    #[must_use]
    pub fn new(threshold: SwipeThreshold) -> Self {
        Self { threshold, is_touch: false, start: None }
    }

    #[must_use]
    pub fn is_touch(&self) -> bool {
        self.is_touch
    }

    pub fn touch_start(&mut self, at: Point) {
        self.is_touch = true;
        self.start = Some(at);
    }

    /// Returns `true` when the touch ended close enough to its start to be a tap.
    pub fn touch_end(&mut self, at: Point) -> bool {
        let Some(start) = self.start else {
            return false;
        };
        let dx = (at.x - start.x).abs();
        let dy = (at.y - start.y).abs();
        dx < self.threshold.x && dy < self.threshold.y
    }

    /// Returns `true` for a genuine click; a click trailing a touch clears the latch instead.
    pub fn click(&mut self) -> bool {
        if self.is_touch {
            self.is_touch = false;
            return false;
        }
        true
    }
}

/// Run `callback` once per click or tap on `target`.
///
/// # Errors
///
/// Fails when `target` refuses one of the three listeners; none stay attached.
pub fn on_click_or_tap<F>(target: &SharedEventSource, callback: F) -> Result<Subscription>
where
    F: FnMut(&Event) + 'static,
{
    on_click_or_tap_with(target, SwipeThreshold::default(), callback)
}

/// # Errors
///
/// Fails when `target` refuses one of the three listeners; none stay attached.
pub fn on_click_or_tap_with<F>(
    target: &SharedEventSource,
    threshold: SwipeThreshold,
    callback: F,
) -> Result<Subscription>
where
    F: FnMut(&Event) + 'static,
{
    let state = Rc::new(RefCell::new(TapState::new(threshold)));
    let callback = Rc::new(RefCell::new(callback));

    let on_start: Handler = {
        let state = Rc::clone(&state);
        Box::new(move |event: &Event| {
            if let Some(at) = event.touch {
                state.borrow_mut().touch_start(at);
            }
        })
    };

    let on_end: Handler = {
        let state = Rc::clone(&state);
        let callback = Rc::clone(&callback);
        Box::new(move |event: &Event| {
            let Some(at) = event.touch else {
                return;
            };
            let fire = state.borrow_mut().touch_end(at);
            if fire {
                let mut callback = callback.borrow_mut();
                callback(event);
            }
        })
    };

    let on_click: Handler = Box::new(move |event: &Event| {
        let fire = state.borrow_mut().click();
        if fire {
            let mut callback = callback.borrow_mut();
            callback(event);
        }
    });

    Subscription::attach(
        target,
        vec![(EventKind::TouchStart, on_start), (EventKind::TouchEnd, on_end), (EventKind::Click, on_click)],
    )
}
