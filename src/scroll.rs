//! Scroll debouncing: report once per burst of scroll events.
//!
//! DESIGN
//! ======
//! Every scroll event re-arms a single timer; only when it fires without
//! being re-armed is the burst considered over. The start offset is captured
//! on the first event of a burst and cleared when the burst is reported.

#[cfg(test)]
#[path = "scroll_test.rs"]
mod scroll_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::config::DEFAULT_SCROLL_DEBOUNCE_MS;
use crate::error::Result;
use crate::events::{EventKind, Handler, SharedEventSource, Subscription};
use crate::geometry::ScrollPosition;
use crate::timer::{SharedScheduler, TimerId};

/// Start offset of the burst in progress, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollBurst {
    start: Option<f64>,
}

impl ScrollBurst {
    /// Record `y` as the start unless a burst is already running.
    pub fn begin(&mut self, y: f64) {
        if self.start.is_none() {
            self.start = Some(y);
        }
    }

    /// Close the burst at `end`, yielding `(distance, start, end)`.
    pub fn finish(&mut self, end: f64) -> Option<(f64, f64, f64)> {
        self.start.take().map(|start| (end - start, start, end))
    }

    #[must_use]
    pub fn start(&self) -> Option<f64> {
        self.start
    }
}

struct Debouncer {
    scheduler: SharedScheduler,
    delay: Duration,
    pending: Cell<Option<TimerId>>,
}

impl Debouncer {
    fn new(scheduler: SharedScheduler, delay: Duration) -> Rc<Self> {
        Rc::new(Self { scheduler, delay, pending: Cell::new(None) })
    }

    fn trigger(self: &Rc<Self>, task: impl FnOnce() + 'static) {
        self.cancel();
        let this = Rc::clone(self);
        let id = self.scheduler.set_timeout(
            self.delay,
            Box::new(move || {
                this.pending.set(None);
                task();
            }),
        );
        self.pending.set(Some(id));
    }

    fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.clear(id);
        }
    }
}

fn default_window() -> Duration {
    Duration::from_millis(DEFAULT_SCROLL_DEBOUNCE_MS)
}

/// Call `callback(distance, start, end)` after each scroll burst settles.
///
/// `refresh` is the quiet period; `None` or zero means 66ms.
///
/// # Errors
///
/// Fails when `window_events` refuses the scroll listener.
pub fn on_scroll_distance<F>(
    window_events: &SharedEventSource,
    scroll: Rc<dyn ScrollPosition>,
    scheduler: &SharedScheduler,
    refresh: Option<Duration>,
    callback: F,
) -> Result<Subscription>
where
    F: FnMut(f64, f64, f64) + 'static,
{
    let delay = refresh.filter(|d| !d.is_zero()).unwrap_or_else(default_window);
    let debouncer = Debouncer::new(Rc::clone(scheduler), delay);
    let burst = Rc::new(RefCell::new(ScrollBurst::default()));
    let callback = Rc::new(RefCell::new(callback));

    let on_scroll: Handler = {
        let debouncer = Rc::clone(&debouncer);
        Box::new(move |_| {
            burst.borrow_mut().begin(scroll.scroll_y());
            let burst = Rc::clone(&burst);
            let scroll = Rc::clone(&scroll);
            let callback = Rc::clone(&callback);
            debouncer.trigger(move || {
                let finished = burst.borrow_mut().finish(scroll.scroll_y());
                if let Some((distance, start, end)) = finished {
                    let mut callback = callback.borrow_mut();
                    callback(distance, start, end);
                }
            });
        })
    };

    let sub = Subscription::attach(window_events, vec![(EventKind::Scroll, on_scroll)])?;
    Ok(sub.with_teardown(move || debouncer.cancel()))
}

/// Call `callback()` once scrolling has paused for 66ms.
///
/// # Errors
///
/// Fails when `window_events` refuses the scroll listener.
pub fn on_scroll_stop<F>(
    window_events: &SharedEventSource,
    scheduler: &SharedScheduler,
    callback: F,
) -> Result<Subscription>
where
    F: FnMut() + 'static,
{
    let debouncer = Debouncer::new(Rc::clone(scheduler), default_window());
    let callback = Rc::new(RefCell::new(callback));

    let on_scroll: Handler = {
        let debouncer = Rc::clone(&debouncer);
        Box::new(move |_| {
            let callback = Rc::clone(&callback);
            debouncer.trigger(move || {
                let mut callback = callback.borrow_mut();
                callback();
            });
        })
    };

    let sub = Subscription::attach(window_events, vec![(EventKind::Scroll, on_scroll)])?;
    Ok(sub.with_teardown(move || debouncer.cancel()))
}
