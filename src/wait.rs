//! Poll a predicate until it holds or a deadline passes.
//!
//! DESIGN
//! ======
//! Two timers race: a polling interval and a one-shot deadline. Whichever
//! settles the wait first clears both, so exactly one outcome is delivered.
//! [`wait_until`] keeps the browser helper's contract (a timeout with no
//! error callback is dropped silently); [`wait_until_with`] always reports
//! the outcome as a `Result`.

#[cfg(test)]
#[path = "wait_test.rs"]
mod wait_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::config::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};
use crate::error::{Error, Result};
use crate::timer::{SharedScheduler, TimerId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitOptions {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            timeout: Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS),
        }
    }
}

struct WaitState {
    scheduler: SharedScheduler,
    poll: Cell<Option<TimerId>>,
    deadline: Cell<Option<TimerId>>,
    settled: Cell<bool>,
}

impl WaitState {
    /// Stop both timers. Returns `false` if the wait had already settled.
    fn settle(&self) -> bool {
        if self.settled.replace(true) {
            return false;
        }
        if let Some(id) = self.poll.take() {
            self.scheduler.clear(id);
        }
        if let Some(id) = self.deadline.take() {
            self.scheduler.clear(id);
        }
        true
    }
}

/// Handle to an in-flight wait.
pub struct WaitHandle {
    state: Rc<WaitState>,
}

impl WaitHandle {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        !self.state.settled.get()
    }

    /// Stop waiting without invoking any callback.
    pub fn cancel(&self) {
        if self.state.settle() {
            log::debug!("wait cancelled");
        }
    }
}

/// Poll `predicate` every 33ms for up to 10s.
///
/// `on_success` runs on the first `true`. On timeout `on_error` runs if given;
/// otherwise the timeout is only logged.
pub fn wait_until<P, S>(
    scheduler: &SharedScheduler,
    predicate: P,
    on_success: S,
    on_error: Option<Box<dyn FnOnce()>>,
) -> WaitHandle
where
    P: FnMut() -> bool + 'static,
    S: FnOnce() + 'static,
{
    wait_until_with(scheduler, WaitOptions::default(), predicate, move |outcome| match outcome {
        Ok(()) => on_success(),
        Err(err) => match on_error {
            Some(on_error) => on_error(),
            None => log::warn!("wait_until gave up: {err}"),
        },
    })
}

/// Poll `predicate` with explicit timings and receive the outcome as a `Result`.
///
/// `on_done` gets `Ok(())` on success or [`Error::Timeout`] once `options.timeout` elapses.
pub fn wait_until_with<P, D>(scheduler: &SharedScheduler, options: WaitOptions, mut predicate: P, on_done: D) -> WaitHandle
where
    P: FnMut() -> bool + 'static,
    D: FnOnce(Result<()>) + 'static,
{
    let state = Rc::new(WaitState {
        scheduler: Rc::clone(scheduler),
        poll: Cell::new(None),
        deadline: Cell::new(None),
        settled: Cell::new(false),
    });
    let on_done = Rc::new(RefCell::new(Some(on_done)));

    let poll = {
        let state = Rc::clone(&state);
        let on_done = Rc::clone(&on_done);
        scheduler.set_interval(
            options.interval,
            Box::new(move || {
                if state.settled.get() || !predicate() {
                    return;
                }
                if state.settle() {
                    let done = on_done.borrow_mut().take();
                    if let Some(done) = done {
                        done(Ok(()));
                    }
                }
            }),
        )
    };
    state.poll.set(Some(poll));

    let deadline = {
        let state = Rc::clone(&state);
        scheduler.set_timeout(
            options.timeout,
            Box::new(move || {
                if state.settle() {
                    let done = on_done.borrow_mut().take();
                    if let Some(done) = done {
                        done(Err(Error::Timeout(options.timeout)));
                    }
                }
            }),
        )
    };
    state.deadline.set(Some(deadline));

    WaitHandle { state }
}
