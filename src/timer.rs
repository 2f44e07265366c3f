//! Timer capability and a virtual-time implementation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Debounce and polling helpers never touch `setTimeout` directly; they go
//! through [`Scheduler`]. In the browser that is `web::BrowserScheduler`.
//! Natively and in tests it is [`ManualScheduler`], where time only moves
//! when [`ManualScheduler::advance`] is called.

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::Duration;

/// Opaque handle returned by [`Scheduler`] registrations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Single-threaded timer facility (`setTimeout` / `setInterval` shaped).
pub trait Scheduler {
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId;
    fn set_interval(&self, period: Duration, task: Box<dyn FnMut()>) -> TimerId;
    /// Clear a timeout or interval. Unknown or already-fired ids are ignored.
    fn clear(&self, id: TimerId);
}

pub type SharedScheduler = Rc<dyn Scheduler>;

enum Task {
    Once(Option<Box<dyn FnOnce()>>),
    Repeat { period: Duration, task: Box<dyn FnMut()> },
}

/// Deterministic scheduler driven by explicit clock advances.
///
/// Due timers fire in `(due time, registration order)` order. Callbacks may
/// register or clear timers, including themselves.
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    next_id: Cell<u64>,
    next_seq: Cell<u64>,
    queue: RefCell<BTreeMap<(Duration, u64), TimerId>>,
    tasks: RefCell<HashMap<TimerId, Rc<RefCell<Task>>>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Virtual time elapsed since construction.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.now.get()
    }

    /// Number of timers still registered.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Move virtual time forward by `by`, firing every timer that falls due.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;
        while let Some((due, id)) = self.pop_due(target) {
            self.now.set(due);
            self.fire(id);
        }
        self.now.set(target);
    }

    fn pop_due(&self, target: Duration) -> Option<(Duration, TimerId)> {
        let mut queue = self.queue.borrow_mut();
        let (&(due, seq), &id) = queue.iter().next()?;
        if due > target {
            return None;
        }
        queue.remove(&(due, seq));
        Some((due, id))
    }

    fn fire(&self, id: TimerId) {
        let Some(task) = self.tasks.borrow().get(&id).cloned() else {
            return;
        };
        let mut task = task.borrow_mut();
        match &mut *task {
            Task::Once(slot) => {
                self.tasks.borrow_mut().remove(&id);
                if let Some(run) = slot.take() {
                    run();
                }
            }
            Task::Repeat { period, task } => {
                let period = *period;
                task();
                if self.tasks.borrow().contains_key(&id) {
                    self.enqueue(self.now.get() + period, id);
                }
            }
        }
    }

    fn register(&self, delay: Duration, task: Task) -> TimerId {
        let id = TimerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.tasks.borrow_mut().insert(id, Rc::new(RefCell::new(task)));
        self.enqueue(self.now.get() + delay, id);
        id
    }

    fn enqueue(&self, due: Duration, id: TimerId) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.queue.borrow_mut().insert((due, seq), id);
    }
}

impl Scheduler for ManualScheduler {
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId {
        self.register(delay, Task::Once(Some(task)))
    }

    fn set_interval(&self, period: Duration, task: Box<dyn FnMut()>) -> TimerId {
        // A zero period would spin forever inside `advance`.
        let period = period.max(Duration::from_millis(1));
        self.register(period, Task::Repeat { period, task })
    }

    fn clear(&self, id: TimerId) {
        if self.tasks.borrow_mut().remove(&id).is_some() {
            self.queue.borrow_mut().retain(|_, queued| *queued != id);
        }
    }
}
