//! Event-source capability, listener subscriptions, and a manual dispatcher.
//!
//! SYSTEM CONTEXT
//! ==============
//! Gesture, scroll, and ready helpers register listeners through
//! [`EventSource`] and hand back a [`Subscription`]. The browser backing is
//! `web::BrowserEvents`; [`ManualEventSource`] lets tests fire synthetic
//! events without a DOM.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::{Error, Result};

/// The DOM events the helpers listen for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    TouchStart,
    TouchEnd,
    Click,
    Scroll,
    DomContentLoaded,
}

impl EventKind {
    /// DOM event type string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TouchStart => "touchstart",
            Self::TouchEnd => "touchend",
            Self::Click => "click",
            Self::Scroll => "scroll",
            Self::DomContentLoaded => "DOMContentLoaded",
        }
    }
}

/// Page-space coordinates in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A dispatched event, reduced to what the helpers read.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    /// Page coordinates of the first changed touch, for touch events.
    pub touch: Option<Point>,
}

impl Event {
    #[must_use]
    pub fn new(kind: EventKind) -> Self {
        Self { kind, touch: None }
    }

    #[must_use]
    pub fn touch(kind: EventKind, at: Point) -> Self {
        Self { kind, touch: Some(at) }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

pub type Handler = Box<dyn FnMut(&Event)>;

/// Something listeners can be attached to (an element, the window, the document).
pub trait EventSource {
    /// # Errors
    ///
    /// Returns an Environment error when the target refuses the listener;
    /// nothing stays registered in that case.
    fn add_listener(&self, kind: EventKind, handler: Handler) -> Result<ListenerId>;
    fn remove_listener(&self, id: ListenerId);
}

pub type SharedEventSource = Rc<dyn EventSource>;

/// Listeners registered by one helper call.
///
/// Dropping a subscription leaves its listeners attached; call
/// [`Subscription::cancel`] to detach them.
pub struct Subscription {
    source: SharedEventSource,
    ids: Vec<ListenerId>,
    on_cancel: Option<Box<dyn FnOnce()>>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("ids", &self.ids).finish_non_exhaustive()
    }
}

impl Subscription {
    #[must_use]
    pub fn new(source: SharedEventSource, ids: Vec<ListenerId>) -> Self {
        Self { source, ids, on_cancel: None }
    }

    /// Register every handler on `source`, all or nothing.
    ///
    /// # Errors
    ///
    /// Returns the first registration failure after removing the listeners
    /// added before it.
    pub fn attach(source: &SharedEventSource, handlers: Vec<(EventKind, Handler)>) -> Result<Self> {
        let mut ids = Vec::with_capacity(handlers.len());
        for (kind, handler) in handlers {
            match source.add_listener(kind, handler) {
                Ok(id) => ids.push(id),
                Err(err) => {
                    log::warn!("{} listener refused, detaching {} others: {err}", kind.as_str(), ids.len());
                    for id in ids {
                        source.remove_listener(id);
                    }
                    return Err(err);
                }
            }
        }
        Ok(Self::new(Rc::clone(source), ids))
    }

    /// Run extra teardown (e.g. clearing a pending timer) on cancel.
    #[must_use]
    pub fn with_teardown(mut self, teardown: impl FnOnce() + 'static) -> Self {
        self.on_cancel = Some(Box::new(teardown));
        self
    }

    #[must_use]
    pub fn listener_ids(&self) -> &[ListenerId] {
        &self.ids
    }

    /// Detach every listener owned by this subscription.
    pub fn cancel(self) {
        for id in self.ids {
            self.source.remove_listener(id);
        }
        if let Some(teardown) = self.on_cancel {
            teardown();
        }
        log::debug!("subscription cancelled");
    }
}

struct Listener {
    id: ListenerId,
    kind: EventKind,
    handler: Rc<RefCell<Handler>>,
}

/// In-memory [`EventSource`] with synchronous dispatch.
#[derive(Default)]
pub struct ManualEventSource {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<Listener>>,
    refused: RefCell<Vec<EventKind>>,
}

impl ManualEventSource {
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Deliver `event` to every listener for its kind, in registration order.
    ///
    /// Returns how many handlers ran. A handler already on the stack
    /// (re-entrant dispatch) is skipped, as is one removed by an earlier
    /// handler of the same dispatch.
    pub fn dispatch(&self, event: &Event) -> usize {
        let targets: Vec<(ListenerId, Rc<RefCell<Handler>>)> = self
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.kind == event.kind)
            .map(|l| (l.id, Rc::clone(&l.handler)))
            .collect();

        let mut ran = 0;
        for (id, handler) in targets {
            if !self.is_registered(id) {
                continue;
            }
            match handler.try_borrow_mut() {
                Ok(mut handler) => {
                    (*handler)(event);
                    ran += 1;
                }
                Err(_) => log::warn!("skipping re-entrant {} handler", event.kind.as_str()),
            }
        }
        ran
    }

    /// Make later registrations for `kind` fail, like a target whose
    /// `addEventListener` throws.
    pub fn refuse(&self, kind: EventKind) {
        self.refused.borrow_mut().push(kind);
    }

    fn is_registered(&self, id: ListenerId) -> bool {
        self.listeners.borrow().iter().any(|l| l.id == id)
    }

    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|l| l.kind == kind)
            .count()
    }
}

impl EventSource for ManualEventSource {
    fn add_listener(&self, kind: EventKind, handler: Handler) -> Result<ListenerId> {
        if self.refused.borrow().contains(&kind) {
            return Err(Error::Dom(format!("{} listener refused", kind.as_str())));
        }
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push(Listener {
            id,
            kind,
            handler: Rc::new(RefCell::new(handler)),
        });
        Ok(id)
    }

    fn remove_listener(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|l| l.id != id);
    }
}
