//! Run a callback once the DOM is ready.

#[cfg(test)]
#[path = "ready_test.rs"]
mod ready_test;

use crate::dom::Dom;
use crate::error::Result;
use crate::events::{EventKind, Handler, SharedEventSource, Subscription};

/// Run `callback` now if the document is interactive or complete, otherwise on `DOMContentLoaded`.
///
/// Returns the pending listener when the callback was deferred. The callback
/// runs at most once even if the event is dispatched again.
///
/// # Errors
///
/// Fails when the callback must wait and `document_events` refuses the
/// listener.
pub fn on_ready<D, F>(dom: &D, document_events: &SharedEventSource, callback: F) -> Result<Option<Subscription>>
where
    D: Dom,
    F: FnOnce() + 'static,
{
    if dom.ready_state().is_ready() {
        callback();
        return Ok(None);
    }

    let mut pending = Some(callback);
    let on_loaded: Handler = Box::new(move |_| {
        if let Some(callback) = pending.take() {
            callback();
        }
    });
    let sub = Subscription::attach(document_events, vec![(EventKind::DomContentLoaded, on_loaded)])?;
    log::debug!("deferring ready callback until DOMContentLoaded");
    Ok(Some(sub))
}
