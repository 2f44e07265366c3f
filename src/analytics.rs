//! Event hits to the page's analytics collector.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages that load the analytics snippet expose a global command function
//! (named by `window.GoogleAnalyticsObject`). This module builds the hit and
//! hands it to an [`AnalyticsCollector`]; `web::BrowserAnalytics` forwards it
//! to that global.

#[cfg(test)]
#[path = "analytics_test.rs"]
mod analytics_test;

use serde::Serialize;

use crate::error::{Error, Result};

pub const HIT_TYPE_EVENT: &str = "event";

/// Payload of one event hit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub category: String,
    pub action: String,
    pub label: String,
    pub non_interaction: bool,
}

/// The global analytics command queue.
pub trait AnalyticsCollector {
    /// Invoke `collector(command, hit_type, category, action, label, {nonInteraction})`.
    ///
    /// # Errors
    ///
    /// Returns an environment error if the collector rejects the call.
    fn dispatch(&self, command: &str, hit_type: &str, event: &AnalyticsEvent) -> Result<()>;
}

/// `"send"` for the default tracker, `"<name>.send"` for a named one.
#[must_use]
pub fn tracker_command(tracker_name: &str) -> String {
    if tracker_name.is_empty() {
        "send".to_owned()
    } else {
        format!("{tracker_name}.send")
    }
}

/// Send an event hit. Non-interactive hits do not affect bounce rate.
///
/// # Errors
///
/// Returns [`Error::Unavailable`] when no collector is installed and
/// propagates collector failures.
pub fn send_analytics_event(
    collector: Option<&dyn AnalyticsCollector>,
    category: &str,
    action: &str,
    label: &str,
    tracker_name: &str,
    interactive: bool,
) -> Result<()> {
    let collector = collector.ok_or(Error::Unavailable("analytics collector"))?;
    let event = AnalyticsEvent {
        category: category.to_owned(),
        action: action.to_owned(),
        label: label.to_owned(),
        non_interaction: !interactive,
    };
    let command = tracker_command(tracker_name);
    log::debug!("analytics {command}: {category}/{action}/{label}");
    collector.dispatch(&command, HIT_TYPE_EVENT, &event)
}
