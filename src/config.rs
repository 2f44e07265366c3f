//! Timing and threshold knobs shared by the event-driven helpers.
//!
//! DESIGN
//! ======
//! Defaults reproduce the browser helpers' constants (66ms scroll debounce,
//! 33ms polling, 10s wait timeout, 7px/10px swipe threshold). Overrides come
//! from `DOMKIT_*` environment variables on native targets, or from a JSON
//! blob in the browser where no process environment exists.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::gesture::SwipeThreshold;
use crate::wait::WaitOptions;

pub const DEFAULT_SCROLL_DEBOUNCE_MS: u64 = 66;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 33;
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_SWIPE_X_PX: f64 = 7.0;
pub const DEFAULT_SWIPE_Y_PX: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub scroll_debounce_ms: u64,
    pub poll_interval_ms: u64,
    pub wait_timeout_ms: u64,
    pub swipe_x_px: f64,
    pub swipe_y_px: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            scroll_debounce_ms: DEFAULT_SCROLL_DEBOUNCE_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            wait_timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            swipe_x_px: DEFAULT_SWIPE_X_PX,
            swipe_y_px: DEFAULT_SWIPE_Y_PX,
        }
    }
}

impl Tuning {
    /// Read overrides from the process environment, falling back per field.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parse a JSON object; absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            scroll_debounce_ms: parse_or(&lookup, "DOMKIT_SCROLL_DEBOUNCE_MS", defaults.scroll_debounce_ms),
            poll_interval_ms: parse_or(&lookup, "DOMKIT_POLL_INTERVAL_MS", defaults.poll_interval_ms),
            wait_timeout_ms: parse_or(&lookup, "DOMKIT_WAIT_TIMEOUT_MS", defaults.wait_timeout_ms),
            swipe_x_px: parse_or(&lookup, "DOMKIT_SWIPE_X_PX", defaults.swipe_x_px),
            swipe_y_px: parse_or(&lookup, "DOMKIT_SWIPE_Y_PX", defaults.swipe_y_px),
        }
    }

    #[must_use]
    pub fn scroll_debounce(&self) -> Duration {
        Duration::from_millis(self.scroll_debounce_ms)
    }

    #[must_use]
    pub fn wait_options(&self) -> WaitOptions {
        WaitOptions {
            interval: Duration::from_millis(self.poll_interval_ms),
            timeout: Duration::from_millis(self.wait_timeout_ms),
        }
    }

    #[must_use]
    pub fn swipe_threshold(&self) -> SwipeThreshold {
        SwipeThreshold { x: self.swipe_x_px, y: self.swipe_y_px }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + Copy,
{
    lookup(key)
        .and_then(|raw| raw.trim().parse::<T>().ok())
        .unwrap_or(default)
}
