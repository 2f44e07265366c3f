//! Small browser-page helpers behind injectable capabilities.
//!
//! Each helper (element lookup, viewport checks, tap detection, scroll
//! debouncing, cookies, query strings, polling waits, CSS injection) talks to
//! the page only through a trait. With the `web` feature the [`web`] module
//! binds those traits to `web-sys`; everywhere else the in-memory
//! implementations ([`memory::MemoryDocument`], [`events::ManualEventSource`],
//! [`timer::ManualScheduler`], [`cookie::MemoryCookieStore`]) stand in, so the
//! logic is testable natively.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`dom`] | `Dom` capability, ready state, `select_first` / `select_all` |
//! | [`memory`] | Arena-backed in-memory document implementing `Dom` and `Layout` |
//! | [`events`] | Event types, `EventSource`, `Subscription`, manual dispatcher |
//! | [`timer`] | `Scheduler` capability and the virtual-time `ManualScheduler` |
//! | [`geometry`] | Offsets and viewport containment / overflow |
//! | [`gesture`] | Click-or-tap disambiguation |
//! | [`scroll`] | Debounced scroll distance and scroll stop |
//! | [`wait`] | Poll a predicate with a deadline |
//! | [`ready`] | Run a callback once the document is parsed |
//! | [`css`] | Inject or replace `<style>` elements, remove by selector |
//! | [`cookie`] | `document.cookie` read/write and an in-memory jar |
//! | [`url_params`] | Query-string parsing and `decodeURIComponent` |
//! | [`http`] | Fire-and-forget JSON GET with basic auth |
//! | [`analytics`] | Event hits to the page's analytics collector |
//! | [`collections`] | Shuffle and dedupe |
//! | [`number`] | Random integers, rounding, locale formatting |
//! | [`slug`] | Diacritic stripping |
//! | [`config`] | Timing and threshold tuning |
//! | [`error`] | Crate error type and its classification |

pub mod analytics;
pub mod collections;
pub mod config;
pub mod cookie;
pub mod css;
pub mod dom;
pub mod error;
pub mod events;
pub mod geometry;
pub mod gesture;
pub mod http;
pub mod memory;
pub mod number;
pub mod ready;
pub mod scroll;
mod selector;
pub mod slug;
pub mod timer;
pub mod url_params;
pub mod wait;
#[cfg(feature = "web")]
pub mod web;

pub use config::Tuning;
pub use error::{Error, ErrorKind, Result};
