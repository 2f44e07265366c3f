//! `document.cookie` access behind an injectable store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser exposes cookies as one `"; "`-joined string for reads and a
//! single `name=value; expires=...; path=...` string per write. [`CookieStore`]
//! captures exactly that protocol so [`get_cookie`] and [`set_cookie`] behave
//! the same against `web::BrowserDocument` and [`MemoryCookieStore`].
//!
//! TRADE-OFFS
//! ==========
//! [`MemoryCookieStore`] models expiry and path replacement but ignores
//! domains and path matching on read, since a page only ever sees the
//! cookies scoped to it.

#[cfg(test)]
#[path = "cookie_test.rs"]
mod cookie_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::error::{Error, Result};

pub const DEFAULT_COOKIE_PATH: &str = "/";

/// IMF-fixdate, the `expires` format cookie stores accept.
const EXPIRES_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT");

/// The page's cookie jar, spoken in the `document.cookie` string protocol.
pub trait CookieStore {
    /// All visible cookies as `name=value` pairs joined by `"; "`.
    ///
    /// # Errors
    ///
    /// Returns an environment error when the jar cannot be read.
    fn read(&self) -> Result<String>;

    /// Apply one `name=value; attr=...` assignment.
    ///
    /// # Errors
    ///
    /// Returns an environment error when the jar rejects the write.
    fn write(&self, cookie: &str) -> Result<()>;
}

pub trait Clock {
    fn now_utc(&self) -> OffsetDateTime;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: Cell<OffsetDateTime>,
}

impl FixedClock {
    #[must_use]
    pub fn new(at: OffsetDateTime) -> Rc<Self> {
        Rc::new(Self { now: Cell::new(at) })
    }

    pub fn set(&self, at: OffsetDateTime) {
        self.now.set(at);
    }

    pub fn advance(&self, by: time::Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> OffsetDateTime {
        self.now.get()
    }
}

/// A cookie about to be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookieEntry {
    pub name: String,
    pub value: String,
    /// Seconds from now until expiry. Zero or negative deletes the cookie.
    pub expires_in: i64,
    pub path: String,
}

impl CookieEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>, expires_in: i64) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            expires_in,
            path: DEFAULT_COOKIE_PATH.to_owned(),
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Render as `name=value; expires=<IMF-fixdate>; path=<path>`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidExpiry`] when `now + expires_in` is not a
    /// representable date.
    pub fn to_cookie_string(&self, now: OffsetDateTime) -> Result<String> {
        let expires = now
            .to_offset(UtcOffset::UTC)
            .checked_add(time::Duration::seconds(self.expires_in))
            .ok_or(Error::InvalidExpiry(self.expires_in))?;
        let expires = expires
            .format(EXPIRES_FORMAT)
            .map_err(|_| Error::InvalidExpiry(self.expires_in))?;
        Ok(format!("{}={}; expires={expires}; path={}", self.name, self.value, self.path))
    }
}

/// Value of cookie `name`, or `None` when it is absent or set more than once.
///
/// # Errors
///
/// Propagates [`CookieStore::read`] failures.
pub fn get_cookie(store: &dyn CookieStore, name: &str) -> Result<Option<String>> {
    let jar = format!("; {}", store.read()?);
    let needle = format!("; {name}=");
    let mut parts = jar.split(needle.as_str());
    let (Some(_), Some(tail), None) = (parts.next(), parts.next(), parts.next()) else {
        return Ok(None);
    };
    Ok(tail.split(';').next().map(str::to_owned))
}

/// Write `name=value` expiring `expires_in_secs` from `clock`'s now.
/// `path` defaults to `/`.
///
/// # Errors
///
/// Returns [`Error::InvalidExpiry`] for an unrepresentable expiry and
/// propagates [`CookieStore::write`] failures.
pub fn set_cookie(
    store: &dyn CookieStore,
    clock: &dyn Clock,
    name: &str,
    value: &str,
    expires_in_secs: i64,
    path: Option<&str>,
) -> Result<()> {
    let entry = CookieEntry::new(name, value, expires_in_secs).with_path(path.unwrap_or(DEFAULT_COOKIE_PATH));
    let cookie = entry.to_cookie_string(clock.now_utc())?;
    log::debug!("set cookie {name} (path {})", entry.path);
    store.write(&cookie)
}

struct StoredCookie {
    name: String,
    value: String,
    path: String,
    expires: Option<OffsetDateTime>,
}

/// In-memory jar with `document.cookie` write semantics.
pub struct MemoryCookieStore {
    clock: Rc<dyn Clock>,
    cookies: RefCell<Vec<StoredCookie>>,
}

impl MemoryCookieStore {
    #[must_use]
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self { clock, cookies: RefCell::new(Vec::new()) }
    }
}

fn is_live(cookie: &StoredCookie, now: OffsetDateTime) -> bool {
    cookie.expires.is_none_or(|at| at > now)
}

impl CookieStore for MemoryCookieStore {
    fn read(&self) -> Result<String> {
        let now = self.clock.now_utc();
        let cookies = self.cookies.borrow();
        let live: Vec<String> = cookies
            .iter()
            .filter(|c| is_live(c, now))
            .map(|c| format!("{}={}", c.name, c.value))
            .collect();
        Ok(live.join("; "))
    }

    fn write(&self, cookie: &str) -> Result<()> {
        let mut fields = cookie.split(';');
        let pair = fields.next().unwrap_or_default().trim();
        let (name, value) = pair.split_once('=').unwrap_or(("", pair));

        let mut path = DEFAULT_COOKIE_PATH.to_owned();
        let mut expires = None;
        for attr in fields {
            let (key, val) = attr.trim().split_once('=').unwrap_or((attr.trim(), ""));
            if key.eq_ignore_ascii_case("path") {
                path = val.to_owned();
            } else if key.eq_ignore_ascii_case("expires") {
                expires = PrimitiveDateTime::parse(val, EXPIRES_FORMAT).ok().map(PrimitiveDateTime::assume_utc);
            }
        }

        let stored = StoredCookie { name: name.to_owned(), value: value.to_owned(), path, expires };
        let now = self.clock.now_utc();
        let mut cookies = self.cookies.borrow_mut();
        let existing = cookies.iter().position(|c| c.name == stored.name && c.path == stored.path);
        match (existing, is_live(&stored, now)) {
            (Some(at), true) => cookies[at] = stored,
            (Some(at), false) => {
                cookies.remove(at);
            }
            (None, true) => cookies.push(stored),
            (None, false) => {}
        }
        Ok(())
    }
}
