use time::macros::datetime;

use super::*;
use crate::error::ErrorKind;

fn jar() -> (Rc<FixedClock>, MemoryCookieStore) {
    let clock = FixedClock::new(datetime!(2026-01-15 12:00:00 UTC));
    let store = MemoryCookieStore::new(clock.clone());
    (clock, store)
}

/// Store that returns a canned cookie string.
struct Raw(&'static str);

impl CookieStore for Raw {
    fn read(&self) -> Result<String> {
        Ok(self.0.to_owned())
    }

    fn write(&self, _cookie: &str) -> Result<()> {
        Err(Error::Unavailable("cookie jar"))
    }
}

// =============================================================
// get_cookie
// =============================================================

#[test]
fn get_cookie_finds_first_middle_and_last() {
    let store = Raw("a=1; theme=dark; b=2");
    assert_eq!(get_cookie(&store, "a").unwrap().as_deref(), Some("1"));
    assert_eq!(get_cookie(&store, "theme").unwrap().as_deref(), Some("dark"));
    assert_eq!(get_cookie(&store, "b").unwrap().as_deref(), Some("2"));
}

#[test]
fn get_cookie_absent_is_none() {
    assert_eq!(get_cookie(&Raw("a=1"), "missing").unwrap(), None);
    assert_eq!(get_cookie(&Raw(""), "a").unwrap(), None);
}

#[test]
fn get_cookie_does_not_match_name_suffix() {
    assert_eq!(get_cookie(&Raw("xa=1"), "a").unwrap(), None);
}

#[test]
fn get_cookie_duplicated_name_is_none() {
    assert_eq!(get_cookie(&Raw("a=1; a=2"), "a").unwrap(), None);
}

#[test]
fn get_cookie_allows_empty_value() {
    assert_eq!(get_cookie(&Raw("a=; b=2"), "a").unwrap().as_deref(), Some(""));
}

// =============================================================
// set_cookie
// =============================================================

#[test]
fn cookie_string_uses_imf_fixdate() {
    let entry = CookieEntry::new("session", "abc", 3600);
    assert_eq!(
        entry.to_cookie_string(datetime!(2026-01-15 12:00:00 UTC)).unwrap(),
        "session=abc; expires=Thu, 15 Jan 2026 13:00:00 GMT; path=/"
    );
}

#[test]
fn cookie_string_normalizes_offset_to_gmt() {
    let entry = CookieEntry::new("k", "v", 0).with_path("/app");
    assert_eq!(
        entry.to_cookie_string(datetime!(2026-01-15 14:00:00 +02:00)).unwrap(),
        "k=v; expires=Thu, 15 Jan 2026 12:00:00 GMT; path=/app"
    );
}

#[test]
fn out_of_range_expiry_is_input_error() {
    let entry = CookieEntry::new("k", "v", i64::MAX / 2);
    let err = entry.to_cookie_string(datetime!(2026-01-15 12:00:00 UTC)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);
}

#[test]
fn set_then_get_round_trips_through_memory_store() {
    let (clock, store) = jar();
    set_cookie(&store, clock.as_ref(), "theme", "dark", 60, None).unwrap();
    assert_eq!(store.read().unwrap(), "theme=dark");
    assert_eq!(get_cookie(&store, "theme").unwrap().as_deref(), Some("dark"));
}

#[test]
fn set_cookie_propagates_store_failure() {
    let clock = FixedClock::new(datetime!(2026-01-15 12:00:00 UTC));
    let err = set_cookie(&Raw(""), clock.as_ref(), "a", "1", 60, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Environment);
}

// =============================================================
// MemoryCookieStore
// =============================================================

#[test]
fn same_name_and_path_replaces_in_place() {
    let (clock, store) = jar();
    set_cookie(&store, clock.as_ref(), "a", "1", 60, None).unwrap();
    set_cookie(&store, clock.as_ref(), "b", "2", 60, None).unwrap();
    set_cookie(&store, clock.as_ref(), "a", "3", 60, None).unwrap();
    assert_eq!(store.read().unwrap(), "a=3; b=2");
}

#[test]
fn different_path_keeps_both() {
    let (clock, store) = jar();
    set_cookie(&store, clock.as_ref(), "a", "1", 60, None).unwrap();
    set_cookie(&store, clock.as_ref(), "a", "2", 60, Some("/docs")).unwrap();
    assert_eq!(store.read().unwrap(), "a=1; a=2");
    assert_eq!(get_cookie(&store, "a").unwrap(), None);
}

#[test]
fn non_positive_expiry_deletes() {
    let (clock, store) = jar();
    set_cookie(&store, clock.as_ref(), "a", "1", 60, None).unwrap();
    set_cookie(&store, clock.as_ref(), "a", "", 0, None).unwrap();
    assert_eq!(store.read().unwrap(), "");

    set_cookie(&store, clock.as_ref(), "b", "1", -10, None).unwrap();
    assert_eq!(store.read().unwrap(), "");
}

#[test]
fn cookies_disappear_once_expired() {
    let (clock, store) = jar();
    set_cookie(&store, clock.as_ref(), "short", "1", 30, None).unwrap();
    set_cookie(&store, clock.as_ref(), "long", "2", 300, None).unwrap();

    clock.advance(time::Duration::seconds(29));
    assert_eq!(store.read().unwrap(), "short=1; long=2");
    clock.advance(time::Duration::seconds(1));
    assert_eq!(store.read().unwrap(), "long=2");
}

#[test]
fn cookie_without_expires_is_a_session_cookie() {
    let (clock, store) = jar();
    store.write("plain=yes").unwrap();
    clock.advance(time::Duration::days(365));
    assert_eq!(store.read().unwrap(), "plain=yes");
}
