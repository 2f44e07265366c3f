use super::*;
use crate::error::ErrorKind;
use crate::memory::MemoryDocument;

#[test]
fn ready_state_parses_dom_strings() {
    assert_eq!(ReadyState::parse("loading"), ReadyState::Loading);
    assert_eq!(ReadyState::parse("interactive"), ReadyState::Interactive);
    assert_eq!(ReadyState::parse("complete"), ReadyState::Complete);
    assert_eq!(ReadyState::parse("bogus"), ReadyState::Loading);
}

#[test]
fn interactive_and_complete_count_as_ready() {
    assert!(!ReadyState::Loading.is_ready());
    assert!(ReadyState::Interactive.is_ready());
    assert!(ReadyState::Complete.is_ready());
}

#[test]
fn select_first_returns_none_without_match() {
    let doc = MemoryDocument::new();
    assert_eq!(select_first(&doc, ".missing", None).unwrap(), None);
}

#[test]
fn select_first_and_all_respect_parent_scope() {
    let doc = MemoryDocument::new();
    let nav = doc.append_element(doc.body(), "nav").unwrap();
    let outside = doc.append_element(doc.body(), "a.link").unwrap();
    let inside = doc.append_element(nav, "a.link").unwrap();

    assert_eq!(select_first(&doc, "a.link", None).unwrap(), Some(outside));
    assert_eq!(select_first(&doc, "a.link", Some(&nav)).unwrap(), Some(inside));
    assert_eq!(select_all(&doc, "a.link", None).unwrap(), vec![outside, inside]);
    assert_eq!(select_all(&doc, "a.link", Some(&nav)).unwrap(), vec![inside]);
}

#[test]
fn blank_selector_is_an_input_error() {
    let doc = MemoryDocument::new();
    let err = select_all(&doc, "   ", None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);
}

#[test]
fn unparseable_selector_is_an_input_error() {
    let doc = MemoryDocument::new();
    let err = select_first(&doc, "div >", None).unwrap_err();
    assert!(matches!(err, Error::InvalidSelector { .. }));
}
