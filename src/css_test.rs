use super::*;
use crate::dom::select_all;
use crate::error::Error;
use crate::memory::MemoryDocument;

#[test]
fn anonymous_styles_accumulate() {
    let doc = MemoryDocument::new();
    inject_css(&doc, "a {}", None).unwrap();
    inject_css(&doc, "b {}", None).unwrap();
    assert_eq!(select_all(&doc, "head style", None).unwrap().len(), 2);
}

#[test]
fn styles_with_an_id_replace_the_previous_one() {
    let doc = MemoryDocument::new();
    let first = inject_css(&doc, "body { color: red }", Some("theme")).unwrap();
    let second = inject_css(&doc, "body { color: blue }", Some("theme")).unwrap();

    let found = select_all(&doc, "style#theme", None).unwrap();
    assert_eq!(found, vec![second]);
    assert!(!doc.is_connected(first));
    assert_eq!(doc.text(second).as_deref(), Some("body { color: blue }"));
}

#[test]
fn injected_style_lands_in_head() {
    let doc = MemoryDocument::new();
    let style = inject_css(&doc, "p {}", Some("x")).unwrap();
    assert_eq!(doc.parent(style), Some(doc.head()));
}

#[test]
fn id_replacement_leaves_other_ids_alone() {
    let doc = MemoryDocument::new();
    inject_css(&doc, "a {}", Some("one")).unwrap();
    inject_css(&doc, "b {}", Some("two")).unwrap();
    inject_css(&doc, "c {}", Some("one")).unwrap();
    assert_eq!(select_all(&doc, "style", None).unwrap().len(), 2);
}

#[test]
fn remove_element_detaches_first_match_only() {
    let doc = MemoryDocument::new();
    let a = doc.append_element(doc.body(), "div.ad").unwrap();
    let b = doc.append_element(doc.body(), "div.ad").unwrap();

    assert!(remove_element_by_selector(&doc, ".ad").unwrap());
    assert!(!doc.is_connected(a));
    assert!(doc.is_connected(b));
}

#[test]
fn removing_a_missing_element_is_a_no_op() {
    let doc = MemoryDocument::new();
    assert!(!remove_element_by_selector(&doc, "#nowhere").unwrap());
}

#[test]
fn invalid_id_surfaces_as_selector_error() {
    let doc = MemoryDocument::new();
    let err = inject_css(&doc, "p {}", Some("a>b")).unwrap_err();
    assert!(matches!(err, Error::InvalidSelector { .. }));
}
