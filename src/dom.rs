//! DOM capability and the selection shortcuts built on it.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`Dom`] is the slice of `document` the helpers need: selector queries,
//! ready state, and head-level style management. `memory::MemoryDocument`
//! implements it natively; `web::BrowserDocument` wraps `web_sys::Document`.

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

use crate::error::{Error, Result};

/// `document.readyState`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

impl ReadyState {
    /// Parse the DOM string form; anything unrecognised is treated as still loading.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "interactive" => Self::Interactive,
            "complete" => Self::Complete,
            _ => Self::Loading,
        }
    }

    /// Whether the document has been parsed far enough to script against.
    #[must_use]
    pub fn is_ready(self) -> bool {
        matches!(self, Self::Interactive | Self::Complete)
    }
}

pub trait Dom {
    type Element: Clone;

    /// First match in document order among `scope`'s descendants (or the whole document).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSelector`] when the selector cannot be parsed.
    fn query_selector(&self, selector: &str, scope: Option<&Self::Element>) -> Result<Option<Self::Element>>;

    /// Every match in document order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSelector`] when the selector cannot be parsed.
    fn query_selector_all(&self, selector: &str, scope: Option<&Self::Element>) -> Result<Vec<Self::Element>>;

    fn ready_state(&self) -> ReadyState;

    /// Create a detached `<style>` element.
    ///
    /// # Errors
    ///
    /// Returns an environment error if the backing document refuses.
    fn create_style(&self, content: &str, id: Option<&str>) -> Result<Self::Element>;

    /// # Errors
    ///
    /// Returns an environment error if the document has no head.
    fn append_to_head(&self, element: &Self::Element) -> Result<()>;

    /// Remove `element` from its parent. Returns `false` if it had none.
    ///
    /// # Errors
    ///
    /// Returns an environment error if the backing document refuses.
    fn detach(&self, element: &Self::Element) -> Result<bool>;
}

/// First element matching `selector`, scoped to `parent` when given.
///
/// # Errors
///
/// Returns [`Error::InvalidSelector`] for empty or unparseable selectors.
pub fn select_first<D: Dom>(dom: &D, selector: &str, parent: Option<&D::Element>) -> Result<Option<D::Element>> {
    ensure_selector(selector)?;
    dom.query_selector(selector, parent)
}

/// All elements matching `selector`, in document order.
///
/// # Errors
///
/// Returns [`Error::InvalidSelector`] for empty or unparseable selectors.
pub fn select_all<D: Dom>(dom: &D, selector: &str, parent: Option<&D::Element>) -> Result<Vec<D::Element>> {
    ensure_selector(selector)?;
    dom.query_selector_all(selector, parent)
}

fn ensure_selector(selector: &str) -> Result<()> {
    if selector.trim().is_empty() {
        return Err(Error::invalid_selector(selector, "empty selector"));
    }
    Ok(())
}
