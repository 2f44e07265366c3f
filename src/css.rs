//! Style injection and selector-based element removal.

#[cfg(test)]
#[path = "css_test.rs"]
mod css_test;

use crate::dom::Dom;
use crate::error::Result;

/// Append a `<style>` with `content` to the head.
///
/// With an `id`, any existing `style#<id>` is removed first so repeated calls
/// replace rather than stack.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidSelector`] if `id` does not form a valid
/// selector, or an environment error from the document.
pub fn inject_css<D: Dom>(dom: &D, content: &str, id: Option<&str>) -> Result<D::Element> {
    let style = dom.create_style(content, id)?;
    if let Some(id) = id {
        if remove_element_by_selector(dom, &format!("style#{id}"))? {
            log::debug!("replaced existing style#{id}");
        }
    }
    dom.append_to_head(&style)?;
    Ok(style)
}

/// Detach the first element matching `selector`.
///
/// Returns `Ok(false)` when nothing matches.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidSelector`] for bad selectors.
pub fn remove_element_by_selector<D: Dom>(dom: &D, selector: &str) -> Result<bool> {
    match crate::dom::select_first(dom, selector, None)? {
        Some(element) => dom.detach(&element),
        None => Ok(false),
    }
}
