//! Element geometry: document offsets and viewport containment.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

/// Bounding rectangle relative to the viewport, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Rect {
    #[must_use]
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self { top, left, bottom, right }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Which edges of an element fall outside the viewport.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewportSideFlags {
    pub top: bool,
    pub left: bool,
    pub bottom: bool,
    pub right: bool,
    pub any: bool,
    pub all: bool,
}

/// Layout queries against rendered elements.
pub trait Layout {
    type Element;

    fn offset_top(&self, element: &Self::Element) -> f64;
    fn offset_parent(&self, element: &Self::Element) -> Option<Self::Element>;
    fn bounding_client_rect(&self, element: &Self::Element) -> Rect;
    /// Inner window size, falling back to the root element's client size.
    fn viewport_size(&self) -> Size;
}

/// Vertical scroll offset of the page.
pub trait ScrollPosition {
    fn scroll_y(&self) -> f64;
}

/// Distance from the top of the document to `element`, never negative.
///
/// Elements without an offset parent (detached, `display: none`, fixed) report 0.
pub fn offset_top_from_document<L: Layout>(layout: &L, element: &L::Element) -> f64 {
    let Some(mut parent) = layout.offset_parent(element) else {
        return 0.0;
    };
    let mut location = layout.offset_top(element);
    loop {
        location += layout.offset_top(&parent);
        match layout.offset_parent(&parent) {
            Some(next) => parent = next,
            None => break,
        }
    }
    location.max(0.0)
}

pub fn is_fully_in_viewport<L: Layout>(layout: &L, element: &L::Element) -> bool {
    let rect = layout.bounding_client_rect(element);
    let view = layout.viewport_size();
    rect.top >= 0.0 && rect.left >= 0.0 && rect.bottom <= view.height && rect.right <= view.width
}

pub fn viewport_overflow_flags<L: Layout>(layout: &L, element: &L::Element) -> ViewportSideFlags {
    let rect = layout.bounding_client_rect(element);
    let view = layout.viewport_size();
    let top = rect.top < 0.0;
    let left = rect.left < 0.0;
    let bottom = rect.bottom > view.height;
    let right = rect.right > view.width;
    ViewportSideFlags {
        top,
        left,
        bottom,
        right,
        any: top || left || bottom || right,
        all: top && left && bottom && right,
    }
}
