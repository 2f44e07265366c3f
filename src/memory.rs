//! In-memory document used natively and in tests.
//!
//! DESIGN
//! ======
//! Nodes live in an arena indexed by [`ElementId`]; detached nodes stay in the
//! arena but are unreachable from the root, so queries skip them. Layout is
//! not computed: offsets, rects, viewport size, and scroll position are set
//! explicitly by the caller. The document owns a [`ManualEventSource`] that
//! receives `DOMContentLoaded` when [`MemoryDocument::finish_loading`] runs.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::dom::{Dom, ReadyState};
use crate::error::{Error, Result};
use crate::events::{Event, EventKind, ManualEventSource};
use crate::geometry::{Layout, Rect, ScrollPosition, Size};
use crate::selector::{Compound, ElementTree, SelectorList};

/// Handle to an element in a [`MemoryDocument`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

const ROOT: ElementId = ElementId(0);
const HEAD: ElementId = ElementId(1);
const BODY: ElementId = ElementId(2);

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    text: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    offset_top: f64,
    offset_parent: Option<ElementId>,
    rect: Rect,
}

#[derive(Debug, Default)]
struct Arena(Vec<NodeData>);

impl Arena {
    fn node(&self, id: ElementId) -> Option<&NodeData> {
        self.0.get(id.0)
    }

    fn node_mut(&mut self, id: ElementId) -> Result<&mut NodeData> {
        self.0
            .get_mut(id.0)
            .ok_or_else(|| Error::Dom(format!("unknown element {}", id.0)))
    }

    fn push(&mut self, data: NodeData) -> ElementId {
        self.0.push(data);
        ElementId(self.0.len() - 1)
    }

    fn unlink(&mut self, child: ElementId) -> Result<bool> {
        let Some(parent) = self.node_mut(child)?.parent.take() else {
            return Ok(false);
        };
        self.node_mut(parent)?.children.retain(|c| *c != child);
        Ok(true)
    }

    fn link(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        let mut cursor = Some(parent);
        while let Some(node) = cursor {
            if node == child {
                return Err(Error::Dom("cannot append an element inside itself".into()));
            }
            cursor = self.node(node).and_then(|n| n.parent);
        }
        self.unlink(child)?;
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Pre-order walk of `from`'s subtree, optionally including `from` itself.
    fn descendants(&self, from: ElementId, include_self: bool) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            if id != from || include_self {
                out.push(id);
            }
            if let Some(node) = self.node(id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }
}

impl ElementTree for Arena {
    type Node = ElementId;

    fn local_name(&self, node: ElementId) -> &str {
        self.node(node).map_or("", |n| n.tag.as_str())
    }

    fn element_id(&self, node: ElementId) -> Option<&str> {
        self.node(node).and_then(|n| n.id.as_deref())
    }

    fn has_class(&self, node: ElementId, class: &str) -> bool {
        self.node(node).is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn parent_element(&self, node: ElementId) -> Option<ElementId> {
        self.node(node).and_then(|n| n.parent)
    }
}

pub struct MemoryDocument {
    arena: RefCell<Arena>,
    ready: Cell<ReadyState>,
    viewport: Cell<Size>,
    scroll_y: Cell<f64>,
    events: Rc<ManualEventSource>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// An empty, fully loaded `<html><head></head><body></body></html>` with a 1024x768 viewport.
    #[must_use]
    pub fn new() -> Self {
        let mut arena = Arena::default();
        let root = arena.push(NodeData { tag: "html".into(), ..NodeData::default() });
        let head = arena.push(NodeData { tag: "head".into(), parent: Some(root), ..NodeData::default() });
        let body = arena.push(NodeData { tag: "body".into(), parent: Some(root), ..NodeData::default() });
        if let Some(html) = arena.0.get_mut(root.0) {
            html.children = vec![head, body];
        }
        Self {
            arena: RefCell::new(arena),
            ready: Cell::new(ReadyState::Complete),
            viewport: Cell::new(Size { width: 1024.0, height: 768.0 }),
            scroll_y: Cell::new(0.0),
            events: ManualEventSource::new(),
        }
    }

    #[must_use]
    pub fn root(&self) -> ElementId {
        ROOT
    }

    #[must_use]
    pub fn head(&self) -> ElementId {
        HEAD
    }

    #[must_use]
    pub fn body(&self) -> ElementId {
        BODY
    }

    /// Event target for document-level events such as `DOMContentLoaded`.
    #[must_use]
    pub fn events(&self) -> Rc<ManualEventSource> {
        Rc::clone(&self.events)
    }

    /// Create an element from a compound like `div#main.card` and append it to `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSelector`] if `shape` is not a tag-led compound,
    /// or [`Error::Dom`] if `parent` is unknown.
    pub fn append_element(&self, parent: ElementId, shape: &str) -> Result<ElementId> {
        let compound = Compound::parse(shape)?;
        let Some(tag) = compound.tag else {
            return Err(Error::invalid_selector(shape, "element needs a tag name"));
        };
        let mut arena = self.arena.borrow_mut();
        let id = arena.push(NodeData {
            tag,
            id: compound.id,
            classes: compound.classes,
            ..NodeData::default()
        });
        arena.link(parent, id)?;
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns [`Error::Dom`] for unknown ids or when `child` is an ancestor of `parent`.
    pub fn append_child(&self, parent: ElementId, child: ElementId) -> Result<()> {
        self.arena.borrow_mut().link(parent, child)
    }

    #[must_use]
    pub fn tag_name(&self, element: ElementId) -> Option<String> {
        self.arena.borrow().node(element).map(|n| n.tag.clone())
    }

    #[must_use]
    pub fn element_id(&self, element: ElementId) -> Option<String> {
        self.arena.borrow().node(element).and_then(|n| n.id.clone())
    }

    #[must_use]
    pub fn text(&self, element: ElementId) -> Option<String> {
        self.arena.borrow().node(element).map(|n| n.text.clone())
    }

    #[must_use]
    pub fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.arena.borrow().parent_element(element)
    }

    #[must_use]
    pub fn children(&self, element: ElementId) -> Vec<ElementId> {
        self.arena
            .borrow()
            .node(element)
            .map_or_else(Vec::new, |n| n.children.clone())
    }

    /// Whether `element` is reachable from the document root.
    #[must_use]
    pub fn is_connected(&self, element: ElementId) -> bool {
        let arena = self.arena.borrow();
        let mut cursor = Some(element);
        while let Some(node) = cursor {
            if node == ROOT {
                return true;
            }
            cursor = arena.parent_element(node);
        }
        false
    }

    /// # Errors
    ///
    /// Returns [`Error::Dom`] for unknown ids.
    pub fn set_offset(&self, element: ElementId, offset_top: f64, offset_parent: Option<ElementId>) -> Result<()> {
        let mut arena = self.arena.borrow_mut();
        let node = arena.node_mut(element)?;
        node.offset_top = offset_top;
        node.offset_parent = offset_parent;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`Error::Dom`] for unknown ids.
    pub fn set_rect(&self, element: ElementId, rect: Rect) -> Result<()> {
        self.arena.borrow_mut().node_mut(element)?.rect = rect;
        Ok(())
    }

    pub fn set_viewport(&self, size: Size) {
        self.viewport.set(size);
    }

    pub fn set_scroll_y(&self, y: f64) {
        self.scroll_y.set(y);
    }

    pub fn set_ready_state(&self, state: ReadyState) {
        self.ready.set(state);
    }

    /// Move to `interactive` and fire `DOMContentLoaded`.
    pub fn finish_loading(&self) {
        self.ready.set(ReadyState::Interactive);
        self.events.dispatch(&Event::new(EventKind::DomContentLoaded));
    }

    fn candidates(&self, scope: Option<&ElementId>) -> Vec<ElementId> {
        let arena = self.arena.borrow();
        match scope {
            Some(scope) => arena.descendants(*scope, false),
            None => arena.descendants(ROOT, true),
        }
    }
}

impl Dom for MemoryDocument {
    type Element = ElementId;

    fn query_selector(&self, selector: &str, scope: Option<&ElementId>) -> Result<Option<ElementId>> {
        let list = SelectorList::parse(selector)?;
        let candidates = self.candidates(scope);
        let arena = self.arena.borrow();
        Ok(candidates.into_iter().find(|id| list.matches(&*arena, *id)))
    }

    fn query_selector_all(&self, selector: &str, scope: Option<&ElementId>) -> Result<Vec<ElementId>> {
        let list = SelectorList::parse(selector)?;
        let candidates = self.candidates(scope);
        let arena = self.arena.borrow();
        Ok(candidates
            .into_iter()
            .filter(|id| list.matches(&*arena, *id))
            .collect())
    }

    fn ready_state(&self) -> ReadyState {
        self.ready.get()
    }

    fn create_style(&self, content: &str, id: Option<&str>) -> Result<ElementId> {
        Ok(self.arena.borrow_mut().push(NodeData {
            tag: "style".into(),
            id: id.map(str::to_owned),
            text: content.to_owned(),
            ..NodeData::default()
        }))
    }

    fn append_to_head(&self, element: &ElementId) -> Result<()> {
        self.arena.borrow_mut().link(HEAD, *element)
    }

    fn detach(&self, element: &ElementId) -> Result<bool> {
        self.arena.borrow_mut().unlink(*element)
    }
}

impl Layout for MemoryDocument {
    type Element = ElementId;

    fn offset_top(&self, element: &ElementId) -> f64 {
        self.arena.borrow().node(*element).map_or(0.0, |n| n.offset_top)
    }

    fn offset_parent(&self, element: &ElementId) -> Option<ElementId> {
        self.arena.borrow().node(*element).and_then(|n| n.offset_parent)
    }

    fn bounding_client_rect(&self, element: &ElementId) -> Rect {
        self.arena.borrow().node(*element).map_or_else(Rect::default, |n| n.rect)
    }

    fn viewport_size(&self) -> Size {
        self.viewport.get()
    }
}

impl ScrollPosition for MemoryDocument {
    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }
}
