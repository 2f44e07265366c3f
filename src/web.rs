//! Browser implementations of the capability traits (feature `web`).
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything else in the crate talks to the page through traits
//! ([`Dom`], [`Layout`], [`EventSource`], [`Scheduler`], [`CookieStore`],
//! [`Location`], [`AnalyticsCollector`]). This module binds those traits to
//! `web-sys`, `js-sys` and `gloo-timers` so the same helpers run unchanged on
//! a real page.
//!
//! DESIGN
//! ======
//! JS callbacks must outlive the call that registers them, so listener and
//! timer closures are owned by maps keyed by the ids the traits hand out.
//! Removing an id drops the closure, which detaches it from the browser.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::{Interval, Timeout};
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::analytics::{AnalyticsCollector, AnalyticsEvent};
use crate::cookie::CookieStore;
use crate::dom::{Dom, ReadyState};
use crate::error::{Error, Result};
use crate::events::{Event, EventKind, EventSource, Handler, ListenerId, Point};
use crate::geometry::{Layout, Rect, ScrollPosition, Size};
use crate::timer::{Scheduler, TimerId};
use crate::url_params::Location;

/// Route `log` records to the browser console and panics to `console.error`.
///
/// # Errors
///
/// Returns [`Error::Unavailable`] if another logger is already installed.
pub fn init_logging(level: log::Level) -> Result<()> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(level).map_err(|_| Error::Unavailable("console logger"))
}

fn js_error(context: &str, err: &JsValue) -> Error {
    Error::Dom(format!("{context}: {err:?}"))
}

// =============================================================================
// DOCUMENT
// =============================================================================

/// The live `window` and `document`.
#[derive(Clone, Debug)]
pub struct BrowserDocument {
    window: web_sys::Window,
    document: web_sys::Document,
}

impl BrowserDocument {
    /// # Errors
    ///
    /// Returns [`Error::Unavailable`] outside a browsing context.
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or(Error::Unavailable("window"))?;
        let document = window.document().ok_or(Error::Unavailable("document"))?;
        Ok(Self { window, document })
    }

    #[must_use]
    pub fn window(&self) -> &web_sys::Window {
        &self.window
    }

    #[must_use]
    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }

    fn html_document(&self) -> Result<&web_sys::HtmlDocument> {
        self.document
            .dyn_ref::<web_sys::HtmlDocument>()
            .ok_or(Error::Unavailable("html document"))
    }

    /// `window.innerX`, falling back to `documentElement.clientX` when zero.
    fn viewport_extent(&self, inner: Result<f64>, client: impl Fn(&web_sys::Element) -> i32) -> f64 {
        match inner {
            Ok(px) if px > 0.0 => px,
            _ => self
                .document
                .document_element()
                .map_or(0.0, |root| f64::from(client(&root))),
        }
    }
}

impl Dom for BrowserDocument {
    type Element = web_sys::Element;

    fn query_selector(&self, selector: &str, scope: Option<&Self::Element>) -> Result<Option<Self::Element>> {
        let found = match scope {
            Some(scope) => scope.query_selector(selector),
            None => self.document.query_selector(selector),
        };
        found.map_err(|_| Error::invalid_selector(selector, "rejected by the browser"))
    }

    fn query_selector_all(&self, selector: &str, scope: Option<&Self::Element>) -> Result<Vec<Self::Element>> {
        let list = match scope {
            Some(scope) => scope.query_selector_all(selector),
            None => self.document.query_selector_all(selector),
        }
        .map_err(|_| Error::invalid_selector(selector, "rejected by the browser"))?;
        Ok((0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .collect())
    }

    fn ready_state(&self) -> ReadyState {
        ReadyState::parse(&self.document.ready_state())
    }

    fn create_style(&self, content: &str, id: Option<&str>) -> Result<Self::Element> {
        let style = self
            .document
            .create_element("style")
            .map_err(|err| js_error("create style", &err))?;
        style.set_text_content(Some(content));
        if let Some(id) = id {
            style.set_id(id);
        }
        Ok(style)
    }

    fn append_to_head(&self, element: &Self::Element) -> Result<()> {
        let head = self.document.head().ok_or(Error::Unavailable("document head"))?;
        head.append_child(element)
            .map(drop)
            .map_err(|err| js_error("append to head", &err))
    }

    fn detach(&self, element: &Self::Element) -> Result<bool> {
        let attached = element.parent_node().is_some();
        element.remove();
        Ok(attached)
    }
}

impl Layout for BrowserDocument {
    type Element = web_sys::Element;

    fn offset_top(&self, element: &Self::Element) -> f64 {
        element
            .dyn_ref::<web_sys::HtmlElement>()
            .map_or(0.0, |el| f64::from(el.offset_top()))
    }

    fn offset_parent(&self, element: &Self::Element) -> Option<Self::Element> {
        element.dyn_ref::<web_sys::HtmlElement>()?.offset_parent()
    }

    fn bounding_client_rect(&self, element: &Self::Element) -> Rect {
        let rect = element.get_bounding_client_rect();
        Rect::new(rect.top(), rect.left(), rect.bottom(), rect.right())
    }

    fn viewport_size(&self) -> Size {
        let number = |value: std::result::Result<JsValue, JsValue>| {
            value.ok().and_then(|v| v.as_f64()).ok_or(Error::Unavailable("viewport size"))
        };
        Size {
            width: self.viewport_extent(number(self.window.inner_width()), web_sys::Element::client_width),
            height: self.viewport_extent(number(self.window.inner_height()), web_sys::Element::client_height),
        }
    }
}

impl ScrollPosition for BrowserDocument {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or_default()
    }
}

impl CookieStore for BrowserDocument {
    fn read(&self) -> Result<String> {
        self.html_document()?
            .cookie()
            .map_err(|err| js_error("read cookies", &err))
    }

    fn write(&self, cookie: &str) -> Result<()> {
        self.html_document()?
            .set_cookie(cookie)
            .map_err(|err| js_error("write cookie", &err))
    }
}

impl Location for BrowserDocument {
    fn href(&self) -> Result<String> {
        self.window
            .location()
            .href()
            .map_err(|err| js_error("read location", &err))
    }
}

/// `window.location` on its own, for callers that need no document.
#[derive(Clone, Debug)]
pub struct BrowserLocation(web_sys::Location);

impl BrowserLocation {
    /// # Errors
    ///
    /// Returns [`Error::Unavailable`] outside a browsing context.
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or(Error::Unavailable("window"))?;
        Ok(Self(window.location()))
    }
}

impl Location for BrowserLocation {
    fn href(&self) -> Result<String> {
        self.0.href().map_err(|err| js_error("read location", &err))
    }
}

// =============================================================================
// EVENTS
// =============================================================================

type JsListener = Closure<dyn FnMut(web_sys::Event)>;

/// Listener registry bound to one `EventTarget` (window, document, element).
pub struct BrowserEvents {
    target: web_sys::EventTarget,
    next_id: Cell<u64>,
    listeners: RefCell<HashMap<ListenerId, (EventKind, JsListener)>>,
}

impl BrowserEvents {
    #[must_use]
    pub fn new(target: web_sys::EventTarget) -> Rc<Self> {
        Rc::new(Self { target, next_id: Cell::new(0), listeners: RefCell::new(HashMap::new()) })
    }

    #[must_use]
    pub fn for_window(window: &web_sys::Window) -> Rc<Self> {
        Self::new(window.clone().into())
    }

    #[must_use]
    pub fn for_document(document: &web_sys::Document) -> Rc<Self> {
        Self::new(document.clone().into())
    }

    #[must_use]
    pub fn for_element(element: &web_sys::Element) -> Rc<Self> {
        Self::new(element.clone().into())
    }
}

/// First changed touch in page coordinates, for touch events.
fn touch_point(event: &web_sys::Event) -> Option<Point> {
    let touch = event.dyn_ref::<web_sys::TouchEvent>()?.changed_touches().get(0)?;
    Some(Point::new(f64::from(touch.page_x()), f64::from(touch.page_y())))
}

impl EventSource for BrowserEvents {
    fn add_listener(&self, kind: EventKind, mut handler: Handler) -> Result<ListenerId> {

        let closure = Closure::wrap(Box::new(move |raw: web_sys::Event| {
            let event = match (kind, touch_point(&raw)) {
                (EventKind::TouchStart | EventKind::TouchEnd, Some(at)) => Event::touch(kind, at),
                _ => Event::new(kind),
            };
            handler(&event);
        }) as Box<dyn FnMut(web_sys::Event)>);

        self.target
            .add_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref())
            .map_err(|err| js_error(&format!("addEventListener({})", kind.as_str()), &err))?;

        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        log::debug!("listener {} added for {}", id.0, kind.as_str());
        self.listeners.borrow_mut().insert(id, (kind, closure));
        Ok(id)
    }

    fn remove_listener(&self, id: ListenerId) {
        let Some((kind, closure)) = self.listeners.borrow_mut().remove(&id) else {
            return;
        };
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref())
        {
            log::warn!("removeEventListener({}) failed: {err:?}", kind.as_str());
        }
        log::debug!("listener {} removed", id.0);
    }
}

// =============================================================================
// TIMERS
// =============================================================================

enum TimerHandle {
    Timeout(Timeout),
    Interval(Interval),
}

/// `setTimeout` / `setInterval` through `gloo-timers`.
#[derive(Default)]
pub struct BrowserScheduler {
    next_id: Cell<u64>,
    timers: Rc<RefCell<HashMap<TimerId, TimerHandle>>>,
}

impl BrowserScheduler {
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    fn next(&self) -> TimerId {
        let id = TimerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        id
    }
}

fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

impl Scheduler for BrowserScheduler {
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId {
        let id = self.next();
        let timers = Rc::clone(&self.timers);
        let timeout = Timeout::new(millis(delay), move || {
            // Keep the handle alive until the task returns.
            let fired = timers.borrow_mut().remove(&id);
            task();
            drop(fired);
        });
        self.timers.borrow_mut().insert(id, TimerHandle::Timeout(timeout));
        id
    }

    fn set_interval(&self, period: Duration, mut task: Box<dyn FnMut()>) -> TimerId {
        let id = self.next();
        let interval = Interval::new(millis(period).max(1), move || task());
        self.timers.borrow_mut().insert(id, TimerHandle::Interval(interval));
        id
    }

    fn clear(&self, id: TimerId) {
        let removed = self.timers.borrow_mut().remove(&id);
        match removed {
            Some(TimerHandle::Timeout(timeout)) => drop(timeout.cancel()),
            Some(TimerHandle::Interval(interval)) => drop(interval.cancel()),
            None => {}
        }
    }
}

// =============================================================================
// ANALYTICS
// =============================================================================

/// The page's global analytics command function.
pub struct BrowserAnalytics {
    command: Function,
}

impl BrowserAnalytics {
    /// Resolve `window[window.GoogleAnalyticsObject]`, if the snippet loaded.
    #[must_use]
    pub fn detect(window: &web_sys::Window) -> Option<Self> {
        let name = Reflect::get(window, &JsValue::from_str("GoogleAnalyticsObject"))
            .ok()?
            .as_string()?;
        let command = Reflect::get(window, &JsValue::from_str(&name))
            .ok()?
            .dyn_into::<Function>()
            .ok()?;
        Some(Self { command })
    }
}

impl AnalyticsCollector for BrowserAnalytics {
    fn dispatch(&self, command: &str, hit_type: &str, event: &AnalyticsEvent) -> Result<()> {
        let options = Object::new();
        Reflect::set(&options, &JsValue::from_str("nonInteraction"), &JsValue::from_bool(event.non_interaction))
            .map_err(|err| js_error("build analytics options", &err))?;

        let args = Array::new();
        args.push(&JsValue::from_str(command));
        args.push(&JsValue::from_str(hit_type));
        args.push(&JsValue::from_str(&event.category));
        args.push(&JsValue::from_str(&event.action));
        args.push(&JsValue::from_str(&event.label));
        args.push(&options);

        self.command
            .apply(&JsValue::NULL, &args)
            .map(drop)
            .map_err(|err| js_error("analytics collector", &err))
    }
}
