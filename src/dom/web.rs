//! Browser [`Host`] on top of `web-sys`.
//!
//! Elements handed to the controllers are registered once and referred to
//! by [`NodeId`] from then on. Each registered element carries its index
//! in an expando property, so mapping an element back to its id is a
//! single property read. Only lookups register; clicks and intersection
//! entries resolve against elements already registered.
//!
//! Callbacks (listeners, observers, frames, timers) only hold a weak
//! handle to the running app and borrow it when they fire; a callback that
//! finds the app already borrowed is dropped with a debug log.

use super::{Event, EventKind, Host, ListenTarget, NodeId, Task};
use crate::config::{MotionConfig, ObserverConfig};
use crate::page::Page;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, ScrollBehavior,
    ScrollIntoViewOptions, Window,
};

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
/// Expando property holding an element's registry index.
const NODE_ID_KEY: &str = "__siteMotionNodeId";

struct App {
    host: WebHost,
    page: Page,
}

type AppHandle = Weak<RefCell<App>>;

thread_local! {
    static RUNNING: RefCell<Option<Rc<RefCell<App>>>> = const { RefCell::new(None) };
}

fn with_app(app: &AppHandle, f: impl FnOnce(&mut WebHost, &mut Page)) {
    let Some(app) = app.upgrade() else {
        return;
    };
    let Ok(mut guard) = app.try_borrow_mut() else {
        log::debug!("callback skipped, page busy");
        return;
    };
    let App { host, page } = &mut *guard;
    f(host, page);
}

fn warn_on_err<T>(what: &str, result: Result<T, JsValue>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("{what} failed: {err:?}");
            None
        }
    }
}

/// `web-sys` backed document, window and scheduler.
pub struct WebHost {
    window: Window,
    document: Document,
    app: AppHandle,
    nodes: RefCell<Vec<Element>>,
    listening: HashSet<(ListenTarget, EventKind)>,
    observers: Vec<(ObserverConfig, IntersectionObserver)>,
    observed_by: HashMap<NodeId, usize>,
}

impl WebHost {
    fn new(window: Window, document: Document, app: AppHandle) -> Self {
        Self {
            window,
            document,
            app,
            nodes: RefCell::new(Vec::new()),
            listening: HashSet::new(),
            observers: Vec::new(),
            observed_by: HashMap::new(),
        }
    }

    /// Id of `element` if it was registered before.
    fn lookup(&self, element: &Element) -> Option<NodeId> {
        let index = js_sys::Reflect::get(element, &JsValue::from_str(NODE_ID_KEY))
            .ok()?
            .as_f64()? as usize;
        let nodes = self.nodes.borrow();
        let known: &web_sys::Node = nodes.get(index)?;
        let candidate: &web_sys::Node = element;
        known
            .is_same_node(Some(candidate))
            .then_some(NodeId(index))
    }

    /// Id for `element`, registering it on first sight.
    fn register(&self, element: Element) -> NodeId {
        if let Some(node) = self.lookup(&element) {
            return node;
        }
        let mut nodes = self.nodes.borrow_mut();
        let index = nodes.len();
        warn_on_err(
            "tag element",
            js_sys::Reflect::set(
                &element,
                &JsValue::from_str(NODE_ID_KEY),
                &JsValue::from_f64(index as f64),
            ),
        );
        nodes.push(element);
        NodeId(index)
    }

    fn element(&self, node: NodeId) -> Option<Element> {
        self.nodes.borrow().get(node.0).cloned()
    }

    fn html_element(&self, node: NodeId) -> Option<HtmlElement> {
        self.element(node)?.dyn_into::<HtmlElement>().ok()
    }

    fn collect(&self, list: Result<web_sys::NodeList, JsValue>) -> Vec<NodeId> {
        let Some(list) = warn_on_err("querySelectorAll", list) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|n| n.dyn_into::<Element>().ok())
            .map(|el| self.register(el))
            .collect()
    }

    fn event_target(&self, target: ListenTarget) -> Option<EventTarget> {
        match target {
            ListenTarget::Node(node) => self.element(node).map(Into::into),
            ListenTarget::Document => Some(self.document.clone().into()),
            ListenTarget::Window => Some(self.window.clone().into()),
        }
    }

    fn observer_for(&mut self, options: &ObserverConfig) -> Option<usize> {
        if let Some(index) = self.observers.iter().position(|(o, _)| o == options) {
            return Some(index);
        }
        let app = self.app.clone();
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                with_app(&app, |host, page| {
                    for entry in entries.iter() {
                        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                            continue;
                        };
                        if !entry.is_intersecting() {
                            continue;
                        }
                        if let Some(node) = host.lookup(&entry.target()) {
                            page.handle(host, &Event::Intersect(node));
                        }
                    }
                });
            },
        );
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);
        let observer = warn_on_err(
            "IntersectionObserver",
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init),
        )?;
        callback.forget();
        self.observers.push((options.clone(), observer));
        Some(self.observers.len() - 1)
    }
}

impl Host for WebHost {
    fn query(&self, selector: &str) -> Option<NodeId> {
        warn_on_err("querySelector", self.document.query_selector(selector))
            .flatten()
            .map(|el| self.register(el))
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.collect(self.document.query_selector_all(selector))
    }

    fn query_within(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        match self.element(root) {
            Some(root) => self.collect(root.query_selector_all(selector)),
            None => Vec::new(),
        }
    }

    fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId> {
        let element = self.element(node)?;
        warn_on_err("closest", element.closest(selector))
            .flatten()
            .map(|el| self.register(el))
    }

    fn body(&self) -> Option<NodeId> {
        let body = self.document.body()?;
        Some(self.register(body.unchecked_into::<Element>()))
    }

    fn text(&self, node: NodeId) -> Option<String> {
        let element = self.element(node)?;
        Some(element.text_content().unwrap_or_default())
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(element) = self.element(node) {
            element.set_text_content(Some(text));
        }
    }

    fn set_inner_html(&mut self, node: NodeId, html: &str) {
        if let Some(element) = self.element(node) {
            element.set_inner_html(html);
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|el| el.class_list().contains(class))
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element(node) {
            warn_on_err("classList.add", element.class_list().add_1(class));
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element(node) {
            warn_on_err("classList.remove", element.class_list().remove_1(class));
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?.get_attribute(name)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element(node) {
            warn_on_err("setAttribute", element.set_attribute(name, value));
        }
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let Some(element) = self.html_element(node) else {
            return;
        };
        let style = element.style();
        if value.is_empty() {
            warn_on_err("style.removeProperty", style.remove_property(property));
        } else {
            warn_on_err("style.setProperty", style.set_property(property, value));
        }
    }

    fn focus(&mut self, node: NodeId) {
        if let Some(element) = self.html_element(node) {
            warn_on_err("focus", element.focus());
        }
    }

    fn scroll_into_view(&mut self, node: NodeId) {
        if let Some(element) = self.element(node) {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            element.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }

    fn is_connected(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|el| el.is_connected())
    }

    fn now(&self) -> f64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or_default()
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or_default()
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or_default()
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.window
            .match_media(REDUCED_MOTION_QUERY)
            .ok()
            .flatten()
            .is_some_and(|mq| mq.matches())
    }

    fn listen(&mut self, target: ListenTarget, kind: EventKind) {
        if !self.listening.insert((target, kind)) {
            return;
        }
        let Some(event_target) = self.event_target(target) else {
            return;
        };
        let app = self.app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            with_app(&app, |host, page| {
                let event = match kind {
                    EventKind::Click => {
                        let ListenTarget::Node(listener) = target else {
                            return;
                        };
                        let clicked = event
                            .target()
                            .and_then(|t| t.dyn_into::<Element>().ok())
                            .and_then(|el| host.lookup(&el));
                        Event::Click {
                            listener,
                            target: clicked,
                        }
                    }
                    EventKind::Keydown => {
                        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                            return;
                        };
                        Event::Keydown { key: key.key() }
                    }
                    EventKind::Scroll => Event::Scroll { y: host.scroll_y() },
                    EventKind::Resize => Event::Resize {
                        width: host.viewport_width(),
                    },
                };
                page.handle(host, &event);
            });
        });
        let name = match kind {
            EventKind::Click => "click",
            EventKind::Keydown => "keydown",
            EventKind::Scroll => "scroll",
            EventKind::Resize => "resize",
        };
        let result = if kind == EventKind::Scroll {
            let options = AddEventListenerOptions::new();
            options.set_passive(true);
            event_target.add_event_listener_with_callback_and_add_event_listener_options(
                name,
                closure.as_ref().unchecked_ref(),
                &options,
            )
        } else {
            event_target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
        };
        warn_on_err("addEventListener", result);
        closure.forget();
    }

    fn observe(&mut self, node: NodeId, options: &ObserverConfig) {
        let Some(element) = self.element(node) else {
            return;
        };
        let Some(index) = self.observer_for(options) else {
            return;
        };
        self.observers[index].1.observe(&element);
        self.observed_by.insert(node, index);
    }

    fn unobserve(&mut self, node: NodeId) {
        let Some(index) = self.observed_by.remove(&node) else {
            return;
        };
        if let Some(element) = self.element(node) {
            self.observers[index].1.unobserve(&element);
        }
    }

    fn request_frame(&mut self, task: Task) {
        let app = self.app.clone();
        let callback = Closure::once_into_js(move |timestamp: f64| {
            with_app(&app, |host, page| page.run(host, task, timestamp));
        });
        warn_on_err(
            "requestAnimationFrame",
            self.window.request_animation_frame(callback.unchecked_ref()),
        );
    }

    fn set_timeout(&mut self, delay_ms: u32, task: Task) {
        let app = self.app.clone();
        let callback = Closure::once_into_js(move || {
            with_app(&app, |host, page| {
                let now = host.now();
                page.run(host, task, now);
            });
        });
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        warn_on_err(
            "setTimeout",
            self.window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    callback.unchecked_ref(),
                    delay,
                ),
        );
    }
}

/// `log` sink writing to the browser console.
struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&line),
            log::Level::Warn => web_sys::console::warn_1(&line),
            log::Level::Info => web_sys::console::info_1(&line),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

fn boot(window: Window, document: Document) {
    let config = MotionConfig::default();
    let app = Rc::new_cyclic(|weak: &AppHandle| {
        let mut host = WebHost::new(window, document, weak.clone());
        let page = Page::init(&mut host, &config);
        RefCell::new(App { host, page })
    });
    RUNNING.with(|running| *running.borrow_mut() = Some(app));
    log::info!("site motion ready");
}

/// Wire the page once the document is parsed.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    if document.ready_state() == "loading" {
        let target = document.clone();
        let callback = Closure::once_into_js(move || boot(window, document));
        warn_on_err(
            "addEventListener",
            target.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref()),
        );
    } else {
        boot(window, document);
    }
}
