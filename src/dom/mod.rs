//! Host document abstraction.
//!
//! Controllers never touch a concrete DOM. They talk to a [`Host`], which
//! the browser build implements on top of `web-sys` and tests implement
//! with an in-memory tree ([`MemoryDom`]).
//!
//! The host also owns scheduling. A controller that needs to run later
//! hands the host a [`Task`] (via [`Host::request_frame`] or
//! [`Host::set_timeout`]); the host calls back into
//! [`Page::run`](crate::page::Page::run) when it is due. User input and
//! viewport notifications arrive the same way as [`Event`]s passed to
//! [`Page::handle`](crate::page::Page::handle). Everything is
//! single-threaded and cooperative.

pub mod memory;
mod selector;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use memory::{El, MemoryDom};

use crate::config::ObserverConfig;

/// Opaque handle to an element owned by a [`Host`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenTarget {
    Node(NodeId),
    Document,
    Window,
}

/// Kinds of input the controllers listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Keydown,
    /// Registered passive.
    Scroll,
    Resize,
}

/// Input delivered to [`Page::handle`](crate::page::Page::handle).
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A click reached `listener`. `target` is the element actually
    /// clicked (the listener itself or a descendant), or `None` when it is
    /// a descendant the host never handed out.
    Click {
        listener: NodeId,
        target: Option<NodeId>,
    },
    Keydown { key: String },
    Scroll { y: f64 },
    Resize { width: f64 },
    /// An observed element crossed the visibility threshold.
    Intersect(NodeId),
}

/// Deferred work scheduled through the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Render the next frame of the counter on this element.
    CounterFrame(NodeId),
    /// Add a presentation class.
    AddClass(NodeId, &'static str),
}

/// The document and window the controllers run in.
///
/// Mutations are infallible by contract: a host that fails to apply one
/// logs it and carries on. Queries on a detached node return the empty
/// answer.
pub trait Host {
    /// First element matching `selector`.
    fn query(&self, selector: &str) -> Option<NodeId>;
    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<NodeId>;
    /// Descendants of `root` matching `selector`, in document order.
    fn query_within(&self, root: NodeId, selector: &str) -> Vec<NodeId>;
    /// `node` or its nearest ancestor matching `selector`.
    fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId>;
    fn body(&self) -> Option<NodeId>;

    /// Text content, or `None` when the node no longer exists.
    fn text(&self, node: NodeId) -> Option<String>;
    fn set_text(&mut self, node: NodeId, text: &str);
    fn set_inner_html(&mut self, node: NodeId, html: &str);

    fn has_class(&self, node: NodeId, class: &str) -> bool;
    fn add_class(&mut self, node: NodeId, class: &str);
    fn remove_class(&mut self, node: NodeId, class: &str);
    /// Flip `class`; returns whether it is present afterwards.
    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;
    fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);
    /// Set an inline style property; an empty value clears it.
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    fn focus(&mut self, node: NodeId);
    /// Smooth-scroll `node` into view.
    fn scroll_into_view(&mut self, node: NodeId);
    /// Whether `node` is still attached to the document.
    fn is_connected(&self, node: NodeId) -> bool;

    /// Monotonic clock in milliseconds.
    fn now(&self) -> f64;
    fn scroll_y(&self) -> f64;
    fn viewport_width(&self) -> f64;
    fn prefers_reduced_motion(&self) -> bool;

    fn listen(&mut self, target: ListenTarget, kind: EventKind);
    /// Start watching `node` for viewport intersection.
    fn observe(&mut self, node: NodeId, options: &ObserverConfig);
    fn unobserve(&mut self, node: NodeId);

    /// Run `task` on the next display refresh.
    fn request_frame(&mut self, task: Task);
    /// Run `task` after `delay_ms`.
    fn set_timeout(&mut self, delay_ms: u32, task: Task);
}
