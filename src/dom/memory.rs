//! In-memory [`Host`] used by tests and the CLI simulator.
//!
//! `MemoryDom` keeps an arena of elements under `<html><body>`, a virtual
//! millisecond clock, a queue of pending frame callbacks, a timer queue,
//! and registries of listeners and observed elements. Every class change
//! is journaled so tests can assert on the whole history of an element,
//! not only its final state.
//!
//! Nothing here fires on its own. [`Simulator`](crate::sim::Simulator)
//! advances the clock and feeds due work back into the page.

use super::selector::{ElementTree, Selector};
use super::{EventKind, Host, ListenTarget, NodeId, Task};
use crate::config::ObserverConfig;
use std::collections::{BTreeMap, HashSet};

/// Declarative element description for building fixture documents.
///
/// ```
/// use site_motion::dom::{El, MemoryDom};
///
/// let mut dom = MemoryDom::new();
/// let stat = dom.append_to_body(El::new("p").class("stat").attr("data-counter", "").text("57%"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct El {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    text: String,
    children: Vec<El>,
}

impl El {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        for c in class.split_whitespace() {
            self.classes.push(c.to_string());
        }
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn child(mut self, child: El) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    text: String,
    inner_html: Option<String>,
    style: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            text: String::new(),
            inner_html: None,
            style: BTreeMap::new(),
            parent: None,
            children: Vec::new(),
        }
    }
}

/// One entry of the class-change journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassChange {
    pub node: NodeId,
    pub class: String,
    pub added: bool,
}

#[derive(Debug, Clone)]
struct Timer {
    due: f64,
    seq: u64,
    task: Task,
}

/// In-memory document, window and scheduler.
#[derive(Debug, Clone)]
pub struct MemoryDom {
    nodes: Vec<Node>,
    root: NodeId,
    body: NodeId,
    clock: f64,
    scroll_y: f64,
    viewport_width: f64,
    reduced_motion: bool,
    frames: Vec<Task>,
    timers: Vec<Timer>,
    timer_seq: u64,
    observed: BTreeMap<NodeId, ObserverConfig>,
    listeners: HashSet<(ListenTarget, EventKind)>,
    focused: Option<NodeId>,
    scrolled_into_view: Vec<NodeId>,
    journal: Vec<ClassChange>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Empty `<html><body></body></html>` at t=0, 1280px wide, top of page.
    pub fn new() -> Self {
        let mut nodes = vec![Node::new("html"), Node::new("body")];
        nodes[0].children.push(NodeId(1));
        nodes[1].parent = Some(NodeId(0));
        Self {
            nodes,
            root: NodeId(0),
            body: NodeId(1),
            clock: 0.0,
            scroll_y: 0.0,
            viewport_width: 1280.0,
            reduced_motion: false,
            frames: Vec::new(),
            timers: Vec::new(),
            timer_seq: 0,
            observed: BTreeMap::new(),
            listeners: HashSet::new(),
            focused: None,
            scrolled_into_view: Vec::new(),
            journal: Vec::new(),
        }
    }

    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    pub fn with_viewport_width(mut self, width: f64) -> Self {
        self.viewport_width = width;
        self
    }

    // ------------------------------------------------------------------
    // Tree construction
    // ------------------------------------------------------------------

    /// Build `el` (and its children) under `parent`; returns the new node.
    pub fn append(&mut self, parent: NodeId, el: El) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut node = Node::new(&el.tag);
        node.id = el.id;
        node.classes = el.classes;
        node.attrs = el.attrs.into_iter().collect();
        node.text = el.text;
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        for child in el.children {
            self.append(id, child);
        }
        id
    }

    pub fn append_to_body(&mut self, el: El) -> NodeId {
        self.append(self.body, el)
    }

    /// Detach `node` (and its subtree) from the document.
    pub fn remove(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    // ------------------------------------------------------------------
    // Environment
    // ------------------------------------------------------------------

    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y;
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width;
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    pub fn set_clock(&mut self, ms: f64) {
        self.clock = ms;
    }

    // ------------------------------------------------------------------
    // Scheduling
    // ------------------------------------------------------------------

    /// Drain the frame callbacks requested so far. Callbacks requested
    /// while these run land in the next frame.
    pub fn take_frames(&mut self) -> Vec<Task> {
        std::mem::take(&mut self.frames)
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Due time of the earliest pending timer.
    pub fn next_timer_due(&self) -> Option<f64> {
        self.timers
            .iter()
            .map(|t| t.due)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Remove and return the earliest timer due at or before the clock.
    /// Timers due at the same instant fire in scheduling order.
    pub fn pop_due_timer(&mut self) -> Option<Task> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= self.clock)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)))
            .map(|(i, _)| i)?;
        Some(self.timers.remove(idx).task)
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    pub fn is_listening(&self, target: ListenTarget, kind: EventKind) -> bool {
        self.listeners.contains(&(target, kind))
    }

    pub fn is_observed(&self, node: NodeId) -> bool {
        self.observed.contains_key(&node)
    }

    /// Options `node` is observed with, if any.
    pub fn observer_options(&self, node: NodeId) -> Option<&ObserverConfig> {
        self.observed.get(&node)
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn scrolled_into_view(&self) -> &[NodeId] {
        &self.scrolled_into_view
    }

    pub fn inner_html(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].inner_html.as_deref()
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.nodes[node.0].style.get(property).map(String::as_str)
    }

    pub fn class_journal(&self) -> &[ClassChange] {
        &self.journal
    }

    /// Whether `class` was ever present on `node`, at any point.
    pub fn ever_had_class(&self, node: NodeId, class: &str) -> bool {
        self.journal
            .iter()
            .any(|c| c.node == node && c.class == class && c.added)
    }

    /// Nodes from `node` up to the root, `node` first.
    pub fn ancestors_inclusive(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = vec![node];
        let mut current = self.nodes[node.0].parent;
        while let Some(n) = current {
            out.push(n);
            current = self.nodes[n.0].parent;
        }
        out
    }

    fn descendants(&self, root: NodeId, out: &mut Vec<NodeId>) {
        for child in &self.nodes[root.0].children {
            out.push(*child);
            self.descendants(*child, out);
        }
    }

    fn select(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let selector = Selector::parse(selector);
        let mut all = Vec::new();
        self.descendants(root, &mut all);
        all.into_iter().filter(|n| selector.matches(self, *n)).collect()
    }

    fn record(&mut self, node: NodeId, class: &str, added: bool) {
        self.journal.push(ClassChange {
            node,
            class: class.to_string(),
            added,
        });
    }
}

impl ElementTree for MemoryDom {
    type Node = NodeId;

    fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    fn element_id(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].id.as_deref()
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node.0].classes.iter().any(|c| c == class)
    }

    fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.nodes[node.0].attrs.contains_key(name)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }
}

impl Host for MemoryDom {
    fn query(&self, selector: &str) -> Option<NodeId> {
        self.select(self.root, selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.select(self.root, selector)
    }

    fn query_within(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        self.select(root, selector)
    }

    fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId> {
        let selector = Selector::parse(selector);
        self.ancestors_inclusive(node)
            .into_iter()
            .find(|n| selector.matches(self, *n))
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.body)
    }

    fn text(&self, node: NodeId) -> Option<String> {
        let mut out = self.nodes.get(node.0)?.text.clone();
        let mut all = Vec::new();
        self.descendants(node, &mut all);
        for n in all {
            out.push_str(&self.nodes[n.0].text);
        }
        Some(out)
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        let n = &mut self.nodes[node.0];
        n.text = text.to_string();
        n.inner_html = None;
        for child in std::mem::take(&mut n.children) {
            self.nodes[child.0].parent = None;
        }
    }

    fn set_inner_html(&mut self, node: NodeId, html: &str) {
        let n = &mut self.nodes[node.0];
        n.inner_html = Some(html.to_string());
        n.text.clear();
        for child in std::mem::take(&mut n.children) {
            self.nodes[child.0].parent = None;
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        ElementTree::has_class(self, node, class)
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if !ElementTree::has_class(self, node, class) {
            self.nodes[node.0].classes.push(class.to_string());
            self.record(node, class, true);
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        let classes = &mut self.nodes[node.0].classes;
        let before = classes.len();
        classes.retain(|c| c != class);
        if classes.len() != before {
            self.record(node, class, false);
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.nodes[node.0].attrs.get(name).cloned()
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        self.nodes[node.0]
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let style = &mut self.nodes[node.0].style;
        if value.is_empty() {
            style.remove(property);
        } else {
            style.insert(property.to_string(), value.to_string());
        }
    }

    fn focus(&mut self, node: NodeId) {
        self.focused = Some(node);
    }

    fn scroll_into_view(&mut self, node: NodeId) {
        self.scrolled_into_view.push(node);
    }

    fn is_connected(&self, node: NodeId) -> bool {
        self.ancestors_inclusive(node).last() == Some(&self.root)
    }

    fn now(&self) -> f64 {
        self.clock
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn listen(&mut self, target: ListenTarget, kind: EventKind) {
        self.listeners.insert((target, kind));
    }

    fn observe(&mut self, node: NodeId, options: &ObserverConfig) {
        self.observed.insert(node, options.clone());
    }

    fn unobserve(&mut self, node: NodeId) {
        self.observed.remove(&node);
    }

    fn request_frame(&mut self, task: Task) {
        self.frames.push(task);
    }

    fn set_timeout(&mut self, delay_ms: u32, task: Task) {
        self.timer_seq += 1;
        self.timers.push(Timer {
            due: self.clock + f64::from(delay_ms),
            seq: self.timer_seq,
            task,
        });
    }
}
