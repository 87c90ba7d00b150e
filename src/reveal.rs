//! Scroll-triggered reveals.
//!
//! Every element matching [`REVEAL_SELECTOR`] is observed once. The first
//! time it intersects the viewport it gets [`VISIBLE_CLASS`] and is
//! unobserved, so later intersections never reach it again. Counters and
//! timelines piggyback on the same trigger (see [`Page`](crate::page::Page)).
//!
//! With reduced motion requested nothing is observed: targets are made
//! visible immediately, timelines are filled, and counters keep their
//! authored text.

use crate::config::ObserverConfig;
use crate::dom::{Host, NodeId};
use crate::stagger;
use std::collections::BTreeSet;

/// Elements that reveal on scroll.
pub const REVEAL_SELECTOR: &str =
    ".reveal, .reveal-left, .reveal-right, .reveal-scale, [data-counter], .timeline-weeks";
pub const VISIBLE_CLASS: &str = "is-visible";

#[derive(Debug, Clone, Default)]
pub struct Reveal {
    watching: BTreeSet<NodeId>,
}

impl Reveal {
    pub fn init<H: Host>(host: &mut H, options: &ObserverConfig) -> Self {
        let targets = host.query_all(REVEAL_SELECTOR);
        if host.prefers_reduced_motion() {
            log::debug!("reduced motion: revealing {} elements", targets.len());
            for node in targets {
                host.add_class(node, VISIBLE_CLASS);
                if host.has_class(node, stagger::TIMELINE_CLASS) {
                    stagger::fill_timeline(host, node);
                }
            }
            return Self::default();
        }
        for node in &targets {
            host.observe(*node, options);
        }
        Self {
            watching: targets.into_iter().collect(),
        }
    }

    pub fn is_watching(&self, node: NodeId) -> bool {
        self.watching.contains(&node)
    }

    /// Handle an intersection. Returns `true` the first time `node` is
    /// revealed and `false` for anything else.
    pub fn on_intersect<H: Host>(&mut self, host: &mut H, node: NodeId) -> bool {
        if !self.watching.remove(&node) {
            return false;
        }
        host.add_class(node, VISIBLE_CLASS);
        host.unobserve(node);
        true
    }
}
