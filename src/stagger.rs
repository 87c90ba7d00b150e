//! Staggered reveals: timeline weeks and process steps.
//!
//! Both light up item by item, `index * delay_ms` apart. A timeline starts
//! when its `.timeline-weeks` container is revealed; each `.process-step`
//! is observed on its own and waits for its index-based delay once it
//! scrolls into view.

use crate::config::{MotionConfig, ObserverConfig};
use crate::dom::{Host, NodeId, Task};
use crate::reveal::VISIBLE_CLASS;
use std::collections::BTreeSet;

pub const TIMELINE_CLASS: &str = "timeline-weeks";
pub const WEEK_SELECTOR: &str = ".timeline-week";
pub const FILLED_CLASS: &str = "is-filled";
pub const STEP_SELECTOR: &str = ".process-step";

/// Delay for the item at `index`.
pub fn stagger_delay(index: usize, delay_ms: u32) -> u32 {
    u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(delay_ms)
}

/// Schedule `is-filled` on every week of `container`, one step apart.
pub fn animate_timeline<H: Host>(host: &mut H, container: NodeId, delay_ms: u32) {
    let weeks = host.query_within(container, WEEK_SELECTOR);
    log::debug!("timeline {container:?}: filling {} weeks", weeks.len());
    for (index, week) in weeks.into_iter().enumerate() {
        host.set_timeout(
            stagger_delay(index, delay_ms),
            Task::AddClass(week, FILLED_CLASS),
        );
    }
}

/// Fill every week of `container` at once.
pub fn fill_timeline<H: Host>(host: &mut H, container: NodeId) {
    for week in host.query_within(container, WEEK_SELECTOR) {
        host.add_class(week, FILLED_CLASS);
    }
}

/// The numbered process steps.
#[derive(Debug, Clone)]
pub struct ProcessSteps {
    steps: Vec<NodeId>,
    watching: BTreeSet<NodeId>,
    delay_ms: u32,
}

impl ProcessSteps {
    /// Observe every step. `None` when the page has no steps.
    pub fn init<H: Host>(host: &mut H, config: &MotionConfig) -> Option<Self> {
        let steps = host.query_all(STEP_SELECTOR);
        if steps.is_empty() {
            return None;
        }
        let mut watching = BTreeSet::new();
        if host.prefers_reduced_motion() {
            for step in &steps {
                host.add_class(*step, VISIBLE_CLASS);
            }
        } else {
            let options: &ObserverConfig = &config.observer;
            for step in &steps {
                host.observe(*step, options);
                watching.insert(*step);
            }
        }
        Some(Self {
            steps,
            watching,
            delay_ms: config.stagger.delay_ms,
        })
    }

    /// Schedule the step's reveal the first time it intersects.
    pub fn on_intersect<H: Host>(&mut self, host: &mut H, node: NodeId) -> bool {
        if !self.watching.remove(&node) {
            return false;
        }
        let index = self.steps.iter().position(|s| *s == node).unwrap_or(0);
        host.set_timeout(
            stagger_delay(index, self.delay_ms),
            Task::AddClass(node, VISIBLE_CLASS),
        );
        host.unobserve(node);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{El, MemoryDom};

    fn timeline(weeks: usize) -> (MemoryDom, NodeId) {
        let mut dom = MemoryDom::new();
        let mut el = El::new("div").class(TIMELINE_CLASS);
        for _ in 0..weeks {
            el = el.child(El::new("span").class("timeline-week"));
        }
        let container = dom.append_to_body(el);
        (dom, container)
    }

    #[test]
    fn delays_grow_with_index() {
        assert_eq!(stagger_delay(0, 100), 0);
        assert_eq!(stagger_delay(3, 100), 300);
        assert_eq!(stagger_delay(usize::MAX, 100), u32::MAX);
    }

    #[test]
    fn timeline_schedules_one_timer_per_week() {
        let (mut dom, container) = timeline(4);
        animate_timeline(&mut dom, container, 100);
        assert_eq!(dom.pending_timers(), 4);
        assert_eq!(dom.next_timer_due(), Some(0.0));
        let first = dom.pop_due_timer().unwrap();
        let weeks = dom.query_all(WEEK_SELECTOR);
        assert_eq!(first, Task::AddClass(weeks[0], FILLED_CLASS));
        assert_eq!(dom.pop_due_timer(), None);
        dom.set_clock(300.0);
        let rest: Vec<_> = std::iter::from_fn(|| dom.pop_due_timer()).collect();
        assert_eq!(rest.len(), 3);
    }

    #[test]
    fn fill_timeline_marks_all_weeks() {
        let (mut dom, container) = timeline(3);
        fill_timeline(&mut dom, container);
        for week in dom.query_all(WEEK_SELECTOR) {
            assert!(dom.has_class(week, FILLED_CLASS));
        }
    }

    fn steps_dom(reduced: bool) -> MemoryDom {
        let mut dom = MemoryDom::new().with_reduced_motion(reduced);
        for _ in 0..3 {
            dom.append_to_body(El::new("li").class("process-step"));
        }
        dom
    }

    #[test]
    fn no_steps_means_no_controller() {
        let mut dom = MemoryDom::new();
        assert!(ProcessSteps::init(&mut dom, &MotionConfig::default()).is_none());
    }

    #[test]
    fn step_waits_for_its_index_delay() {
        let mut dom = steps_dom(false);
        let mut steps = ProcessSteps::init(&mut dom, &MotionConfig::default()).unwrap();
        let third = dom.query_all(STEP_SELECTOR)[2];
        assert!(steps.on_intersect(&mut dom, third));
        assert!(!dom.is_observed(third));
        assert_eq!(dom.next_timer_due(), Some(200.0));
        assert!(!steps.on_intersect(&mut dom, third));
        assert_eq!(dom.pending_timers(), 1);
    }

    #[test]
    fn reduced_motion_shows_steps_immediately() {
        let mut dom = steps_dom(true);
        ProcessSteps::init(&mut dom, &MotionConfig::default()).unwrap();
        for step in dom.query_all(STEP_SELECTOR) {
            assert!(dom.has_class(step, VISIBLE_CLASS));
            assert!(!dom.is_observed(step));
        }
    }
}
