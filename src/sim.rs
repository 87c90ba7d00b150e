//! Drive a [`Page`] against a [`MemoryDom`] with a virtual clock.
//!
//! The simulator plays the browser's part: it advances time frame by
//! frame, fires due timers, runs frame callbacks with the frame timestamp,
//! and delivers input only to targets that are actually listened to
//! (clicks bubble from the target up through its ancestors).

use crate::config::MotionConfig;
use crate::counter::{COUNTER_ATTR, COUNTING_CLASS, CounterState};
use crate::dom::{El, Event, EventKind, Host, ListenTarget, MemoryDom, NodeId};
use crate::page::Page;
use crate::reveal::VISIBLE_CLASS;
use serde::Serialize;

/// 60 Hz.
pub const DEFAULT_FRAME_MS: f64 = 1000.0 / 60.0;

#[derive(Debug, Clone)]
pub struct Simulator {
    pub dom: MemoryDom,
    pub page: Page,
    frame_ms: f64,
}

impl Simulator {
    /// Wire `config` onto `dom`, as on page load.
    pub fn new(mut dom: MemoryDom, config: &MotionConfig) -> Self {
        let page = Page::init(&mut dom, config);
        Self {
            dom,
            page,
            frame_ms: DEFAULT_FRAME_MS,
        }
    }

    pub fn with_frame_ms(mut self, frame_ms: f64) -> Self {
        self.frame_ms = frame_ms.max(0.001);
        self
    }

    pub fn now(&self) -> f64 {
        self.dom.now()
    }

    /// Advance one frame: fire timers that came due, then run the frame
    /// callbacks requested before this frame started.
    pub fn frame(&mut self) {
        let target = self.dom.now() + self.frame_ms;
        self.fire_timers_until(target);
        self.dom.set_clock(target);
        for task in self.dom.take_frames() {
            self.page.run(&mut self.dom, task, target);
        }
    }

    /// Advance frames until `ms` have passed.
    pub fn run_for(&mut self, ms: f64) {
        let end = self.dom.now() + ms;
        while self.dom.now() < end {
            self.frame();
        }
    }

    /// Advance frames until nothing is scheduled, at most `max_ms`.
    pub fn run_until_idle(&mut self, max_ms: f64) {
        let end = self.dom.now() + max_ms;
        while self.is_busy() && self.dom.now() < end {
            self.frame();
        }
    }

    pub fn is_busy(&self) -> bool {
        self.dom.pending_frames() > 0 || self.dom.pending_timers() > 0
    }

    /// Report that `node` entered the viewport. Ignored (returns `false`)
    /// unless the node is currently observed.
    pub fn intersect(&mut self, node: NodeId) -> bool {
        if !self.dom.is_observed(node) {
            return false;
        }
        self.page.handle(&mut self.dom, &Event::Intersect(node));
        true
    }

    /// Click `target`, bubbling to every listening ancestor.
    pub fn click(&mut self, target: NodeId) {
        for listener in self.dom.ancestors_inclusive(target) {
            if self
                .dom
                .is_listening(ListenTarget::Node(listener), EventKind::Click)
            {
                self.page.handle(
                    &mut self.dom,
                    &Event::Click {
                        listener,
                        target: Some(target),
                    },
                );
            }
        }
    }

    pub fn key(&mut self, key: &str) {
        if self.dom.is_listening(ListenTarget::Document, EventKind::Keydown) {
            self.page.handle(
                &mut self.dom,
                &Event::Keydown {
                    key: key.to_string(),
                },
            );
        }
    }

    pub fn scroll_to(&mut self, y: f64) {
        self.dom.set_scroll_y(y);
        if self.dom.is_listening(ListenTarget::Window, EventKind::Scroll) {
            self.page.handle(&mut self.dom, &Event::Scroll { y });
        }
    }

    pub fn resize(&mut self, width: f64) {
        self.dom.set_viewport_width(width);
        if self.dom.is_listening(ListenTarget::Window, EventKind::Resize) {
            self.page.handle(&mut self.dom, &Event::Resize { width });
        }
    }

    fn fire_timers_until(&mut self, target: f64) {
        while let Some(due) = self.dom.next_timer_due() {
            if due > target {
                break;
            }
            self.dom.set_clock(due.max(self.dom.now()));
            while let Some(task) = self.dom.pop_due_timer() {
                let now = self.dom.now();
                self.page.run(&mut self.dom, task, now);
            }
        }
    }
}

/// Text and state of a counter after one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRecord {
    pub time_ms: f64,
    pub state: CounterState,
    pub text: String,
}

/// Every frame of one simulated counter, from load to rest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterRun {
    pub original: String,
    /// Whether the element ended up with the visible marker.
    pub visible: bool,
    /// Whether the counting marker was ever applied.
    pub counted_up: bool,
    pub frames: Vec<FrameRecord>,
}

/// Put `text` in a lone `[data-counter]` element, scroll it into view at
/// t=0 and record every frame until the page is idle.
pub fn simulate_counter(
    text: &str,
    config: &MotionConfig,
    frame_ms: f64,
    reduced_motion: bool,
) -> CounterRun {
    let mut dom = MemoryDom::new().with_reduced_motion(reduced_motion);
    let node = dom.append_to_body(El::new("p").attr(COUNTER_ATTR, "").text(text));
    let mut sim = Simulator::new(dom, config).with_frame_ms(frame_ms);

    let record = |sim: &Simulator| FrameRecord {
        time_ms: sim.now(),
        state: sim.page.counter_state(node),
        text: sim.dom.text(node).unwrap_or_default(),
    };

    sim.intersect(node);
    let mut frames = vec![record(&sim)];
    let budget = f64::from(config.counter.duration_ms) + 1000.0;
    while sim.is_busy() && sim.now() < budget {
        sim.frame();
        frames.push(record(&sim));
    }

    CounterRun {
        original: text.to_string(),
        visible: sim.dom.has_class(node, VISIBLE_CLASS),
        counted_up: sim.dom.ever_had_class(node, COUNTING_CLASS),
        frames,
    }
}
