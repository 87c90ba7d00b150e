//! Animated stat counters.
//!
//! An element marked `data-counter` holds authored text such as
//! `"12,9 Mio."`. When it first scrolls into view the number counts up from
//! zero with a quartic ease-out, one step per display refresh, and the
//! authored text is put back verbatim when time is up.
//!
//! ```text
//! Idle ──start──▶ Counting ──progress = 1──▶ Counted
//!                    │
//!                    └──element left the document──▶ Detached
//! ```
//!
//! `Counted` and `Detached` are final. There is no cancellation: if the
//! element leaves the document mid-run its pending frame retires the run
//! and requests nothing further.
//!
//! [`CounterAnimation`] is the pure per-run state (text for a given time);
//! [`Counters`] drives one animation per element through a [`Host`].

use crate::dom::{Host, NodeId, Task};
use crate::easing::ease_out_quart;
use crate::locale::format_number;
use crate::stat::{ParsedStat, parse_stat_value};
use serde::Serialize;
use std::collections::HashMap;

/// Marker class present while counting.
pub const COUNTING_CLASS: &str = "is-counting";
/// Marker class present once the authored text is restored.
pub const COUNTED_CLASS: &str = "is-counted";
/// Attribute that opts an element into counting.
pub const COUNTER_ATTR: &str = "data-counter";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterState {
    Idle,
    Counting,
    Counted,
    /// Left the document mid-run; will never finish.
    Detached,
}

/// What an element should show at a given instant.
#[derive(Debug, Clone, PartialEq)]
pub enum CounterFrame {
    /// Still counting; intermediate text.
    Tween { text: String, progress: f64 },
    /// Finished; the authored text.
    Done { text: String },
}

impl CounterFrame {
    pub fn text(&self) -> &str {
        match self {
            CounterFrame::Tween { text, .. } | CounterFrame::Done { text } => text,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, CounterFrame::Done { .. })
    }
}

/// One count-up run for a parsed stat.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    stat: ParsedStat,
    started_at: f64,
    duration_ms: f64,
}

impl CounterAnimation {
    pub fn new(stat: ParsedStat, started_at: f64, duration_ms: u32) -> Self {
        Self {
            stat,
            started_at,
            duration_ms: f64::from(duration_ms.max(1)),
        }
    }

    pub fn stat(&self) -> &ParsedStat {
        &self.stat
    }

    /// Linear progress in `[0, 1]` at `now`.
    pub fn progress(&self, now: f64) -> f64 {
        ((now - self.started_at) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Counted value at `now`, before formatting.
    pub fn value_at(&self, now: f64) -> f64 {
        ease_out_quart(self.progress(now)) * self.stat.value
    }

    /// Text to display at `now`.
    ///
    /// At full progress this is the original string, never a reformatted
    /// value, so rounding in the formatter cannot leak into the end state.
    pub fn frame_at(&self, now: f64) -> CounterFrame {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return CounterFrame::Done {
                text: self.stat.original.clone(),
            };
        }
        let current = ease_out_quart(progress) * self.stat.value;
        CounterFrame::Tween {
            text: format!(
                "{} {}",
                format_number(current, self.stat.decimal_places),
                self.stat.suffix
            ),
            progress,
        }
    }
}

#[derive(Debug, Clone)]
struct Run {
    state: CounterState,
    animation: Option<CounterAnimation>,
}

/// Drives counters on every `[data-counter]` element of a page.
#[derive(Debug, Clone)]
pub struct Counters {
    duration_ms: u32,
    runs: HashMap<NodeId, Run>,
}

impl Counters {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            runs: HashMap::new(),
        }
    }

    pub fn state(&self, node: NodeId) -> CounterState {
        self.runs
            .get(&node)
            .map(|r| r.state)
            .unwrap_or(CounterState::Idle)
    }

    /// Begin counting on `node`.
    ///
    /// Does nothing when the element already ran (or is running), or when
    /// its text has no number in it.
    pub fn start<H: Host>(&mut self, host: &mut H, node: NodeId) {
        if self.state(node) != CounterState::Idle {
            log::debug!("counter {node:?} already {:?}, ignoring", self.state(node));
            return;
        }
        let Some(text) = host.text(node) else {
            return;
        };
        let Some(stat) = parse_stat_value(&text) else {
            log::debug!("counter {node:?}: no number in {text:?}, leaving as is");
            return;
        };
        log::debug!(
            "counter {node:?}: counting to {} ({} decimals)",
            stat.value,
            stat.decimal_places
        );
        let now = host.now();
        let animation = CounterAnimation::new(stat, now, self.duration_ms);
        // Show the starting value right away rather than the final text.
        host.set_text(node, animation.frame_at(now).text());
        host.add_class(node, COUNTING_CLASS);
        self.runs.insert(
            node,
            Run {
                state: CounterState::Counting,
                animation: Some(animation),
            },
        );
        host.request_frame(Task::CounterFrame(node));
    }

    /// Render one frame on `node` at frame time `now`.
    pub fn frame<H: Host>(&mut self, host: &mut H, node: NodeId, now: f64) {
        let Some(run) = self.runs.get_mut(&node) else {
            return;
        };
        if run.state != CounterState::Counting {
            return;
        }
        if !host.is_connected(node) {
            log::debug!("counter {node:?} left the document, dropping run");
            run.state = CounterState::Detached;
            run.animation = None;
            return;
        }
        let Some(animation) = &run.animation else {
            return;
        };
        match animation.frame_at(now) {
            CounterFrame::Tween { text, .. } => {
                host.set_text(node, &text);
                host.request_frame(Task::CounterFrame(node));
            }
            CounterFrame::Done { text } => {
                host.set_text(node, &text);
                host.remove_class(node, COUNTING_CLASS);
                host.add_class(node, COUNTED_CLASS);
                run.state = CounterState::Counted;
                run.animation = None;
                log::debug!("counter {node:?} done");
            }
        }
    }
}
