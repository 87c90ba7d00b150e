//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.
//!
//! # Output Format
//!
//! ## Parse
//!
//! ```text
//! "12,9 Mio."
//!     Value: 12.9
//!     Suffix: Mio.
//!     Decimals: 1
//! ```
//!
//! ## Simulate
//!
//! ```text
//! "57%" over 2000 ms
//!        0.0 ms  counting  0 %
//!       16.7 ms  counting  4 %
//!     ...
//!     2000.0 ms  counted   57%
//! Counted in 120 frames
//! ```

use crate::config::MotionConfig;
use crate::counter::CounterState;
use crate::sim::CounterRun;
use crate::stat::ParsedStat;
use std::path::Path;

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn state_label(state: CounterState) -> &'static str {
    match state {
        CounterState::Idle => "idle",
        CounterState::Counting => "counting",
        CounterState::Counted => "counted",
        CounterState::Detached => "detached",
    }
}

// ============================================================================
// parse
// ============================================================================

/// Format the result of parsing one stat string.
pub fn format_parse_output(text: &str, parsed: Option<&ParsedStat>) -> Vec<String> {
    let mut lines = vec![format!("{:?}", text)];
    match parsed {
        Some(stat) => {
            lines.push(format!("{}Value: {}", indent(1), stat.value));
            if stat.suffix.is_empty() {
                lines.push(format!("{}Suffix: (none)", indent(1)));
            } else {
                lines.push(format!("{}Suffix: {}", indent(1), stat.suffix));
            }
            lines.push(format!("{}Decimals: {}", indent(1), stat.decimal_places));
        }
        None => lines.push(format!("{}No number found, nothing to animate", indent(1))),
    }
    lines
}

pub fn print_parse_output(text: &str, parsed: Option<&ParsedStat>) {
    for line in format_parse_output(text, parsed) {
        println!("{}", line);
    }
}

// ============================================================================
// simulate
// ============================================================================

/// Format a simulated counter run, one line per frame.
pub fn format_simulation(run: &CounterRun, duration_ms: u32) -> Vec<String> {
    let mut lines = vec![format!("{:?} over {} ms", run.original, duration_ms)];
    for frame in &run.frames {
        lines.push(format!(
            "{}{:>8.1} ms  {:<8}  {}",
            indent(1),
            frame.time_ms,
            state_label(frame.state),
            frame.text
        ));
    }
    let final_state = run.frames.last().map(|f| f.state);
    let summary = match final_state {
        Some(CounterState::Counted) => {
            format!("Counted in {} frames", run.frames.len().saturating_sub(1))
        }
        _ if !run.counted_up && run.visible => {
            "Shown without counting (reduced motion or no number)".to_string()
        }
        _ => "Did not finish".to_string(),
    };
    lines.push(summary);
    lines
}

pub fn print_simulation(run: &CounterRun, duration_ms: u32) {
    for line in format_simulation(run, duration_ms) {
        println!("{}", line);
    }
}

// ============================================================================
// check
// ============================================================================

/// Summarize a validated config.
pub fn format_config_check(path: Option<&Path>, config: &MotionConfig) -> Vec<String> {
    let source = match path {
        Some(p) => p.display().to_string(),
        None => "(stock defaults)".to_string(),
    };
    vec![
        format!("Config {}", source),
        format!(
            "{}Observer: threshold {}, margin {:?}",
            indent(1),
            config.observer.threshold,
            config.observer.root_margin
        ),
        format!("{}Counter: {} ms", indent(1), config.counter.duration_ms),
        format!("{}Stagger: {} ms per item", indent(1), config.stagger.delay_ms),
        format!(
            "{}Nav: sticky after {} px, menu closes at {} px",
            indent(1),
            config.nav.scroll_threshold,
            config.nav.mobile_breakpoint
        ),
        format!(
            "{}Hero: highlight {} ms, indicator {} ms, fades after {} px",
            indent(1),
            config.hero.highlight_delay_ms,
            config.hero.indicator_delay_ms,
            config.hero.indicator_hide_after
        ),
    ]
}

pub fn print_config_check(path: Option<&Path>, config: &MotionConfig) {
    for line in format_config_check(path, config) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::simulate_counter;
    use crate::stat::parse_stat_value;

    #[test]
    fn parse_output_lists_fields() {
        let parsed = parse_stat_value("12,9 Mio.");
        let lines = format_parse_output("12,9 Mio.", parsed.as_ref());
        assert_eq!(
            lines,
            vec![
                "\"12,9 Mio.\"",
                "    Value: 12.9",
                "    Suffix: Mio.",
                "    Decimals: 1",
            ]
        );
    }

    #[test]
    fn parse_output_without_suffix() {
        let parsed = parse_stat_value("1.234");
        let lines = format_parse_output("1.234", parsed.as_ref());
        assert_eq!(lines[2], "    Suffix: (none)");
    }

    #[test]
    fn parse_output_no_match() {
        let lines = format_parse_output("N/A", None);
        assert_eq!(lines[1], "    No number found, nothing to animate");
    }

    #[test]
    fn simulation_output_ends_with_summary() {
        let run = simulate_counter("57%", &MotionConfig::default(), 500.0, false);
        let lines = format_simulation(&run, 2000);
        assert_eq!(lines[0], "\"57%\" over 2000 ms");
        assert_eq!(lines[1], "         0.0 ms  counting  0 %");
        assert!(lines[lines.len() - 2].ends_with("counted   57%"));
        assert_eq!(lines.last().unwrap(), "Counted in 4 frames");
    }

    #[test]
    fn reduced_motion_summary() {
        let run = simulate_counter("57%", &MotionConfig::default(), 500.0, true);
        let lines = format_simulation(&run, 2000);
        assert_eq!(
            lines.last().unwrap(),
            "Shown without counting (reduced motion or no number)"
        );
    }

    #[test]
    fn config_check_names_source() {
        let lines = format_config_check(None, &MotionConfig::default());
        assert_eq!(lines[0], "Config (stock defaults)");
        assert!(lines[2].contains("2000 ms"));
    }
}
