//! Motion configuration.
//!
//! Handles loading, validating, and merging `motion.toml` files. Stock
//! defaults reproduce the timings the site ships with; a user file only
//! needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [observer]
//! threshold = 0.1                   # Fraction of the element that must be visible
//! root_margin = "0px 0px -50px 0px" # Trigger slightly before fully in view
//!
//! [counter]
//! duration_ms = 2000                # Count-up duration
//!
//! [stagger]
//! delay_ms = 100                    # Step between timeline weeks / process steps
//!
//! [nav]
//! scroll_threshold = 100            # px scrolled before the sticky nav shows
//! mobile_breakpoint = 768           # viewport width that closes the mobile menu
//!
//! [hero]
//! highlight_delay_ms = 500
//! indicator_delay_ms = 1500
//! indicator_hide_after = 100        # px scrolled before the indicator fades
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Timing and trigger settings for every controller on the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    /// Viewport-intersection trigger for reveals, counters and steps.
    pub observer: ObserverConfig,
    pub counter: CounterConfig,
    pub stagger: StaggerConfig,
    pub nav: NavConfig,
    pub hero: HeroConfig,
}

impl MotionConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.observer.threshold) {
            return Err(ConfigError::Validation(
                "observer.threshold must be between 0 and 1".into(),
            ));
        }
        if self.counter.duration_ms == 0 {
            return Err(ConfigError::Validation(
                "counter.duration_ms must be greater than 0".into(),
            ));
        }
        if self.observer.root_margin.split_whitespace().count() > 4 {
            return Err(ConfigError::Validation(
                "observer.root_margin takes at most four lengths".into(),
            ));
        }
        Ok(())
    }
}

/// Options handed to the host's intersection observer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ObserverConfig {
    /// Fraction of the element that must be visible to fire.
    pub threshold: f64,
    /// CSS margin applied to the viewport before intersecting.
    pub root_margin: String,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
        }
    }
}

/// Stat counter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CounterConfig {
    /// Wall-clock duration of one count-up.
    pub duration_ms: u32,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self { duration_ms: 2000 }
    }
}

/// Staggered reveal settings (timeline weeks, process steps).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaggerConfig {
    /// Delay added per item index.
    pub delay_ms: u32,
}

impl Default for StaggerConfig {
    fn default() -> Self {
        Self { delay_ms: 100 }
    }
}

/// Navigation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Scroll offset in px past which the topbar hides and the nav shows.
    pub scroll_threshold: f64,
    /// Viewport width in px at or above which the mobile menu is closed.
    pub mobile_breakpoint: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: 100.0,
            mobile_breakpoint: 768.0,
        }
    }
}

/// Hero section settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeroConfig {
    pub highlight_delay_ms: u32,
    pub indicator_delay_ms: u32,
    /// Scroll offset in px past which the scroll indicator fades out.
    pub indicator_hide_after: f64,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            highlight_delay_ms: 500,
            indicator_delay_ms: 1500,
            indicator_hide_after: 100.0,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(MotionConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Parse TOML text and merge it over the stock defaults.
pub fn parse_config(content: &str) -> Result<MotionConfig, ConfigError> {
    let overlay: toml::Value = toml::from_str(content)?;
    resolve_config(stock_defaults_value(), Some(overlay))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<MotionConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: MotionConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load a config file, falling back to stock defaults when `path` is `None`.
pub fn load_config(path: Option<&Path>) -> Result<MotionConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(MotionConfig::default());
    };
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    log::debug!("loaded motion config from {}", path.display());
    Ok(config)
}

/// Returns a fully-commented stock `motion.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Site Motion Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Viewport trigger (reveals, stat counters, timeline, process steps)
# ---------------------------------------------------------------------------
[observer]
# Fraction of the element (0-1) that must be visible before it triggers.
threshold = 0.1

# Margin applied to the viewport, CSS shorthand. A negative bottom margin
# fires slightly before the element is fully in view.
root_margin = "0px 0px -50px 0px"

# ---------------------------------------------------------------------------
# Stat counters ([data-counter])
# ---------------------------------------------------------------------------
[counter]
# Time in milliseconds to count from zero to the authored value.
duration_ms = 2000

# ---------------------------------------------------------------------------
# Staggered reveals
# ---------------------------------------------------------------------------
[stagger]
# Delay in milliseconds between consecutive timeline weeks / process steps.
delay_ms = 100

# ---------------------------------------------------------------------------
# Navigation
# ---------------------------------------------------------------------------
[nav]
# Pixels scrolled before the topbar hides and the sticky nav appears.
scroll_threshold = 100.0

# Viewport width in pixels at which an open mobile menu closes itself.
mobile_breakpoint = 768.0

# ---------------------------------------------------------------------------
# Hero
# ---------------------------------------------------------------------------
[hero]
# Delay before the title highlight fades in.
highlight_delay_ms = 500

# Delay before the scroll indicator fades in.
indicator_delay_ms = 1500

# Pixels scrolled before the scroll indicator fades out for good.
indicator_hide_after = 100.0
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_has_site_timings() {
        let config = MotionConfig::default();
        assert_eq!(config.observer.threshold, 0.1);
        assert_eq!(config.observer.root_margin, "0px 0px -50px 0px");
        assert_eq!(config.counter.duration_ms, 2000);
        assert_eq!(config.stagger.delay_ms, 100);
        assert_eq!(config.nav.mobile_breakpoint, 768.0);
        assert_eq!(config.hero.indicator_delay_ms, 1500);
    }

    #[test]
    fn stock_toml_matches_defaults() {
        let config = parse_config(stock_config_toml()).unwrap();
        assert_eq!(config, MotionConfig::default());
    }

    #[test]
    fn sparse_override_keeps_other_defaults() {
        let config = parse_config("[counter]\nduration_ms = 1200\n").unwrap();
        assert_eq!(config.counter.duration_ms, 1200);
        assert_eq!(config.stagger.delay_ms, 100);
        assert_eq!(config.observer, ObserverConfig::default());
    }

    #[test]
    fn nested_override_keeps_sibling_keys() {
        let config = parse_config("[observer]\nthreshold = 0.5\n").unwrap();
        assert_eq!(config.observer.threshold, 0.5);
        assert_eq!(config.observer.root_margin, "0px 0px -50px 0px");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse_config("[counter]\nduraton_ms = 10\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn threshold_out_of_range_fails_validation() {
        let err = parse_config("[observer]\nthreshold = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn zero_duration_fails_validation() {
        let err = parse_config("[counter]\nduration_ms = 0\n").unwrap_err();
        assert!(err.to_string().contains("duration_ms"));
    }

    #[test]
    fn merge_toml_overlay_wins_for_scalars() {
        let base: toml::Value = toml::from_str("a = 1\n[t]\nx = 1\ny = 2\n").unwrap();
        let overlay: toml::Value = toml::from_str("a = 2\n[t]\ny = 3\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(2));
        assert_eq!(merged["t"]["x"].as_integer(), Some(1));
        assert_eq!(merged["t"]["y"].as_integer(), Some(3));
    }

    #[test]
    fn load_config_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[stagger]\ndelay_ms = 250").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.stagger.delay_ms, 250);
    }

    #[test]
    fn load_config_without_path_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), MotionConfig::default());
    }

    #[test]
    fn load_config_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
