//! Slider configuration and YAML persistence
//!
//! [`SliderConfig`] holds the immutable per-render inputs of a slider.
//! It serializes to YAML so hosts can keep slider definitions next to their
//! other settings:
//!
//! ```yaml
//! min: 0.0
//! max: 1.0
//! step: 0.05
//! orientation: vertical
//! ```
//!
//! Missing fields take the defaults of [`SliderConfig::default`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};
use crate::value::SliderValue;

/// Axis along which the handles travel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Left to right, zero at the left edge
    #[default]
    Horizontal,
    /// Bottom to top, zero at the bottom edge
    Vertical,
}

/// Immutable slider inputs, re-supplied on every render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    /// Lower bound of the value domain
    pub min: f64,
    /// Upper bound of the value domain
    pub max: f64,
    /// Quantization unit (None = integer floor)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    /// Track axis
    pub orientation: Orientation,
    /// Two handles (`[low, high]`) instead of one
    pub range: bool,
    /// Suppress all interaction
    pub disabled: bool,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: None,
            orientation: Orientation::Horizontal,
            range: false,
            disabled: false,
        }
    }
}

impl SliderConfig {
    /// Create a single-value horizontal slider over `[min, max]`
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            ..Self::default()
        }
    }

    /// Set the quantization step
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    /// Set the track orientation
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Switch to two-handle range mode
    pub fn with_range(mut self, range: bool) -> Self {
        self.range = range;
        self
    }

    /// Set the disabled flag
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Step applied by one keyboard increment (defaults to 1)
    pub fn key_step(&self) -> f64 {
        self.step.unwrap_or(1.0)
    }

    /// Check the configuration for values that would make the mapping
    /// meaningless.
    ///
    /// The interaction core does not call this; a slider with an invalid
    /// configuration keeps running and produces clamped or non-finite values.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.min.is_nan() || self.max.is_nan() || self.min >= self.max {
            return Err(ConfigError::InvalidBounds {
                min: self.min,
                max: self.max,
            });
        }
        if let Some(step) = self.step {
            if !step.is_finite() || step <= 0.0 {
                return Err(ConfigError::InvalidStep(step));
            }
        }
        Ok(())
    }
}

/// Everything a slider receives from its owner for one render
///
/// The value is owned by the caller. The slider only proposes new values
/// through notifications; the caller applies them and feeds them back here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SliderProps {
    pub config: SliderConfig,
    pub value: Option<SliderValue>,
}

impl SliderProps {
    pub fn new(config: SliderConfig, value: SliderValue) -> Self {
        Self {
            config,
            value: Some(value),
        }
    }

    /// The value to compute from, with mode defaults applied
    ///
    /// Single mode falls back to `0`, range mode to `[0, 100]`. A value whose
    /// shape does not match the mode falls back the same way.
    pub fn resolved_value(&self) -> SliderValue {
        match (self.config.range, self.value) {
            (true, Some(value @ SliderValue::Range(_))) => value,
            (true, _) => SliderValue::Range([0.0, 100.0]),
            (false, Some(value @ SliderValue::Single(_))) => value,
            (false, _) => SliderValue::Single(0.0),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Config file I/O
// ─────────────────────────────────────────────────────────────────────────────

/// Read and parse a slider config, failing on any I/O or YAML error
pub fn read_config(path: &Path) -> ConfigResult<SliderConfig> {
    let contents = std::fs::read_to_string(path)?;
    let config = serde_yaml::from_str::<SliderConfig>(&contents)?;
    Ok(config)
}

/// Load a slider config from a YAML file
///
/// If the file doesn't exist or can't be parsed, returns the default config.
/// A config that parses but fails [`SliderConfig::validate`] is returned
/// as-is with a warning, since the core degrades gracefully on bad bounds.
pub fn load_config(path: &Path) -> SliderConfig {
    log::info!("load_config: Loading from {:?}", path);

    if !path.exists() {
        log::info!("load_config: Config file doesn't exist, using defaults");
        return SliderConfig::default();
    }

    match read_config(path) {
        Ok(config) => {
            if let Err(e) = config.validate() {
                log::warn!("load_config: {}", e);
            }
            log::info!("load_config: Successfully loaded config from {:?}", path);
            config
        }
        Err(e) => {
            log::warn!("load_config: {}, using defaults", e);
            SliderConfig::default()
        }
    }
}

/// Save a slider config to a YAML file
///
/// Creates parent directories if they don't exist.
pub fn save_config(config: &SliderConfig, path: &Path) -> Result<()> {
    log::info!("save_config: Saving to {:?}", path);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    let yaml = serde_yaml::to_string(config).context("Failed to serialize slider config to YAML")?;

    std::fs::write(path, yaml)
        .with_context(|| format!("Failed to write slider config: {:?}", path))?;

    log::info!("save_config: Config saved successfully");
    Ok(())
}
