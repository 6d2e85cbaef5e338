//! Slider configuration error types

use thiserror::Error;

/// Problems found in a slider configuration or its YAML file
///
/// The interaction core never raises these: a bad configuration still
/// produces clamped (or non-finite) values. They surface only from
/// [`SliderConfig::validate`](crate::SliderConfig::validate) and the
/// config file helpers.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `min` is not strictly below `max`
    #[error("Invalid slider bounds: min={min} must be less than max={max}")]
    InvalidBounds { min: f64, max: f64 },

    /// Step is zero, negative or not finite
    #[error("Invalid slider step: {0} (must be a positive finite number)")]
    InvalidStep(f64),

    /// Failed to read the config file
    #[error("Failed to read slider config: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the config file
    #[error("Failed to parse slider config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for slider configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
