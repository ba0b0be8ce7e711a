//! Core configuration
//!
//! Playback timing and the input limits enforced at the generator boundary.
//! Every section deserializes with defaults, so a partial JSON document is a
//! valid configuration.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration for the core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Default `env_logger` filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Playback controller timing
    pub playback: PlaybackConfig,
    /// Input constraints checked by `StepGenerator::validate`
    pub limits: InputLimits,
}

/// Configuration for playback timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Delay between auto-advances at speed 1.0, in milliseconds
    pub base_delay_ms: u64,
    /// Speed factor a new controller starts with
    pub default_speed: f64,
    /// Lower clamp for `set_speed`
    pub min_speed: f64,
    /// Upper clamp for `set_speed`
    pub max_speed: f64,
}

/// Bounds on generator inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputLimits {
    pub min_array_len: usize,
    pub max_array_len: usize,
    pub min_board_size: usize,
    pub max_board_size: usize,
    pub max_disk_requests: usize,
    pub max_disk_size: u32,
    pub max_knapsack_items: usize,
    pub max_knapsack_capacity: usize,
    pub max_observations: usize,
    pub max_turbo_block: usize,
    pub max_turbo_iterations: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            playback: PlaybackConfig::default(),
            limits: InputLimits::default(),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 1000,
            default_speed: 1.0,
            min_speed: 0.25,
            max_speed: 4.0,
        }
    }
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            min_array_len: 5,
            max_array_len: 20,
            min_board_size: 4,
            max_board_size: 8,
            max_disk_requests: 50,
            max_disk_size: 10_000,
            max_knapsack_items: 10,
            max_knapsack_capacity: 50,
            max_observations: 20,
            max_turbo_block: 64,
            max_turbo_iterations: 20,
        }
    }
}

impl CoreConfig {
    /// Parse a configuration document, filling missing fields with defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: CoreConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.playback.validate()?;
        self.limits.validate()
    }
}

impl PlaybackConfig {
    /// Delay between auto-advances at speed 1.0
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    /// Clamp a requested speed into the configured range.
    ///
    /// Non-finite requests fall back to `default_speed`.
    pub fn clamp_speed(&self, factor: f64) -> f64 {
        if !factor.is_finite() {
            return self.default_speed;
        }
        factor.clamp(self.min_speed, self.max_speed)
    }

    /// Check the delay and speed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_delay_ms == 0 {
            return Err(ConfigError::Invalid("base_delay_ms must be positive".into()));
        }
        if !(self.min_speed.is_finite() && self.min_speed > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "min_speed must be a positive number, got {}",
                self.min_speed
            )));
        }
        if !self.max_speed.is_finite() || self.max_speed < self.min_speed {
            return Err(ConfigError::Invalid(format!(
                "max_speed {} must be at least min_speed {}",
                self.max_speed, self.min_speed
            )));
        }
        if !(self.min_speed..=self.max_speed).contains(&self.default_speed) {
            return Err(ConfigError::Invalid(format!(
                "default_speed {} outside [{}, {}]",
                self.default_speed, self.min_speed, self.max_speed
            )));
        }
        Ok(())
    }
}

impl InputLimits {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_array_len > self.max_array_len {
            return Err(ConfigError::Invalid("min_array_len exceeds max_array_len".into()));
        }
        if self.min_board_size > self.max_board_size {
            return Err(ConfigError::Invalid("min_board_size exceeds max_board_size".into()));
        }
        if self.max_disk_size == 0 {
            return Err(ConfigError::Invalid("max_disk_size must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_uses_defaults() {
        let config = CoreConfig::from_json_str(r#"{ "playback": { "base_delay_ms": 250 } }"#)
            .unwrap();
        assert_eq!(config.playback.base_delay(), Duration::from_millis(250));
        assert_eq!(config.playback.max_speed, 4.0);
        assert_eq!(config.limits, InputLimits::default());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let result = CoreConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_speed_bounds_validated() {
        let json = r#"{ "playback": { "min_speed": 2.0, "max_speed": 1.0 } }"#;
        assert!(matches!(CoreConfig::from_json_str(json), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_clamp_speed() {
        let playback = PlaybackConfig::default();
        assert_eq!(playback.clamp_speed(10.0), 4.0);
        assert_eq!(playback.clamp_speed(0.0), 0.25);
        assert_eq!(playback.clamp_speed(-3.0), 0.25);
        assert_eq!(playback.clamp_speed(f64::NAN), 1.0);
        assert_eq!(playback.clamp_speed(2.0), 2.0);
    }
}
