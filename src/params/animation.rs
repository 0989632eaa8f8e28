//! Animation clock and reconstruction path parameters.

use crate::error::{EpicycleError, Result};

use super::FrequencyConvention;

/// Epicycle animation parameters
#[derive(Debug, Clone)]
pub struct AnimationConfig {
    /// Multiplier applied to the logical step (2π/N) on every tick
    /// Reference value: 5.0
    pub speed_factor: f64,

    /// Maximum retained path positions (None = grow without bound)
    /// Reference behavior: unbounded
    pub path_capacity: Option<usize>,

    /// How harmonic indices map to angular velocity
    pub frequency_convention: FrequencyConvention,

    /// Driver tick interval (milliseconds)
    /// 33 ms ≈ 30 ticks per second; the core never reads wall-clock time
    pub tick_interval_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            speed_factor: 5.0,
            path_capacity: None,
            frequency_convention: FrequencyConvention::Unsigned,
            tick_interval_ms: 33,
        }
    }
}

impl AnimationConfig {
    /// Validate configuration (finite positive speed, non-zero capacity)
    pub fn validate(&self) -> Result<()> {
        if !self.speed_factor.is_finite() || self.speed_factor <= 0.0 {
            return Err(EpicycleError::InvalidConfig(format!(
                "speed factor must be finite and > 0, got {}",
                self.speed_factor
            )));
        }
        if self.path_capacity == Some(0) {
            return Err(EpicycleError::InvalidConfig(
                "path capacity must be > 0 (omit it for an unbounded path)".to_string(),
            ));
        }
        Ok(())
    }
}
