//! Built-in curve presets.

use crate::error::{EpicycleError, Result};

/// Star outline parameters
#[derive(Debug, Clone)]
pub struct StarShape {
    /// Number of outer tips
    pub arms: usize,

    /// Inner vertex radius as a fraction of the outer radius
    pub inner_ratio: f64,
}

impl Default for StarShape {
    fn default() -> Self {
        Self {
            arms: 5,
            inner_ratio: 0.45,
        }
    }
}

/// Lissajous figure parameters (integer ratios keep the curve closed)
#[derive(Debug, Clone)]
pub struct LissajousShape {
    pub freq_x: u32,
    pub freq_y: u32,

    /// Phase offset of the x component (radians)
    pub phase: f64,
}

impl Default for LissajousShape {
    fn default() -> Self {
        Self {
            freq_x: 3,
            freq_y: 2,
            phase: std::f64::consts::FRAC_PI_2,
        }
    }
}

/// Shape preset selection
#[derive(Debug, Clone)]
pub enum ShapePreset {
    /// Axis-aligned square traced corner to corner
    Square,

    /// Circle sampled at constant angular spacing
    Circle,

    /// Star polygon
    Star(StarShape),

    /// Parametric heart curve
    Heart,

    /// Lissajous figure
    Lissajous(LissajousShape),
}

impl Default for ShapePreset {
    fn default() -> Self {
        Self::Star(StarShape::default())
    }
}

/// Sampling parameters shared by every preset
#[derive(Debug, Clone)]
pub struct ShapeConfig {
    /// Number of samples along the curve (before loop closure)
    pub samples: usize,

    /// Half-extent of the curve in drawing units (pixels in the original frame)
    pub scale: f64,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            samples: 200,
            scale: 250.0,
        }
    }
}

impl ShapeConfig {
    /// Validate configuration (at least one sample, finite positive scale)
    pub fn validate(&self) -> Result<()> {
        if self.samples == 0 {
            return Err(EpicycleError::InvalidConfig(
                "shape needs at least one sample".to_string(),
            ));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(EpicycleError::InvalidConfig(format!(
                "shape scale must be finite and > 0, got {}",
                self.scale
            )));
        }
        Ok(())
    }
}
