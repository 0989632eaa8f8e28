//! Export configuration for the headless rendering collaborators.

use crate::error::{EpicycleError, Result};

/// Raster and audio export parameters
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Image width (pixels)
    pub width: u32,

    /// Image height (pixels)
    pub height: u32,

    /// Empty border kept around the fitted drawing (pixels)
    pub margin_px: u32,

    /// Sample rate of the XY oscilloscope WAV (Hz)
    pub sample_rate_hz: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            margin_px: 40,
            sample_rate_hz: 44100,
        }
    }
}

impl ExportConfig {
    /// Validate configuration (drawable area left after margins, non-zero rate)
    pub fn validate(&self) -> Result<()> {
        if self.width / 2 <= self.margin_px || self.height / 2 <= self.margin_px {
            return Err(EpicycleError::InvalidConfig(format!(
                "image {}x{} leaves no room inside a {}px margin",
                self.width, self.height, self.margin_px
            )));
        }
        if self.sample_rate_hz == 0 {
            return Err(EpicycleError::InvalidConfig(
                "sample rate must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
