//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};

use crate::error::{EpicycleError, Result};
use crate::params::{
    AnimationConfig, ExportConfig, FrequencyConvention, LissajousShape, ShapeConfig, ShapePreset,
    SpectrumConfig, StarShape, TransformMethod,
};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "epicycles")]
#[command(about = "Redraw a closed curve with rotating Fourier epicycles", long_about = None)]
pub struct Args {
    /// Shape preset: square, circle, star (default), heart, lissajous
    #[arg(long, value_name = "PRESET", default_value = "star")]
    pub shape: String,

    /// JSON file with a list of [x, y] points (overrides --shape)
    #[arg(long, value_name = "FILE")]
    pub points: Option<PathBuf>,

    /// Samples taken along the preset curve
    #[arg(long, default_value_t = 200)]
    pub samples: usize,

    /// Half-extent of the preset curve (drawing units)
    #[arg(long, default_value_t = 250.0)]
    pub scale: f64,

    /// Fundamental turns to animate
    #[arg(long, default_value_t = 1.0)]
    pub periods: f64,

    /// Step multiplier per tick
    #[arg(long, default_value_t = 5.0)]
    pub speed: f64,

    /// Keep only the newest N path positions (unbounded if omitted)
    #[arg(long, value_name = "N")]
    pub path_capacity: Option<usize>,

    /// Transform: direct (default) or fft
    #[arg(long, default_value = "direct")]
    pub method: String,

    /// Rotate upper harmonics backwards (k - N) for smoother motion
    #[arg(long)]
    pub signed: bool,

    /// Write the final frame to a PNG
    #[arg(long, value_name = "FILE")]
    pub png: Option<PathBuf>,

    /// Write the traced path as an XY oscilloscope WAV
    #[arg(long, value_name = "FILE")]
    pub wav: Option<PathBuf>,

    /// Print the final frame as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Image width (pixels)
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Image height (pixels)
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Sleep one tick interval between ticks (~30 ticks per second)
    #[arg(long)]
    pub realtime: bool,

    /// Debug logging unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parse shape preset from command-line arguments
    pub fn parse_shape_preset(&self) -> ShapePreset {
        match self.shape.to_lowercase().as_str() {
            "square" => ShapePreset::Square,
            "circle" => ShapePreset::Circle,
            "star" => ShapePreset::Star(StarShape::default()),
            "heart" => ShapePreset::Heart,
            "lissajous" => ShapePreset::Lissajous(LissajousShape::default()),
            other => {
                warn!("Unknown shape preset '{}', using star", other);
                ShapePreset::default()
            }
        }
    }

    pub fn shape_config(&self) -> ShapeConfig {
        ShapeConfig {
            samples: self.samples,
            scale: self.scale,
        }
    }

    pub fn spectrum_config(&self) -> Result<SpectrumConfig> {
        let method = TransformMethod::parse(&self.method).ok_or_else(|| {
            EpicycleError::InvalidConfig(format!(
                "unknown transform '{}' (expected direct or fft)",
                self.method
            ))
        })?;
        info!("Transform: {:?}", method);

        Ok(SpectrumConfig {
            method,
            ..SpectrumConfig::default()
        })
    }

    pub fn animation_config(&self) -> Result<AnimationConfig> {
        let config = AnimationConfig {
            speed_factor: self.speed,
            path_capacity: self.path_capacity,
            frequency_convention: FrequencyConvention::from_signed_flag(self.signed),
            ..AnimationConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn export_config(&self) -> Result<ExportConfig> {
        let config = ExportConfig {
            width: self.width,
            height: self.height,
            ..ExportConfig::default()
        };
        config.validate()?;
        Ok(config)
    }
}
