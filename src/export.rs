//! Headless render targets for a session snapshot.
//!
//! - PNG: captured curve, epicycle circles and radii, traced path
//! - WAV: traced path as stereo XY samples for an oscilloscope
//! - JSON: the raw `RenderState`

use std::path::Path;

use image::{Rgb, RgbImage};
use log::info;

use crate::error::{EpicycleError, Result};
use crate::params::ExportConfig;
use crate::session::RenderState;
use crate::spectrum::Point2D;

const BACKGROUND: Rgb<u8> = Rgb([16, 16, 16]);
const CURVE: Rgb<u8> = Rgb([255, 255, 255]);
const CIRCLE: Rgb<u8> = Rgb([112, 112, 112]);
const RADIUS: Rgb<u8> = Rgb([187, 187, 187]);
const PATH: Rgb<u8> = Rgb([255, 0, 0]);

/// Peak WAV level; keeps headroom on both channels
const WAV_PEAK: f32 = 0.5;

/// Maps the centered drawing frame onto image pixels
struct Canvas {
    image: RgbImage,
    scale: f64,
}

impl Canvas {
    fn new(config: &ExportConfig, extent: Point2D) -> Self {
        let half_w = (config.width / 2 - config.margin_px) as f64;
        let half_h = (config.height / 2 - config.margin_px) as f64;

        // Shrink oversized drawings, never enlarge
        let mut scale: f64 = 1.0;
        if extent.x > 0.0 {
            scale = scale.min(half_w / extent.x);
        }
        if extent.y > 0.0 {
            scale = scale.min(half_h / extent.y);
        }

        Self {
            image: RgbImage::from_pixel(config.width, config.height, BACKGROUND),
            scale,
        }
    }

    fn to_pixel(&self, p: Point2D) -> (f64, f64) {
        (
            self.image.width() as f64 / 2.0 + p.x * self.scale,
            self.image.height() as f64 / 2.0 + p.y * self.scale,
        )
    }

    fn plot(&mut self, x: f64, y: f64, color: Rgb<u8>) {
        let (x, y) = (x.round(), y.round());
        if x >= 0.0 && y >= 0.0 && x < self.image.width() as f64 && y < self.image.height() as f64 {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    fn line(&mut self, a: Point2D, b: Point2D, color: Rgb<u8>, thick: bool) {
        let (x0, y0) = self.to_pixel(a);
        let (x1, y1) = self.to_pixel(b);
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;

        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let x = x0 + (x1 - x0) * t;
            let y = y0 + (y1 - y0) * t;
            self.plot(x, y, color);
            if thick {
                self.plot(x + 1.0, y, color);
                self.plot(x, y + 1.0, color);
            }
        }
    }

    fn polyline(&mut self, points: &[Point2D], color: Rgb<u8>, thick: bool) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], color, thick);
        }
    }

    fn circle(&mut self, center: Point2D, radius: f64, color: Rgb<u8>) {
        let (cx, cy) = self.to_pixel(center);
        let r = radius * self.scale;
        let steps = (std::f64::consts::TAU * r).ceil().max(8.0) as usize;

        for i in 0..steps {
            let angle = std::f64::consts::TAU * i as f64 / steps as f64;
            self.plot(cx + r * angle.cos(), cy + r * angle.sin(), color);
        }
    }
}

/// Largest |x| and |y| touched by anything in the frame
fn frame_extent(state: &RenderState) -> Point2D {
    let points = state
        .raw_points
        .iter()
        .chain(state.reconstruction_path.iter())
        .map(|p| p.abs());
    let circles = state
        .epicycle_centers
        .iter()
        .map(|c| c.center.abs() + Point2D::splat(c.radius));

    points
        .chain(circles)
        .fold(Point2D::ZERO, |extent, p| extent.max(p))
}

/// Rasterize one frame the way the interactive view paints it
pub fn write_png(state: &RenderState, config: &ExportConfig, path: impl AsRef<Path>) -> Result<()> {
    config.validate()?;
    let path = path.as_ref();

    let mut canvas = Canvas::new(config, frame_extent(state));

    canvas.polyline(&state.raw_points, CURVE, false);

    let circles = &state.epicycle_centers;
    for (i, circle) in circles.iter().enumerate() {
        let tip = circles
            .get(i + 1)
            .map(|next| next.center)
            .or_else(|| state.reconstruction_path.last().copied())
            .unwrap_or(circle.center);
        canvas.circle(circle.center, circle.radius, CIRCLE);
        canvas.line(circle.center, tip, RADIUS, false);
    }

    canvas.polyline(&state.reconstruction_path, PATH, true);

    canvas.image.save(path)?;
    info!(
        "Wrote {} ({}x{}, {} path points)",
        path.display(),
        config.width,
        config.height,
        state.reconstruction_path.len()
    );
    Ok(())
}

/// Write `path_points` as a stereo float WAV: left = x, right = -y
pub fn write_xy_wav(
    path_points: &[Point2D],
    config: &ExportConfig,
    file: impl AsRef<Path>,
) -> Result<()> {
    config.validate()?;
    if path_points.is_empty() {
        return Err(EpicycleError::InvalidInput(
            "no reconstruction path to write".to_string(),
        ));
    }
    let file = file.as_ref();

    let peak = path_points
        .iter()
        .fold(0.0f64, |peak, p| peak.max(p.x.abs()).max(p.y.abs()));
    let gain = if peak > 0.0 {
        WAV_PEAK as f64 / peak
    } else {
        0.0
    };

    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: config.sample_rate_hz,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(file, spec)?;

    for p in path_points {
        // Screen y grows downward, oscilloscope y grows upward
        let left = (p.x * gain) as f32;
        let right = (-p.y * gain) as f32;
        writer.write_sample(left.clamp(-WAV_PEAK, WAV_PEAK))?;
        writer.write_sample(right.clamp(-WAV_PEAK, WAV_PEAK))?;
    }
    writer.finalize()?;

    info!(
        "Wrote {} ({} frames @ {}Hz)",
        file.display(),
        path_points.len(),
        config.sample_rate_hz
    );
    Ok(())
}

/// Pretty-printed JSON of a frame snapshot
pub fn to_json(state: &RenderState) -> Result<String> {
    Ok(serde_json::to_string_pretty(state)?)
}
