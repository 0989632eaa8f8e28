//! Curve sources standing in for a pointer-driven capture.
//!
//! Coordinates follow the centered pointer frame: origin at the middle of the
//! canvas, y growing downward. Curves are returned open; the session closes
//! them.

use std::f64::consts::TAU;
use std::path::Path;

use glam::DVec2;

use crate::error::{EpicycleError, Result};
use crate::params::{LissajousShape, ShapeConfig, ShapePreset, StarShape};
use crate::spectrum::Point2D;

/// Sample `preset` at `config.samples` points
pub fn generate(preset: &ShapePreset, config: &ShapeConfig) -> Result<Vec<Point2D>> {
    config.validate()?;

    let points = match preset {
        ShapePreset::Square => square(config),
        ShapePreset::Circle => circle(config),
        ShapePreset::Star(params) => star(params, config)?,
        ShapePreset::Heart => heart(config),
        ShapePreset::Lissajous(params) => lissajous(params, config),
    };
    Ok(points)
}

fn square(config: &ShapeConfig) -> Vec<Point2D> {
    let s = config.scale;
    let corners = [
        DVec2::new(-s, -s),
        DVec2::new(s, -s),
        DVec2::new(s, s),
        DVec2::new(-s, s),
    ];
    sample_polygon(&corners, config.samples)
}

fn circle(config: &ShapeConfig) -> Vec<Point2D> {
    (0..config.samples)
        .map(|i| {
            let t = TAU * i as f64 / config.samples as f64;
            DVec2::new(t.cos(), t.sin()) * config.scale
        })
        .collect()
}

fn star(params: &StarShape, config: &ShapeConfig) -> Result<Vec<Point2D>> {
    if params.arms < 2 {
        return Err(EpicycleError::InvalidConfig(format!(
            "star needs at least 2 arms, got {}",
            params.arms
        )));
    }

    // Alternate outer tip / inner notch, first tip pointing up
    let vertex_count = 2 * params.arms;
    let vertices: Vec<Point2D> = (0..vertex_count)
        .map(|i| {
            let angle = TAU * i as f64 / vertex_count as f64 - TAU / 4.0;
            let radius = if i % 2 == 0 {
                config.scale
            } else {
                config.scale * params.inner_ratio
            };
            DVec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect();

    Ok(sample_polygon(&vertices, config.samples))
}

fn heart(config: &ShapeConfig) -> Vec<Point2D> {
    // Classic heart curve spans roughly ±17 units; y negated for a downward axis
    let unit = config.scale / 17.0;
    (0..config.samples)
        .map(|i| {
            let t = TAU * i as f64 / config.samples as f64;
            let x = 16.0 * t.sin().powi(3);
            let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
            DVec2::new(x, -y) * unit
        })
        .collect()
}

fn lissajous(params: &LissajousShape, config: &ShapeConfig) -> Vec<Point2D> {
    (0..config.samples)
        .map(|i| {
            let t = TAU * i as f64 / config.samples as f64;
            DVec2::new(
                (params.freq_x as f64 * t + params.phase).sin(),
                (params.freq_y as f64 * t).sin(),
            ) * config.scale
        })
        .collect()
}

/// Walk a closed polygon at equal arc-length spacing
fn sample_polygon(vertices: &[Point2D], samples: usize) -> Vec<Point2D> {
    let edges: Vec<(Point2D, Point2D)> = vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(&a, &b)| (a, b))
        .collect();
    let perimeter: f64 = edges.iter().map(|(a, b)| a.distance(*b)).sum();

    (0..samples)
        .map(|i| {
            let mut remaining = perimeter * i as f64 / samples as f64;
            for &(a, b) in &edges {
                let length = a.distance(b);
                if remaining < length {
                    return a.lerp(b, remaining / length);
                }
                remaining -= length;
            }
            vertices[0]
        })
        .collect()
}

/// Read a JSON array of `[x, y]` pairs
pub fn load_points(path: impl AsRef<Path>) -> Result<Vec<Point2D>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| {
        EpicycleError::InvalidInput(format!("cannot read {}: {}", path.display(), e))
    })?;
    let pairs: Vec<[f64; 2]> = serde_json::from_str(&text).map_err(|e| {
        EpicycleError::InvalidInput(format!("{} is not a list of [x, y] pairs: {}", path.display(), e))
    })?;
    Ok(pairs.into_iter().map(DVec2::from_array).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_preset_yields_requested_samples() {
        let config = ShapeConfig {
            samples: 64,
            scale: 100.0,
        };
        let presets = [
            ShapePreset::Square,
            ShapePreset::Circle,
            ShapePreset::Star(StarShape::default()),
            ShapePreset::Heart,
            ShapePreset::Lissajous(LissajousShape::default()),
        ];

        for preset in &presets {
            let points = generate(preset, &config).unwrap();
            assert_eq!(points.len(), 64, "{:?}", preset);
            assert!(points.iter().all(|p| p.is_finite()));
            assert!(points.iter().all(|p| p.x.abs() <= 100.0 + 1e-9));
        }
    }

    #[test]
    fn test_square_samples_lie_on_perimeter() {
        let config = ShapeConfig {
            samples: 8,
            scale: 10.0,
        };
        let points = generate(&ShapePreset::Square, &config).unwrap();

        // Perimeter 80 split into 8 steps of 10: corners and edge midpoints
        assert_eq!(points[0], DVec2::new(-10.0, -10.0));
        assert!((points[1] - DVec2::new(0.0, -10.0)).length() < 1e-9);
        assert!((points[2] - DVec2::new(10.0, -10.0)).length() < 1e-9);
        for p in &points {
            assert!((p.x.abs() - 10.0).abs() < 1e-9 || (p.y.abs() - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_circle_has_constant_radius() {
        let config = ShapeConfig::default();
        let points = generate(&ShapePreset::Circle, &config).unwrap();
        assert!(points
            .iter()
            .all(|p| (p.length() - config.scale).abs() < 1e-9));
    }

    #[test]
    fn test_star_rejects_single_arm() {
        let preset = ShapePreset::Star(StarShape {
            arms: 1,
            inner_ratio: 0.5,
        });
        assert!(generate(&preset, &ShapeConfig::default()).is_err());
    }

    #[test]
    fn test_zero_samples_rejected() {
        let config = ShapeConfig {
            samples: 0,
            scale: 1.0,
        };
        assert!(matches!(
            generate(&ShapePreset::Circle, &config),
            Err(EpicycleError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_load_points_reads_pairs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stroke.json");
        std::fs::write(&path, "[[0, 0], [10.5, -2], [3, 4]]").unwrap();

        let points = load_points(&path).unwrap();
        assert_eq!(
            points,
            vec![
                DVec2::new(0.0, 0.0),
                DVec2::new(10.5, -2.0),
                DVec2::new(3.0, 4.0)
            ]
        );

        std::fs::write(&path, "{\"x\": 1}").unwrap();
        assert!(load_points(&path).is_err());
    }
}
