//! Spectral decomposition of a closed curve into epicycles.
//!
//! Each point is read as a complex sample `x + iy` and run through the forward
//! DFT `X[k] = (1/N) Σ z[n]·e^(-i2πkn/N)`. Every bin becomes one rotating
//! vector (frequency k, amplitude |X[k]|, phase arg X[k]) and the set is
//! ordered largest amplitude first.

use std::f64::consts::{PI, TAU};

use glam::DVec2;
use log::debug;
use rustfft::{num_complex::Complex, FftPlanner};

use crate::error::{EpicycleError, Result};
use crate::params::{FrequencyConvention, TransformMethod};

/// Curve sample in the centered drawing frame
pub type Point2D = DVec2;

/// One rotating vector produced by a DFT bin
///
/// Amplitude and phase are derived from the bin value at construction and
/// cannot be set independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpicycleCoefficient {
    frequency: usize,
    amplitude: f64,
    phase: f64,
}

impl EpicycleCoefficient {
    /// Build the coefficient for harmonic `frequency` from its bin value
    pub fn from_bin(frequency: usize, value: Complex<f64>) -> Self {
        let (amplitude, phase) = value.to_polar();
        let phase = if amplitude == 0.0 {
            0.0
        } else if phase <= -PI {
            phase + TAU
        } else {
            phase
        };
        Self {
            frequency,
            amplitude,
            phase,
        }
    }

    /// Harmonic index k as produced by the transform (0..N-1)
    pub fn frequency(&self) -> usize {
        self.frequency
    }

    /// Circle radius, |X[k]|
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Starting angle in (-π, π]
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Harmonic index folded into (-N/2, N/2]
    pub fn signed_frequency(&self, len: usize) -> i64 {
        let k = self.frequency as i64;
        if self.frequency > len / 2 {
            k - len as i64
        } else {
            k
        }
    }

    /// Angular velocity (radians per unit time) under `convention`
    pub fn angular_velocity(&self, len: usize, convention: FrequencyConvention) -> f64 {
        match convention {
            FrequencyConvention::Unsigned => self.frequency as f64,
            FrequencyConvention::Signed => self.signed_frequency(len) as f64,
        }
    }

    /// Bin value reassembled from amplitude and phase
    pub fn to_complex(&self) -> Complex<f64> {
        Complex::from_polar(self.amplitude, self.phase)
    }

    /// Tip offset from this epicycle's center at `time`
    pub fn offset_at(&self, time: f64, len: usize, convention: FrequencyConvention) -> Point2D {
        let angle = self.angular_velocity(len, convention) * time + self.phase;
        DVec2::new(self.amplitude * angle.cos(), self.amplitude * angle.sin())
    }
}

/// All coefficients of one capture, largest amplitude first
///
/// Holds exactly one coefficient per harmonic 0..N-1. Equal amplitudes keep
/// ascending frequency order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spectrum {
    coefficients: Vec<EpicycleCoefficient>,
}

impl Spectrum {
    fn from_unordered(mut coefficients: Vec<EpicycleCoefficient>) -> Self {
        // sort_by is stable: ties stay in ascending frequency order
        coefficients.sort_by(|a, b| b.amplitude.total_cmp(&a.amplitude));
        Self { coefficients }
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn coefficients(&self) -> &[EpicycleCoefficient] {
        &self.coefficients
    }

    pub fn iter(&self) -> impl Iterator<Item = &EpicycleCoefficient> {
        self.coefficients.iter()
    }

    /// Tip of the full epicycle chain at `time`, folded in stored order
    pub fn evaluate(&self, time: f64, convention: FrequencyConvention) -> Point2D {
        let len = self.len();
        self.coefficients
            .iter()
            .fold(Point2D::ZERO, |center, coef| {
                center + coef.offset_at(time, len, convention)
            })
    }
}

/// Append a copy of the first point unless the sequence already ends on it
pub fn close_loop(points: &mut Vec<Point2D>) {
    if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
        if first != last {
            points.push(first);
        }
    }
}

/// Decompose `points` with the direct O(N²) transform
pub fn compute_spectrum(points: &[Point2D]) -> Result<Spectrum> {
    compute_spectrum_with(points, TransformMethod::Direct)
}

/// Decompose `points` with the chosen transform
///
/// # Errors
/// `InvalidInput` for an empty sequence or a non-finite coordinate.
pub fn compute_spectrum_with(points: &[Point2D], method: TransformMethod) -> Result<Spectrum> {
    if points.is_empty() {
        return Err(EpicycleError::InvalidInput(
            "cannot compute a spectrum of an empty point sequence".to_string(),
        ));
    }
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(EpicycleError::InvalidInput(format!(
            "point {} is not finite: {}",
            index, points[index]
        )));
    }

    let samples: Vec<Complex<f64>> = points.iter().map(|p| Complex::new(p.x, p.y)).collect();

    let bins = match method {
        TransformMethod::Direct => direct_dft(&samples),
        TransformMethod::Fft => planned_fft(&samples),
    };

    let coefficients = bins
        .into_iter()
        .enumerate()
        .map(|(k, value)| EpicycleCoefficient::from_bin(k, value))
        .collect();
    let spectrum = Spectrum::from_unordered(coefficients);

    debug!(
        "Spectrum: {} coefficients via {:?}, largest amplitude {:.3}",
        spectrum.len(),
        method,
        spectrum.coefficients[0].amplitude
    );

    Ok(spectrum)
}

/// Forward DFT straight from its definition, normalized by 1/N
fn direct_dft(samples: &[Complex<f64>]) -> Vec<Complex<f64>> {
    let n = samples.len();
    let scale = 1.0 / n as f64;

    (0..n)
        .map(|k| {
            let sum: Complex<f64> = samples
                .iter()
                .enumerate()
                .map(|(t, z)| {
                    // k·t mod N keeps the angle inside one turn
                    let angle = TAU * ((k * t) % n) as f64 / n as f64;
                    z * Complex::new(angle.cos(), -angle.sin())
                })
                .sum();
            sum * scale
        })
        .collect()
}

/// Forward FFT through rustfft, normalized by 1/N
fn planned_fft(samples: &[Complex<f64>]) -> Vec<Complex<f64>> {
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(samples.len());

    let mut buffer = samples.to_vec();
    fft.process(&mut buffer);

    let scale = 1.0 / samples.len() as f64;
    for value in &mut buffer {
        *value *= scale;
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn unit_square() -> Vec<Point2D> {
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(0.0, 0.0),
        ]
    }

    fn wobbly_curve(n: usize) -> Vec<Point2D> {
        (0..n)
            .map(|i| {
                let t = TAU * i as f64 / n as f64;
                DVec2::new(
                    100.0 * t.cos() + 20.0 * (3.0 * t).sin(),
                    80.0 * t.sin() - 15.0 * (2.0 * t).cos() + 5.0,
                )
            })
            .collect()
    }

    #[test]
    fn test_amplitudes_descend() {
        let spectrum = compute_spectrum(&wobbly_curve(64)).unwrap();

        for pair in spectrum.coefficients().windows(2) {
            assert!(pair[0].amplitude() >= pair[1].amplitude());
        }
    }

    #[test]
    fn test_every_frequency_appears_once() {
        let n = 37;
        let spectrum = compute_spectrum(&wobbly_curve(n)).unwrap();

        let mut frequencies: Vec<usize> = spectrum.iter().map(|c| c.frequency()).collect();
        frequencies.sort_unstable();
        assert_eq!(frequencies, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn test_inverse_reconstructs_input_samples() {
        let points = wobbly_curve(50);
        let spectrum = compute_spectrum(&points).unwrap();
        let n = points.len();

        for (i, original) in points.iter().enumerate() {
            let time = TAU * i as f64 / n as f64;
            let rebuilt = spectrum.evaluate(time, FrequencyConvention::Unsigned);
            assert!(
                (rebuilt - *original).length() < 1e-8,
                "sample {} rebuilt as {} instead of {}",
                i,
                rebuilt,
                original
            );
        }
    }

    #[test]
    fn test_signed_convention_matches_at_sample_points() {
        let points = wobbly_curve(24);
        let spectrum = compute_spectrum(&points).unwrap();

        for (i, original) in points.iter().enumerate() {
            let time = TAU * i as f64 / 24.0;
            let rebuilt = spectrum.evaluate(time, FrequencyConvention::Signed);
            assert!((rebuilt - *original).length() < 1e-8);
        }
    }

    #[test]
    fn test_identical_input_gives_identical_spectrum() {
        let points = wobbly_curve(40);
        assert_eq!(
            compute_spectrum(&points).unwrap(),
            compute_spectrum(&points).unwrap()
        );
    }

    #[test]
    fn test_exact_ties_keep_frequency_order() {
        // All-zero input: every bin is exactly zero
        let points = vec![Point2D::ZERO; 9];
        let spectrum = compute_spectrum(&points).unwrap();

        let frequencies: Vec<usize> = spectrum.iter().map(|c| c.frequency()).collect();
        assert_eq!(frequencies, (0..9).collect::<Vec<_>>());
        assert!(spectrum.iter().all(|c| c.amplitude() == 0.0 && c.phase() == 0.0));
    }

    #[test]
    fn test_unit_square_matches_closed_form() {
        // z = [0, 1, 1+i, i, 0], θ = 2π/5:
        // Re X[k] = (cos kθ + cos 2kθ + sin 2kθ + sin 3kθ) / 5
        // Im X[k] = (-sin kθ + cos 2kθ - sin 2kθ + cos 3kθ) / 5
        let theta = TAU / 5.0;
        let analytic = |k: usize| {
            let a = k as f64 * theta;
            let re = (a.cos() + (2.0 * a).cos() + (2.0 * a).sin() + (3.0 * a).sin()) / 5.0;
            let im = (-a.sin() + (2.0 * a).cos() - (2.0 * a).sin() + (3.0 * a).cos()) / 5.0;
            Complex::new(re, im)
        };

        let spectrum = compute_spectrum(&unit_square()).unwrap();

        let order: Vec<usize> = spectrum.iter().map(|c| c.frequency()).collect();
        assert_eq!(order, vec![1, 0, 2, 3, 4]);

        // Fundamental dominates, then the centroid term 2√2/5
        assert!((spectrum.coefficients()[0].amplitude() - 0.639_245_322_149_966_2).abs() < EPS);
        assert!((spectrum.coefficients()[1].amplitude() - 2.0 * 2f64.sqrt() / 5.0).abs() < EPS);
        assert!((spectrum.coefficients()[1].phase() - PI / 4.0).abs() < EPS);

        for coef in spectrum.iter() {
            let expected = analytic(coef.frequency());
            assert!((coef.amplitude() - expected.norm()).abs() < EPS);
            assert!((coef.phase() - expected.arg()).abs() < EPS);
        }
    }

    #[test]
    fn test_repeated_point_is_pure_offset() {
        let point = DVec2::new(3.0, -4.0);
        let spectrum = compute_spectrum(&vec![point; 16]).unwrap();

        let dc = spectrum.coefficients()[0];
        assert_eq!(dc.frequency(), 0);
        assert!((dc.amplitude() - 5.0).abs() < EPS);
        assert!(spectrum.iter().skip(1).all(|c| c.amplitude() < 1e-12));
    }

    #[test]
    fn test_single_point_is_one_coefficient() {
        let spectrum = compute_spectrum(&[DVec2::new(0.0, 2.0)]).unwrap();

        assert_eq!(spectrum.len(), 1);
        let only = spectrum.coefficients()[0];
        assert_eq!(only.frequency(), 0);
        assert!((only.amplitude() - 2.0).abs() < EPS);
        assert!((only.phase() - PI / 2.0).abs() < EPS);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(matches!(
            compute_spectrum(&[]),
            Err(EpicycleError::InvalidInput(_))
        ));
        assert!(compute_spectrum_with(&[], TransformMethod::Fft).is_err());
    }

    #[test]
    fn test_non_finite_point_is_rejected() {
        let points = vec![DVec2::ZERO, DVec2::new(f64::NAN, 1.0)];
        assert!(matches!(
            compute_spectrum(&points),
            Err(EpicycleError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_fft_agrees_with_direct() {
        let points = wobbly_curve(45);
        let direct = compute_spectrum_with(&points, TransformMethod::Direct).unwrap();
        let fft = compute_spectrum_with(&points, TransformMethod::Fft).unwrap();

        // Compare per frequency; near-equal amplitudes may sort differently
        for coef in direct.iter() {
            let other = fft
                .iter()
                .find(|c| c.frequency() == coef.frequency())
                .unwrap();
            assert!((coef.to_complex() - other.to_complex()).norm() < 1e-9);
        }
    }

    #[test]
    fn test_phase_stays_in_half_open_range() {
        // Real negative bin: atan2 may report -π for -0.0 imaginary parts
        let coef = EpicycleCoefficient::from_bin(2, Complex::new(-1.0, -0.0));
        assert!((coef.phase() - PI).abs() < EPS);

        let spectrum = compute_spectrum(&wobbly_curve(31)).unwrap();
        assert!(spectrum.iter().all(|c| c.phase() > -PI && c.phase() <= PI));
    }

    #[test]
    fn test_signed_frequency_folds_upper_half() {
        let coef = |k| EpicycleCoefficient::from_bin(k, Complex::new(1.0, 0.0));
        assert_eq!(coef(0).signed_frequency(8), 0);
        assert_eq!(coef(4).signed_frequency(8), 4);
        assert_eq!(coef(5).signed_frequency(8), -3);
        assert_eq!(coef(7).signed_frequency(8), -1);
    }

    #[test]
    fn test_close_loop_appends_first_point_once() {
        let mut points = vec![DVec2::new(1.0, 1.0), DVec2::new(2.0, 0.0)];
        close_loop(&mut points);
        assert_eq!(points.len(), 3);
        assert_eq!(points[2], points[0]);

        close_loop(&mut points);
        assert_eq!(points.len(), 3);

        let mut empty: Vec<Point2D> = Vec::new();
        close_loop(&mut empty);
        assert!(empty.is_empty());
    }
}
