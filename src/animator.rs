//! Time-stepped epicycle reconstruction.
//!
//! The animator owns the logical clock and the traced path for one
//! reconstruction episode. Time advances by a fixed step per tick
//! (`2π/N · speed`), never by wall-clock delta, so any driver cadence
//! produces the same frames.

use std::collections::VecDeque;
use std::f64::consts::TAU;

use log::debug;
use serde::Serialize;

use crate::error::{EpicycleError, Result};
use crate::params::{AnimationConfig, FrequencyConvention};
use crate::spectrum::{Point2D, Spectrum};

/// Logical simulation time and its per-tick step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationClock {
    time: f64,
    step_size: f64,
}

impl AnimationClock {
    /// Clock at time 0 stepping 2π/N per unit speed
    fn for_len(len: usize) -> Self {
        Self {
            time: 0.0,
            step_size: TAU / len as f64,
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    fn advance(&mut self, speed_factor: f64) {
        self.time += self.step_size * speed_factor;
    }
}

/// One drawn circle: where it sits and how large it is
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EpicycleCircle {
    pub center: Point2D,
    pub radius: f64,
}

/// Positions traced by the chain tip, oldest first
///
/// With a capacity the oldest positions are dropped once full; without one
/// the path grows for as long as the episode lasts.
#[derive(Debug, Clone, Default)]
pub struct ReconstructionPath {
    points: VecDeque<Point2D>,
    capacity: Option<usize>,
}

impl ReconstructionPath {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            points: VecDeque::new(),
            capacity,
        }
    }

    pub fn push(&mut self, point: Point2D) {
        if let Some(capacity) = self.capacity {
            while self.points.len() >= capacity {
                self.points.pop_front();
            }
        }
        self.points.push_back(point);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn last(&self) -> Option<Point2D> {
        self.points.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point2D> {
        self.points.iter()
    }

    pub fn to_vec(&self) -> Vec<Point2D> {
        self.points.iter().copied().collect()
    }
}

/// Sums the rotating vectors of an installed spectrum, one frame per tick
pub struct EpicycleAnimator {
    spectrum: Spectrum,
    clock: AnimationClock,
    path: ReconstructionPath,
    circles: Vec<EpicycleCircle>,
    position: Point2D,
    convention: FrequencyConvention,
}

impl EpicycleAnimator {
    /// Create an idle animator (no spectrum installed)
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            spectrum: Spectrum::default(),
            clock: AnimationClock::default(),
            path: ReconstructionPath::new(config.path_capacity),
            circles: Vec::new(),
            position: Point2D::ZERO,
            convention: config.frequency_convention,
        }
    }

    /// Install `spectrum` for a new episode: time 0, step 2π/N, empty path
    ///
    /// # Errors
    /// `InvalidInput` for an empty spectrum; the animator is left unchanged.
    pub fn start(&mut self, spectrum: Spectrum) -> Result<()> {
        if spectrum.is_empty() {
            return Err(EpicycleError::InvalidInput(
                "cannot animate an empty spectrum".to_string(),
            ));
        }

        self.clock = AnimationClock::for_len(spectrum.len());
        self.spectrum = spectrum;
        self.path.clear();
        self.fold();

        debug!(
            "Animator started: {} epicycles, step {:.5} rad",
            self.spectrum.len(),
            self.clock.step_size
        );
        Ok(())
    }

    /// Drop the spectrum and return to the idle state
    pub fn reset(&mut self) {
        self.spectrum = Spectrum::default();
        self.clock = AnimationClock::default();
        self.path.clear();
        self.circles.clear();
        self.position = Point2D::ZERO;
    }

    /// Advance time by `step · speed_factor`, fold, and extend the path
    ///
    /// # Returns
    /// The new chain tip, or `None` when no spectrum is installed.
    pub fn tick(&mut self, speed_factor: f64) -> Option<Point2D> {
        if !self.is_active() {
            return None;
        }

        self.clock.advance(speed_factor);
        self.fold();
        self.path.push(self.position);
        Some(self.position)
    }

    /// Recompute circle centers and the chain tip at the current time
    fn fold(&mut self) {
        let len = self.spectrum.len();
        let time = self.clock.time;
        let mut center = Point2D::ZERO;

        self.circles.clear();
        for coef in self.spectrum.iter() {
            self.circles.push(EpicycleCircle {
                center,
                radius: coef.amplitude(),
            });
            center += coef.offset_at(time, len, self.convention);
        }
        self.position = center;
    }

    pub fn is_active(&self) -> bool {
        !self.spectrum.is_empty()
    }

    /// Circles of the latest frame, in folding order
    pub fn current_epicycle_centers(&self) -> &[EpicycleCircle] {
        &self.circles
    }

    /// Chain tip of the latest frame
    pub fn position(&self) -> Point2D {
        self.position
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn path(&self) -> &ReconstructionPath {
        &self.path
    }

    pub fn spectrum(&self) -> &Spectrum {
        &self.spectrum
    }

    /// Ticks per full turn of the fundamental (N / speed, not rounded)
    pub fn period_ticks(&self, speed_factor: f64) -> f64 {
        self.spectrum.len() as f64 / speed_factor
    }
}
