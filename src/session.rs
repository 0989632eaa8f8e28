//! Capture/reconstruct mode state machine.
//!
//! A `Session` is a plain value owned by the driver. Capture events switch it
//! between `Capturing` (collecting a stroke) and `Reconstructing` (animating
//! the stroke's spectrum); ticks only move time while reconstructing.

use log::{debug, info};
use serde::Serialize;

use crate::animator::{EpicycleAnimator, EpicycleCircle};
use crate::error::Result;
use crate::params::{AnimationConfig, SpectrumConfig};
use crate::spectrum::{close_loop, compute_spectrum_with, Point2D, Spectrum};

/// Active session mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    Capturing,
    Reconstructing,
}

/// Read-only frame snapshot handed to a renderer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderState {
    pub raw_points: Vec<Point2D>,
    pub epicycle_centers: Vec<EpicycleCircle>,
    pub reconstruction_path: Vec<Point2D>,
    pub mode: Mode,
}

/// Owns the mode flag, the captured stroke and the animator
pub struct Session {
    mode: Mode,
    points: Vec<Point2D>,
    animator: EpicycleAnimator,
    spectrum_config: SpectrumConfig,
    animation_config: AnimationConfig,
}

impl Session {
    /// Create a session in `Capturing` mode
    pub fn new(spectrum_config: SpectrumConfig, animation_config: AnimationConfig) -> Result<Self> {
        animation_config.validate()?;

        Ok(Self {
            mode: Mode::Capturing,
            points: Vec::new(),
            animator: EpicycleAnimator::new(&animation_config),
            spectrum_config,
            animation_config,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// A new input gesture began
    ///
    /// Leaving `Reconstructing` discards the spectrum, clock, path and stroke.
    /// Already `Capturing`: the mode stays put and only the unfinished stroke
    /// restarts.
    pub fn on_capture_started(&mut self) {
        if self.mode == Mode::Reconstructing {
            self.animator.reset();
            self.mode = Mode::Capturing;
            info!("Session: reconstructing -> capturing");
        }
        self.points.clear();
    }

    /// Append one sample to the stroke being captured
    ///
    /// # Returns
    /// `false` (sample ignored) outside `Capturing` mode.
    pub fn record_point(&mut self, point: Point2D) -> bool {
        if self.mode != Mode::Capturing {
            return false;
        }
        self.points.push(point);
        true
    }

    /// Finish the stroke assembled through `record_point`
    pub fn finish_capture(&mut self) -> Result<()> {
        let points = self.points.clone();
        self.on_capture_finished(points)
    }

    /// The user completed a curve: close it, transform it, start animating
    ///
    /// The spectrum is installed before the mode flips, so no tick observes
    /// a partially started episode.
    ///
    /// # Errors
    /// `InvalidInput` for an empty or non-finite sequence. The session then
    /// keeps its previous mode and data.
    pub fn on_capture_finished(&mut self, mut points: Vec<Point2D>) -> Result<()> {
        if self.mode == Mode::Reconstructing {
            debug!("Session: capture finished while reconstructing, replacing episode");
        }

        if self.spectrum_config.close_loop {
            close_loop(&mut points);
        }

        let spectrum = compute_spectrum_with(&points, self.spectrum_config.method)?;
        self.animator.start(spectrum)?;
        self.points = points;
        self.mode = Mode::Reconstructing;

        info!(
            "Session: capturing -> reconstructing ({} points, {:.2} ticks per turn)",
            self.points.len(),
            self.animator.period_ticks(self.animation_config.speed_factor)
        );
        Ok(())
    }

    /// Periodic driver tick; moves time only while reconstructing
    pub fn on_tick(&mut self) -> Option<Point2D> {
        match self.mode {
            Mode::Capturing => None,
            Mode::Reconstructing => self.animator.tick(self.animation_config.speed_factor),
        }
    }

    /// Snapshot of the last completed frame
    pub fn render_state(&self) -> RenderState {
        RenderState {
            raw_points: self.points.clone(),
            epicycle_centers: self.animator.current_epicycle_centers().to_vec(),
            reconstruction_path: self.animator.path().to_vec(),
            mode: self.mode,
        }
    }

    pub fn raw_points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn spectrum(&self) -> &Spectrum {
        self.animator.spectrum()
    }

    pub fn animator(&self) -> &EpicycleAnimator {
        &self.animator
    }

    pub fn animation_config(&self) -> &AnimationConfig {
        &self.animation_config
    }
}
