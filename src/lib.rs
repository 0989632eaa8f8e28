//! Epicycles library - Fourier epicycle reconstruction of hand-drawn curves

pub mod animator;
pub mod cli;
pub mod error;
pub mod export;
pub mod params;
pub mod session;
pub mod shapes;
pub mod spectrum;

pub use animator::{AnimationClock, EpicycleAnimator, EpicycleCircle, ReconstructionPath};
pub use error::{EpicycleError, Result};
pub use session::{Mode, RenderState, Session};
pub use spectrum::{compute_spectrum, compute_spectrum_with, EpicycleCoefficient, Point2D, Spectrum};
