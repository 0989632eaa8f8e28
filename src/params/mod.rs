//! Parameter definitions with units and documented semantics.
//!
//! Every tunable number lives here with:
//! - Units (drawing units, ticks, milliseconds, Hz)
//! - Documented reference values
//! - A `validate()` where bad values are possible

mod animation;
mod export;
mod shape;
mod spectrum;

// Re-export all types
pub use animation::AnimationConfig;
pub use export::ExportConfig;
pub use shape::{LissajousShape, ShapeConfig, ShapePreset, StarShape};
pub use spectrum::{FrequencyConvention, SpectrumConfig, TransformMethod};
