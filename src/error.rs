//! Error type shared by the spectrum engine, animator, session and exporters.

use thiserror::Error;

/// Errors surfaced synchronously to the caller of an operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EpicycleError {
    /// Point sequence or spectrum cannot be transformed or animated.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Parameter struct failed validation.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Writing a PNG, WAV or JSON artifact failed.
    #[error("Export failed: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, EpicycleError>;

impl From<std::io::Error> for EpicycleError {
    fn from(e: std::io::Error) -> Self {
        Self::Export(e.to_string())
    }
}

impl From<image::ImageError> for EpicycleError {
    fn from(e: image::ImageError) -> Self {
        Self::Export(e.to_string())
    }
}

impl From<hound::Error> for EpicycleError {
    fn from(e: hound::Error) -> Self {
        Self::Export(e.to_string())
    }
}

impl From<serde_json::Error> for EpicycleError {
    fn from(e: serde_json::Error) -> Self {
        Self::Export(e.to_string())
    }
}
