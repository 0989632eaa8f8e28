//! Spectrum engine configuration.

/// Forward transform used to turn a point sequence into coefficients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformMethod {
    /// Direct O(N²) summation of the DFT definition
    #[default]
    Direct,

    /// rustfft planner, rescaled by 1/N to match `Direct`
    Fft,
}

impl TransformMethod {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "direct" | "dft" => Some(Self::Direct),
            "fft" => Some(Self::Fft),
            _ => None,
        }
    }
}

/// Spectrum computation parameters
#[derive(Debug, Clone)]
pub struct SpectrumConfig {
    /// Transform implementation
    pub method: TransformMethod,

    /// Append the first point when a capture does not end where it began
    pub close_loop: bool,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            method: TransformMethod::Direct,
            close_loop: true,
        }
    }
}

/// Interpretation of a harmonic index when rotating an epicycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrequencyConvention {
    /// Rotate harmonic k at angular velocity k (0..N-1)
    #[default]
    Unsigned,

    /// Rotate harmonic k > N/2 at k - N (same values at sample points)
    Signed,
}

impl FrequencyConvention {
    pub fn from_signed_flag(signed: bool) -> Self {
        if signed {
            Self::Signed
        } else {
            Self::Unsigned
        }
    }
}
