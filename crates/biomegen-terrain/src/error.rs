//! Error types for noise-field generation and biome classification.

/// Errors produced by the terrain core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// Grid dimensions must both be non-zero.
    #[error("invalid grid dimensions {width}x{height}: both must be greater than zero")]
    InvalidDimension { width: usize, height: usize },

    /// Sampling scale must be finite and strictly positive.
    #[error("invalid scale {0}: must be finite and greater than zero")]
    InvalidScale(f64),

    /// The sampling offset must be finite.
    #[error("invalid offset ({x}, {y}): both components must be finite")]
    InvalidOffset { x: f64, y: f64 },

    /// A wave would sample the noise function beyond the supported
    /// coordinate range.
    #[error("wave (seed {seed}) samples coordinates up to {magnitude}, beyond the supported limit")]
    CoordinateOverflow { seed: u64, magnitude: f64 },

    /// Summed wave amplitudes overflow a finite float.
    #[error("summed wave amplitude {0} is not finite")]
    AmplitudeOverflow(f64),

    /// A wave descriptor carried an unusable frequency or amplitude.
    #[error("invalid wave (seed {seed}): frequency {frequency} must be > 0, amplitude {amplitude} must be >= 0")]
    InvalidWave {
        seed: u64,
        frequency: f64,
        amplitude: f64,
    },

    /// The biome configuration cannot be used for classification.
    #[error("invalid biome configuration: {0}")]
    InvalidConfiguration(String),

    /// A biome with this name is already registered.
    #[error("duplicate biome name: {0}")]
    DuplicateBiome(String),

    /// A biome minimum lies outside `[0.0, 1.0]`.
    #[error("biome '{name}' has {axis} minimum {value} outside [0, 1]")]
    ThresholdOutOfRange {
        name: String,
        axis: &'static str,
        value: f64,
    },
}
