//! Wave descriptors: one seeded octave of layered noise.

use serde::{Deserialize, Serialize};

use crate::TerrainError;

/// One octave of noise contributing to a field.
///
/// Fields are private so a `Wave` is always valid once built: the frequency
/// is finite and positive, the amplitude finite and non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWave", into = "RawWave")]
pub struct Wave {
    seed: u64,
    frequency: f64,
    amplitude: f64,
}

/// Unvalidated on-disk form of a [`Wave`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
struct RawWave {
    seed: u64,
    frequency: f64,
    amplitude: f64,
}

impl Wave {
    /// Creates a wave.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidWave`] if `frequency` is not strictly
    /// positive or `amplitude` is negative (or either is non-finite).
    pub fn new(seed: u64, frequency: f64, amplitude: f64) -> Result<Self, TerrainError> {
        let frequency_ok = frequency.is_finite() && frequency > 0.0;
        let amplitude_ok = amplitude.is_finite() && amplitude >= 0.0;
        if !frequency_ok || !amplitude_ok {
            return Err(TerrainError::InvalidWave {
                seed,
                frequency,
                amplitude,
            });
        }
        Ok(Self {
            seed,
            frequency,
            amplitude,
        })
    }

    /// Octave `index` of a standard fractal stack: frequency `2^index`,
    /// amplitude `0.5^index`. Always valid.
    pub fn octave(seed: u64, index: u8) -> Self {
        Self {
            seed,
            frequency: 2f64.powi(i32::from(index)),
            amplitude: 0.5f64.powi(i32::from(index)),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }
}

impl TryFrom<RawWave> for Wave {
    type Error = TerrainError;

    fn try_from(raw: RawWave) -> Result<Self, Self::Error> {
        Wave::new(raw.seed, raw.frequency, raw.amplitude)
    }
}

impl From<Wave> for RawWave {
    fn from(wave: Wave) -> Self {
        Self {
            seed: wave.seed,
            frequency: wave.frequency,
            amplitude: wave.amplitude,
        }
    }
}
