//! Biome definition: lower thresholds plus presentation identity.

use serde::{Deserialize, Serialize};

/// A biome and the minimum (height, moisture, heat) a cell needs to qualify.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiomeDef {
    /// Unique, human-readable name (e.g. "grassland").
    pub name: String,
    /// Minimum normalized height, in `[0.0, 1.0]`.
    pub min_height: f64,
    /// Minimum normalized moisture, in `[0.0, 1.0]`.
    pub min_moisture: f64,
    /// Minimum normalized heat, in `[0.0, 1.0]`.
    pub min_heat: f64,
    /// Display color (RGB) for debug views.
    pub color: [u8; 3],
    /// Tile reference handed to whatever presents the map. Opaque here.
    pub tile: String,
}

impl BiomeDef {
    /// `true` when every value meets its minimum (inclusive).
    pub fn matches(&self, height: f64, moisture: f64, heat: f64) -> bool {
        height >= self.min_height && moisture >= self.min_moisture && heat >= self.min_heat
    }

    /// Summed per-axis overshoot above the minimums. Lower is a closer fit.
    ///
    /// This is a plain sum, not a distance: overshoot on one axis and
    /// undershoot on another cancel out.
    pub fn fit_score(&self, height: f64, moisture: f64, heat: f64) -> f64 {
        (height - self.min_height) + (moisture - self.min_moisture) + (heat - self.min_heat)
    }
}
