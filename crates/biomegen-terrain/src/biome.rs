//! Biome system: threshold definitions, an ordered registry, and the
//! closest-fit classifier that maps (height, moisture, heat) to a biome.

mod classify;
mod def;
mod registry;

pub use classify::{classify, classify_index};
pub use def::BiomeDef;
pub use registry::{BiomeId, BiomeRegistry};
