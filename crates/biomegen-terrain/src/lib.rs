//! Procedural 2D terrain: layered-noise fields and closest-fit biome classification.
//!
//! [`generate`] builds one normalized field from a list of [`Wave`]s,
//! [`classify`] picks a [`BiomeDef`] for a (height, moisture, heat) triple, and
//! [`TerrainMap`] composes three fields into a biome grid.

mod error;
mod grid;
mod map;
mod noise_field;
mod wave;

pub mod biome;
pub mod seed;

pub use biome::{BiomeDef, BiomeId, BiomeRegistry, classify, classify_index};
pub use error::TerrainError;
pub use grid::{Grid, NoiseField};
pub use map::{Cell, MapLayer, MapSettings, TerrainMap};
pub use noise_field::{
    CoherentNoise, DEGENERATE_FIELD_VALUE, FieldShape, MAX_SAMPLE_COORDINATE, NoiseFieldGenerator,
    NoiseSource, PerlinNoise, PerlinSource, default_worker_count, generate,
};
pub use wave::Wave;
