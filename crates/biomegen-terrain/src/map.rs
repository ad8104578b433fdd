//! Terrain map: three noise fields and the biome grid derived from them.
//!
//! This is the pure half of map generation. Whatever draws tiles or spawns
//! actors iterates the returned [`TerrainMap`] afterwards.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::biome::{BiomeId, BiomeRegistry};
use crate::{FieldShape, Grid, NoiseField, NoiseFieldGenerator, TerrainError, Wave};

/// Everything needed to generate a [`TerrainMap`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    pub width: usize,
    pub height: usize,
    pub scale: f64,
    pub offset: DVec2,
    pub height_waves: Vec<Wave>,
    pub moisture_waves: Vec<Wave>,
    pub heat_waves: Vec<Wave>,
}

impl MapSettings {
    /// The shape shared by all three fields.
    pub fn shape(&self) -> FieldShape {
        FieldShape {
            width: self.width,
            height: self.height,
            scale: self.scale,
            offset: self.offset,
        }
    }
}

/// Selects one of the scalar fields of a map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapLayer {
    Height,
    Moisture,
    Heat,
}

impl MapLayer {
    pub const ALL: [MapLayer; 3] = [MapLayer::Height, MapLayer::Moisture, MapLayer::Heat];

    pub fn name(self) -> &'static str {
        match self {
            MapLayer::Height => "height",
            MapLayer::Moisture => "moisture",
            MapLayer::Heat => "heat",
        }
    }
}

/// One resolved grid cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    pub height: f64,
    pub moisture: f64,
    pub heat: f64,
    pub biome: BiomeId,
}

/// Generated height, moisture and heat fields plus one biome per cell.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainMap {
    height: NoiseField,
    moisture: NoiseField,
    heat: NoiseField,
    biomes: Grid<BiomeId>,
}

impl TerrainMap {
    /// Generates all fields on the calling thread and classifies every cell.
    ///
    /// # Errors
    ///
    /// - [`TerrainError::InvalidConfiguration`] if `registry` is empty.
    /// - Any [`FieldShape::validate`] or
    ///   [`NoiseFieldGenerator::validate_waves`] error.
    ///
    /// Validation happens before any field is allocated.
    pub fn generate(settings: &MapSettings, registry: &BiomeRegistry) -> Result<Self, TerrainError> {
        let generator = Self::prepare(settings, registry)?;
        let height = generator.generate(&settings.height_waves)?;
        let moisture = generator.generate(&settings.moisture_waves)?;
        let heat = generator.generate(&settings.heat_waves)?;
        Self::assemble(height, moisture, heat, registry)
    }

    /// Like [`generate`](Self::generate), with each field's rows split across
    /// `workers` threads (`0` = one per CPU). Produces the same map.
    ///
    /// # Errors
    ///
    /// Same as [`generate`](Self::generate).
    pub fn generate_parallel(
        settings: &MapSettings,
        registry: &BiomeRegistry,
        workers: usize,
    ) -> Result<Self, TerrainError> {
        let generator = Self::prepare(settings, registry)?;
        let height = generator.generate_parallel(&settings.height_waves, workers)?;
        let moisture = generator.generate_parallel(&settings.moisture_waves, workers)?;
        let heat = generator.generate_parallel(&settings.heat_waves, workers)?;
        Self::assemble(height, moisture, heat, registry)
    }

    fn prepare(
        settings: &MapSettings,
        registry: &BiomeRegistry,
    ) -> Result<NoiseFieldGenerator, TerrainError> {
        if registry.is_empty() {
            return Err(TerrainError::InvalidConfiguration(
                "biome registry is empty".into(),
            ));
        }
        let generator = NoiseFieldGenerator::new(settings.shape())?;
        for waves in [
            &settings.height_waves,
            &settings.moisture_waves,
            &settings.heat_waves,
        ] {
            generator.validate_waves(waves)?;
        }
        debug!(
            width = settings.width,
            height = settings.height,
            scale = settings.scale,
            biomes = registry.len(),
            "generating terrain map"
        );
        Ok(generator)
    }

    fn assemble(
        height: NoiseField,
        moisture: NoiseField,
        heat: NoiseField,
        registry: &BiomeRegistry,
    ) -> Result<Self, TerrainError> {
        let ids = height
            .values()
            .iter()
            .zip(moisture.values())
            .zip(heat.values())
            .map(|((&h, &m), &t)| registry.classify(h, m, t))
            .collect::<Result<Vec<_>, _>>()?;
        let biomes = Grid::from_cells(height.width(), height.height(), ids);

        info!(
            width = biomes.width(),
            height = biomes.height(),
            "terrain map generated"
        );
        Ok(Self {
            height,
            moisture,
            heat,
            biomes,
        })
    }

    pub fn width(&self) -> usize {
        self.biomes.width()
    }

    pub fn height(&self) -> usize {
        self.biomes.height()
    }

    /// Returns the requested scalar field.
    pub fn layer(&self, layer: MapLayer) -> &NoiseField {
        match layer {
            MapLayer::Height => &self.height,
            MapLayer::Moisture => &self.moisture,
            MapLayer::Heat => &self.heat,
        }
    }

    /// The biome grid.
    pub fn biomes(&self) -> &Grid<BiomeId> {
        &self.biomes
    }

    pub fn biome_at(&self, x: usize, y: usize) -> Option<BiomeId> {
        self.biomes.get(x, y).copied()
    }

    /// Returns the fully resolved cell at `(x, y)`, or `None` out of bounds.
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        Some(Cell {
            x,
            y,
            height: *self.height.get(x, y)?,
            moisture: *self.moisture.get(x, y)?,
            heat: *self.heat.get(x, y)?,
            biome: *self.biomes.get(x, y)?,
        })
    }

    /// Iterates every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let height = self.height.values();
        let moisture = self.moisture.values();
        let heat = self.heat.values();
        self.biomes
            .iter()
            .enumerate()
            .map(move |(i, (x, y, &biome))| Cell {
                x,
                y,
                height: height[i],
                moisture: moisture[i],
                heat: heat[i],
                biome,
            })
    }

    /// Cell count per registered biome, in registry order (zeros included).
    pub fn biome_counts(&self, registry: &BiomeRegistry) -> Vec<(BiomeId, usize)> {
        let mut counts = vec![0usize; registry.len()];
        for id in self.biomes.values() {
            if let Some(count) = counts.get_mut(id.0 as usize) {
                *count += 1;
            }
        }
        registry
            .iter()
            .map(|(id, _)| id)
            .zip(counts)
            .collect()
    }
}
