//! Text summary of a generated map.

use std::fmt;

use biomegen_terrain::{BiomeRegistry, MapLayer, TerrainMap};

/// Min / mean / max of one scalar field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerStats {
    pub layer: MapLayer,
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

/// Per-biome share of the map.
#[derive(Clone, Debug, PartialEq)]
pub struct BiomeShare {
    pub name: String,
    pub cells: usize,
    pub percent: f64,
}

/// Everything printed after a generation run.
#[derive(Clone, Debug, PartialEq)]
pub struct MapSummary {
    pub width: usize,
    pub height: usize,
    pub layers: Vec<LayerStats>,
    pub biomes: Vec<BiomeShare>,
}

impl MapSummary {
    pub fn new(map: &TerrainMap, registry: &BiomeRegistry) -> Self {
        let layers = MapLayer::ALL
            .into_iter()
            .map(|layer| {
                let values = map.layer(layer).values();
                let (min, max, sum) = values.iter().fold(
                    (f64::INFINITY, f64::NEG_INFINITY, 0.0),
                    |(lo, hi, sum), &v| (lo.min(v), hi.max(v), sum + v),
                );
                LayerStats {
                    layer,
                    min,
                    mean: sum / values.len() as f64,
                    max,
                }
            })
            .collect();

        let total = map.biomes().len() as f64;
        let biomes = map
            .biome_counts(registry)
            .into_iter()
            .map(|(id, cells)| BiomeShare {
                name: registry.get(id).name.clone(),
                cells,
                percent: cells as f64 * 100.0 / total,
            })
            .collect();

        Self {
            width: map.width(),
            height: map.height(),
            layers,
            biomes,
        }
    }
}

impl fmt::Display for MapSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "map {}x{}", self.width, self.height)?;
        for s in &self.layers {
            writeln!(
                f,
                "  {:<10} min {:.3}  mean {:.3}  max {:.3}",
                s.layer.name(),
                s.min,
                s.mean,
                s.max
            )?;
        }
        writeln!(f, "biomes:")?;
        for b in &self.biomes {
            writeln!(f, "  {:<12} {:>7} cells  {:>6.2}%", b.name, b.cells, b.percent)?;
        }
        Ok(())
    }
}
