//! Biome registry: an ordered, name-unique list of [`BiomeDef`]s.
//!
//! Order matters: the first registered biome is the classification fallback,
//! and earlier biomes win score ties.

use hashbrown::HashMap;

use super::{BiomeDef, classify_index};
use crate::TerrainError;

/// Index of a biome within its [`BiomeRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BiomeId(pub u16);

/// Stores all registered biome definitions with O(1) lookup by ID.
#[derive(Clone, Debug)]
pub struct BiomeRegistry {
    biomes: Vec<BiomeDef>,
    name_to_id: HashMap<String, BiomeId>,
}

impl BiomeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            biomes: Vec::new(),
            name_to_id: HashMap::new(),
        }
    }

    /// Builds a registry from definitions in order.
    ///
    /// # Errors
    ///
    /// Any error from [`register`](Self::register).
    pub fn from_defs(defs: impl IntoIterator<Item = BiomeDef>) -> Result<Self, TerrainError> {
        let mut registry = Self::new();
        for def in defs {
            registry.register(def)?;
        }
        Ok(registry)
    }

    /// Registers a new biome definition, returning its assigned [`BiomeId`].
    ///
    /// # Errors
    ///
    /// - [`TerrainError::DuplicateBiome`] if a biome with the same name exists.
    /// - [`TerrainError::ThresholdOutOfRange`] if a minimum is outside `[0, 1]`.
    /// - [`TerrainError::InvalidConfiguration`] once `u16::MAX` biomes exist.
    pub fn register(&mut self, def: BiomeDef) -> Result<BiomeId, TerrainError> {
        if self.name_to_id.contains_key(&def.name) {
            return Err(TerrainError::DuplicateBiome(def.name.clone()));
        }
        for (axis, value) in [
            ("height", def.min_height),
            ("moisture", def.min_moisture),
            ("heat", def.min_heat),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TerrainError::ThresholdOutOfRange {
                    name: def.name.clone(),
                    axis,
                    value,
                });
            }
        }
        let id = u16::try_from(self.biomes.len())
            .map(BiomeId)
            .map_err(|_| TerrainError::InvalidConfiguration("too many biomes".into()))?;
        self.name_to_id.insert(def.name.clone(), id);
        self.biomes.push(def);
        Ok(id)
    }

    /// Returns the definition for the given biome ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this registry.
    pub fn get(&self, id: BiomeId) -> &BiomeDef {
        &self.biomes[id.0 as usize]
    }

    /// Looks up a biome ID by name.
    pub fn lookup_by_name(&self, name: &str) -> Option<BiomeId> {
        self.name_to_id.get(name).copied()
    }

    /// The biome returned when nothing matches: the first one registered.
    pub fn fallback(&self) -> Option<BiomeId> {
        (!self.biomes.is_empty()).then_some(BiomeId(0))
    }

    /// Definitions in registration order.
    pub fn defs(&self) -> &[BiomeDef] {
        &self.biomes
    }

    /// Iterates `(id, def)` in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (BiomeId, &BiomeDef)> + '_ {
        self.biomes
            .iter()
            .enumerate()
            .map(|(i, def)| (BiomeId(i as u16), def))
    }

    /// Classifies a cell. See [`classify_index`](super::classify_index).
    ///
    /// # Errors
    ///
    /// [`TerrainError::InvalidConfiguration`] if the registry is empty.
    pub fn classify(&self, height: f64, moisture: f64, heat: f64) -> Result<BiomeId, TerrainError> {
        classify_index(height, moisture, heat, &self.biomes).map(|i| BiomeId(i as u16))
    }

    /// Returns the number of registered biomes.
    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    /// Returns `true` if no biomes are registered.
    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }
}

impl Default for BiomeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
