//! Closest-fit biome selection.

use super::BiomeDef;
use crate::TerrainError;

/// Returns the index of the biome chosen for a cell.
///
/// Among biomes whose minimums are all met, the one with the smallest
/// [`BiomeDef::fit_score`] wins, the earliest entry winning ties. When none
/// match, index `0` is returned.
///
/// # Errors
///
/// [`TerrainError::InvalidConfiguration`] if `biomes` is empty.
pub fn classify_index(
    height: f64,
    moisture: f64,
    heat: f64,
    biomes: &[BiomeDef],
) -> Result<usize, TerrainError> {
    if biomes.is_empty() {
        return Err(TerrainError::InvalidConfiguration(
            "cannot classify against an empty biome list".into(),
        ));
    }

    let mut best: Option<(usize, f64)> = None;
    for (i, biome) in biomes.iter().enumerate() {
        if !biome.matches(height, moisture, heat) {
            continue;
        }
        let score = biome.fit_score(height, moisture, heat);
        match best {
            Some((_, best_score)) if score >= best_score => {}
            _ => best = Some((i, score)),
        }
    }

    Ok(best.map_or(0, |(i, _)| i))
}

/// Returns the biome chosen for a cell. See [`classify_index`].
///
/// # Errors
///
/// [`TerrainError::InvalidConfiguration`] if `biomes` is empty.
pub fn classify(
    height: f64,
    moisture: f64,
    heat: f64,
    biomes: &[BiomeDef],
) -> Result<&BiomeDef, TerrainError> {
    let index = classify_index(height, moisture, heat, biomes)?;
    Ok(&biomes[index])
}
