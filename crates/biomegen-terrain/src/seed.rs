//! Deterministic per-wave seeding.
//!
//! Every pseudo-random quantity in a field is derived from a wave's own seed
//! through a seeded ChaCha stream, so no global RNG state can leak into the
//! output.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Half-width of the range seed offsets are drawn from.
pub const SEED_OFFSET_RANGE: f64 = 10_000.0;

/// Derive a deterministic RNG for a wave seed.
pub fn wave_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Coordinate shift applied to every sample of a wave with this seed.
///
/// Distinct seeds land on unrelated regions of the noise domain, which keeps
/// fields decorrelated even at identical frequency and scale.
pub fn seed_offset(seed: u64) -> DVec2 {
    let mut rng = wave_rng(seed);
    let x = rng.random_range(-SEED_OFFSET_RANGE..SEED_OFFSET_RANGE);
    let y = rng.random_range(-SEED_OFFSET_RANGE..SEED_OFFSET_RANGE);
    DVec2::new(x, y)
}
