//! Layered-noise field synthesis.
//!
//! A field is the per-cell sum of seeded noise octaves ([`Wave`]s), remapped
//! so the smallest raw value in the grid becomes `0.0` and the largest `1.0`.
//! Remapping needs the bounds of the whole grid, so generation runs in two
//! passes: raw sums first, then normalization.

use glam::DVec2;
use noise::{NoiseFn, Perlin};
use tracing::debug;

use crate::seed::seed_offset;
use crate::{Grid, NoiseField, TerrainError, Wave};

/// Value assigned to every cell when all raw values are equal
/// (no waves, all-zero amplitudes, or a single-cell grid).
pub const DEGENERATE_FIELD_VALUE: f64 = 0.0;

/// Largest absolute coordinate handed to the noise function. Perlin floors
/// coordinates into a machine integer lattice index.
pub const MAX_SAMPLE_COORDINATE: f64 = i32::MAX as f64;

/// Continuous, deterministic 2D noise returning values in `[0.0, 1.0]`.
pub trait CoherentNoise {
    fn sample(&self, x: f64, y: f64) -> f64;
}

/// Builds one [`CoherentNoise`] instance per wave seed.
pub trait NoiseSource {
    type Noise: CoherentNoise;

    fn for_seed(&self, seed: u64) -> Self::Noise;
}

/// Seeded Perlin noise remapped from `[-1, 1]` into `[0, 1]`.
#[derive(Clone, Debug)]
pub struct PerlinNoise {
    perlin: Perlin,
}

impl PerlinNoise {
    /// The permutation table takes a 32-bit seed, so the high half is
    /// folded into the low half. Seeds can still collide here; the per-wave
    /// coordinate shift keeps them apart.
    pub fn new(seed: u64) -> Self {
        Self {
            perlin: Perlin::new(fold_seed(seed)),
        }
    }
}

impl CoherentNoise for PerlinNoise {
    fn sample(&self, x: f64, y: f64) -> f64 {
        ((self.perlin.get([x, y]) + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

fn fold_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

/// Default [`NoiseSource`]: Perlin noise keyed by the wave seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct PerlinSource;

impl NoiseSource for PerlinSource {
    type Noise = PerlinNoise;

    fn for_seed(&self, seed: u64) -> PerlinNoise {
        PerlinNoise::new(seed)
    }
}

/// Dimensions and sampling transform shared by every wave of a field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldShape {
    pub width: usize,
    pub height: usize,
    /// Divisor applied to cell coordinates. Larger values stretch features.
    pub scale: f64,
    /// Added to every cell coordinate before scaling (pans the field).
    pub offset: DVec2,
}

impl FieldShape {
    /// Checks dimensions, scale and offset.
    ///
    /// # Errors
    ///
    /// - [`TerrainError::InvalidDimension`] if either dimension is zero.
    /// - [`TerrainError::InvalidScale`] if `scale` is not finite and positive.
    /// - [`TerrainError::InvalidOffset`] if `offset` is not finite.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if self.width == 0 || self.height == 0 {
            return Err(TerrainError::InvalidDimension {
                width: self.width,
                height: self.height,
            });
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(TerrainError::InvalidScale(self.scale));
        }
        if !self.offset.is_finite() {
            return Err(TerrainError::InvalidOffset {
                x: self.offset.x,
                y: self.offset.y,
            });
        }
        Ok(())
    }

    /// Largest absolute scaled coordinate on each axis, before frequency.
    fn max_scaled_extent(&self) -> DVec2 {
        let far = DVec2::new((self.width - 1) as f64, (self.height - 1) as f64);
        let lo = self.offset.abs();
        let hi = (far + self.offset).abs();
        lo.max(hi) / self.scale
    }

    fn cell_count(&self) -> usize {
        self.width * self.height
    }
}

/// A wave prepared for sampling: its noise instance and seed shift.
struct Layer<N> {
    noise: N,
    shift: DVec2,
    frequency: f64,
    amplitude: f64,
}

/// Generates normalized noise fields of a fixed shape.
pub struct NoiseFieldGenerator<S = PerlinSource> {
    shape: FieldShape,
    source: S,
}

impl NoiseFieldGenerator<PerlinSource> {
    /// Creates a generator backed by Perlin noise.
    ///
    /// # Errors
    ///
    /// See [`FieldShape::validate`].
    pub fn new(shape: FieldShape) -> Result<Self, TerrainError> {
        Self::with_source(shape, PerlinSource)
    }
}

impl<S: NoiseSource> NoiseFieldGenerator<S> {
    /// Creates a generator with a custom noise source.
    ///
    /// # Errors
    ///
    /// See [`FieldShape::validate`].
    pub fn with_source(shape: FieldShape, source: S) -> Result<Self, TerrainError> {
        shape.validate()?;
        Ok(Self { shape, source })
    }

    pub fn shape(&self) -> &FieldShape {
        &self.shape
    }

    /// Generates a field on the calling thread.
    ///
    /// # Errors
    ///
    /// See [`validate_waves`](Self::validate_waves).
    pub fn generate(&self, waves: &[Wave]) -> Result<NoiseField, TerrainError> {
        let layers = self.layers(waves)?;
        let mut raw = vec![0.0; self.shape.cell_count()];
        fill_rows(&self.shape, &layers, &mut raw, 0);
        Ok(normalize(&self.shape, raw))
    }

    /// Generates a field with rows split across `workers` scoped threads.
    ///
    /// Output is identical to [`generate`](Self::generate). A `workers` value
    /// of `0` uses [`default_worker_count`].
    ///
    /// # Errors
    ///
    /// See [`validate_waves`](Self::validate_waves).
    pub fn generate_parallel(
        &self,
        waves: &[Wave],
        workers: usize,
    ) -> Result<NoiseField, TerrainError>
    where
        S::Noise: Sync,
    {
        let workers = resolve_workers(workers).min(self.shape.height);
        if workers <= 1 {
            return self.generate(waves);
        }

        let layers = self.layers(waves)?;
        let width = self.shape.width;
        let rows_per_worker = self.shape.height.div_ceil(workers);
        let mut raw = vec![0.0; self.shape.cell_count()];

        std::thread::scope(|scope| {
            for (i, rows) in raw.chunks_mut(rows_per_worker * width).enumerate() {
                let shape = &self.shape;
                let layers = &layers;
                scope.spawn(move || fill_rows(shape, layers, rows, i * rows_per_worker));
            }
        });

        debug!(workers, rows_per_worker, "parallel field raw pass complete");
        Ok(normalize(&self.shape, raw))
    }

    /// Checks that `waves` can be sampled over this shape.
    ///
    /// # Errors
    ///
    /// - [`TerrainError::AmplitudeOverflow`] if the amplitudes sum to a
    ///   non-finite value.
    /// - [`TerrainError::CoordinateOverflow`] if any wave would sample beyond
    ///   [`MAX_SAMPLE_COORDINATE`].
    pub fn validate_waves(&self, waves: &[Wave]) -> Result<(), TerrainError> {
        let total: f64 = waves.iter().map(Wave::amplitude).sum();
        if !total.is_finite() {
            return Err(TerrainError::AmplitudeOverflow(total));
        }

        let extent = self.shape.max_scaled_extent();
        for wave in waves {
            let reach = extent * wave.frequency() + seed_offset(wave.seed()).abs();
            let magnitude = reach.max_element();
            if !magnitude.is_finite() || magnitude > MAX_SAMPLE_COORDINATE {
                return Err(TerrainError::CoordinateOverflow {
                    seed: wave.seed(),
                    magnitude,
                });
            }
        }
        Ok(())
    }

    fn layers(&self, waves: &[Wave]) -> Result<Vec<Layer<S::Noise>>, TerrainError> {
        self.validate_waves(waves)?;
        Ok(waves
            .iter()
            .map(|wave| Layer {
                noise: self.source.for_seed(wave.seed()),
                shift: seed_offset(wave.seed()),
                frequency: wave.frequency(),
                amplitude: wave.amplitude(),
            })
            .collect())
    }
}

/// Generates a normalized field with the default Perlin source.
///
/// # Errors
///
/// Any error from [`FieldShape::validate`] or
/// [`NoiseFieldGenerator::validate_waves`]; no grid is allocated in any case.
pub fn generate(
    width: usize,
    height: usize,
    scale: f64,
    offset: DVec2,
    waves: &[Wave],
) -> Result<NoiseField, TerrainError> {
    let generator = NoiseFieldGenerator::new(FieldShape {
        width,
        height,
        scale,
        offset,
    })?;
    generator.generate(waves)
}

/// Worker count used when callers pass `0`: one per logical CPU.
pub fn default_worker_count() -> usize {
    num_cpus::get().max(1)
}

fn resolve_workers(workers: usize) -> usize {
    if workers == 0 {
        default_worker_count()
    } else {
        workers
    }
}

/// Writes raw wave sums for consecutive rows starting at `first_row`.
fn fill_rows<N: CoherentNoise>(
    shape: &FieldShape,
    layers: &[Layer<N>],
    out: &mut [f64],
    first_row: usize,
) {
    for (i, value) in out.iter_mut().enumerate() {
        let x = (i % shape.width) as f64;
        let y = (first_row + i / shape.width) as f64;
        let base = (DVec2::new(x, y) + shape.offset) / shape.scale;
        *value = layers
            .iter()
            .map(|layer| {
                let p = base * layer.frequency + layer.shift;
                layer.amplitude * layer.noise.sample(p.x, p.y)
            })
            .sum();
    }
}

/// Remaps raw sums linearly onto `[0, 1]` using the grid-wide bounds.
fn normalize(shape: &FieldShape, mut raw: Vec<f64>) -> NoiseField {
    let (min, max) = raw
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;

    if range > 0.0 {
        for v in &mut raw {
            *v = ((*v - min) / range).clamp(0.0, 1.0);
        }
    } else {
        debug!(
            width = shape.width,
            height = shape.height,
            "degenerate field bounds, filling with constant"
        );
        raw.fill(DEGENERATE_FIELD_VALUE);
    }

    Grid::from_cells(shape.width, shape.height, raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave(seed: u64, frequency: f64, amplitude: f64) -> Wave {
        Wave::new(seed, frequency, amplitude).unwrap()
    }

    fn shape(width: usize, height: usize) -> FieldShape {
        FieldShape {
            width,
            height,
            scale: 10.0,
            offset: DVec2::ZERO,
        }
    }

    /// Noise equal to the x coordinate, for exact arithmetic checks.
    struct RampSource;
    struct Ramp;

    impl CoherentNoise for Ramp {
        fn sample(&self, x: f64, _y: f64) -> f64 {
            x
        }
    }

    impl NoiseSource for RampSource {
        type Noise = Ramp;
        fn for_seed(&self, _seed: u64) -> Ramp {
            Ramp
        }
    }

    #[test]
    fn test_shape_and_range() {
        let waves = [wave(1, 1.0, 1.0), wave(2, 2.0, 0.5), wave(3, 4.0, 0.25)];
        for (w, h) in [(1, 1), (4, 4), (7, 3), (32, 17)] {
            let field = generate(w, h, 10.0, DVec2::ZERO, &waves).unwrap();
            assert_eq!(field.width(), w);
            assert_eq!(field.height(), h);
            assert_eq!(field.len(), w * h);
            for &v in field.values() {
                assert!((0.0..=1.0).contains(&v), "value {v} out of [0, 1] for {w}x{h}");
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let waves = [wave(1, 1.0, 1.0), wave(9, 3.0, 0.3)];
        let offset = DVec2::new(12.5, -3.0);
        let a = generate(16, 16, 8.0, offset, &waves).unwrap();
        let b = generate(16, 16, 8.0, offset, &waves).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_decorrelation_scenario() {
        let a = generate(4, 4, 10.0, DVec2::ZERO, &[wave(1, 1.0, 1.0)]).unwrap();
        let b = generate(4, 4, 10.0, DVec2::ZERO, &[wave(2, 1.0, 1.0)]).unwrap();
        assert_eq!(a.len(), 16);
        assert!(
            a.values().iter().zip(b.values()).any(|(x, y)| x != y),
            "seed 1 and seed 2 produced identical fields"
        );
    }

    #[test]
    fn test_normalization_hits_both_bounds() {
        let field = generate(4, 4, 10.0, DVec2::ZERO, &[wave(1, 1.0, 1.0)]).unwrap();
        let min = field.values().iter().copied().fold(f64::INFINITY, f64::min);
        let max = field.values().iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(min, 0.0);
        assert_eq!(max, 1.0);
    }

    #[test]
    fn test_empty_waves_constant() {
        let field = generate(5, 3, 10.0, DVec2::ZERO, &[]).unwrap();
        assert!(field.values().iter().all(|&v| v == DEGENERATE_FIELD_VALUE));
    }

    #[test]
    fn test_zero_amplitude_constant() {
        let field = generate(5, 5, 10.0, DVec2::ZERO, &[wave(4, 1.0, 0.0)]).unwrap();
        assert!(field.values().iter().all(|&v| v == DEGENERATE_FIELD_VALUE));
    }

    #[test]
    fn test_single_cell_constant() {
        let field = generate(1, 1, 10.0, DVec2::ZERO, &[wave(4, 1.0, 1.0)]).unwrap();
        assert_eq!(field.values(), &[DEGENERATE_FIELD_VALUE]);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            generate(0, 4, 10.0, DVec2::ZERO, &[]),
            Err(TerrainError::InvalidDimension {
                width: 0,
                height: 4
            })
        );
        assert!(matches!(
            generate(4, 0, 10.0, DVec2::ZERO, &[]),
            Err(TerrainError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_invalid_scale() {
        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    generate(4, 4, scale, DVec2::ZERO, &[]),
                    Err(TerrainError::InvalidScale(_))
                ),
                "scale {scale} should be rejected"
            );
        }
    }

    #[test]
    fn test_sampling_coordinates() {
        // With a ramp noise the raw value is the sampled x coordinate, so the
        // normalized row must be evenly spaced across [0, 1].
        let generator = NoiseFieldGenerator::with_source(
            FieldShape {
                width: 5,
                height: 1,
                scale: 2.0,
                offset: DVec2::new(3.0, 0.0),
            },
            RampSource,
        )
        .unwrap();
        let field = generator.generate(&[wave(0, 1.0, 1.0)]).unwrap();
        let expected = [0.0, 0.25, 0.5, 0.75, 1.0];
        for (v, e) in field.values().iter().zip(expected) {
            assert!((v - e).abs() < 1e-9, "got {v}, expected {e}");
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let waves = [wave(11, 1.0, 1.0), wave(12, 2.5, 0.4)];
        let generator = NoiseFieldGenerator::new(FieldShape {
            width: 23,
            height: 19,
            scale: 6.0,
            offset: DVec2::new(-4.0, 9.0),
        })
        .unwrap();
        let sequential = generator.generate(&waves).unwrap();
        for workers in [0, 1, 2, 3, 8, 64] {
            assert_eq!(
                generator.generate_parallel(&waves, workers).unwrap(),
                sequential,
                "mismatch with {workers} workers"
            );
        }
    }

    #[test]
    fn test_non_finite_offset_rejected() {
        let waves = [wave(1, 1.0, 1.0)];
        for offset in [
            DVec2::new(f64::NAN, 0.0),
            DVec2::new(0.0, f64::INFINITY),
            DVec2::new(f64::NEG_INFINITY, 0.0),
        ] {
            assert!(
                matches!(
                    generate(4, 4, 10.0, offset, &waves),
                    Err(TerrainError::InvalidOffset { .. })
                ),
                "offset {offset:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_huge_offset_rejected() {
        let result = generate(4, 4, 1.0, DVec2::new(1e25, 0.0), &[wave(1, 1.0, 1.0)]);
        assert!(matches!(
            result,
            Err(TerrainError::CoordinateOverflow { seed: 1, .. })
        ));
    }

    #[test]
    fn test_huge_frequency_rejected() {
        let result = generate(4, 4, 10.0, DVec2::ZERO, &[wave(1, 1e30, 1.0)]);
        assert!(matches!(
            result,
            Err(TerrainError::CoordinateOverflow { seed: 1, .. })
        ));
    }

    #[test]
    fn test_large_in_range_offset_accepted() {
        let field = generate(4, 4, 1.0, DVec2::new(1e6, -1e6), &[wave(1, 1.0, 1.0)]).unwrap();
        assert!(field.values().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_amplitude_overflow_rejected() {
        let waves = [wave(1, 1.0, f64::MAX), wave(2, 1.0, f64::MAX)];
        assert!(matches!(
            generate(4, 4, 10.0, DVec2::ZERO, &waves),
            Err(TerrainError::AmplitudeOverflow(_))
        ));
    }

    #[test]
    fn test_single_max_amplitude_stays_in_range() {
        let field = generate(4, 4, 10.0, DVec2::ZERO, &[wave(1, 1.0, f64::MAX)]).unwrap();
        assert!(field.values().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_folded_seeds_differ() {
        // Same low 32 bits, different high bits.
        assert_ne!(fold_seed(5), fold_seed(5 + (1 << 32)));
    }

    #[test]
    fn test_perlin_noise_range() {
        let noise = PerlinNoise::new(5);
        for i in 0..200 {
            let v = noise.sample(i as f64 * 0.37, i as f64 * -0.21);
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_generator_validates_shape() {
        assert!(NoiseFieldGenerator::new(shape(0, 1)).is_err());
        assert!(NoiseFieldGenerator::new(shape(3, 3)).is_ok());
    }
}
