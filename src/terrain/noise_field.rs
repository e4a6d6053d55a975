//! Seeded coherent noise sampled over unbounded 2D coordinates

use noise::{NoiseFn, Perlin};

/// Spacing between the Z slices that different seeds read from. Adjacent
/// seeds land at different fractional depths inside a lattice cell. Seed 0
/// reads the z = 0 lattice plane, where the field is 0.5 at integer (x, y).
const SEED_SLICE_SPACING: f64 = 0.618_034;

/// Perlin's permutation table repeats every 256 lattice units on each axis.
const PERLIN_PERIOD: f64 = 256.0;

/// Offset added to noise-space coordinates per unit of seed.
pub const SEED_COORD_OFFSET: f64 = 0.01;

/// A smooth, deterministic scalar field in [0, 1].
///
/// Every synthesizer samples through this trait, so tests can swap in a
/// fixed table or constant. Any `Fn(f64, f64, i32) -> f32` closure is a
/// field as well.
pub trait NoiseField: Send + Sync {
    /// Sample the field at `(x, y)` for the given seed. Must return a value
    /// in [0, 1] and the same value for identical inputs.
    fn sample(&self, x: f64, y: f64, seed: i32) -> f32;
}

impl<F> NoiseField for F
where
    F: Fn(f64, f64, i32) -> f32 + Send + Sync,
{
    fn sample(&self, x: f64, y: f64, seed: i32) -> f32 {
        self(x, y, seed)
    }
}

/// Perlin-backed field. Each seed reads a different 2D slice of 3D Perlin
/// noise, so the permutation table is built once and shared by all seeds.
#[derive(Clone, Debug)]
pub struct PerlinField {
    perlin: Perlin,
}

impl PerlinField {
    /// Create a field with the given permutation seed
    pub fn new(permutation_seed: i32) -> Self {
        Self {
            perlin: Perlin::new(permutation_seed as u32),
        }
    }
}

impl Default for PerlinField {
    fn default() -> Self {
        Self::new(0)
    }
}

impl NoiseField for PerlinField {
    fn sample(&self, x: f64, y: f64, seed: i32) -> f32 {
        let z = seed as f64 * SEED_SLICE_SPACING;
        let value = self.perlin.get([wrap_period(x), wrap_period(y), wrap_period(z)]);

        // Map from [-1, 1] to [0, 1]
        ((value * 0.5 + 0.5) as f32).clamp(0.0, 1.0)
    }
}

/// Fold a coordinate into one Perlin period. Wrapping by the period is exact
/// for the lattice hash, so the field stays continuous. `noise` casts lattice
/// corners to `isize` and panics on NaN, infinity or huge values; non-finite
/// input samples the origin instead.
fn wrap_period(v: f64) -> f64 {
    if v.is_finite() {
        v.rem_euclid(PERLIN_PERIOD)
    } else {
        0.0
    }
}

/// Noise-space coordinate for cell `i` of a `dimension`-wide raster:
/// `i / dimension * scale + seed * 0.01`.
pub fn cell_coord(i: usize, dimension: usize, scale: f64, seed: i32) -> f64 {
    i as f64 / dimension as f64 * scale + seed as f64 * SEED_COORD_OFFSET
}
