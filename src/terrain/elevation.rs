//! Three-octave fractal elevation

use super::noise_field::{cell_coord, NoiseField};
use super::raster::Raster;

/// Octave (frequency multiplier, weight) pairs. Weights sum to 1.
pub const ELEVATION_OCTAVES: [(f64, f32); 3] = [(1.0, 0.6), (2.0, 0.3), (4.0, 0.1)];

/// Builds the elevation raster from a noise field
pub struct ElevationSynthesizer<'a> {
    noise: &'a dyn NoiseField,
    noise_scale: f64,
    seed: i32,
}

impl<'a> ElevationSynthesizer<'a> {
    pub fn new(noise: &'a dyn NoiseField, noise_scale: f32, seed: i32) -> Self {
        Self {
            noise,
            noise_scale: noise_scale as f64,
            seed,
        }
    }

    /// Elevation in [0, 1] at noise-space coordinate `(fx, fy)`
    pub fn elevation_at(&self, fx: f64, fy: f64) -> f32 {
        let blended: f32 = ELEVATION_OCTAVES
            .iter()
            .map(|&(freq, weight)| weight * self.noise.sample(fx * freq, fy * freq, self.seed))
            .sum();
        blended.clamp(0.0, 1.0)
    }

    /// Generate a `width` x `height` elevation raster
    pub fn synthesize(&self, width: usize, height: usize) -> Raster<f32> {
        log::debug!("Synthesizing {}x{} elevation (scale {}, seed {})",
            width, height, self.noise_scale, self.seed);

        Raster::par_from_fn(width, height, |x, y| {
            let fx = cell_coord(x, width, self.noise_scale, self.seed);
            let fy = cell_coord(y, height, self.noise_scale, self.seed);
            self.elevation_at(fx, fy)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::noise_field::PerlinField;

    #[test]
    fn test_elevation_in_range() {
        let noise = PerlinField::default();
        let elevation = ElevationSynthesizer::new(&noise, 20.0, 42).synthesize(32, 24);
        assert_eq!(elevation.dimensions(), (32, 24));
        for (x, y, &e) in elevation.iter() {
            assert!((0.0..=1.0).contains(&e), "elevation {} at ({}, {})", e, x, y);
        }
    }

    #[test]
    fn test_elevation_deterministic() {
        let noise = PerlinField::default();
        let a = ElevationSynthesizer::new(&noise, 20.0, 42).synthesize(16, 16);
        let b = ElevationSynthesizer::new(&noise, 20.0, 42).synthesize(16, 16);
        assert_eq!(a, b);
    }

    #[test]
    fn test_octave_weights() {
        // Field returning a different constant per octave frequency band
        let noise = |x: f64, _y: f64, _seed: i32| -> f32 {
            if x >= 40.0 {
                1.0
            } else if x >= 20.0 {
                0.5
            } else {
                0.0
            }
        };
        let synth = ElevationSynthesizer::new(&noise, 1.0, 0);
        // fx = 10: octave 1 -> 0.0, octave 2 (20) -> 0.5, octave 4 (40) -> 1.0
        let e = synth.elevation_at(10.0, 0.0);
        assert!((e - (0.3 * 0.5 + 0.1 * 1.0)).abs() < 1e-6, "got {}", e);
    }

    #[test]
    fn test_octave_coordinates() {
        let seen = std::sync::Mutex::new(Vec::new());
        let noise = |x: f64, y: f64, seed: i32| -> f32 {
            seen.lock().unwrap().push((x, y, seed));
            0.5
        };
        let synth = ElevationSynthesizer::new(&noise, 2.0, 100);
        let e = synth.synthesize(4, 4);
        assert!((e.get(3, 1) - 0.5).abs() < 1e-6);

        // cell (1, 2): fx = 1/4 * 2 + 1.0, fy = 2/4 * 2 + 1.0
        let seen = seen.into_inner().unwrap();
        for mult in [1.0, 2.0, 4.0] {
            assert!(seen.iter().any(|&(x, y, s)| {
                s == 100 && (x - 1.5 * mult).abs() < 1e-9 && (y - 2.0 * mult).abs() < 1e-9
            }));
        }
    }

    #[test]
    fn test_elevation_clamped() {
        let noise = |_x: f64, _y: f64, _seed: i32| 1.0_f32;
        let e = ElevationSynthesizer::new(&noise, 1.0, 0).elevation_at(0.3, 0.3);
        assert!(e <= 1.0);
        assert!((e - 1.0).abs() < 1e-6);
    }
}
