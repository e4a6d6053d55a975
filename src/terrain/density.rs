//! Fuel density modulated by landcover category

use super::category::Category;
use super::noise_field::{cell_coord, NoiseField};
use super::raster::Raster;

/// Density noise is sampled at this multiple of the classification scale
pub const DENSITY_FREQUENCY: f64 = 2.0;

/// Builds the density raster from noise and a finished classification
pub struct DensitySynthesizer<'a> {
    noise: &'a dyn NoiseField,
    noise_scale: f64,
    seed: i32,
}

impl<'a> DensitySynthesizer<'a> {
    pub fn new(noise: &'a dyn NoiseField, noise_scale: f32, seed: i32) -> Self {
        Self {
            noise,
            noise_scale: noise_scale as f64,
            seed,
        }
    }

    /// Unmodulated density noise for a cell
    pub fn raw_density(&self, x: usize, y: usize, width: usize, height: usize) -> f32 {
        let scale = self.noise_scale * DENSITY_FREQUENCY;
        self.noise.sample(
            cell_coord(x, width, scale, self.seed),
            cell_coord(y, height, scale, self.seed),
            self.seed,
        )
    }

    pub fn synthesize(&self, categories: &Raster<Category>) -> Raster<f32> {
        let (width, height) = categories.dimensions();
        log::debug!("Synthesizing {}x{} density", width, height);

        categories.par_map(|x, y, &cat| {
            let modifier = cat.density_modifier();
            if modifier == 0.0 {
                return 0.0;
            }
            self.raw_density(x, y, width, height) * modifier
        })
    }
}
