//! Landcover classification from elevation, noise and thresholds
//!
//! Cells below the water threshold are water regardless of weights. Land
//! cells take one single-octave noise sample and walk the cumulative
//! threshold table in [`Category::LAND`] order.
//!
//! A disabled category keeps its slot in the table. Its interval is not
//! removed or redistributed; samples that fall in it are claimed by the
//! next enabled category. With urban areas off, Sparse therefore covers
//! both the Urban and Sparse intervals.

use super::category::Category;
use super::noise_field::{cell_coord, NoiseField};
use super::percentages::ThresholdTable;
use super::raster::Raster;

/// Maps a classification noise sample to a land category
#[derive(Clone, Debug)]
pub struct CategoryRule {
    table: ThresholdTable,
    enabled: [bool; 9],
}

impl CategoryRule {
    pub fn new(table: ThresholdTable, generate_urban: bool) -> Self {
        let mut enabled = [true; 9];
        enabled[0] = generate_urban;
        Self { table, enabled }
    }

    pub fn table(&self) -> &ThresholdTable {
        &self.table
    }

    pub fn is_enabled(&self, category: Category) -> bool {
        category.land_index().is_some_and(|i| self.enabled[i])
    }

    /// First enabled category whose boundary lies above `n`; Floodplain
    /// when `n` is past every boundary.
    pub fn category_for(&self, n: f32) -> Category {
        for (i, &boundary) in self.table.boundaries().iter().enumerate() {
            if self.enabled[i] && n < boundary {
                return Category::LAND[i];
            }
        }
        Category::Floodplain
    }
}

/// Per-cell categories plus their display colors
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    pub categories: Raster<Category>,
    pub colors: Raster<[u8; 4]>,
}

impl Classification {
    /// Number of cells per category, indexed by category id
    pub fn histogram(&self) -> [usize; 10] {
        let mut counts = [0usize; 10];
        for &cat in self.categories.as_slice() {
            counts[cat.id() as usize] += 1;
        }
        counts
    }
}

/// Builds the classification raster
pub struct ClassificationSynthesizer<'a> {
    noise: &'a dyn NoiseField,
    noise_scale: f64,
    seed: i32,
    water_threshold: f32,
    rule: CategoryRule,
}

impl<'a> ClassificationSynthesizer<'a> {
    pub fn new(
        noise: &'a dyn NoiseField,
        noise_scale: f32,
        seed: i32,
        water_threshold: f32,
        rule: CategoryRule,
    ) -> Self {
        Self {
            noise,
            noise_scale: noise_scale as f64,
            seed,
            water_threshold,
            rule,
        }
    }

    /// Category for one cell given its elevation
    pub fn classify_cell(&self, x: usize, y: usize, width: usize, height: usize, elevation: f32) -> Category {
        if elevation < self.water_threshold {
            return Category::Water;
        }
        let n = self.noise.sample(
            cell_coord(x, width, self.noise_scale, self.seed),
            cell_coord(y, height, self.noise_scale, self.seed),
            self.seed,
        );
        self.rule.category_for(n)
    }

    pub fn synthesize(&self, elevation: &Raster<f32>) -> Classification {
        let (width, height) = elevation.dimensions();
        log::debug!("Classifying {}x{} cells (water below {})", width, height, self.water_threshold);

        let categories = elevation.par_map(|x, y, &e| self.classify_cell(x, y, width, height, e));
        let colors = categories.par_map(|_, _, cat| cat.color());
        Classification { categories, colors }
    }
}
