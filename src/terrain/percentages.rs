//! Category weights and the cumulative threshold table built from them
//!
//! Weights cover the nine land categories only. Water is decided by the
//! elevation threshold and never takes a share here, so the weights are
//! ratios over the land that remains after water is carved out.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use super::category::Category;

/// Range each randomized weight is drawn from before normalization
const RANDOM_WEIGHT_MIN: f32 = 5.0;
const RANDOM_WEIGHT_MAX: f32 = 20.0;

/// Per-category weights. Values are ratios; they do not need to sum to 100.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PercentageSpec {
    pub urban: f32,
    pub sparse: f32,
    pub dry_forest: f32,
    pub wet_forest: f32,
    pub mixed_forest: f32,
    pub shrubland: f32,
    pub grassland: f32,
    pub burned: f32,
    pub floodplain: f32,
}

impl Default for PercentageSpec {
    fn default() -> Self {
        Self {
            urban: 10.0,
            sparse: 10.0,
            dry_forest: 15.0,
            wet_forest: 15.0,
            mixed_forest: 10.0,
            shrubland: 10.0,
            grassland: 5.0,
            burned: 3.0,
            floodplain: 2.0,
        }
    }
}

impl PercentageSpec {
    /// Build from weights in [`Category::LAND`] order
    pub fn from_weights(w: [f32; 9]) -> Self {
        Self {
            urban: w[0],
            sparse: w[1],
            dry_forest: w[2],
            wet_forest: w[3],
            mixed_forest: w[4],
            shrubland: w[5],
            grassland: w[6],
            burned: w[7],
            floodplain: w[8],
        }
    }

    /// Weights in [`Category::LAND`] order
    pub fn weights(&self) -> [f32; 9] {
        [
            self.urban,
            self.sparse,
            self.dry_forest,
            self.wet_forest,
            self.mixed_forest,
            self.shrubland,
            self.grassland,
            self.burned,
            self.floodplain,
        ]
    }

    /// Weight of a single category. Water always has zero weight.
    pub fn weight(&self, category: Category) -> f32 {
        category.land_index().map_or(0.0, |i| self.weights()[i])
    }

    /// Draw nine weights uniformly from [5, 20] and rescale them to
    /// percentages summing to 100.
    pub fn randomized<R: Rng>(rng: &mut R) -> Self {
        let mut raw = [0.0_f32; 9];
        for w in raw.iter_mut() {
            *w = rng.gen_range(RANDOM_WEIGHT_MIN..=RANDOM_WEIGHT_MAX);
        }
        let total: f32 = raw.iter().sum();
        Self::from_weights(raw.map(|w| w / total * 100.0))
    }

    pub fn total(&self) -> f32 {
        self.weights().iter().sum()
    }
}

/// Cumulative upper boundaries in [0, 1] for the land categories, in
/// [`Category::LAND`] order.
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdTable {
    boundaries: [f32; 9],
}

impl ThresholdTable {
    /// Divide each weight by the total and accumulate in category order.
    pub fn from_weights(weights: [f32; 9]) -> Result<Self> {
        for (cat, w) in Category::LAND.iter().zip(weights) {
            if w.is_nan() || w < 0.0 {
                return Err(Error::InvalidPercentage(format!(
                    "{} weight is {}, expected a non-negative number",
                    cat.name(),
                    w
                )));
            }
        }

        let total: f64 = weights.iter().map(|&w| w as f64).sum();
        if total <= 0.0 || !total.is_finite() {
            return Err(Error::InvalidPercentage(format!(
                "land weights sum to {}, nothing to distribute",
                total
            )));
        }

        let mut boundaries = [0.0_f32; 9];
        let mut cumulative = 0.0_f64;
        for (b, w) in boundaries.iter_mut().zip(weights) {
            cumulative += w as f64 / total;
            *b = cumulative as f32;
        }

        Ok(Self { boundaries })
    }

    pub fn boundaries(&self) -> &[f32; 9] {
        &self.boundaries
    }

    /// Upper boundary for a land category; `None` for water.
    pub fn boundary(&self, category: Category) -> Option<f32> {
        category.land_index().map(|i| self.boundaries[i])
    }

    /// Fraction of land assigned to a category, before any disabled
    /// category folds into its successor.
    pub fn share(&self, category: Category) -> f32 {
        match category.land_index() {
            None => 0.0,
            Some(0) => self.boundaries[0],
            Some(i) => self.boundaries[i] - self.boundaries[i - 1],
        }
    }
}

/// Resolves the weights for a pass (manual or seeded random) and turns
/// them into a [`ThresholdTable`].
#[derive(Clone, Copy, Debug)]
pub struct PercentageAllocator {
    manual: bool,
    include_burned: bool,
}

impl PercentageAllocator {
    pub fn new(manual: bool, include_burned: bool) -> Self {
        Self { manual, include_burned }
    }

    /// Manual mode returns `spec` untouched; randomized mode draws fresh
    /// weights from a generator seeded with `seed`.
    pub fn resolve(&self, spec: &PercentageSpec, seed: i32) -> PercentageSpec {
        if self.manual {
            spec.clone()
        } else {
            let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
            PercentageSpec::randomized(&mut rng)
        }
    }

    /// Build thresholds. With burned areas off the Burned weight counts as
    /// zero but keeps its slot, so its interval is empty.
    pub fn thresholds(&self, spec: &PercentageSpec) -> Result<ThresholdTable> {
        let mut weights = spec.weights();
        if !self.include_burned {
            let burned = Category::Burned as usize - 1;
            if weights[burned] < 0.0 {
                return Err(Error::InvalidPercentage(format!(
                    "burned weight is {}, expected a non-negative number",
                    weights[burned]
                )));
            }
            weights[burned] = 0.0;
        }
        ThresholdTable::from_weights(weights)
    }

    /// `resolve` followed by `thresholds`
    pub fn allocate(&self, spec: &PercentageSpec, seed: i32) -> Result<(PercentageSpec, ThresholdTable)> {
        let resolved = self.resolve(spec, seed);
        let table = self.thresholds(&resolved)?;
        log::debug!("Threshold table: {:?}", table.boundaries());
        Ok((resolved, table))
    }
}
