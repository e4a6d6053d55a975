//! Generation configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::terrain::mesh::MeshParams;
use crate::terrain::percentages::{PercentageAllocator, PercentageSpec, ThresholdTable};

/// Every input of a generation pass. Identical configs produce identical
/// bundles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Raster width in cells (> 1).
    pub map_width: usize,
    /// Raster height in cells (> 1).
    pub map_height: usize,
    /// Noise-space extent covered by the whole map (larger = busier terrain).
    pub noise_scale: f32,
    /// Seed for noise offsets and randomized weights.
    pub seed: i32,
    /// Allow the Urban category. When off its share folds into Sparse.
    pub generate_urban_areas: bool,
    /// Allow the Burned category. When off its weight counts as zero.
    pub generate_burned_areas: bool,
    /// Use `percentages` as given; otherwise draw random weights from `seed`.
    pub manual_percentage_control: bool,
    /// Land category weights.
    pub percentages: PercentageSpec,
    /// Cells below this elevation are water.
    pub water_elevation_threshold: f32,
    /// Mesh geometry.
    pub mesh: MeshParams,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            map_width: 256,
            map_height: 256,
            noise_scale: 20.0,
            seed: 42,
            generate_urban_areas: false,
            generate_burned_areas: false,
            manual_percentage_control: true,
            percentages: PercentageSpec::default(),
            water_elevation_threshold: 0.3,
            mesh: MeshParams::default(),
        }
    }
}

impl GenerationConfig {
    /// Default configuration with the given seed.
    pub fn from_seed(seed: i32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Allocator matching this config's percentage mode and burned flag.
    pub fn allocator(&self) -> PercentageAllocator {
        PercentageAllocator::new(self.manual_percentage_control, self.generate_burned_areas)
    }

    /// Check every precondition of a pass before any raster is allocated.
    pub fn validate(&self) -> Result<()> {
        self.prepare().map(|_| ())
    }

    /// Validate and resolve the weights and threshold table for a pass.
    /// Randomized weights are drawn once here.
    pub fn prepare(&self) -> Result<(PercentageSpec, ThresholdTable)> {
        if self.map_width <= 1 || self.map_height <= 1 {
            return Err(Error::InvalidDimension(format!(
                "map is {}x{}, both sides must be greater than 1",
                self.map_width, self.map_height
            )));
        }
        self.mesh.validate()?;
        if !self.noise_scale.is_finite() {
            return Err(Error::InvalidParameter(format!("noise_scale {} is not finite", self.noise_scale)));
        }
        if !self.water_elevation_threshold.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "water_elevation_threshold {} is not finite",
                self.water_elevation_threshold
            )));
        }
        let allocation = self.allocator().allocate(&self.percentages, self.seed)?;

        if self.noise_scale <= 0.0 {
            log::warn!("noise_scale {} is not positive; terrain will be flat or mirrored", self.noise_scale);
        }
        if !(0.0..=1.0).contains(&self.water_elevation_threshold) {
            log::warn!("water_elevation_threshold {} is outside [0, 1]", self.water_elevation_threshold);
        }
        Ok(allocation)
    }

    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generation_config_default() {
        let config = GenerationConfig::default();
        assert_eq!(config.map_width, 256);
        assert_eq!(config.map_height, 256);
        assert_eq!(config.noise_scale, 20.0);
        assert_eq!(config.seed, 42);
        assert!(!config.generate_urban_areas);
        assert!(!config.generate_burned_areas);
        assert!(config.manual_percentage_control);
        assert_eq!(config.water_elevation_threshold, 0.3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_seed() {
        let config = GenerationConfig::from_seed(7);
        assert_eq!(config.seed, 7);
        assert_eq!(config.map_width, 256);
    }

    #[test]
    fn test_validate_dimensions() {
        let config = GenerationConfig { map_width: 1, ..Default::default() };
        assert!(matches!(config.validate(), Err(Error::InvalidDimension(_))));

        let config = GenerationConfig { map_height: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(Error::InvalidDimension(_))));

        let mut config = GenerationConfig::default();
        config.mesh.resolution = 1;
        assert!(matches!(config.validate(), Err(Error::InvalidDimension(_))));
    }

    #[test]
    fn test_validate_percentages() {
        let mut config = GenerationConfig::default();
        config.percentages.sparse = -3.0;
        assert!(matches!(config.validate(), Err(Error::InvalidPercentage(_))));

        let config = GenerationConfig {
            percentages: PercentageSpec::from_weights([0.0; 9]),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidPercentage(_))));
    }

    #[test]
    fn test_randomized_ignores_manual_weights() {
        let config = GenerationConfig {
            manual_percentage_control: false,
            percentages: PercentageSpec::from_weights([0.0; 9]),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("configs").join("landscape.json");

        let config = GenerationConfig {
            seed: 1234,
            map_width: 64,
            generate_urban_areas: true,
            ..Default::default()
        };
        config.save(&path).expect("save failed");

        let loaded = GenerationConfig::load(&path).expect("load failed");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GenerationConfig =
            serde_json::from_str(r#"{ "seed": 5, "percentages": { "urban": 30.0 } }"#).unwrap();
        assert_eq!(config.seed, 5);
        assert_eq!(config.map_width, 256);
        assert_eq!(config.percentages.urban, 30.0);
        assert_eq!(config.percentages.sparse, 10.0);
        assert_eq!(config.mesh.resolution, 256);
    }

    #[test]
    fn test_non_finite_parameters_rejected() {
        for scale in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let config = GenerationConfig { noise_scale: scale, ..Default::default() };
            assert!(matches!(config.validate(), Err(Error::InvalidParameter(_))), "scale {}", scale);
        }
        let config = GenerationConfig { water_elevation_threshold: f32::NAN, ..Default::default() };
        assert!(matches!(config.validate(), Err(Error::InvalidParameter(_))));

        // Large but finite scales are legal
        let config = GenerationConfig { noise_scale: -1.0e19, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_prepare_randomized_matches_allocator() {
        let config = GenerationConfig { manual_percentage_control: false, seed: -9, ..Default::default() };
        let (weights, table) = config.prepare().unwrap();
        let (expected, expected_table) = config.allocator().allocate(&config.percentages, -9).unwrap();
        assert_eq!(weights, expected);
        assert_eq!(table, expected_table);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let err = GenerationConfig::load(&temp_dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
