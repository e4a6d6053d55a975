//! Landscape generation pipeline. Builds every layer for one config.
//!
//! The pipeline orchestrates:
//! 1. Weight resolution and threshold table (PercentageAllocator)
//! 2. Elevation raster
//! 3. Classification, then density (needs elevation)
//! 4. Contours and mesh (need elevation only, run alongside step 3)

pub mod config;

pub use config::GenerationConfig;

use std::sync::Arc;
use std::time::Instant;

use crate::core::{Error, Result};
use crate::terrain::category::Category;
use crate::terrain::classification::{CategoryRule, Classification, ClassificationSynthesizer};
use crate::terrain::contour::ContourSynthesizer;
use crate::terrain::density::DensitySynthesizer;
use crate::terrain::elevation::ElevationSynthesizer;
use crate::terrain::mesh::{MeshParams, MeshResult, MeshSynthesizer};
use crate::terrain::noise_field::{NoiseField, PerlinField};
use crate::terrain::percentages::{PercentageSpec, ThresholdTable};
use crate::terrain::raster::Raster;

/// Result of one generation pass. Owns all of its rasters and the mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct LandscapeBundle {
    /// Config that produced this bundle (mesh params reflect the current mesh)
    pub config: GenerationConfig,
    /// Weights actually used (randomized ones when manual control is off)
    pub percentages: PercentageSpec,
    pub thresholds: ThresholdTable,
    pub elevation: Raster<f32>,
    pub classification: Classification,
    pub density: Raster<f32>,
    pub contour: Raster<f32>,
    pub mesh: MeshResult,
}

impl LandscapeBundle {
    /// Raw per-cell category grid
    pub fn categories(&self) -> &Raster<Category> {
        &self.classification.categories
    }

    /// Cells per category, indexed by category id
    pub fn category_histogram(&self) -> [usize; 10] {
        self.classification.histogram()
    }

    /// Copy of this bundle with the mesh rebuilt at new parameters
    pub fn with_mesh(&self, params: &MeshParams) -> Result<Self> {
        let mesh = MeshSynthesizer::synthesize(&self.elevation, params)?;
        let mut bundle = self.clone();
        bundle.config.mesh = params.clone();
        bundle.mesh = mesh;
        Ok(bundle)
    }
}

fn missing(stage: &str, prerequisite: &str) -> Error {
    Error::SequencingViolation(format!("{} requested before {} was generated", stage, prerequisite))
}

/// One pass run stage by stage. Each stage checks that the rasters it
/// reads already exist.
pub struct GenerationPass<'a> {
    config: &'a GenerationConfig,
    noise: &'a dyn NoiseField,
    percentages: PercentageSpec,
    rule: CategoryRule,
    elevation: Option<Raster<f32>>,
    classification: Option<Classification>,
    density: Option<Raster<f32>>,
    contour: Option<Raster<f32>>,
    mesh: Option<MeshResult>,
}

impl<'a> GenerationPass<'a> {
    /// Validate the config and resolve weights. Nothing is allocated on failure.
    pub fn new(config: &'a GenerationConfig, noise: &'a dyn NoiseField) -> Result<Self> {
        let (percentages, thresholds) = config.prepare()?;
        let rule = CategoryRule::new(thresholds, config.generate_urban_areas);

        Ok(Self {
            config,
            noise,
            percentages,
            rule,
            elevation: None,
            classification: None,
            density: None,
            contour: None,
            mesh: None,
        })
    }

    pub fn percentages(&self) -> &PercentageSpec {
        &self.percentages
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        self.rule.table()
    }

    fn classifier(&self) -> ClassificationSynthesizer<'_> {
        ClassificationSynthesizer::new(
            self.noise,
            self.config.noise_scale,
            self.config.seed,
            self.config.water_elevation_threshold,
            self.rule.clone(),
        )
    }

    fn density_synth(&self) -> DensitySynthesizer<'_> {
        DensitySynthesizer::new(self.noise, self.config.noise_scale, self.config.seed)
    }

    pub fn run_elevation(&mut self) -> &Raster<f32> {
        let raster = ElevationSynthesizer::new(self.noise, self.config.noise_scale, self.config.seed)
            .synthesize(self.config.map_width, self.config.map_height);
        self.elevation.insert(raster)
    }

    pub fn run_classification(&mut self) -> Result<&Classification> {
        let elevation = self.elevation.as_ref().ok_or_else(|| missing("classification", "elevation"))?;
        let classification = self.classifier().synthesize(elevation);
        Ok(&*self.classification.insert(classification))
    }

    pub fn run_density(&mut self) -> Result<&Raster<f32>> {
        let classification = self
            .classification
            .as_ref()
            .ok_or_else(|| missing("density", "classification"))?;
        let density = self.density_synth().synthesize(&classification.categories);
        Ok(&*self.density.insert(density))
    }

    pub fn run_contour(&mut self) -> Result<&Raster<f32>> {
        let elevation = self.elevation.as_ref().ok_or_else(|| missing("contour", "elevation"))?;
        let contour = ContourSynthesizer::synthesize(elevation);
        Ok(&*self.contour.insert(contour))
    }

    pub fn run_mesh(&mut self) -> Result<&MeshResult> {
        let elevation = self.elevation.as_ref().ok_or_else(|| missing("mesh", "elevation"))?;
        let mesh = MeshSynthesizer::synthesize(elevation, &self.config.mesh)?;
        Ok(&*self.mesh.insert(mesh))
    }

    /// Run every stage that depends on elevation. Classification and
    /// density run on one rayon arm, contours and mesh on the other.
    pub fn run_dependents(&mut self) -> Result<()> {
        let elevation = self
            .elevation
            .as_ref()
            .ok_or_else(|| missing("classification", "elevation"))?;

        let this = &*self;
        let ((classification, density), (contour, mesh)) = rayon::join(
            || {
                let classification = this.classifier().synthesize(elevation);
                let density = this.density_synth().synthesize(&classification.categories);
                (classification, density)
            },
            || {
                let contour = ContourSynthesizer::synthesize(elevation);
                let mesh = MeshSynthesizer::synthesize(elevation, &this.config.mesh);
                (contour, mesh)
            },
        );

        let mesh = mesh?;
        self.classification = Some(classification);
        self.density = Some(density);
        self.contour = Some(contour);
        self.mesh = Some(mesh);
        Ok(())
    }

    /// Assemble the bundle. Fails if any stage has not run.
    pub fn finish(self) -> Result<LandscapeBundle> {
        let elevation = self.elevation.ok_or_else(|| missing("bundle", "elevation"))?;
        let classification = self.classification.ok_or_else(|| missing("bundle", "classification"))?;
        let density = self.density.ok_or_else(|| missing("bundle", "density"))?;
        let contour = self.contour.ok_or_else(|| missing("bundle", "contour"))?;
        let mesh = self.mesh.ok_or_else(|| missing("bundle", "mesh"))?;

        elevation.ensure_same_size(&classification.categories, "classification")?;
        elevation.ensure_same_size(&density, "density")?;
        elevation.ensure_same_size(&contour, "contour")?;

        Ok(LandscapeBundle {
            config: self.config.clone(),
            percentages: self.percentages,
            thresholds: self.rule.table().clone(),
            elevation,
            classification,
            density,
            contour,
            mesh,
        })
    }
}

/// Generate a full bundle with the default Perlin field.
pub fn generate(config: &GenerationConfig) -> Result<LandscapeBundle> {
    generate_with(config, &PerlinField::default())
}

/// Generate a full bundle with a caller-supplied noise field.
pub fn generate_with(config: &GenerationConfig, noise: &dyn NoiseField) -> Result<LandscapeBundle> {
    let start = Instant::now();

    let mut pass = GenerationPass::new(config, noise)?;
    pass.run_elevation();
    pass.run_dependents()?;
    let bundle = pass.finish()?;

    log::info!("Generated {}x{} landscape (seed {}, mesh {}x{}) in {:.1}ms",
        config.map_width, config.map_height, config.seed,
        config.mesh.resolution, config.mesh.resolution,
        start.elapsed().as_secs_f64() * 1000.0);

    Ok(bundle)
}

/// Keeps the last successful bundle. A failed pass leaves it untouched.
///
/// Methods take `&mut self`, so one generator runs one pass at a time.
pub struct LandscapeGenerator {
    noise: Box<dyn NoiseField>,
    last: Option<Arc<LandscapeBundle>>,
}

impl Default for LandscapeGenerator {
    fn default() -> Self {
        Self::new(Box::new(PerlinField::default()))
    }
}

impl LandscapeGenerator {
    pub fn new(noise: Box<dyn NoiseField>) -> Self {
        Self { noise, last: None }
    }

    /// Last successful bundle, if any
    pub fn last(&self) -> Option<Arc<LandscapeBundle>> {
        self.last.clone()
    }

    /// Run a full pass and keep its bundle.
    pub fn generate(&mut self, config: &GenerationConfig) -> Result<Arc<LandscapeBundle>> {
        let bundle = Arc::new(generate_with(config, self.noise.as_ref())?);
        self.last = Some(Arc::clone(&bundle));
        Ok(bundle)
    }

    /// Rebuild only the mesh of the last bundle.
    pub fn regenerate_mesh(&mut self, params: &MeshParams) -> Result<Arc<LandscapeBundle>> {
        let last = self.last.as_ref().ok_or_else(|| missing("mesh regeneration", "elevation"))?;
        let bundle = Arc::new(last.with_mesh(params)?);
        log::info!("Regenerated mesh at {}x{}", params.resolution, params.resolution);
        self.last = Some(Arc::clone(&bundle));
        Ok(bundle)
    }
}
