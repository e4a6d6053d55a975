//! Procedural terrain synthesis
//!
//! Leaf-first: a seeded [`NoiseField`] feeds every synthesizer. Elevation
//! comes first; classification reads elevation and a [`ThresholdTable`];
//! density reads the classification. Contours and the mesh only need the
//! finished elevation raster.

pub mod noise_field;
pub use noise_field::{NoiseField, PerlinField};

pub mod raster;
pub use raster::Raster;

pub mod category;
pub use category::Category;

pub mod percentages;
pub use percentages::{PercentageAllocator, PercentageSpec, ThresholdTable};

pub mod elevation;
pub use elevation::ElevationSynthesizer;

pub mod classification;
pub use classification::{CategoryRule, Classification, ClassificationSynthesizer};

pub mod density;
pub use density::DensitySynthesizer;

pub mod contour;
pub use contour::ContourSynthesizer;

pub mod mesh;
pub use mesh::{MeshParams, MeshResult, MeshSynthesizer, MeshVertex};
