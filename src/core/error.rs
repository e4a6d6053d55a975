//! Error types for fuelscape

use thiserror::Error;

/// Main error type for landscape generation
#[derive(Debug, Error)]
pub enum Error {
    /// Map width/height or mesh resolution too small, or rasters that
    /// should share a size do not.
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    /// Negative category weight, or no weight left to distribute.
    #[error("Invalid percentage: {0}")]
    InvalidPercentage(String),

    /// A numeric parameter that no pass can sample with, such as a NaN or
    /// infinite noise scale.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A stage ran before the raster it depends on existed.
    #[error("Sequencing violation: {0}")]
    SequencingViolation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}
