//! Fuelscape - deterministic procedural terrain and fuel-map generation

pub mod core;
pub mod terrain;
pub mod generation;
pub mod preview;

pub use crate::core::{Error, Result};
pub use generation::{generate, GenerationConfig, LandscapeBundle, LandscapeGenerator};
