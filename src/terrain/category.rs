//! Landcover (fuel) categories

use serde::{Deserialize, Serialize};

/// Landcover categories, numbered 0..=9 in classification order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Category {
    #[default]
    Water = 0,
    Urban = 1,
    Sparse = 2,
    DryForest = 3,
    WetForest = 4,
    MixedForest = 5,
    Shrubland = 6,
    Grassland = 7,
    Burned = 8,
    Floodplain = 9,
}

impl Category {
    /// Every category in id order
    pub const ALL: [Category; 10] = [
        Category::Water,
        Category::Urban,
        Category::Sparse,
        Category::DryForest,
        Category::WetForest,
        Category::MixedForest,
        Category::Shrubland,
        Category::Grassland,
        Category::Burned,
        Category::Floodplain,
    ];

    /// Non-water categories in the order their thresholds accumulate
    pub const LAND: [Category; 9] = [
        Category::Urban,
        Category::Sparse,
        Category::DryForest,
        Category::WetForest,
        Category::MixedForest,
        Category::Shrubland,
        Category::Grassland,
        Category::Burned,
        Category::Floodplain,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    /// Convert a numeric id back to a category; `None` above 9.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Position within [`Category::LAND`]; `None` for water.
    pub fn land_index(self) -> Option<usize> {
        match self {
            Category::Water => None,
            other => Some(other as usize - 1),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Water => "water",
            Category::Urban => "urban",
            Category::Sparse => "sparse",
            Category::DryForest => "dry forest",
            Category::WetForest => "wet forest",
            Category::MixedForest => "mixed forest",
            Category::Shrubland => "shrubland",
            Category::Grassland => "grassland",
            Category::Burned => "burned",
            Category::Floodplain => "floodplain",
        }
    }

    /// Display color (RGBA, opaque)
    pub fn color(self) -> [u8; 4] {
        match self {
            Category::Water => [0x00, 0x00, 0xFF, 0xFF],
            Category::Urban => [0xFF, 0x00, 0x00, 0xFF],
            Category::Sparse => [0x80, 0x80, 0x80, 0xFF],
            Category::DryForest => [0x88, 0xCC, 0x88, 0xFF],
            Category::WetForest => [0x00, 0x64, 0x00, 0xFF],
            Category::MixedForest => [0x22, 0x8B, 0x22, 0xFF],
            Category::Shrubland => [0xC2, 0xB2, 0x80, 0xFF],
            Category::Grassland => [0xF0, 0xE6, 0x8C, 0xFF],
            Category::Burned => [0x80, 0x00, 0x80, 0xFF],
            Category::Floodplain => [0x00, 0xFF, 0xFF, 0xFF],
        }
    }

    /// Multiplier applied to the density noise for cells of this category (0.0-1.0)
    pub fn density_modifier(self) -> f32 {
        match self {
            Category::Water => 0.0,
            Category::Urban => 0.2,
            Category::Burned => 0.1,
            Category::Floodplain => 0.5,
            _ => 1.0,
        }
    }
}
