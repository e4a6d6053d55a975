//! Layer previews as RGBA images

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

use crate::core::Result;
use crate::generation::LandscapeBundle;
use crate::terrain::raster::Raster;

/// Displayable layers of a bundle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    Elevation,
    Classification,
    Density,
    Contour,
}

impl Layer {
    pub const ALL: [Layer; 4] = [
        Layer::Elevation,
        Layer::Classification,
        Layer::Density,
        Layer::Contour,
    ];

    /// File stem used when exporting
    pub fn file_stem(self) -> &'static str {
        match self {
            Layer::Elevation => "elevation",
            Layer::Classification => "classification",
            Layer::Density => "density",
            Layer::Contour => "contour",
        }
    }
}

fn grayscale(raster: &Raster<f32>) -> RgbaImage {
    RgbaImage::from_fn(raster.width() as u32, raster.height() as u32, |x, y| {
        let v = (raster.get(x as usize, y as usize).clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba([v, v, v, 255])
    })
}

fn colored(raster: &Raster<[u8; 4]>) -> RgbaImage {
    RgbaImage::from_fn(raster.width() as u32, raster.height() as u32, |x, y| {
        Rgba(*raster.get(x as usize, y as usize))
    })
}

/// Render one layer. Scalar layers are grayscale, classification uses
/// category colors.
pub fn render_layer(bundle: &LandscapeBundle, layer: Layer) -> RgbaImage {
    match layer {
        Layer::Elevation => grayscale(&bundle.elevation),
        Layer::Classification => colored(&bundle.classification.colors),
        Layer::Density => grayscale(&bundle.density),
        Layer::Contour => grayscale(&bundle.contour),
    }
}

/// Write every layer as `<dir>/<layer>.png`. Returns the written paths.
pub fn save_layers(bundle: &LandscapeBundle, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(Layer::ALL.len());
    for layer in Layer::ALL {
        let path = dir.join(format!("{}.png", layer.file_stem()));
        render_layer(bundle, layer).save(&path)?;
        log::debug!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{generate_with, GenerationConfig};
    use crate::terrain::category::Category;
    use crate::terrain::mesh::MeshParams;
    use tempfile::TempDir;

    fn small_bundle() -> LandscapeBundle {
        let noise = |x: f64, y: f64, _seed: i32| ((x * 0.37 + y * 0.11).sin() * 0.5 + 0.5) as f32;
        let config = GenerationConfig {
            map_width: 12,
            map_height: 9,
            noise_scale: 4.0,
            mesh: MeshParams { resolution: 4, ..Default::default() },
            ..Default::default()
        };
        generate_with(&config, &noise).unwrap()
    }

    #[test]
    fn test_render_dimensions() {
        let bundle = small_bundle();
        for layer in Layer::ALL {
            let img = render_layer(&bundle, layer);
            assert_eq!(img.dimensions(), (12, 9));
        }
    }

    #[test]
    fn test_classification_colors() {
        let bundle = small_bundle();
        let img = render_layer(&bundle, Layer::Classification);
        for (x, y, cat) in bundle.categories().iter() {
            assert_eq!(img.get_pixel(x as u32, y as u32).0, cat.color());
        }
        let water = bundle.categories().iter().find(|(_, _, c)| **c == Category::Water);
        if let Some((x, y, _)) = water {
            assert_eq!(img.get_pixel(x as u32, y as u32).0, [0, 0, 255, 255]);
        }
    }

    #[test]
    fn test_grayscale_values() {
        let bundle = small_bundle();
        let img = render_layer(&bundle, Layer::Elevation);
        let e = *bundle.elevation.get(3, 4);
        let px = img.get_pixel(3, 4).0;
        assert_eq!(px[0], (e * 255.0).round() as u8);
        assert_eq!(px[0], px[1]);
        assert_eq!(px[3], 255);
    }

    #[test]
    fn test_save_layers() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let out = temp_dir.path().join("preview");
        let written = save_layers(&small_bundle(), &out).expect("save failed");
        assert_eq!(written.len(), 4);
        for path in &written {
            assert!(path.exists(), "{} missing", path.display());
        }
        let reloaded = image::open(out.join("classification.png")).unwrap();
        assert_eq!((reloaded.width(), reloaded.height()), (12, 9));
    }
}
