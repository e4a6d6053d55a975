//! Contour-banded elevation for topographic display

use super::raster::Raster;

/// Elevation spacing between contour lines
pub const CONTOUR_INTERVAL: f32 = 0.05;
/// Half-width of a contour band around the interval midpoint
pub const CONTOUR_HALF_WIDTH: f32 = 0.005;
/// Value written for cells on a contour line
pub const CONTOUR_LINE_VALUE: f32 = 1.0;

/// Contour value for a single elevation: 1.0 on a band, else the elevation.
pub fn contour_value(elevation: f32) -> f32 {
    let m = elevation.rem_euclid(CONTOUR_INTERVAL);
    if (m - CONTOUR_INTERVAL / 2.0).abs() < CONTOUR_HALF_WIDTH {
        CONTOUR_LINE_VALUE
    } else {
        elevation
    }
}

/// Builds the contour raster from elevation alone
pub struct ContourSynthesizer;

impl ContourSynthesizer {
    pub fn synthesize(elevation: &Raster<f32>) -> Raster<f32> {
        log::debug!("Synthesizing {}x{} contours", elevation.width(), elevation.height());
        elevation.par_map(|_, _, &e| contour_value(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_centers() {
        assert_eq!(contour_value(0.025), 1.0);
        assert_eq!(contour_value(0.525), 1.0);
        assert_eq!(contour_value(0.028), 1.0);
    }

    #[test]
    fn test_off_band_passthrough() {
        assert_eq!(contour_value(0.0), 0.0);
        assert_eq!(contour_value(0.05), 0.05);
        assert_eq!(contour_value(0.61), 0.61);
        assert_eq!(contour_value(0.035), 0.035);
    }

    #[test]
    fn test_negative_uses_euclidean_modulo() {
        // -0.025 mod 0.05 = 0.025, which is on a band
        assert_eq!(contour_value(-0.025), 1.0);
    }

    #[test]
    fn test_raster() {
        let elevation = Raster::from_vec(3, 1, vec![0.125, 0.2, 0.976]).unwrap();
        let contour = ContourSynthesizer::synthesize(&elevation);
        assert_eq!(contour.as_slice(), &[1.0, 0.2, 1.0]);
    }

    #[test]
    fn test_matches_rule_everywhere() {
        for i in 0..=1000 {
            let e = i as f32 / 1000.0;
            let m = e.rem_euclid(0.05);
            let expected = if (m - 0.025).abs() < 0.005 { 1.0 } else { e };
            assert_eq!(contour_value(e), expected);
        }
    }
}
