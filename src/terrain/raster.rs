//! Row-major 2D grids shared by every synthesizer

use rayon::prelude::*;

use crate::core::{Error, Result};

/// A width x height grid stored row-major (`y * width + x`).
#[derive(Clone, Debug, PartialEq)]
pub struct Raster<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Clone> Raster<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }
}

impl<T> Raster<T> {
    /// Wrap existing row-major data. Fails if the length does not match.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != width * height {
            return Err(Error::InvalidDimension(format!(
                "{} values cannot fill a {}x{} raster",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// (width, height)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Row-major cell values
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width;
        self.data.iter().enumerate().map(move |(idx, val)| {
            (idx % width, idx / width, val)
        })
    }

    /// Fails with `InvalidDimension` unless `other` has the same size.
    pub fn ensure_same_size<U>(&self, other: &Raster<U>, what: &str) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::InvalidDimension(format!(
                "{} is {}x{}, expected {}x{}",
                what, other.width, other.height, self.width, self.height
            )));
        }
        Ok(())
    }
}

impl<T: Send> Raster<T> {
    /// Build a raster by evaluating `f(x, y)` for every cell, one row per
    /// rayon task.
    pub fn par_from_fn<F>(width: usize, height: usize, f: F) -> Self
    where
        T: Default + Clone,
        F: Fn(usize, usize) -> T + Send + Sync,
    {
        let mut data = vec![T::default(); width * height];
        data.par_chunks_mut(width.max(1))
            .enumerate()
            .for_each(|(y, row)| {
                for (x, cell) in row.iter_mut().enumerate() {
                    *cell = f(x, y);
                }
            });
        Self { width, height, data }
    }
}

impl<T: Sync> Raster<T> {
    /// Build a new raster of the same size from each cell of this one.
    pub fn par_map<U, F>(&self, f: F) -> Raster<U>
    where
        U: Send + Default + Clone,
        F: Fn(usize, usize, &T) -> U + Send + Sync,
    {
        Raster::par_from_fn(self.width, self.height, |x, y| f(x, y, self.get(x, y)))
    }
}

impl Raster<f32> {
    /// Bilinear sample with `u, v` in [0, 1] spanning the whole raster:
    /// `(0, 0)` is the first cell and `(1, 1)` the last. Out-of-range
    /// coordinates clamp to the edge.
    pub fn sample_bilinear(&self, u: f32, v: f32) -> f32 {
        let fx = u.clamp(0.0, 1.0) * (self.width - 1) as f32;
        let fy = v.clamp(0.0, 1.0) * (self.height - 1) as f32;

        let x0 = fx.floor() as usize;
        let y0 = fy.floor() as usize;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let tx = fx - x0 as f32;
        let ty = fy - y0 as f32;

        let top = lerp(*self.get(x0, y0), *self.get(x1, y0), tx);
        let bottom = lerp(*self.get(x0, y1), *self.get(x1, y1), tx);
        lerp(top, bottom, ty)
    }

    /// (min, max) over all cells
    pub fn min_max(&self) -> (f32, f32) {
        self.data.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Raster<f32> {
        // 3x2: value = x + 10 * y
        Raster::from_vec(3, 2, vec![0.0, 1.0, 2.0, 10.0, 11.0, 12.0]).unwrap()
    }

    #[test]
    fn test_row_major_layout() {
        let r = ramp();
        assert_eq!(*r.get(2, 0), 2.0);
        assert_eq!(*r.get(0, 1), 10.0);
        assert_eq!(r.dimensions(), (3, 2));
    }

    #[test]
    fn test_from_vec_wrong_length() {
        let err = Raster::from_vec(3, 3, vec![0.0_f32; 8]).unwrap_err();
        assert!(matches!(err, Error::InvalidDimension(_)));
    }

    #[test]
    fn test_par_from_fn_matches_sequential() {
        let r = Raster::par_from_fn(5, 4, |x, y| (x * 100 + y) as u32);
        for (x, y, &v) in r.iter() {
            assert_eq!(v, (x * 100 + y) as u32);
        }
    }

    #[test]
    fn test_par_map() {
        let r = ramp();
        let doubled = r.par_map(|_, _, &v| v * 2.0);
        assert_eq!(*doubled.get(1, 1), 22.0);
    }

    #[test]
    fn test_bilinear_corners() {
        let r = ramp();
        assert_eq!(r.sample_bilinear(0.0, 0.0), 0.0);
        assert_eq!(r.sample_bilinear(1.0, 0.0), 2.0);
        assert_eq!(r.sample_bilinear(0.0, 1.0), 10.0);
        assert_eq!(r.sample_bilinear(1.0, 1.0), 12.0);
    }

    #[test]
    fn test_bilinear_interpolates() {
        let r = ramp();
        let mid = r.sample_bilinear(0.25, 0.5);
        assert!((mid - 5.5).abs() < 1e-5, "got {}", mid);
    }

    #[test]
    fn test_bilinear_clamps() {
        let r = ramp();
        assert_eq!(r.sample_bilinear(-1.0, 2.0), 10.0);
    }

    #[test]
    fn test_ensure_same_size() {
        let a = Raster::new_with(4, 4, 0.0_f32);
        let b = Raster::new_with(4, 4, 0_u8);
        let c = Raster::new_with(4, 3, 0_u8);
        assert!(a.ensure_same_size(&b, "b").is_ok());
        assert!(matches!(a.ensure_same_size(&c, "c"), Err(Error::InvalidDimension(_))));
    }

    #[test]
    fn test_min_max() {
        assert_eq!(ramp().min_max(), (0.0, 12.0));
    }
}
