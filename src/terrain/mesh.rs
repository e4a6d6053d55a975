//! Regular-grid triangle mesh sampled from an elevation raster

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use super::raster::Raster;

/// Largest grid side whose vertex indices still fit in `u32`
const MAX_RESOLUTION: usize = 65_536;

/// Mesh geometry parameters. Resolution is independent of the raster size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshParams {
    /// Vertices per side (>= 2)
    pub resolution: usize,
    /// Side length of the square plane, centered at the origin
    pub plane_size: f32,
    /// Elevation in [0, 1] is multiplied by this to get vertex height
    pub elevation_multiplier: f32,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            resolution: 256,
            plane_size: 10.0,
            elevation_multiplier: 10.0,
        }
    }
}

impl MeshParams {
    pub fn validate(&self) -> Result<()> {
        if self.resolution < 2 || self.resolution > MAX_RESOLUTION {
            return Err(Error::InvalidDimension(format!(
                "mesh resolution {} must be between 2 and {}",
                self.resolution, MAX_RESOLUTION
            )));
        }
        Ok(())
    }
}

/// Interleaved vertex for GPU upload
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Triangulated terrain surface. Owns copies of the sampled heights.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshResult {
    pub resolution: usize,
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    /// Three indices per triangle
    pub indices: Vec<u32>,
    pub normals: Vec<Vec3>,
}

impl MeshResult {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex at grid point (x, y)
    pub fn position_at(&self, x: usize, y: usize) -> Vec3 {
        self.positions[y * self.resolution + x]
    }

    /// Positions, normals and UVs packed per vertex
    pub fn interleaved(&self) -> Vec<MeshVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .map(|((p, n), uv)| MeshVertex {
                position: p.to_array(),
                normal: n.to_array(),
                uv: uv.to_array(),
            })
            .collect()
    }

    /// Interleaved vertices as raw bytes
    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.interleaved()).to_vec()
    }
}

/// Builds a mesh from a finished elevation raster
pub struct MeshSynthesizer;

impl MeshSynthesizer {
    pub fn synthesize(elevation: &Raster<f32>, params: &MeshParams) -> Result<MeshResult> {
        params.validate()?;
        if elevation.width() == 0 || elevation.height() == 0 {
            return Err(Error::InvalidDimension(format!(
                "cannot mesh an empty {}x{} elevation raster",
                elevation.width(),
                elevation.height()
            )));
        }

        let r = params.resolution;
        log::debug!("Building {}x{} mesh from {}x{} elevation",
            r, r, elevation.width(), elevation.height());

        let step = 1.0 / (r - 1) as f32;
        let mut positions = vec![Vec3::ZERO; r * r];
        let mut uvs = vec![Vec2::ZERO; r * r];

        positions
            .par_chunks_mut(r)
            .zip(uvs.par_chunks_mut(r))
            .enumerate()
            .for_each(|(y, (pos_row, uv_row))| {
                let v = y as f32 * step;
                for x in 0..r {
                    let u = x as f32 * step;
                    let height = elevation.sample_bilinear(u, v) * params.elevation_multiplier;
                    pos_row[x] = Vec3::new(
                        (u - 0.5) * params.plane_size,
                        height,
                        (v - 0.5) * params.plane_size,
                    );
                    uv_row[x] = Vec2::new(u, v);
                }
            });

        let indices = grid_indices(r);
        let normals = vertex_normals(&positions, &indices);

        Ok(MeshResult {
            resolution: r,
            positions,
            uvs,
            indices,
            normals,
        })
    }
}

/// Two triangles per quad: (current, next, current + 1) and
/// (current + 1, next, next + 1), where `next` is the vertex one row down.
fn grid_indices(r: usize) -> Vec<u32> {
    let mut indices = Vec::with_capacity((r - 1) * (r - 1) * 6);
    for y in 0..r - 1 {
        for x in 0..r - 1 {
            let current = (y * r + x) as u32;
            let next = current + r as u32;

            indices.extend_from_slice(&[current, next, current + 1]);
            indices.extend_from_slice(&[current + 1, next, next + 1]);
        }
    }
    indices
}

/// Area-weighted face normals accumulated per vertex, then normalized
fn vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }
    normals
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y))
        .collect()
}
