// src/voxel/data.rs

use crate::math::{
    error::{MathError, MathResult},
    types::Vector3D,
    utils::indexing,
};
use crate::voxel::VoxelGrid;
use serde::{Deserialize, Serialize};

/// In-memory voxel grid holding density values (count / mm³).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoxelData {
    shape: [usize; 3],
    raw: Vec<f64>,
    voxel_dimensions: Vector3D,
    offset: Vector3D,
}

impl VoxelData {
    /// Creates a grid from flat C-order values.
    pub fn new(
        shape: [usize; 3],
        raw: Vec<f64>,
        voxel_dimensions: Vector3D,
        offset: Vector3D,
    ) -> MathResult<Self> {
        let expected = indexing::element_count(shape);
        if raw.len() != expected {
            return Err(MathError::ShapeMismatch {
                shape,
                expected,
                actual: raw.len(),
            });
        }

        Ok(Self {
            shape,
            raw,
            voxel_dimensions,
            offset,
        })
    }

    /// Grid with the same value in every voxel.
    pub fn filled(
        shape: [usize; 3],
        value: f64,
        voxel_dimensions: Vector3D,
        offset: Vector3D,
    ) -> Self {
        Self {
            shape,
            raw: vec![value; indexing::element_count(shape)],
            voxel_dimensions,
            offset,
        }
    }

    /// Grid whose values are computed from the voxel index.
    pub fn from_fn<F>(
        shape: [usize; 3],
        voxel_dimensions: Vector3D,
        offset: Vector3D,
        mut f: F,
    ) -> Self
    where
        F: FnMut([usize; 3]) -> f64,
    {
        let raw = (0..indexing::element_count(shape))
            .map(|flat| f(indexing::unravel_index(shape, flat)))
            .collect();
        Self {
            shape,
            raw,
            voxel_dimensions,
            offset,
        }
    }
}

impl VoxelGrid for VoxelData {
    fn shape(&self) -> [usize; 3] {
        self.shape
    }

    fn raw(&self) -> &[f64] {
        &self.raw
    }

    fn voxel_dimensions(&self) -> Vector3D {
        self.voxel_dimensions
    }

    fn offset(&self) -> Vector3D {
        self.offset
    }
}
