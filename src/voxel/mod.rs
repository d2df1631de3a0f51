// src/voxel/mod.rs

//! Voxel grid contract consumed by the placement engine.
//!
//! Loading grids from disk is left to the host application; anything that can
//! expose a dense density array together with its geometry can implement
//! [`VoxelGrid`]. [`VoxelData`] is the in-memory implementation used by the
//! crate's own tests and by callers that already hold the values.

pub mod data;

pub use data::VoxelData;

use crate::math::{
    types::{Bounds3D, Point3D, Vector3D},
    utils::{constants::UM3_PER_MM3, indexing},
};

/// A dense 3D scalar field on an axis-aligned grid.
///
/// Values are stored flat in C order (the last axis varies fastest), which is
/// also the scan order used for every tie-break in the crate.
pub trait VoxelGrid {
    /// Number of voxels per axis.
    fn shape(&self) -> [usize; 3];

    /// Flat voxel values, `shape[0] * shape[1] * shape[2]` entries.
    fn raw(&self) -> &[f64];

    /// Edge lengths of a single voxel in µm.
    fn voxel_dimensions(&self) -> Vector3D;

    /// World position of the grid's origin corner.
    fn offset(&self) -> Vector3D;

    /// Volume of one voxel in µm³.
    fn voxel_volume(&self) -> f64 {
        self.voxel_dimensions().abs().product()
    }

    /// Volume of one voxel in mm³, the unit the densities refer to.
    fn voxel_volume_mm3(&self) -> f64 {
        self.voxel_volume() / UM3_PER_MM3
    }

    /// World position of the lower corner of voxel `index`.
    fn indices_to_positions(&self, index: [usize; 3]) -> Point3D {
        let index = Vector3D::new(index[0] as f64, index[1] as f64, index[2] as f64);
        Point3D::from(self.offset() + index.component_mul(&self.voxel_dimensions()))
    }

    /// World-space box spanned by the whole grid.
    fn bbox(&self) -> Bounds3D {
        let shape = self.shape();
        let extent = Vector3D::new(shape[0] as f64, shape[1] as f64, shape[2] as f64)
            .component_mul(&self.voxel_dimensions());
        let origin = Point3D::from(self.offset());
        Bounds3D::from_points(origin, origin + extent)
    }

    fn voxel_count(&self) -> usize {
        indexing::element_count(self.shape())
    }
}
