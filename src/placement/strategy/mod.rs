// src/placement/strategy/mod.rs

pub mod poisson_disc;
pub mod uniform;

pub use poisson_disc::{PoissonDiscOptions, PoissonDiscPlacement, poisson_seed_point};
pub use uniform::UniformPlacement;

use crate::math::types::{Point3D, Vector3D};
use crate::placement::{cell_count::CellCounts, config::PlacementMethod, error::PlacementResult};
use crate::voxel::VoxelGrid;
use rand::Rng;

/// Turns per-voxel cell counts into positions.
pub trait PlacementStrategy {
    fn method(&self) -> PlacementMethod;

    /// Places exactly `counts.total` cells inside the voxels of `grid`.
    fn place<G, R>(
        &self,
        grid: &G,
        counts: &CellCounts,
        rng: &mut R,
    ) -> PlacementResult<Vec<Point3D>>
    where
        G: VoxelGrid + ?Sized,
        R: Rng + ?Sized;
}

/// Uniform random point in the box `[corner, corner + voxel_dimensions)`.
pub(crate) fn random_point_in_voxel<R: Rng + ?Sized>(
    corner: Point3D,
    voxel_dimensions: &Vector3D,
    rng: &mut R,
) -> Point3D {
    let u = Vector3D::new(rng.random(), rng.random(), rng.random());
    corner + u.component_mul(voxel_dimensions)
}

/// Index of the voxel containing `point`, `None` outside the grid.
pub fn voxel_index_of<G: VoxelGrid + ?Sized>(grid: &G, point: &Point3D) -> Option<[usize; 3]> {
    let shape = grid.shape();
    let relative = (point.coords - grid.offset()).component_div(&grid.voxel_dimensions());

    let mut index = [0usize; 3];
    for axis in 0..3 {
        let cell = relative[axis].floor();
        if !(cell >= 0.0 && cell < shape[axis] as f64) {
            return None;
        }
        index[axis] = cell as usize;
    }
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxel::VoxelData;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_point_stays_in_voxel() {
        let mut rng = StdRng::seed_from_u64(1);
        let corner = Point3D::new(10.0, -5.0, 0.0);
        let dims = Vector3D::new(1.0, 2.0, 3.0);

        for _ in 0..200 {
            let p = random_point_in_voxel(corner, &dims, &mut rng);
            assert!(p.x >= 10.0 && p.x <= 11.0);
            assert!(p.y >= -5.0 && p.y <= -3.0);
            assert!(p.z >= 0.0 && p.z <= 3.0);
        }
    }

    #[test]
    fn test_voxel_index_of() {
        let grid = VoxelData::filled(
            [2, 3, 4],
            0.0,
            Vector3D::repeat(10.0),
            Vector3D::new(100.0, 0.0, -20.0),
        );

        assert_eq!(voxel_index_of(&grid, &Point3D::new(100.0, 0.0, -20.0)), Some([0, 0, 0]));
        assert_eq!(voxel_index_of(&grid, &Point3D::new(115.0, 29.9, 19.9)), Some([1, 2, 3]));
        assert_eq!(voxel_index_of(&grid, &Point3D::new(120.0, 5.0, 0.0)), None);
        assert_eq!(voxel_index_of(&grid, &Point3D::new(105.0, -0.1, 0.0)), None);
    }
}
