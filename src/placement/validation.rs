// src/placement/validation.rs

use crate::math::{types::Vector3D, utils::comparison, utils::indexing};
use crate::placement::error::{PlacementError, PlacementResult};
use crate::voxel::VoxelGrid;

/// Rejects grids with any negative or non-finite density.
pub fn validate_density<G: VoxelGrid + ?Sized>(grid: &G) -> PlacementResult<()> {
    let mut invalid = grid
        .raw()
        .iter()
        .enumerate()
        .filter(|(_, density)| !density.is_finite() || **density < 0.0);

    let Some((first, _)) = invalid.next() else {
        return Ok(());
    };

    Err(PlacementError::InvalidDensity {
        count: 1 + invalid.count(),
        first_index: indexing::unravel_index(grid.shape(), first),
    })
}

/// Voxel edges must be finite and strictly positive.
pub fn validate_voxel_dimensions(voxel_dimensions: &Vector3D) -> PlacementResult<()> {
    if voxel_dimensions
        .iter()
        .any(|edge| !edge.is_finite() || *edge <= 0.0)
    {
        return Err(PlacementError::Geometry {
            message: format!(
                "voxel dimensions must be strictly positive, got {:?}",
                voxel_dimensions.as_slice()
            ),
        });
    }
    Ok(())
}

/// Voxels must be (nearly) cubic for strategies that assume isotropic spacing.
pub fn ensure_cubic_voxels(voxel_dimensions: &Vector3D) -> PlacementResult<()> {
    let [a, b, c] = [
        voxel_dimensions.x.abs(),
        voxel_dimensions.y.abs(),
        voxel_dimensions.z.abs(),
    ];

    if comparison::is_close(a, b) && comparison::is_close(a, c) {
        Ok(())
    } else {
        Err(PlacementError::Geometry {
            message: format!("voxels are not cubic: {} x {} x {}", a, b, c),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxel::VoxelData;

    #[test]
    fn test_negative_density_reported() {
        let mut raw = vec![1.0; 8];
        raw[5] = -0.5;
        raw[7] = -2.0;
        let grid =
            VoxelData::new([2, 2, 2], raw, Vector3D::repeat(1.0), Vector3D::zeros()).unwrap();

        assert_eq!(
            validate_density(&grid),
            Err(PlacementError::InvalidDensity {
                count: 2,
                first_index: [1, 0, 1],
            })
        );
    }

    #[test]
    fn test_nan_density_rejected() {
        let grid = VoxelData::filled([1, 1, 2], f64::NAN, Vector3D::repeat(1.0), Vector3D::zeros());
        assert!(matches!(
            validate_density(&grid),
            Err(PlacementError::InvalidDensity { count: 2, .. })
        ));
    }

    #[test]
    fn test_infinite_density_rejected() {
        let mut raw = vec![2.0; 8];
        raw[6] = f64::INFINITY;
        let grid =
            VoxelData::new([2, 2, 2], raw, Vector3D::repeat(1.0), Vector3D::zeros()).unwrap();

        assert_eq!(
            validate_density(&grid),
            Err(PlacementError::InvalidDensity {
                count: 1,
                first_index: [1, 1, 0],
            })
        );
    }

    #[test]
    fn test_zero_density_is_valid() {
        let grid = VoxelData::filled([3, 3, 3], 0.0, Vector3D::repeat(1.0), Vector3D::zeros());
        assert!(validate_density(&grid).is_ok());
    }

    #[test]
    fn test_voxel_dimensions() {
        assert!(validate_voxel_dimensions(&Vector3D::new(1.0, 2.0, 3.0)).is_ok());
        assert!(validate_voxel_dimensions(&Vector3D::new(1.0, 0.0, 3.0)).is_err());
        assert!(validate_voxel_dimensions(&Vector3D::new(-1.0, 1.0, 1.0)).is_err());
        assert!(validate_voxel_dimensions(&Vector3D::new(1.0, f64::NAN, 1.0)).is_err());
    }

    #[test]
    fn test_cubic_voxels() {
        assert!(ensure_cubic_voxels(&Vector3D::repeat(25.0)).is_ok());
        assert!(ensure_cubic_voxels(&Vector3D::new(25.0, 25.0 + 1e-6, -25.0)).is_ok());
        assert!(matches!(
            ensure_cubic_voxels(&Vector3D::new(25.0, 25.0, 30.0)),
            Err(PlacementError::Geometry { .. })
        ));
    }
}
