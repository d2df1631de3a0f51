// src/placement/cell_count.rs

//! Density → cell count conversion.
//!
//! Densities are cells per mm³, so the expected count of a voxel is
//! `density * density_factor * voxel_volume_mm3`. Only the sum is rounded
//! (half to even); the integer count of each voxel then comes from a
//! largest-remainder allocation that adds up to exactly that total.

/// Expected cell counts of a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CellCounts {
    /// Expected (fractional) count per voxel, same order as the density values.
    pub per_voxel: Vec<f64>,
    /// Rounded sum of `per_voxel`.
    pub total: usize,
}

impl CellCounts {
    /// Integer count per voxel, summing to `total`.
    pub fn allocate(&self) -> Vec<usize> {
        allocate(&self.per_voxel, self.total)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Expected cell count per voxel and the rounded total.
pub fn estimate(raw: &[f64], voxel_volume_mm3: f64, density_factor: f64) -> CellCounts {
    let per_voxel: Vec<f64> = raw
        .iter()
        .map(|density| density * density_factor * voxel_volume_mm3)
        .collect();
    let sum: f64 = per_voxel.iter().sum();

    CellCounts {
        per_voxel,
        total: sum.round_ties_even().max(0.0) as usize,
    }
}

/// Largest-remainder allocation of `total` cells over the voxels.
///
/// Every voxel first gets the floor of its expected count. The missing units go
/// one by one to the voxels with the largest fractional part, restricted to voxels
/// with a positive expected count; ties keep scan order.
pub fn allocate(per_voxel: &[f64], total: usize) -> Vec<usize> {
    let mut allocation: Vec<usize> = per_voxel
        .iter()
        .map(|count| count.floor().max(0.0) as usize)
        .collect();
    let fractions: Vec<f64> = per_voxel
        .iter()
        .map(|count| (count - count.floor()).max(0.0))
        .collect();
    let assigned: usize = allocation.iter().sum();

    if assigned < total {
        let mut order: Vec<usize> = (0..per_voxel.len())
            .filter(|&i| per_voxel[i] > 0.0)
            .collect();
        order.sort_by(|&a, &b| fractions[b].total_cmp(&fractions[a]));

        for &i in order.iter().cycle().take(total - assigned) {
            allocation[i] += 1;
        }
    } else if assigned > total {
        // Only reachable through accumulated rounding error in the float sum.
        let mut order: Vec<usize> = (0..per_voxel.len())
            .filter(|&i| allocation[i] > 0)
            .collect();
        order.sort_by(|&a, &b| fractions[a].total_cmp(&fractions[b]));

        let mut excess = assigned - total;
        while excess > 0 {
            for &i in &order {
                if excess == 0 {
                    break;
                }
                if allocation[i] > 0 {
                    allocation[i] -= 1;
                    excess -= 1;
                }
            }
        }
    }

    allocation
}
