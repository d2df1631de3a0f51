// src/placement/strategy/poisson_disc.rs

//! Poisson disc placement with a density-modulated minimum distance.
//!
//! Every voxel gets the same integer number of cells as with uniform placement,
//! but cells keep a minimum distance of
//! `distance_factor * edge / cbrt(expected_count)` from each other, so dense
//! voxels pack tighter than sparse ones. Sampling is dart throwing around an
//! active list, started at the centre of the sparsest voxel so the sampler does
//! not get stuck in dense regions first.

use super::{PlacementStrategy, random_point_in_voxel, voxel_index_of};
use crate::math::{
    types::{Point3D, Vector3D},
    utils::indexing,
};
use crate::placement::{
    cell_count::CellCounts,
    config::{MethodOptions, PlacementMethod},
    error::{PlacementError, PlacementResult},
    validation::{ensure_cubic_voxels, validate_voxel_dimensions},
};
use crate::voxel::VoxelGrid;
use bevy::log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::f64::consts::TAU;

/// Option key for [`PoissonDiscOptions::distance_factor`].
pub const DISTANCE_FACTOR_OPTION: &str = "distance_factor";
/// Option key for [`PoissonDiscOptions::max_attempts`].
pub const MAX_ATTEMPTS_OPTION: &str = "max_attempts";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoissonDiscOptions {
    /// Minimum distance in units of the local mean cell spacing.
    pub distance_factor: f64,
    /// Candidates tried around an active cell before it is retired.
    pub max_attempts: usize,
}

impl Default for PoissonDiscOptions {
    fn default() -> Self {
        Self {
            distance_factor: 0.5,
            max_attempts: 30,
        }
    }
}

impl PoissonDiscOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_distance_factor(mut self, distance_factor: f64) -> Self {
        self.distance_factor = distance_factor;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Reads the options from a `method_options` mapping; missing keys keep
    /// their defaults, unknown keys are rejected.
    pub fn from_method_options(options: &MethodOptions) -> PlacementResult<Self> {
        let mut parsed = Self::default();

        for (key, &value) in options {
            match key.as_str() {
                DISTANCE_FACTOR_OPTION => parsed.distance_factor = value,
                MAX_ATTEMPTS_OPTION => {
                    if !(value.is_finite() && value >= 1.0 && value.fract() == 0.0) {
                        return Err(PlacementError::InvalidConfiguration {
                            message: format!(
                                "poisson_disc option '{}' must be a positive integer, got {}",
                                key, value
                            ),
                        });
                    }
                    parsed.max_attempts = value as usize;
                }
                other => {
                    return Err(PlacementError::InvalidConfiguration {
                        message: format!(
                            "unknown poisson_disc option '{}', expected '{}' or '{}'",
                            other, DISTANCE_FACTOR_OPTION, MAX_ATTEMPTS_OPTION
                        ),
                    });
                }
            }
        }

        parsed.validate()?;
        Ok(parsed)
    }

    pub fn validate(&self) -> PlacementResult<()> {
        if !(self.distance_factor.is_finite() && self.distance_factor > 0.0) {
            return Err(PlacementError::InvalidConfiguration {
                message: format!(
                    "poisson_disc distance_factor must be positive, got {}",
                    self.distance_factor
                ),
            });
        }
        if self.max_attempts == 0 {
            return Err(PlacementError::InvalidConfiguration {
                message: "poisson_disc max_attempts must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Minimum distance between cells of a voxel with `expected` cells, capped at one edge.
fn radius_for(expected: f64, edge: f64, distance_factor: f64) -> f64 {
    if expected <= 0.0 {
        return 0.0;
    }
    (distance_factor * edge / expected.cbrt()).min(edge)
}

fn voxel_centre<G: VoxelGrid + ?Sized>(grid: &G, flat: usize) -> Point3D {
    let corner = grid.indices_to_positions(indexing::unravel_index(grid.shape(), flat));
    corner + grid.voxel_dimensions() / 2.0
}

/// Starting point for Poisson disc sampling: the centre of the voxel with the
/// smallest strictly positive expected count (first in scan order on ties).
/// `None` if no voxel expects any cell.
pub fn poisson_seed_point<G: VoxelGrid + ?Sized>(per_voxel: &[f64], grid: &G) -> Option<Point3D> {
    let (flat, _) = per_voxel
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0.0)
        .min_by(|a, b| a.1.total_cmp(b.1))?;

    Some(voxel_centre(grid, flat))
}

/// Uniform hash grid over accepted cells. The bucket size is at least the
/// largest radius, so a conflict can only sit in one of the 27 surrounding buckets.
struct SpatialHash {
    origin: Vector3D,
    cell_size: f64,
    buckets: HashMap<[i64; 3], Vec<usize>>,
}

impl SpatialHash {
    fn new(origin: Vector3D, cell_size: f64) -> Self {
        Self {
            origin,
            cell_size,
            buckets: HashMap::new(),
        }
    }

    fn key(&self, point: &Point3D) -> [i64; 3] {
        let relative = (point.coords - self.origin) / self.cell_size;
        [
            relative.x.floor() as i64,
            relative.y.floor() as i64,
            relative.z.floor() as i64,
        ]
    }

    fn insert(&mut self, point: &Point3D, index: usize) {
        self.buckets.entry(self.key(point)).or_default().push(index);
    }

    /// No accepted cell is closer than `min(radius, radius_of_that_cell)`.
    fn is_free(&self, candidate: &Point3D, radius: f64, points: &[Point3D], radii: &[f64]) -> bool {
        let key = self.key(candidate);

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = self.buckets.get(&[key[0] + dx, key[1] + dy, key[2] + dz])
                    else {
                        continue;
                    };
                    for &j in bucket {
                        let min_distance = radius.min(radii[j]);
                        if (points[j] - *candidate).norm_squared() < min_distance * min_distance {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }
}

/// Mutable state of one sampling run.
struct DiscSampler<'a, G: VoxelGrid + ?Sized> {
    grid: &'a G,
    voxel_radii: Vec<f64>,
    remaining: Vec<usize>,
    points: Vec<Point3D>,
    point_radii: Vec<f64>,
    active: Vec<usize>,
    index: SpatialHash,
}

impl<G: VoxelGrid + ?Sized> DiscSampler<'_, G> {
    fn push(&mut self, point: Point3D, flat: usize) -> usize {
        let id = self.points.len();
        self.index.insert(&point, id);
        self.points.push(point);
        self.point_radii.push(self.voxel_radii[flat]);
        self.remaining[flat] -= 1;
        id
    }

    /// Accepts `candidate` if its voxel still has room and the distance
    /// constraint holds; accepted cells become active.
    fn try_accept(&mut self, candidate: Point3D) -> bool {
        let Some(voxel) = voxel_index_of(self.grid, &candidate) else {
            return false;
        };
        let flat = indexing::flat_index(self.grid.shape(), voxel);
        if self.remaining[flat] == 0 {
            return false;
        }
        if !self
            .index
            .is_free(&candidate, self.voxel_radii[flat], &self.points, &self.point_radii)
        {
            return false;
        }

        let id = self.push(candidate, flat);
        self.active.push(id);
        true
    }

    /// Throws darts into voxel `flat`. If none lands, the voxel's remaining
    /// cells are placed without the distance constraint.
    fn reseed<R: Rng + ?Sized>(&mut self, flat: usize, max_attempts: usize, rng: &mut R) {
        let index = indexing::unravel_index(self.grid.shape(), flat);
        let corner = self.grid.indices_to_positions(index);
        let voxel_dimensions = self.grid.voxel_dimensions();

        for _ in 0..max_attempts {
            let dart = random_point_in_voxel(corner, &voxel_dimensions, &mut *rng);
            if self.try_accept(dart) {
                return;
            }
        }

        warn!(
            "PoissonDiscPlacement: no room for {} more cells in voxel {:?} at radius {:.3}, placing them without minimum distance",
            self.remaining[flat], index, self.voxel_radii[flat]
        );
        while self.remaining[flat] > 0 {
            let point = random_point_in_voxel(corner, &voxel_dimensions, &mut *rng);
            self.push(point, flat);
        }
    }
}

/// Random point in the spherical shell `[radius, 2 * radius]` around `centre`.
fn candidate_around<R: Rng + ?Sized>(centre: Point3D, radius: f64, rng: &mut R) -> Point3D {
    let z: f64 = rng.random_range(-1.0..=1.0);
    let azimuth: f64 = rng.random_range(0.0..TAU);
    let ring = (1.0 - z * z).max(0.0).sqrt();
    let direction = Vector3D::new(ring * azimuth.cos(), ring * azimuth.sin(), z);
    let distance = radius * (1.0 + rng.random::<f64>());

    centre + direction * distance
}

/// Minimum-separation placement. Needs cubic voxels.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoissonDiscPlacement {
    options: PoissonDiscOptions,
}

impl PoissonDiscPlacement {
    pub fn new(options: PoissonDiscOptions) -> Self {
        Self { options }
    }
}

impl PlacementStrategy for PoissonDiscPlacement {
    fn method(&self) -> PlacementMethod {
        PlacementMethod::PoissonDisc
    }

    fn place<G, R>(
        &self,
        grid: &G,
        counts: &CellCounts,
        rng: &mut R,
    ) -> PlacementResult<Vec<Point3D>>
    where
        G: VoxelGrid + ?Sized,
        R: Rng + ?Sized,
    {
        self.options.validate()?;
        let voxel_dimensions = grid.voxel_dimensions();
        validate_voxel_dimensions(&voxel_dimensions)?;
        ensure_cubic_voxels(&voxel_dimensions)?;

        if counts.is_empty() {
            debug!("PoissonDiscPlacement: total cell count is 0, nothing to place");
            return Ok(Vec::new());
        }

        let edge = voxel_dimensions.x;
        let allocation = counts.allocate();
        let voxel_radii: Vec<f64> = counts
            .per_voxel
            .iter()
            .map(|&expected| radius_for(expected, edge, self.options.distance_factor))
            .collect();

        // Occupied voxels from sparsest to densest, ties in scan order.
        let mut seed_order: Vec<usize> = (0..allocation.len())
            .filter(|&flat| allocation[flat] > 0)
            .collect();
        seed_order.sort_by(|&a, &b| counts.per_voxel[a].total_cmp(&counts.per_voxel[b]));

        let cell_size = seed_order
            .iter()
            .map(|&flat| voxel_radii[flat])
            .fold(0.0, f64::max);
        debug!(
            "PoissonDiscPlacement: {} cells over {} occupied voxels, radius range up to {:.3}",
            counts.total,
            seed_order.len(),
            cell_size
        );

        let mut sampler = DiscSampler {
            grid,
            voxel_radii,
            remaining: allocation,
            points: Vec::with_capacity(counts.total),
            point_radii: Vec::with_capacity(counts.total),
            active: Vec::new(),
            index: SpatialHash::new(grid.offset(), cell_size),
        };

        let max_attempts = self.options.max_attempts;

        // A sparsest voxel without allocated cells still anchors the first darts.
        if let Some(start) = poisson_seed_point(&counts.per_voxel, grid) {
            if !sampler.try_accept(start) {
                let radius = voxel_index_of(grid, &start)
                    .map(|voxel| sampler.voxel_radii[indexing::flat_index(grid.shape(), voxel)])
                    .unwrap_or(0.0);
                let mut anchor_active = true;
                while anchor_active && sampler.points.len() < counts.total {
                    anchor_active = (0..max_attempts).any(|_| {
                        let candidate = candidate_around(start, radius, &mut *rng);
                        sampler.try_accept(candidate)
                    });
                }
            }
        }
        let mut cursor = 0usize;
        let mut reseeds = 0usize;

        while sampler.points.len() < counts.total {
            if sampler.active.is_empty() {
                while cursor < seed_order.len() && sampler.remaining[seed_order[cursor]] == 0 {
                    cursor += 1;
                }
                let Some(&flat) = seed_order.get(cursor) else {
                    break;
                };
                sampler.reseed(flat, max_attempts, &mut *rng);
                reseeds += 1;
                continue;
            }

            let slot = rng.random_range(0..sampler.active.len());
            let parent = sampler.active[slot];
            let parent_point = sampler.points[parent];
            let parent_radius = sampler.point_radii[parent];

            let accepted = (0..max_attempts).any(|_| {
                let candidate = candidate_around(parent_point, parent_radius, &mut *rng);
                sampler.try_accept(candidate)
            });
            if !accepted {
                sampler.active.swap_remove(slot);
            }
        }

        debug!(
            "PoissonDiscPlacement: placed {} cells with {} reseeds",
            sampler.points.len(),
            reseeds
        );

        Ok(sampler.points)
    }
}
