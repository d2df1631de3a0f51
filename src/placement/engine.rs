// src/placement/engine.rs

use crate::math::probability::with_global_rng;
use crate::math::types::Point3D;
use crate::placement::{
    cell_count::{CellCounts, estimate},
    config::{PlacementConfig, PlacementMethod},
    error::{PlacementError, PlacementResult},
    strategy::{PlacementStrategy, PoissonDiscOptions, PoissonDiscPlacement, UniformPlacement},
    validation::{ensure_cubic_voxels, validate_density, validate_voxel_dimensions},
};
use crate::voxel::VoxelGrid;
use bevy::log::{debug, info, warn};
use rand::Rng;

/// Creates cell positions from a density grid.
///
/// Validates the input, converts densities to cell counts and hands the counts
/// to the strategy selected in the [`PlacementConfig`].
pub struct SamplingEngine {
    config: PlacementConfig,
}

impl SamplingEngine {
    pub fn new(config: PlacementConfig) -> PlacementResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Validated cell counts of `grid` under the configured density factor.
    pub fn cell_counts<G: VoxelGrid + ?Sized>(&self, grid: &G) -> PlacementResult<CellCounts> {
        validate_density(grid)?;
        self.counts_for_valid_density(grid)
    }

    fn counts_for_valid_density<G: VoxelGrid + ?Sized>(
        &self,
        grid: &G,
    ) -> PlacementResult<CellCounts> {
        validate_voxel_dimensions(&grid.voxel_dimensions())?;

        let counts = estimate(
            grid.raw(),
            grid.voxel_volume_mm3(),
            self.config.density_factor,
        );

        // `total` saturates on the cast, so check the unrounded sum.
        let expected: f64 = counts.per_voxel.iter().sum();
        if !expected.is_finite() || expected.round_ties_even() >= usize::MAX as f64 {
            return Err(PlacementError::InvalidConfiguration {
                message: format!(
                    "expected cell count {} is too large (density factor {})",
                    expected, self.config.density_factor
                ),
            });
        }

        debug!(
            "SamplingEngine: {} voxels, voxel volume {} mm³, density factor {}, {} cells",
            grid.voxel_count(),
            grid.voxel_volume_mm3(),
            self.config.density_factor,
            counts.total
        );
        Ok(counts)
    }

    /// Runs with a fresh generator: seeded from the config, or from entropy.
    pub fn create_cell_positions<G: VoxelGrid + ?Sized>(
        &self,
        grid: &G,
    ) -> PlacementResult<Vec<Point3D>> {
        validate_density(grid)?;
        self.sample(grid, &mut self.config.seed_resource().make_rng())
    }

    /// Runs with a caller-owned generator. The configured seed is not applied.
    pub fn create_cell_positions_with_rng<G, R>(
        &self,
        grid: &G,
        rng: &mut R,
    ) -> PlacementResult<Vec<Point3D>>
    where
        G: VoxelGrid + ?Sized,
        R: Rng + ?Sized,
    {
        validate_density(grid)?;
        self.sample(grid, rng)
    }

    /// Runs on the process-wide generator. A configured seed reseeds it; without
    /// a seed the run continues from whatever state earlier calls left behind.
    pub fn create_cell_positions_global<G: VoxelGrid + ?Sized>(
        &self,
        grid: &G,
    ) -> PlacementResult<Vec<Point3D>> {
        // Invalid input must not reseed the shared generator.
        validate_density(grid)?;
        let voxel_dimensions = grid.voxel_dimensions();
        validate_voxel_dimensions(&voxel_dimensions)?;
        if self.config.method == PlacementMethod::PoissonDisc {
            ensure_cubic_voxels(&voxel_dimensions)?;
        }

        with_global_rng(self.config.seed, |rng| self.sample(grid, rng))
    }

    /// Counts and places cells; `grid` must already have passed [`validate_density`].
    fn sample<G, R>(&self, grid: &G, rng: &mut R) -> PlacementResult<Vec<Point3D>>
    where
        G: VoxelGrid + ?Sized,
        R: Rng + ?Sized,
    {
        let counts = self.counts_for_valid_density(grid)?;

        match self.config.method {
            PlacementMethod::Basic => {
                if !self.config.method_options.is_empty() {
                    warn!(
                        "SamplingEngine: method 'basic' ignores method options {:?}",
                        self.config.method_options.keys().collect::<Vec<_>>()
                    );
                }
                self.run(&UniformPlacement, grid, &counts, rng)
            }
            PlacementMethod::PoissonDisc => {
                let options = PoissonDiscOptions::from_method_options(&self.config.method_options)?;
                self.run(&PoissonDiscPlacement::new(options), grid, &counts, rng)
            }
        }
    }

    fn run<S, G, R>(
        &self,
        strategy: &S,
        grid: &G,
        counts: &CellCounts,
        rng: &mut R,
    ) -> PlacementResult<Vec<Point3D>>
    where
        S: PlacementStrategy,
        G: VoxelGrid + ?Sized,
        R: Rng + ?Sized,
    {
        let positions = strategy.place(grid, counts, rng)?;
        info!(
            "Created {} cell positions with method '{}'",
            positions.len(),
            strategy.method()
        );
        Ok(positions)
    }
}

/// Creates cell positions for `density` (count / mm³ per voxel).
///
/// Returns one point per cell; the number of cells is the rounded sum of
/// `density * density_factor * voxel_volume_mm3`. Density errors take
/// precedence over configuration errors.
pub fn create_cell_positions<G: VoxelGrid + ?Sized>(
    density: &G,
    config: &PlacementConfig,
) -> PlacementResult<Vec<Point3D>> {
    validate_density(density)?;
    let engine = SamplingEngine::new(config.clone())?;
    engine.sample(density, &mut engine.config.seed_resource().make_rng())
}
