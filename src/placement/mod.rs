// src/placement/mod.rs

//! Density grid → cell positions.
//!
//! [`cell_count`] turns densities into per-voxel cell counts, a
//! [`strategy::PlacementStrategy`] turns counts into positions and the
//! [`engine::SamplingEngine`] ties both together behind a [`PlacementConfig`].

pub mod cell_count;
pub mod config;
pub mod engine;
pub mod error;
pub mod strategy;
pub mod validation;

pub use cell_count::CellCounts;
pub use config::{MethodOptions, PlacementConfig, PlacementMethod};
pub use engine::{SamplingEngine, create_cell_positions};
pub use error::{PlacementError, PlacementResult};
pub use strategy::{
    PlacementStrategy, PoissonDiscOptions, PoissonDiscPlacement, UniformPlacement,
    poisson_seed_point,
};
pub use validation::ensure_cubic_voxels;
