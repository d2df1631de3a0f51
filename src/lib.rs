//! Cell placement from volumetric density data.
//!
//! Converts a voxel grid of cell densities (count / mm³) into concrete cell
//! positions whose distribution follows the density.
//!
//! ```no_run
//! use cell_placement::prelude::*;
//!
//! let density = VoxelData::filled(
//!     [10, 10, 10],
//!     80_000.0,
//!     Vector3D::repeat(25.0),
//!     Vector3D::zeros(),
//! );
//! let config = PlacementConfig::new().with_seed(42);
//! let positions = create_cell_positions(&density, &config)?;
//! # Ok::<(), PlacementError>(())
//! ```

pub mod math;
pub mod placement;
pub mod voxel;

pub mod prelude {
    pub use crate::math::prelude::*;
    pub use crate::placement::{
        CellCounts, MethodOptions, PlacementConfig, PlacementError, PlacementMethod,
        PlacementResult, PlacementStrategy, PoissonDiscOptions, PoissonDiscPlacement,
        SamplingEngine, UniformPlacement, create_cell_positions,
    };
    pub use crate::voxel::{VoxelData, VoxelGrid};
}
