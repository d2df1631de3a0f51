// src/placement/error.rs
use crate::math::error::MathError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlacementError {
    #[error(
        "Found {count} negative or non-finite densities (first at voxel {first_index:?}), aborting"
    )]
    InvalidDensity {
        count: usize,
        first_index: [usize; 3],
    },

    #[error("Unknown placement method '{method}', expected one of: basic, poisson_disc")]
    UnknownMethod { method: String },

    #[error("Invalid voxel geometry: {message}")]
    Geometry { message: String },

    #[error("Invalid placement configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error(transparent)]
    Math(#[from] MathError),
}

pub type PlacementResult<T> = Result<T, PlacementError>;
