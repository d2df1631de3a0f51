// src/math/geometry/mod.rs
pub mod bbox;

pub use bbox::{nonzero_index_bbox, nonzero_world_bbox};
