// src/math/types/mod.rs
pub mod bounds;

pub use bounds::*;

// Re-export häufig verwendete externe Typen
pub use nalgebra::{Point3, Vector3};

// Einheitliche Typen für das gesamte Crate
pub type Point3D = Point3<f64>;
pub type Vector3D = Vector3<f64>;
