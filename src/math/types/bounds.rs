// src/math/types/bounds.rs

use crate::math::types::{Point3D, Vector3D};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 3D Bounding Box (Axis-Aligned Bounding Box) in Weltkoordinaten
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds3D {
    pub min: Point3D,
    pub max: Point3D,
}

impl Bounds3D {
    /// Erstellt eine Bounding Box aus zwei beliebigen Punkten
    pub fn from_points(p1: Point3D, p2: Point3D) -> Self {
        Self {
            min: Point3D::new(p1.x.min(p2.x), p1.y.min(p2.y), p1.z.min(p2.z)),
            max: Point3D::new(p1.x.max(p2.x), p1.y.max(p2.y), p1.z.max(p2.z)),
        }
    }

    pub fn size(&self) -> Vector3D {
        self.max - self.min
    }

    /// Prüft ob ein Punkt in der Bounding Box liegt (Ränder inklusive)
    pub fn contains_point(&self, point: Point3D) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

impl fmt::Display for Bounds3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bounds3D([{}, {}, {}] to [{}, {}, {}])",
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z
        )
    }
}

/// Bounding Box über Voxel-Indizes; `min` und `max` sind beide inklusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexBounds3D {
    pub min: [usize; 3],
    pub max: [usize; 3],
}

impl IndexBounds3D {
    pub fn from_index(index: [usize; 3]) -> Self {
        Self {
            min: index,
            max: index,
        }
    }

    pub fn expand_to_include_index(&mut self, index: [usize; 3]) {
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(index[axis]);
            self.max[axis] = self.max[axis].max(index[axis]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_points_orders_corners() {
        let bounds =
            Bounds3D::from_points(Point3D::new(1.0, -2.0, 3.0), Point3D::new(-1.0, 4.0, 0.5));

        assert_eq!(bounds.min, Point3D::new(-1.0, -2.0, 0.5));
        assert_eq!(bounds.max, Point3D::new(1.0, 4.0, 3.0));
        assert_relative_eq!(bounds.size(), Vector3D::new(2.0, 6.0, 2.5));
        assert!(bounds.contains_point(Point3D::new(1.0, 0.0, 0.5)));
        assert!(!bounds.contains_point(Point3D::new(1.1, 0.0, 1.0)));
    }

    #[test]
    fn test_index_bounds_expand() {
        let mut bounds = IndexBounds3D::from_index([2, 3, 4]);
        bounds.expand_to_include_index([0, 5, 4]);
        assert_eq!(bounds.min, [0, 3, 4]);
        assert_eq!(bounds.max, [2, 5, 4]);
    }
}
