// src/math/geometry/bbox.rs

use crate::math::{
    error::{MathError, MathResult},
    types::{Bounds3D, IndexBounds3D, Point3D, Vector3D},
    utils::indexing,
};

/// Berechnet die Bounding Box der Indizes aller Nicht-Null-Einträge eines
/// dreidimensionalen Feldes (C-Ordnung).
///
/// Ein Feld ohne Nicht-Null-Einträge hat keine Bounding Box und liefert
/// [`MathError::EmptyField`]; ob das fatal ist, entscheidet der Aufrufer.
pub fn nonzero_index_bbox(data: &[f64], shape: [usize; 3]) -> MathResult<IndexBounds3D> {
    let expected = indexing::element_count(shape);
    if data.len() != expected {
        return Err(MathError::ShapeMismatch {
            shape,
            expected,
            actual: data.len(),
        });
    }

    let mut bounds: Option<IndexBounds3D> = None;
    for (flat, _) in data.iter().enumerate().filter(|(_, value)| **value != 0.0) {
        let index = indexing::unravel_index(shape, flat);
        match bounds.as_mut() {
            Some(b) => b.expand_to_include_index(index),
            None => bounds = Some(IndexBounds3D::from_index(index)),
        }
    }

    bounds.ok_or(MathError::EmptyField)
}

/// Berechnet die Bounding Box der Nicht-Null-Einträge in Weltkoordinaten.
///
/// `bbox` ist die Bounding Box des gesamten Feldes; nur `bbox.min` wird als
/// Ursprung verwendet. Die obere Ecke wird um eine Voxelbreite pro Achse
/// erweitert, damit die Box die Voxel vollständig umschließt.
pub fn nonzero_world_bbox(
    data: &[f64],
    shape: [usize; 3],
    bbox: &Bounds3D,
    voxel_dimensions: &Vector3D,
) -> MathResult<Bounds3D> {
    let index_bounds = nonzero_index_bbox(data, shape)?;

    let to_world = |index: [usize; 3]| -> Point3D {
        let index = Vector3D::new(index[0] as f64, index[1] as f64, index[2] as f64);
        bbox.min + index.component_mul(voxel_dimensions)
    };

    let min = to_world(index_bounds.min);
    let max = to_world(index_bounds.max) + *voxel_dimensions;

    Ok(Bounds3D::from_points(min, max))
}
