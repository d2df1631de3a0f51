// src/math/utils.rs

/// Mathematische Konstanten
pub mod constants {
    /// Relative Toleranz für `is_close` (wie numpy.isclose)
    pub const RELATIVE_TOLERANCE: f64 = 1e-5;
    /// Absolute Toleranz für `is_close` (wie numpy.isclose)
    pub const ABSOLUTE_TOLERANCE: f64 = 1e-8;
    /// Voxelvolumen werden in µm³ geliefert, Dichten in 1/mm³
    pub const UM3_PER_MM3: f64 = 1e9;
}

/// Vergleichsfunktionen mit Toleranz
pub mod comparison {
    use super::constants::{ABSOLUTE_TOLERANCE, RELATIVE_TOLERANCE};

    /// Prüft ob zwei Floats (nahezu) gleich sind.
    /// Asymmetrisch wie numpy: die relative Toleranz bezieht sich auf `b`.
    pub fn is_close(a: f64, b: f64) -> bool {
        is_close_eps(a, b, RELATIVE_TOLERANCE, ABSOLUTE_TOLERANCE)
    }

    /// Prüft ob zwei Floats mit custom Toleranzen gleich sind
    pub fn is_close_eps(a: f64, b: f64, rtol: f64, atol: f64) -> bool {
        (a - b).abs() <= atol + rtol * b.abs()
    }
}

/// Indexrechnung für dicht gepackte 3D-Felder in C-Ordnung (letzte Achse am schnellsten)
pub mod indexing {
    /// Anzahl der Elemente eines Feldes mit gegebener Form
    pub fn element_count(shape: [usize; 3]) -> usize {
        shape[0] * shape[1] * shape[2]
    }

    /// (i, j, k) -> flacher Index
    #[inline]
    pub fn flat_index(shape: [usize; 3], index: [usize; 3]) -> usize {
        (index[0] * shape[1] + index[1]) * shape[2] + index[2]
    }

    /// flacher Index -> (i, j, k)
    #[inline]
    pub fn unravel_index(shape: [usize; 3], flat: usize) -> [usize; 3] {
        let k = flat % shape[2];
        let rest = flat / shape[2];
        [rest / shape[1], rest % shape[1], k]
    }
}

#[cfg(test)]
mod tests {
    use super::comparison::*;
    use super::indexing::*;

    #[test]
    fn test_is_close() {
        assert!(is_close(10.0, 10.0 + 1e-6));
        assert!(!is_close(10.0, 10.1));
        assert!(is_close(0.0, 1e-9));
    }

    #[test]
    fn test_flat_index_roundtrip_corners() {
        let shape = [2, 3, 4];
        assert_eq!(flat_index(shape, [0, 0, 1]), 1);
        assert_eq!(flat_index(shape, [0, 1, 0]), 4);
        assert_eq!(flat_index(shape, [1, 0, 0]), 12);
        assert_eq!(unravel_index(shape, 23), [1, 2, 3]);
        assert_eq!(element_count(shape), 24);
    }
}
