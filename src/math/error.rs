// src/math/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Shape mismatch: shape {shape:?} needs {expected} values, got {actual}")]
    ShapeMismatch {
        shape: [usize; 3],
        expected: usize,
        actual: usize,
    },

    #[error("Field has no non-zero entries")]
    EmptyField,
}

pub type MathResult<T> = Result<T, MathError>;
