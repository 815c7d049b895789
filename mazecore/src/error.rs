use thiserror::Error;

use crate::dims::Dims;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("cell {0:?} lies outside of the board")]
    OutOfBounds(Dims),
    #[error("unknown cell type {0:?}")]
    InvalidType(String),
    #[error("unknown criterion {0:?}")]
    UnknownCriterion(String),
    #[error("board of {width}x{height} is too small")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("no cell matches the criteria (gave up after {attempts} attempts)")]
    Unsatisfiable { attempts: usize },
}

pub type Result<T, E = MazeError> = std::result::Result<T, E>;
