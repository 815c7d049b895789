//! Maze generation and path finding on rectangular grids of typed cells.

pub mod array;
pub mod dims;
pub mod error;
pub mod generator;
pub mod grid;
pub mod heap;
pub mod search;

pub use dims::Dims;
pub use error::{MazeError, Result};
pub use generator::{Generator, PavingState, Random};
pub use grid::{CellType, Criterion, Grid};
pub use heap::MinHeap;
pub use search::{Search, SearchReport, SearchSnapshot, Strategy, UnknownStrategy, Visit};
