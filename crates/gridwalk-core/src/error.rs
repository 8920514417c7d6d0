//! Error types for grid construction.

use thiserror::Error;

use crate::geom::Point;

/// Failure to build a [`Grid`](crate::Grid).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid grid size {width}x{height}: both sides must be positive")]
    InvalidSize { width: i32, height: i32 },

    #[error("cannot build a grid from no rows")]
    Empty,

    #[error("inconsistent row lengths: row {row} has {got} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("tile at {pos} is not part of the tile palette")]
    InvalidTile { pos: Point },

    #[error("cannot decode tile at {pos}: {reason}")]
    Decode { pos: Point, reason: String },
}

pub type Result<T> = std::result::Result<T, GridError>;
