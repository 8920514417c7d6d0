//! Error types for the heap and the A* search.

use gridwalk_core::Point;
use thiserror::Error;

/// Misuse of a [`MinHeap`](crate::MinHeap).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    #[error("cannot remove from an empty heap")]
    Empty,

    #[error("item is already in the heap")]
    Duplicate,

    #[error("item is not in the heap")]
    Missing,
}

/// Fatal A* failure. "No path" is not an error; see
/// [`Pathfinder::astar`](crate::Pathfinder::astar).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("start state at {pos} is outside the grid")]
    InvalidStart { pos: Point },

    #[error("neighbour state at {pos} is outside the grid")]
    InvalidNeighbour { pos: Point },

    #[error("search exceeded {limit} expansions")]
    TooManySteps { limit: usize },

    #[error("open set corrupted: {0}")]
    Heap(#[from] HeapError),
}

pub type Result<T> = std::result::Result<T, SearchError>;
