//! Search and fill algorithms for gridwalk grids.
//!
//! This crate provides the algorithms that run over a
//! [`Grid`](gridwalk_core::Grid):
//!
//! - **A\*** shortest-path search over caller-defined states ([`Pathfinder::astar`])
//! - **Scanline flood fill** of empty regions ([`fill`])
//! - **Lattice polygon area** for loops too large to fill ([`area`], [`loop_area`])
//! - An **indexed min-heap** with O(1) membership and O(log n)
//!   reprioritisation ([`MinHeap`]), used as the A* open set
//!
//! [`Pathfinder`] owns and reuses its internal caches so that repeated
//! queries stop allocating after warm-up.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`HeapItem`] | [`MinHeap`] entries |
//! | [`SearchState`] | A* states (anything with a grid position) |
//! | [`SearchSpace`] | A* successors, goal test and heuristic |

mod area;
mod astar;
mod distance;
mod error;
mod fill;
mod heap;
mod pathfinder;
mod traits;

pub use area::{area, loop_area};
pub use distance::manhattan;
pub use error::{HeapError, Result, SearchError};
pub use fill::{fill, fill_observed};
pub use heap::{DrainSorted, HeapItem, MinHeap};
pub use pathfinder::{Path, Pathfinder, SearchConfig};
pub use traits::{FnSpace, SearchSpace, SearchState};
