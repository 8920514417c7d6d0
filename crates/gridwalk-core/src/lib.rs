//! **gridwalk-core**: bounded 2D grids of typed cells.
//!
//! This crate provides the foundational types shared by the *gridwalk*
//! algorithms: geometry primitives, the [`Tile`] capability traits, a
//! fixed-size row-major [`Grid`] with a transient [`Marks`] bitplane, and
//! the [`Observer`] hook that mutating algorithms notify.

pub mod error;
pub mod geom;
pub mod grid;
pub mod marks;
pub mod observer;
pub mod tile;
mod transform;

pub use error::GridError;
pub use geom::{Direction, Point, Range};
pub use grid::Grid;
pub use marks::Marks;
pub use observer::{NoObserver, Observer};
pub use tile::{CostTile, Tile};
