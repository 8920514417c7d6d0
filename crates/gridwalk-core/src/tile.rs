//! Cell capability traits: [`Tile`] and [`CostTile`].
//!
//! A grid is generic over its cell type. Puzzles define their own small
//! `Copy` value (usually a fieldless enum or a newtype over an integer) and
//! implement these traits for it.

/// A value that can live in a [`Grid`](crate::Grid).
///
/// `T::default()` is the grid's default `empty` value.
pub trait Tile: Copy + PartialEq + Default {
    /// Whether this value belongs to the tile palette.
    ///
    /// Grids built from decoded rows reject invalid tiles.
    #[inline]
    fn is_valid(&self) -> bool {
        true
    }

    /// Character used when the grid is rendered as text.
    fn glyph(&self) -> char;
}

/// A tile that can be walked onto at a positive cost.
pub trait CostTile: Tile {
    /// Cost to move onto this tile. Must be > 0.
    fn cost(&self) -> u32;
}

impl Tile for bool {
    #[inline]
    fn glyph(&self) -> char {
        if *self { '#' } else { '.' }
    }
}

impl Tile for u8 {
    /// Digits render as themselves, anything larger as `+`.
    #[inline]
    fn glyph(&self) -> char {
        char::from_digit(u32::from(*self), 10).unwrap_or('+')
    }
}

impl CostTile for u8 {
    /// A digit grid where each cell costs its own value (`0` costs 1).
    #[inline]
    fn cost(&self) -> u32 {
        u32::from(*self).max(1)
    }
}
