//! [`Marks`]: transient per-cell algorithm state.
//!
//! Every [`Grid`](crate::Grid) carries a bitplane of `Marks` beside its
//! cells. Searches use it to flag frontier, closed and path cells for
//! observers without touching the cell values themselves.

use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

/// Bitmask of transient cell marks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Marks(pub u8);

impl Marks {
    pub const NONE: Self = Self(0);
    /// Cell is on the search frontier (open set).
    pub const FRONTIER: Self = Self(1 << 0);
    /// Cell has been expanded.
    pub const CLOSED: Self = Self(1 << 1);
    /// Cell lies on a reported path.
    pub const PATH: Self = Self(1 << 2);
    /// First bit free for caller use; `USER << n` for `n < 5` is also free.
    pub const USER: Self = Self(1 << 3);
    pub const ALL: Self = Self(u8::MAX);

    /// Whether this mask contains all the bits from `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether any bit of `other` is set.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Whether the mask is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `self` with the bits of `other` cleared.
    #[inline]
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl BitOr for Marks {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Marks {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Marks {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for Marks {
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        Self(!self.0)
    }
}
