//! Observation hook for algorithms that mutate a grid.
//!
//! Mutating algorithms call [`Observer::capture`] after visible changes so
//! that an external recorder can snapshot the grid (for example to build an
//! animation). Nothing here renders or stores frames.

use crate::grid::Grid;

/// Receives a notification after a grid mutation.
pub trait Observer<T> {
    /// Called with the grid in its new state, a short label and a delay hint
    /// (in hundredths of a second) for how long the frame should be shown.
    fn capture(&mut self, _grid: &Grid<T>, _label: &str, _delay: u32) {}

    /// Whether this observer wants notifications at all.
    ///
    /// Algorithms skip building labels when this returns `false`.
    fn is_active(&self) -> bool {
        true
    }
}

/// An observer that ignores every notification.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoObserver;

impl<T> Observer<T> for NoObserver {
    #[inline]
    fn is_active(&self) -> bool {
        false
    }
}

impl<T, O: Observer<T> + ?Sized> Observer<T> for &mut O {
    #[inline]
    fn capture(&mut self, grid: &Grid<T>, label: &str, delay: u32) {
        (**self).capture(grid, label, delay);
    }

    #[inline]
    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}
