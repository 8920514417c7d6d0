use std::hash::Hash;
use std::marker::PhantomData;

use gridwalk_core::{Grid, Point};

/// A node of the search graph that sits on a grid cell.
///
/// Distinct states may share a position (for example the same cell reached
/// with a different heading); the search keys its bookkeeping by the whole
/// state.
pub trait SearchState: Clone + Eq + Hash {
    /// The grid cell this state occupies.
    fn pos(&self) -> Point;
}

impl SearchState for Point {
    #[inline]
    fn pos(&self) -> Point {
        *self
    }
}

/// The graph an A* search runs over.
pub trait SearchSpace<T> {
    type State: SearchState;

    /// Append the successors of `state` into `buf`. The caller clears `buf`
    /// before calling.
    ///
    /// This alone decides which moves are legal. Every successor must lie
    /// inside `grid`.
    fn neighbours(&self, grid: &Grid<T>, state: &Self::State, buf: &mut Vec<Self::State>);

    /// Whether `state` is a goal. Evaluated when a state is popped from the
    /// open set, not when it is generated.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Estimate of the remaining cost from `state` to the nearest goal.
    /// Must never overestimate (admissible), or the returned path may not
    /// be the cheapest.
    fn estimate(&self, state: &Self::State) -> u32;
}

/// A [`SearchSpace`] assembled from three closures.
pub struct FnSpace<S, N, G, H> {
    neighbours: N,
    is_goal: G,
    estimate: H,
    _state: PhantomData<fn(&S)>,
}

impl<S, N, G, H> FnSpace<S, N, G, H>
where
    S: SearchState,
    N: Fn(&S, &mut Vec<S>),
    G: Fn(&S) -> bool,
    H: Fn(&S) -> u32,
{
    pub fn new(neighbours: N, is_goal: G, estimate: H) -> Self {
        Self {
            neighbours,
            is_goal,
            estimate,
            _state: PhantomData,
        }
    }
}

impl<T, S, N, G, H> SearchSpace<T> for FnSpace<S, N, G, H>
where
    S: SearchState,
    N: Fn(&S, &mut Vec<S>),
    G: Fn(&S) -> bool,
    H: Fn(&S) -> u32,
{
    type State = S;

    #[inline]
    fn neighbours(&self, _grid: &Grid<T>, state: &S, buf: &mut Vec<S>) {
        (self.neighbours)(state, buf)
    }

    #[inline]
    fn is_goal(&self, state: &S) -> bool {
        (self.is_goal)(state)
    }

    #[inline]
    fn estimate(&self, state: &S) -> u32 {
        (self.estimate)(state)
    }
}
