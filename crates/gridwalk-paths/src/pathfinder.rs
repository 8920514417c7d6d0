use gridwalk_core::{Marks, Point};
use rustc_hash::FxHashMap;

use crate::heap::{HeapItem, MinHeap};
use crate::traits::SearchState;

/// Dense index of a node in the [`Pathfinder`] arena.
pub(crate) type NodeId = usize;

/// A path found by [`Pathfinder::astar`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path<S> {
    /// Sum of the costs of every cell entered after the start.
    pub cost: u32,
    /// States from start to goal, both included.
    pub states: Vec<S>,
    /// Grid position of each entry of `states`.
    pub positions: Vec<Point>,
}

impl<S> Path<S> {
    /// Number of states on the path, start and goal included.
    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always `false` for a path returned by a search.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The goal state the search stopped on.
    #[inline]
    pub fn goal(&self) -> Option<&S> {
        self.states.last()
    }
}

/// Tunables for [`Pathfinder`] searches.
///
/// The mark fields select which [`Marks`] bits the search sets on the grid.
/// Empty masks (the default) leave the mark plane untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Abort with [`SearchError::TooManySteps`](crate::SearchError::TooManySteps)
    /// once more than this many nodes have been expanded.
    pub max_steps: Option<usize>,
    /// Set on cells while a state on them is in the open set.
    pub frontier: Marks,
    /// Set on cells once a state on them has been expanded.
    pub closed: Marks,
    /// Set on the cells of the returned path. Kept after the search.
    pub path: Marks,
}

impl SearchConfig {
    /// No step limit and no marks.
    pub const fn new() -> Self {
        Self {
            max_steps: None,
            frontier: Marks::NONE,
            closed: Marks::NONE,
            path: Marks::NONE,
        }
    }

    /// Marks frontier, closed and path cells with the standard bits, for
    /// observers that render search progress.
    pub const fn visualized() -> Self {
        Self::new()
            .with_frontier_marks(Marks::FRONTIER)
            .with_closed_marks(Marks::CLOSED)
            .with_path_marks(Marks::PATH)
    }

    pub const fn with_max_steps(mut self, limit: usize) -> Self {
        self.max_steps = Some(limit);
        self
    }

    pub const fn with_frontier_marks(mut self, bits: Marks) -> Self {
        self.frontier = bits;
        self
    }

    pub const fn with_closed_marks(mut self, bits: Marks) -> Self {
        self.closed = bits;
        self
    }

    pub const fn with_path_marks(mut self, bits: Marks) -> Self {
        self.path = bits;
        self
    }
}

// ---------------------------------------------------------------------------
// Internal node arena
// ---------------------------------------------------------------------------

pub(crate) struct Node<S> {
    pub(crate) state: S,
    pub(crate) g: u32,
    pub(crate) f: u32,
    pub(crate) parent: Option<NodeId>,
}

/// Open-set entry, ordered by `f`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct OpenEntry {
    pub(crate) id: NodeId,
    pub(crate) f: u32,
}

impl HeapItem for OpenEntry {
    type Key = NodeId;

    #[inline]
    fn key(&self) -> NodeId {
        self.id
    }

    #[inline]
    fn less(&self, other: &Self) -> bool {
        self.f < other.f
    }
}

// ---------------------------------------------------------------------------
// Pathfinder
// ---------------------------------------------------------------------------

/// Reusable A* search over states of type `S`.
///
/// `Pathfinder` owns the node arena, the state → node map, the open set and
/// a neighbour buffer. They are cleared, not freed, between searches so
/// repeated queries stop allocating once the caches have grown.
pub struct Pathfinder<S> {
    pub(crate) config: SearchConfig,
    pub(crate) nodes: Vec<Node<S>>,
    pub(crate) ids: FxHashMap<S, NodeId>,
    pub(crate) open: MinHeap<OpenEntry>,
    pub(crate) nbuf: Vec<S>,
    pub(crate) expanded: usize,
}

impl<S: SearchState> Default for Pathfinder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SearchState> Pathfinder<S> {
    /// Create a pathfinder with the default [`SearchConfig`].
    pub fn new() -> Self {
        Self::with_config(SearchConfig::new())
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            config,
            nodes: Vec::new(),
            ids: FxHashMap::default(),
            open: MinHeap::new(),
            nbuf: Vec::with_capacity(8),
            expanded: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[inline]
    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    /// Number of nodes expanded by the last search.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Number of distinct states the last search generated.
    #[inline]
    pub fn generated(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn reset(&mut self) {
        self.nodes.clear();
        self.ids.clear();
        self.open.clear();
        self.expanded = 0;
    }

    /// Id of `state`, allocating a fresh unreached node on first sight.
    pub(crate) fn node_id(&mut self, state: S) -> NodeId {
        if let Some(&id) = self.ids.get(&state) {
            return id;
        }
        let id = self.nodes.len();
        self.ids.insert(state.clone(), id);
        self.nodes.push(Node {
            state,
            g: u32::MAX,
            f: u32::MAX,
            parent: None,
        });
        id
    }

    /// Walk parent links back from `goal` and return the path in forward
    /// order.
    pub(crate) fn reconstruct(&self, goal: NodeId) -> Path<S> {
        let mut states = Vec::new();
        let mut cur = Some(goal);
        while let Some(id) = cur {
            let node = &self.nodes[id];
            states.push(node.state.clone());
            cur = node.parent;
        }
        states.reverse();
        let positions = states.iter().map(|s| s.pos()).collect();
        Path {
            cost: self.nodes[goal].g,
            states,
            positions,
        }
    }
}
