use gridwalk_core::{CostTile, Grid, NoObserver, Observer};
use log::{debug, trace};

use crate::error::{Result, SearchError};
use crate::pathfinder::{NodeId, OpenEntry, Path, Pathfinder};
use crate::traits::{SearchSpace, SearchState};

impl<S: SearchState> Pathfinder<S> {
    /// Find the cheapest path from `start` to a goal of `space` using A*.
    ///
    /// Entering a cell costs [`CostTile::cost`] of that cell. With an
    /// admissible [`SearchSpace::estimate`] the returned path is optimal.
    ///
    /// Returns `Ok(None)` when the open set runs dry without reaching a
    /// goal. Errors are fatal: a start or neighbour state outside the grid,
    /// or more expansions than [`SearchConfig::max_steps`](crate::SearchConfig::max_steps).
    ///
    /// Frontier and closed marks are cleared from the whole grid before
    /// returning, whatever the outcome. Path marks stay.
    pub fn astar<T, P>(&mut self, grid: &mut Grid<T>, space: &P, start: S) -> Result<Option<Path<S>>>
    where
        T: CostTile,
        P: SearchSpace<T, State = S>,
    {
        self.astar_observed(grid, space, start, NoObserver)
    }

    /// Like [`astar`](Self::astar), notifying `observer` after every
    /// expansion with the label `"open states: N"`.
    pub fn astar_observed<T, P, O>(
        &mut self,
        grid: &mut Grid<T>,
        space: &P,
        start: S,
        mut observer: O,
    ) -> Result<Option<Path<S>>>
    where
        T: CostTile,
        P: SearchSpace<T, State = S>,
        O: Observer<T>,
    {
        self.reset();
        let outcome = self.search(grid, space, start, &mut observer);
        grid.clear_marks(self.config.frontier | self.config.closed);

        let Some(goal) = outcome? else {
            debug!(
                "astar: no path after {} expansions, {} states",
                self.expanded,
                self.nodes.len()
            );
            return Ok(None);
        };

        let path = self.reconstruct(goal);
        if !self.config.path.is_empty() {
            for &p in &path.positions {
                grid.add_marks(p, self.config.path);
            }
        }
        debug!(
            "astar: cost {} over {} steps, {} expansions",
            path.cost,
            path.len() - 1,
            self.expanded
        );
        Ok(Some(path))
    }

    fn search<T, P, O>(
        &mut self,
        grid: &mut Grid<T>,
        space: &P,
        start: S,
        observer: &mut O,
    ) -> Result<Option<NodeId>>
    where
        T: CostTile,
        P: SearchSpace<T, State = S>,
        O: Observer<T>,
    {
        let start_pos = start.pos();
        if !grid.contains(start_pos) {
            return Err(SearchError::InvalidStart { pos: start_pos });
        }

        let f = space.estimate(&start);
        let start_id = self.node_id(start);
        let node = &mut self.nodes[start_id];
        node.g = 0;
        node.f = f;
        self.open.insert(OpenEntry { id: start_id, f })?;
        grid.add_marks(start_pos, self.config.frontier);

        // The buffer goes back into the cache on every exit, errors included.
        let mut nbuf = std::mem::take(&mut self.nbuf);
        let outcome = self.expand(grid, space, observer, &mut nbuf);
        self.nbuf = nbuf;
        outcome
    }

    /// Pop and expand open states until a goal is popped or the open set
    /// runs dry.
    fn expand<T, P, O>(
        &mut self,
        grid: &mut Grid<T>,
        space: &P,
        observer: &mut O,
        nbuf: &mut Vec<S>,
    ) -> Result<Option<NodeId>>
    where
        T: CostTile,
        P: SearchSpace<T, State = S>,
        O: Observer<T>,
    {
        while let Some(OpenEntry { id, .. }) = self.open.pop() {
            let pos = self.nodes[id].state.pos();
            grid.remove_marks(pos, self.config.frontier);
            grid.add_marks(pos, self.config.closed);

            if space.is_goal(&self.nodes[id].state) {
                return Ok(Some(id));
            }

            self.expanded += 1;
            if let Some(limit) = self.config.max_steps.filter(|&l| self.expanded > l) {
                return Err(SearchError::TooManySteps { limit });
            }

            let g = self.nodes[id].g;
            trace!("astar: expand {pos} g={g}");

            nbuf.clear();
            space.neighbours(grid, &self.nodes[id].state, nbuf);
            for next in nbuf.drain(..) {
                let npos = next.pos();
                let Some(tile) = grid.at(npos) else {
                    return Err(SearchError::InvalidNeighbour { pos: npos });
                };
                let tentative = g.saturating_add(tile.cost());

                let nid = self.node_id(next);
                let node = &mut self.nodes[nid];
                if tentative >= node.g {
                    continue;
                }
                node.g = tentative;
                node.f = tentative.saturating_add(space.estimate(&node.state));
                node.parent = Some(id);

                let entry = OpenEntry { id: nid, f: node.f };
                if self.open.contains(&nid) {
                    self.open.update(entry)?;
                } else {
                    self.open.insert(entry)?;
                }
                grid.add_marks(npos, self.config.frontier);
            }

            if observer.is_active() {
                let label = format!("open states: {}", self.open.len());
                observer.capture(grid, &label, 1);
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use gridwalk_core::{Direction, Marks, Point, Tile};

    use super::*;
    use crate::{FnSpace, SearchConfig, manhattan};

    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    enum Cell {
        #[default]
        Floor,
        Wall,
    }

    impl Tile for Cell {
        fn glyph(&self) -> char {
            match self {
                Cell::Floor => '.',
                Cell::Wall => '#',
            }
        }
    }

    impl CostTile for Cell {
        fn cost(&self) -> u32 {
            1
        }
    }

    fn cell(ch: char) -> std::result::Result<Cell, String> {
        match ch {
            '.' => Ok(Cell::Floor),
            '#' => Ok(Cell::Wall),
            _ => Err(format!("unknown cell {ch:?}")),
        }
    }

    /// Four-way walking that avoids walls.
    struct Walk {
        goal: Point,
        heuristic: bool,
    }

    impl SearchSpace<Cell> for Walk {
        type State = Point;

        fn neighbours(&self, grid: &Grid<Cell>, p: &Point, buf: &mut Vec<Point>) {
            buf.extend(grid.neighbours(*p).filter(|&n| grid.get(n) != Cell::Wall));
        }

        fn is_goal(&self, p: &Point) -> bool {
            *p == self.goal
        }

        fn estimate(&self, p: &Point) -> u32 {
            if self.heuristic {
                manhattan(*p, self.goal)
            } else {
                0
            }
        }
    }

    fn walk(goal: Point) -> Walk {
        Walk {
            goal,
            heuristic: true,
        }
    }

    /// Counts notifications and remembers the last label.
    #[derive(Default)]
    struct Recorder {
        frames: usize,
        last: String,
    }

    impl Observer<Cell> for Recorder {
        fn capture(&mut self, _grid: &Grid<Cell>, label: &str, delay: u32) {
            assert_eq!(delay, 1);
            self.frames += 1;
            self.last = label.to_string();
        }
    }

    #[test]
    fn open_grid_costs_manhattan_distance() {
        let mut grid = Grid::<Cell>::new(5, 5).unwrap();
        let mut pf = Pathfinder::new();
        let goal = Point::new(4, 4);

        for heuristic in [false, true] {
            let space = Walk { goal, heuristic };
            let path = pf.astar(&mut grid, &space, Point::ZERO).unwrap().unwrap();
            assert_eq!(path.cost, 8);
            assert_eq!(path.len(), 9);
            assert_eq!(path.positions[0], Point::ZERO);
            assert_eq!(path.goal(), Some(&goal));
            for w in path.positions.windows(2) {
                assert_eq!((w[1] - w[0]).manhattan_len(), 1);
            }
        }
    }

    #[test]
    fn start_on_goal_is_zero_cost() {
        let mut grid = Grid::<Cell>::new(3, 3).unwrap();
        let mut pf = Pathfinder::new();
        let p = Point::new(1, 2);
        let path = pf.astar(&mut grid, &walk(p), p).unwrap().unwrap();
        assert_eq!(path.cost, 0);
        assert_eq!(path.states, vec![p]);
        assert_eq!(pf.expanded(), 0);
    }

    #[test]
    fn detours_around_walls() {
        let mut grid = Grid::parse(
            "\
.....
.###.
...#.
.#.#.
.#...",
            cell,
        )
        .unwrap();
        let mut pf = Pathfinder::new();
        let path = pf
            .astar(&mut grid, &walk(Point::new(2, 3)), Point::new(4, 0))
            .unwrap()
            .unwrap();
        // Down the right edge and back in along the bottom row.
        assert_eq!(path.cost, 7);
        for p in &path.positions {
            assert_eq!(grid.get(*p), Cell::Floor);
        }
    }

    #[test]
    fn wall_column_means_no_path() {
        let mut grid = Grid::parse("..#..\n..#..\n..#..", cell).unwrap();
        let mut pf = Pathfinder::new();
        let found = pf.astar(&mut grid, &walk(Point::new(4, 1)), Point::new(0, 1));
        assert_eq!(found, Ok(None));
        // Everything left of the wall was expanded.
        assert_eq!(pf.expanded(), 6);
    }

    #[test]
    fn out_of_bounds_neighbour_is_fatal() {
        let mut grid = Grid::<Cell>::new(3, 3).unwrap();
        let mut pf = Pathfinder::with_config(SearchConfig::visualized());
        let space = FnSpace::new(
            |p: &Point, buf: &mut Vec<Point>| buf.push(p.step(Direction::West)),
            |_: &Point| false,
            |_: &Point| 0,
        );
        let err = pf.astar(&mut grid, &space, Point::new(0, 1)).unwrap_err();
        assert_eq!(
            err,
            SearchError::InvalidNeighbour {
                pos: Point::new(-1, 1)
            }
        );
        assert!(grid.marked(Marks::CLOSED).is_empty());
        assert!(grid.marked(Marks::PATH).is_empty());
    }

    #[test]
    fn neighbour_buffer_survives_errors() {
        let mut grid = Grid::<Cell>::new(3, 3).unwrap();
        let mut pf = Pathfinder::new();
        let capacity = pf.nbuf.capacity();
        assert!(capacity > 0);

        let off_grid = FnSpace::new(
            |p: &Point, buf: &mut Vec<Point>| buf.push(p.step(Direction::North)),
            |_: &Point| false,
            |_: &Point| 0,
        );
        assert!(pf.astar(&mut grid, &off_grid, Point::ZERO).is_err());
        assert!(pf.nbuf.capacity() >= capacity);

        pf.set_config(SearchConfig::new().with_max_steps(1));
        let space = Walk {
            goal: Point::new(2, 2),
            heuristic: false,
        };
        assert_eq!(
            pf.astar(&mut grid, &space, Point::ZERO),
            Err(SearchError::TooManySteps { limit: 1 })
        );
        assert!(pf.nbuf.capacity() >= capacity);

        // Still usable afterwards.
        pf.set_config(SearchConfig::new());
        let path = pf.astar(&mut grid, &space, Point::ZERO).unwrap().unwrap();
        assert_eq!(path.cost, 4);
    }

    #[test]
    fn start_outside_grid_is_fatal() {
        let mut grid = Grid::<Cell>::new(2, 2).unwrap();
        let mut pf = Pathfinder::new();
        let start = Point::new(2, 0);
        assert_eq!(
            pf.astar(&mut grid, &walk(Point::ZERO), start),
            Err(SearchError::InvalidStart { pos: start })
        );
    }

    #[test]
    fn transient_marks_are_cleared() {
        let mut grid = Grid::parse("...\n.#.\n...", cell).unwrap();
        grid.add_marks(Point::new(1, 1), Marks::USER);
        let mut pf = Pathfinder::with_config(
            SearchConfig::new()
                .with_frontier_marks(Marks::FRONTIER)
                .with_closed_marks(Marks::CLOSED),
        );
        pf.astar(&mut grid, &walk(Point::new(2, 2)), Point::ZERO)
            .unwrap()
            .unwrap();
        assert!(grid.marked(Marks::FRONTIER).is_empty());
        assert!(grid.marked(Marks::CLOSED).is_empty());
        assert_eq!(grid.marked(Marks::USER), vec![Point::new(1, 1)]);
    }

    #[test]
    fn path_marks_are_kept() {
        let mut grid = Grid::parse("...\n##.\n...", cell).unwrap();
        let mut pf = Pathfinder::with_config(SearchConfig::visualized());
        let path = pf
            .astar(&mut grid, &walk(Point::new(0, 2)), Point::ZERO)
            .unwrap()
            .unwrap();
        assert_eq!(path.cost, 6);

        let mut marked = grid.marked(Marks::PATH);
        let mut expected = path.positions.clone();
        marked.sort();
        expected.sort();
        assert_eq!(marked, expected);
        assert!(grid.marked(Marks::FRONTIER).is_empty());
    }

    #[test]
    fn step_limit_aborts() {
        let mut grid = Grid::<Cell>::new(10, 10).unwrap();
        let mut pf = Pathfinder::with_config(SearchConfig::visualized().with_max_steps(5));
        let space = Walk {
            goal: Point::new(9, 9),
            heuristic: false,
        };
        assert_eq!(
            pf.astar(&mut grid, &space, Point::ZERO),
            Err(SearchError::TooManySteps { limit: 5 })
        );
        assert!(grid.marked(Marks::CLOSED).is_empty());
    }

    #[test]
    fn observer_sees_every_expansion() {
        let mut grid = Grid::<Cell>::new(4, 1).unwrap();
        let mut pf = Pathfinder::new();
        let mut rec = Recorder::default();
        pf.astar_observed(&mut grid, &walk(Point::new(3, 0)), Point::ZERO, &mut rec)
            .unwrap()
            .unwrap();
        assert_eq!(rec.frames, pf.expanded());
        assert_eq!(rec.frames, 3);
        assert_eq!(rec.last, "open states: 1");
    }

    #[test]
    fn weighted_cells_prefer_cheap_detour() {
        let mut grid = Grid::parse("191\n111", |ch: char| {
            ch.to_digit(10).map(|d| d as u8).ok_or("not a digit")
        })
        .unwrap();
        let mut pf = Pathfinder::new();
        let space = FnSpace::new(
            |p: &Point, buf: &mut Vec<Point>| {
                buf.extend(
                    p.neighbors_4()
                        .into_iter()
                        .filter(|n| (0..3).contains(&n.x) && (0..2).contains(&n.y)),
                )
            },
            |p: &Point| *p == Point::new(2, 0),
            |p: &Point| manhattan(*p, Point::new(2, 0)),
        );
        let path = pf.astar(&mut grid, &space, Point::ZERO).unwrap().unwrap();
        assert_eq!(path.cost, 4);
        assert_eq!(
            path.positions,
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(1, 1),
                Point::new(2, 1),
                Point::new(2, 0)
            ]
        );
    }

    #[test]
    fn pathfinder_is_reusable() {
        let mut grid = Grid::parse(".#.\n...", cell).unwrap();
        let mut pf = Pathfinder::new();
        let a = pf.astar(&mut grid, &walk(Point::new(2, 0)), Point::ZERO).unwrap();
        let b = pf.astar(&mut grid, &walk(Point::new(2, 0)), Point::ZERO).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.map(|p| p.cost), Some(4));
    }
}
