//! Scanline flood fill.
//!
//! Spans of one row are filled at a time and the rows above and below are
//! queued as `(x1, x2, y, dy)` spans, so each cell is read a small constant
//! number of times and the queue stays far smaller than with a per-cell
//! fill.

use std::collections::VecDeque;

use gridwalk_core::{Grid, NoObserver, Observer, Point, Tile};
use log::{debug, trace, warn};

/// Row segment `x1..=x2` on row `y`, reached while moving in direction `dy`.
#[derive(Clone, Copy, Debug)]
struct Span {
    x1: i32,
    x2: i32,
    y: i32,
    dy: i32,
}

/// Fill the 4-connected region of empty cells around `seed` with `value`.
///
/// A cell is empty when it equals [`Grid::empty`]. Returns the number of
/// cells written. Nothing happens (and 0 is returned) when `seed` is outside
/// the grid or not empty, or when `value` is itself the empty value.
pub fn fill<T: Tile>(grid: &mut Grid<T>, seed: Point, value: T) -> usize {
    fill_observed(grid, seed, value, NoObserver)
}

/// Like [`fill`], notifying `observer` after every horizontal run that
/// wrote at least one cell.
pub fn fill_observed<T, O>(grid: &mut Grid<T>, seed: Point, value: T, mut observer: O) -> usize
where
    T: Tile,
    O: Observer<T>,
{
    if value == grid.empty() {
        warn!("fill: fill value is the empty value, ignoring fill at {seed}");
        return 0;
    }
    if !is_empty(grid, seed.x, seed.y) {
        return 0;
    }

    let mut queue = VecDeque::new();
    queue.push_back(Span {
        x1: seed.x,
        x2: seed.x,
        y: seed.y,
        dy: 1,
    });
    queue.push_back(Span {
        x1: seed.x,
        x2: seed.x,
        y: seed.y - 1,
        dy: -1,
    });

    let mut filled = 0;
    let mut run = 0;
    while let Some(span) = queue.pop_front() {
        trace!("fill: span {span:?}");
        let Span { mut x1, x2, y, dy } = span;

        // Extend left of the span; what lies beyond x1 on the far row has
        // not been seen yet.
        let mut x = x1;
        if is_empty(grid, x, y) {
            while is_empty(grid, x - 1, y) {
                grid.set(Point::new(x - 1, y), value);
                run += 1;
                x -= 1;
            }
            if x < x1 {
                queue.push_back(Span {
                    x1: x,
                    x2: x1 - 1,
                    y: y - dy,
                    dy: -dy,
                });
            }
        }

        while x1 <= x2 {
            while is_empty(grid, x1, y) {
                grid.set(Point::new(x1, y), value);
                run += 1;
                x1 += 1;
            }
            if x1 > x {
                queue.push_back(Span {
                    x1: x,
                    x2: x1 - 1,
                    y: y + dy,
                    dy,
                });
            }
            // The run went past the parent span: look back the other way.
            if x1 - 1 > x2 {
                queue.push_back(Span {
                    x1: x2 + 1,
                    x2: x1 - 1,
                    y: y - dy,
                    dy: -dy,
                });
            }

            if run > 0 {
                filled += run;
                run = 0;
                if observer.is_active() {
                    observer.capture(grid, "", 1);
                }
            }

            x1 += 1;
            while x1 <= x2 && !is_empty(grid, x1, y) {
                x1 += 1;
            }
            x = x1;
        }
    }

    debug!("fill: wrote {filled} cells from {seed}");
    filled
}

#[inline]
fn is_empty<T: Tile>(grid: &Grid<T>, x: i32, y: i32) -> bool {
    grid.at(Point::new(x, y)) == Some(grid.empty())
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    use super::*;

    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    enum Paint {
        #[default]
        Empty,
        Wall,
        Fill,
    }

    impl Tile for Paint {
        fn glyph(&self) -> char {
            match self {
                Paint::Empty => '.',
                Paint::Wall => '#',
                Paint::Fill => 'o',
            }
        }
    }

    fn paint(ch: char) -> Result<Paint, String> {
        match ch {
            '.' => Ok(Paint::Empty),
            '#' => Ok(Paint::Wall),
            'o' => Ok(Paint::Fill),
            _ => Err(format!("unknown paint {ch:?}")),
        }
    }

    fn grid(text: &str) -> Grid<Paint> {
        Grid::parse(text, paint).unwrap()
    }

    /// Plain 4-connected breadth-first fill, used as a reference.
    fn naive_region(grid: &Grid<Paint>, seed: Point) -> HashSet<Point> {
        let mut seen = HashSet::new();
        if grid.at(seed) != Some(Paint::Empty) {
            return seen;
        }
        let mut queue = VecDeque::from([seed]);
        seen.insert(seed);
        while let Some(p) = queue.pop_front() {
            for n in grid.neighbours(p) {
                if grid.get(n) == Paint::Empty && seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        seen
    }

    #[derive(Default)]
    struct Frames(usize);

    impl Observer<Paint> for Frames {
        fn capture(&mut self, _grid: &Grid<Paint>, label: &str, delay: u32) {
            assert_eq!((label, delay), ("", 1));
            self.0 += 1;
        }
    }

    #[test]
    fn fills_open_grid() {
        let mut g = Grid::<Paint>::new(4, 4).unwrap();
        assert_eq!(fill(&mut g, Point::new(1, 2), Paint::Fill), 16);
        assert_eq!(g.count(Paint::Fill), 16);
    }

    #[test]
    fn stops_at_wall_column() {
        let mut g = grid("..#.\n..#.\n..#.\n..#.");
        assert_eq!(fill(&mut g, Point::ZERO, Paint::Fill), 8);
        assert_eq!(g.to_string(), "oo#.\noo#.\noo#.\noo#.\n");
    }

    #[test]
    fn second_fill_is_noop() {
        let mut g = grid("..#.\n..#.");
        let before = fill(&mut g, Point::ZERO, Paint::Fill);
        let snapshot = g.clone();
        assert_eq!(before, 4);
        assert_eq!(fill(&mut g, Point::ZERO, Paint::Fill), 0);
        assert_eq!(g, snapshot);
    }

    #[test]
    fn ignores_bad_seeds_and_values() {
        let mut g = grid("..#\n...");
        let snapshot = g.clone();
        assert_eq!(fill(&mut g, Point::new(2, 0), Paint::Fill), 0);
        assert_eq!(fill(&mut g, Point::new(3, 0), Paint::Fill), 0);
        assert_eq!(fill(&mut g, Point::new(0, -1), Paint::Fill), 0);
        assert_eq!(fill(&mut g, Point::ZERO, Paint::Empty), 0);
        assert_eq!(g, snapshot);
    }

    #[test]
    fn diagonal_wall_bisects() {
        let mut g = Grid::<Paint>::new(8, 8).unwrap();
        for i in 0..8 {
            g.set(Point::new(i, 7 - i), Paint::Wall);
        }
        // Cells strictly above the anti-diagonal.
        assert_eq!(fill(&mut g, Point::ZERO, Paint::Fill), 28);
        assert_eq!(g.count(Paint::Empty), 28);
        assert_eq!(fill(&mut g, Point::new(7, 7), Paint::Fill), 28);
        assert_eq!(g.count(Paint::Empty), 0);
    }

    #[test]
    fn run_past_parent_span_turns_back() {
        // Seeded in the left prong: reaching the right prong needs the span
        // queued back upwards from the overshooting bottom run.
        let mut g = grid("#.#.#\n#...#\n#####");
        assert_eq!(fill(&mut g, Point::new(1, 0), Paint::Fill), 5);
        assert_eq!(g.to_string(), "#o#o#\n#ooo#\n#####\n");
    }

    #[test]
    fn u_shape_from_the_bottom() {
        let text = "\
.#...#.
.#.#.#.
.#.#.#.
...#...";
        let mut g = grid(text);
        assert_eq!(fill(&mut g, Point::new(3, 0), Paint::Fill), 19);
        assert_eq!(g.count(Paint::Empty), 0);
    }

    #[test]
    fn matches_breadth_first_fill() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..300 {
            let w = rng.random_range(1..=24);
            let h = rng.random_range(1..=16);
            let density = rng.random_range(0.05..0.65);
            let mut g = Grid::<Paint>::new(w, h).unwrap();
            g.map_cells(|_, _| {
                if rng.random_bool(density) {
                    Paint::Wall
                } else {
                    Paint::Empty
                }
            });

            let corners = [Point::ZERO, Point::new(w - 1, h - 1)];
            let random = [(); 3].map(|_| Point::new(rng.random_range(0..w), rng.random_range(0..h)));
            for seed in corners.into_iter().chain(random) {
                let expected = naive_region(&g, seed);
                let mut filled = g.clone();
                let n = fill(&mut filled, seed, Paint::Fill);
                assert_eq!(n, expected.len(), "seed {seed} in\n{g}");
                let got: HashSet<Point> = filled
                    .iter()
                    .filter(|&(_, c)| c == Paint::Fill)
                    .map(|(p, _)| p)
                    .collect();
                assert_eq!(got, expected, "seed {seed} in\n{g}");
            }
        }
    }

    #[test]
    fn observer_sees_each_run() {
        let mut g = grid("..#\n..#\n...");
        let mut frames = Frames::default();
        let n = fill_observed(&mut g, Point::ZERO, Paint::Fill, &mut frames);
        assert_eq!(n, 7);
        assert!(frames.0 >= 3);
        assert!(frames.0 <= n);
    }
}
