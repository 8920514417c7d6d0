//! Lattice polygon area.
//!
//! For loops far too large to rasterize and [`fill`](crate::fill), the
//! enclosed cell count follows from the shoelace formula plus Pick's
//! theorem.

use gridwalk_core::{Direction, Point};

/// Number of cells enclosed by a closed loop of unit steps, boundary cells
/// included.
///
/// `points` lists the loop's cells in order; consecutive points (and the
/// last and first) must be one step apart. Fewer than three points enclose
/// nothing and yield 0.
pub fn area(points: &[Point]) -> i64 {
    if points.len() < 3 {
        return 0;
    }
    let twice: i64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| shoelace_term(*a, *b))
        .sum();
    twice.abs() / 2 + points.len() as i64 / 2 + 1
}

/// Like [`area`] for a loop given as `(direction, length)` moves from an
/// arbitrary origin. Runs may be arbitrarily long.
///
/// The moves must return to the origin.
pub fn loop_area<I>(moves: I) -> i64
where
    I: IntoIterator<Item = (Direction, i64)>,
{
    let (mut x, mut y) = (0i64, 0i64);
    let mut twice = 0i64;
    let mut perimeter = 0i64;
    for (dir, len) in moves {
        let d = dir.offset();
        let (nx, ny) = (x + i64::from(d.x) * len, y + i64::from(d.y) * len);
        twice += (y + ny) * (x - nx);
        perimeter += len.abs();
        (x, y) = (nx, ny);
    }
    twice.abs() / 2 + perimeter / 2 + 1
}

#[inline]
fn shoelace_term(a: Point, b: Point) -> i64 {
    (i64::from(a.y) + i64::from(b.y)) * (i64::from(a.x) - i64::from(b.x))
}
