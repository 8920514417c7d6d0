use gridwalk_core::Point;

/// Manhattan (L1) distance between two points.
///
/// Admissible as an A* estimate whenever every step costs at least 1.
#[inline]
pub fn manhattan(a: Point, b: Point) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}
