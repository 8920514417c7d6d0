//! Whole-grid transforms: quarter-turn rotation and tilting.

use crate::geom::{Direction, Point, Range};
use crate::grid::Grid;
use crate::tile::Tile;

impl<T: Tile> Grid<T> {
    /// Rotate the grid clockwise so that the edge facing `towards` ends up
    /// on top: `North` is the identity, `East` a quarter turn clockwise,
    /// `South` a half turn and `West` a quarter turn counter-clockwise.
    ///
    /// Quarter turns swap width and height. Marks rotate with their cells.
    pub fn rotate(&mut self, towards: Direction) {
        let (w, h) = (self.width(), self.height());
        let map: fn(Point, i32, i32) -> Point = match towards {
            Direction::North => return,
            Direction::South => {
                self.cells.reverse();
                self.marks.reverse();
                return;
            }
            Direction::East => |p: Point, _w: i32, h: i32| Point::new(h - 1 - p.y, p.x),
            Direction::West => |p: Point, w: i32, _h: i32| Point::new(p.y, w - 1 - p.x),
        };

        // Quarter turn: the new grid is h wide and w tall.
        let new_w = h as usize;
        let mut cells = self.cells.clone();
        let mut marks = self.marks.clone();
        for (i, p) in self.bounds.iter().enumerate() {
            let q = map(p, w, h);
            let j = q.y as usize * new_w + q.x as usize;
            cells[j] = self.cells[i];
            marks[j] = self.marks[i];
        }
        self.cells = cells;
        self.marks = marks;
        self.bounds = Range::new(0, 0, h, w);
    }

    /// Slide every `movable` cell as far as it can go towards `dir`, moving
    /// only through cells equal to the grid's `empty` value.
    ///
    /// Returns how many cells changed position.
    pub fn tilt(&mut self, dir: Direction, movable: T) -> usize {
        let len = self.cells.len();
        // Cells closest to the destination edge settle first.
        let order: Box<dyn Iterator<Item = usize>> = match dir {
            Direction::North | Direction::West => Box::new(0..len),
            Direction::South | Direction::East => Box::new((0..len).rev()),
        };

        let mut moved = 0;
        for i in order {
            if self.cells[i] != movable {
                continue;
            }
            let start = self.position_of(i);
            let mut p = start;
            while self.at(p.step(dir)) == Some(self.empty) {
                p = p.step(dir);
            }
            if p != start {
                self.cells[i] = self.empty;
                self.set(p, movable);
                moved += 1;
            }
        }
        moved
    }
}
