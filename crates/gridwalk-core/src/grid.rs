//! The [`Grid`] type: a fixed-size 2D array of typed cells.
//!
//! Cells are stored row-major: the cell at `(x, y)` lives at index
//! `y * width + x`. Beside the cells every grid carries a [`Marks`] bitplane
//! for transient algorithm state, so searches can flag cells without
//! changing their values.

use std::fmt;

use log::trace;

use crate::error::{GridError, Result};
use crate::geom::{Point, Range, RangeIter};
use crate::marks::Marks;
use crate::tile::Tile;

/// A bounded 2D grid of `T` cells with a designated `empty` value.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    pub(crate) cells: Vec<T>,
    pub(crate) marks: Vec<Marks>,
    pub(crate) bounds: Range,
    pub(crate) empty: T,
}

impl<T: Tile> Grid<T> {
    /// Create a `width` x `height` grid filled with `T::default()`, which is
    /// also the grid's `empty` value.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        Self::with_empty(width, height, T::default())
    }

    /// Create a grid whose cells and `empty` value are all `empty`.
    pub fn with_empty(width: i32, height: i32, empty: T) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidSize { width, height });
        }
        let len = width as usize * height as usize;
        Ok(Self {
            cells: vec![empty; len],
            marks: vec![Marks::NONE; len],
            bounds: Range::new(0, 0, width, height),
            empty,
        })
    }

    /// Build a grid from already-decoded rows (`rows[y][x]`).
    ///
    /// Every row must have the same, non-zero length and every tile must be
    /// [valid](Tile::is_valid).
    pub fn from_rows<I, R>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[T]>,
    {
        let mut cells = Vec::new();
        let mut width = 0usize;
        let mut height = 0usize;

        for (y, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            if y == 0 {
                width = row.len();
            } else if row.len() != width {
                return Err(GridError::RaggedRow {
                    row: y,
                    expected: width,
                    got: row.len(),
                });
            }
            if let Some(x) = row.iter().position(|t| !t.is_valid()) {
                return Err(GridError::InvalidTile {
                    pos: Point::new(x as i32, y as i32),
                });
            }
            cells.extend_from_slice(row);
            height += 1;
        }

        if width == 0 || height == 0 {
            return Err(GridError::Empty);
        }
        let (Ok(w), Ok(h)) = (i32::try_from(width), i32::try_from(height)) else {
            return Err(GridError::InvalidSize {
                width: i32::MAX,
                height: i32::MAX,
            });
        };
        trace!("built {}x{} grid from rows", w, h);

        Ok(Self {
            marks: vec![Marks::NONE; cells.len()],
            cells,
            bounds: Range::new(0, 0, w, h),
            empty: T::default(),
        })
    }

    /// Build a grid from text, one row per line, decoding every character
    /// with `decode`.
    ///
    /// Blank lines before the first and after the last row are ignored.
    pub fn parse<E, F>(text: &str, mut decode: F) -> Result<Self>
    where
        E: fmt::Display,
        F: FnMut(char) -> std::result::Result<T, E>,
    {
        let mut lines: Vec<&str> = text
            .lines()
            .skip_while(|l| l.trim().is_empty())
            .collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }

        let mut rows = Vec::with_capacity(lines.len());
        for (y, line) in lines.iter().enumerate() {
            let mut row = Vec::with_capacity(line.len());
            for (x, ch) in line.chars().enumerate() {
                let tile = decode(ch).map_err(|e| GridError::Decode {
                    pos: Point::new(x as i32, y as i32),
                    reason: e.to_string(),
                })?;
                row.push(tile);
            }
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    /// The bounding range of the grid, always anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Size of the grid as a `Point`.
    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    /// Width.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: grids have at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// The value treated as fillable empty space.
    #[inline]
    pub fn empty(&self) -> T {
        self.empty
    }

    /// Change the value treated as empty space. Cells are not touched.
    #[inline]
    pub fn set_empty(&mut self, empty: T) {
        self.empty = empty;
    }

    /// Flat index of `p`, or `None` outside the grid.
    #[inline]
    pub fn index_of(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(p.y as usize * self.bounds.width() as usize + p.x as usize)
    }

    /// Position of flat index `idx`: `(idx % width, idx / width)`.
    #[inline]
    pub fn position_of(&self, idx: usize) -> Point {
        let w = self.bounds.width() as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    /// The cell at `p`, or `None` if `p` is outside the grid.
    #[inline]
    pub fn at(&self, p: Point) -> Option<T> {
        self.index_of(p).map(|i| self.cells[i])
    }

    /// The cell at `p`, or the grid's `empty` value outside the grid.
    #[inline]
    pub fn get(&self, p: Point) -> T {
        self.at(p).unwrap_or(self.empty)
    }

    /// Set the cell at `p`. Returns `false` (and does nothing) if `p` is
    /// outside the grid.
    #[inline]
    pub fn set(&mut self, p: Point, value: T) -> bool {
        match self.index_of(p) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    /// Marks on the cell at `p`, or `None` outside the grid.
    #[inline]
    pub fn marks_at(&self, p: Point) -> Option<Marks> {
        self.index_of(p).map(|i| self.marks[i])
    }

    /// OR `bits` into the marks at `p`. No-op outside the grid.
    #[inline]
    pub fn add_marks(&mut self, p: Point, bits: Marks) {
        if let Some(i) = self.index_of(p) {
            self.marks[i] |= bits;
        }
    }

    /// Clear `bits` from the marks at `p`. No-op outside the grid.
    #[inline]
    pub fn remove_marks(&mut self, p: Point, bits: Marks) {
        if let Some(i) = self.index_of(p) {
            self.marks[i] = self.marks[i].without(bits);
        }
    }

    /// Clear `bits` from every cell.
    pub fn clear_marks(&mut self, bits: Marks) {
        if bits.is_empty() {
            return;
        }
        for m in self.marks.iter_mut() {
            *m = m.without(bits);
        }
    }

    /// Row-major positions of every cell carrying all of `bits`.
    pub fn marked(&self, bits: Marks) -> Vec<Point> {
        self.marks
            .iter()
            .enumerate()
            .filter(|(_, m)| m.contains(bits))
            .map(|(i, _)| self.position_of(i))
            .collect()
    }

    /// In-bounds cardinal neighbours of `p`, in north, east, south, west
    /// order.
    #[inline]
    pub fn neighbours(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        p.neighbors_4()
            .into_iter()
            .filter(move |&n| self.bounds.contains(n))
    }

    /// Fill every cell with `value`.
    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }

    /// Replace every cell with `f(position, cell)`.
    pub fn map_cells(&mut self, mut f: impl FnMut(Point, T) -> T) {
        let w = self.bounds.width() as usize;
        for (i, c) in self.cells.iter_mut().enumerate() {
            let p = Point::new((i % w) as i32, (i / w) as i32);
            *c = f(p, *c);
        }
    }

    /// Count how many cells equal `value`.
    pub fn count(&self, value: T) -> usize {
        self.cells.iter().filter(|&&c| c == value).count()
    }

    /// Count how many cells satisfy a predicate.
    pub fn count_fn(&self, mut f: impl FnMut(Point, T) -> bool) -> usize {
        self.iter().filter(|&(p, c)| f(p, c)).count()
    }

    /// The cells as a row-major slice.
    #[inline]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Row-major iterator over `(Point, T)` pairs.
    pub fn iter(&self) -> GridIter<'_, T> {
        GridIter {
            points: self.bounds.iter(),
            cells: self.cells.iter(),
        }
    }
}

impl<T: Tile> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.bounds.width() as usize;
        for row in self.cells.chunks(w) {
            for c in row {
                write!(f, "{}", c.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// GridIter
// ---------------------------------------------------------------------------

/// Iterator over `(Point, T)` pairs of a [`Grid`].
pub struct GridIter<'a, T> {
    points: RangeIter,
    cells: std::slice::Iter<'a, T>,
}

impl<T: Copy> Iterator for GridIter<'_, T> {
    type Item = (Point, T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        Some((self.points.next()?, *self.cells.next()?))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cells.size_hint()
    }
}

impl<T: Copy> ExactSizeIterator for GridIter<'_, T> {}

impl<'a, T: Tile> IntoIterator for &'a Grid<T> {
    type Item = (Point, T);
    type IntoIter = GridIter<'a, T>;

    fn into_iter(self) -> GridIter<'a, T> {
        self.iter()
    }
}
