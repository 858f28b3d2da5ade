//! Fixed-size two dimensional container with removable cells.

use crate::Position;

/// Dense `width × height` grid whose cells may be individually removed.
///
/// Dimensions are fixed at construction. A coordinate is only considered
/// valid when it lies within bounds and its cell is still present; deleted
/// cells behave exactly like coordinates outside the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    width: u32,
    height: u32,
    cells: Vec<Option<T>>,
}

impl<T: Clone> Grid<T> {
    /// Creates a grid where every cell holds a copy of `fill`.
    #[must_use]
    pub fn new(width: u32, height: u32, fill: T) -> Self {
        Self::from_fn(width, height, |_| fill.clone())
    }
}

impl<T> Grid<T> {
    /// Creates a grid by evaluating `cell` for every position.
    ///
    /// Positions are visited column by column (x outer, y inner).
    #[must_use]
    pub fn from_fn<F>(width: u32, height: u32, mut cell: F) -> Self
    where
        F: FnMut(Position) -> T,
    {
        let capacity = usize::try_from(u64::from(width) * u64::from(height)).unwrap_or(0);
        let mut cells: Vec<Option<T>> = Vec::with_capacity(capacity);
        cells.resize_with(capacity, || None);

        let mut grid = Self {
            width,
            height,
            cells,
        };
        for position in grid.positions().collect::<Vec<_>>() {
            if let Some(index) = grid.index(position) {
                grid.cells[index] = Some(cell(position));
            }
        }
        grid
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether `position` lies within the grid bounds.
    ///
    /// Unlike [`Grid::valid`] this ignores whether the cell was deleted.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.index(position).is_some()
    }

    /// Reports whether `position` is in bounds and its cell is present.
    #[must_use]
    pub fn valid(&self, position: Position) -> bool {
        self.spot(position).is_some()
    }

    /// Cell stored at `position`, if the position is valid.
    #[must_use]
    pub fn spot(&self, position: Position) -> Option<&T> {
        self.index(position)
            .and_then(|index| self.cells.get(index))
            .and_then(Option::as_ref)
    }

    /// Mutable cell stored at `position`, if the position is valid.
    pub fn spot_mut(&mut self, position: Position) -> Option<&mut T> {
        let index = self.index(position)?;
        self.cells.get_mut(index).and_then(Option::as_mut)
    }

    /// Removes the cell at `position`, returning it if it was present.
    pub fn delete(&mut self, position: Position) -> Option<T> {
        let index = self.index(position)?;
        self.cells.get_mut(index).and_then(Option::take)
    }

    /// Axis-adjacent valid positions around `position`.
    ///
    /// Neighbours are yielded in the order `+x`, `-x`, `+y`, `-y`. The
    /// iterator is empty when `position` itself is not valid.
    #[must_use]
    pub fn neighbors(&self, position: Position) -> Neighbors {
        let mut neighbors = Neighbors::default();
        if !self.valid(position) {
            return neighbors;
        }

        let candidates = [
            Position::new(position.x() + 1, position.y()),
            Position::new(position.x() - 1, position.y()),
            Position::new(position.x(), position.y() + 1),
            Position::new(position.x(), position.y() - 1),
        ];
        for candidate in candidates {
            if self.valid(candidate) {
                neighbors.push(candidate);
            }
        }
        neighbors
    }

    /// Every in-bounds position, x outer and y inner, deleted or not.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let width = i32::try_from(self.width).unwrap_or(i32::MAX);
        let height = i32::try_from(self.height).unwrap_or(i32::MAX);
        (0..width).flat_map(move |x| (0..height).map(move |y| Position::new(x, y)))
    }

    fn index(&self, position: Position) -> Option<usize> {
        let x = u32::try_from(position.x()).ok()?;
        let y = u32::try_from(position.y()).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }

        let row = usize::try_from(y).ok()?;
        let column = usize::try_from(x).ok()?;
        let width = usize::try_from(self.width).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

/// Iterator over the up to four neighbours of a grid cell.
#[derive(Clone, Debug, Default)]
pub struct Neighbors {
    buffer: [Option<Position>; 4],
    len: usize,
    cursor: usize,
}

impl Neighbors {
    fn push(&mut self, position: Position) {
        if self.len < self.buffer.len() {
            self.buffer[self.len] = Some(position);
            self.len += 1;
        }
    }
}

impl Iterator for Neighbors {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.len {
            return None;
        }

        let value = self.buffer[self.cursor];
        self.cursor += 1;
        value
    }
}
