use serde::Serialize;

use crate::input::Direction;

/// Grid position in cell coordinates, `(0, 0)` at the top-left corner.
///
/// Coordinates are signed so a head that steps one cell past the top or left
/// wall can still be represented and rejected by [`Grid::in_bounds`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dc, dr) = direction.delta();
        Self {
            col: self.col + dc,
            row: self.row + dr,
        }
    }
}

/// Board geometry: cell size in pixels plus the derived column and row counts.
///
/// Built by [`crate::config::BoardConfig::grid`], which guarantees non-zero,
/// cell-aligned dimensions.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Grid {
    cell_size: u32,
    cols: u32,
    rows: u32,
}

impl Grid {
    /// Creates a grid of `cols` x `rows` cells.
    ///
    /// Callers outside configuration loading are expected to pass non-zero
    /// extents no larger than [`crate::config::MAX_GRID_EXTENT`].
    #[must_use]
    pub fn new(cell_size: u32, cols: u32, rows: u32) -> Self {
        debug_assert!(cell_size > 0 && cols > 0 && rows > 0);
        Self {
            cell_size,
            cols,
            rows,
        }
    }

    #[must_use]
    pub fn cell_size(self) -> u32 {
        self.cell_size
    }

    #[must_use]
    pub fn cols(self) -> u32 {
        self.cols
    }

    #[must_use]
    pub fn rows(self) -> u32 {
        self.rows
    }

    /// Returns the total number of cells on the board.
    #[must_use]
    pub fn total_cells(self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Returns true when `cell` lies inside the board.
    #[must_use]
    pub fn in_bounds(self, cell: Cell) -> bool {
        cell.col >= 0
            && cell.row >= 0
            && i64::from(cell.col) < i64::from(self.cols)
            && i64::from(cell.row) < i64::from(self.rows)
    }

    /// Returns the cell at the middle of the board, rounding towards the origin.
    #[must_use]
    pub fn center(self) -> Cell {
        Cell::new(extent_to_coord(self.cols / 2), extent_to_coord(self.rows / 2))
    }

    /// Top-left pixel of `cell`.
    #[must_use]
    pub fn to_pixels(self, cell: Cell) -> (i64, i64) {
        let size = i64::from(self.cell_size);
        (i64::from(cell.col) * size, i64::from(cell.row) * size)
    }

    /// Cell containing the pixel `(x, y)`.
    #[must_use]
    pub fn from_pixels(self, x: i64, y: i64) -> Cell {
        let size = i64::from(self.cell_size);
        Cell::new(
            pixel_to_coord(x.div_euclid(size)),
            pixel_to_coord(y.div_euclid(size)),
        )
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let cols = extent_to_coord(self.cols);
        let rows = extent_to_coord(self.rows);
        (0..rows).flat_map(move |row| (0..cols).map(move |col| Cell::new(col, row)))
    }

    /// Returns the `index`-th cell in row-major order.
    #[must_use]
    pub(crate) fn cell_at(self, index: usize) -> Cell {
        let cols = self.cols as usize;
        Cell::new(
            extent_to_coord((index % cols) as u32),
            extent_to_coord((index / cols) as u32),
        )
    }
}

fn extent_to_coord(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn pixel_to_coord(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}
