//! The tile grid.
//!
//! Tiles are stored in a single row-major buffer. A value of `0` is an empty
//! (consumed) tile, `1..=9` is the number of steps the tile encodes.

use rand::Rng;

use crate::error::GridError;
use crate::{Direction, Position};

/// Largest step count a tile can hold.
pub const MAX_TILE: u8 = 9;

/// A rectangular board of numbered tiles.
///
/// The only write path is [`Grid::clear`]; dimensions never change after
/// construction. Resizing means building a new grid.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Create a grid with every tile drawn uniformly from `1..=9`.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Result<Self, GridError> {
        let area = checked_area(rows, cols)?;
        let cells = (0..area)
            .map(|_| rng.gen_range(1..=MAX_TILE))
            .collect();
        Ok(Grid { rows, cols, cells })
    }

    /// Build a grid from explicit rows of tile values.
    ///
    /// Every row must have the same length and every value must be `0..=9`.
    pub fn from_rows<T: AsRef<[u8]>>(rows: &[T]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let area = checked_area(height, width)?;

        let mut cells = Vec::with_capacity(area);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                if value > MAX_TILE {
                    return Err(GridError::InvalidTile { row, col, value });
                }
                cells.push(value);
            }
        }

        Ok(Grid {
            rows: height,
            cols: width,
            cells,
        })
    }

    /// `(rows, cols)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of cells.
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Value of the tile at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid. Callers must check
    /// [`Grid::in_bounds`] (or go through [`Grid::offset`]) first.
    pub fn get(&self, pos: Position) -> u8 {
        self.cells[self.index(pos)]
    }

    /// Fallible variant of [`Grid::get`] for unchecked coordinates.
    pub fn try_get(&self, pos: Position) -> Result<u8, GridError> {
        if self.in_bounds(pos) {
            Ok(self.cells[pos.row * self.cols + pos.col])
        } else {
            Err(self.out_of_range(pos))
        }
    }

    /// Mark the tile at `pos` as consumed.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    pub fn clear(&mut self, pos: Position) {
        let idx = self.index(pos);
        self.cells[idx] = 0;
    }

    /// The cell `distance` steps from `pos` along `direction`, if it lies on
    /// the grid.
    pub fn offset(&self, pos: Position, direction: Direction, distance: usize) -> Option<Position> {
        let (dy, dx) = direction.delta();
        let row = pos.row.checked_add_signed(dy.checked_mul(distance as isize)?)?;
        let col = pos.col.checked_add_signed(dx.checked_mul(distance as isize)?)?;
        let target = Position::new(row, col);
        self.in_bounds(target).then_some(target)
    }

    /// Number of tiles that have not been consumed.
    pub fn open_cells(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, u8)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &v)| (Position::new(i / cols, i % cols), v))
    }

    fn index(&self, pos: Position) -> usize {
        assert!(self.in_bounds(pos), "{}", self.out_of_range(pos));
        pos.row * self.cols + pos.col
    }

    fn out_of_range(&self, pos: Position) -> GridError {
        GridError::OutOfRange {
            row: pos.row,
            col: pos.col,
            rows: self.rows,
            cols: self.cols,
        }
    }
}

/// `rows * cols`, refusing empty and overflowing sizes.
fn checked_area(rows: usize, cols: usize) -> Result<usize, GridError> {
    rows.checked_mul(cols)
        .filter(|&area| area > 0)
        .ok_or(GridError::InvalidDimensions { rows, cols })
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Grid {{ rows: {}, cols: {} }}", self.rows, self.cols)?;
        for row in self.cells.chunks(self.cols) {
            for &val in row {
                if val == 0 {
                    write!(f, ".")?;
                } else {
                    write!(f, "{}", val)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
