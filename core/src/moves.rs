//! Move legality and resolution.
//!
//! A move from `from` in `direction` jumps exactly `step` cells, where `step`
//! is the value of the tile adjacent to the player in that direction. Every
//! cell on the way, landing cell included, must be on the board and not yet
//! consumed. [`plan`] is the only place this rule is written down; hints and
//! game-over detection go through it as well.

use log::trace;

use crate::{Direction, Grid, Position};

/// The cells a legal move would consume, in travel order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePath {
    direction: Direction,
    cells: Vec<Position>,
}

impl MovePath {
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Cells from the one next to the player to the landing cell.
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    /// Number of cells travelled, equal to the adjacent tile's value.
    pub fn step(&self) -> usize {
        self.cells.len()
    }

    /// Where the player ends up.
    pub fn destination(&self) -> Position {
        // A plan always holds at least the adjacent cell.
        self.cells[self.cells.len() - 1]
    }
}

/// Result of trying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move is not allowed; nothing changed.
    Illegal,
    /// The path was consumed and the player moved.
    Resolved {
        new_position: Position,
        score_delta: u32,
    },
}

impl MoveOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, MoveOutcome::Resolved { .. })
    }
}

/// Check whether a move is legal without touching the grid.
///
/// Returns the path the move would consume, or `None` if the adjacent cell is
/// off the board or empty, or if any of the `step` cells along the way is.
pub fn plan(grid: &Grid, from: Position, direction: Direction) -> Option<MovePath> {
    let first = grid.offset(from, direction, 1)?;
    let step = grid.get(first) as usize;
    if step == 0 {
        return None;
    }

    let mut cells = Vec::with_capacity(step);
    for i in 1..=step {
        let cell = grid.offset(from, direction, i)?;
        if grid.get(cell) == 0 {
            return None;
        }
        cells.push(cell);
    }

    Some(MovePath { direction, cells })
}

/// Apply a move to the grid.
///
/// On success every cell on the path is cleared and the score delta equals
/// the number of cleared cells. An illegal move leaves the grid untouched.
pub fn resolve(grid: &mut Grid, from: Position, direction: Direction) -> MoveOutcome {
    let Some(path) = plan(grid, from, direction) else {
        trace!("illegal move {:?} from {}", direction, from);
        return MoveOutcome::Illegal;
    };

    for &cell in path.cells() {
        grid.clear(cell);
    }

    let new_position = path.destination();
    trace!(
        "moved {:?} from {} to {}, cleared {}",
        direction,
        from,
        new_position,
        path.step()
    );

    MoveOutcome::Resolved {
        new_position,
        score_delta: path.step() as u32,
    }
}

// =============================================================================
// Tests
// =============================================================================
