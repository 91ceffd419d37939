//! # Greed Core Engine
//!
//! Board engine for Greed, a single-player board-clearing game. The board is
//! a grid of tiles numbered 1 to 9. The player jumps in one of eight
//! directions, exactly as many cells as the tile next to them in that
//! direction says, and every tile on the way is consumed and scored. The run
//! ends when no direction is legal.
//!
//! The crate holds no global state and performs no I/O. Hosts drive a
//! [`GameSession`], render from its read-only accessors and feed finished
//! runs into a [`HighScoreLedger`].
//!
//! ## Example
//!
//! ```rust
//! use greed_core::{Direction, GameSession, HighScoreLedger};
//!
//! let mut session = GameSession::new(22, 79, 42).unwrap();
//! for direction in session.hints().directions() {
//!     println!("{:?} is playable", direction);
//! }
//! session.attempt_move(Direction::Up);
//!
//! let mut ledger = HighScoreLedger::new();
//! let recorded = ledger.record(session.score(), session.percent_cleared());
//! print!("{}", ledger.report(recorded.rank));
//! ```

use std::fmt;

pub mod error;
pub mod grid;
pub mod hints;
pub mod moves;
pub mod scores;
pub mod session;
pub mod settings;

pub use error::{GridError, SessionError, SettingsError};
pub use grid::Grid;
pub use hints::Hints;
pub use moves::{MoveOutcome, MovePath};
pub use scores::{HighScore, HighScoreLedger, Recorded, MAX_SCORES};
pub use session::GameSession;
pub use settings::{Command, Input, KeyBindings, Settings};

/// The eight move directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
    UpLeft = 4,
    UpRight = 5,
    DownLeft = 6,
    DownRight = 7,
}

impl Direction {
    /// Convert a u8 to a Direction, in [`Direction::all`] order.
    /// Returns None for values above 7.
    pub fn from_u8(value: u8) -> Option<Direction> {
        Direction::all().get(usize::from(value)).copied()
    }

    /// All eight directions: the four orthogonal ones, then the diagonals.
    pub fn all() -> [Direction; 8] {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
            Direction::UpLeft,
            Direction::UpRight,
            Direction::DownLeft,
            Direction::DownRight,
        ]
    }

    /// Unit step as `(row, col)`.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::UpLeft => (-1, -1),
            Direction::UpRight => (-1, 1),
            Direction::DownLeft => (1, -1),
            Direction::DownRight => (1, 1),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
            Direction::UpLeft => "Up-Left",
            Direction::UpRight => "Up-Right",
            Direction::DownLeft => "Down-Left",
            Direction::DownRight => "Down-Right",
        }
    }
}

/// A cell on the board, `(row, col)` from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_u8() {
        assert_eq!(Direction::from_u8(0), Some(Direction::Up));
        assert_eq!(Direction::from_u8(3), Some(Direction::Right));
        assert_eq!(Direction::from_u8(7), Some(Direction::DownRight));
        assert_eq!(Direction::from_u8(8), None);
        assert_eq!(Direction::from_u8(255), None);
    }

    #[test]
    fn test_direction_all_matches_discriminants() {
        for (i, direction) in Direction::all().into_iter().enumerate() {
            assert_eq!(direction as usize, i);
        }
    }

    #[test]
    fn test_deltas_are_distinct_unit_steps() {
        let deltas: Vec<_> = Direction::all().iter().map(|d| d.delta()).collect();
        for (i, &(dy, dx)) in deltas.iter().enumerate() {
            assert!(dy.abs() <= 1 && dx.abs() <= 1);
            assert!((dy, dx) != (0, 0));
            assert!(!deltas[i + 1..].contains(&(dy, dx)));
        }
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(3, 14).to_string(), "(3, 14)");
    }
}
