//! Error types for the board engine.
//!
//! Illegal moves are not errors: they are an ordinary
//! [`MoveOutcome::Illegal`](crate::MoveOutcome::Illegal) result.

use thiserror::Error;

/// Errors raised while building or addressing a [`Grid`](crate::Grid).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions {rows}x{cols} are empty or too large")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("tile ({row}, {col}) holds {value}, expected 0..=9")]
    InvalidTile { row: usize, col: usize, value: u8 },

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

/// Errors raised while starting or restarting a [`GameSession`](crate::GameSession).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Grid(#[from] GridError),

    /// The board has no tile left for the player to stand on.
    #[error("no open tile to place the player on")]
    NoOpenTile,
}

/// Errors raised while validating or decoding [`Settings`](crate::Settings).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("board must be at least {min}x{min}, got {rows}x{cols}")]
    TooSmall { rows: usize, cols: usize, min: usize },

    #[error("board must be at most {max}x{max}, got {rows}x{cols}")]
    TooLarge { rows: usize, cols: usize, max: usize },

    #[error("malformed settings: {0}")]
    Malformed(String),
}
