//! Progression state for a single run.

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::SessionError;
use crate::hints::Hints;
use crate::moves::{self, MoveOutcome};
use crate::{Direction, Grid, Position};

/// Number of host ticks the "bad move" indicator stays visible.
pub const BAD_MOVE_TICKS: u8 = 1;

/// One run of the game: the board, the player and the score.
///
/// All gameplay mutation goes through [`GameSession::attempt_move`]. The run
/// is over once no direction is legal from the player's position; only
/// [`GameSession::reset`] or [`GameSession::resize`] start a fresh run.
#[derive(Clone)]
pub struct GameSession {
    grid: Grid,
    player: Position,
    score: u32,
    has_moved: bool,
    bad_move_timer: u8,
    over: bool,
    rng: SmallRng,
}

impl GameSession {
    /// Start a run on a fresh random board.
    pub fn new(rows: usize, cols: usize, seed: u64) -> Result<Self, SessionError> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let grid = Grid::random(rows, cols, &mut rng)?;
        Self::start(grid, rng)
    }

    /// Start a run on a prepared board. The player is placed on a random
    /// open tile.
    pub fn from_grid(grid: Grid, seed: u64) -> Result<Self, SessionError> {
        Self::start(grid, SmallRng::seed_from_u64(seed))
    }

    fn start(grid: Grid, mut rng: SmallRng) -> Result<Self, SessionError> {
        let player = sample_player(&grid, &mut rng)?;
        let mut session = GameSession {
            grid,
            player,
            score: 0,
            has_moved: false,
            bad_move_timer: 0,
            over: false,
            rng,
        };
        session.update_over();
        debug!(
            "new run on {:?} board, player at {}",
            session.grid.dimensions(),
            session.player
        );
        Ok(session)
    }

    /// Throw the current run away and start again on a board of the same size.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        let (rows, cols) = self.grid.dimensions();
        self.resize(rows, cols)
    }

    /// Start again on a board of a new size.
    ///
    /// The replacement board is fully built before anything is committed; on
    /// error the current run is left as it was.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<(), SessionError> {
        let grid = Grid::random(rows, cols, &mut self.rng)?;
        let player = sample_player(&grid, &mut self.rng)?;

        self.grid = grid;
        self.player = player;
        self.score = 0;
        self.has_moved = false;
        self.bad_move_timer = 0;
        self.update_over();
        debug!("reset to {}x{}, player at {}", rows, cols, self.player);
        Ok(())
    }

    /// Try to move the player.
    ///
    /// A resolved move consumes its path, moves the player and adds the step
    /// count to the score. An illegal move only raises the bad-move indicator.
    pub fn attempt_move(&mut self, direction: Direction) -> MoveOutcome {
        let outcome = moves::resolve(&mut self.grid, self.player, direction);
        match outcome {
            MoveOutcome::Resolved {
                new_position,
                score_delta,
            } => {
                self.player = new_position;
                self.score += score_delta;
                self.has_moved = true;
                self.update_over();
                if self.over {
                    debug!("run over with score {}", self.score);
                }
            }
            MoveOutcome::Illegal => {
                self.bad_move_timer = BAD_MOVE_TICKS;
            }
        }
        outcome
    }

    /// Advance the presentation clock by one host tick.
    pub fn tick(&mut self) {
        self.bad_move_timer = self.bad_move_timer.saturating_sub(1);
    }

    /// `true` once no direction is legal from the player's position.
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// The moves currently available, with their paths.
    pub fn hints(&self) -> Hints {
        Hints::compute(&self.grid, self.player)
    }

    /// Share of the board cleared so far, in percent.
    pub fn percent_cleared(&self) -> f64 {
        100.0 * self.score as f64 / self.grid.area() as f64
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    /// Whether the player has made a move this run.
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Whether the last attempted move was illegal and the indicator is live.
    pub fn bad_move(&self) -> bool {
        self.bad_move_timer > 0
    }

    fn update_over(&mut self) {
        self.over = self.hints().is_empty();
    }
}

/// Pick a uniformly random open tile by rejection sampling.
fn sample_player<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Result<Position, SessionError> {
    // Without an open tile the loop below would never end.
    if grid.open_cells() == 0 {
        return Err(SessionError::NoOpenTile);
    }
    let (rows, cols) = grid.dimensions();
    loop {
        let pos = Position::new(rng.gen_range(0..rows), rng.gen_range(0..cols));
        if grid.get(pos) != 0 {
            return Ok(pos);
        }
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("dimensions", &self.grid.dimensions())
            .field("player", &self.player)
            .field("score", &self.score)
            .field("over", &self.over)
            .finish()
    }
}

impl std::fmt::Display for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (pos, val) in self.grid.cells() {
            if pos == self.player {
                write!(f, "@")?;
            } else if val == 0 {
                write!(f, " ")?;
            } else {
                write!(f, "{}", val)?;
            }
            if pos.col + 1 == self.grid.dimensions().1 {
                writeln!(f)?;
            }
        }
        writeln!(f, "Score: {}  {:.2}%", self.score, self.percent_cleared())
    }
}

// =============================================================================
// Tests
// =============================================================================
