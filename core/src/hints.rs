//! Directional hints: every move currently available to the player.

use crate::moves::{self, MovePath};
use crate::{Direction, Grid, Position};

/// The legal moves from one position, in [`Direction::all`] order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Hints {
    paths: Vec<MovePath>,
}

impl Hints {
    /// Compute the hints for `from`. Never mutates the grid.
    pub fn compute(grid: &Grid, from: Position) -> Self {
        let paths = Direction::all()
            .into_iter()
            .filter_map(|direction| moves::plan(grid, from, direction))
            .collect();
        Hints { paths }
    }

    pub fn paths(&self) -> &[MovePath] {
        &self.paths
    }

    pub fn directions(&self) -> Vec<Direction> {
        self.paths.iter().map(MovePath::direction).collect()
    }

    pub fn contains(&self, direction: Direction) -> bool {
        self.paths.iter().any(|p| p.direction() == direction)
    }

    /// Whether `pos` lies on any hinted path.
    pub fn covers(&self, pos: Position) -> bool {
        self.paths.iter().any(|p| p.cells().contains(&pos))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// `true` when no move is legal, i.e. the run is over.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::{resolve, MoveOutcome};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_hints_match_resolver_on_random_boards() {
        let mut rng = SmallRng::seed_from_u64(2024);
        for _ in 0..200 {
            let mut grid = Grid::random(6, 7, &mut rng).unwrap();
            // Punch some holes so illegal paths show up.
            for _ in 0..10 {
                let pos = Position::new(rng.gen_range(0..6), rng.gen_range(0..7));
                grid.clear(pos);
            }
            let from = Position::new(rng.gen_range(0..6), rng.gen_range(0..7));
            let hints = Hints::compute(&grid, from);

            for direction in Direction::all() {
                let mut copy = grid.clone();
                let outcome = resolve(&mut copy, from, direction);
                assert_eq!(hints.contains(direction), outcome.is_resolved());
                if let MoveOutcome::Resolved { score_delta, .. } = outcome {
                    assert_eq!(
                        grid.open_cells() - copy.open_cells(),
                        score_delta as usize
                    );
                }
            }
        }
    }

    #[test]
    fn test_hints_are_read_only() {
        let grid = Grid::from_rows(&[[1u8, 1, 1], [1, 1, 1], [1, 1, 1]]).unwrap();
        let before = grid.clone();
        let first = Hints::compute(&grid, Position::new(1, 1));
        let second = Hints::compute(&grid, Position::new(1, 1));
        assert_eq!(grid, before);
        assert_eq!(first, second);
        assert_eq!(first.len(), 8);
    }

    #[test]
    fn test_hints_paths_and_coverage() {
        let grid = Grid::from_rows(&[[2u8, 1, 1], [1, 0, 1], [1, 1, 3]]).unwrap();
        let hints = Hints::compute(&grid, Position::new(0, 0));
        // Right: step 1 -> (0,1). Down: step 1 -> (1,0). DownRight hits a zero.
        assert_eq!(hints.directions(), vec![Direction::Down, Direction::Right]);
        assert!(hints.covers(Position::new(0, 1)));
        assert!(hints.covers(Position::new(1, 0)));
        assert!(!hints.covers(Position::new(1, 1)));
        assert!(!hints.covers(Position::new(0, 2)));
    }

    #[test]
    fn test_no_hints_when_boxed_in() {
        let grid = Grid::from_rows(&[[0u8, 0, 0], [0, 5, 0], [0, 0, 0]]).unwrap();
        assert!(Hints::compute(&grid, Position::new(1, 1)).is_empty());
    }

    #[test]
    fn test_single_cell_has_no_hints() {
        let grid = Grid::from_rows(&[[4u8]]).unwrap();
        assert!(Hints::compute(&grid, Position::new(0, 0)).is_empty());
    }
}
