//! Start/goal pairs for the solvers.
//!
//! Presets swap the two sides between the top and bottom corners of a
//! 3x3, 4x4 or 5x5 board. Random scenarios scatter the knights over an
//! N x N board from a seed, so the same seed always yields the same pair.
use crate::engine::{Position, Side, State, KNIGHTS_PER_SIDE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use rand::rngs::SmallRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Board sizes with a fixed preset.
pub const PRESET_SIZES: [usize; 3] = [3, 4, 5];

/// Seed used when the caller does not pick one.
pub const DEFAULT_SEED: u64 = 514514;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("No preset for a {0}x{0} board, available sizes are 3, 4 and 5")]
    UnknownPreset(usize),

    #[error("Unsupported board size {0}, expected {min}..={max}", min = MIN_BOARD_SIZE, max = MAX_BOARD_SIZE)]
    UnsupportedSize(usize),
}

/// A start state and the goal it should be transformed into.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub start: State,
    pub goal: State,
}

impl Scenario {
    /// The corner-swap puzzle on a `size` x `size` board.
    ///
    /// Black starts on the corners of row 0 and White on the corners of the
    /// last row, White to move. The goal has the colours exchanged.
    ///
    /// # Examples
    /// ```
    /// use four_knights_solver::scenarios::Scenario;
    ///
    /// let scenario = Scenario::preset(3).unwrap();
    /// assert_eq!(scenario.start.to_string(), "B . B\n. . .\nW . W\n_____\n");
    /// assert_eq!(scenario.goal.to_string(), "W . W\n. . .\nB . B\n_____\n");
    /// assert!(Scenario::preset(6).is_err());
    /// ```
    pub fn preset(size: usize) -> Result<Scenario, ScenarioError> {
        if !PRESET_SIZES.contains(&size) {
            return Err(ScenarioError::UnknownPreset(size));
        }

        let last = size - 1;
        let top = [Position::new(0, 0), Position::new(0, last)];
        let bottom = [Position::new(last, 0), Position::new(last, last)];

        Ok(Scenario {
            start: State::new(size, bottom, top, Side::White),
            goal: State::new(size, top, bottom, Side::White),
        })
    }

    /// A random scenario on a `size` x `size` board, reproducible from `seed`.
    ///
    /// Start and goal are drawn independently, each placing four knights on
    /// distinct squares. Nothing guarantees the goal is reachable.
    pub fn random_with_seed(size: usize, seed: u64) -> Result<Scenario, ScenarioError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(ScenarioError::UnsupportedSize(size));
        }

        let mut rng = SmallRng::seed_from_u64(seed);
        let start = random_state(size, &mut rng);
        let goal = random_state(size, &mut rng);
        Ok(Scenario { start, goal })
    }
}

/// Places both sides on distinct random squares, White to move.
fn random_state(size: usize, rng: &mut impl Rng) -> State {
    let squares = index::sample(rng, size * size, 2 * KNIGHTS_PER_SIDE).into_vec();
    let at = |i: usize| Position::new(squares[i] / size, squares[i] % size);
    State::new(size, [at(0), at(1)], [at(2), at(3)], Side::White)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Cell;

    #[test]
    fn test_presets_swap_corners() {
        for size in PRESET_SIZES {
            let scenario = Scenario::preset(size).unwrap();
            let last = size - 1;
            for col in [0, last] {
                assert_eq!(scenario.start.cell(Position::new(0, col)), Cell::Black);
                assert_eq!(scenario.start.cell(Position::new(last, col)), Cell::White);
                assert_eq!(scenario.goal.cell(Position::new(0, col)), Cell::White);
                assert_eq!(scenario.goal.cell(Position::new(last, col)), Cell::Black);
            }
            assert_eq!(scenario.start.turn(), Side::White);
        }
    }

    #[test]
    fn test_unknown_preset() {
        assert_eq!(Scenario::preset(6).unwrap_err(), ScenarioError::UnknownPreset(6));
    }

    #[test]
    fn test_random_with_seed_determinism() {
        let first = Scenario::random_with_seed(5, 123).unwrap();
        let second = Scenario::random_with_seed(5, 123).unwrap();
        assert_eq!(first.start, second.start);
        assert_eq!(first.goal, second.goal);
    }

    #[test]
    fn test_random_places_four_distinct_knights() {
        for seed in 0..20 {
            let scenario = Scenario::random_with_seed(4, seed).unwrap();
            for state in [&scenario.start, &scenario.goal] {
                assert_eq!(state.scan_positions(Side::White).len(), KNIGHTS_PER_SIDE);
                assert_eq!(state.scan_positions(Side::Black).len(), KNIGHTS_PER_SIDE);
            }
        }
    }

    #[test]
    fn test_random_rejects_bad_size() {
        assert_eq!(
            Scenario::random_with_seed(2, 0).unwrap_err(),
            ScenarioError::UnsupportedSize(2)
        );
        assert!(Scenario::random_with_seed(MAX_BOARD_SIZE + 1, 0).is_err());
    }
}
