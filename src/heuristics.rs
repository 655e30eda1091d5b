use crate::engine::{Position, Side, State, KNIGHT_OFFSETS};
use std::collections::VecDeque;

/// Estimates how many knight jumps are needed to cover a Manhattan distance.
///
/// The estimate is the smallest `k` with `k >= ceil(d / 3)` and `k` of the
/// same parity as `d`, except that `d == 1` needs three jumps. A jump changes
/// the Manhattan distance by one or three and always flips its parity, which
/// makes this a lower bound on the true jump count on any board. For small
/// distances it equals the exact minimum over all displacements with that
/// Manhattan distance: 0, 3, 2, 1, 2, 3, 2, 3, 4, ...
///
/// # Examples
/// ```
/// use four_knights_solver::heuristics::distance_estimate;
///
/// let table: Vec<u32> = (0..9).map(distance_estimate).collect();
/// assert_eq!(table, vec![0, 3, 2, 1, 2, 3, 2, 3, 4]);
/// ```
pub fn distance_estimate(manhattan: usize) -> u32 {
    if manhattan == 1 {
        return 3;
    }
    let d = manhattan as u32;
    let jumps = (d + 2) / 3;
    if jumps % 2 == d % 2 {
        jumps
    } else {
        jumps + 1
    }
}

/// Lower bound on the jumps one knight needs to reach the nearest of `targets`.
fn nearest_target_estimate(knight: Position, targets: &[Position]) -> u32 {
    targets
        .iter()
        .map(|&target| distance_estimate(knight.manhattan_distance(target)))
        .min()
        .unwrap_or(0)
}

/// Estimates the number of moves left before `state` matches `goal`.
///
/// Every knight of either side is charged the estimate to its nearest goal
/// square of its own side; the charges are summed. The result is zero exactly
/// when every knight already stands on one of its side's goal squares.
///
/// # Arguments
/// * `state`: The configuration being scored.
/// * `goal`: The target configuration; only its knight positions are used.
///
/// # Returns
/// A non-negative estimate that never exceeds the true remaining move count.
pub fn heuristic(state: &State, goal: &State) -> u32 {
    [Side::White, Side::Black]
        .iter()
        .map(|&side| {
            let targets = goal.side_positions(side);
            state
                .side_positions(side)
                .iter()
                .map(|&knight| nearest_target_estimate(knight, targets))
                .sum::<u32>()
        })
        .sum()
}

/// Exact jump counts from `from` to every square of an empty `size` x `size`
/// board, indexed `row * size + col`. Unreachable squares are `None`.
///
/// Uses a Breadth-First Search over knight jumps.
pub fn knight_distance_table(size: usize, from: Position) -> Vec<Option<u32>> {
    let mut distances = vec![None; size * size];
    let mut queue = VecDeque::new();

    distances[from.row * size + from.col] = Some(0);
    queue.push_back(from);

    while let Some(current) = queue.pop_front() {
        let next_distance = distances[current.row * size + current.col].map(|d| d + 1);
        for &(dr, dc) in KNIGHT_OFFSETS.iter() {
            if let Some(dest) = current.offset(dr, dc, size) {
                let slot = &mut distances[dest.row * size + dest.col];
                if slot.is_none() {
                    *slot = next_distance;
                    queue.push_back(dest);
                }
            }
        }
    }

    distances
}

/// Exact jump count between two squares of an empty `size` x `size` board.
pub fn knight_distance(size: usize, from: Position, to: Position) -> Option<u32> {
    knight_distance_table(size, from)[to.row * size + to.col]
}

/// A square pair where `distance_estimate` overshoots the exact jump count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overestimate {
    pub from: Position,
    pub to: Position,
    pub estimate: u32,
    pub exact: u32,
}

/// Outcome of checking `distance_estimate` against exact distances on one board size.
#[derive(Clone, Debug)]
pub struct AdmissibilityReport {
    pub size: usize,
    /// Ordered square pairs with a finite exact distance.
    pub pairs_checked: usize,
    /// Pairs whose estimate equals the exact distance.
    pub exact_matches: usize,
    /// Pairs that can never be connected (e.g. the centre of a 3x3 board).
    pub unreachable_pairs: usize,
    pub overestimates: Vec<Overestimate>,
}

impl AdmissibilityReport {
    /// True if the estimate never exceeds the exact distance on this board size.
    pub fn is_admissible(&self) -> bool {
        self.overestimates.is_empty()
    }
}

/// Compares `distance_estimate` with exact knight distances for every ordered
/// pair of squares on an empty `size` x `size` board.
pub fn validate_admissibility(size: usize) -> AdmissibilityReport {
    let mut report = AdmissibilityReport {
        size,
        pairs_checked: 0,
        exact_matches: 0,
        unreachable_pairs: 0,
        overestimates: Vec::new(),
    };

    for fr in 0..size {
        for fc in 0..size {
            let from = Position::new(fr, fc);
            let table = knight_distance_table(size, from);
            for tr in 0..size {
                for tc in 0..size {
                    let to = Position::new(tr, tc);
                    let Some(exact) = table[tr * size + tc] else {
                        report.unreachable_pairs += 1;
                        continue;
                    };
                    let estimate = distance_estimate(from.manhattan_distance(to));
                    report.pairs_checked += 1;
                    if estimate == exact {
                        report.exact_matches += 1;
                    } else if estimate > exact {
                        report.overestimates.push(Overestimate {
                            from,
                            to,
                            estimate,
                            exact,
                        });
                    }
                }
            }
        }
    }

    report
}
