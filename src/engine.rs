//! Board representation and move generation for the four knights puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Side` and `Cell`: which player owns a knight, and what occupies a square.
//! - `Position`: a (row, column) coordinate on the N x N grid.
//! - `State`: the full grid plus the cached knight positions and the side to move.
//! - The move generator (`moves`, `knights_moves`), which enumerates the legal
//!   knight jumps for the side to move.
use std::fmt;
use std::hash::{Hash, Hasher};

/// Smallest supported board width/height.
pub const MIN_BOARD_SIZE: usize = 3;

/// Largest supported board width/height. Cell storage is sized for this.
pub const MAX_BOARD_SIZE: usize = 8;

/// Board size used by the canonical puzzle.
pub const DEFAULT_BOARD_SIZE: usize = 3;

/// Every side owns exactly this many knights.
pub const KNIGHTS_PER_SIDE: usize = 2;

/// The eight relative jumps of a knight, as (row delta, column delta).
pub const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

/// One of the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// Returns the side that moves after this one.
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// The cell marker used for this side's knights.
    pub fn marker(self) -> Cell {
        match self {
            Side::White => Cell::White,
            Side::Black => Cell::Black,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// Contents of a single board square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// No knight on this square.
    Empty,
    /// A white knight.
    White,
    /// A black knight.
    Black,
}

impl Cell {
    /// Converts the cell to its character representation.
    ///
    /// # Examples
    ///
    /// ```
    /// use four_knights_solver::engine::Cell;
    /// assert_eq!(Cell::White.to_char(), 'W');
    /// assert_eq!(Cell::Empty.to_char(), '.');
    /// ```
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::White => 'W',
            Cell::Black => 'B',
        }
    }

    /// Parses a marker character, returning `None` for anything unrecognized.
    pub fn from_char(marker: char) -> Option<Cell> {
        match marker {
            '.' => Some(Cell::Empty),
            'W' => Some(Cell::White),
            'B' => Some(Cell::Black),
            _ => None,
        }
    }

    /// The side owning the knight on this cell, if any.
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::White => Some(Side::White),
            Cell::Black => Some(Side::Black),
        }
    }
}

/// A (row, column) coordinate. Compared by value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Applies a relative offset, returning `None` if the result leaves a
    /// `size` x `size` board.
    pub fn offset(self, dr: isize, dc: isize, size: usize) -> Option<Position> {
        let row = self.row as isize + dr;
        let col = self.col as isize + dc;
        if row >= 0 && row < size as isize && col >= 0 && col < size as isize {
            Some(Position::new(row as usize, col as usize))
        } else {
            None
        }
    }

    /// Manhattan distance between two positions.
    pub fn manhattan_distance(self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A full puzzle configuration: the grid, both sides' knight positions and
/// the side to move.
///
/// The position lists are a cache of the grid: every listed position holds
/// that side's marker, and every non-empty cell is listed. Equality and
/// hashing only look at the grid and the turn, so two states that list the
/// same knights in a different order are the same state.
///
/// Cells outside the active `size` x `size` window are always `Cell::Empty`.
#[derive(Clone, Debug)]
pub struct State {
    size: usize,
    cells: [[Cell; MAX_BOARD_SIZE]; MAX_BOARD_SIZE],
    white_positions: [Position; KNIGHTS_PER_SIDE],
    black_positions: [Position; KNIGHTS_PER_SIDE],
    turn: Side,
}

impl State {
    /// Builds a state with a freshly allocated grid holding the given knights.
    ///
    /// # Panics
    /// Panics if `size` is outside `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`, if a
    /// position lies off the board, or if two knights share a square. Callers
    /// that take untrusted input should go through
    /// `utils::state_from_rows` or the `scenarios` module instead.
    ///
    /// # Examples
    /// ```
    /// use four_knights_solver::engine::{Cell, Position, Side, State};
    ///
    /// let state = State::new(
    ///     3,
    ///     [Position::new(2, 0), Position::new(2, 2)],
    ///     [Position::new(0, 0), Position::new(0, 2)],
    ///     Side::White,
    /// );
    /// assert_eq!(state.cell(Position::new(2, 0)), Cell::White);
    /// assert_eq!(state.cell(Position::new(1, 1)), Cell::Empty);
    /// ```
    pub fn new(
        size: usize,
        white_positions: [Position; KNIGHTS_PER_SIDE],
        black_positions: [Position; KNIGHTS_PER_SIDE],
        turn: Side,
    ) -> Self {
        assert!(
            (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size),
            "board size {} outside {}..={}",
            size,
            MIN_BOARD_SIZE,
            MAX_BOARD_SIZE
        );

        let mut cells = [[Cell::Empty; MAX_BOARD_SIZE]; MAX_BOARD_SIZE];
        let placements = white_positions
            .iter()
            .map(|&p| (p, Cell::White))
            .chain(black_positions.iter().map(|&p| (p, Cell::Black)));
        for (pos, marker) in placements {
            assert!(
                pos.row < size && pos.col < size,
                "knight at {} is off a {}x{} board",
                pos,
                size,
                size
            );
            assert_eq!(cells[pos.row][pos.col], Cell::Empty, "two knights on {}", pos);
            cells[pos.row][pos.col] = marker;
        }

        State {
            size,
            cells,
            white_positions,
            black_positions,
            turn,
        }
    }

    /// Width (and height) of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The side that moves next.
    pub fn turn(&self) -> Side {
        self.turn
    }

    /// Returns the contents of the square at `pos`.
    ///
    /// # Panics
    /// Panics if `pos` lies outside the cell storage.
    pub fn cell(&self, pos: Position) -> Cell {
        self.cells[pos.row][pos.col]
    }

    /// True if `pos` is on the board and empty.
    pub fn is_empty_square(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size && self.cell(pos) == Cell::Empty
    }

    /// The cached positions of one side's knights, in their stable order.
    pub fn side_positions(&self, side: Side) -> &[Position; KNIGHTS_PER_SIDE] {
        match side {
            Side::White => &self.white_positions,
            Side::Black => &self.black_positions,
        }
    }

    /// The knights belonging to the side to move.
    pub fn movers(&self) -> &[Position; KNIGHTS_PER_SIDE] {
        self.side_positions(self.turn)
    }

    /// Finds a side's knights by scanning the grid in row-major order.
    ///
    /// This ignores the position cache; it exists to cross-check it.
    pub fn scan_positions(&self, side: Side) -> Vec<Position> {
        let marker = side.marker();
        let mut found = Vec::with_capacity(KNIGHTS_PER_SIDE);
        for r in 0..self.size {
            for c in 0..self.size {
                if self.cells[r][c] == marker {
                    found.push(Position::new(r, c));
                }
            }
        }
        found
    }

    /// True if both grids hold the same knights on the same squares,
    /// regardless of whose turn it is.
    pub fn board_matches(&self, other: &State) -> bool {
        self.size == other.size && self.cells == other.cells
    }

    /// Moves the knight standing on `from` to `to`, keeping the position
    /// cache in sync. The turn is left untouched.
    ///
    /// Only call this on a state nobody else observes yet (a fresh clone
    /// being turned into a child); every other state is treated as immutable.
    ///
    /// # Panics
    /// Panics if `from` is empty or missing from its side's position list.
    /// `to` must be an empty on-board square.
    pub fn move_piece(&mut self, from: Position, to: Position) {
        let side = self
            .cell(from)
            .side()
            .unwrap_or_else(|| panic!("no knight to move on {}", from));
        debug_assert!(self.is_empty_square(to), "destination {} is not free", to);

        let positions = match side {
            Side::White => &mut self.white_positions,
            Side::Black => &mut self.black_positions,
        };
        let slot = positions
            .iter_mut()
            .find(|p| **p == from)
            .unwrap_or_else(|| panic!("{} knight on {} is not in the position list", side, from));
        *slot = to;

        self.cells[to.row][to.col] = side.marker();
        self.cells[from.row][from.col] = Cell::Empty;
    }

    /// Returns the state reached by jumping the knight on `from` to `to`,
    /// with the turn handed to the opponent.
    pub fn successor(&self, from: Position, to: Position) -> State {
        let mut next = self.clone();
        next.turn = self.turn.opponent();
        next.move_piece(from, to);
        next
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.board_matches(other) && self.turn == other.turn
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size.hash(state);
        self.cells.hash(state);
        self.turn.hash(state);
    }
}

impl fmt::Display for State {
    /// Rows of space-separated markers followed by an underscore separator line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.size {
            let row: Vec<String> = (0..self.size)
                .map(|c| self.cells[r][c].to_char().to_string())
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        writeln!(f, "{}", "_".repeat(2 * self.size - 1))
    }
}

/// Enumerates the legal jumps of the knight standing on `mover`.
///
/// A destination is legal if it is on the board and empty; knights never
/// capture and are never blocked by pieces they jump over. Destinations are
/// returned in `KNIGHT_OFFSETS` order and never repeat. Returns an empty
/// vector if the knight is boxed in.
///
/// # Examples
/// ```
/// use four_knights_solver::engine::{moves, Position, Side, State};
///
/// let state = State::new(
///     3,
///     [Position::new(2, 0), Position::new(2, 2)],
///     [Position::new(0, 0), Position::new(0, 2)],
///     Side::White,
/// );
/// assert_eq!(moves(&state, Position::new(2, 0)), vec![Position::new(1, 2), Position::new(0, 1)]);
/// ```
pub fn moves(state: &State, mover: Position) -> Vec<Position> {
    KNIGHT_OFFSETS
        .iter()
        .filter_map(|&(dr, dc)| mover.offset(dr, dc, state.size()))
        .filter(|&dest| state.cell(dest) == Cell::Empty)
        .collect()
}

/// Returns the side to move's knights and, in the same order, each knight's
/// legal destinations. `destinations[i]` belongs to `movers[i]`.
pub fn knights_moves(
    state: &State,
) -> ([Position; KNIGHTS_PER_SIDE], [Vec<Position>; KNIGHTS_PER_SIDE]) {
    let movers = *state.movers();
    let destinations = movers.map(|mover| moves(state, mover));
    (movers, destinations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn canonical_start() -> State {
        State::new(
            3,
            [Position::new(2, 0), Position::new(2, 2)],
            [Position::new(0, 0), Position::new(0, 2)],
            Side::White,
        )
    }

    fn hash_of(state: &State) -> u64 {
        let mut hasher = DefaultHasher::new();
        state.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_new_places_knights() {
        let state = canonical_start();
        assert_eq!(state.cell(Position::new(0, 0)), Cell::Black);
        assert_eq!(state.cell(Position::new(0, 2)), Cell::Black);
        assert_eq!(state.cell(Position::new(2, 0)), Cell::White);
        assert_eq!(state.cell(Position::new(2, 2)), Cell::White);
        assert_eq!(state.cell(Position::new(1, 1)), Cell::Empty);
        assert_eq!(state.turn(), Side::White);
    }

    #[test]
    fn test_fresh_grids_are_independent() {
        let mut first = canonical_start();
        let second = canonical_start();
        first.move_piece(Position::new(2, 0), Position::new(0, 1));
        assert_eq!(second.cell(Position::new(2, 0)), Cell::White);
        assert_eq!(second.cell(Position::new(0, 1)), Cell::Empty);
    }

    #[test]
    #[should_panic]
    fn test_new_rejects_overlapping_knights() {
        State::new(
            3,
            [Position::new(0, 0), Position::new(2, 2)],
            [Position::new(0, 0), Position::new(0, 2)],
            Side::White,
        );
    }

    #[test]
    fn test_moves_respect_bounds_and_occupancy() {
        for size in MIN_BOARD_SIZE..=5 {
            let state = State::new(
                size,
                [Position::new(size - 1, 0), Position::new(size - 1, size - 1)],
                [Position::new(0, 0), Position::new(0, size - 1)],
                Side::White,
            );
            for r in 0..size {
                for c in 0..size {
                    for dest in moves(&state, Position::new(r, c)) {
                        assert!(dest.row < size && dest.col < size, "{} off board", dest);
                        assert_eq!(state.cell(dest), Cell::Empty, "{} is occupied", dest);
                        let dr = dest.row.abs_diff(r);
                        let dc = dest.col.abs_diff(c);
                        assert!((dr, dc) == (1, 2) || (dr, dc) == (2, 1));
                    }
                }
            }
        }
    }

    #[test]
    fn test_moves_excludes_occupied_destination() {
        // (2,0) can reach (0,1) and (1,2); occupy (0,1) with a black knight.
        let state = State::new(
            3,
            [Position::new(2, 0), Position::new(2, 2)],
            [Position::new(0, 1), Position::new(0, 2)],
            Side::White,
        );
        assert_eq!(moves(&state, Position::new(2, 0)), vec![Position::new(1, 2)]);
    }

    #[test]
    fn test_centre_knight_is_boxed_in_on_3x3() {
        let state = State::new(
            3,
            [Position::new(1, 1), Position::new(2, 2)],
            [Position::new(0, 0), Position::new(0, 2)],
            Side::White,
        );
        assert!(moves(&state, Position::new(1, 1)).is_empty());
    }

    #[test]
    fn test_knights_moves_pairs_movers_with_destinations() {
        let state = canonical_start();
        let (movers, destinations) = knights_moves(&state);
        assert_eq!(movers, [Position::new(2, 0), Position::new(2, 2)]);
        assert_eq!(destinations[0], vec![Position::new(1, 2), Position::new(0, 1)]);
        assert_eq!(destinations[1], vec![Position::new(0, 1), Position::new(1, 0)]);

        let black_turn = canonical_start().successor(Position::new(2, 0), Position::new(1, 2));
        let (movers, destinations) = knights_moves(&black_turn);
        assert_eq!(movers, [Position::new(0, 0), Position::new(0, 2)]);
        assert_eq!(destinations[0], vec![Position::new(2, 1)]);
        assert_eq!(destinations[1], vec![Position::new(1, 0), Position::new(2, 1)]);
    }

    #[test]
    fn test_move_piece_keeps_cache_in_sync() {
        let mut state = canonical_start();
        let jumps = [
            (Position::new(2, 0), Position::new(1, 2)),
            (Position::new(0, 0), Position::new(2, 1)),
            (Position::new(2, 2), Position::new(1, 0)),
            (Position::new(0, 2), Position::new(2, 0)),
        ];
        for (from, to) in jumps {
            state.move_piece(from, to);
            for side in [Side::White, Side::Black] {
                let mut cached = state.side_positions(side).to_vec();
                cached.sort();
                assert_eq!(cached, state.scan_positions(side));
            }
        }
    }

    #[test]
    #[should_panic(expected = "is not in the position list")]
    fn test_move_piece_rejects_stale_position_cache() {
        let mut state = canonical_start();
        state.white_positions[0] = Position::new(1, 1);
        state.move_piece(Position::new(2, 0), Position::new(1, 2));
    }

    #[test]
    fn test_successor_flips_turn_and_leaves_parent_alone() {
        let parent = canonical_start();
        let child = parent.successor(Position::new(2, 2), Position::new(0, 1));
        assert_eq!(child.turn(), Side::Black);
        assert_eq!(child.cell(Position::new(0, 1)), Cell::White);
        assert_eq!(child.cell(Position::new(2, 2)), Cell::Empty);
        assert_eq!(parent.cell(Position::new(2, 2)), Cell::White);
        assert_eq!(parent.turn(), Side::White);
    }

    #[test]
    fn test_equality_and_hash_follow_grid_and_turn() {
        let a = canonical_start();
        // Same knights listed in the opposite order.
        let b = State::new(
            3,
            [Position::new(2, 2), Position::new(2, 0)],
            [Position::new(0, 2), Position::new(0, 0)],
            Side::White,
        );
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let other_turn = State::new(
            3,
            [Position::new(2, 0), Position::new(2, 2)],
            [Position::new(0, 0), Position::new(0, 2)],
            Side::Black,
        );
        assert_ne!(a, other_turn);
        assert!(a.board_matches(&other_turn));
    }

    #[test]
    fn test_display_renders_rows_and_separator() {
        let rendered = canonical_start().to_string();
        assert_eq!(rendered, "B . B\n. . .\nW . W\n_____\n");
    }
}
