use crate::engine::{
    Cell, Position, Side, State, KNIGHTS_PER_SIDE, MAX_BOARD_SIZE, MIN_BOARD_SIZE,
};
use thiserror::Error;

/// Reasons a textual board cannot be turned into a `State`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unsupported board size {0}, expected {min}..={max} rows", min = MIN_BOARD_SIZE, max = MAX_BOARD_SIZE)]
    UnsupportedSize(usize),

    #[error("Row {row} has {found} squares, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Unrecognized marker '{marker}' in row {row} col {col}")]
    UnknownMarker { marker: char, row: usize, col: usize },

    #[error("{side} has {found} knights, expected {expected}", expected = KNIGHTS_PER_SIDE)]
    KnightCount { side: Side, found: usize },
}

/// Parses rows of markers into a `State` with `turn` to move.
///
/// Each string is one row, starting from row 0. The number of rows sets the
/// board size, and every row must have exactly that many squares. Whitespace
/// between markers is ignored, so the output of `State`'s `Display` (minus
/// its separator line) parses back.
///
/// Valid markers are:
/// - 'W': a white knight
/// - 'B': a black knight
/// - '.': an empty square
///
/// Knights are listed in row-major order.
///
/// # Returns
/// * `Ok(State)` if the rows describe a square board with exactly two knights per side.
/// * `Err(ParseError)` describing the first problem found otherwise.
///
/// # Examples
/// ```
/// use four_knights_solver::engine::{Cell, Position, Side};
/// use four_knights_solver::utils::state_from_rows;
///
/// let state = state_from_rows(&["B . B", ". . .", "W . W"], Side::White).unwrap();
/// assert_eq!(state.size(), 3);
/// assert_eq!(state.cell(Position::new(2, 2)), Cell::White);
///
/// assert!(state_from_rows(&["BXB", "...", "W.W"], Side::White).is_err());
/// ```
pub fn state_from_rows(rows: &[&str], turn: Side) -> Result<State, ParseError> {
    let size = rows.len();
    if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
        return Err(ParseError::UnsupportedSize(size));
    }

    let mut white = Vec::with_capacity(KNIGHTS_PER_SIDE);
    let mut black = Vec::with_capacity(KNIGHTS_PER_SIDE);

    for (r, row_str) in rows.iter().enumerate() {
        let markers: Vec<char> = row_str.chars().filter(|c| !c.is_whitespace()).collect();
        if markers.len() != size {
            return Err(ParseError::RowLength {
                row: r,
                expected: size,
                found: markers.len(),
            });
        }

        for (c, &marker) in markers.iter().enumerate() {
            match Cell::from_char(marker) {
                Some(Cell::White) => white.push(Position::new(r, c)),
                Some(Cell::Black) => black.push(Position::new(r, c)),
                Some(Cell::Empty) => {}
                None => {
                    return Err(ParseError::UnknownMarker {
                        marker,
                        row: r,
                        col: c,
                    })
                }
            }
        }
    }

    let white = knight_pair(Side::White, white)?;
    let black = knight_pair(Side::Black, black)?;
    Ok(State::new(size, white, black, turn))
}

fn knight_pair(
    side: Side,
    found: Vec<Position>,
) -> Result<[Position; KNIGHTS_PER_SIDE], ParseError> {
    let count = found.len();
    found
        .try_into()
        .map_err(|_| ParseError::KnightCount { side, found: count })
}

/// Renders every state of a path, in order, one board after another.
pub fn render_path(path: &[State]) -> String {
    path.iter().map(State::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_rows_valid() {
        let state = state_from_rows(&["B..B", "....", "....", "W..W"], Side::Black).unwrap();
        assert_eq!(state.size(), 4);
        assert_eq!(state.turn(), Side::Black);
        assert_eq!(state.side_positions(Side::Black), &[Position::new(0, 0), Position::new(0, 3)]);
        assert_eq!(state.side_positions(Side::White), &[Position::new(3, 0), Position::new(3, 3)]);
    }

    #[test]
    fn test_state_from_rows_invalid_marker() {
        let result = state_from_rows(&["B.B", ".X.", "W.W"], Side::White);
        assert_eq!(
            result.unwrap_err(),
            ParseError::UnknownMarker {
                marker: 'X',
                row: 1,
                col: 1
            }
        );
    }

    #[test]
    fn test_state_from_rows_row_too_long() {
        let result = state_from_rows(&["B.B.", "...", "W.W"], Side::White);
        let err = result.unwrap_err();
        assert_eq!(
            err,
            ParseError::RowLength {
                row: 0,
                expected: 3,
                found: 4
            }
        );
        assert!(err.to_string().contains("Row 0 has 4 squares"));
    }

    #[test]
    fn test_state_from_rows_unsupported_size() {
        assert_eq!(
            state_from_rows(&["W.", "B."], Side::White).unwrap_err(),
            ParseError::UnsupportedSize(2)
        );
        let rows = vec!["........."; MAX_BOARD_SIZE + 1];
        assert_eq!(
            state_from_rows(&rows, Side::White).unwrap_err(),
            ParseError::UnsupportedSize(MAX_BOARD_SIZE + 1)
        );
    }

    #[test]
    fn test_state_from_rows_wrong_knight_count() {
        let result = state_from_rows(&["BBB", "...", "W.W"], Side::White);
        assert_eq!(
            result.unwrap_err(),
            ParseError::KnightCount {
                side: Side::Black,
                found: 3
            }
        );
        let result = state_from_rows(&["B.B", "...", "W.."], Side::White);
        assert!(result.unwrap_err().to_string().contains("White has 1 knights"));
    }

    #[test]
    fn test_display_output_parses_back() {
        let state = state_from_rows(&["B.B", "...", "W.W"], Side::White).unwrap();
        let rendered = state.to_string();
        let rows: Vec<&str> = rendered.lines().filter(|l| !l.starts_with('_')).collect();
        assert_eq!(state_from_rows(&rows, Side::White).unwrap(), state);
    }

    #[test]
    fn test_render_path_concatenates_boards() {
        let first = state_from_rows(&["B.B", "...", "W.W"], Side::White).unwrap();
        let second = first.successor(Position::new(2, 0), Position::new(1, 2));
        let rendered = render_path(&[first, second]);
        assert_eq!(rendered, "B . B\n. . .\nW . W\n_____\nB . B\n. . W\n. . W\n_____\n");
    }
}
