//! Move command parsing.
//!
//! A command names two squares, optionally separated by spaces and the word
//! `to`: `B3 to C4`, `b3c4` and `B3  C4` are all the same move. Parsing is
//! ASCII case-insensitive and stateless.
//!
//! The parser only derives a direction and a step count from the two
//! squares. Whether the squares are on the board and whether the step count
//! is legal is decided by [`Board::validate_move`](crate::board::Board::validate_move).

use crate::board::Move;
use crate::error::MoveError;
use crate::position::{Direction, Position};

const UNPARSEABLE: MoveError = MoveError::ParseFailure {
    reason: "command could not be parsed",
};

/// Split a command into its origin and destination squares.
pub fn parse_command(text: &str) -> Result<(Position, Position), MoveError> {
    let text = text.trim();
    let (first, rest) = split_square(text)?;

    let rest = rest.trim_start_matches(' ');
    let rest = match rest.get(..2) {
        Some(word) if word.eq_ignore_ascii_case("to") => &rest[2..],
        _ => rest,
    };
    let rest = rest.trim_start_matches(' ');

    let (second, rest) = split_square(rest)?;
    if !rest.is_empty() {
        return Err(UNPARSEABLE);
    }
    Ok((first, second))
}

/// Take a leading `<letter><digit>` square off `text`.
fn split_square(text: &str) -> Result<(Position, &str), MoveError> {
    let square = text.get(..2).ok_or(UNPARSEABLE)?;
    let pos = Position::from_notation(square).map_err(|_| UNPARSEABLE)?;
    Ok((pos, &text[2..]))
}

/// Turn an origin/destination pair into a move.
///
/// Fails unless the displacement is a non-zero pure diagonal. The step
/// count is the diagonal length and is not bounded here.
pub fn to_move(origin: Position, destination: Position) -> Result<Move, MoveError> {
    let diff = destination - origin;
    if diff.x.abs() != diff.y.abs() || diff.x == 0 {
        return Err(MoveError::ParseFailure {
            reason: "squares are not on a common diagonal",
        });
    }

    let steps = diff.x.unsigned_abs();
    let unit = Position::new(diff.x.signum(), diff.y.signum());
    let direction = Direction::from_delta(unit).ok_or(UNPARSEABLE)?;
    Ok(Move::new(origin, direction, steps))
}

/// Parse a command straight into a move.
pub fn parse_move(text: &str) -> Result<Move, MoveError> {
    let (origin, destination) = parse_command(text)?;
    to_move(origin, destination)
}
