//! Rejection reasons for move attempts.
//!
//! Every variant describes a move that was not applied; the board is never
//! partially mutated when one of these is returned.

use crate::board::Player;
use crate::position::{Direction, Position};

/// Why a command or move was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// Origin or destination lies outside the board.
    #[error("position {position} is out of bounds")]
    OutOfBounds { position: Position },

    /// Origin does not hold a piece of the acting player.
    #[error("cannot move the piece at {position}")]
    WrongOwner { position: Position },

    /// Step count or direction outside the legal domain.
    #[error("movement is invalid")]
    MalformedMove,

    /// Destination tile is occupied.
    #[error("destination {position} is occupied")]
    BlockedDestination { position: Position },

    /// A two-step move whose midpoint is not an opposing piece.
    #[error("cannot jump over {over}")]
    IllegalJumpTarget { over: Position },

    /// A capture is available and this move is not one.
    #[error("must jump over (one of) {}", join_positions(.jumps))]
    MandatoryJump { jumps: Vec<Position> },

    /// A man moving away from the opponent's side.
    #[error("movement {direction} is invalid for {player}")]
    DirectionNotAllowed { player: Player, direction: Direction },

    /// Text did not match the coordinate-pair grammar or is not diagonal.
    #[error("{reason}")]
    ParseFailure { reason: &'static str },

    /// The game already has a winner.
    #[error("game is over, {victor} won")]
    GameOver { victor: Player },
}

fn join_positions(positions: &[Position]) -> String {
    positions
        .iter()
        .map(Position::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
