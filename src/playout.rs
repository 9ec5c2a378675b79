//! Random self-play.
//!
//! A playout applies uniformly chosen legal moves until the game is decided
//! or a ply limit is hit. It backs the `demo` command and the invariant
//! tests; no evaluation or search is involved.

use tracing::debug;

use crate::board::{Board, Move, Player};

/// Pick a legal move for the player to move, or `None` if the game is over.
pub fn random_move(board: &Board, rng: &mut fastrand::Rng) -> Option<Move> {
    if board.victor().is_some() {
        return None;
    }
    let moves = board.valid_moves(board.turn());
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.usize(..moves.len())])
}

/// Play random moves from the current position.
///
/// Every applied move (including each leg of a multi-jump) counts as one
/// ply. Returns the winner, or `None` if `max_plies` ran out first.
pub fn playout(board: &mut Board, rng: &mut fastrand::Rng, max_plies: usize) -> Option<Player> {
    playout_with(board, rng, max_plies, |_, _| {})
}

/// Like [`playout`], calling `on_move` with the board after each applied move.
pub fn playout_with<F>(
    board: &mut Board,
    rng: &mut fastrand::Rng,
    max_plies: usize,
    mut on_move: F,
) -> Option<Player>
where
    F: FnMut(&Board, Move),
{
    for ply in 0..max_plies {
        let Some(mv) = random_move(board, rng) else {
            break;
        };
        if board.play(mv).is_err() {
            break;
        }
        on_move(board, mv);
        if let Some(victor) = board.victor() {
            debug!(ply, %victor, "playout finished");
            return Some(victor);
        }
    }
    board.victor()
}
