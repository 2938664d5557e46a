//! Built-in tic-tac-toe opponent.
//!
//! Not a full minimax: a one-move lookahead for wins, then blocks, then
//! positional preferences. Scans run in board order and take the first hit,
//! so the same board always gives the same answer until the random tiers.

use crate::{Board, Mark, Position, Square, check_winner};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument};

/// Picks the AI's move for `ai` on `board`.
///
/// Priority: win now, block the opponent's win, take the center, a random
/// free corner, any random free square. Returns `None` on a full board.
#[instrument(skip(board, rng))]
pub fn best_move<R: Rng + ?Sized>(board: &Board, ai: Mark, rng: &mut R) -> Option<Position> {
    let empty = board.empty_positions();
    if empty.is_empty() {
        return None;
    }

    if let Some(pos) = first_completing(board, &empty, ai) {
        debug!(%pos, "Taking winning square");
        return Some(pos);
    }

    if let Some(pos) = first_completing(board, &empty, ai.opponent()) {
        debug!(%pos, "Blocking opponent");
        return Some(pos);
    }

    if board.is_empty(Position::Center) {
        return Some(Position::Center);
    }

    let corners: Vec<Position> = Position::CORNERS
        .iter()
        .copied()
        .filter(|pos| board.is_empty(*pos))
        .collect();
    if let Some(pos) = corners.choose(rng) {
        return Some(*pos);
    }

    empty.choose(rng).copied()
}

/// First empty square (board order) where `mark` would complete a line.
fn first_completing(board: &Board, empty: &[Position], mark: Mark) -> Option<Position> {
    empty.iter().copied().find(|pos| {
        let mut probe = board.clone();
        probe.set(*pos, Square::Occupied(mark));
        check_winner(&probe) == Some(mark)
    })
}
