//! Tic-tac-toe for chat conversations.
//!
//! A game starts [`TicTacToeGame::Waiting`] for a second human, or goes
//! straight to [`TicTacToeGame::Active`] against the built-in AI. Moves are
//! validated against the turn holder and the board before anything changes.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod ai;
mod error;
mod game;
mod position;
mod rules;
mod types;

pub use ai::best_move;
pub use error::TicTacToeError;
pub use game::{ActiveTicTacToe, Placement, TicTacToeGame, WaitingTicTacToe};
pub use position::Position;
pub use rules::{check_winner, is_full};
pub use types::{Board, Mark, Square};
