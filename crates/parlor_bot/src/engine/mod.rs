//! Conversation-keyed engines over the game store.
//!
//! Each table borrows one game map plus the shared random source from
//! [`crate::GameStore`] and exposes the create/join/act/end operations of one
//! game kind.

mod dice;
mod tictactoe;
mod word_chain;

pub use dice::DiceTable;
pub use tictactoe::{MoveReport, TicTacToeTable};
pub use word_chain::WordChainTable;
