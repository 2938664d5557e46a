//! Word chain for chat conversations.
//!
//! Players take turns submitting words; each word must start with the last
//! letter of the previous one and may be used only once per game. A word
//! scores its length for the player who played it.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod ai;
mod error;
mod game;
mod rules;
mod scoreboard;

pub use ai::{DICTIONARY, find_word};
pub use error::WordChainError;
pub use game::{Accepted, WordChainGame, WordChainLobby, WordChainMatch};
pub use rules::{MIN_WORD_LEN, check_word, required_letter};
pub use scoreboard::Scoreboard;
