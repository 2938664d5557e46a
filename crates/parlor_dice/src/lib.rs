//! Dice duel for chat conversations.
//!
//! Two players roll once per round; the higher roll takes the round and the
//! most rounds won takes the match.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod face;
mod game;

pub use error::DiceError;
pub use face::DieFace;
pub use game::{DiceGame, DiceLobby, DiceMatch, MatchProgress, RollOutcome, RoundResult};
