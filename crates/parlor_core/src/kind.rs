//! Game kinds and the turn-ownership seam shared by all of them.

use crate::Participant;
use serde::{Deserialize, Serialize};

/// The three game kinds a conversation can host.
///
/// Also serves as the namespace for turn timers, so each kind gets its own
/// timer slot per conversation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum GameKind {
    /// Tic-Tac-Toe.
    #[strum(to_string = "Tic-Tac-Toe")]
    TicTacToe,
    /// Word Chain.
    #[strum(to_string = "Word Chain")]
    WordChain,
    /// Dice duel.
    #[strum(to_string = "Dice")]
    Dice,
}

/// A game record whose turn can be owned by exactly one participant.
pub trait TurnBased {
    /// The kind of game this record belongs to.
    fn kind(&self) -> GameKind;

    /// Participant expected to act next, or `None` while the game is still
    /// waiting for players.
    fn current_turn(&self) -> Option<&Participant>;

    /// Returns true if the game is in progress and `participant` holds the turn.
    fn is_turn_of(&self, participant: &Participant) -> bool {
        self.current_turn() == Some(participant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_kinds_display_names() {
        let names: Vec<String> = GameKind::iter().map(|k| k.to_string()).collect();
        assert_eq!(names, vec!["Tic-Tac-Toe", "Word Chain", "Dice"]);
    }
}
