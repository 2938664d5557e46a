//! Seat holders in a game: chat users or the built-in opponent.

use crate::PlayerId;
use serde::{Deserialize, Serialize};

/// Whoever occupies a seat in a game.
///
/// The computer opponent is its own variant, so "is it the bot's turn" is a
/// pattern match rather than a comparison against a reserved user id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Participant {
    /// A human chat user.
    Human(PlayerId),
    /// The built-in AI opponent.
    Ai,
}

impl Participant {
    /// Creates a human participant.
    pub fn human(id: impl Into<PlayerId>) -> Self {
        Self::Human(id.into())
    }

    /// Returns true for the AI sentinel.
    pub fn is_ai(&self) -> bool {
        matches!(self, Self::Ai)
    }

    /// Returns the human player id, if any.
    pub fn player_id(&self) -> Option<&PlayerId> {
        match self {
            Self::Human(id) => Some(id),
            Self::Ai => None,
        }
    }

    /// Returns true if this participant is the given human.
    pub fn is(&self, player: &PlayerId) -> bool {
        self.player_id() == Some(player)
    }
}

impl From<PlayerId> for Participant {
    fn from(id: PlayerId) -> Self {
        Self::Human(id)
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Human(id) => write!(f, "{}", id),
            Self::Ai => write!(f, "AI"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_is_not_any_human() {
        let ai = Participant::Ai;
        assert!(ai.is_ai());
        assert!(!ai.is(&PlayerId::from("AI")));
        assert_eq!(ai.player_id(), None);
    }

    #[test]
    fn test_human_display_is_raw_id() {
        let p = Participant::human("alice");
        assert_eq!(p.to_string(), "alice");
        assert!(p.is(&PlayerId::from("alice")));
        assert_eq!(Participant::Ai.to_string(), "AI");
    }
}
