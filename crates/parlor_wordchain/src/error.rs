//! Rejections a word chain action can produce.

/// Why a word chain action was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum WordChainError {
    /// No game in the required state for this conversation.
    #[display("No word chain game is waiting for players")]
    NoGame,

    /// The participant is already on the roster.
    #[display("You already joined this game")]
    AlreadyJoined,

    /// Fewer than two participants when starting.
    #[display("Need at least 2 players to start")]
    NotEnoughPlayers,

    /// No active game, or another participant holds the turn.
    #[display("It's not your turn")]
    NotYourTurn,

    /// Word shorter than the minimum length.
    #[display("Word is too short")]
    TooShort,

    /// Word already played in this game.
    #[display("That word was already used")]
    WordUsed,

    /// Word does not start with the required letter.
    #[display("Word must start with '{}'", _0)]
    WrongLetter(char),
}

impl std::error::Error for WordChainError {}
