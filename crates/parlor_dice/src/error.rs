//! Rejections a dice action can produce.

/// Why a dice action was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum DiceError {
    /// No game in the required state for this conversation.
    #[display("No dice game is waiting for players")]
    NoGame,

    /// The host tried to join their own game.
    #[display("You can't play against yourself")]
    SamePlayer,

    /// No active game, or the other player holds the turn.
    #[display("It's not your turn to roll")]
    NotYourTurn,
}

impl std::error::Error for DiceError {}
