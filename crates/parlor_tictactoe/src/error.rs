//! Rejections a tic-tac-toe action can produce.

/// Why a tic-tac-toe action was refused.
///
/// These are ordinary user-input outcomes; the router turns each one into a
/// short chat reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum TicTacToeError {
    /// No game in the required state for this conversation.
    #[display("No tic-tac-toe game is waiting for players")]
    NoGame,

    /// The host tried to join their own game.
    #[display("You can't play against yourself")]
    SamePlayer,

    /// No active game, or another participant holds the turn.
    #[display("It's not your turn")]
    NotYourTurn,

    /// Position outside 1-9, not a number, or already occupied.
    #[display("Invalid move: pick an empty square from 1 to 9")]
    InvalidMove,
}

impl std::error::Error for TicTacToeError {}
