//! Tic-tac-toe game records and their state transitions.
//!
//! A record is either waiting for a second player or active. Only the active
//! variant carries a board and an opponent, so a missing player two can never
//! be read mid-game.

use crate::{Board, Mark, Position, Square, TicTacToeError, check_winner, is_full};
use parlor_core::{GameKind, Participant, PlayerId, TurnBased};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Game created by a human, waiting for an opponent to join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitingTicTacToe {
    player1: PlayerId,
}

impl WaitingTicTacToe {
    /// The host, who will play X.
    pub fn player1(&self) -> &PlayerId {
        &self.player1
    }
}

/// Game in progress between two seated participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveTicTacToe {
    player1: Participant,
    player2: Participant,
    board: Board,
    turn: Mark,
}

/// What a successful move led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Game continues; `next` holds the turn.
    Continue {
        /// Participant expected to move next.
        next: Participant,
    },
    /// The mover completed a line.
    Won {
        /// The winning participant.
        winner: Participant,
        /// The winning mark.
        mark: Mark,
    },
    /// Board filled without a line.
    Draw,
}

impl Placement {
    /// Returns true if the game is over.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Placement::Continue { .. })
    }
}

impl ActiveTicTacToe {
    /// Seats both players on an empty board with X to move.
    #[instrument]
    pub fn start(player1: Participant, player2: Participant) -> Self {
        Self {
            player1,
            player2,
            board: Board::new(),
            turn: Mark::X,
        }
    }

    /// Player one (X).
    pub fn player1(&self) -> &Participant {
        &self.player1
    }

    /// Player two (O), possibly the AI.
    pub fn player2(&self) -> &Participant {
        &self.player2
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark to move.
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Returns true if player two is the built-in AI.
    pub fn is_ai(&self) -> bool {
        self.player2.is_ai()
    }

    /// The participant playing `mark`.
    pub fn participant(&self, mark: Mark) -> &Participant {
        match mark {
            Mark::X => &self.player1,
            Mark::O => &self.player2,
        }
    }

    /// Participant expected to move.
    pub fn current_participant(&self) -> &Participant {
        self.participant(self.turn)
    }

    /// Places the current participant's mark at the typed position.
    ///
    /// The turn is checked before the input is parsed. A rejected move leaves
    /// the board and turn untouched.
    ///
    /// # Errors
    ///
    /// [`TicTacToeError::NotYourTurn`] if `player` does not hold the turn;
    /// [`TicTacToeError::InvalidMove`] if `position` is not 1-9 or is taken.
    #[instrument(skip(self), fields(turn = ?self.turn))]
    pub fn place(&mut self, player: &Participant, position: &str) -> Result<Placement, TicTacToeError> {
        if self.current_participant() != player {
            debug!(expected = %self.current_participant(), "Move out of turn");
            return Err(TicTacToeError::NotYourTurn);
        }

        let pos = Position::parse(position).ok_or(TicTacToeError::InvalidMove)?;
        if !self.board.is_empty(pos) {
            debug!(%pos, "Square already occupied");
            return Err(TicTacToeError::InvalidMove);
        }

        let mark = self.turn;
        self.board.set(pos, Square::Occupied(mark));

        if let Some(winner) = check_winner(&self.board) {
            return Ok(Placement::Won {
                winner: self.participant(winner).clone(),
                mark: winner,
            });
        }

        if is_full(&self.board) {
            return Ok(Placement::Draw);
        }

        self.turn = mark.opponent();
        Ok(Placement::Continue {
            next: self.current_participant().clone(),
        })
    }
}

/// A tic-tac-toe game in one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicTacToeGame {
    /// Created, waiting for a second human.
    Waiting(WaitingTicTacToe),
    /// Both seats filled, moves accepted.
    Active(ActiveTicTacToe),
}

impl TicTacToeGame {
    /// Creates a game hosted by `player1`.
    ///
    /// Against the AI the game is active immediately with the AI as O;
    /// otherwise it waits for a second human.
    #[instrument]
    pub fn new(player1: PlayerId, vs_ai: bool) -> Self {
        if vs_ai {
            Self::Active(ActiveTicTacToe::start(Participant::Human(player1), Participant::Ai))
        } else {
            Self::Waiting(WaitingTicTacToe { player1 })
        }
    }

    /// Seats a second human and activates the game.
    ///
    /// # Errors
    ///
    /// [`TicTacToeError::NoGame`] if the game is not waiting;
    /// [`TicTacToeError::SamePlayer`] if the host tries to join.
    #[instrument(skip(self))]
    pub fn join(&mut self, player2: PlayerId) -> Result<ActiveTicTacToe, TicTacToeError> {
        let player1 = match self {
            Self::Waiting(waiting) => waiting.player1.clone(),
            Self::Active(_) => return Err(TicTacToeError::NoGame),
        };
        if player1 == player2 {
            return Err(TicTacToeError::SamePlayer);
        }

        let active = ActiveTicTacToe::start(Participant::Human(player1), Participant::Human(player2));
        *self = Self::Active(active.clone());
        Ok(active)
    }

    /// The active game, if any.
    pub fn as_active(&self) -> Option<&ActiveTicTacToe> {
        match self {
            Self::Active(active) => Some(active),
            Self::Waiting(_) => None,
        }
    }

    /// Mutable access to the active game, if any.
    pub fn as_active_mut(&mut self) -> Option<&mut ActiveTicTacToe> {
        match self {
            Self::Active(active) => Some(active),
            Self::Waiting(_) => None,
        }
    }

    /// The waiting game, if any.
    pub fn as_waiting(&self) -> Option<&WaitingTicTacToe> {
        match self {
            Self::Waiting(waiting) => Some(waiting),
            Self::Active(_) => None,
        }
    }
}

impl TurnBased for TicTacToeGame {
    fn kind(&self) -> GameKind {
        GameKind::TicTacToe
    }

    fn current_turn(&self) -> Option<&Participant> {
        self.as_active().map(ActiveTicTacToe::current_participant)
    }
}
