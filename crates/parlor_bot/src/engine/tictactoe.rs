//! Tic-tac-toe engine keyed by conversation.

use crate::store::{GameMap, lock};
use parlor_core::{ConversationId, Participant, PlayerId};
use parlor_tictactoe::{
    ActiveTicTacToe, Board, Placement, Position, TicTacToeError, TicTacToeGame, WaitingTicTacToe,
    best_move,
};
use rand::rngs::StdRng;
use std::sync::Mutex;
use tracing::{info, instrument, warn};

/// Board after an accepted move and what the move led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    /// Board including the move.
    pub board: Board,
    /// Continue, win or draw.
    pub placement: Placement,
}

/// Tic-tac-toe operations for every conversation.
#[derive(Debug, Clone, Copy)]
pub struct TicTacToeTable<'a> {
    games: &'a GameMap<TicTacToeGame>,
    rng: &'a Mutex<StdRng>,
}

impl<'a> TicTacToeTable<'a> {
    pub(crate) fn new(games: &'a GameMap<TicTacToeGame>, rng: &'a Mutex<StdRng>) -> Self {
        Self { games, rng }
    }

    /// Creates a game, replacing any existing one in the conversation.
    ///
    /// Against the AI the game starts active; otherwise it waits for a join.
    #[instrument(skip(self))]
    pub fn create_game(&self, conversation: &ConversationId, player1: PlayerId, vs_ai: bool) -> TicTacToeGame {
        let game = TicTacToeGame::new(player1, vs_ai);
        if lock(self.games).insert(conversation.clone(), game.clone()).is_some() {
            warn!(%conversation, "Replaced an existing tic-tac-toe game");
        }
        info!(%conversation, vs_ai, "Tic-tac-toe game created");
        game
    }

    /// Seats a second human in a waiting game.
    ///
    /// # Errors
    ///
    /// [`TicTacToeError::NoGame`] if nothing is waiting;
    /// [`TicTacToeError::SamePlayer`] if the host joins.
    #[instrument(skip(self))]
    pub fn join_game(&self, conversation: &ConversationId, player2: PlayerId) -> Result<ActiveTicTacToe, TicTacToeError> {
        let mut games = lock(self.games);
        let game = games.get_mut(conversation).ok_or(TicTacToeError::NoGame)?;
        let active = game.join(player2)?;
        info!(%conversation, "Tic-tac-toe game started");
        Ok(active)
    }

    /// Plays `position` for `player`.
    ///
    /// A win or draw removes the game from the store.
    ///
    /// # Errors
    ///
    /// [`TicTacToeError::NotYourTurn`] if there is no active game or `player`
    /// doesn't hold the turn; [`TicTacToeError::InvalidMove`] for a bad
    /// position.
    #[instrument(skip(self))]
    pub fn make_move(
        &self,
        conversation: &ConversationId,
        player: &Participant,
        position: &str,
    ) -> Result<MoveReport, TicTacToeError> {
        let mut games = lock(self.games);
        let active = games
            .get_mut(conversation)
            .and_then(TicTacToeGame::as_active_mut)
            .ok_or(TicTacToeError::NotYourTurn)?;

        let placement = active.place(player, position)?;
        let board = active.board().clone();

        if placement.is_terminal() {
            games.remove(conversation);
            info!(%conversation, ?placement, "Tic-tac-toe game over");
        }

        Ok(MoveReport { board, placement })
    }

    /// Position the AI would play, if the AI holds the turn.
    #[instrument(skip(self))]
    pub fn ai_move(&self, conversation: &ConversationId) -> Option<Position> {
        let games = lock(self.games);
        let active = games.get(conversation)?.as_active()?;
        if !active.current_participant().is_ai() {
            return None;
        }
        let mut rng = lock(self.rng);
        best_move(active.board(), active.turn(), &mut *rng)
    }

    /// Snapshot of the active game.
    pub fn active_game(&self, conversation: &ConversationId) -> Option<ActiveTicTacToe> {
        lock(self.games).get(conversation)?.as_active().cloned()
    }

    /// Snapshot of the waiting game.
    pub fn waiting_game(&self, conversation: &ConversationId) -> Option<WaitingTicTacToe> {
        lock(self.games).get(conversation)?.as_waiting().cloned()
    }

    /// Removes the game unconditionally.
    #[instrument(skip(self))]
    pub fn end_game(&self, conversation: &ConversationId) -> Option<TicTacToeGame> {
        let removed = lock(self.games).remove(conversation);
        if removed.is_some() {
            info!(%conversation, "Tic-tac-toe game ended");
        }
        removed
    }
}
