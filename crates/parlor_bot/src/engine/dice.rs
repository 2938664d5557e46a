//! Dice engine keyed by conversation.

use crate::store::{GameMap, lock};
use parlor_core::{ConversationId, Participant, PlayerId};
use parlor_dice::{DiceError, DiceGame, DiceLobby, DiceMatch, RollOutcome};
use rand::rngs::StdRng;
use std::sync::Mutex;
use tracing::{info, instrument, warn};

/// Dice operations for every conversation.
#[derive(Debug, Clone, Copy)]
pub struct DiceTable<'a> {
    games: &'a GameMap<DiceGame>,
    rng: &'a Mutex<StdRng>,
}

impl<'a> DiceTable<'a> {
    pub(crate) fn new(games: &'a GameMap<DiceGame>, rng: &'a Mutex<StdRng>) -> Self {
        Self { games, rng }
    }

    /// Opens a duel of `rounds` rounds, replacing any existing game.
    #[instrument(skip(self))]
    pub fn create_game(&self, conversation: &ConversationId, player1: PlayerId, rounds: u32) -> DiceGame {
        let game = DiceGame::new(player1, rounds);
        if lock(self.games).insert(conversation.clone(), game.clone()).is_some() {
            warn!(%conversation, "Replaced an existing dice game");
        }
        info!(%conversation, rounds, "Dice duel created");
        game
    }

    /// Seats player two and starts round one.
    ///
    /// # Errors
    ///
    /// [`DiceError::NoGame`] if nothing is waiting;
    /// [`DiceError::SamePlayer`] if the host joins.
    #[instrument(skip(self))]
    pub fn join_game(&self, conversation: &ConversationId, player2: Participant) -> Result<DiceMatch, DiceError> {
        let mut games = lock(self.games);
        let game = games.get_mut(conversation).ok_or(DiceError::NoGame)?;
        let started = game.join(player2)?;
        info!(%conversation, "Dice duel started");
        Ok(started)
    }

    /// Rolls for `player`; a finished match is removed from the store.
    ///
    /// # Errors
    ///
    /// [`DiceError::NotYourTurn`] if there is no active game or `player`
    /// doesn't hold the turn.
    #[instrument(skip(self))]
    pub fn player_roll(&self, conversation: &ConversationId, player: &Participant) -> Result<RollOutcome, DiceError> {
        let mut games = lock(self.games);
        let active = games
            .get_mut(conversation)
            .and_then(DiceGame::as_active_mut)
            .ok_or(DiceError::NotYourTurn)?;

        let outcome = {
            let mut rng = lock(self.rng);
            active.roll(player, &mut *rng)?
        };

        if active.is_finished() {
            games.remove(conversation);
            info!(%conversation, "Dice duel over");
        }
        Ok(outcome)
    }

    /// Snapshot of the active duel.
    pub fn active_game(&self, conversation: &ConversationId) -> Option<DiceMatch> {
        lock(self.games).get(conversation)?.as_active().cloned()
    }

    /// Snapshot of the waiting duel.
    pub fn waiting_game(&self, conversation: &ConversationId) -> Option<DiceLobby> {
        lock(self.games).get(conversation)?.as_waiting().cloned()
    }

    /// Removes the duel unconditionally.
    #[instrument(skip(self))]
    pub fn end_game(&self, conversation: &ConversationId) -> Option<DiceGame> {
        let removed = lock(self.games).remove(conversation);
        if removed.is_some() {
            info!(%conversation, "Dice duel ended");
        }
        removed
    }
}
