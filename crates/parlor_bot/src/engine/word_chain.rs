//! Word chain engine keyed by conversation.

use crate::store::{GameMap, lock};
use parlor_core::{ConversationId, Participant, PlayerId};
use parlor_wordchain::{
    Accepted, Scoreboard, WordChainError, WordChainGame, WordChainLobby, WordChainMatch, find_word,
};
use rand::rngs::StdRng;
use std::sync::Mutex;
use tracing::{info, instrument, warn};

/// Word chain operations for every conversation.
#[derive(Debug, Clone, Copy)]
pub struct WordChainTable<'a> {
    games: &'a GameMap<WordChainGame>,
    rng: &'a Mutex<StdRng>,
}

impl<'a> WordChainTable<'a> {
    pub(crate) fn new(games: &'a GameMap<WordChainGame>, rng: &'a Mutex<StdRng>) -> Self {
        Self { games, rng }
    }

    /// Opens a lobby hosted by `host`, replacing any existing game.
    #[instrument(skip(self))]
    pub fn create_game(&self, conversation: &ConversationId, host: PlayerId) -> WordChainGame {
        let game = WordChainGame::new(host);
        if lock(self.games).insert(conversation.clone(), game.clone()).is_some() {
            warn!(%conversation, "Replaced an existing word chain game");
        }
        info!(%conversation, "Word chain lobby opened");
        game
    }

    /// Adds a participant to the lobby and returns the roster.
    ///
    /// # Errors
    ///
    /// [`WordChainError::NoGame`] if no lobby is open;
    /// [`WordChainError::AlreadyJoined`] for a repeat join.
    #[instrument(skip(self))]
    pub fn join_game(&self, conversation: &ConversationId, player: Participant) -> Result<Vec<Participant>, WordChainError> {
        let mut games = lock(self.games);
        let game = games.get_mut(conversation).ok_or(WordChainError::NoGame)?;
        let roster = game.join(player)?.to_vec();
        info!(%conversation, players = roster.len(), "Player joined word chain");
        Ok(roster)
    }

    /// Starts play.
    ///
    /// # Errors
    ///
    /// [`WordChainError::NoGame`] if no lobby is open;
    /// [`WordChainError::NotEnoughPlayers`] with fewer than two players.
    #[instrument(skip(self))]
    pub fn start_game(&self, conversation: &ConversationId) -> Result<WordChainMatch, WordChainError> {
        let mut games = lock(self.games);
        let game = games.get_mut(conversation).ok_or(WordChainError::NoGame)?;
        game.start()
    }

    /// Plays `word` for `player`.
    ///
    /// # Errors
    ///
    /// [`WordChainError::NotYourTurn`] if there is no active game or `player`
    /// doesn't hold the turn, otherwise the first broken chain rule.
    #[instrument(skip(self))]
    pub fn submit_word(
        &self,
        conversation: &ConversationId,
        player: &Participant,
        word: &str,
    ) -> Result<Accepted, WordChainError> {
        let mut games = lock(self.games);
        let active = games
            .get_mut(conversation)
            .and_then(WordChainGame::as_active_mut)
            .ok_or(WordChainError::NotYourTurn)?;
        active.submit(player, word)
    }

    /// Word the AI would play next, or `None` when it has to concede.
    #[instrument(skip(self))]
    pub fn ai_word(&self, conversation: &ConversationId) -> Option<&'static str> {
        let games = lock(self.games);
        let active = games.get(conversation)?.as_active()?;
        let mut rng = lock(self.rng);
        find_word(active.last_word(), active.used_words(), &mut *rng)
    }

    /// Snapshot of the active match.
    pub fn active_game(&self, conversation: &ConversationId) -> Option<WordChainMatch> {
        lock(self.games).get(conversation)?.as_active().cloned()
    }

    /// Snapshot of the open lobby.
    pub fn waiting_game(&self, conversation: &ConversationId) -> Option<WordChainLobby> {
        lock(self.games).get(conversation)?.as_waiting().cloned()
    }

    /// Current scores in either state.
    pub fn scores(&self, conversation: &ConversationId) -> Option<Scoreboard> {
        lock(self.games).get(conversation).map(|game| game.scores().clone())
    }

    /// Removes the game and returns its final scores.
    #[instrument(skip(self))]
    pub fn end_game(&self, conversation: &ConversationId) -> Option<Scoreboard> {
        let removed = lock(self.games).remove(conversation)?;
        info!(%conversation, "Word chain ended");
        Some(removed.into_scores())
    }
}
