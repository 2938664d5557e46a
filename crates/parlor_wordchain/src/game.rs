//! Word chain game records and their state transitions.

use crate::{Scoreboard, WordChainError, check_word};
use parlor_core::{GameKind, Participant, PlayerId, TurnBased};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Game open for players to join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordChainLobby {
    roster: Vec<Participant>,
    scores: Scoreboard,
}

impl WordChainLobby {
    /// Participants in join order.
    pub fn roster(&self) -> &[Participant] {
        &self.roster
    }

    /// Scores (all zero while waiting).
    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }
}

/// Game in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordChainMatch {
    roster: Vec<Participant>,
    turn_index: usize,
    last_word: Option<String>,
    used_words: Vec<String>,
    scores: Scoreboard,
}

/// A word accepted into the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accepted {
    /// The normalised word.
    pub word: String,
    /// Points awarded (the word's length).
    pub points: u32,
    /// Participant who holds the turn now.
    pub next: Participant,
}

impl WordChainMatch {
    /// Participants in turn order.
    pub fn roster(&self) -> &[Participant] {
        &self.roster
    }

    /// Participant expected to play.
    pub fn current_participant(&self) -> &Participant {
        &self.roster[self.turn_index]
    }

    /// Last accepted word, lower-cased.
    pub fn last_word(&self) -> Option<&str> {
        self.last_word.as_deref()
    }

    /// Every word played so far, in order.
    pub fn used_words(&self) -> &[String] {
        &self.used_words
    }

    /// Current scores.
    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }

    /// Plays `word` for `player`.
    ///
    /// On success the word joins the chain, scores its length and the turn
    /// passes to the next roster entry (wrapping). Rejections change nothing.
    ///
    /// # Errors
    ///
    /// [`WordChainError::NotYourTurn`] first, then any rule violation from
    /// [`check_word`].
    #[instrument(skip(self), fields(turn = %self.current_participant()))]
    pub fn submit(&mut self, player: &Participant, word: &str) -> Result<Accepted, WordChainError> {
        if self.current_participant() != player {
            return Err(WordChainError::NotYourTurn);
        }

        let word = check_word(word, self.last_word(), &self.used_words)?;
        let points = u32::try_from(word.chars().count()).unwrap_or(u32::MAX);

        self.used_words.push(word.clone());
        self.last_word = Some(word.clone());
        self.scores.add(player, points);
        self.turn_index = (self.turn_index + 1) % self.roster.len();

        debug!(%word, points, "Word accepted");
        Ok(Accepted {
            word,
            points,
            next: self.current_participant().clone(),
        })
    }
}

/// A word chain game in one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WordChainGame {
    /// Collecting players.
    Waiting(WordChainLobby),
    /// Words being played.
    Active(WordChainMatch),
}

impl WordChainGame {
    /// Minimum roster size to start.
    pub const MIN_PLAYERS: usize = 2;

    /// Opens a lobby with `host` as the only player.
    #[instrument]
    pub fn new(host: PlayerId) -> Self {
        let host = Participant::Human(host);
        let mut scores = Scoreboard::new();
        scores.seed(host.clone());
        Self::Waiting(WordChainLobby {
            roster: vec![host],
            scores,
        })
    }

    /// Adds a participant to the lobby.
    ///
    /// # Errors
    ///
    /// [`WordChainError::NoGame`] once started;
    /// [`WordChainError::AlreadyJoined`] for a repeat join.
    #[instrument(skip(self))]
    pub fn join(&mut self, player: Participant) -> Result<&[Participant], WordChainError> {
        let Self::Waiting(lobby) = self else {
            return Err(WordChainError::NoGame);
        };
        if lobby.roster.contains(&player) {
            return Err(WordChainError::AlreadyJoined);
        }

        lobby.scores.seed(player.clone());
        lobby.roster.push(player);
        Ok(&lobby.roster)
    }

    /// Starts play with the first roster entry to move.
    ///
    /// # Errors
    ///
    /// [`WordChainError::NoGame`] if already started;
    /// [`WordChainError::NotEnoughPlayers`] below [`Self::MIN_PLAYERS`].
    #[instrument(skip(self))]
    pub fn start(&mut self) -> Result<WordChainMatch, WordChainError> {
        let Self::Waiting(lobby) = self else {
            return Err(WordChainError::NoGame);
        };
        if lobby.roster.len() < Self::MIN_PLAYERS {
            return Err(WordChainError::NotEnoughPlayers);
        }

        let started = WordChainMatch {
            roster: lobby.roster.clone(),
            turn_index: 0,
            last_word: None,
            used_words: Vec::new(),
            scores: lobby.scores.clone(),
        };
        info!(players = started.roster.len(), "Word chain started");
        *self = Self::Active(started.clone());
        Ok(started)
    }

    /// Current scores in either state.
    pub fn scores(&self) -> &Scoreboard {
        match self {
            Self::Waiting(lobby) => &lobby.scores,
            Self::Active(active) => &active.scores,
        }
    }

    /// Consumes the game, yielding its final scores.
    pub fn into_scores(self) -> Scoreboard {
        match self {
            Self::Waiting(lobby) => lobby.scores,
            Self::Active(active) => active.scores,
        }
    }

    /// The active match, if any.
    pub fn as_active(&self) -> Option<&WordChainMatch> {
        match self {
            Self::Active(active) => Some(active),
            Self::Waiting(_) => None,
        }
    }

    /// Mutable access to the active match, if any.
    pub fn as_active_mut(&mut self) -> Option<&mut WordChainMatch> {
        match self {
            Self::Active(active) => Some(active),
            Self::Waiting(_) => None,
        }
    }

    /// The lobby, if still waiting.
    pub fn as_waiting(&self) -> Option<&WordChainLobby> {
        match self {
            Self::Waiting(lobby) => Some(lobby),
            Self::Active(_) => None,
        }
    }
}

impl TurnBased for WordChainGame {
    fn kind(&self) -> GameKind {
        GameKind::WordChain
    }

    fn current_turn(&self) -> Option<&Participant> {
        self.as_active().map(WordChainMatch::current_participant)
    }
}
