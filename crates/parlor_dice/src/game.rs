//! Dice duel records and their state transitions.

use crate::{DiceError, DieFace};
use derive_getters::Getters;
use parlor_core::{GameKind, Participant, PlayerId, TurnBased};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, info, instrument};

/// Which seat holds the turn.
///
/// Seat two's turn carries player one's roll, so a round can't be scored
/// without it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum Seat {
    One,
    Two { player1_roll: DieFace },
}

/// Duel created by player one, waiting for an opponent.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct DiceLobby {
    /// Host, rolls first each round.
    player1: Participant,
    /// Rounds to play.
    rounds: u32,
}

/// Duel in progress.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct DiceMatch {
    /// Rolls first each round.
    player1: Participant,
    /// Rolls second each round.
    player2: Participant,
    /// Total rounds in the match.
    rounds: u32,
    /// 1-based round being played.
    current_round: u32,
    /// Rounds won by player one.
    player1_score: u32,
    /// Rounds won by player two.
    player2_score: u32,
    /// Player one's roll this round.
    player1_roll: Option<DieFace>,
    /// Player two's roll this round.
    player2_roll: Option<DieFace>,
    #[getter(skip)]
    turn: Seat,
    #[getter(skip)]
    finished: bool,
}

/// How the match stands after a completed round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchProgress {
    /// Play continues with this round number.
    NextRound(u32),
    /// Last round played; `winner` is `None` on equal round wins.
    Finished {
        /// Match winner, if any.
        winner: Option<Participant>,
    },
}

/// Summary of a round once both players rolled.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct RoundResult {
    /// Round that just finished.
    round: u32,
    /// First roller.
    player1: Participant,
    /// Second roller.
    player2: Participant,
    /// Player one's roll.
    player1_roll: DieFace,
    /// Player two's roll.
    player2_roll: DieFace,
    /// Strictly higher roller; `None` on a tie.
    round_winner: Option<Participant>,
    /// Player one's round wins so far.
    player1_score: u32,
    /// Player two's round wins so far.
    player2_score: u32,
    /// What happens next.
    progress: MatchProgress,
}

impl RoundResult {
    /// Returns true if this round ended the match.
    pub fn game_finished(&self) -> bool {
        matches!(self.progress, MatchProgress::Finished { .. })
    }

    /// Match winner, once finished.
    pub fn game_winner(&self) -> Option<&Participant> {
        match &self.progress {
            MatchProgress::Finished { winner } => winner.as_ref(),
            MatchProgress::NextRound(_) => None,
        }
    }
}

/// Result of a successful roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollOutcome {
    /// Player one rolled; player two is up.
    AwaitingOpponent {
        /// Player one's roll.
        roll: DieFace,
        /// Player two, who must roll next.
        next: Participant,
    },
    /// Player two rolled and the round was scored.
    RoundComplete(RoundResult),
}

impl DiceMatch {
    /// Seats both players at round one with player one to roll.
    #[instrument]
    pub fn start(player1: Participant, player2: Participant, rounds: u32) -> Self {
        Self {
            player1,
            player2,
            rounds,
            current_round: 1,
            player1_score: 0,
            player2_score: 0,
            player1_roll: None,
            player2_roll: None,
            turn: Seat::One,
            finished: false,
        }
    }

    /// Participant expected to roll; `None` once the match is over.
    pub fn current_participant(&self) -> Option<&Participant> {
        if self.finished {
            return None;
        }
        Some(match self.turn {
            Seat::One => &self.player1,
            Seat::Two { .. } => &self.player2,
        })
    }

    /// Returns true once the final round has been scored.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Rolls a fair die for `player`.
    ///
    /// # Errors
    ///
    /// [`DiceError::NotYourTurn`] if `player` does not hold the turn.
    #[instrument(skip(self, rng))]
    pub fn roll<R: Rng + ?Sized>(&mut self, player: &Participant, rng: &mut R) -> Result<RollOutcome, DiceError> {
        self.check_turn(player)?;
        self.record_roll(player, DieFace::roll(rng))
    }

    /// Records `face` as `player`'s roll this round.
    ///
    /// Player one's roll hands the turn to player two. Player two's roll
    /// scores the round and either advances to the next round or finishes
    /// the match.
    ///
    /// # Errors
    ///
    /// [`DiceError::NotYourTurn`] if `player` does not hold the turn.
    #[instrument(skip(self), fields(round = self.current_round))]
    pub fn record_roll(&mut self, player: &Participant, face: DieFace) -> Result<RollOutcome, DiceError> {
        self.check_turn(player)?;

        match self.turn {
            Seat::One => {
                self.player1_roll = Some(face);
                self.turn = Seat::Two { player1_roll: face };
                debug!(%face, "Player one rolled");
                Ok(RollOutcome::AwaitingOpponent {
                    roll: face,
                    next: self.player2.clone(),
                })
            }
            Seat::Two { player1_roll } => {
                self.player2_roll = Some(face);
                Ok(RollOutcome::RoundComplete(self.score_round(player1_roll, face)))
            }
        }
    }

    fn check_turn(&self, player: &Participant) -> Result<(), DiceError> {
        if self.current_participant() == Some(player) {
            Ok(())
        } else {
            Err(DiceError::NotYourTurn)
        }
    }

    fn score_round(&mut self, player1_roll: DieFace, player2_roll: DieFace) -> RoundResult {
        let round = self.current_round;

        let round_winner = match player1_roll.cmp(&player2_roll) {
            Ordering::Greater => {
                self.player1_score += 1;
                Some(self.player1.clone())
            }
            Ordering::Less => {
                self.player2_score += 1;
                Some(self.player2.clone())
            }
            Ordering::Equal => None,
        };

        let progress = if self.current_round >= self.rounds {
            self.finished = true;
            let winner = match self.player1_score.cmp(&self.player2_score) {
                Ordering::Greater => Some(self.player1.clone()),
                Ordering::Less => Some(self.player2.clone()),
                Ordering::Equal => None,
            };
            info!(?winner, "Dice match finished");
            MatchProgress::Finished { winner }
        } else {
            self.current_round += 1;
            self.player1_roll = None;
            self.player2_roll = None;
            self.turn = Seat::One;
            MatchProgress::NextRound(self.current_round)
        };

        RoundResult {
            round,
            player1: self.player1.clone(),
            player2: self.player2.clone(),
            player1_roll,
            player2_roll,
            round_winner,
            player1_score: self.player1_score,
            player2_score: self.player2_score,
            progress,
        }
    }
}

/// A dice duel in one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiceGame {
    /// Waiting for player two.
    Waiting(DiceLobby),
    /// Rolling.
    Active(DiceMatch),
}

impl DiceGame {
    /// Rounds played when the host doesn't choose.
    pub const DEFAULT_ROUNDS: u32 = 3;

    /// Opens a duel hosted by `player1`. Zero rounds is raised to one.
    #[instrument]
    pub fn new(player1: PlayerId, rounds: u32) -> Self {
        Self::Waiting(DiceLobby {
            player1: Participant::Human(player1),
            rounds: rounds.max(1),
        })
    }

    /// Seats player two and starts round one.
    ///
    /// # Errors
    ///
    /// [`DiceError::NoGame`] if not waiting; [`DiceError::SamePlayer`] if the
    /// host tries to join.
    #[instrument(skip(self))]
    pub fn join(&mut self, player2: Participant) -> Result<DiceMatch, DiceError> {
        let Self::Waiting(lobby) = self else {
            return Err(DiceError::NoGame);
        };
        if lobby.player1 == player2 {
            return Err(DiceError::SamePlayer);
        }

        let started = DiceMatch::start(lobby.player1.clone(), player2, lobby.rounds);
        *self = Self::Active(started.clone());
        Ok(started)
    }

    /// The active match, if any.
    pub fn as_active(&self) -> Option<&DiceMatch> {
        match self {
            Self::Active(active) => Some(active),
            Self::Waiting(_) => None,
        }
    }

    /// Mutable access to the active match, if any.
    pub fn as_active_mut(&mut self) -> Option<&mut DiceMatch> {
        match self {
            Self::Active(active) => Some(active),
            Self::Waiting(_) => None,
        }
    }

    /// The lobby, if still waiting.
    pub fn as_waiting(&self) -> Option<&DiceLobby> {
        match self {
            Self::Waiting(lobby) => Some(lobby),
            Self::Active(_) => None,
        }
    }
}

impl TurnBased for DiceGame {
    fn kind(&self) -> GameKind {
        GameKind::Dice
    }

    fn current_turn(&self) -> Option<&Participant> {
        self.as_active().and_then(DiceMatch::current_participant)
    }
}
