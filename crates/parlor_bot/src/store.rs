//! In-memory game store owned by the bot service.

use crate::engine::{DiceTable, TicTacToeTable, WordChainTable};
use parlor_core::{ConversationId, GameKind, Participant, TurnBased};
use parlor_dice::DiceGame;
use parlor_tictactoe::TicTacToeGame;
use parlor_wordchain::{Scoreboard, WordChainGame};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument};

/// Records for one game kind, keyed by conversation.
pub(crate) type GameMap<G> = Mutex<HashMap<ConversationId, G>>;

/// Locks a mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A game removed because its turn holder ran out of time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expired {
    /// Tic-tac-toe game removed.
    TicTacToe,
    /// Word chain removed, with its final scores.
    WordChain(Scoreboard),
    /// Dice duel removed.
    Dice,
}

/// Owns every conversation's games.
///
/// Each game kind lives behind its own lock, held for the whole
/// check-then-act sequence of an operation, so a turn check and the mutation
/// it guards can't interleave with another call for the same kind.
#[derive(Debug)]
pub struct GameStore {
    tictactoe: GameMap<TicTacToeGame>,
    word_chain: GameMap<WordChainGame>,
    dice: GameMap<DiceGame>,
    rng: Mutex<StdRng>,
    // Serialises "check idle, then create" across game kinds.
    creation: Mutex<()>,
}

impl GameStore {
    /// Creates an empty store seeded from the OS.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating game store");
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Creates an empty store with reproducible AI choices and dice rolls.
    #[instrument]
    pub fn with_seed(seed: u64) -> Self {
        info!(seed, "Creating seeded game store");
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            tictactoe: Mutex::new(HashMap::new()),
            word_chain: Mutex::new(HashMap::new()),
            dice: Mutex::new(HashMap::new()),
            rng: Mutex::new(rng),
            creation: Mutex::new(()),
        }
    }

    /// Tic-tac-toe operations.
    pub fn tictactoe(&self) -> TicTacToeTable<'_> {
        TicTacToeTable::new(&self.tictactoe, &self.rng)
    }

    /// Word chain operations.
    pub fn word_chain(&self) -> WordChainTable<'_> {
        WordChainTable::new(&self.word_chain, &self.rng)
    }

    /// Dice operations.
    pub fn dice(&self) -> DiceTable<'_> {
        DiceTable::new(&self.dice, &self.rng)
    }

    /// Kind of the game currently waiting or active in a conversation.
    #[instrument(skip(self))]
    pub fn busy_kind(&self, conversation: &ConversationId) -> Option<GameKind> {
        if lock(&self.tictactoe).contains_key(conversation) {
            Some(GameKind::TicTacToe)
        } else if lock(&self.word_chain).contains_key(conversation) {
            Some(GameKind::WordChain)
        } else if lock(&self.dice).contains_key(conversation) {
            Some(GameKind::Dice)
        } else {
            None
        }
    }

    /// Runs `create` only if no game of any kind occupies the conversation.
    ///
    /// The idle check and the creation happen under one guard, so two
    /// concurrent creations in the same conversation can't both succeed.
    ///
    /// # Errors
    ///
    /// Returns the kind of the game already running.
    #[instrument(skip(self, create))]
    pub fn create_if_idle<T>(
        &self,
        conversation: &ConversationId,
        create: impl FnOnce(&Self) -> T,
    ) -> Result<T, GameKind> {
        let _guard = lock(&self.creation);
        match self.busy_kind(conversation) {
            Some(kind) => {
                debug!(%conversation, %kind, "Conversation busy, not creating");
                Err(kind)
            }
            None => Ok(create(self)),
        }
    }

    /// Ends a game because `expected` failed to act in time.
    ///
    /// Only removes the game if it still exists and `expected` still holds
    /// the turn; a game that finished, was replaced, or moved on returns
    /// `None` and is left alone.
    #[instrument(skip(self))]
    pub fn expire_turn(
        &self,
        conversation: &ConversationId,
        kind: GameKind,
        expected: &Participant,
    ) -> Option<Expired> {
        let expired = match kind {
            GameKind::TicTacToe => {
                remove_if_turn(&self.tictactoe, conversation, expected).map(|_| Expired::TicTacToe)
            }
            GameKind::WordChain => remove_if_turn(&self.word_chain, conversation, expected)
                .map(|game| Expired::WordChain(game.into_scores())),
            GameKind::Dice => remove_if_turn(&self.dice, conversation, expected).map(|_| Expired::Dice),
        };

        match &expired {
            Some(_) => info!(%conversation, %kind, player = %expected, "Turn expired, game ended"),
            None => debug!(%conversation, %kind, "Expiry ignored, turn already moved on"),
        }
        expired
    }
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new()
    }
}

fn remove_if_turn<G: TurnBased>(
    games: &GameMap<G>,
    conversation: &ConversationId,
    expected: &Participant,
) -> Option<G> {
    let mut games = lock(games);
    if games.get(conversation).is_some_and(|game| game.is_turn_of(expected)) {
        games.remove(conversation)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlor_core::PlayerId;

    #[test]
    fn test_busy_kind_tracks_any_game() {
        let store = GameStore::with_seed(1);
        let room = ConversationId::from("room");
        assert_eq!(store.busy_kind(&room), None);

        store.dice().create_game(&room, PlayerId::from("p1"), 3);
        assert_eq!(store.busy_kind(&room), Some(GameKind::Dice));
        assert_eq!(store.busy_kind(&ConversationId::from("other")), None);

        store.dice().end_game(&room);
        assert_eq!(store.busy_kind(&room), None);
    }

    #[test]
    fn test_expire_requires_matching_turn() {
        let store = GameStore::with_seed(1);
        let room = ConversationId::from("room");
        store.tictactoe().create_game(&room, PlayerId::from("u1"), true);

        assert_eq!(store.expire_turn(&room, GameKind::TicTacToe, &Participant::Ai), None);
        assert_eq!(store.expire_turn(&room, GameKind::Dice, &Participant::human("u1")), None);
        assert!(store.tictactoe().active_game(&room).is_some());

        assert_eq!(
            store.expire_turn(&room, GameKind::TicTacToe, &Participant::human("u1")),
            Some(Expired::TicTacToe)
        );
        assert!(store.tictactoe().active_game(&room).is_none());
    }

    #[test]
    fn test_create_if_idle_refuses_busy_conversation() {
        let store = GameStore::with_seed(1);
        let room = ConversationId::from("room");

        let created = store.create_if_idle(&room, |s| s.dice().create_game(&room, PlayerId::from("p1"), 3));
        assert!(created.is_ok());

        let refused = store.create_if_idle(&room, |s| s.tictactoe().create_game(&room, PlayerId::from("p2"), true));
        assert_eq!(refused.map(|_| ()), Err(GameKind::Dice));
        assert!(store.tictactoe().active_game(&room).is_none());
    }

    #[test]
    fn test_concurrent_creations_admit_one_game() {
        let store = GameStore::with_seed(1);
        let room = ConversationId::from("room");

        let created: usize = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let store = &store;
                    let room = &room;
                    scope.spawn(move || {
                        let host = PlayerId::new(format!("p{i}"));
                        let result = if i % 2 == 0 {
                            store.create_if_idle(room, |s| {
                                s.tictactoe().create_game(room, host, false);
                            })
                        } else {
                            store.create_if_idle(room, |s| {
                                s.word_chain().create_game(room, host);
                            })
                        };
                        usize::from(result.is_ok())
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().expect("thread")).sum()
        });

        assert_eq!(created, 1);
        let ttt = store.tictactoe().waiting_game(&room).is_some();
        let wcg = store.word_chain().waiting_game(&room).is_some();
        assert!(ttt ^ wcg);
    }

    #[test]
    fn test_expire_waiting_game_is_ignored() {
        let store = GameStore::with_seed(1);
        let room = ConversationId::from("room");
        store.word_chain().create_game(&room, PlayerId::from("h"));
        assert_eq!(store.expire_turn(&room, GameKind::WordChain, &Participant::human("h")), None);
        assert!(store.word_chain().waiting_game(&room).is_some());
    }
}
