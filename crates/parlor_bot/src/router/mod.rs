//! Chat command routing.
//!
//! [`CommandRouter`] parses each incoming message, runs it against the
//! [`GameStore`] engines, plays any AI turn that follows, keeps the turn
//! timer in step with whoever must act next and sends one reply through the
//! [`Messenger`].

mod command;
mod replies;

pub use command::{Command, DiceCommand, TicTacToeCommand, WordChainCommand};

use crate::{BotConfig, BotError, GameStore, Messenger, TurnTimeoutSupervisor};
use derive_getters::Getters;
use derive_new::new;
use parlor_core::{ConversationId, GameKind, Participant, PlayerId};
use parlor_dice::{DiceError, DiceMatch, RollOutcome};
use parlor_tictactoe::{Placement, TicTacToeGame};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// A chat message addressed to the bot.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct IncomingMessage {
    /// Conversation the message arrived in.
    conversation: ConversationId,
    /// Author of the message.
    sender: PlayerId,
    /// Raw message text.
    text: String,
}

impl IncomingMessage {
    /// Parses a console line of the form `<conversation> <sender> <text...>`.
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut parts = line.trim().splitn(3, char::is_whitespace);
        let conversation = parts.next().filter(|s| !s.is_empty())?;
        let sender = parts.next().filter(|s| !s.is_empty())?;
        let text = parts.next().unwrap_or_default().trim();
        Some(Self::new(conversation.into(), sender.into(), text.to_string()))
    }
}

/// Dispatches chat commands to the game engines.
pub struct CommandRouter {
    store: Arc<GameStore>,
    supervisor: Arc<TurnTimeoutSupervisor>,
    messenger: Arc<dyn Messenger>,
    config: BotConfig,
}

impl std::fmt::Debug for CommandRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRouter")
            .field("store", &self.store)
            .field("supervisor", &self.supervisor)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CommandRouter {
    /// Creates a router over shared state.
    #[instrument(skip_all)]
    pub fn new(
        store: Arc<GameStore>,
        supervisor: Arc<TurnTimeoutSupervisor>,
        messenger: Arc<dyn Messenger>,
        config: BotConfig,
    ) -> Self {
        info!(prefix = %config.command_prefix(), "Creating command router");
        Self {
            store,
            supervisor,
            messenger,
            config,
        }
    }

    /// Shared game store.
    pub fn store(&self) -> &Arc<GameStore> {
        &self.store
    }

    /// Shared turn timer.
    pub fn supervisor(&self) -> &Arc<TurnTimeoutSupervisor> {
        &self.supervisor
    }

    /// Active configuration.
    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Handles one message. Returns true if it was a command and a reply was sent.
    ///
    /// Must be called from within a tokio runtime, since turn timers are
    /// spawned tasks.
    ///
    /// # Errors
    ///
    /// Returns an error only if the reply could not be delivered; game
    /// rejections are replies, not errors.
    #[instrument(skip(self, message), fields(conversation = %message.conversation, sender = %message.sender))]
    pub async fn handle(&self, message: &IncomingMessage) -> Result<bool, BotError> {
        let Some(command) = Command::parse(self.config.command_prefix(), &message.text) else {
            return Ok(false);
        };
        debug!(?command, "Dispatching command");

        let reply = self.dispatch(&message.conversation, &message.sender, command);
        self.messenger.send_message(&message.conversation, &reply).await?;
        Ok(true)
    }

    fn dispatch(&self, conversation: &ConversationId, sender: &PlayerId, command: Command) -> String {
        match command {
            Command::Help => replies::help(self.prefix()),
            Command::TicTacToe(command) => self.tictactoe(conversation, sender, command),
            Command::WordChain(command) => self.word_chain(conversation, sender, command),
            Command::Dice(command) => self.dice(conversation, sender, command),
        }
    }

    fn prefix(&self) -> &str {
        self.config.command_prefix()
    }

    /// Refusal text when another game already occupies the conversation.
    fn busy(&self, conversation: &ConversationId, kind: GameKind) -> String {
        warn!(%conversation, %kind, "Game already running");
        replies::busy(kind, self.prefix())
    }

    /// Restarts the turn timer for `player`; the AI's turns are never timed.
    fn arm_turn(&self, conversation: &ConversationId, kind: GameKind, player: &Participant) {
        if player.is_ai() {
            self.supervisor.disarm(conversation, kind);
            return;
        }

        let store = Arc::clone(&self.store);
        let messenger = Arc::clone(&self.messenger);
        let target = conversation.clone();
        let expected = player.clone();
        let secs = self.supervisor.timeout().as_secs();

        self.supervisor.arm(conversation.clone(), kind, move || async move {
            let Some(expired) = store.expire_turn(&target, kind, &expected) else {
                return;
            };
            let notice = replies::timeout_notice(&expected, secs, &expired);
            if let Err(e) = messenger.send_message(&target, &notice).await {
                warn!(conversation = %target, error = %e, "Failed to deliver timeout notice");
            }
        });
    }

    fn disarm(&self, conversation: &ConversationId, kind: GameKind) {
        self.supervisor.disarm(conversation, kind);
    }

    // Tic-tac-toe

    fn tictactoe(&self, conversation: &ConversationId, sender: &PlayerId, command: TicTacToeCommand) -> String {
        let table = self.store.tictactoe();
        match command {
            TicTacToeCommand::New { vs_ai } => {
                let created = self.store.create_if_idle(conversation, |store| {
                    store.tictactoe().create_game(conversation, sender.clone(), vs_ai)
                });
                match created {
                    Err(kind) => self.busy(conversation, kind),
                    Ok(TicTacToeGame::Active(game)) => {
                        self.arm_turn(conversation, GameKind::TicTacToe, game.current_participant());
                        replies::ttt_started(&game, self.prefix())
                    }
                    Ok(TicTacToeGame::Waiting(game)) => {
                        replies::ttt_waiting(&Participant::Human(game.player1().clone()), self.prefix())
                    }
                }
            }
            TicTacToeCommand::Join => match table.join_game(conversation, sender.clone()) {
                Ok(game) => {
                    self.arm_turn(conversation, GameKind::TicTacToe, game.current_participant());
                    replies::ttt_started(&game, self.prefix())
                }
                Err(e) => rejected(&e),
            },
            TicTacToeCommand::Move(position) => {
                self.ttt_move(conversation, &Participant::Human(sender.clone()), &position)
            }
            TicTacToeCommand::Board => match table.active_game(conversation) {
                Some(game) => replies::ttt_board(&game),
                None => replies::no_game(GameKind::TicTacToe),
            },
            TicTacToeCommand::End => match table.end_game(conversation) {
                Some(_) => {
                    self.disarm(conversation, GameKind::TicTacToe);
                    replies::ended(GameKind::TicTacToe)
                }
                None => replies::no_game(GameKind::TicTacToe),
            },
        }
    }

    fn ttt_move(&self, conversation: &ConversationId, player: &Participant, position: &str) -> String {
        let table = self.store.tictactoe();
        let mut report = match table.make_move(conversation, player, position) {
            Ok(report) => report,
            Err(e) => return rejected(&e),
        };
        let mut lines = Vec::new();

        let ai_to_move = matches!(&report.placement, Placement::Continue { next } if next.is_ai());
        if ai_to_move {
            let ai_report = table.ai_move(conversation).and_then(|pos| {
                table
                    .make_move(conversation, &Participant::Ai, &pos.number().to_string())
                    .ok()
                    .map(|report| (pos, report))
            });
            match ai_report {
                Some((pos, ai)) => {
                    lines.push(format!("{} plays {}", replies::mention(&Participant::Ai), pos));
                    report = ai;
                }
                None => {
                    warn!(%conversation, "AI could not move, ending game");
                    table.end_game(conversation);
                    self.disarm(conversation, GameKind::TicTacToe);
                    lines.push(replies::ttt_outcome(&report.board, &report.placement));
                    lines.push(replies::ended(GameKind::TicTacToe));
                    return lines.join("\n");
                }
            }
        }

        match &report.placement {
            Placement::Continue { next } => self.arm_turn(conversation, GameKind::TicTacToe, next),
            Placement::Won { .. } | Placement::Draw => self.disarm(conversation, GameKind::TicTacToe),
        }
        lines.push(replies::ttt_outcome(&report.board, &report.placement));
        lines.join("\n")
    }

    // Word chain

    fn word_chain(&self, conversation: &ConversationId, sender: &PlayerId, command: WordChainCommand) -> String {
        let table = self.store.word_chain();
        let player = Participant::Human(sender.clone());
        match command {
            WordChainCommand::New => {
                let created = self.store.create_if_idle(conversation, |store| {
                    store.word_chain().create_game(conversation, sender.clone())
                });
                match created {
                    Ok(_) => replies::wcg_lobby(&player, self.prefix()),
                    Err(kind) => self.busy(conversation, kind),
                }
            }
            WordChainCommand::Join => match table.join_game(conversation, player.clone()) {
                Ok(roster) => replies::wcg_joined(&player, &roster),
                Err(e) => rejected(&e),
            },
            WordChainCommand::AddAi => match table.join_game(conversation, Participant::Ai) {
                Ok(roster) => replies::wcg_joined(&Participant::Ai, &roster),
                Err(e) => rejected(&e),
            },
            WordChainCommand::Start => match table.start_game(conversation) {
                Ok(game) => {
                    let mut lines = vec![replies::wcg_started(game.roster())];
                    self.wcg_advance(conversation, game.current_participant().clone(), &mut lines);
                    lines.join("\n")
                }
                Err(e) => rejected(&e),
            },
            WordChainCommand::Submit(word) => match table.submit_word(conversation, &player, &word) {
                Ok(accepted) => {
                    let mut lines = vec![replies::wcg_accepted(&player, &accepted.word, accepted.points)];
                    self.wcg_advance(conversation, accepted.next, &mut lines);
                    lines.join("\n")
                }
                Err(e) => rejected(&e),
            },
            WordChainCommand::Score => match table.scores(conversation) {
                Some(scores) => replies::wcg_scores(&scores),
                None => replies::no_game(GameKind::WordChain),
            },
            WordChainCommand::End => match table.end_game(conversation) {
                Some(scores) => {
                    self.disarm(conversation, GameKind::WordChain);
                    format!("{}\n{}", replies::ended(GameKind::WordChain), scores.render())
                }
                None => replies::no_game(GameKind::WordChain),
            },
        }
    }

    /// Plays AI turns until a human holds the turn, then times that human.
    fn wcg_advance(&self, conversation: &ConversationId, mut next: Participant, lines: &mut Vec<String>) {
        let table = self.store.word_chain();

        while next.is_ai() {
            let played = table
                .ai_word(conversation)
                .and_then(|word| table.submit_word(conversation, &Participant::Ai, word).ok());
            match played {
                Some(accepted) => {
                    lines.push(replies::wcg_accepted(&Participant::Ai, &accepted.word, accepted.points));
                    next = accepted.next;
                }
                None => {
                    info!(%conversation, "AI conceded word chain");
                    self.disarm(conversation, GameKind::WordChain);
                    if let Some(scores) = table.end_game(conversation) {
                        lines.push(replies::wcg_conceded(&scores));
                    }
                    return;
                }
            }
        }

        let last_word = table
            .active_game(conversation)
            .and_then(|game| game.last_word().map(str::to_string));
        lines.push(replies::wcg_your_turn(&next, last_word.as_deref(), self.prefix()));
        self.arm_turn(conversation, GameKind::WordChain, &next);
    }

    // Dice

    fn dice(&self, conversation: &ConversationId, sender: &PlayerId, command: DiceCommand) -> String {
        let table = self.store.dice();
        let player = Participant::Human(sender.clone());
        match command {
            DiceCommand::New { rounds } => {
                let rounds = self.config.dice_rounds_for(rounds);
                let created = self.store.create_if_idle(conversation, |store| {
                    store.dice().create_game(conversation, sender.clone(), rounds)
                });
                match created {
                    Ok(_) => replies::dice_lobby(&player, rounds, self.prefix()),
                    Err(kind) => self.busy(conversation, kind),
                }
            }
            DiceCommand::VsAi { rounds } => {
                let rounds = self.config.dice_rounds_for(rounds);
                let started = self.store.create_if_idle(conversation, |store| {
                    store.dice().create_game(conversation, sender.clone(), rounds);
                    store.dice().join_game(conversation, Participant::Ai)
                });
                match started {
                    Ok(joined) => self.dice_started(conversation, joined),
                    Err(kind) => self.busy(conversation, kind),
                }
            }
            DiceCommand::Join => self.dice_join(conversation, player),
            DiceCommand::Roll => self.dice_roll(conversation, &player),
            DiceCommand::End => match table.end_game(conversation) {
                Some(_) => {
                    self.disarm(conversation, GameKind::Dice);
                    replies::ended(GameKind::Dice)
                }
                None => replies::no_game(GameKind::Dice),
            },
        }
    }

    fn dice_join(&self, conversation: &ConversationId, player2: Participant) -> String {
        let joined = self.store.dice().join_game(conversation, player2);
        self.dice_started(conversation, joined)
    }

    fn dice_started(&self, conversation: &ConversationId, joined: Result<DiceMatch, DiceError>) -> String {
        match joined {
            Ok(duel) => {
                self.arm_turn(conversation, GameKind::Dice, duel.player1());
                replies::dice_started(&duel, self.prefix())
            }
            Err(e) => rejected(&e),
        }
    }

    fn dice_roll(&self, conversation: &ConversationId, player: &Participant) -> String {
        let table = self.store.dice();
        let mut roller = player.clone();
        let mut lines = Vec::new();

        loop {
            let outcome = match table.player_roll(conversation, &roller) {
                Ok(outcome) => outcome,
                Err(e) if lines.is_empty() => return rejected(&e),
                Err(e) => {
                    warn!(%conversation, error = %e, "AI roll failed, ending duel");
                    table.end_game(conversation);
                    self.disarm(conversation, GameKind::Dice);
                    lines.push(replies::ended(GameKind::Dice));
                    break;
                }
            };

            match outcome {
                RollOutcome::AwaitingOpponent { roll, next } => {
                    lines.push(replies::dice_rolled(&roller, roll));
                    if next.is_ai() {
                        roller = next;
                        continue;
                    }
                    lines.push(replies::dice_your_roll(&next, self.prefix()));
                    self.arm_turn(conversation, GameKind::Dice, &next);
                }
                RollOutcome::RoundComplete(result) => {
                    lines.push(replies::dice_round(&result));
                    if result.game_finished() {
                        self.disarm(conversation, GameKind::Dice);
                    } else {
                        lines.push(replies::dice_your_roll(result.player1(), self.prefix()));
                        self.arm_turn(conversation, GameKind::Dice, result.player1());
                    }
                }
            }
            break;
        }

        lines.join("\n")
    }
}

/// Reply for a rejected action.
fn rejected(error: &dyn std::error::Error) -> String {
    warn!(%error, "Action rejected");
    format!("⚠️ {}", error)
}
