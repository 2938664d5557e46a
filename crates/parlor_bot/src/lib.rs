//! Parlor bot - chat games behind a command router.
//!
//! The bot keeps every conversation's games in memory and enforces a turn
//! time limit per game.
//!
//! # Architecture
//!
//! - **Store**: [`GameStore`] owns the tic-tac-toe, word chain and dice records
//!   keyed by conversation, handing out per-kind engine views
//! - **Supervisor**: [`TurnTimeoutSupervisor`] runs one cancellable timer per
//!   conversation and game kind
//! - **Messenger**: [`Messenger`] is the only outbound capability; the
//!   transport behind it is not our concern
//! - **Router**: [`CommandRouter`] turns chat commands into engine calls and
//!   replies
//!
//! # Example
//!
//! ```no_run
//! use parlor_bot::{BotConfig, CommandRouter, GameStore, IncomingMessage, MemoryMessenger, TurnTimeoutSupervisor};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), parlor_bot::BotError> {
//! let config = BotConfig::default();
//! let router = CommandRouter::new(
//!     Arc::new(GameStore::new()),
//!     Arc::new(TurnTimeoutSupervisor::new(config.turn_timeout())),
//!     Arc::new(MemoryMessenger::new()),
//!     config,
//! );
//! router.handle(&IncomingMessage::new("room".into(), "alice".into(), ".ttt ai".into())).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod engine;
mod error;
mod messenger;
mod router;
mod store;
mod supervisor;

// Crate-level exports - Configuration
pub use config::{BotConfig, ConfigError};

// Crate-level exports - Engines
pub use engine::{DiceTable, MoveReport, TicTacToeTable, WordChainTable};

// Crate-level exports - Errors
pub use error::BotError;

// Crate-level exports - Messaging
pub use messenger::{ConsoleMessenger, MemoryMessenger, Messenger, SentMessage};

// Crate-level exports - Routing
pub use router::{Command, CommandRouter, DiceCommand, IncomingMessage, TicTacToeCommand, WordChainCommand};

// Crate-level exports - State
pub use store::{Expired, GameStore};
pub use supervisor::TurnTimeoutSupervisor;
