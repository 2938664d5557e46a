//! Parlor bot - console gateway
//!
//! Feeds stdin lines to the command router and prints replies to stdout.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use parlor_bot::{BotConfig, CommandRouter, ConsoleMessenger, GameStore, IncomingMessage, TurnTimeoutSupervisor};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => BotConfig::from_file(path)?,
        None => BotConfig::default(),
    };
    if let Some(secs) = cli.timeout {
        config = config.with_turn_timeout_secs(secs.max(1));
    }

    // Logs go to stderr; stdout is the chat transcript
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(?config, "Starting parlor bot");

    let store = Arc::new(match cli.seed {
        Some(seed) => GameStore::with_seed(seed),
        None => GameStore::new(),
    });
    let supervisor = Arc::new(TurnTimeoutSupervisor::new(config.turn_timeout()));
    let router = CommandRouter::new(store, supervisor, Arc::new(ConsoleMessenger), config);

    run_console(&router).await?;

    info!("Parlor bot stopped");
    Ok(())
}

/// Routes stdin lines until EOF or Ctrl-C.
async fn run_console(router: &CommandRouter) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        };

        let Some(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match IncomingMessage::parse_line(&line) {
            Some(message) => {
                if let Err(e) = router.handle(&message).await {
                    warn!(error = %e, "Failed to deliver reply");
                }
            }
            None => warn!(%line, "Expected: <conversation> <sender> <text>"),
        }
    }

    Ok(())
}
