//! Bot configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Runtime settings for the bot.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct BotConfig {
    /// Prefix every command starts with.
    #[serde(default = "default_command_prefix")]
    command_prefix: String,

    /// Seconds a player may take before their game is force-ended.
    #[serde(default = "default_turn_timeout_secs")]
    turn_timeout_secs: u64,

    /// Rounds in a dice duel when the host doesn't say.
    #[serde(default = "default_dice_rounds")]
    dice_rounds: u32,

    /// Upper bound on requested dice rounds.
    #[serde(default = "default_max_dice_rounds")]
    max_dice_rounds: u32,

    /// Fallback tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

fn default_command_prefix() -> String {
    ".".to_string()
}

fn default_turn_timeout_secs() -> u64 {
    30
}

fn default_dice_rounds() -> u32 {
    3
}

fn default_max_dice_rounds() -> u32 {
    9
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            command_prefix: default_command_prefix(),
            turn_timeout_secs: default_turn_timeout_secs(),
            dice_rounds: default_dice_rounds(),
            max_dice_rounds: default_max_dice_rounds(),
            log_filter: default_log_filter(),
        }
    }
}

impl BotConfig {
    /// Loads configuration from a TOML file; missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(prefix = %config.command_prefix, timeout = config.turn_timeout_secs, "Config loaded");
        Ok(config)
    }

    /// Parses configuration from TOML text and validates it.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()
    }

    /// Overrides the turn timeout.
    pub fn with_turn_timeout_secs(mut self, secs: u64) -> Self {
        self.turn_timeout_secs = secs;
        self
    }

    /// Turn timeout as a duration.
    pub fn turn_timeout(&self) -> Duration {
        Duration::from_secs(self.turn_timeout_secs)
    }

    /// Dice rounds to play for an optional request, within configured bounds.
    pub fn dice_rounds_for(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.dice_rounds)
            .clamp(1, self.max_dice_rounds)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.command_prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::new("command_prefix must not contain whitespace".to_string()));
        }
        if self.turn_timeout_secs == 0 {
            return Err(ConfigError::new("turn_timeout_secs must be at least 1".to_string()));
        }
        if self.max_dice_rounds == 0 || self.dice_rounds == 0 || self.dice_rounds > self.max_dice_rounds {
            return Err(ConfigError::new(format!(
                "dice_rounds must be within 1..={}",
                self.max_dice_rounds
            )));
        }
        Ok(self)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = BotConfig::from_toml("").expect("defaults");
        assert_eq!(config, BotConfig::default());
        assert_eq!(config.turn_timeout(), Duration::from_secs(30));
        assert_eq!(config.command_prefix(), ".");
    }

    #[test]
    fn test_from_file_overrides_some_keys() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "command_prefix = \"!\"\nturn_timeout_secs = 45").expect("write");

        let config = BotConfig::from_file(file.path()).expect("load");
        assert_eq!(config.command_prefix(), "!");
        assert_eq!(*config.turn_timeout_secs(), 45);
        assert_eq!(*config.dice_rounds(), 3);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = BotConfig::from_file("/definitely/not/here.toml").expect_err("missing");
        assert!(err.message.contains("Failed to read config file"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(BotConfig::from_toml("turn_timeout_secs = 0").is_err());
        assert!(BotConfig::from_toml("command_prefix = \"a b\"").is_err());
        assert!(BotConfig::from_toml("dice_rounds = 12").is_err());
        assert!(BotConfig::from_toml("turn_timeout_secs = \"soon\"").is_err());
    }

    #[test]
    fn test_dice_rounds_clamped() {
        let config = BotConfig::default();
        assert_eq!(config.dice_rounds_for(None), 3);
        assert_eq!(config.dice_rounds_for(Some(5)), 5);
        assert_eq!(config.dice_rounds_for(Some(0)), 1);
        assert_eq!(config.dice_rounds_for(Some(50)), 9);
    }
}
