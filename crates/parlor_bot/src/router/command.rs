//! Chat command grammar.

use tracing::instrument;

/// Tic-tac-toe subcommands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicTacToeCommand {
    /// `ttt` or `ttt ai`.
    New {
        /// Play against the built-in AI.
        vs_ai: bool,
    },
    /// `ttt join`.
    Join,
    /// `ttt <1-9>`; the raw text is validated by the engine.
    Move(String),
    /// `ttt board`.
    Board,
    /// `ttt end`.
    End,
}

/// Word chain subcommands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordChainCommand {
    /// `wcg`.
    New,
    /// `wcg join`.
    Join,
    /// `wcg ai`: seat the bot in the lobby.
    AddAi,
    /// `wcg start`.
    Start,
    /// `wcg <word>`, or `wcg play <word>` for words that collide with a
    /// subcommand such as `start` or `end`.
    Submit(String),
    /// `wcg score`.
    Score,
    /// `wcg end`.
    End,
}

/// Dice subcommands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiceCommand {
    /// `dice [rounds]`.
    New {
        /// Requested round count.
        rounds: Option<u32>,
    },
    /// `dice ai [rounds]`: duel the bot.
    VsAi {
        /// Requested round count.
        rounds: Option<u32>,
    },
    /// `dice join`.
    Join,
    /// `roll`.
    Roll,
    /// `dice end`.
    End,
}

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `games`: list the available commands.
    Help,
    /// Tic-tac-toe.
    TicTacToe(TicTacToeCommand),
    /// Word chain.
    WordChain(WordChainCommand),
    /// Dice.
    Dice(DiceCommand),
}

impl Command {
    /// Parses `text` if it starts with `prefix` and names a known command.
    ///
    /// Returns `None` for ordinary chat and unknown commands.
    #[instrument]
    pub fn parse(prefix: &str, text: &str) -> Option<Self> {
        let body = text.trim().strip_prefix(prefix)?;
        let mut words = body.split_whitespace();
        let name = words.next()?.to_lowercase();
        let args: Vec<&str> = words.collect();
        let first = args.first().map(|a| a.to_lowercase());

        let command = match name.as_str() {
            "games" | "help" => Command::Help,
            "ttt" => Command::TicTacToe(match first.as_deref() {
                None => TicTacToeCommand::New { vs_ai: false },
                Some("ai") => TicTacToeCommand::New { vs_ai: true },
                Some("join") => TicTacToeCommand::Join,
                Some("board") => TicTacToeCommand::Board,
                Some("end") => TicTacToeCommand::End,
                Some(_) => TicTacToeCommand::Move(args.join(" ")),
            }),
            "wcg" => Command::WordChain(match first.as_deref() {
                None => WordChainCommand::New,
                Some("join") => WordChainCommand::Join,
                Some("ai") => WordChainCommand::AddAi,
                Some("start") => WordChainCommand::Start,
                Some("score") => WordChainCommand::Score,
                Some("end") => WordChainCommand::End,
                Some("play") if args.len() > 1 => WordChainCommand::Submit(args[1..].join(" ")),
                Some(_) => WordChainCommand::Submit(args.join(" ")),
            }),
            "dice" => Command::Dice(match first.as_deref() {
                None => DiceCommand::New { rounds: None },
                Some("ai") => DiceCommand::VsAi {
                    rounds: parse_rounds(args.get(1).copied())?,
                },
                Some("join") => DiceCommand::Join,
                Some("end") => DiceCommand::End,
                Some(other) => DiceCommand::New {
                    rounds: Some(other.parse().ok()?),
                },
            }),
            "roll" => Command::Dice(DiceCommand::Roll),
            _ => return None,
        };
        Some(command)
    }
}

/// `None` arg means "default"; a non-numeric arg rejects the command.
fn parse_rounds(arg: Option<&str>) -> Option<Option<u32>> {
    match arg {
        None => Some(None),
        Some(text) => text.parse().ok().map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_chat_is_not_a_command() {
        assert_eq!(Command::parse(".", "hello there"), None);
        assert_eq!(Command::parse(".", "."), None);
        assert_eq!(Command::parse(".", ".weather"), None);
    }

    #[test]
    fn test_tictactoe_forms() {
        assert_eq!(
            Command::parse(".", ".ttt"),
            Some(Command::TicTacToe(TicTacToeCommand::New { vs_ai: false }))
        );
        assert_eq!(
            Command::parse(".", " .TTT AI "),
            Some(Command::TicTacToe(TicTacToeCommand::New { vs_ai: true }))
        );
        assert_eq!(
            Command::parse(".", ".ttt 5"),
            Some(Command::TicTacToe(TicTacToeCommand::Move("5".to_string())))
        );
        assert_eq!(
            Command::parse(".", ".ttt join"),
            Some(Command::TicTacToe(TicTacToeCommand::Join))
        );
    }

    #[test]
    fn test_word_chain_keeps_word_text() {
        assert_eq!(
            Command::parse(".", ".wcg Tiger"),
            Some(Command::WordChain(WordChainCommand::Submit("Tiger".to_string())))
        );
        assert_eq!(
            Command::parse(".", ".wcg ai"),
            Some(Command::WordChain(WordChainCommand::AddAi))
        );
    }

    #[test]
    fn test_word_chain_play_form_allows_reserved_words() {
        assert_eq!(
            Command::parse(".", ".wcg play end"),
            Some(Command::WordChain(WordChainCommand::Submit("end".to_string())))
        );
        assert_eq!(
            Command::parse(".", ".wcg play Start"),
            Some(Command::WordChain(WordChainCommand::Submit("Start".to_string())))
        );
        assert_eq!(
            Command::parse(".", ".wcg play"),
            Some(Command::WordChain(WordChainCommand::Submit("play".to_string())))
        );
    }

    #[test]
    fn test_dice_rounds_and_roll() {
        assert_eq!(
            Command::parse(".", ".dice 5"),
            Some(Command::Dice(DiceCommand::New { rounds: Some(5) }))
        );
        assert_eq!(
            Command::parse(".", ".dice ai"),
            Some(Command::Dice(DiceCommand::VsAi { rounds: None }))
        );
        assert_eq!(
            Command::parse(".", ".dice ai 2"),
            Some(Command::Dice(DiceCommand::VsAi { rounds: Some(2) }))
        );
        assert_eq!(Command::parse(".", ".dice lots"), None);
        assert_eq!(Command::parse(".", ".roll"), Some(Command::Dice(DiceCommand::Roll)));
    }

    #[test]
    fn test_custom_prefix() {
        assert_eq!(Command::parse("!", "!games"), Some(Command::Help));
        assert_eq!(Command::parse("!", ".games"), None);
    }
}
