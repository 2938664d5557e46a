//! Reply text sent back to the conversation.

use crate::store::Expired;
use parlor_core::{GameKind, Participant};
use parlor_dice::{DiceMatch, RoundResult};
use parlor_tictactoe::{ActiveTicTacToe, Board, Mark, Placement};
use parlor_wordchain::{Scoreboard, required_letter};

/// How a participant is named in chat.
pub(crate) fn mention(participant: &Participant) -> String {
    match participant {
        Participant::Human(id) => format!("@{}", id),
        Participant::Ai => "🤖 AI".to_string(),
    }
}

pub(crate) fn help(prefix: &str) -> String {
    [
        "🎲 Available games".to_string(),
        format!("{p}ttt | {p}ttt ai | {p}ttt join | {p}ttt <1-9> | {p}ttt board | {p}ttt end", p = prefix),
        format!(
            "{p}wcg | {p}wcg join | {p}wcg ai | {p}wcg start | {p}wcg <word> | {p}wcg score | {p}wcg end",
            p = prefix
        ),
        format!(
            "Words named like a subcommand (join, ai, start, score, end, play) go through {p}wcg play <word>",
            p = prefix
        ),
        format!("{p}dice [rounds] | {p}dice ai [rounds] | {p}dice join | {p}roll | {p}dice end", p = prefix),
    ]
    .join("\n")
}

pub(crate) fn busy(kind: GameKind, prefix: &str) -> String {
    format!(
        "A {} game is already running here. Finish it or end it with {}{} end first.",
        kind,
        prefix,
        command_name(kind)
    )
}

pub(crate) fn no_game(kind: GameKind) -> String {
    format!("No {} game in this chat.", kind)
}

pub(crate) fn ended(kind: GameKind) -> String {
    format!("🛑 {} game ended.", kind)
}

pub(crate) fn timeout_notice(player: &Participant, secs: u64, expired: &Expired) -> String {
    let kind = match expired {
        Expired::TicTacToe => GameKind::TicTacToe,
        Expired::WordChain(_) => GameKind::WordChain,
        Expired::Dice => GameKind::Dice,
    };
    let mut notice = format!(
        "⏰ {} didn't play within {} seconds. {} game over.",
        mention(player),
        secs,
        kind
    );
    if let Expired::WordChain(scores) = expired {
        notice.push('\n');
        notice.push_str(&scores.render());
    }
    notice
}

fn command_name(kind: GameKind) -> &'static str {
    match kind {
        GameKind::TicTacToe => "ttt",
        GameKind::WordChain => "wcg",
        GameKind::Dice => "dice",
    }
}

// Tic-tac-toe

pub(crate) fn ttt_waiting(host: &Participant, prefix: &str) -> String {
    format!(
        "❌⭕ {} wants to play Tic-Tac-Toe! Type {}ttt join to accept.",
        mention(host),
        prefix
    )
}

pub(crate) fn ttt_started(game: &ActiveTicTacToe, prefix: &str) -> String {
    format!(
        "❌⭕ Tic-Tac-Toe: {} {} vs {} {}\n{}\n{} to move: {}ttt <1-9>",
        Mark::X.glyph(),
        mention(game.player1()),
        Mark::O.glyph(),
        mention(game.player2()),
        game.board().render(),
        mention(game.current_participant()),
        prefix
    )
}

pub(crate) fn ttt_board(game: &ActiveTicTacToe) -> String {
    format!(
        "{}\n{} to move.",
        game.board().render(),
        mention(game.current_participant())
    )
}

pub(crate) fn ttt_outcome(board: &Board, placement: &Placement) -> String {
    let status = match placement {
        Placement::Continue { next } => format!("{} to move.", mention(next)),
        Placement::Won { winner, mark } => format!("🏆 {} wins with {}!", mention(winner), mark.glyph()),
        Placement::Draw => "🤝 It's a draw!".to_string(),
    };
    format!("{}\n{}", board.render(), status)
}

// Word chain

pub(crate) fn wcg_lobby(host: &Participant, prefix: &str) -> String {
    format!(
        "🔤 {} opened a Word Chain game! {p}wcg join to play, {p}wcg ai to add the bot, {p}wcg start when ready.",
        mention(host),
        p = prefix
    )
}

pub(crate) fn wcg_joined(player: &Participant, roster: &[Participant]) -> String {
    format!("{} joined Word Chain ({} players).", mention(player), roster.len())
}

pub(crate) fn wcg_started(roster: &[Participant]) -> String {
    let names: Vec<String> = roster.iter().map(mention).collect();
    format!("🔤 Word Chain started! Order: {}", names.join(", "))
}

pub(crate) fn wcg_accepted(player: &Participant, word: &str, points: u32) -> String {
    format!("✅ {} played \"{}\" (+{})", mention(player), word, points)
}

pub(crate) fn wcg_your_turn(next: &Participant, last_word: Option<&str>, prefix: &str) -> String {
    match required_letter(last_word) {
        Some(letter) => format!(
            "{}, your turn: a word starting with '{}' ({}wcg <word>)",
            mention(next),
            letter,
            prefix
        ),
        None => format!("{}, your turn: any word to start the chain ({}wcg <word>)", mention(next), prefix),
    }
}

pub(crate) fn wcg_conceded(scores: &Scoreboard) -> String {
    let winner = scores
        .best_human()
        .map(|p| format!("🏆 {} wins!", mention(p)))
        .unwrap_or_else(|| "No winner.".to_string());
    format!("🤖 AI can't find a word and concedes. {}\n{}", winner, scores.render())
}

pub(crate) fn wcg_scores(scores: &Scoreboard) -> String {
    format!("📊 Word Chain scores\n{}", scores.render())
}

// Dice

pub(crate) fn dice_lobby(host: &Participant, rounds: u32, prefix: &str) -> String {
    format!(
        "🎲 {} challenges the chat to a {}-round dice duel! Type {}dice join to accept.",
        mention(host),
        rounds,
        prefix
    )
}

pub(crate) fn dice_started(duel: &DiceMatch, prefix: &str) -> String {
    format!(
        "🎲 Dice duel: {} vs {}, {} rounds. {} rolls first: {}roll",
        mention(duel.player1()),
        mention(duel.player2()),
        duel.rounds(),
        mention(duel.player1()),
        prefix
    )
}

pub(crate) fn dice_rolled(player: &Participant, roll: parlor_dice::DieFace) -> String {
    format!("{} rolled {} ({})", mention(player), roll.glyph(), roll.value())
}

pub(crate) fn dice_your_roll(player: &Participant, prefix: &str) -> String {
    format!("{}, your roll: {}roll", mention(player), prefix)
}

pub(crate) fn dice_round(result: &RoundResult) -> String {
    let verdict = match result.round_winner() {
        Some(winner) => format!("{} takes round {}", mention(winner), result.round()),
        None => format!("Round {} is a tie", result.round()),
    };
    let mut text = format!(
        "{} rolled {} ({})\n{}. Score {}-{}",
        mention(result.player2()),
        result.player2_roll().glyph(),
        result.player2_roll().value(),
        verdict,
        result.player1_score(),
        result.player2_score()
    );
    if result.game_finished() {
        text.push('\n');
        match result.game_winner() {
            Some(winner) => text.push_str(&format!("🏆 {} wins the duel!", mention(winner))),
            None => text.push_str("🤝 The duel ends in a draw!"),
        }
    }
    text
}
