//! Cumulative scores per participant.

use parlor_core::Participant;
use serde::{Deserialize, Serialize};

/// Scores keyed by participant, kept in join order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    entries: Vec<(Participant, u32)>,
}

impl Scoreboard {
    /// Creates an empty scoreboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a participant at zero if not already present.
    pub fn seed(&mut self, participant: Participant) {
        if self.get(&participant).is_none() {
            self.entries.push((participant, 0));
        }
    }

    /// Adds `points` to a participant, seeding them if needed.
    pub fn add(&mut self, participant: &Participant, points: u32) {
        match self.entries.iter_mut().find(|(p, _)| p == participant) {
            Some((_, score)) => *score += points,
            None => self.entries.push((participant.clone(), points)),
        }
    }

    /// Current score for a participant.
    pub fn get(&self, participant: &Participant) -> Option<u32> {
        self.entries
            .iter()
            .find(|(p, _)| p == participant)
            .map(|(_, score)| *score)
    }

    /// Entries in join order.
    pub fn entries(&self) -> &[(Participant, u32)] {
        &self.entries
    }

    /// Entries by descending score; ties keep join order.
    pub fn ranked(&self) -> Vec<(&Participant, u32)> {
        let mut ranked: Vec<(&Participant, u32)> =
            self.entries.iter().map(|(p, score)| (p, *score)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Highest-scoring human, used when the AI concedes.
    pub fn best_human(&self) -> Option<&Participant> {
        self.ranked()
            .into_iter()
            .find(|(p, _)| !p.is_ai())
            .map(|(p, _)| p)
    }

    /// Formats the table, one ranked line per participant.
    pub fn render(&self) -> String {
        self.ranked()
            .iter()
            .enumerate()
            .map(|(i, (p, score))| format!("{}. {}: {} pts", i + 1, p, score))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_sorts_descending_and_keeps_ties_stable() {
        let mut board = Scoreboard::new();
        board.seed(Participant::human("ann"));
        board.seed(Participant::human("bob"));
        board.seed(Participant::Ai);
        board.add(&Participant::human("bob"), 5);
        board.add(&Participant::Ai, 3);
        board.add(&Participant::human("ann"), 3);

        assert_eq!(board.render(), "1. bob: 5 pts\n2. ann: 3 pts\n3. AI: 3 pts");
    }

    #[test]
    fn test_seed_does_not_reset_existing_score() {
        let mut board = Scoreboard::new();
        board.add(&Participant::human("ann"), 4);
        board.seed(Participant::human("ann"));
        assert_eq!(board.get(&Participant::human("ann")), Some(4));
        assert_eq!(board.entries().len(), 1);
    }

    #[test]
    fn test_best_human_skips_ai() {
        let mut board = Scoreboard::new();
        board.add(&Participant::Ai, 10);
        board.add(&Participant::human("ann"), 2);
        assert_eq!(board.best_human(), Some(&Participant::human("ann")));
    }
}
