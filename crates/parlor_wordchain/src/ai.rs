//! Built-in word chain opponent.

use crate::required_letter;
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument};

/// Words the AI can play, a handful per starting letter.
pub const DICTIONARY: &[&str] = &[
    "apple", "anchor", "arrow", "amber",
    "banana", "bridge", "basket", "breeze",
    "castle", "candle", "cactus", "crystal",
    "dragon", "desert", "dolphin", "diamond",
    "eagle", "engine", "ember", "elephant",
    "forest", "falcon", "feather", "fountain",
    "garden", "giraffe", "glacier", "guitar",
    "harbor", "hammer", "horizon", "honey",
    "island", "igloo", "ivory", "insect",
    "jungle", "jacket", "jigsaw", "journey",
    "kettle", "kitten", "kingdom", "koala",
    "lantern", "lemon", "lizard", "ladder",
    "mountain", "mirror", "meadow", "magnet",
    "nectar", "needle", "nugget", "ninja",
    "orange", "otter", "oyster", "orchid",
    "pepper", "parrot", "planet", "pillow",
    "quartz", "quiver", "quilt", "queen",
    "river", "rocket", "rabbit", "rainbow",
    "sunset", "spider", "saddle", "silver",
    "tiger", "tunnel", "thunder", "turtle",
    "umbrella", "unicorn", "uniform", "utensil",
    "violin", "valley", "velvet", "volcano",
    "window", "walrus", "winter", "wizard",
    "xylophone", "xenon", "xerox", "xray",
    "yogurt", "yellow", "yacht", "yonder",
    "zebra", "zipper", "zenith", "zombie",
];

/// Picks an unused dictionary word continuing the chain.
///
/// With no word played yet the chain starts from `a`. `None` means the AI
/// has nothing left to say and concedes.
#[instrument(skip(used_words, rng))]
pub fn find_word<R: Rng + ?Sized>(
    last_word: Option<&str>,
    used_words: &[String],
    rng: &mut R,
) -> Option<&'static str> {
    let letter = required_letter(last_word).unwrap_or('a');
    let candidates: Vec<&'static str> = DICTIONARY
        .iter()
        .copied()
        .filter(|word| word.starts_with(letter))
        .filter(|word| !used_words.iter().any(|used| used == word))
        .collect();

    let choice = candidates.choose(rng).copied();
    debug!(%letter, options = candidates.len(), ?choice, "AI word lookup");
    choice
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check_word;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_every_letter_covered() {
        for letter in 'a'..='z' {
            assert!(DICTIONARY.iter().any(|w| w.starts_with(letter)), "no word for {letter}");
        }
    }

    #[test]
    fn test_word_continues_chain_and_passes_rules() {
        let mut rng = StdRng::seed_from_u64(42);
        let used = vec!["cat".to_string()];
        let word = find_word(Some("cat"), &used, &mut rng).expect("t-word");
        assert!(word.starts_with('t'));
        assert_eq!(check_word(word, Some("cat"), &used), Ok(word.to_string()));
    }

    #[test]
    fn test_defaults_to_a_without_last_word() {
        let mut rng = StdRng::seed_from_u64(0);
        let word = find_word(None, &[], &mut rng).expect("a-word");
        assert!(word.starts_with('a'));
    }

    #[test]
    fn test_concedes_when_letter_exhausted() {
        let mut rng = StdRng::seed_from_u64(0);
        let used: Vec<String> = DICTIONARY
            .iter()
            .filter(|w| w.starts_with('q'))
            .map(|w| w.to_string())
            .collect();
        assert_eq!(find_word(Some("iraq"), &used, &mut rng), None);
    }

    #[test]
    fn test_no_match_for_non_letter_ending() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(find_word(Some("r2d2"), &[], &mut rng), None);
    }
}
