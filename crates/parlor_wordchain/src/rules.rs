//! Chain rules for candidate words.

use crate::WordChainError;
use tracing::{debug, instrument};

/// Shortest word accepted, in characters.
pub const MIN_WORD_LEN: usize = 2;

/// Letter the next word must start with, if a word has been played.
pub fn required_letter(last_word: Option<&str>) -> Option<char> {
    last_word.and_then(|word| word.chars().last())
}

/// Validates `candidate` against the chain and returns it normalised.
///
/// Checks run in order: length, reuse, then the chaining letter. Matching is
/// case-insensitive; the returned word is trimmed and lower-cased.
///
/// # Errors
///
/// [`WordChainError::TooShort`], [`WordChainError::WordUsed`] or
/// [`WordChainError::WrongLetter`] carrying the expected first letter.
#[instrument(skip(used_words))]
pub fn check_word(
    candidate: &str,
    last_word: Option<&str>,
    used_words: &[String],
) -> Result<String, WordChainError> {
    let word = candidate.trim().to_lowercase();

    if word.chars().count() < MIN_WORD_LEN {
        return Err(WordChainError::TooShort);
    }

    if used_words.iter().any(|used| *used == word) {
        return Err(WordChainError::WordUsed);
    }

    if let Some(expected) = required_letter(last_word)
        && !word.starts_with(expected)
    {
        debug!(%expected, "Chain broken");
        return Err(WordChainError::WrongLetter(expected));
    }

    Ok(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_must_continue_last_letter() {
        assert_eq!(check_word("apple", Some("cat"), &[]), Err(WordChainError::WrongLetter('t')));
        assert_eq!(check_word("tiger", Some("cat"), &[]), Ok("tiger".to_string()));
    }

    #[test]
    fn test_reuse_is_case_insensitive() {
        let used = vec!["dog".to_string()];
        assert_eq!(check_word("Dog", None, &used), Err(WordChainError::WordUsed));
        assert_eq!(check_word("DOG", None, &used), Err(WordChainError::WordUsed));
    }

    #[test]
    fn test_too_short_checked_first() {
        let used = vec!["a".to_string()];
        assert_eq!(check_word("a", Some("zebra"), &used), Err(WordChainError::TooShort));
        assert_eq!(check_word("  ", None, &[]), Err(WordChainError::TooShort));
    }

    #[test]
    fn test_first_word_takes_any_letter() {
        assert_eq!(check_word("  Zebra ", None, &[]), Ok("zebra".to_string()));
    }

    #[test]
    fn test_required_letter_uses_last_char() {
        assert_eq!(required_letter(Some("dog")), Some('g'));
        assert_eq!(required_letter(None), None);
    }
}
