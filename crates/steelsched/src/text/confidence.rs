//! Text-quality heuristic for extracted strings.
//!
//! Scores a value as [`Confidence::High`] or [`Confidence::Low`] from character-level
//! anomalies typical of OCR output: text split into single characters, truncated bracketed
//! notes, upper/lower case churn and known truncated words. Field semantics play no part, so it
//! is safe for free text such as `Comments` that the validators never touch.

use crate::types::Confidence;

const SHORT_TEXT_CHARS: usize = 3;
const TOKEN_DENSITY_THRESHOLD: f64 = 0.4;
const SINGLE_CHAR_RATIO_THRESHOLD: f64 = 0.3;
const SPLIT_MIN_TOKENS: usize = 5;
const SPLIT_SINGLE_CHAR_RATIO_THRESHOLD: f64 = 0.4;
const BRACKET_TRUNCATION_CHARS: usize = 20;
const CASE_CHURN_MIN_CHARS: usize = 10;
const CASE_CHURN_THRESHOLD: f64 = 0.6;

const BRACKET_TRUNCATION_SUFFIX: &str = " sta";
const TRUNCATION_FRAGMENTS: &[&str] = &[" sta ", " coffe", " handwrit", " delet"];

/// Classify `text` as high or low confidence.
///
/// Empty text and `N/A` are high confidence: an absent value is not an OCR error.
///
/// ```rust
/// use steelsched::{Confidence, classify};
///
/// assert_eq!(classify("Install anchor bolts per AS4100"), Confidence::High);
/// assert_eq!(classify("H H o o t l d d"), Confidence::Low);
/// ```
pub fn classify(text: &str) -> Confidence {
    let text = text.trim();
    if text.is_empty() || text == "N/A" {
        return Confidence::High;
    }

    let chars: Vec<char> = text.chars().collect();
    if chars.len() < SHORT_TEXT_CHARS {
        return Confidence::High;
    }

    if is_character_split(text, chars.len())
        || is_truncated_bracket(text, chars.len())
        || has_case_churn(&chars)
        || has_truncation_fragment(text)
    {
        return Confidence::Low;
    }

    Confidence::High
}

/// `"H H o o t l d d"`: many whitespace tokens and most of them one character long.
fn is_character_split(text: &str, char_count: usize) -> bool {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.is_empty() {
        return false;
    }

    let token_count = tokens.len() as f64;
    let single_chars = tokens.iter().filter(|token| token.chars().count() == 1).count() as f64;

    let dense = token_count > char_count as f64 * TOKEN_DENSITY_THRESHOLD
        && single_chars > token_count * SINGLE_CHAR_RATIO_THRESHOLD;
    let split = tokens.len() > SPLIT_MIN_TOKENS && single_chars > token_count * SPLIT_SINGLE_CHAR_RATIO_THRESHOLD;

    dense || split
}

fn is_truncated_bracket(text: &str, char_count: usize) -> bool {
    text.starts_with('[')
        && !text.ends_with(']')
        && (char_count < BRACKET_TRUNCATION_CHARS || text.ends_with(BRACKET_TRUNCATION_SUFFIX))
}

fn has_case_churn(chars: &[char]) -> bool {
    if chars.len() <= CASE_CHURN_MIN_CHARS {
        return false;
    }

    let changes = chars
        .windows(2)
        .filter(|pair| pair[0].is_uppercase() != pair[1].is_uppercase())
        .count();

    changes as f64 > chars.len() as f64 * CASE_CHURN_THRESHOLD
}

fn has_truncation_fragment(text: &str) -> bool {
    let lower = text.to_lowercase();
    TRUNCATION_FRAGMENTS.iter().any(|fragment| lower.contains(fragment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_values_are_high() {
        assert_eq!(classify(""), Confidence::High);
        assert_eq!(classify("   "), Confidence::High);
        assert_eq!(classify("N/A"), Confidence::High);
    }

    #[test]
    fn test_short_values_are_high() {
        assert_eq!(classify("B1"), Confidence::High);
        assert_eq!(classify("x2"), Confidence::High);
    }

    #[test]
    fn test_character_split_is_low() {
        assert_eq!(classify("H H o o t l d d"), Confidence::Low);
        assert_eq!(classify("Hot dip g a l v a n i s e d"), Confidence::Low);
    }

    #[test]
    fn test_truncated_bracket_is_low() {
        assert_eq!(classify("[ sta"), Confidence::Low);
        assert_eq!(classify("[Handrail"), Confidence::Low);
        assert_eq!(classify("[Refer to drawing S-101 for cleat details"), Confidence::High);
        assert_eq!(classify("[Refer to drawing S-101 for cleat details sta"), Confidence::Low);
        assert_eq!(classify("[Hold]"), Confidence::High);
    }

    #[test]
    fn test_case_churn_is_low() {
        assert_eq!(classify("HoTdIpGaLvAnIsEd"), Confidence::Low);
    }

    #[test]
    fn test_truncation_fragments_are_low() {
        assert_eq!(classify("Provide coffe"), Confidence::Low);
        assert_eq!(classify("Refer to handwritten note"), Confidence::Low);
        assert_eq!(classify("Item was delet"), Confidence::Low);
        assert_eq!(classify("Bolts sta here"), Confidence::Low);
    }

    #[test]
    fn test_standard_words_are_not_truncations() {
        assert_eq!(classify("Galvanise to standard finish"), Confidence::High);
    }

    #[test]
    fn test_clean_engineering_text_is_high() {
        assert_eq!(classify("Install anchor bolts per AS4100"), Confidence::High);
        assert_eq!(classify("250UB37.2"), Confidence::High);
        assert_eq!(classify("Hot dip galvanised"), Confidence::High);
    }

    #[test]
    fn test_classification_is_deterministic() {
        for text in ["H H o o t l d d", "Install anchor bolts per AS4100", "[ sta"] {
            assert_eq!(classify(text), classify(text));
        }
    }
}
