//! Character-level OCR suspects in section sizes.
//!
//! These sizes usually pass the catalog: `250UB77.2` is a well-formed UB designation, it just
//! does not exist. Findings are for a human reviewer.

use crate::types::Field;
use once_cell::sync::Lazy;
use regex::Regex;

static UB_SIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)UB(\d+)\.(\d+)").expect("UB size regex pattern is valid and should compile"));
static UC_SIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)UC(\d+)").expect("UC size regex pattern is valid and should compile"));
static WB_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)WB\s*\d+\.\d+").expect("WB decimal regex pattern is valid and should compile"));
static WB_SPACED_X: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)WB\s*\d+\s+x\s+\d+\.\d+").expect("WB spaced x regex pattern is valid and should compile")
});

/// UC suffixes that are common misreads of real sections (`158`, `137`, ...).
const SUSPECT_UC_SUFFIXES: &[&str] = &["118", "108", "128"];

/// Describe likely character substitutions in `value`. Only `Size` is inspected.
///
/// ```rust
/// use steelsched::Field;
/// use steelsched::review::detect_ocr_character_errors;
///
/// let findings = detect_ocr_character_errors(Field::Size, "250UB77.2");
/// assert_eq!(findings.len(), 1);
/// assert!(findings[0].contains("250UB37.2"));
/// ```
pub fn detect_ocr_character_errors(field: Field, value: &str) -> Vec<String> {
    let mut findings = Vec::new();
    if field != Field::Size {
        return findings;
    }

    if let Some(caps) = UB_SIZE.captures(value) {
        let (depth, mass, fraction) = (&caps[1], &caps[2], &caps[3]);
        if mass.len() == 2 && mass.starts_with('7') {
            findings.push(format!(
                "Possible OCR error: '{}' might be '{}UB3{}.{}' (7→3 substitution)",
                value,
                depth,
                &mass[1..],
                fraction
            ));
        }
    }

    if let Some(caps) = UC_SIZE.captures(value) {
        let suffix = &caps[2];
        if SUSPECT_UC_SUFFIXES.contains(&suffix) {
            findings.push(format!(
                "Possible OCR error in UC size: '{}' - verify suffix '{}' (common substitutions: 8↔5, 0↔5)",
                value, suffix
            ));
        }
    }

    if WB_DECIMAL.is_match(value) || WB_SPACED_X.is_match(value) {
        findings.push(format!(
            "Size format appears incorrect: '{}' - welded beam should be format 'WB[depth]×[thickness]' \
             (e.g., 'WB1220×6.0')",
            value
        ));
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ub_seven_for_three() {
        let findings = detect_ocr_character_errors(Field::Size, "250UB75.2");
        assert_eq!(
            findings,
            vec!["Possible OCR error: '250UB75.2' might be '250UB35.2' (7→3 substitution)"]
        );
    }

    #[test]
    fn test_ub_without_suspect_mass() {
        assert!(detect_ocr_character_errors(Field::Size, "250UB37.2").is_empty());
        assert!(detect_ocr_character_errors(Field::Size, "530UB7.2").is_empty());
    }

    #[test]
    fn test_uc_suspect_suffix() {
        let findings = detect_ocr_character_errors(Field::Size, "310UC118");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].contains("verify suffix '118'"));
        assert!(detect_ocr_character_errors(Field::Size, "310UC158").is_empty());
    }

    #[test]
    fn test_welded_beam_layouts() {
        assert_eq!(detect_ocr_character_errors(Field::Size, "WB 612.200").len(), 1);
        assert_eq!(detect_ocr_character_errors(Field::Size, "WB 610 x 27.2").len(), 1);
        assert!(detect_ocr_character_errors(Field::Size, "WB1220×6.0").is_empty());
    }

    #[test]
    fn test_other_fields_are_ignored() {
        assert!(detect_ocr_character_errors(Field::Grade, "250UB75.2").is_empty());
    }
}
