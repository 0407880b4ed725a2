//! Single-field validators.
//!
//! Each validator is pure: it looks at one raw cell and reports whether the value is valid,
//! was repaired, or is unusable. Repairs come from the catalog's correction pipelines.

use crate::catalog::{self, CorrectionRule, NOT_MARKED, correction_rules_for, is_known_grade, is_placeholder};
use crate::types::{Confidence, Field};
use serde::Serialize;

/// Outcome of checking one field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FieldCheck {
    /// Accepted as-is (possibly normalized, e.g. trimmed or upper-cased).
    Valid { value: String },
    /// Repaired into an accepted value.
    Corrected {
        value: String,
        note: String,
        confidence: Confidence,
    },
    /// Unusable; `message` says why.
    Invalid { message: String },
}

impl FieldCheck {
    fn valid(value: impl Into<String>) -> Self {
        FieldCheck::Valid { value: value.into() }
    }

    fn invalid(message: impl Into<String>) -> Self {
        FieldCheck::Invalid {
            message: message.into(),
        }
    }

    /// True only for values accepted unchanged. A corrected value reports `false`: its note
    /// has to reach the audit trail.
    pub fn is_valid(&self) -> bool {
        matches!(self, FieldCheck::Valid { .. })
    }

    /// True for valid and corrected values.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, FieldCheck::Invalid { .. })
    }

    /// The value to keep, `None` when invalid.
    pub fn corrected_value(&self) -> Option<&str> {
        match self {
            FieldCheck::Valid { value } | FieldCheck::Corrected { value, .. } => Some(value),
            FieldCheck::Invalid { .. } => None,
        }
    }

    /// Correction note or error message; `None` for plain valid values.
    pub fn message(&self) -> Option<&str> {
        match self {
            FieldCheck::Valid { .. } => None,
            FieldCheck::Corrected { note, .. } => Some(note),
            FieldCheck::Invalid { message } => Some(message),
        }
    }
}

/// Result of running a correction pipeline to a catalog match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub value: String,
    /// Labels of the rules that changed the value, in order.
    pub rules: Vec<&'static str>,
}

/// Apply `rules` in order, stopping at the first intermediate value `accept` recognizes.
fn run_pipeline(value: &str, rules: &[CorrectionRule], accept: impl Fn(&str) -> bool) -> Option<Correction> {
    let mut current = value.to_string();
    let mut fired = Vec::new();

    for rule in rules {
        let next = rule.apply(&current);
        if next.as_ref() == current.as_str() {
            continue;
        }
        let next = next.into_owned();
        fired.push(rule.label);
        current = next;

        if accept(&current) {
            return Some(Correction { value: current, rules: fired });
        }
    }

    None
}

/// Try to repair a size string that matches no catalog pattern.
///
/// ```rust
/// use steelsched::validation::attempt_size_correction;
///
/// let fixed = attempt_size_correction("25O UB 37.2").unwrap();
/// assert_eq!(fixed.value, "250UB37.2");
/// assert_eq!(fixed.rules, vec!["removed spaces", "O→0"]);
/// assert!(attempt_size_correction("garbage123xyz").is_none());
/// ```
pub fn attempt_size_correction(size: &str) -> Option<Correction> {
    let correction = run_pipeline(size, correction_rules_for(Field::Size), |candidate| {
        catalog::match_size(candidate).is_some()
    });
    if let Some(correction) = &correction {
        tracing::debug!(raw = size, corrected = %correction.value, rules = ?correction.rules, "Size corrected");
    }
    correction
}

/// Validate a section size against the AS 4100 catalog, repairing OCR confusions if possible.
pub fn validate_size(value: &str) -> FieldCheck {
    if is_placeholder(value) {
        return FieldCheck::invalid("Size is empty");
    }

    let size = value.trim();
    if catalog::match_size(size).is_some() {
        return FieldCheck::valid(size);
    }

    match attempt_size_correction(size) {
        Some(Correction { value, rules }) => FieldCheck::Corrected {
            note: format!("Auto-corrected: '{}' → '{}' ({})", size, value, rules.join(", ")),
            value,
            confidence: Confidence::Medium,
        },
        None => FieldCheck::invalid(format!("Invalid format: '{}' doesn't match AS 4100 pattern", size)),
    }
}

/// Validate a steel grade. A missing grade is acceptable.
pub fn validate_grade(value: &str) -> FieldCheck {
    if is_placeholder(value) {
        return FieldCheck::valid(value);
    }

    let grade = value.trim().to_uppercase();
    if is_known_grade(&grade) {
        return FieldCheck::valid(grade);
    }
    if grade.contains("NOT") || grade.contains("MARKED") {
        return FieldCheck::valid(NOT_MARKED);
    }

    match run_pipeline(&grade, correction_rules_for(Field::Grade), is_known_grade) {
        Some(Correction { value, .. }) => FieldCheck::Corrected {
            note: format!("Auto-corrected: '{}' → '{}'", grade, value),
            value,
            confidence: Confidence::Medium,
        },
        None => FieldCheck::invalid(format!("Unknown grade: '{}'", grade)),
    }
}

/// Validate a member length. Bare digit strings are read as millimetres.
pub fn validate_length(value: &str) -> FieldCheck {
    if is_placeholder(value) {
        return FieldCheck::invalid("Length is missing");
    }

    let length = value.trim();
    if length.to_uppercase().contains("VAR") {
        return FieldCheck::valid(length);
    }
    if length.to_lowercase().contains('m') && length.chars().any(|c| c.is_ascii_digit()) {
        return FieldCheck::valid(length);
    }
    if length.chars().all(|c| c.is_ascii_digit()) {
        let value = format!("{} mm", length);
        return FieldCheck::Corrected {
            note: format!("Added units: '{}' → '{}'", length, value),
            value,
            confidence: Confidence::Medium,
        };
    }

    FieldCheck::invalid(format!("Invalid length format: '{}'", length))
}

/// Validate a beam quantity against the catalog range.
pub fn validate_quantity(value: &str) -> FieldCheck {
    if is_placeholder(value) {
        return FieldCheck::invalid("Quantity is missing");
    }

    let qty = value.trim();
    if !qty.chars().all(|c| c.is_ascii_digit()) {
        return FieldCheck::invalid(format!("Invalid quantity format: '{}'", qty));
    }

    let range = catalog::quantity_range();
    match qty.parse::<u64>() {
        Ok(n) if u32::try_from(n).is_ok_and(|n| range.contains(&n)) => FieldCheck::valid(qty),
        Ok(n) => FieldCheck::invalid(format!(
            "Quantity {} seems unusual (expected {}-{})",
            n,
            range.start(),
            range.end()
        )),
        Err(_) => FieldCheck::invalid(format!(
            "Quantity {} seems unusual (expected {}-{})",
            qty,
            range.start(),
            range.end()
        )),
    }
}

/// Dispatch to the validator for `field`. Fields without format rules return `None`.
pub fn validate_field(field: Field, value: &str) -> Option<FieldCheck> {
    match field {
        Field::Size => Some(validate_size(value)),
        Field::Grade => Some(validate_grade(value)),
        Field::Length => Some(validate_length(value)),
        Field::Qty => Some(validate_quantity(value)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corrected(check: &FieldCheck) -> (&str, &str) {
        match check {
            FieldCheck::Corrected { value, note, .. } => (value, note),
            other => panic!("expected correction, got {other:?}"),
        }
    }

    #[test]
    fn test_size_valid_is_trimmed() {
        assert_eq!(validate_size(" 310UC158 "), FieldCheck::valid("310UC158"));
        assert_eq!(validate_size("WB1220×6.0"), FieldCheck::valid("WB1220×6.0"));
    }

    #[test]
    fn test_size_empty() {
        for value in ["", "N/A", "-", "  "] {
            assert_eq!(validate_size(value), FieldCheck::invalid("Size is empty"));
        }
    }

    #[test]
    fn test_size_correction_short_circuits() {
        let check = validate_size("25OUB37.2");
        let (value, note) = corrected(&check);
        assert_eq!(value, "250UB37.2");
        assert_eq!(note, "Auto-corrected: '25OUB37.2' → '250UB37.2' (O→0)");
    }

    #[test]
    fn test_size_correction_lists_every_rule() {
        let check = validate_size("2 S0 PFC");
        let (value, note) = corrected(&check);
        assert_eq!(value, "250PFC");
        assert!(note.ends_with("(removed spaces, S→5)"), "{note}");
    }

    #[test]
    fn test_size_spaces_only() {
        let check = validate_size("310 UC 158");
        let (value, _) = corrected(&check);
        assert_eq!(value, "310UC158");
    }

    #[test]
    fn test_size_invalid() {
        assert_eq!(
            validate_size("garbage123xyz"),
            FieldCheck::invalid("Invalid format: 'garbage123xyz' doesn't match AS 4100 pattern")
        );
    }

    #[test]
    fn test_size_correction_has_medium_confidence() {
        match validate_size("3I0UC158") {
            FieldCheck::Corrected { confidence, value, .. } => {
                assert_eq!(value, "310UC158");
                assert_eq!(confidence, Confidence::Medium);
            }
            other => panic!("expected correction, got {other:?}"),
        }
    }

    #[test]
    fn test_grade_known_is_upper_cased() {
        assert_eq!(validate_grade("ha350"), FieldCheck::valid("HA350"));
        assert_eq!(validate_grade("300"), FieldCheck::valid("300"));
    }

    #[test]
    fn test_grade_missing_is_valid() {
        assert!(validate_grade("N/A").is_valid());
        assert!(validate_grade("").is_valid());
    }

    #[test]
    fn test_grade_not_marked() {
        assert_eq!(validate_grade("not marked"), FieldCheck::valid(NOT_MARKED));
        assert_eq!(validate_grade("UNMARKED"), FieldCheck::valid(NOT_MARKED));
    }

    #[test]
    fn test_grade_corrections() {
        let check = validate_grade("350LO");
        let (value, note) = corrected(&check);
        assert_eq!(value, "350L0");
        assert_eq!(note, "Auto-corrected: '350LO' → '350L0'");

        let check = validate_grade("300 plus");
        let (value, _) = corrected(&check);
        assert_eq!(value, "300PLUS");
    }

    #[test]
    fn test_grade_unknown() {
        assert_eq!(validate_grade("JSO"), FieldCheck::invalid("Unknown grade: 'JSO'"));
    }

    #[test]
    fn test_length_with_units() {
        assert_eq!(validate_length("5400 mm"), FieldCheck::valid("5400 mm"));
        assert_eq!(validate_length("5.4m"), FieldCheck::valid("5.4m"));
    }

    #[test]
    fn test_length_varies() {
        assert!(validate_length("VARIES").is_valid());
        assert!(validate_length("var.").is_valid());
    }

    #[test]
    fn test_length_adds_units() {
        let check = validate_length("5400");
        let (value, note) = corrected(&check);
        assert_eq!(value, "5400 mm");
        assert_eq!(note, "Added units: '5400' → '5400 mm'");
    }

    #[test]
    fn test_length_missing_and_invalid() {
        assert_eq!(validate_length("N/A"), FieldCheck::invalid("Length is missing"));
        assert_eq!(
            validate_length("long"),
            FieldCheck::invalid("Invalid length format: 'long'")
        );
    }

    #[test]
    fn test_quantity() {
        assert_eq!(validate_quantity("2"), FieldCheck::valid("2"));
        assert_eq!(validate_quantity("999"), FieldCheck::valid("999"));
        assert_eq!(
            validate_quantity("0"),
            FieldCheck::invalid("Quantity 0 seems unusual (expected 1-999)")
        );
        assert_eq!(
            validate_quantity("1500"),
            FieldCheck::invalid("Quantity 1500 seems unusual (expected 1-999)")
        );
        assert_eq!(
            validate_quantity("two"),
            FieldCheck::invalid("Invalid quantity format: 'two'")
        );
        assert_eq!(validate_quantity("-"), FieldCheck::invalid("Quantity is missing"));
    }

    #[test]
    fn test_field_check_accessors() {
        let valid = FieldCheck::valid("2");
        assert!(valid.is_valid());
        assert_eq!(valid.corrected_value(), Some("2"));
        assert_eq!(valid.message(), None);

        let corrected = validate_length("5400");
        assert!(!corrected.is_valid());
        assert!(corrected.is_resolved());
        assert_eq!(corrected.corrected_value(), Some("5400 mm"));

        let invalid = validate_quantity("two");
        assert!(!invalid.is_valid());
        assert!(!invalid.is_resolved());
        assert_eq!(invalid.corrected_value(), None);
        assert_eq!(invalid.message(), Some("Invalid quantity format: 'two'"));
    }

    #[test]
    fn test_validate_field_dispatch() {
        assert!(validate_field(Field::Comments, "anything").is_none());
        assert!(validate_field(Field::Size, "250PFC").is_some_and(|c| c.is_valid()));
    }

    #[test]
    fn test_corrected_values_revalidate_as_valid() {
        let cases = [
            (Field::Size, "25OUB37.2"),
            (Field::Size, "3I0UC158"),
            (Field::Size, "75 x 75 x 4 SHS"),
            (Field::Grade, "350LO"),
            (Field::Length, "5400"),
        ];
        for (field, raw) in cases {
            let check = validate_field(field, raw).unwrap();
            assert!(matches!(check, FieldCheck::Corrected { .. }), "{field} {raw}");
            let fixed = check.corrected_value().unwrap();
            assert!(
                matches!(validate_field(field, fixed).unwrap(), FieldCheck::Valid { .. }),
                "{field} {fixed}"
            );
        }
    }
}
