//! Advisory review of extracted values.
//!
//! Findings here never change a row's validity. They point a human at values that are
//! well-formed but suspicious: likely OCR substitutions, misaligned columns and unusual
//! quantities.

pub mod context;
mod ocr;

pub use context::{ContextCorrection, correct_with_context};
pub use ocr::detect_ocr_character_errors;

use crate::catalog::is_placeholder;
use crate::types::{Confidence, Field};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("Number regex pattern is valid and should compile"));
static WB_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)WB\s*\d+\.\d+").expect("WB decimal regex pattern is valid and should compile"));
static SPACED_X: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+[xX]\s+").expect("Spaced x regex pattern is valid and should compile"));
static THREE_BARE_NUMBERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+\s+\d+\s+\d+").expect("Three bare numbers regex pattern is valid and should compile")
});
static DECIMAL_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\d+$").expect("Decimal number regex pattern is valid and should compile"));
static GRADE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9/\s\-\.]+$").expect("Grade characters regex pattern is valid and should compile"));

/// Misreads of `HA350` seen on scanned schedules.
const HA350_MISREADS: &[&str] = &["JSO", "JS0", "J50", "J5O"];

const LENGTH_DIGITS: std::ops::RangeInclusive<usize> = 2..=6;
const HIGH_QUANTITY: i64 = 200;

/// Review outcome for one field value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FieldInspection {
    /// Lowest confidence across the findings; `High` when there are none.
    pub confidence: Confidence,
    pub findings: Vec<String>,
}

impl FieldInspection {
    fn flag(&mut self, confidence: Confidence, finding: String) {
        self.confidence = self.confidence.worst(confidence);
        self.findings.push(finding);
    }
}

/// Inspect one field value for review.
///
/// ```rust
/// use steelsched::{Confidence, Field};
/// use steelsched::review::inspect_field;
///
/// let inspection = inspect_field(Field::Grade, "JSO");
/// assert_eq!(inspection.confidence, Confidence::Low);
/// assert!(inspection.findings[0].contains("HA350"));
/// ```
pub fn inspect_field(field: Field, value: &str) -> FieldInspection {
    let mut inspection = FieldInspection::default();
    if is_placeholder(value) {
        return inspection;
    }
    let value = value.trim();

    match field {
        Field::Size => inspect_size(value, &mut inspection),
        Field::Length => inspect_length(value, &mut inspection),
        Field::Qty => inspect_quantity(value, &mut inspection),
        Field::Grade => inspect_grade(value, &mut inspection),
        Field::Comments => inspect_comments(value, &mut inspection),
        _ => {}
    }

    inspection
}

fn numbers(value: &str) -> Vec<u64> {
    NUMBER
        .find_iter(value)
        .map(|m| m.as_str().parse().unwrap_or(u64::MAX))
        .collect()
}

fn inspect_size(value: &str, inspection: &mut FieldInspection) {
    for finding in detect_ocr_character_errors(Field::Size, value) {
        inspection.flag(Confidence::Low, finding);
    }

    let upper = value.to_uppercase();
    if upper.contains("WB") && !WB_DECIMAL.is_match(value) {
        inspect_welded_beam(value, inspection);
    }

    if THREE_BARE_NUMBERS.is_match(value)
        && !value.contains('×')
        && !upper.contains('X')
        && !upper.contains("UB")
        && !upper.contains("UC")
    {
        inspection.flag(
            Confidence::Medium,
            format!("Size format may need verification: '{}'", value),
        );
    }
}

fn inspect_welded_beam(value: &str, inspection: &mut FieldInspection) {
    let numbers = numbers(value);
    if numbers.len() < 2 {
        return;
    }

    if numbers.len() >= 3 && numbers[..3].iter().all(|n| *n < 1000) {
        inspection.flag(
            Confidence::Low,
            format!(
                "Size format appears incorrect: '{}' - welded beam should be format like 'WB1220×6.0' \
                 (depth × thickness, typically 2 numbers). This may indicate column misalignment.",
                value
            ),
        );
    } else if SPACED_X.is_match(value) {
        if numbers[0] < 1000 && numbers[1] < 100 {
            inspection.flag(
                Confidence::Low,
                format!(
                    "Size format appears incorrect: '{}' - welded beam should be 'WB[depth]×[thickness]' where \
                     depth is typically 600-2000mm and thickness is 4-20mm (e.g., 'WB1220×6.0')",
                    value
                ),
            );
        }
    } else if numbers[0] < 50 && numbers[1] > 1000 {
        inspection.flag(
            Confidence::Low,
            format!(
                "Size format may be incorrect: '{}' (dimensions may be reversed - please verify)",
                value
            ),
        );
    }
}

fn inspect_length(value: &str, inspection: &mut FieldInspection) {
    let lower = value.to_lowercase();
    if value.contains('/') && lower.contains("mm") {
        inspection.flag(
            Confidence::Low,
            format!(
                "Length appears to be OCR error: '{}' (likely should be a 4-digit number)",
                value
            ),
        );
    }

    if let Some(first) = NUMBER.find(value)
        && !LENGTH_DIGITS.contains(&first.as_str().len())
    {
        inspection.flag(
            Confidence::Medium,
            format!("Length number '{}' seems unusual - please verify", first.as_str()),
        );
    }

    if !lower.contains('m') && !lower.contains("var") {
        inspection.flag(Confidence::Medium, format!("Length missing units: '{}'", value));
    }
}

fn inspect_quantity(value: &str, inspection: &mut FieldInspection) {
    match value.parse::<i64>() {
        Ok(qty) if qty < 1 => inspection.flag(
            Confidence::Low,
            format!("Quantity '{}' is less than 1 - please verify", value),
        ),
        Ok(qty) if qty > HIGH_QUANTITY => inspection.flag(
            Confidence::Medium,
            format!("Quantity '{}' seems unusually high - please verify", value),
        ),
        Ok(_) => {}
        Err(_) => inspection.flag(
            Confidence::Low,
            format!("Quantity is not a valid number: '{}'", value),
        ),
    }
}

fn inspect_grade(value: &str, inspection: &mut FieldInspection) {
    let upper = value.to_uppercase();
    if HA350_MISREADS.contains(&upper.as_str()) {
        inspection.flag(
            Confidence::Low,
            format!(
                "Grade '{}' appears to be OCR error (likely OCR error for HA350) - please verify",
                value
            ),
        );
    } else if DECIMAL_NUMBER.is_match(value) {
        inspection.flag(
            Confidence::Low,
            format!(
                "Grade '{}' appears to be a number (likely misaligned from Size column) - please verify column \
                 alignment",
                value
            ),
        );
    } else if !GRADE_CHARS.is_match(&upper) {
        inspection.flag(
            Confidence::Medium,
            format!("Grade format seems unusual: '{}' - please verify", value),
        );
    }
}

fn inspect_comments(value: &str, inspection: &mut FieldInspection) {
    if value.contains("NZS 4680") && value.to_lowercase().contains("strap") {
        inspection.flag(
            Confidence::Medium,
            "Comment references NZS 4680 strap - verify this is correct for this member".to_string(),
        );
    }
}
