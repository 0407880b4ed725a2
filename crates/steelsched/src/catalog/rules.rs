//! OCR confusion-correction rules.
//!
//! Each field has an ordered pipeline of substitutions. Callers apply the rules one at a time
//! and re-test the value against the catalog after every rule that changed it, so each rule can
//! be tested in isolation.

use crate::types::Field;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Upper bound on re-applying one rule to catch overlapping matches such as `2OO`.
const MAX_PASSES: usize = 8;

/// A labelled regex substitution, guarded by a predicate on the whole value.
#[derive(Debug)]
pub struct CorrectionRule {
    /// Audit label, e.g. `"O→0"`.
    pub label: &'static str,
    guard: fn(&str) -> bool,
    pattern: Regex,
    replacement: &'static str,
}

fn always(_: &str) -> bool {
    true
}

fn has_digit(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_digit())
}

impl CorrectionRule {
    fn new(label: &'static str, guard: fn(&str) -> bool, pattern: &str, replacement: &'static str) -> Self {
        Self {
            label,
            guard,
            pattern: Regex::new(pattern).expect("correction rule regex is valid and should compile"),
            replacement,
        }
    }

    /// Whether applying this rule would change `value`.
    pub fn applies(&self, value: &str) -> bool {
        (self.guard)(value) && self.pattern.is_match(value)
    }

    /// Apply the rule until the value stops changing.
    pub fn apply<'a>(&self, value: &'a str) -> Cow<'a, str> {
        if !(self.guard)(value) {
            return Cow::Borrowed(value);
        }

        let mut current = Cow::Borrowed(value);
        for _ in 0..MAX_PASSES {
            let replaced = match self.pattern.replace_all(&current, self.replacement) {
                Cow::Borrowed(_) => break,
                Cow::Owned(replaced) => replaced,
            };
            if replaced == *current {
                break;
            }
            current = Cow::Owned(replaced);
        }
        current
    }
}

static SIZE_RULES: Lazy<Vec<CorrectionRule>> = Lazy::new(|| {
    vec![
        CorrectionRule::new("removed spaces", always, r"\s+", ""),
        CorrectionRule::new("I→1", has_digit, r"I", "1"),
        CorrectionRule::new("O→0", always, r"(\d|WB)O", "${1}0"),
        CorrectionRule::new("S→5", always, r"(^|\d)S(\d|PFC|UC|UB)", "${1}5${2}"),
        CorrectionRule::new("x→×", has_digit, r"[xX]", "×"),
    ]
});

static GRADE_RULES: Lazy<Vec<CorrectionRule>> = Lazy::new(|| {
    vec![
        CorrectionRule::new("removed spaces", always, r"\s+", ""),
        CorrectionRule::new("LO→L0", always, r"LO", "L0"),
    ]
});

/// Ordered correction pipeline for `field`. Fields without rules are never auto-corrected.
pub fn correction_rules_for(field: Field) -> &'static [CorrectionRule] {
    match field {
        Field::Size => SIZE_RULES.as_slice(),
        Field::Grade => GRADE_RULES.as_slice(),
        _ => &[],
    }
}
