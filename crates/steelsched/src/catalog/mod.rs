//! Canonical format definitions for schedule columns.
//!
//! The catalog is pure data: AS 4100 section size patterns, the accepted steel grades,
//! the quantity range and the OCR correction pipelines for each field. Everything is compiled
//! once on first use and is read-only afterwards, so lookups are safe from any thread.

mod rules;

pub use rules::{CorrectionRule, correction_rules_for};

use crate::types::{Field, ScheduleType};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::RangeInclusive;

/// Values the extraction step emits for "nothing here".
pub const PLACEHOLDERS: &[&str] = &["", "N/A", "-"];

/// Canonical spelling of the unmarked grade.
pub const NOT_MARKED: &str = "Not marked";

const KNOWN_GRADES: &[&str] = &[
    "250", "300", "300PLUS", "350", "350L0", "400", "450", "HA350", "C300", "G300", NOT_MARKED,
];

const QUANTITY_RANGE: RangeInclusive<u32> = 1..=999;

/// One accepted section size format.
#[derive(Debug)]
pub struct SizePattern {
    /// Section family, e.g. `"UB section"`.
    pub label: &'static str,
    regex: Regex,
}

impl SizePattern {
    fn new(label: &'static str, pattern: &str) -> Self {
        Self {
            label,
            regex: Regex::new(pattern).expect("size pattern is valid and should compile"),
        }
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

static SIZE_PATTERNS: Lazy<Vec<SizePattern>> = Lazy::new(|| {
    vec![
        SizePattern::new("UC section", r"(?i)^\d{2,3}UC\d{2,3}\.?\d*$"),
        SizePattern::new("UB section", r"(?i)^\d{2,3}UB\d{2,3}\.?\d*$"),
        SizePattern::new("Welded beam", r"(?i)^WB\d{3,4}[×x]\d{1,2}\.?\d*$"),
        SizePattern::new("PFC section", r"(?i)^\d{2,3}PFC$"),
        SizePattern::new("SHS section", r"(?i)^\d{2,3}[×x]\d{2,3}[×x]\d{1,2}\.?\d*\s*SHS$"),
        SizePattern::new("RHS section", r"(?i)^\d{2,3}[×x]\d{2,3}[×x]\d{1,2}\.?\d*\s*RHS$"),
    ]
});

/// Static description of one schedule column.
#[derive(Debug)]
pub struct FieldSpec {
    pub field: Field,
    /// Accepted formats, tried in order.
    pub patterns: &'static [SizePattern],
    /// Accepted literal values (upper-cased comparison, except [`NOT_MARKED`]).
    pub known_values: &'static [&'static str],
    pub range: Option<RangeInclusive<u32>>,
}

static FIELD_SPECS: Lazy<Vec<FieldSpec>> = Lazy::new(|| {
    Field::ALL
        .iter()
        .map(|&field| FieldSpec {
            field,
            patterns: match field {
                Field::Size => SIZE_PATTERNS.as_slice(),
                _ => &[],
            },
            known_values: match field {
                Field::Grade => KNOWN_GRADES,
                _ => &[],
            },
            range: match field {
                Field::Qty => Some(QUANTITY_RANGE),
                _ => None,
            },
        })
        .collect()
});

/// Spec for `field`.
pub fn field_spec(field: Field) -> &'static FieldSpec {
    &FIELD_SPECS[field as usize]
}

/// Ordered size patterns for `field` (empty for everything except `Size`).
pub fn patterns_for(field: Field) -> &'static [SizePattern] {
    field_spec(field).patterns
}

/// Accepted literal values for `field` (empty for everything except `Grade`).
pub fn known_values_for(field: Field) -> &'static [&'static str] {
    field_spec(field).known_values
}

pub fn quantity_range() -> RangeInclusive<u32> {
    QUANTITY_RANGE
}

/// First size pattern matching `value`, if any.
pub fn match_size(value: &str) -> Option<&'static SizePattern> {
    SIZE_PATTERNS.iter().find(|pattern| pattern.is_match(value))
}

pub fn is_known_grade(value: &str) -> bool {
    KNOWN_GRADES.contains(&value)
}

pub fn is_placeholder(value: &str) -> bool {
    PLACEHOLDERS.contains(&value.trim())
}

/// Whether a failed `field` invalidates a row of `schedule_type`.
pub fn is_mandatory(field: Field, schedule_type: ScheduleType) -> bool {
    match field {
        Field::Mark | Field::Size | Field::Length => true,
        Field::Qty => schedule_type == ScheduleType::Beam,
        _ => false,
    }
}
