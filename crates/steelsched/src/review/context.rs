//! Size corrections that need the rest of the schedule.
//!
//! A lone `250UB77.2` is ambiguous, but next to a `250UB37.2` on the same drawing it is
//! almost certainly a `7`/`3` misread. Only sizes whose sibling evidence points to a single
//! repair are rewritten.

use crate::catalog::is_placeholder;
use crate::types::{Confidence, ExtractedRow, Field};
use once_cell::sync::Lazy;
use regex::Regex;

static UB_SIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)UB(\d+)\.\d+").expect("UB size regex pattern is valid and should compile"));
static UB_MASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\d+)UB(\d)").expect("UB mass regex pattern is valid and should compile"));
static UC_SIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)UC(\d+)").expect("UC size regex pattern is valid and should compile"));
static UC_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\d+)UC").expect("UC prefix regex pattern is valid and should compile"));

const MISREAD_UC_SUFFIXES: &[&str] = &["118", "108"];
const SIBLING_UC_SUFFIXES: &[&str] = &["158", "137"];
const CORRECTED_UC_SUFFIX: &str = "158";

/// A size rewritten from sibling evidence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextCorrection {
    pub value: String,
    pub confidence: Confidence,
}

/// Rewrite `size` when sibling rows show which section it was misread from.
///
/// Returns `None` when nothing changes. Welded beams are never rewritten.
pub fn correct_with_context(size: &str, siblings: &[ExtractedRow]) -> Option<ContextCorrection> {
    if is_placeholder(size) || siblings.is_empty() {
        return None;
    }

    let sibling_sizes: Vec<&str> = siblings
        .iter()
        .filter_map(|row| row.get(Field::Size))
        .map(str::trim)
        .collect();

    let mut corrected = size.trim().to_string();
    let mut changed = false;

    if let Some(start) = misread_ub_mass(&corrected, &sibling_sizes) {
        corrected.replace_range(start..start + 1, "3");
        changed = true;
    }
    if let Some(range) = misread_uc_suffix(&corrected, &sibling_sizes) {
        corrected.replace_range(range, CORRECTED_UC_SUFFIX);
        changed = true;
    }

    if !changed {
        return None;
    }

    tracing::debug!(raw = size, corrected = %corrected, "Size corrected from sibling rows");
    Some(ContextCorrection {
        value: corrected,
        confidence: Confidence::Medium,
    })
}

/// Byte offset of a UB mass digit `7` that siblings of the same depth read as `3`.
fn misread_ub_mass(size: &str, sibling_sizes: &[&str]) -> Option<usize> {
    let caps = UB_SIZE.captures(size)?;
    let depth = &caps[1];
    let mass = caps.get(2)?;
    if mass.len() != 2 || !mass.as_str().starts_with('7') {
        return None;
    }

    sibling_sizes
        .iter()
        .any(|sibling| {
            UB_MASS
                .captures(sibling)
                .is_some_and(|sib| &sib[1] == depth && &sib[2] == "3")
        })
        .then_some(mass.start())
}

/// Byte range of a UC suffix that siblings of the same depth show as a heavier section.
fn misread_uc_suffix(size: &str, sibling_sizes: &[&str]) -> Option<std::ops::Range<usize>> {
    let caps = UC_SIZE.captures(size)?;
    let depth = &caps[1];
    let suffix = caps.get(2)?;
    if !MISREAD_UC_SUFFIXES.contains(&suffix.as_str()) {
        return None;
    }

    sibling_sizes
        .iter()
        .any(|sibling| {
            UC_PREFIX.captures(sibling).is_some_and(|sib| &sib[1] == depth)
                && SIBLING_UC_SUFFIXES.iter().any(|known| sibling.contains(known))
        })
        .then_some(suffix.range())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScheduleType;

    fn rows(sizes: &[&str]) -> Vec<ExtractedRow> {
        sizes
            .iter()
            .map(|size| ExtractedRow::from_fields(ScheduleType::Beam, [(Field::Size, *size)]))
            .collect()
    }

    #[test]
    fn test_ub_seven_corrected_from_sibling() {
        let siblings = rows(&["250UB75.2", "250UB37.2"]);
        let correction = correct_with_context("250UB75.2", &siblings).unwrap();
        assert_eq!(correction.value, "250UB35.2");
        assert_eq!(correction.confidence, Confidence::Medium);
    }

    #[test]
    fn test_ub_needs_same_depth() {
        let siblings = rows(&["310UB32.0"]);
        assert!(correct_with_context("250UB75.2", &siblings).is_none());
    }

    #[test]
    fn test_uc_suffix_corrected_from_sibling() {
        let siblings = rows(&["310UC158", "310UC118"]);
        let correction = correct_with_context("310UC118", &siblings).unwrap();
        assert_eq!(correction.value, "310UC158");

        let siblings = rows(&["310UC137"]);
        assert_eq!(correct_with_context("310UC108", &siblings).unwrap().value, "310UC158");
    }

    #[test]
    fn test_uc_without_evidence() {
        assert!(correct_with_context("310UC118", &rows(&["250UC89.5"])).is_none());
        assert!(correct_with_context("310UC118", &[]).is_none());
    }

    #[test]
    fn test_welded_beams_untouched() {
        assert!(correct_with_context("WB1220×6.0", &rows(&["WB1220×6.0"])).is_none());
        assert!(correct_with_context("N/A", &rows(&["250UB37.2"])).is_none());
    }
}
