use crate::catalog::{is_mandatory, is_placeholder};
use crate::core::config::ValidationConfig;
use crate::review::{self, ContextCorrection};
use crate::text::classify;
use crate::types::{Confidence, ExtractedRow, Field, RowValidationReport, ScheduleType};

use super::field::{FieldCheck, validate_grade, validate_length, validate_quantity, validate_size};

/// Fields the review inspector looks at, in report order.
const INSPECTED_FIELDS: &[Field] = &[Field::Size, Field::Length, Field::Qty, Field::Grade, Field::Comments];

/// Validate one row with the default configuration.
///
/// ```rust
/// use steelsched::{ExtractedRow, Field, ScheduleType, validate_row};
///
/// let row = ExtractedRow::from_fields(
///     ScheduleType::Beam,
///     [(Field::Mark, "B1"), (Field::Size, "25OUB37.2"), (Field::Qty, "2"), (Field::Length, "5400 mm")],
/// );
/// let report = validate_row(&row, 0, ScheduleType::Beam);
///
/// assert!(report.is_valid);
/// assert_eq!(report.corrected_row.get(Field::Size), Some("250UB37.2"));
/// assert_eq!(row.get(Field::Size), Some("25OUB37.2"));
/// ```
pub fn validate_row(row: &ExtractedRow, row_index: usize, schedule_type: ScheduleType) -> RowValidationReport {
    validate_row_with_config(row, row_index, schedule_type, &ValidationConfig::default())
}

/// Validate one row in isolation under `config`.
pub fn validate_row_with_config(
    row: &ExtractedRow,
    row_index: usize,
    schedule_type: ScheduleType,
    config: &ValidationConfig,
) -> RowValidationReport {
    validate_row_in_context(row, row_index, schedule_type, config, &[])
}

/// Validate one row; `siblings` are the rows of the same schedule, used for context corrections.
pub(crate) fn validate_row_in_context(
    row: &ExtractedRow,
    row_index: usize,
    schedule_type: ScheduleType,
    config: &ValidationConfig,
    siblings: &[ExtractedRow],
) -> RowValidationReport {
    let mut report = RowValidationReport::new(row_index, row);
    let mut downgrades: Vec<(Field, Confidence)> = Vec::new();

    if row.mark().is_none_or(is_placeholder) {
        report.push_error("Mark is missing");
    }

    let mut size = row.get(Field::Size).unwrap_or_default().to_string();
    if config.context_corrections
        && let Some(ContextCorrection { value, confidence }) = review::correct_with_context(&size, siblings)
    {
        report
            .corrections
            .push(format!("Size: Context-corrected: '{}' → '{}' (matched similar sizes)", size, value));
        report.warnings.push(format!("Size auto-corrected: {} → {}", size, value));
        report.corrected_row.set(Field::Size, value.clone());
        downgrades.push((Field::Size, confidence));
        size = value;
    }
    record(&mut report, &mut downgrades, schedule_type, Field::Size, &size, validate_size(&size));

    let grade = row.get(Field::Grade).unwrap_or_default();
    record(&mut report, &mut downgrades, schedule_type, Field::Grade, grade, validate_grade(grade));

    let length = row.get(Field::Length).unwrap_or_default();
    record(&mut report, &mut downgrades, schedule_type, Field::Length, length, validate_length(length));

    if schedule_type == ScheduleType::Beam {
        let qty = row.get(Field::Qty).unwrap_or_default();
        record(&mut report, &mut downgrades, schedule_type, Field::Qty, qty, validate_quantity(qty));
    }

    if config.annotate_confidence {
        for &field in row.schedule_type().fields() {
            if let Some(value) = row.get(field).filter(|value| !is_placeholder(value)) {
                report.field_confidence.insert(field, classify(value));
            }
        }
        for (field, confidence) in downgrades {
            report.downgrade_confidence(field, confidence);
        }
    }

    if config.review_flags {
        inspect(&mut report, schedule_type, config.annotate_confidence);
    }

    tracing::debug!(
        row_index,
        is_valid = report.is_valid,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        corrections = report.corrections.len(),
        "Row validated"
    );

    report
}

fn record(
    report: &mut RowValidationReport,
    downgrades: &mut Vec<(Field, Confidence)>,
    schedule_type: ScheduleType,
    field: Field,
    raw: &str,
    check: FieldCheck,
) {
    match check {
        FieldCheck::Valid { .. } => {}
        FieldCheck::Corrected {
            value,
            note,
            confidence,
        } => {
            report.corrections.push(format!("{}: {}", field, note));
            report
                .warnings
                .push(format!("{} auto-corrected: {} → {}", field, raw.trim(), value));
            report.corrected_row.set(field, value);
            downgrades.push((field, confidence));
        }
        FieldCheck::Invalid { message } if is_mandatory(field, schedule_type) => {
            report.push_error(format!("{}: {}", field, message))
        }
        FieldCheck::Invalid { message } => report.warnings.push(format!("{}: {}", field, message)),
    }
}

/// Attach review findings for the corrected values.
fn inspect(report: &mut RowValidationReport, schedule_type: ScheduleType, annotate: bool) {
    for &field in INSPECTED_FIELDS {
        if field == Field::Qty && schedule_type != ScheduleType::Beam {
            continue;
        }
        let Some(value) = report.corrected_row.get(field).filter(|value| !is_placeholder(value)) else {
            continue;
        };

        let inspection = review::inspect_field(field, value);
        if inspection.findings.is_empty() {
            continue;
        }
        report.review_flags.extend(inspection.findings);
        if annotate {
            report.downgrade_confidence(field, inspection.confidence);
        }
    }
}
