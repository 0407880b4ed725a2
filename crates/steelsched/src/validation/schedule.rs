use crate::catalog::is_placeholder;
use crate::core::config::ValidationConfig;
use crate::types::{ExtractedRow, Field, RowValidationReport, ScheduleType, ScheduleValidationReport};

use super::row::validate_row_in_context;

/// Validates whole schedules under one configuration.
///
/// ```rust
/// use steelsched::{ExtractedRow, Field, ScheduleType, ScheduleValidator, ValidationConfig};
///
/// let rows = vec![ExtractedRow::from_fields(
///     ScheduleType::Beam,
///     [(Field::Mark, "B1"), (Field::Size, "250UB37.2"), (Field::Qty, "2"), (Field::Length, "5400 mm")],
/// )];
/// let report = ScheduleValidator::new(ValidationConfig::default()).validate(&rows, ScheduleType::Beam);
///
/// assert_eq!(report.total_rows, 1);
/// assert_eq!(report.valid_rows, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleValidator {
    config: ValidationConfig,
}

impl ScheduleValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate every row, run the cross-row quantity check and tally the results.
    ///
    /// The input rows are never modified; repaired rows are returned in
    /// [`ScheduleValidationReport::corrected_entries`].
    pub fn validate(&self, rows: &[ExtractedRow], schedule_type: ScheduleType) -> ScheduleValidationReport {
        let mut report = ScheduleValidationReport::empty(schedule_type);
        if rows.is_empty() {
            return report;
        }

        let mut row_validations: Vec<RowValidationReport> = rows
            .iter()
            .enumerate()
            .map(|(index, row)| validate_row_in_context(row, index, schedule_type, &self.config, rows))
            .collect();

        if schedule_type == ScheduleType::Beam && self.config.cross_row_checks {
            check_quantity_alignment(&mut row_validations, self.config.min_higher_qty_siblings);
        }

        report.total_rows = row_validations.len();
        for row in &row_validations {
            if row.is_valid {
                report.valid_rows += 1;
            } else {
                report.rows_with_errors += 1;
            }
            if row.has_warnings() {
                report.rows_with_warnings += 1;
            }
            if row.has_corrections() {
                report.rows_with_corrections += 1;
            }
        }
        report.corrected_entries = row_validations.iter().map(|row| row.corrected_row.clone()).collect();
        report.row_validations = row_validations;

        tracing::info!(
            schedule_type = %schedule_type,
            total = report.total_rows,
            valid = report.valid_rows,
            errors = report.rows_with_errors,
            warnings = report.rows_with_warnings,
            corrected = report.rows_with_corrections,
            "Schedule validated"
        );

        report
    }
}

/// Validate a schedule with the default configuration.
pub fn validate_schedule(rows: &[ExtractedRow], schedule_type: ScheduleType) -> ScheduleValidationReport {
    ScheduleValidator::default().validate(rows, schedule_type)
}

/// Mark prefix shared by a family of members: `"NB-01"` and `"NB-02"` both give `"NB-"`.
fn mark_family(mark: &str) -> String {
    let stem = mark.split('-').next().unwrap_or(mark);
    format!("{}-", stem)
}

fn parse_quantity(value: Option<&str>) -> Option<u32> {
    value.and_then(|qty| qty.trim().parse().ok())
}

/// Flag rows with quantity 1 whose mark family has members with higher quantities: a sign that
/// the quantity column was read from the wrong row.
///
/// Rows that are otherwise valid get a warning once `min_higher` siblings disagree; rows that
/// already have errors get the message as an error with any disagreeing sibling.
fn check_quantity_alignment(reports: &mut [RowValidationReport], min_higher: usize) {
    let rows: Vec<(Option<String>, Option<u32>)> = reports
        .iter()
        .map(|report| {
            let mark = report
                .corrected_row
                .mark()
                .map(str::trim)
                .filter(|mark| !is_placeholder(mark))
                .map(str::to_string);
            (mark, parse_quantity(report.corrected_row.get(Field::Qty)))
        })
        .collect();

    for (index, report) in reports.iter_mut().enumerate() {
        let (Some(mark), Some(1)) = (&rows[index].0, rows[index].1) else {
            continue;
        };
        let family = mark_family(mark);

        let higher: Vec<(&str, u32)> = rows
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != index)
            .filter_map(|(_, (other_mark, qty))| {
                let other_mark = other_mark.as_deref()?;
                let qty = (*qty)?;
                (other_mark.starts_with(&family) && qty > 1).then_some((other_mark, qty))
            })
            .collect();
        let Some(&(example, example_qty)) = higher.first() else {
            continue;
        };

        let message = if higher.len() == 1 {
            format!(
                "Quantity is 1, but similar entries (e.g., {}) have quantity {} - please verify column alignment",
                example, example_qty
            )
        } else {
            format!(
                "Quantity is 1, but {} similar entries have quantity > 1 (e.g., {}) - please verify column alignment",
                higher.len(),
                example
            )
        };

        if !report.is_valid {
            report.push_error(message);
        } else if higher.len() >= min_higher {
            report.warnings.push(message);
        }
    }
}
