//! End-to-end processing of a model response: parse, then validate.

use crate::core::config::ValidationConfig;
use crate::extraction::{parse_schedule_response, parse_schedule_response_as};
use crate::types::{ScheduleType, ScheduleValidationReport};
use crate::validation::ScheduleValidator;
use crate::{Result, SteelschedError};
use std::path::Path;

/// Parse a model response and validate its rows.
///
/// `schedule_type` overrides detection from the first row.
///
/// # Errors
///
/// Returns `SteelschedError::Parsing` when the response is not usable JSON. Problems with
/// individual rows are reported in the returned report, never as errors.
///
/// # Example
///
/// ```rust
/// use steelsched::ValidationConfig;
/// use steelsched::core::pipeline::process_response;
///
/// let response = r#"[{"Mark": "B1", "Size": "25OUB37.2", "Qty": "2", "Length": "5400"}]"#;
/// let report = process_response(response, None, &ValidationConfig::default()).unwrap();
///
/// assert_eq!(report.valid_rows, 1);
/// assert_eq!(report.rows_with_corrections, 1);
/// ```
pub fn process_response(
    response: &str,
    schedule_type: Option<ScheduleType>,
    config: &ValidationConfig,
) -> Result<ScheduleValidationReport> {
    let parsed = match schedule_type {
        Some(schedule_type) => parse_schedule_response_as(response, schedule_type)?,
        None => parse_schedule_response(response)?,
    };

    Ok(ScheduleValidator::new(config.clone()).validate(&parsed.rows, parsed.schedule_type))
}

/// Read a saved model response from `path` and process it.
///
/// # Errors
///
/// Returns `SteelschedError::Io` for I/O errors (these always bubble up), otherwise as
/// [`process_response`].
pub fn process_response_file(
    path: impl AsRef<Path>,
    schedule_type: Option<ScheduleType>,
    config: &ValidationConfig,
) -> Result<ScheduleValidationReport> {
    let path = path.as_ref();
    let response = std::fs::read_to_string(path).map_err(SteelschedError::Io)?;
    tracing::debug!(path = %path.display(), bytes = response.len(), "Read model response");

    process_response(&response, schedule_type, config)
}
