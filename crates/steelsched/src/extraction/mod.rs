//! Parsing of model responses into typed schedule rows.
//!
//! Vision models are asked for a JSON array of row objects. In practice the array arrives
//! fenced in Markdown, wrapped in `{"rows": [...]}`, or as a single object, with mojibake in
//! the strings. Everything is normalized here so validation sees clean [`ExtractedRow`]s.

use crate::error::{Result, SteelschedError};
use crate::text::{sanitize_json_response, sanitize_text};
use crate::types::{ExtractedRow, ScheduleType};
use serde::Serialize;
use serde_json::{Map, Value};

/// Value written into schedule columns the model left out.
pub const MISSING_VALUE: &str = "N/A";

/// Rows recovered from one model response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedSchedule {
    pub schedule_type: ScheduleType,
    /// `document_type` from a `{"rows": [...]}` envelope, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    pub rows: Vec<ExtractedRow>,
}

/// Parse a model response, detecting the schedule type from the first row.
///
/// ```rust
/// use steelsched::{Field, ScheduleType};
/// use steelsched::extraction::parse_schedule_response;
///
/// let response = "```json\n[{\"Mark\": \"C1\", \"Size\": \"310UC158\", \"BasePlate\": \"BP1\"}]\n```";
/// let parsed = parse_schedule_response(response).unwrap();
///
/// assert_eq!(parsed.schedule_type, ScheduleType::Column);
/// assert_eq!(parsed.rows[0].get(Field::CapPlate), Some("N/A"));
/// ```
pub fn parse_schedule_response(response: &str) -> Result<ParsedSchedule> {
    parse(response, None)
}

/// Parse a model response as rows of `schedule_type`.
pub fn parse_schedule_response_as(response: &str, schedule_type: ScheduleType) -> Result<ParsedSchedule> {
    parse(response, Some(schedule_type))
}

fn parse(response: &str, schedule_type: Option<ScheduleType>) -> Result<ParsedSchedule> {
    let cleaned = sanitize_json_response(response);
    if cleaned.is_empty() {
        return Err(SteelschedError::parsing("Model response is empty"));
    }

    let value: Value = serde_json::from_str(&cleaned)
        .map_err(|e| SteelschedError::parsing_with_source("Model response is not valid JSON", e))?;

    let (entries, document_type) = match value {
        Value::Array(entries) => (entries, None),
        Value::Object(mut object) => match object.remove("rows") {
            Some(Value::Array(rows)) => {
                let document_type = object
                    .get("document_type")
                    .and_then(Value::as_str)
                    .map(sanitize_text);
                (rows, document_type)
            }
            Some(other) => {
                object.insert("rows".to_string(), other);
                (vec![Value::Object(object)], None)
            }
            None => (vec![Value::Object(object)], None),
        },
        other => {
            return Err(SteelschedError::parsing(format!(
                "Model response must be a JSON array or object, got {}",
                json_kind(&other)
            )));
        }
    };

    let objects: Vec<Map<String, Value>> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match entry {
            Value::Object(mut object) => {
                object.values_mut().for_each(sanitize_value);
                Some(object)
            }
            other => {
                tracing::warn!(index, kind = json_kind(&other), "Skipping non-object schedule entry");
                None
            }
        })
        .collect();

    let schedule_type = schedule_type
        .or_else(|| objects.first().map(ScheduleType::detect))
        .unwrap_or(ScheduleType::Beam);

    let rows = objects
        .into_iter()
        .map(|object| {
            let mut row = ExtractedRow::from_json(object, schedule_type)?;
            row.fill_missing(MISSING_VALUE);
            Ok(row)
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(schedule_type = %schedule_type, rows = rows.len(), "Parsed model response");

    Ok(ParsedSchedule {
        schedule_type,
        document_type,
        rows,
    })
}

fn sanitize_value(value: &mut Value) {
    match value {
        Value::String(text) => *text = sanitize_text(text),
        Value::Array(items) => items.iter_mut().for_each(sanitize_value),
        Value::Object(object) => object.values_mut().for_each(sanitize_value),
        _ => {}
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
