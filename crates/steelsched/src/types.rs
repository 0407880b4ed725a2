use crate::error::{Result, SteelschedError};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Kind of structural schedule a set of rows was extracted from.
///
/// Beam schedules carry a `Qty` column; column schedules carry section type and plate
/// details instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleType {
    Beam,
    Column,
}

const BEAM_FIELDS: &[Field] = &[
    Field::Mark,
    Field::Size,
    Field::Qty,
    Field::Length,
    Field::Grade,
    Field::PaintSystem,
    Field::Comments,
];

const COLUMN_FIELDS: &[Field] = &[
    Field::Mark,
    Field::SectionType,
    Field::Size,
    Field::Length,
    Field::Grade,
    Field::BasePlate,
    Field::CapPlate,
    Field::Finish,
    Field::Comments,
];

/// Keys whose presence in the first extracted row marks a column schedule.
const COLUMN_MARKER_KEYS: &[&str] = &["SectionType", "BasePlate", "CapPlate"];

impl ScheduleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleType::Beam => "beam",
            ScheduleType::Column => "column",
        }
    }

    /// Columns of this schedule, in display order.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            ScheduleType::Beam => BEAM_FIELDS,
            ScheduleType::Column => COLUMN_FIELDS,
        }
    }

    /// Guess the schedule type from the first extracted row.
    ///
    /// A row with any of `SectionType`, `BasePlate` or `CapPlate` is a column schedule;
    /// everything else is treated as a beam schedule.
    pub fn detect(first_row: &Map<String, Value>) -> Self {
        if COLUMN_MARKER_KEYS.iter().any(|key| first_row.contains_key(*key)) {
            ScheduleType::Column
        } else {
            ScheduleType::Beam
        }
    }
}

impl fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleType {
    type Err = SteelschedError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beam" => Ok(ScheduleType::Beam),
            "column" => Ok(ScheduleType::Column),
            other => Err(SteelschedError::validation(format!(
                "Unknown schedule type '{}': expected 'beam' or 'column'",
                other
            ))),
        }
    }
}

/// Text confidence level attached to extracted values.
///
/// `Medium` is never produced by the text classifier; it marks auto-corrected values and
/// advisory downgrades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    #[default]
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }

    fn rank(self) -> u8 {
        match self {
            Confidence::High => 0,
            Confidence::Medium => 1,
            Confidence::Low => 2,
        }
    }

    /// The less trustworthy of the two levels.
    pub fn worst(self, other: Confidence) -> Confidence {
        if other.rank() > self.rank() { other } else { self }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named schedule column.
///
/// Serialized with the column names used by the extraction prompts (`Mark`, `PaintSystem`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Mark,
    Size,
    Qty,
    Length,
    Grade,
    PaintSystem,
    Comments,
    SectionType,
    BasePlate,
    CapPlate,
    Finish,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::Mark,
        Field::Size,
        Field::Qty,
        Field::Length,
        Field::Grade,
        Field::PaintSystem,
        Field::Comments,
        Field::SectionType,
        Field::BasePlate,
        Field::CapPlate,
        Field::Finish,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Mark => "Mark",
            Field::Size => "Size",
            Field::Qty => "Qty",
            Field::Length => "Length",
            Field::Grade => "Grade",
            Field::PaintSystem => "PaintSystem",
            Field::Comments => "Comments",
            Field::SectionType => "SectionType",
            Field::BasePlate => "BasePlate",
            Field::CapPlate => "CapPlate",
            Field::Finish => "Finish",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts strings, numbers and booleans for a cell; `null` reads as absent.
fn cell<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

/// One line item of a beam schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeamRow {
    #[serde(rename = "Mark", default, deserialize_with = "cell", skip_serializing_if = "Option::is_none")]
    pub mark: Option<String>,
    #[serde(rename = "Size", default, deserialize_with = "cell", skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(rename = "Qty", default, deserialize_with = "cell", skip_serializing_if = "Option::is_none")]
    pub qty: Option<String>,
    #[serde(rename = "Length", default, deserialize_with = "cell", skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    #[serde(rename = "Grade", default, deserialize_with = "cell", skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(
        rename = "PaintSystem",
        default,
        deserialize_with = "cell",
        skip_serializing_if = "Option::is_none"
    )]
    pub paint_system: Option<String>,
    #[serde(rename = "Comments", default, deserialize_with = "cell", skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    /// Keys the schedule does not define; passed through untouched.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl BeamRow {
    fn slot(&self, field: Field) -> Option<&Option<String>> {
        match field {
            Field::Mark => Some(&self.mark),
            Field::Size => Some(&self.size),
            Field::Qty => Some(&self.qty),
            Field::Length => Some(&self.length),
            Field::Grade => Some(&self.grade),
            Field::PaintSystem => Some(&self.paint_system),
            Field::Comments => Some(&self.comments),
            _ => None,
        }
    }

    fn slot_mut(&mut self, field: Field) -> Option<&mut Option<String>> {
        match field {
            Field::Mark => Some(&mut self.mark),
            Field::Size => Some(&mut self.size),
            Field::Qty => Some(&mut self.qty),
            Field::Length => Some(&mut self.length),
            Field::Grade => Some(&mut self.grade),
            Field::PaintSystem => Some(&mut self.paint_system),
            Field::Comments => Some(&mut self.comments),
            _ => None,
        }
    }
}

/// One line item of a column schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnRow {
    #[serde(rename = "Mark", default, deserialize_with = "cell", skip_serializing_if = "Option::is_none")]
    pub mark: Option<String>,
    #[serde(
        rename = "SectionType",
        default,
        deserialize_with = "cell",
        skip_serializing_if = "Option::is_none"
    )]
    pub section_type: Option<String>,
    #[serde(rename = "Size", default, deserialize_with = "cell", skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(rename = "Length", default, deserialize_with = "cell", skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    #[serde(rename = "Grade", default, deserialize_with = "cell", skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(rename = "BasePlate", default, deserialize_with = "cell", skip_serializing_if = "Option::is_none")]
    pub base_plate: Option<String>,
    #[serde(rename = "CapPlate", default, deserialize_with = "cell", skip_serializing_if = "Option::is_none")]
    pub cap_plate: Option<String>,
    #[serde(rename = "Finish", default, deserialize_with = "cell", skip_serializing_if = "Option::is_none")]
    pub finish: Option<String>,
    #[serde(rename = "Comments", default, deserialize_with = "cell", skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    /// Keys the schedule does not define; passed through untouched.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ColumnRow {
    fn slot(&self, field: Field) -> Option<&Option<String>> {
        match field {
            Field::Mark => Some(&self.mark),
            Field::SectionType => Some(&self.section_type),
            Field::Size => Some(&self.size),
            Field::Length => Some(&self.length),
            Field::Grade => Some(&self.grade),
            Field::BasePlate => Some(&self.base_plate),
            Field::CapPlate => Some(&self.cap_plate),
            Field::Finish => Some(&self.finish),
            Field::Comments => Some(&self.comments),
            _ => None,
        }
    }

    fn slot_mut(&mut self, field: Field) -> Option<&mut Option<String>> {
        match field {
            Field::Mark => Some(&mut self.mark),
            Field::SectionType => Some(&mut self.section_type),
            Field::Size => Some(&mut self.size),
            Field::Length => Some(&mut self.length),
            Field::Grade => Some(&mut self.grade),
            Field::BasePlate => Some(&mut self.base_plate),
            Field::CapPlate => Some(&mut self.cap_plate),
            Field::Finish => Some(&mut self.finish),
            Field::Comments => Some(&mut self.comments),
            _ => None,
        }
    }
}

/// One extracted schedule line item (one beam or column mark).
///
/// Serializes as a flat object keyed by column name, the same shape the extraction step
/// produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExtractedRow {
    Beam(BeamRow),
    Column(ColumnRow),
}

impl ExtractedRow {
    /// Empty row for the given schedule.
    pub fn empty(schedule_type: ScheduleType) -> Self {
        match schedule_type {
            ScheduleType::Beam => ExtractedRow::Beam(BeamRow::default()),
            ScheduleType::Column => ExtractedRow::Column(ColumnRow::default()),
        }
    }

    /// Build a row from `(field, value)` pairs. Fields the schedule does not define are dropped.
    ///
    /// ```rust
    /// use steelsched::{ExtractedRow, Field, ScheduleType};
    ///
    /// let row = ExtractedRow::from_fields(
    ///     ScheduleType::Beam,
    ///     [(Field::Mark, "B1"), (Field::Size, "250UB37.2"), (Field::Qty, "2")],
    /// );
    /// assert_eq!(row.get(Field::Size), Some("250UB37.2"));
    /// ```
    pub fn from_fields<I, S>(schedule_type: ScheduleType, fields: I) -> Self
    where
        I: IntoIterator<Item = (Field, S)>,
        S: Into<String>,
    {
        let mut row = Self::empty(schedule_type);
        for (field, value) in fields {
            row.set(field, value);
        }
        row
    }

    /// Deserialize one extracted JSON object as a row of `schedule_type`.
    pub fn from_json(object: Map<String, Value>, schedule_type: ScheduleType) -> Result<Self> {
        let value = Value::Object(object);
        Ok(match schedule_type {
            ScheduleType::Beam => ExtractedRow::Beam(serde_json::from_value(value)?),
            ScheduleType::Column => ExtractedRow::Column(serde_json::from_value(value)?),
        })
    }

    pub fn schedule_type(&self) -> ScheduleType {
        match self {
            ExtractedRow::Beam(_) => ScheduleType::Beam,
            ExtractedRow::Column(_) => ScheduleType::Column,
        }
    }

    fn slot(&self, field: Field) -> Option<&Option<String>> {
        match self {
            ExtractedRow::Beam(row) => row.slot(field),
            ExtractedRow::Column(row) => row.slot(field),
        }
    }

    fn slot_mut(&mut self, field: Field) -> Option<&mut Option<String>> {
        match self {
            ExtractedRow::Beam(row) => row.slot_mut(field),
            ExtractedRow::Column(row) => row.slot_mut(field),
        }
    }

    /// Raw value of `field`, or `None` when absent or not part of this schedule.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).and_then(|value| value.as_deref())
    }

    /// Overwrite `field`. Writes to fields this schedule does not define are ignored.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        if let Some(slot) = self.slot_mut(field) {
            *slot = Some(value.into());
        }
    }

    pub fn mark(&self) -> Option<&str> {
        self.get(Field::Mark)
    }

    /// Set every schedule column that is absent to `placeholder`.
    pub fn fill_missing(&mut self, placeholder: &str) {
        for field in self.schedule_type().fields() {
            if let Some(slot) = self.slot_mut(*field)
                && slot.is_none()
            {
                *slot = Some(placeholder.to_string());
            }
        }
    }

    /// Extra keys the schedule does not define.
    pub fn extra(&self) -> &IndexMap<String, Value> {
        match self {
            ExtractedRow::Beam(row) => &row.extra,
            ExtractedRow::Column(row) => &row.extra,
        }
    }
}

/// Outcome of validating a single extracted row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowValidationReport {
    pub row_index: usize,
    /// False iff a mandatory field (`Mark`, `Size`, `Length`, and `Qty` for beams) could not be
    /// resolved to a valid value.
    pub is_valid: bool,
    /// Blocking problems.
    pub errors: Vec<String>,
    /// Advisory problems and disclosed corrections.
    pub warnings: Vec<String>,
    /// Every value changed from the raw extraction, prefixed with its field name.
    pub corrections: Vec<String>,
    pub corrected_row: ExtractedRow,
    /// Text confidence per present field.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub field_confidence: IndexMap<Field, Confidence>,
    /// Findings for human review that never affect validity.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub review_flags: Vec<String>,
}

impl RowValidationReport {
    pub fn new(row_index: usize, row: &ExtractedRow) -> Self {
        Self {
            row_index,
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            corrections: Vec::new(),
            corrected_row: row.clone(),
            field_confidence: IndexMap::new(),
            review_flags: Vec::new(),
        }
    }

    /// Record a blocking error and invalidate the row.
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.is_valid = false;
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn has_corrections(&self) -> bool {
        !self.corrections.is_empty()
    }

    /// Lower the recorded confidence of `field`, never raising it.
    pub fn downgrade_confidence(&mut self, field: Field, confidence: Confidence) {
        let entry = self.field_confidence.entry(field).or_default();
        *entry = entry.worst(confidence);
    }
}

/// Outcome of validating a whole extracted schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleValidationReport {
    pub schedule_type: ScheduleType,
    pub total_rows: usize,
    pub valid_rows: usize,
    pub rows_with_errors: usize,
    pub rows_with_warnings: usize,
    pub rows_with_corrections: usize,
    pub row_validations: Vec<RowValidationReport>,
    pub corrected_entries: Vec<ExtractedRow>,
}

impl ScheduleValidationReport {
    pub fn empty(schedule_type: ScheduleType) -> Self {
        Self {
            schedule_type,
            total_rows: 0,
            valid_rows: 0,
            rows_with_errors: 0,
            rows_with_warnings: 0,
            rows_with_corrections: 0,
            row_validations: Vec::new(),
            corrected_entries: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.rows_with_errors > 0
    }
}
