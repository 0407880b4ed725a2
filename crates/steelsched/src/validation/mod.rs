//! Field, row and schedule validation.
//!
//! Validation never mutates its input. Every repair is applied to a copy of the row and
//! disclosed twice: as an entry in `corrections` and as a warning naming the old and new value.
//!
//! A row is invalid only when a mandatory field (`Mark`, `Size`, `Length`, and `Qty` on beam
//! schedules) cannot be resolved. Grade problems, text confidence and review findings are
//! advisory.

mod field;
mod row;
mod schedule;

pub use field::{
    Correction, FieldCheck, attempt_size_correction, validate_field, validate_grade, validate_length,
    validate_quantity, validate_size,
};
pub use row::{validate_row, validate_row_with_config};
pub use schedule::{ScheduleValidator, validate_schedule};
