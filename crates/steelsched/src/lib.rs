//! steelsched - validation and OCR-error correction for structural steel schedules
//!
//! Vision models reading beam and column schedules off scanned drawings make predictable
//! mistakes: `25O UB 37 . 2` for `250UB37.2`, `350LO` for `350L0`, lengths without units and
//! quantities read from the neighbouring row. steelsched checks every extracted row against the
//! AS 4100 section catalog, repairs what can be repaired with an audit trail, and reports the
//! rest for human review.
//!
//! # Quick Start
//!
//! ```rust
//! use steelsched::{ExtractedRow, Field, ScheduleType, validate_schedule};
//!
//! let rows = vec![
//!     ExtractedRow::from_fields(
//!         ScheduleType::Beam,
//!         [(Field::Mark, "B1"), (Field::Size, "25O UB 37 . 2"), (Field::Qty, "2"), (Field::Length, "5400")],
//!     ),
//!     ExtractedRow::from_fields(
//!         ScheduleType::Beam,
//!         [(Field::Mark, ""), (Field::Size, "310UC158"), (Field::Qty, "2"), (Field::Length, "5400 mm")],
//!     ),
//! ];
//!
//! let report = validate_schedule(&rows, ScheduleType::Beam);
//! assert_eq!(report.valid_rows, 1);
//! assert_eq!(report.rows_with_errors, 1);
//! assert_eq!(report.corrected_entries[0].get(Field::Size), Some("250UB37.2"));
//! ```
//!
//! # Architecture
//!
//! - **Catalog** (`catalog`): section size patterns, grades, quantity range, correction rules
//! - **Validation** (`validation`): field, row and schedule validators
//! - **Review** (`review`): advisory OCR-suspect findings and sibling-based size corrections
//! - **Text** (`text`): confidence classification and response sanitizing
//! - **Extraction** (`extraction`): parsing model responses into typed rows
//! - **Core** (`core`): configuration loading and the parse-then-validate pipeline

#![deny(unsafe_code)]

pub mod catalog;
pub mod core;
pub mod error;
pub mod extraction;
pub mod review;
pub mod text;
pub mod types;
pub mod validation;

pub use error::{Result, SteelschedError};
pub use types::*;

pub use core::config::ValidationConfig;
pub use core::pipeline::{process_response, process_response_file};
pub use extraction::{ParsedSchedule, parse_schedule_response, parse_schedule_response_as};
pub use text::classify;
pub use validation::{
    FieldCheck, ScheduleValidator, attempt_size_correction, validate_field, validate_grade, validate_length,
    validate_quantity, validate_row, validate_row_with_config, validate_schedule, validate_size,
};
