//! Model response parsing and the parse-then-validate pipeline.

use steelsched::{
    Field, ScheduleType, SteelschedError, ValidationConfig, parse_schedule_response, process_response,
    process_response_file,
};
use tempfile::TempDir;

const FENCED_BEAM_RESPONSE: &str = "Here is the schedule:\n```json\n[\n  {\"Mark\": \"B1\", \"Size\": \"25O UB 37 . 2\", \"Qty\": 2, \"Length\": 5400, \"Grade\": \"300\"},\n  {\"Mark\": \"B2\", \"Size\": \"WB1220Ã—6.0\", \"Qty\": \"1\", \"Length\": \"12000 mm\"}\n]\n```";

#[test]
fn test_parse_fenced_response() {
    let start = FENCED_BEAM_RESPONSE.find("```").unwrap();
    let parsed = parse_schedule_response(&FENCED_BEAM_RESPONSE[start..]).unwrap();

    assert_eq!(parsed.schedule_type, ScheduleType::Beam);
    assert_eq!(parsed.rows.len(), 2);
    assert_eq!(parsed.rows[0].get(Field::Qty), Some("2"));
    assert_eq!(parsed.rows[0].get(Field::Length), Some("5400"));
    assert_eq!(parsed.rows[1].get(Field::Size), Some("WB1220×6.0"));
    assert_eq!(parsed.rows[1].get(Field::Grade), Some("N/A"));
}

#[test]
fn test_prose_around_json_is_rejected() {
    let err = parse_schedule_response(FENCED_BEAM_RESPONSE).unwrap_err();
    assert!(matches!(err, SteelschedError::Parsing { .. }));
}

#[test]
fn test_process_response_end_to_end() {
    let response = r#"{"rows": [
        {"Mark": "NB-01", "Size": "25OUB37.2", "Qty": "1", "Length": "5400"},
        {"Mark": "NB-02", "Size": "250UB37.2", "Qty": "3", "Length": "5400 mm"},
        {"Mark": "NB-03", "Size": "250UB37.2", "Qty": "4", "Length": "5400 mm"},
        {"Mark": "", "Size": "250UB37.2", "Qty": "2", "Length": "5400 mm"}
    ]}"#;

    let report = process_response(response, None, &ValidationConfig::default()).unwrap();

    assert_eq!(report.total_rows, 4);
    assert_eq!(report.valid_rows, 3);
    assert_eq!(report.rows_with_errors, 1);
    assert_eq!(report.rows_with_corrections, 1);
    assert_eq!(report.corrected_entries[0].get(Field::Size), Some("250UB37.2"));
    assert!(
        report.row_validations[0]
            .warnings
            .iter()
            .any(|w| w.starts_with("Quantity is 1"))
    );
}

#[test]
fn test_missing_columns_are_reported_not_dropped() {
    let response = r#"[{"Mark": "B1", "Size": "250UB37.2"}]"#;

    let report = process_response(response, None, &ValidationConfig::default()).unwrap();

    let row = &report.row_validations[0];
    assert!(!row.is_valid);
    assert_eq!(row.errors, vec!["Length: Length is missing", "Qty: Quantity is missing"]);
    assert_eq!(row.corrected_row.get(Field::PaintSystem), Some("N/A"));
}

#[test]
fn test_column_response_detected() {
    let response = r#"[{"Mark": "C1", "SectionType": "UC", "Size": "310UC158", "Length": "3600 mm", "CapPlate": "CP1"}]"#;

    let report = process_response(response, None, &ValidationConfig::default()).unwrap();

    assert_eq!(report.schedule_type, ScheduleType::Column);
    assert_eq!(report.valid_rows, 1);
    assert_eq!(report.corrected_entries[0].get(Field::BasePlate), Some("N/A"));
}

#[test]
fn test_process_response_file_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("response.json");
    std::fs::write(&path, r#"[{"Mark": "B1", "Size": "3I0UC158", "Qty": 2, "Length": "5400 mm"}]"#).unwrap();

    let report = process_response_file(&path, Some(ScheduleType::Beam), &ValidationConfig::default()).unwrap();

    assert_eq!(report.corrected_entries[0].get(Field::Size), Some("310UC158"));
    assert_eq!(
        report.row_validations[0].corrections,
        vec!["Size: Auto-corrected: '3I0UC158' → '310UC158' (I→1)"]
    );
}
