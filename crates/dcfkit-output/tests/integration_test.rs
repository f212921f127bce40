//! Integration tests for the output table, exporters and console report

use dcfkit_output::{ExportFormat, Exporter, LabeledTable, Report, TableRecord};

fn table() -> LabeledTable {
    LabeledTable::with_columns(
        vec!["Revenue".to_string(), "CapEx".to_string(), "Market Cap".to_string()],
        vec![
            TableRecord::new(
                "2023-12-31".to_string(),
                vec![
                    ("Revenue".to_string(), Some(1000.0)),
                    ("CapEx".to_string(), Some(800.0)),
                ],
            ),
            TableRecord::new(
                "2022-12-31".to_string(),
                vec![
                    ("Revenue".to_string(), Some(900.5)),
                    ("CapEx".to_string(), None),
                ],
            ),
            TableRecord::new(
                "Latest Market Data".to_string(),
                vec![("Market Cap".to_string(), Some(5000.0))],
            ),
        ],
    )
}

#[test]
fn test_csv_file_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("financials.csv");
    table().export_to_file(&path, ExportFormat::Csv).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], ",Revenue,CapEx,Market Cap");
    assert_eq!(lines[1], "2023-12-31,1000,800,");
    assert_eq!(lines[2], "2022-12-31,900.5,,");
    assert_eq!(lines[3], "Latest Market Data,,,5000");
}

#[test]
fn test_json_export_parses_back() {
    let json = table().export_to_string(ExportFormat::PrettyJson).unwrap();
    let parsed: LabeledTable = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, table());
}

#[test]
fn test_report_preview_truncates() {
    let report = Report::new(
        "REPYY".to_string(),
        "repsol_financials.csv".to_string(),
        &table(),
        2,
    );

    let text = report.to_string();
    assert!(text.starts_with(
        "Data collection complete for REPYY. Results saved to repsol_financials.csv"
    ));
    assert!(text.contains("First 2 of 3 rows of the data:"));
    assert!(!text.contains("Latest Market Data"));
}

#[test]
fn test_report_preview_larger_than_table() {
    let report = Report::new("REPYY".to_string(), "out.csv".to_string(), &table(), 10);
    assert_eq!(report.preview.height(), 3);
    assert!(report.to_ascii_table().contains("Latest Market Data"));
}
