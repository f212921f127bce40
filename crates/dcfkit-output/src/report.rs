//! Console report for a finished collection run.

use crate::table::LabeledTable;
use std::fmt;

/// Rows shown in the preview unless configured otherwise.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Placeholder for an absent cell in the preview.
const ABSENT: &str = "-";

/// Completion message plus a preview of the first rows of the output table.
#[derive(Debug, Clone)]
pub struct Report {
    /// Symbol the data was collected for.
    pub symbol: String,

    /// File the table was written to.
    pub output_file: String,

    /// Total rows written.
    pub total_rows: usize,

    /// Leading rows of the table.
    pub preview: LabeledTable,
}

impl Report {
    /// Create a new report, keeping the first `preview_rows` rows of `table`.
    pub fn new(
        symbol: String,
        output_file: String,
        table: &LabeledTable,
        preview_rows: usize,
    ) -> Self {
        Self {
            symbol,
            output_file,
            total_rows: table.height(),
            preview: table.head(preview_rows),
        }
    }

    /// Render the preview as a fixed-width text table.
    pub fn to_ascii_table(&self) -> String {
        render_table(&self.preview)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Data collection complete for {}. Results saved to {}",
            self.symbol, self.output_file
        )?;
        writeln!(
            f,
            "\nFirst {} of {} rows of the data:",
            self.preview.height(),
            self.total_rows
        )?;
        write!(f, "{}", self.to_ascii_table())
    }
}

fn render_table(table: &LabeledTable) -> String {
    let cells: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| {
            row.cells
                .iter()
                .map(|cell| cell.map_or_else(|| ABSENT.to_string(), |v| v.to_string()))
                .collect()
        })
        .collect();

    let label_width = table
        .rows()
        .iter()
        .map(|r| r.label.len())
        .max()
        .unwrap_or(0);
    let widths: Vec<usize> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            cells
                .iter()
                .map(|row| row[i].len())
                .chain(std::iter::once(name.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();
    let total_width = label_width + widths.iter().map(|w| w + 2).sum::<usize>();

    let mut output = String::new();
    output.push_str(&format!("{:<label_width$}", ""));
    for (name, &width) in table.columns().iter().zip(&widths) {
        output.push_str(&format!("  {name:>width$}"));
    }
    output.push('\n');
    output.push_str(&"-".repeat(total_width));
    output.push('\n');

    for (row, row_cells) in table.rows().iter().zip(&cells) {
        output.push_str(&format!("{:<label_width$}", row.label));
        for (cell, &width) in row_cells.iter().zip(&widths) {
            output.push_str(&format!("  {cell:>width$}"));
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableRecord;

    fn table(rows: usize) -> LabeledTable {
        LabeledTable::from_records(
            (0..rows)
                .map(|i| {
                    TableRecord::new(
                        format!("{}-12-31", 2023 - i),
                        vec![
                            ("Revenue".to_string(), Some(1000.0 + i as f64)),
                            ("EBIT".to_string(), None),
                        ],
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_preview_keeps_leading_rows() {
        let report = Report::new(
            "REPYY".to_string(),
            "repsol_financials.csv".to_string(),
            &table(7),
            3,
        );

        assert_eq!(report.symbol, "REPYY");
        assert_eq!(report.total_rows, 7);
        assert_eq!(report.preview.height(), 3);
        assert_eq!(report.preview.labels()[0], "2023-12-31");
    }

    #[test]
    fn test_default_preview_rows() {
        let report = Report::new(
            "REPYY".to_string(),
            "out.csv".to_string(),
            &table(8),
            DEFAULT_PREVIEW_ROWS,
        );
        assert_eq!(report.preview.height(), DEFAULT_PREVIEW_ROWS);
        assert!(report.to_string().contains("First 5 of 8 rows"));
    }

    #[test]
    fn test_display_names_file_and_rows() {
        let report = Report::new("REPYY".to_string(), "out.csv".to_string(), &table(2), 5);
        let text = report.to_string();

        assert!(text.contains("Results saved to out.csv"));
        assert!(text.contains("2023-12-31"));
        assert!(text.contains("2022-12-31"));
        assert!(text.contains("Revenue"));
    }

    #[test]
    fn test_ascii_table_marks_absent_cells() {
        let report = Report::new("REPYY".to_string(), "out.csv".to_string(), &table(1), 5);
        let ascii = report.to_ascii_table();
        let lines: Vec<&str> = ascii.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("2023-12-31"));
        assert!(lines[2].ends_with(ABSENT));
        assert!(lines[2].contains("1000"));
    }
}
