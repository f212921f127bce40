//! Row-labeled numeric table.
//!
//! Rows are identified by a text label (an ISO period date or a fixed label
//! such as `Latest Market Data`) and carry one optional value per column. A
//! `None` cell means the value is absent; it is never stored as zero.

use serde::{Deserialize, Serialize};

/// A labeled row with one named value per field, before it is placed in a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRecord {
    /// Row label.
    pub label: String,

    /// Field name and value pairs, in the row's own field order.
    pub fields: Vec<(String, Option<f64>)>,
}

impl TableRecord {
    /// Create a record.
    pub const fn new(label: String, fields: Vec<(String, Option<f64>)>) -> Self {
        Self { label, fields }
    }
}

/// One row of a [`LabeledTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledRow {
    /// Row label.
    pub label: String,

    /// One cell per table column.
    pub cells: Vec<Option<f64>>,
}

/// Ordered rows sharing one ordered set of columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabeledTable {
    columns: Vec<String>,
    rows: Vec<LabeledRow>,
}

impl LabeledTable {
    /// Concatenate records into one table.
    ///
    /// Row order is preserved. Columns are the union of every record's fields
    /// in first-seen order; a field a record does not carry is `None` in
    /// that row.
    pub fn from_records(records: Vec<TableRecord>) -> Self {
        Self::with_columns(Vec::new(), records)
    }

    /// Like [`from_records`](Self::from_records), but starting from a fixed
    /// column set. Columns no record carries still appear, empty in every row.
    pub fn with_columns(mut columns: Vec<String>, records: Vec<TableRecord>) -> Self {
        for record in &records {
            for (name, _) in &record.fields {
                if !columns.contains(name) {
                    columns.push(name.clone());
                }
            }
        }

        let rows = records
            .into_iter()
            .map(|record| {
                let cells = columns
                    .iter()
                    .map(|column| {
                        record
                            .fields
                            .iter()
                            .find(|(name, _)| name == column)
                            .and_then(|(_, value)| *value)
                    })
                    .collect();
                LabeledRow {
                    label: record.label,
                    cells,
                }
            })
            .collect();

        Self { columns, rows }
    }

    /// Column names, excluding the label column.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in order.
    pub fn rows(&self) -> &[LabeledRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of value columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Row labels in order.
    pub fn labels(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.label.as_str()).collect()
    }

    /// First row with this label.
    pub fn row(&self, label: &str) -> Option<&LabeledRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// Cell at (`label`, `column`); `None` if absent or either key is unknown.
    pub fn value(&self, label: &str, column: &str) -> Option<f64> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.row(label)?.cells[index]
    }

    /// The first `n` rows, with all columns.
    pub fn head(&self, n: usize) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}
