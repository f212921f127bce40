//! Period rows plus the summary row, as one output table.

use crate::metrics::{DcfMetric, NET_WORKING_CAPITAL_COLUMN, PeriodMetrics};
use crate::snapshot::{
    BETA_COLUMN, CASH_COLUMN, MARKET_CAP_COLUMN, SHARES_OUTSTANDING_COLUMN, SummaryRow,
    TOTAL_DEBT_COLUMN,
};
use dcfkit_output::{LabeledTable, TableRecord};

/// Every output column, in order.
pub fn output_columns() -> Vec<String> {
    DcfMetric::ALL
        .iter()
        .map(|m| m.column())
        .chain([
            NET_WORKING_CAPITAL_COLUMN,
            SHARES_OUTSTANDING_COLUMN,
            MARKET_CAP_COLUMN,
            TOTAL_DEBT_COLUMN,
            CASH_COLUMN,
            BETA_COLUMN,
        ])
        .map(str::to_string)
        .collect()
}

/// Concatenate period rows, in the order given, with the summary row last.
///
/// The column set is fixed, so a run with no statement data still produces
/// every column.
pub fn merge(periods: &[PeriodMetrics], summary: &SummaryRow) -> LabeledTable {
    let records: Vec<TableRecord> = periods
        .iter()
        .map(PeriodMetrics::to_record)
        .chain(std::iter::once(summary.to_record()))
        .collect();
    LabeledTable::with_columns(output_columns(), records)
}
