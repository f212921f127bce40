//! The single "Latest Market Data" row.

use crate::error::Result;
use crate::mapping::SnapshotLabels;
use dcfkit_data::{PriceHistory, Statement, TickerInfo};
use dcfkit_output::TableRecord;
use serde::{Deserialize, Serialize};

/// Row label of the summary row.
pub const SUMMARY_LABEL: &str = "Latest Market Data";

/// Shares outstanding column. Summary columns are listed in output order.
pub const SHARES_OUTSTANDING_COLUMN: &str = "Shares Outstanding";
/// Market capitalization column.
pub const MARKET_CAP_COLUMN: &str = "Market Cap";
/// Total debt column.
pub const TOTAL_DEBT_COLUMN: &str = "Total Debt (Latest)";
/// Cash and equivalents column.
pub const CASH_COLUMN: &str = "Cash & Equivalents (Latest)";
/// Beta column.
pub const BETA_COLUMN: &str = "Beta (Latest)";

/// Point-in-time market figures. Every field is independently optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Shares outstanding.
    pub shares_outstanding: Option<f64>,
    /// Market capitalization.
    pub market_cap: Option<f64>,
    /// Equity beta.
    pub beta: Option<f64>,
    /// Total debt from the most recent balance sheet.
    pub total_debt: Option<f64>,
    /// Cash and equivalents from the most recent balance sheet.
    pub cash_and_equivalents: Option<f64>,
    /// Last close of the trailing price history.
    pub latest_price: Option<f64>,
}

/// The labeled summary row appended after the period rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Row label.
    pub label: String,
    /// Market figures.
    pub snapshot: MarketSnapshot,
}

impl SummaryRow {
    /// Summary row under [`SUMMARY_LABEL`].
    pub fn new(snapshot: MarketSnapshot) -> Self {
        Self {
            label: SUMMARY_LABEL.to_string(),
            snapshot,
        }
    }

    /// Output row. The latest price is reported on the console only and has
    /// no column.
    pub fn to_record(&self) -> TableRecord {
        let s = &self.snapshot;
        TableRecord::new(
            self.label.clone(),
            vec![
                (SHARES_OUTSTANDING_COLUMN.to_string(), s.shares_outstanding),
                (MARKET_CAP_COLUMN.to_string(), s.market_cap),
                (TOTAL_DEBT_COLUMN.to_string(), s.total_debt),
                (CASH_COLUMN.to_string(), s.cash_and_equivalents),
                (BETA_COLUMN.to_string(), s.beta),
            ],
        )
    }
}

/// Assembles a [`MarketSnapshot`] from ticker metadata, the balance sheet and
/// the price history.
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    labels: SnapshotLabels,
}

impl SnapshotBuilder {
    /// Create a builder reading the given balance-sheet rows.
    pub const fn new(labels: SnapshotLabels) -> Self {
        Self { labels }
    }

    /// Build the snapshot.
    ///
    /// Debt and cash come from the balance sheet period with the latest
    /// date, whatever order the provider supplied periods in.
    pub fn build(
        &self,
        info: &TickerInfo,
        balance_sheet: &Statement,
        history: &PriceHistory,
    ) -> Result<MarketSnapshot> {
        Ok(MarketSnapshot {
            shares_outstanding: info.shares_outstanding,
            market_cap: info.market_cap,
            beta: info.beta,
            total_debt: balance_sheet.latest_value(&self.labels.total_debt)?,
            cash_and_equivalents: balance_sheet
                .latest_value(&self.labels.cash_and_equivalents)?,
            latest_price: history.latest_close()?,
        })
    }
}
