//! Market metadata and price history supplied alongside the statements.

use crate::error::Result;
use crate::statement::RawStatementSet;
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Name of the closing-price column in a [`PriceHistory`] frame.
pub const CLOSE_COLUMN: &str = "close";

/// Account metadata for a ticker. Every field is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickerInfo {
    /// Market capitalization
    pub market_cap: Option<f64>,
    /// Shares outstanding
    pub shares_outstanding: Option<f64>,
    /// Beta
    pub beta: Option<f64>,
}

/// Daily closing prices over a trailing window, oldest first.
#[derive(Debug, Clone)]
pub struct PriceHistory {
    frame: DataFrame,
}

impl PriceHistory {
    /// History with no rows.
    pub fn empty() -> Self {
        Self {
            frame: DataFrame::empty(),
        }
    }

    /// Wrap a frame with at least a [`CLOSE_COLUMN`] column.
    pub const fn from_frame(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Build a history from dates and closes.
    pub fn from_closes(dates: &[NaiveDate], closes: Vec<f64>) -> Result<Self> {
        let dates: Vec<String> = dates
            .iter()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect();
        let frame = DataFrame::new(vec![
            Series::new("date".into(), dates).into(),
            Series::new(CLOSE_COLUMN.into(), closes).into(),
        ])?
        .lazy()
        .with_column(col("date").cast(DataType::Date))
        .collect()?;
        Ok(Self { frame })
    }

    /// Whether the history has no rows.
    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Close of the last row, `None` when the history is empty.
    pub fn latest_close(&self) -> Result<Option<f64>> {
        if self.is_empty() || self.frame.get_column_index(CLOSE_COLUMN).is_none() {
            return Ok(None);
        }
        let closes = self.frame.column(CLOSE_COLUMN)?.cast(&DataType::Float64)?;
        Ok(closes.f64()?.get(self.frame.height() - 1))
    }
}

impl Default for PriceHistory {
    fn default() -> Self {
        Self::empty()
    }
}

/// Everything the provider supplies for one run.
#[derive(Debug, Clone, Default)]
pub struct ProviderInputs {
    /// Financial statements
    pub statements: RawStatementSet,
    /// Account metadata
    pub info: TickerInfo,
    /// Trailing price history
    pub history: PriceHistory,
}

impl ProviderInputs {
    /// Empty statements, absent metadata and no history.
    pub fn empty() -> Self {
        Self::default()
    }
}
