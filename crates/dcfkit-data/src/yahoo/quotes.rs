//! Closing-price history from Yahoo Finance.

use crate::error::{DataError, Result};
use crate::market::PriceHistory;
use chrono::{DateTime, Duration, Utc};
use polars::prelude::*;
use yahoo_finance_api as yahoo;

/// Default trailing window for price history, in days.
pub const DEFAULT_HISTORY_DAYS: i64 = 365;

/// Yahoo Finance quote provider.
pub struct YahooQuoteProvider {
    provider: yahoo::YahooConnector,
}

impl std::fmt::Debug for YahooQuoteProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooQuoteProvider").finish_non_exhaustive()
    }
}

impl YahooQuoteProvider {
    /// Create a new Yahoo Finance quote provider.
    pub fn new() -> Result<Self> {
        Ok(Self {
            provider: yahoo::YahooConnector::new()?,
        })
    }

    /// Fetch daily closes for a single symbol.
    ///
    /// # Arguments
    /// * `symbol` - The ticker symbol (e.g., "REPYY")
    /// * `start` - Start date for the data
    /// * `end` - End date for the data
    ///
    /// # Returns
    /// A price history with columns: date, close, oldest first
    pub async fn fetch_history(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<PriceHistory> {
        if start > end {
            return Err(DataError::InvalidDateRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }

        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        // yahoo_finance_api speaks `time`, not chrono
        let start_time = time::OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| DataError::TimeConversion(e.to_string()))?;
        let end_time = time::OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| DataError::TimeConversion(e.to_string()))?;

        let response = self
            .provider
            .get_quote_history(symbol, start_time, end_time)
            .await?;

        let quotes = response
            .quotes()
            .map_err(|e| DataError::YahooApi(e.to_string()))?;

        if quotes.is_empty() {
            return Err(DataError::MissingData {
                symbol: symbol.to_string(),
                reason: "No price history returned from Yahoo Finance".to_string(),
            });
        }

        let timestamps: Vec<i64> = quotes.iter().map(|q| q.timestamp).collect();
        let closes: Vec<f64> = quotes.iter().map(|q| q.close).collect();

        let df = DataFrame::new(vec![
            Series::new("timestamp".into(), timestamps).into(),
            Series::new("close".into(), closes).into(),
        ])?;

        let df = df
            .lazy()
            .with_column(
                (col("timestamp") * lit(1_000_000_000))
                    .cast(DataType::Datetime(TimeUnit::Nanoseconds, None))
                    .cast(DataType::Date)
                    .alias("date"),
            )
            .select(&[col("date"), col("close")])
            .collect()?;

        Ok(PriceHistory::from_frame(df))
    }

    /// Fetch daily closes for the `days` leading up to now.
    pub async fn fetch_trailing(&self, symbol: &str, days: i64) -> Result<PriceHistory> {
        let end = Utc::now();
        let start = end - Duration::days(days);
        self.fetch_history(symbol, start, end).await
    }
}
