//! The market-data collaborator seam.

use crate::error::Result;
use crate::market::{PriceHistory, TickerInfo};
use crate::statement::RawStatementSet;
use std::future::Future;

/// A source of financial statements, ticker metadata and price history.
///
/// Implementations report failures as errors; turning those into empty data
/// is the job of [`crate::boundary::collect_inputs`], not of the provider.
pub trait MarketDataProvider {
    /// Annual income statement, balance sheet and cash-flow statement.
    fn statements(&self, symbol: &str) -> impl Future<Output = Result<RawStatementSet>>;

    /// Market cap, shares outstanding and beta.
    fn ticker_info(&self, symbol: &str) -> impl Future<Output = Result<TickerInfo>>;

    /// Daily closes over the trailing `window_days`.
    fn price_history(
        &self,
        symbol: &str,
        window_days: i64,
    ) -> impl Future<Output = Result<PriceHistory>>;
}
