//! Yahoo Finance data providers.

pub mod fundamentals;
pub mod quotes;
pub mod statements;

pub use fundamentals::YahooFundamentalsProvider;
pub use quotes::{DEFAULT_HISTORY_DAYS, YahooQuoteProvider};
pub use statements::YahooStatementsProvider;

use crate::error::Result;
use crate::market::{PriceHistory, TickerInfo};
use crate::provider::MarketDataProvider;
use crate::statement::RawStatementSet;

/// Statements, ticker info and price history from Yahoo Finance.
#[derive(Debug)]
pub struct YahooProvider {
    statements: YahooStatementsProvider,
    fundamentals: YahooFundamentalsProvider,
    quotes: YahooQuoteProvider,
}

impl YahooProvider {
    /// Create all three Yahoo clients.
    pub fn new() -> Result<Self> {
        Ok(Self {
            statements: YahooStatementsProvider::new()?,
            fundamentals: YahooFundamentalsProvider::new()?,
            quotes: YahooQuoteProvider::new()?,
        })
    }
}

impl MarketDataProvider for YahooProvider {
    async fn statements(&self, symbol: &str) -> Result<RawStatementSet> {
        self.statements.fetch_statements(symbol).await
    }

    async fn ticker_info(&self, symbol: &str) -> Result<TickerInfo> {
        self.fundamentals.fetch_ticker_info(symbol).await
    }

    async fn price_history(&self, symbol: &str, window_days: i64) -> Result<PriceHistory> {
        self.quotes.fetch_trailing(symbol, window_days).await
    }
}
