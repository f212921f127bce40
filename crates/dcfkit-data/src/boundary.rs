//! Degrade-to-empty adapter between the provider and the pipeline.
//!
//! Every provider failure is logged here and replaced by empty data, so the
//! pipeline always receives a valid [`ProviderInputs`] and never has to
//! recover from a fetch error itself.

use crate::error::Result;
use crate::market::{PriceHistory, ProviderInputs, TickerInfo};
use crate::provider::MarketDataProvider;
use crate::statement::RawStatementSet;
use crate::yahoo::{DEFAULT_HISTORY_DAYS, YahooProvider};
use tracing::{info, warn};

/// Configuration for data fetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchConfig {
    /// Trailing window for price history, in days.
    pub history_days: i64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            history_days: DEFAULT_HISTORY_DAYS,
        }
    }
}

fn or_empty<T>(result: Result<T>, symbol: &str, what: &str, empty: impl FnOnce() -> T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!(symbol, error = %e, "Error fetching {what}, continuing without it");
            empty()
        }
    }
}

/// Fetch everything the pipeline needs, substituting empty data for any failure.
pub async fn collect_inputs<P: MarketDataProvider>(
    provider: &P,
    symbol: &str,
    config: &FetchConfig,
) -> ProviderInputs {
    info!(symbol, "Fetching financial statements");
    let statements = or_empty(
        provider.statements(symbol).await,
        symbol,
        "financial statements",
        RawStatementSet::empty,
    );

    info!(symbol, "Fetching market data");
    let info = or_empty(
        provider.ticker_info(symbol).await,
        symbol,
        "ticker info",
        TickerInfo::default,
    );
    let history = or_empty(
        provider.price_history(symbol, config.history_days).await,
        symbol,
        "price history",
        PriceHistory::empty,
    );

    ProviderInputs {
        statements,
        info,
        history,
    }
}

/// [`collect_inputs`] against Yahoo Finance.
///
/// If the Yahoo clients cannot even be constructed, the run continues with
/// [`ProviderInputs::empty`].
pub async fn collect_from_yahoo(symbol: &str, config: &FetchConfig) -> ProviderInputs {
    match YahooProvider::new() {
        Ok(provider) => collect_inputs(&provider, symbol, config).await,
        Err(e) => {
            warn!(symbol, error = %e, "Could not create Yahoo Finance client, continuing with empty data");
            ProviderInputs::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataError;
    use crate::statement::Statement;
    use chrono::NaiveDate;

    struct FailingProvider;

    impl MarketDataProvider for FailingProvider {
        async fn statements(&self, symbol: &str) -> Result<RawStatementSet> {
            Err(DataError::MissingData {
                symbol: symbol.to_string(),
                reason: "provider unreachable".to_string(),
            })
        }

        async fn ticker_info(&self, _symbol: &str) -> Result<TickerInfo> {
            Err(DataError::YahooApi("malformed response".to_string()))
        }

        async fn price_history(&self, symbol: &str, _window_days: i64) -> Result<PriceHistory> {
            Err(DataError::MissingData {
                symbol: symbol.to_string(),
                reason: "empty history".to_string(),
            })
        }
    }

    struct PartialProvider;

    impl MarketDataProvider for PartialProvider {
        async fn statements(&self, _symbol: &str) -> Result<RawStatementSet> {
            let income = Statement::from_columns(
                &[NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()],
                vec![("Total Revenue".to_string(), vec![Some(1000.0)])],
            )?;
            Ok(RawStatementSet::new(
                income,
                Statement::empty(),
                Statement::empty(),
            ))
        }

        async fn ticker_info(&self, _symbol: &str) -> Result<TickerInfo> {
            Ok(TickerInfo {
                market_cap: Some(5000.0),
                shares_outstanding: None,
                beta: Some(1.1),
            })
        }

        async fn price_history(&self, _symbol: &str, window_days: i64) -> Result<PriceHistory> {
            assert_eq!(window_days, 30);
            Err(DataError::YahooApi("rate limited".to_string()))
        }
    }

    #[tokio::test]
    async fn test_failures_degrade_to_empty() {
        let inputs = collect_inputs(&FailingProvider, "REPYY", &FetchConfig::default()).await;

        assert!(inputs.statements.income.is_empty());
        assert!(inputs.statements.balance_sheet.is_empty());
        assert!(inputs.statements.cash_flow.is_empty());
        assert_eq!(inputs.info, TickerInfo::default());
        assert!(inputs.history.is_empty());
    }

    #[tokio::test]
    async fn test_only_failed_source_is_emptied() {
        let config = FetchConfig { history_days: 30 };
        let inputs = collect_inputs(&PartialProvider, "REPYY", &config).await;

        assert_eq!(inputs.statements.income.periods().len(), 1);
        assert_eq!(inputs.info.market_cap, Some(5000.0));
        assert_eq!(inputs.info.beta, Some(1.1));
        assert!(inputs.history.is_empty());
    }

    #[test]
    fn test_default_fetch_config() {
        assert_eq!(FetchConfig::default().history_days, 365);
    }
}
