//! Ticker account metadata from the Yahoo Finance quote-summary API.

use crate::error::{DataError, Result};
use crate::market::TickerInfo;
use tokio::sync::Mutex;
use tracing::debug;
use yahoo_finance_api as yahoo;

/// Yahoo Finance fundamentals provider.
///
/// The quote-summary call needs a crumb the connector negotiates on first use,
/// which takes `&mut self`; the connector sits behind a mutex.
pub struct YahooFundamentalsProvider {
    connector: Mutex<yahoo::YahooConnector>,
}

impl std::fmt::Debug for YahooFundamentalsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooFundamentalsProvider")
            .finish_non_exhaustive()
    }
}

impl YahooFundamentalsProvider {
    /// Create a new Yahoo Finance fundamentals provider.
    pub fn new() -> Result<Self> {
        Ok(Self {
            connector: Mutex::new(yahoo::YahooConnector::new()?),
        })
    }

    /// Fetch market cap, shares outstanding and beta for a symbol.
    ///
    /// Beta comes from the summary detail module and falls back to the key
    /// statistics module. Fields Yahoo does not report stay `None`.
    pub async fn fetch_ticker_info(&self, symbol: &str) -> Result<TickerInfo> {
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let summary = {
            let mut connector = self.connector.lock().await;
            connector.get_ticker_info(symbol).await?
        };

        let data = summary
            .quote_summary
            .and_then(|qs| qs.result)
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| DataError::MissingData {
                symbol: symbol.to_string(),
                reason: "Empty quote summary".to_string(),
            })?;

        let detail = data.summary_detail.as_ref();
        let stats = data.default_key_statistics.as_ref();

        let info = ticker_info(SummaryFields {
            market_cap: detail.and_then(|sd| sd.market_cap).map(|v| v as f64),
            shares_outstanding: stats.and_then(|ks| ks.shares_outstanding).map(|v| v as f64),
            detail_beta: detail.and_then(|sd| sd.beta),
            stats_beta: stats.and_then(|ks| ks.beta),
        });

        debug!(
            symbol,
            market_cap = ?info.market_cap,
            shares_outstanding = ?info.shares_outstanding,
            beta = ?info.beta,
            "Fetched ticker info"
        );

        Ok(info)
    }
}

/// Quote-summary values, one per module field, before they become a
/// [`TickerInfo`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct SummaryFields {
    market_cap: Option<f64>,
    shares_outstanding: Option<f64>,
    detail_beta: Option<f64>,
    stats_beta: Option<f64>,
}

/// Summary detail beta wins; key statistics only fills a gap.
const fn ticker_info(fields: SummaryFields) -> TickerInfo {
    let beta = match fields.detail_beta {
        Some(beta) => Some(beta),
        None => fields.stats_beta,
    };
    TickerInfo {
        market_cap: fields.market_cap,
        shares_outstanding: fields.shares_outstanding,
        beta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::both_modules(Some(1.1), Some(0.9), Some(1.1))]
    #[case::key_statistics_only(None, Some(0.9), Some(0.9))]
    #[case::summary_detail_only(Some(1.1), None, Some(1.1))]
    #[case::neither(None, None, None)]
    fn test_beta_fallback(
        #[case] detail_beta: Option<f64>,
        #[case] stats_beta: Option<f64>,
        #[case] expected: Option<f64>,
    ) {
        let info = ticker_info(SummaryFields {
            detail_beta,
            stats_beta,
            ..SummaryFields::default()
        });
        assert_eq!(info.beta, expected);
    }

    #[test]
    fn test_fields_carry_through() {
        let info = ticker_info(SummaryFields {
            market_cap: Some(5000.0),
            shares_outstanding: Some(100.0),
            detail_beta: None,
            stats_beta: Some(0.8),
        });
        assert_eq!(info.market_cap, Some(5000.0));
        assert_eq!(info.shares_outstanding, Some(100.0));
        assert_eq!(info.beta, Some(0.8));
    }

    #[test]
    fn test_no_modules_gives_empty_info() {
        assert_eq!(ticker_info(SummaryFields::default()), TickerInfo::default());
    }

    #[tokio::test]
    async fn test_invalid_symbol() {
        let provider = YahooFundamentalsProvider::new().unwrap();
        let result = provider.fetch_ticker_info("").await;
        assert!(matches!(result, Err(DataError::InvalidSymbol(_))));
    }
}
