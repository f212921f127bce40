//! Annual financial statements from the Yahoo Finance fundamentals-timeseries API.
//!
//! Yahoo publishes each statement line as its own series (`annualTotalRevenue`,
//! `annualCapitalExpenditure`, ...). This module requests a fixed set of series
//! per statement and pivots them into a [`Statement`] whose columns carry the
//! provider's display labels (`Total Revenue`, `Capital Expenditure`).

use crate::error::{DataError, Result};
use crate::statement::{RawStatementSet, Statement, StatementKind};
use chrono::{NaiveDate, Utc};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::time::Duration;
use tracing::debug;

/// Yahoo Finance query host.
const YAHOO_BASE_URL: &str = "https://query2.finance.yahoo.com";

/// Fundamentals-timeseries endpoint, followed by `/{symbol}`.
const TIMESERIES_PATH: &str = "/ws/fundamentals-timeseries/v1/finance/timeseries";

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)";

/// 2016-12-31T00:00:00Z. Yahoo keeps roughly four annual periods; this reaches past all of them.
const PERIOD_START: i64 = 1_483_142_400;

/// Prefix Yahoo puts on annual series names.
const ANNUAL_PREFIX: &str = "annual";

const INCOME_KEYS: &[&str] = &[
    "TotalRevenue",
    "OperatingRevenue",
    "CostOfRevenue",
    "GrossProfit",
    "OperatingExpense",
    "OperatingIncome",
    "EBIT",
    "EBITDA",
    "ReconciledDepreciation",
    "InterestExpense",
    "PretaxIncome",
    "TaxProvision",
    "NetIncome",
    "DilutedEPS",
    "BasicEPS",
];

const BALANCE_SHEET_KEYS: &[&str] = &[
    "TotalAssets",
    "CurrentAssets",
    "CashAndCashEquivalents",
    "Inventory",
    "TotalLiabilitiesNetMinorityInterest",
    "CurrentLiabilities",
    "TotalDebt",
    "LongTermDebt",
    "NetDebt",
    "WorkingCapital",
    "StockholdersEquity",
    "OrdinarySharesNumber",
];

const CASH_FLOW_KEYS: &[&str] = &[
    "OperatingCashFlow",
    "CapitalExpenditure",
    "FreeCashFlow",
    "DepreciationAndAmortization",
    "ChangeInWorkingCapital",
    "InvestingCashFlow",
    "FinancingCashFlow",
];

/// Yahoo series keys requested for a statement.
pub const fn statement_keys(kind: StatementKind) -> &'static [&'static str] {
    match kind {
        StatementKind::Income => INCOME_KEYS,
        StatementKind::BalanceSheet => BALANCE_SHEET_KEYS,
        StatementKind::CashFlow => CASH_FLOW_KEYS,
    }
}

/// Display label for a Yahoo series key.
///
/// A space goes before every uppercase letter that follows a lowercase one,
/// so acronyms stay intact: `TotalRevenue` becomes `Total Revenue`, `EBIT`
/// stays `EBIT`, `DilutedEPS` becomes `Diluted EPS`.
pub fn row_label(key: &str) -> String {
    let mut label = String::with_capacity(key.len() + 8);
    let mut prev: Option<char> = None;
    for c in key.chars() {
        if c.is_ascii_uppercase() && prev.is_some_and(|p| p.is_ascii_lowercase()) {
            label.push(' ');
        }
        label.push(c);
        prev = Some(c);
    }
    label
}

/// Pivot a timeseries response into a statement.
///
/// Series outside `keys` are ignored. Columns follow the order of `keys`; a
/// key with no reported values gets no column. Periods are ordered most
/// recent first.
pub fn parse_timeseries(body: &Value, keys: &[&str]) -> Result<Statement> {
    let timeseries = body
        .get("timeseries")
        .ok_or_else(|| DataError::Parse("response has no 'timeseries' object".to_string()))?;

    if let Some(error) = timeseries.get("error").filter(|e| !e.is_null()) {
        return Err(DataError::YahooApi(error.to_string()));
    }

    let results = timeseries
        .get("result")
        .and_then(Value::as_array)
        .ok_or_else(|| DataError::Parse("response has no 'timeseries.result' array".to_string()))?;

    let mut series: HashMap<&str, BTreeMap<NaiveDate, f64>> = HashMap::new();
    let mut periods = BTreeSet::new();

    for result in results {
        let Some(type_name) = result.pointer("/meta/type/0").and_then(Value::as_str) else {
            continue;
        };
        let Some(key) = type_name
            .strip_prefix(ANNUAL_PREFIX)
            .filter(|key| keys.contains(key))
        else {
            continue;
        };
        let Some(entries) = result.get(type_name).and_then(Value::as_array) else {
            continue;
        };

        for entry in entries {
            let Some(as_of) = entry.get("asOfDate").and_then(Value::as_str) else {
                continue;
            };
            let Some(raw) = entry.pointer("/reportedValue/raw").and_then(Value::as_f64) else {
                continue;
            };
            let period = NaiveDate::parse_from_str(as_of, "%Y-%m-%d")
                .map_err(|e| DataError::Parse(format!("asOfDate '{as_of}': {e}")))?;

            periods.insert(period);
            series.entry(key).or_default().insert(period, raw);
        }
    }

    let periods: Vec<NaiveDate> = periods.into_iter().rev().collect();
    let columns: Vec<(String, Vec<Option<f64>>)> = keys
        .iter()
        .filter_map(|key| {
            let values = series.get(key)?;
            let column: Vec<Option<f64>> = periods.iter().map(|p| values.get(p).copied()).collect();
            Some((row_label(key), column))
        })
        .collect();

    Statement::from_columns(&periods, columns)
}

/// Yahoo Finance annual statements client.
#[derive(Debug, Clone)]
pub struct YahooStatementsProvider {
    client: reqwest::Client,
    base_url: String,
}

impl YahooStatementsProvider {
    /// Create a client against the public Yahoo Finance host.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            base_url: YAHOO_BASE_URL.to_string(),
        })
    }

    /// Point the client at another host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Host requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one annual statement.
    pub async fn fetch_statement(&self, symbol: &str, kind: StatementKind) -> Result<Statement> {
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let keys = statement_keys(kind);
        let types = keys
            .iter()
            .map(|key| format!("{ANNUAL_PREFIX}{key}"))
            .collect::<Vec<_>>()
            .join(",");
        let url = format!("{}{}/{}", self.base_url, TIMESERIES_PATH, symbol);

        let body: Value = self
            .client
            .get(&url)
            .query(&[
                ("symbol", symbol.to_string()),
                ("type", types),
                ("period1", PERIOD_START.to_string()),
                ("period2", Utc::now().timestamp().to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let statement = parse_timeseries(&body, keys)?;
        debug!(
            symbol,
            statement = %kind,
            periods = statement.periods().len(),
            columns = statement.labels().len(),
            "Fetched statement"
        );
        Ok(statement)
    }

    /// Fetch the income statement, balance sheet and cash-flow statement, one after another.
    pub async fn fetch_statements(&self, symbol: &str) -> Result<RawStatementSet> {
        let income = self.fetch_statement(symbol, StatementKind::Income).await?;
        let balance_sheet = self
            .fetch_statement(symbol, StatementKind::BalanceSheet)
            .await?;
        let cash_flow = self.fetch_statement(symbol, StatementKind::CashFlow).await?;
        Ok(RawStatementSet::new(income, balance_sheet, cash_flow))
    }
}
