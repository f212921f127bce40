//! Financial statement tables keyed by reporting period.
//!
//! A [`Statement`] is a polars [`DataFrame`] with one `date` column and one
//! `Float64` column per provider row label. Lookups never fail on a missing
//! label or period: they return `None` so callers can tell "not reported"
//! apart from a reported zero.

use crate::error::{DataError, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the period column in every statement frame.
pub const DATE_COLUMN: &str = "date";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The three statements a provider publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    /// Income statement
    Income,
    /// Balance sheet
    BalanceSheet,
    /// Cash-flow statement
    CashFlow,
}

impl StatementKind {
    /// Human-readable name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Income => "income statement",
            Self::BalanceSheet => "balance sheet",
            Self::CashFlow => "cash-flow statement",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One financial statement: periods as rows, provider labels as columns.
#[derive(Debug, Clone)]
pub struct Statement {
    frame: DataFrame,
    periods: Vec<NaiveDate>,
}

impl Statement {
    /// A statement with no periods and no columns.
    pub fn empty() -> Self {
        Self {
            frame: DataFrame::empty(),
            periods: Vec::new(),
        }
    }

    /// Wrap an existing frame.
    ///
    /// The frame must carry a [`DATE_COLUMN`] unless it has no columns at all.
    /// Period order is preserved as given.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::DuplicatePeriod`] if a period appears twice, or a
    /// parse error if the date column is missing or unreadable.
    pub fn new(frame: DataFrame) -> Result<Self> {
        if frame.width() == 0 {
            return Ok(Self::empty());
        }
        if frame.get_column_index(DATE_COLUMN).is_none() {
            return Err(DataError::Parse(format!(
                "statement frame has no '{DATE_COLUMN}' column"
            )));
        }

        let dates = frame.column(DATE_COLUMN)?.cast(&DataType::String)?;
        let dates = dates.str()?;

        let mut periods = Vec::with_capacity(frame.height());
        for i in 0..frame.height() {
            let raw = dates
                .get(i)
                .ok_or_else(|| DataError::Parse("Missing period date".to_string()))?;
            let period = NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .map_err(|e| DataError::Parse(format!("period '{raw}': {e}")))?;
            if periods.contains(&period) {
                return Err(DataError::DuplicatePeriod(raw.to_string()));
            }
            periods.push(period);
        }

        Ok(Self { frame, periods })
    }

    /// Build a statement from period dates and labeled value columns.
    ///
    /// Every column must have one entry per period.
    pub fn from_columns(
        periods: &[NaiveDate],
        columns: Vec<(String, Vec<Option<f64>>)>,
    ) -> Result<Self> {
        let dates: Vec<String> = periods
            .iter()
            .map(|d| d.format(DATE_FORMAT).to_string())
            .collect();

        let mut series: Vec<Column> = Vec::with_capacity(columns.len() + 1);
        series.push(Series::new(DATE_COLUMN.into(), dates).into());
        for (label, values) in columns {
            if values.len() != periods.len() {
                return Err(DataError::Parse(format!(
                    "column '{label}' has {} values for {} periods",
                    values.len(),
                    periods.len()
                )));
            }
            series.push(Series::new(label.into(), values).into());
        }

        let frame = DataFrame::new(series)?
            .lazy()
            .with_column(col(DATE_COLUMN).cast(DataType::Date))
            .collect()?;

        Self::new(frame)
    }

    /// Periods in the order the provider supplied them.
    pub fn periods(&self) -> &[NaiveDate] {
        &self.periods
    }

    /// Whether the statement has no periods.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Provider row labels present in this statement.
    pub fn labels(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .filter(|name| name.as_str() != DATE_COLUMN)
            .map(|name| name.to_string())
            .collect()
    }

    /// Whether the provider reported a column with this label.
    pub fn has_column(&self, label: &str) -> bool {
        label != DATE_COLUMN && self.frame.get_column_index(label).is_some()
    }

    /// Value of `label` for `period`.
    ///
    /// `None` when the column is missing, the period is missing, or the cell
    /// is null. A NaN cell is treated as null.
    ///
    /// # Errors
    ///
    /// Returns an error only if the column exists but cannot be read as
    /// floating point.
    pub fn value(&self, label: &str, period: NaiveDate) -> Result<Option<f64>> {
        if !self.has_column(label) {
            return Ok(None);
        }
        let Some(row) = self.periods.iter().position(|p| *p == period) else {
            return Ok(None);
        };

        let values = self.frame.column(label)?.cast(&DataType::Float64)?;
        Ok(values.f64()?.get(row).filter(|v| !v.is_nan()))
    }

    /// Most recent period by date, regardless of row order.
    pub fn latest_period(&self) -> Option<NaiveDate> {
        self.periods.iter().max().copied()
    }

    /// Value of `label` in the most recent period.
    pub fn latest_value(&self, label: &str) -> Result<Option<f64>> {
        match self.latest_period() {
            Some(period) => self.value(label, period),
            None => Ok(None),
        }
    }
}

impl Default for Statement {
    fn default() -> Self {
        Self::empty()
    }
}

/// Income statement, balance sheet and cash-flow statement for one company.
#[derive(Debug, Clone, Default)]
pub struct RawStatementSet {
    /// Income statement
    pub income: Statement,
    /// Balance sheet
    pub balance_sheet: Statement,
    /// Cash-flow statement
    pub cash_flow: Statement,
}

impl RawStatementSet {
    /// Create a statement set.
    pub const fn new(income: Statement, balance_sheet: Statement, cash_flow: Statement) -> Self {
        Self {
            income,
            balance_sheet,
            cash_flow,
        }
    }

    /// Three empty statements.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Statement of the given kind.
    pub const fn get(&self, kind: StatementKind) -> &Statement {
        match kind {
            StatementKind::Income => &self.income,
            StatementKind::BalanceSheet => &self.balance_sheet,
            StatementKind::CashFlow => &self.cash_flow,
        }
    }
}
