//! Metrics computed from other statement rows.

use crate::error::Result;
use crate::mapping::WorkingCapitalLabels;
use crate::metrics::PeriodMetrics;
use chrono::NaiveDate;
use dcfkit_data::Statement;

/// Fills in Net Working Capital from the balance sheet.
#[derive(Debug, Clone, Default)]
pub struct WorkingCapitalCalculator {
    labels: WorkingCapitalLabels,
}

impl WorkingCapitalCalculator {
    /// Create a calculator reading the given balance-sheet rows.
    pub const fn new(labels: WorkingCapitalLabels) -> Self {
        Self { labels }
    }

    /// Current assets minus current liabilities for one period.
    ///
    /// `None` unless both rows are reported for exactly that period.
    pub fn net_working_capital(
        &self,
        balance_sheet: &Statement,
        period: NaiveDate,
    ) -> Result<Option<f64>> {
        let assets = balance_sheet.value(&self.labels.current_assets, period)?;
        let liabilities = balance_sheet.value(&self.labels.current_liabilities, period)?;
        Ok(assets.zip(liabilities).map(|(a, l)| a - l))
    }

    /// Set `net_working_capital` on every row. No other field is touched.
    pub fn apply(&self, rows: &mut [PeriodMetrics], balance_sheet: &Statement) -> Result<()> {
        for row in rows.iter_mut() {
            row.net_working_capital = self.net_working_capital(balance_sheet, row.period)?;
        }
        Ok(())
    }
}
