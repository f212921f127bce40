//! Provider statements to per-period DCF metrics.

use crate::error::Result;
use crate::mapping::MetricMapping;
use crate::metrics::{DcfMetric, PeriodMetrics};
use dcfkit_data::RawStatementSet;
use tracing::debug;

/// Reads the mapped provider rows into one [`PeriodMetrics`] per period.
#[derive(Debug, Clone)]
pub struct StatementNormalizer {
    mapping: MetricMapping,
}

impl StatementNormalizer {
    /// Create a normalizer for a validated mapping.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DcfError::InvalidMapping`] if the mapping does not
    /// validate.
    pub fn new(mapping: MetricMapping) -> Result<Self> {
        mapping.validate()?;
        Ok(Self { mapping })
    }

    /// Mapping in use.
    pub const fn mapping(&self) -> &MetricMapping {
        &self.mapping
    }

    /// One row per income-statement period, in the income statement's order.
    ///
    /// A metric whose row is missing from its source statement, or whose
    /// statement lacks the period, stays `None`. Net Working Capital is left
    /// for [`crate::WorkingCapitalCalculator`].
    pub fn normalize(&self, statements: &RawStatementSet) -> Result<Vec<PeriodMetrics>> {
        for source in &self.mapping.sources {
            let statement = statements.get(source.statement);
            if !statement.is_empty() && !statement.has_column(&source.label) {
                debug!(
                    metric = %source.metric,
                    label = %source.label,
                    statement = %source.statement,
                    "mapped row not reported"
                );
            }
        }

        let mut rows = Vec::with_capacity(statements.income.periods().len());
        for &period in statements.income.periods() {
            let mut row = PeriodMetrics::new(period);
            for metric in DcfMetric::ALL {
                let Some(source) = self.mapping.source(metric) else {
                    continue;
                };
                let value = statements
                    .get(source.statement)
                    .value(&source.label, period)?
                    .map(|v| source.transform.apply(v));
                row.set(metric, value);
            }
            rows.push(row);
        }

        debug!(periods = rows.len(), version = %self.mapping.version, "normalized statements");
        Ok(rows)
    }
}
