//! End-to-end run: collected provider data to the written output table.

use crate::derived::WorkingCapitalCalculator;
use crate::error::Result;
use crate::mapping::{MetricMapping, SnapshotLabels, WorkingCapitalLabels};
use crate::merge::merge;
use crate::metrics::PeriodMetrics;
use crate::normalize::StatementNormalizer;
use crate::snapshot::{SnapshotBuilder, SummaryRow};
use dcfkit_data::ProviderInputs;
use dcfkit_output::{ExportFormat, Exporter, LabeledTable, Report};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Normalized periods plus the summary row, before merging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfInputs {
    /// One entry per income-statement period.
    pub periods: Vec<PeriodMetrics>,
    /// Latest market data.
    pub summary: SummaryRow,
}

impl DcfInputs {
    /// Merge into the output table.
    pub fn to_table(&self) -> LabeledTable {
        merge(&self.periods, &self.summary)
    }
}

/// Normalize, derive, snapshot and merge.
///
/// The pipeline does no error recovery. Provider failures are expected to
/// have been absorbed into empty [`ProviderInputs`] before it runs.
#[derive(Debug, Clone)]
pub struct DcfPipeline {
    normalizer: StatementNormalizer,
    working_capital: WorkingCapitalCalculator,
    snapshot: SnapshotBuilder,
}

impl DcfPipeline {
    /// Create a pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DcfError::InvalidMapping`] if `mapping` does not
    /// validate.
    pub fn new(
        mapping: MetricMapping,
        working_capital: WorkingCapitalLabels,
        snapshot: SnapshotLabels,
    ) -> Result<Self> {
        Ok(Self {
            normalizer: StatementNormalizer::new(mapping)?,
            working_capital: WorkingCapitalCalculator::new(working_capital),
            snapshot: SnapshotBuilder::new(snapshot),
        })
    }

    /// Pipeline with the Yahoo row labels.
    pub fn yahoo() -> Result<Self> {
        Self::new(
            MetricMapping::yahoo(),
            WorkingCapitalLabels::default(),
            SnapshotLabels::default(),
        )
    }

    /// Mapping in use.
    pub const fn mapping(&self) -> &MetricMapping {
        self.normalizer.mapping()
    }

    /// Per-period metrics and the summary row.
    pub fn evaluate(&self, inputs: &ProviderInputs) -> Result<DcfInputs> {
        let statements = &inputs.statements;

        let mut periods = self.normalizer.normalize(statements)?;
        self.working_capital
            .apply(&mut periods, &statements.balance_sheet)?;

        let snapshot =
            self.snapshot
                .build(&inputs.info, &statements.balance_sheet, &inputs.history)?;

        Ok(DcfInputs {
            periods,
            summary: SummaryRow::new(snapshot),
        })
    }

    /// The merged output table.
    pub fn run(&self, inputs: &ProviderInputs) -> Result<LabeledTable> {
        let table = self.evaluate(inputs)?.to_table();
        info!(
            rows = table.height(),
            columns = table.width(),
            mapping = %self.mapping().version,
            "built output table"
        );
        Ok(table)
    }
}

/// Write `table` to `path` and build the console report for it.
pub fn emit(
    table: &LabeledTable,
    symbol: &str,
    path: &Path,
    format: ExportFormat,
    preview_rows: usize,
) -> Result<Report> {
    table.export_to_file(path, format)?;
    info!(path = %path.display(), ?format, "wrote output table");
    Ok(Report::new(
        symbol.to_string(),
        path.display().to_string(),
        table,
        preview_rows,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DcfError;
    use crate::metrics::DcfMetric;
    use crate::snapshot::SUMMARY_LABEL;

    #[test]
    fn test_empty_inputs_give_summary_only() {
        let table = DcfPipeline::yahoo()
            .unwrap()
            .run(&ProviderInputs::empty())
            .unwrap();

        assert_eq!(table.height(), 1);
        assert_eq!(table.labels(), vec![SUMMARY_LABEL]);
        assert_eq!(table.width(), 11);
        assert!(table.rows()[0].cells.iter().all(Option::is_none));
    }

    #[test]
    fn test_invalid_mapping_is_fatal() {
        let mut mapping = MetricMapping::yahoo();
        mapping.sources.retain(|s| s.metric != DcfMetric::CapEx);

        let result = DcfPipeline::new(
            mapping,
            WorkingCapitalLabels::default(),
            SnapshotLabels::default(),
        );
        assert!(matches!(result, Err(DcfError::InvalidMapping(_))));
    }

    #[test]
    fn test_emit_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let table = DcfPipeline::yahoo()
            .unwrap()
            .run(&ProviderInputs::empty())
            .unwrap();

        let report = emit(&table, "REPYY", &path, ExportFormat::Csv, 5).unwrap();
        assert_eq!(report.total_rows, 1);
        assert!(report.output_file.ends_with("out.csv"));

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(",Revenue,EBIT"));
        assert!(content.ends_with("Latest Market Data,,,,,,,,,,,\n"));
    }
}
