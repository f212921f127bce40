#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dcfkit/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod derived;
pub mod error;
pub mod mapping;
pub mod merge;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod snapshot;

// Re-export sub-crates
pub use dcfkit_data as data;
pub use dcfkit_output as output;

pub use derived::WorkingCapitalCalculator;
pub use error::{DcfError, Result};
pub use mapping::{
    MetricMapping, MetricSource, SnapshotLabels, Transform, WorkingCapitalLabels,
    YAHOO_MAPPING_VERSION,
};
pub use merge::{merge, output_columns};
pub use metrics::{DcfMetric, NET_WORKING_CAPITAL_COLUMN, PeriodMetrics};
pub use normalize::StatementNormalizer;
pub use pipeline::{DcfInputs, DcfPipeline, emit};
pub use snapshot::{MarketSnapshot, SUMMARY_LABEL, SnapshotBuilder, SummaryRow};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
