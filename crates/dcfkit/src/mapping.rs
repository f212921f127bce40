//! Versioned lookup tables from DCF metrics to provider row labels.
//!
//! Swapping providers or following a renamed row label is a change to a
//! [`MetricMapping`] value (or the JSON it is loaded from), never to the
//! extraction code.

use crate::error::{DcfError, Result};
use crate::metrics::DcfMetric;
use dcfkit_data::StatementKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Version tag of [`MetricMapping::yahoo`].
pub const YAHOO_MAPPING_VERSION: &str = "yahoo-v1";

/// How a raw provider value becomes a metric value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// Use the value as reported.
    #[default]
    Identity,
    /// Use the magnitude. Providers report cash outflows as negatives.
    Absolute,
}

impl Transform {
    /// Apply the transform.
    pub const fn apply(&self, value: f64) -> f64 {
        match self {
            Self::Identity => value,
            Self::Absolute => value.abs(),
        }
    }
}

/// Where one metric is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSource {
    /// Target metric.
    pub metric: DcfMetric,
    /// Statement that carries the row.
    pub statement: StatementKind,
    /// Provider row label.
    pub label: String,
    /// Value transform.
    #[serde(default)]
    pub transform: Transform,
}

impl MetricSource {
    /// Create a source entry.
    pub fn new(
        metric: DcfMetric,
        statement: StatementKind,
        label: impl Into<String>,
        transform: Transform,
    ) -> Self {
        Self {
            metric,
            statement,
            label: label.into(),
            transform,
        }
    }
}

/// Target metric to provider row lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricMapping {
    /// Mapping version, bumped whenever a label changes.
    pub version: String,
    /// One entry per metric.
    pub sources: Vec<MetricSource>,
}

impl MetricMapping {
    /// Yahoo Finance row labels.
    ///
    /// Yahoo reports depreciation on the income statement, and capital
    /// expenditure as a negative cash-flow line.
    pub fn yahoo() -> Self {
        Self {
            version: YAHOO_MAPPING_VERSION.to_string(),
            sources: vec![
                MetricSource::new(
                    DcfMetric::Revenue,
                    StatementKind::Income,
                    "Total Revenue",
                    Transform::Identity,
                ),
                MetricSource::new(
                    DcfMetric::Ebit,
                    StatementKind::Income,
                    "EBIT",
                    Transform::Identity,
                ),
                MetricSource::new(
                    DcfMetric::Depreciation,
                    StatementKind::Income,
                    "Reconciled Depreciation",
                    Transform::Identity,
                ),
                MetricSource::new(
                    DcfMetric::CapEx,
                    StatementKind::CashFlow,
                    "Capital Expenditure",
                    Transform::Absolute,
                ),
                MetricSource::new(
                    DcfMetric::Taxes,
                    StatementKind::Income,
                    "Tax Provision",
                    Transform::Identity,
                ),
            ],
        }
    }

    /// Load a mapping from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let mapping: Self = serde_json::from_str(json)?;
        mapping.validate()?;
        Ok(mapping)
    }

    /// Load a mapping from a JSON file and validate it.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Source entry for a metric.
    pub fn source(&self, metric: DcfMetric) -> Option<&MetricSource> {
        self.sources.iter().find(|s| s.metric == metric)
    }

    /// Check that every metric is mapped exactly once to a non-empty label.
    ///
    /// # Errors
    ///
    /// Returns [`DcfError::InvalidMapping`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(DcfError::InvalidMapping("empty version".to_string()));
        }
        for source in &self.sources {
            if source.label.trim().is_empty() {
                return Err(DcfError::InvalidMapping(format!(
                    "{} has an empty label",
                    source.metric
                )));
            }
        }
        for metric in DcfMetric::ALL {
            match self.sources.iter().filter(|s| s.metric == metric).count() {
                1 => {}
                0 => {
                    return Err(DcfError::InvalidMapping(format!(
                        "{metric} is not mapped ({})",
                        self.version
                    )));
                }
                n => {
                    return Err(DcfError::InvalidMapping(format!(
                        "{metric} is mapped {n} times ({})",
                        self.version
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for MetricMapping {
    fn default() -> Self {
        Self::yahoo()
    }
}

/// Balance-sheet rows behind Net Working Capital.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingCapitalLabels {
    /// Current assets row label.
    pub current_assets: String,
    /// Current liabilities row label.
    pub current_liabilities: String,
}

impl Default for WorkingCapitalLabels {
    fn default() -> Self {
        Self {
            current_assets: "Current Assets".to_string(),
            current_liabilities: "Current Liabilities".to_string(),
        }
    }
}

/// Balance-sheet rows read into the market snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotLabels {
    /// Total debt row label.
    pub total_debt: String,
    /// Cash and equivalents row label.
    pub cash_and_equivalents: String,
}

impl Default for SnapshotLabels {
    fn default() -> Self {
        Self {
            total_debt: "Total Debt".to_string(),
            cash_and_equivalents: "Cash And Cash Equivalents".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_yahoo_mapping_is_valid() {
        let mapping = MetricMapping::yahoo();
        assert!(mapping.validate().is_ok());
        assert_eq!(mapping.version, YAHOO_MAPPING_VERSION);
        assert_eq!(mapping, MetricMapping::default());
    }

    #[rstest]
    #[case(DcfMetric::Revenue, StatementKind::Income, "Total Revenue")]
    #[case(DcfMetric::Ebit, StatementKind::Income, "EBIT")]
    #[case(DcfMetric::Depreciation, StatementKind::Income, "Reconciled Depreciation")]
    #[case(DcfMetric::CapEx, StatementKind::CashFlow, "Capital Expenditure")]
    #[case(DcfMetric::Taxes, StatementKind::Income, "Tax Provision")]
    fn test_yahoo_sources(
        #[case] metric: DcfMetric,
        #[case] statement: StatementKind,
        #[case] label: &str,
    ) {
        let mapping = MetricMapping::yahoo();
        let source = mapping.source(metric).unwrap();
        assert_eq!(source.statement, statement);
        assert_eq!(source.label, label);
    }

    #[test]
    fn test_only_capex_takes_absolute_value() {
        let mapping = MetricMapping::yahoo();
        for source in &mapping.sources {
            let expected = if source.metric == DcfMetric::CapEx {
                Transform::Absolute
            } else {
                Transform::Identity
            };
            assert_eq!(source.transform, expected);
        }
    }

    #[rstest]
    #[case(Transform::Identity, -500.0, -500.0)]
    #[case(Transform::Absolute, -500.0, 500.0)]
    #[case(Transform::Absolute, 250.0, 250.0)]
    #[case(Transform::Absolute, 0.0, 0.0)]
    fn test_transform(#[case] transform: Transform, #[case] input: f64, #[case] expected: f64) {
        assert_eq!(transform.apply(input), expected);
    }

    #[test]
    fn test_missing_metric_rejected() {
        let mut mapping = MetricMapping::yahoo();
        mapping.sources.retain(|s| s.metric != DcfMetric::Taxes);
        assert!(matches!(
            mapping.validate(),
            Err(DcfError::InvalidMapping(msg)) if msg.contains("Taxes")
        ));
    }

    #[test]
    fn test_duplicate_metric_rejected() {
        let mut mapping = MetricMapping::yahoo();
        mapping.sources.push(MetricSource::new(
            DcfMetric::Revenue,
            StatementKind::Income,
            "Operating Revenue",
            Transform::Identity,
        ));
        assert!(matches!(
            mapping.validate(),
            Err(DcfError::InvalidMapping(msg)) if msg.contains("2 times")
        ));
    }

    #[test]
    fn test_empty_label_rejected() {
        let mut mapping = MetricMapping::yahoo();
        mapping.sources[1].label = "  ".to_string();
        assert!(matches!(
            mapping.validate(),
            Err(DcfError::InvalidMapping(_))
        ));
    }

    #[test]
    fn test_json_round_trip_keeps_version() {
        let json = serde_json::to_string(&MetricMapping::yahoo()).unwrap();
        assert!(json.contains("\"cash_flow\""));

        let loaded = MetricMapping::from_json(&json).unwrap();
        assert_eq!(loaded, MetricMapping::yahoo());
    }

    #[test]
    fn test_from_json_validates() {
        let json = r#"{
            "version": "custom-v2",
            "sources": [
                { "metric": "revenue", "statement": "income", "label": "Revenues" }
            ]
        }"#;
        assert!(matches!(
            MetricMapping::from_json(json),
            Err(DcfError::InvalidMapping(_))
        ));
    }

    #[test]
    fn test_from_json_defaults_transform() {
        let json = r#"{
            "version": "custom-v2",
            "sources": [
                { "metric": "revenue", "statement": "income", "label": "Revenues" },
                { "metric": "ebit", "statement": "income", "label": "Operating Income" },
                { "metric": "depreciation", "statement": "cash_flow", "label": "Depreciation And Amortization" },
                { "metric": "capex", "statement": "cash_flow", "label": "Capital Expenditure", "transform": "absolute" },
                { "metric": "taxes", "statement": "income", "label": "Tax Provision" }
            ]
        }"#;
        let mapping = MetricMapping::from_json(json).unwrap();
        assert_eq!(
            mapping.source(DcfMetric::Depreciation).unwrap().transform,
            Transform::Identity
        );
        assert_eq!(
            mapping.source(DcfMetric::CapEx).unwrap().statement,
            StatementKind::CashFlow
        );
    }

    #[test]
    fn test_from_path_loads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapping.json");
        let mut mapping = MetricMapping::yahoo();
        mapping.version = "yahoo-v2".to_string();
        std::fs::write(&path, serde_json::to_string_pretty(&mapping).unwrap()).unwrap();

        assert_eq!(MetricMapping::from_path(&path).unwrap(), mapping);
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = MetricMapping::from_path(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(DcfError::Io(_))));
    }

    #[test]
    fn test_from_path_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapping.json");
        std::fs::write(&path, "{ \"version\": ").unwrap();
        assert!(matches!(
            MetricMapping::from_path(&path),
            Err(DcfError::Serialization(_))
        ));
    }
}
