//! DCF input metrics and the per-period row that carries them.

use chrono::NaiveDate;
use dcfkit_output::TableRecord;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Output column for [`PeriodMetrics::net_working_capital`].
pub const NET_WORKING_CAPITAL_COLUMN: &str = "Net Working Capital";

const PERIOD_FORMAT: &str = "%Y-%m-%d";

/// A statement-sourced DCF input.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DcfMetric {
    /// Total revenue
    Revenue,
    /// Earnings before interest and taxes
    #[display("EBIT")]
    Ebit,
    /// Depreciation and amortization
    Depreciation,
    /// Capital expenditure, as a magnitude
    #[serde(rename = "capex")]
    CapEx,
    /// Income tax provision
    Taxes,
}

impl DcfMetric {
    /// Every metric, in output column order.
    pub const ALL: [Self; 5] = [
        Self::Revenue,
        Self::Ebit,
        Self::Depreciation,
        Self::CapEx,
        Self::Taxes,
    ];

    /// Output column name.
    pub const fn column(&self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::Ebit => "EBIT",
            Self::Depreciation => "Depreciation",
            Self::CapEx => "CapEx",
            Self::Taxes => "Taxes",
        }
    }
}

/// DCF inputs for one reporting period.
///
/// Every field is `None` unless the provider reported it for this exact
/// period. Built by the normalizer, completed by the working-capital step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodMetrics {
    /// Reporting period end date.
    pub period: NaiveDate,
    /// Total revenue.
    pub revenue: Option<f64>,
    /// EBIT.
    pub ebit: Option<f64>,
    /// Depreciation.
    pub depreciation: Option<f64>,
    /// Capital expenditure, non-negative when present.
    pub capex: Option<f64>,
    /// Tax provision.
    pub taxes: Option<f64>,
    /// Current assets minus current liabilities.
    pub net_working_capital: Option<f64>,
}

impl PeriodMetrics {
    /// A period with every metric absent.
    pub const fn new(period: NaiveDate) -> Self {
        Self {
            period,
            revenue: None,
            ebit: None,
            depreciation: None,
            capex: None,
            taxes: None,
            net_working_capital: None,
        }
    }

    /// Value of a statement-sourced metric.
    pub const fn get(&self, metric: DcfMetric) -> Option<f64> {
        match metric {
            DcfMetric::Revenue => self.revenue,
            DcfMetric::Ebit => self.ebit,
            DcfMetric::Depreciation => self.depreciation,
            DcfMetric::CapEx => self.capex,
            DcfMetric::Taxes => self.taxes,
        }
    }

    /// Set a statement-sourced metric.
    pub const fn set(&mut self, metric: DcfMetric, value: Option<f64>) {
        match metric {
            DcfMetric::Revenue => self.revenue = value,
            DcfMetric::Ebit => self.ebit = value,
            DcfMetric::Depreciation => self.depreciation = value,
            DcfMetric::CapEx => self.capex = value,
            DcfMetric::Taxes => self.taxes = value,
        }
    }

    /// ISO date row label.
    pub fn label(&self) -> String {
        self.period.format(PERIOD_FORMAT).to_string()
    }

    /// Output row: the five metrics in column order, then NWC.
    pub fn to_record(&self) -> TableRecord {
        let mut fields: Vec<(String, Option<f64>)> = DcfMetric::ALL
            .iter()
            .map(|m| (m.column().to_string(), self.get(*m)))
            .collect();
        fields.push((
            NET_WORKING_CAPITAL_COLUMN.to_string(),
            self.net_working_capital,
        ));
        TableRecord::new(self.label(), fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn period() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
    }

    #[rstest]
    #[case(DcfMetric::Revenue, "Revenue")]
    #[case(DcfMetric::Ebit, "EBIT")]
    #[case(DcfMetric::Depreciation, "Depreciation")]
    #[case(DcfMetric::CapEx, "CapEx")]
    #[case(DcfMetric::Taxes, "Taxes")]
    fn test_display_matches_column(#[case] metric: DcfMetric, #[case] column: &str) {
        assert_eq!(metric.column(), column);
        assert_eq!(metric.to_string(), column);
    }

    #[test]
    fn test_new_period_is_all_absent() {
        let row = PeriodMetrics::new(period());
        for metric in DcfMetric::ALL {
            assert_eq!(row.get(metric), None);
        }
        assert_eq!(row.net_working_capital, None);
    }

    #[test]
    fn test_set_and_get() {
        let mut row = PeriodMetrics::new(period());
        row.set(DcfMetric::CapEx, Some(800.0));
        row.set(DcfMetric::Taxes, Some(0.0));

        assert_eq!(row.capex, Some(800.0));
        assert_eq!(row.get(DcfMetric::Taxes), Some(0.0));
        assert_eq!(row.get(DcfMetric::Revenue), None);
    }

    #[test]
    fn test_record_layout() {
        let mut row = PeriodMetrics::new(period());
        row.revenue = Some(1000.0);
        row.net_working_capital = Some(500.0);

        let record = row.to_record();
        assert_eq!(record.label, "2023-12-31");

        let names: Vec<&str> = record.fields.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Revenue",
                "EBIT",
                "Depreciation",
                "CapEx",
                "Taxes",
                "Net Working Capital"
            ]
        );
        assert_eq!(record.fields[0].1, Some(1000.0));
        assert_eq!(record.fields[1].1, None);
        assert_eq!(record.fields[5].1, Some(500.0));
    }
}
