use serde::Serialize;

use crate::core::{Projection, ProjectionResult, ProjectionSample};

pub const CHART_LABEL: &str = "Total Savings";
pub const X_AXIS_TITLE: &str = "Years";
pub const Y_AXIS_TITLE: &str = "Amount ($)";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_savings: String,
    pub total_deposits: String,
    pub total_interest: String,
}

impl Summary {
    pub fn from_result(result: &ProjectionResult) -> Self {
        Self {
            total_savings: format_currency(result.final_balance),
            total_deposits: format_currency(result.total_contributions),
            total_interest: format_currency(result.total_interest),
        }
    }

    pub fn lines(&self) -> [String; 3] {
        [
            format!("Total savings: {}", self.total_savings),
            format!("Total deposits: {}", self.total_deposits),
            format!("Total interest: {}", self.total_interest),
        ]
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

/// One dataset ready for a bar chart: years on x, balance on y.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub label: &'static str,
    pub x_axis_title: &'static str,
    pub y_axis_title: &'static str,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn from_samples(samples: &[ProjectionSample]) -> Self {
        Self {
            label: CHART_LABEL,
            x_axis_title: X_AXIS_TITLE,
            y_axis_title: Y_AXIS_TITLE,
            points: samples
                .iter()
                .map(|s| ChartPoint {
                    x: s.time_years,
                    y: s.balance,
                })
                .collect(),
        }
    }
}

/// `$` followed by the value with exactly two decimals and no grouping.
/// Negative values keep the sign after the symbol (`$-12.50`).
pub fn format_currency(value: f64) -> String {
    format!("${value:.2}")
}

/// US dollar formatting with thousands separators (`$1,234.56`, `-$12.50`).
pub fn format_usd(value: f64) -> String {
    if !value.is_finite() {
        return format_currency(value);
    }

    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && fixed != "0.00";
    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// Plain-text report: summary lines, then one row per sample.
pub fn render_table(projection: &Projection) -> String {
    let summary = Summary::from_result(&projection.result);
    let mut out = String::new();
    for line in summary.lines() {
        out.push_str(&line);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&format!("{X_AXIS_TITLE:>8}  {Y_AXIS_TITLE:>18}\n"));
    for sample in &projection.samples {
        out.push_str(&format!(
            "{:>8.2}  {:>18}\n",
            sample.time_years,
            format_usd(sample.balance)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_projection() -> Projection {
        Projection {
            samples: vec![
                ProjectionSample {
                    time_years: 0.0,
                    balance: 1_000.0,
                },
                ProjectionSample {
                    time_years: 0.5,
                    balance: 1_130.0,
                },
                ProjectionSample {
                    time_years: 1.0,
                    balance: 1_265.65,
                },
            ],
            result: ProjectionResult {
                final_balance: 1_265.65,
                total_contributions: 1_200.0,
                total_interest: 65.65,
            },
        }
    }

    #[test]
    fn format_currency_uses_two_decimals_without_grouping() {
        assert_eq!(format_currency(3_967.081_133_851), "$3967.08");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(1_234_567.891), "$1234567.89");
        assert_eq!(format_currency(-12.5), "$-12.50");
        assert_eq!(format_currency(f64::NAN), "$NaN");
    }

    #[test]
    fn format_usd_groups_thousands_and_leads_with_sign() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(999.999), "$1,000.00");
        assert_eq!(format_usd(1_234.5), "$1,234.50");
        assert_eq!(format_usd(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_usd(100_000.0), "$100,000.00");
        assert_eq!(format_usd(-12.5), "-$12.50");
        assert_eq!(format_usd(-0.001), "$0.00");
        assert_eq!(format_usd(f64::INFINITY), "$inf");
    }

    #[test]
    fn summary_formats_all_three_totals() {
        let summary = Summary::from_result(&small_projection().result);
        assert_eq!(
            summary.lines(),
            [
                "Total savings: $1265.65".to_string(),
                "Total deposits: $1200.00".to_string(),
                "Total interest: $65.65".to_string(),
            ]
        );
    }

    #[test]
    fn chart_series_keeps_sample_order_and_axis_titles() {
        let projection = small_projection();
        let chart = ChartSeries::from_samples(&projection.samples);

        assert_eq!(chart.label, "Total Savings");
        assert_eq!(chart.x_axis_title, "Years");
        assert_eq!(chart.y_axis_title, "Amount ($)");
        assert_eq!(chart.points.len(), 3);
        assert_eq!(chart.points[1], ChartPoint { x: 0.5, y: 1_130.0 });

        let json = serde_json::to_string(&chart).expect("chart should serialize");
        assert!(json.contains("\"xAxisTitle\":\"Years\""));
        assert!(json.contains("\"yAxisTitle\":\"Amount ($)\""));
        assert!(json.contains("{\"x\":0.0,\"y\":1000.0}"));
    }

    #[test]
    fn render_table_lists_summary_then_every_sample() {
        let table = render_table(&small_projection());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "Total savings: $1265.65");
        assert_eq!(lines[3], "");
        assert!(lines[4].contains("Years") && lines[4].contains("Amount ($)"));
        assert_eq!(lines.len(), 5 + 3);
        assert!(lines[5].trim_start().starts_with("0.00"));
        assert!(lines[5].ends_with("$1,000.00"));
        assert!(lines[7].trim_start().starts_with("1.00"));
        assert!(lines[7].ends_with("$1,265.65"));
    }
}
