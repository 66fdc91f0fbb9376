//! Correlation table rows and their display rules.

use crate::core::CorrelationResult;
use crate::core::constants::{palette, palette::Rgb, stats};

/// Color class of a correlation value in the table.
///
/// Differs from the chart's bar tone: the table only highlights strong values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrelationTier {
    StrongPositive,
    StrongNegative,
    Neutral,
}

impl CorrelationTier {
    pub fn color(self) -> Rgb {
        match self {
            CorrelationTier::StrongPositive => palette::POSITIVE,
            CorrelationTier::StrongNegative => palette::NEGATIVE,
            CorrelationTier::Neutral => palette::MUTED,
        }
    }
}

/// Tier boundaries are inclusive: 0.5 and -0.5 are strong.
pub fn correlation_tier(value: f64) -> CorrelationTier {
    if value >= stats::STRONG_CORRELATION {
        CorrelationTier::StrongPositive
    } else if value <= -stats::STRONG_CORRELATION {
        CorrelationTier::StrongNegative
    } else {
        CorrelationTier::Neutral
    }
}

/// Four decimals, or "< 0.001" for very small p-values.
pub fn format_p_value(p_value: f64) -> String {
    if p_value < stats::P_VALUE_FLOOR {
        "< 0.001".to_string()
    } else {
        format!("{p_value:.4}")
    }
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub metric: String,
    pub correlation: String,
    pub p_value: String,
    pub tier: CorrelationTier,
}

/// Rows in correlation order, metric names upper-cased, values to three decimals.
pub fn table_rows(result: &CorrelationResult) -> Vec<TableRow> {
    result
        .correlations
        .iter()
        .map(|(metric, &value)| TableRow {
            metric: metric.to_uppercase(),
            correlation: format!("{value:.3}"),
            p_value: format_p_value(result.p_value(metric)),
            tier: correlation_tier(value),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use std::collections::HashMap;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(correlation_tier(0.5), CorrelationTier::StrongPositive);
        assert_eq!(correlation_tier(-0.5), CorrelationTier::StrongNegative);
        assert_eq!(correlation_tier(0.3), CorrelationTier::Neutral);
        assert_eq!(correlation_tier(-0.3), CorrelationTier::Neutral);
        assert_eq!(correlation_tier(0.0), CorrelationTier::Neutral);
        assert_eq!(correlation_tier(1.7), CorrelationTier::StrongPositive);
    }

    #[test]
    fn test_tier_colors() {
        assert_eq!(CorrelationTier::StrongPositive.color(), (16, 185, 129));
        assert_eq!(CorrelationTier::StrongNegative.color(), (220, 38, 38));
        assert_eq!(CorrelationTier::Neutral.color(), (107, 114, 128));
    }

    #[test]
    fn test_format_p_value() {
        assert_eq!(format_p_value(0.0004), "< 0.001");
        assert_eq!(format_p_value(0.001), "0.0010");
        assert_eq!(format_p_value(0.0312), "0.0312");
        assert_eq!(format_p_value(1.0), "1.0000");
    }

    #[test]
    fn test_rows_follow_correlation_order() {
        let mut correlations = IndexMap::new();
        correlations.insert("volume".to_string(), -0.62);
        correlations.insert("price".to_string(), 0.1234);
        let mut p_values = HashMap::new();
        p_values.insert("volume".to_string(), 0.0001);
        let result = CorrelationResult {
            job_id: "corr_20250101_120000".to_string(),
            correlations,
            p_values,
            insights: vec![],
            sample_size: 30,
        };

        let rows = table_rows(&result);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].metric, "VOLUME");
        assert_eq!(rows[0].correlation, "-0.620");
        assert_eq!(rows[0].p_value, "< 0.001");
        assert_eq!(rows[0].tier, CorrelationTier::StrongNegative);
        // missing p-value
        assert_eq!(rows[1].p_value, "1.0000");
        assert_eq!(rows[1].tier, CorrelationTier::Neutral);
    }
}
