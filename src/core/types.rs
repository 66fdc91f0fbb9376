use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::core::constants::{display, stats};
use crate::core::error::{ReportError, Result};

/// A correlation analysis result as returned by the analysis backend.
///
/// `correlations` keeps the backend's key order, which is the order used by
/// both the chart and the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub job_id: String,
    pub correlations: IndexMap<String, f64>,
    #[serde(default)]
    pub p_values: HashMap<String, f64>,
    #[serde(default)]
    pub insights: Vec<String>,
    pub sample_size: u64,
}

impl CorrelationResult {
    /// Decode a single result from JSON, mapping decode failures to `DataShape`.
    pub fn from_json(json: &str) -> Result<Self> {
        let result: CorrelationResult = serde_json::from_str(json)?;
        result.validate()?;
        Ok(result)
    }

    /// Check the fields the report depends on.
    ///
    /// Values outside [-1, 1] are accepted: the caller owns the domain.
    pub fn validate(&self) -> Result<()> {
        if self.job_id.trim().is_empty() {
            return Err(ReportError::DataShape("job_id is empty".to_string()));
        }

        for (metric, value) in &self.correlations {
            if metric.is_empty() {
                return Err(ReportError::DataShape(
                    "correlations contain an empty metric name".to_string(),
                ));
            }
            if !value.is_finite() {
                return Err(ReportError::DataShape(format!(
                    "correlation for '{metric}' is not a finite number"
                )));
            }
        }

        if let Some((metric, _)) = self.p_values.iter().find(|(_, p)| !p.is_finite()) {
            return Err(ReportError::DataShape(format!(
                "p-value for '{metric}' is not a finite number"
            )));
        }

        Ok(())
    }

    /// p-value for `metric`; a missing entry counts as not significant.
    pub fn p_value(&self, metric: &str) -> f64 {
        self.p_values
            .get(metric)
            .copied()
            .unwrap_or(stats::MISSING_P_VALUE)
    }

    /// Metrics whose p-value is strictly below the significance level, in report order.
    pub fn significant_metrics(&self) -> Vec<&str> {
        self.correlations
            .keys()
            .filter(|metric| is_significant(self.p_value(metric)))
            .map(String::as_str)
            .collect()
    }

    /// Metric with the largest absolute correlation (first one wins ties).
    pub fn strongest(&self) -> Option<(&str, f64)> {
        self.correlations
            .iter()
            .fold(None, |best: Option<(&str, f64)>, (metric, &value)| match best {
                Some((_, current)) if current.abs() >= value.abs() => best,
                _ => Some((metric.as_str(), value)),
            })
    }

    /// Leading characters of the job id used in listings.
    pub fn short_job_id(&self) -> String {
        self.job_id
            .chars()
            .take(display::JOB_ID_SHORT_LEN)
            .collect()
    }

    /// Metrics whose value lies outside the nominal [-1, 1] domain.
    pub fn out_of_domain(&self) -> Vec<&str> {
        self.correlations
            .iter()
            .filter(|(_, value)| value.abs() > 1.0)
            .map(|(metric, _)| metric.as_str())
            .collect()
    }
}

/// Significance uses a strict comparison: p = 0.05 is not significant.
pub fn is_significant(p_value: f64) -> bool {
    p_value < stats::SIGNIFICANCE_LEVEL
}

/// Listing envelope returned by the gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultsPage {
    #[serde(default)]
    pub results: Vec<CorrelationResult>,
}

/// Active worker payload returned by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkersResponse {
    pub active_workers: u32,
}

/// Active worker count shown on the cover page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveWorkers {
    Known(u32),
    /// Lookup failed; rendered as a neutral placeholder
    #[default]
    Unavailable,
}

impl fmt::Display for ActiveWorkers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveWorkers::Known(count) => write!(f, "{count}"),
            ActiveWorkers::Unavailable => write!(f, "n/a"),
        }
    }
}
