//! Notifications and listings printed by correlation-report

use serde_json::json;
use std::path::Path;

use crate::core::CorrelationResult;
use crate::core::constants::display;
use crate::export::RenderedReport;
use crate::ui::color::{Colors, colorize, paint_correlation};

/// Success notification for a saved report
pub fn export_success_text(report: &RenderedReport, path: &Path) -> String {
    format!(
        "{} {} {}\n   {} {} page(s), {} significant metric(s)",
        display::SUCCESS_EMOJI,
        colorize("PDF report saved to", Colors::GREEN),
        colorize(&path.display().to_string(), Colors::BOLD),
        display::REPORT_EMOJI,
        report.page_count,
        report.significant_metrics.len()
    )
}

pub fn export_success_json(report: &RenderedReport, path: &Path) -> String {
    json!({
        "status": "success",
        "path": path.display().to_string(),
        "pages": report.page_count,
        "job_id": report.job_id,
        "significant_metrics": report.significant_metrics,
    })
    .to_string()
}

/// The single failure notification; details stay in the log
pub fn failure_text(message: &str) -> String {
    format!(
        "{} {}",
        display::ERROR_EMOJI,
        colorize(message, Colors::RED)
    )
}

pub fn failure_json(message: &str) -> String {
    json!({ "status": "failure", "message": message }).to_string()
}

pub fn warning_text(message: &str) -> String {
    format!(
        "{} {}",
        display::WARNING_EMOJI,
        colorize(message, Colors::YELLOW)
    )
}

pub fn delete_success_text(job_id: &str) -> String {
    format!(
        "{} {} {}",
        display::SUCCESS_EMOJI,
        colorize("Deleted result", Colors::GREEN),
        colorize(job_id, Colors::BOLD)
    )
}

pub fn delete_success_json(job_id: &str) -> String {
    json!({ "status": "success", "deleted": job_id }).to_string()
}

/// One line per result: sequence, short job id, sample size, metric count, strongest value
pub fn results_table_text(results: &[CorrelationResult]) -> String {
    if results.is_empty() {
        return colorize("No stored results", Colors::DIM);
    }

    let mut lines = vec![colorize(
        &format!(
            "{:>4}  {:<8}  {:>7}  {:>7}  {}",
            "#", "JOB", "SAMPLE", "METRICS", "STRONGEST"
        ),
        Colors::BOLD,
    )];

    for (index, result) in results.iter().enumerate() {
        let strongest = match result.strongest() {
            Some((metric, value)) => format!(
                "{} {}",
                colorize(metric, Colors::BLUE),
                paint_correlation(value)
            ),
            None => colorize("-", Colors::DIM),
        };
        lines.push(format!(
            "{:>4}  {:<8}  {:>7}  {:>7}  {}",
            index + 1,
            result.short_job_id(),
            result.sample_size,
            result.correlations.len(),
            strongest
        ));
    }

    lines.join("\n")
}

pub fn results_table_json(results: &[CorrelationResult]) -> String {
    let entries: Vec<_> = results
        .iter()
        .enumerate()
        .map(|(index, result)| {
            json!({
                "sequence": index + 1,
                "job_id": result.job_id,
                "sample_size": result.sample_size,
                "metrics": result.correlations.len(),
                "insights": result.insights.len(),
                "significant_metrics": result.significant_metrics(),
            })
        })
        .collect();
    json!({ "results": entries }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn report() -> RenderedReport {
        RenderedReport {
            filename: "R_20250101.pdf".to_string(),
            bytes: vec![],
            page_count: 2,
            job_id: "corr_20250101_120000".to_string(),
            significant_metrics: vec!["price".to_string()],
            out_of_domain_metrics: vec![],
        }
    }

    fn result() -> CorrelationResult {
        let mut correlations = IndexMap::new();
        correlations.insert("price".to_string(), 0.2);
        correlations.insert("volume".to_string(), -0.8);
        CorrelationResult {
            job_id: "corr_20250101_120000".to_string(),
            correlations,
            p_values: HashMap::new(),
            insights: vec!["x".to_string()],
            sample_size: 30,
        }
    }

    #[test]
    fn test_export_success_text() {
        let text = export_success_text(&report(), &PathBuf::from("/tmp/R_20250101.pdf"));
        assert!(text.contains("PDF report saved to"));
        assert!(text.contains("/tmp/R_20250101.pdf"));
        assert!(text.contains("2 page(s)"));
    }

    #[test]
    fn test_export_success_json() {
        let out = export_success_json(&report(), &PathBuf::from("/tmp/R.pdf"));
        let value: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(value["status"], "success");
        assert_eq!(value["pages"], 2);
        assert_eq!(value["job_id"], "corr_20250101_120000");
        assert_eq!(value["significant_metrics"][0], "price");
    }

    #[test]
    fn test_failure_notifications_have_no_detail() {
        assert!(failure_text("Could not generate the PDF report").ends_with("Could not generate the PDF report"));
        let value: serde_json::Value =
            serde_json::from_str(&failure_json("Could not generate the PDF report"))
                .expect("valid json");
        assert_eq!(value["status"], "failure");
    }

    #[test]
    fn test_results_table_text() {
        let text = results_table_text(&[result()]);
        assert!(text.contains("corr_202"));
        assert!(text.contains("volume -0.800"));
        assert!(!text.contains("corr_20250101_120000"));
    }

    #[test]
    fn test_results_table_empty() {
        assert_eq!(results_table_text(&[]), "No stored results");
    }

    #[test]
    fn test_results_table_json() {
        let value: serde_json::Value =
            serde_json::from_str(&results_table_json(&[result()])).expect("valid json");
        assert_eq!(value["results"][0]["sequence"], 1);
        assert_eq!(value["results"][0]["metrics"], 2);
        assert_eq!(value["results"][0]["significant_metrics"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn test_warning_text() {
        assert!(warning_text("values outside [-1, 1]: x").ends_with("values outside [-1, 1]: x"));
    }

    #[test]
    fn test_delete_notifications() {
        assert!(delete_success_text("corr_1").contains("corr_1"));
        assert!(delete_success_json("corr_1").contains("\"deleted\":\"corr_1\""));
    }
}
