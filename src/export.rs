//! End-to-end report generation and saving.
//!
//! Everything up to the final rename happens in memory, so a failure at any
//! step leaves nothing behind in the output directory.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, TimeZone};
use tempfile::NamedTempFile;

use crate::api::{AnalysisSource, ResultSelector, resolve_active_workers, select_result};
use crate::chart::ChartRasterizer;
use crate::config::Config;
use crate::core::{CorrelationResult, ReportError, Result};
use crate::logging::{log_render_complete, log_report_saved, log_result_loaded};
use crate::report::{ReportComposer, ReportContext, render_pdf, stamp_footers};

/// Offset and length of the job id slice used in file names.
const JOB_ID_SLICE_START: usize = 5;
const JOB_ID_SLICE_LEN: usize = 8;

/// `<prefix>_<job id characters 5..13>.pdf`.
///
/// Short ids use whatever exists past offset 5; ids with nothing past the
/// offset are used whole.
pub fn report_filename(prefix: &str, job_id: &str) -> String {
    let slice: String = job_id
        .chars()
        .skip(JOB_ID_SLICE_START)
        .take(JOB_ID_SLICE_LEN)
        .collect();
    let stem = if slice.is_empty() { job_id } else { slice.as_str() };
    let stem: String = stem
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{prefix}_{stem}.pdf")
}

/// Generation timestamp as printed in the header band.
pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(format).to_string()
}

/// A fully encoded report ready to be saved.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub job_id: String,
    pub significant_metrics: Vec<String>,
    /// Metrics whose correlation lies outside [-1, 1]
    pub out_of_domain_metrics: Vec<String>,
}

/// Rasterize, compose, stamp footers and encode, all in memory.
pub fn generate_report(
    result: &CorrelationResult,
    context: &ReportContext,
    config: &Config,
) -> Result<RenderedReport> {
    let started = Instant::now();
    result.validate()?;

    let chart = ChartRasterizer::new().render(&result.correlations)?;
    let branding = config.branding();
    let copyright = branding.copyright.clone();
    let mut document = ReportComposer::new(branding).compose(result, chart, context)?;
    stamp_footers(&mut document, &copyright)?;
    let bytes = render_pdf(&document)?;

    log_render_complete(
        document.page_count(),
        bytes.len(),
        started.elapsed().as_millis(),
    );

    Ok(RenderedReport {
        filename: report_filename(config.filename_prefix(), &result.job_id),
        bytes,
        page_count: document.page_count(),
        job_id: result.job_id.clone(),
        significant_metrics: result
            .significant_metrics()
            .into_iter()
            .map(String::from)
            .collect(),
        out_of_domain_metrics: result.out_of_domain().into_iter().map(String::from).collect(),
    })
}

/// Write `bytes` to `dir/filename` through a temporary file and a rename.
pub fn save_atomically(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
    if filename.is_empty() || filename.contains(['/', '\\']) {
        return Err(ReportError::InvalidArgument(format!(
            "'{filename}' is not a plain file name"
        )));
    }
    if !dir.is_dir() {
        return Err(ReportError::InvalidArgument(format!(
            "output directory '{}' does not exist",
            dir.display()
        )));
    }

    let target = dir.join(filename);
    let mut staging = NamedTempFile::new_in(dir)?;
    staging.write_all(bytes)?;
    staging.as_file().sync_all()?;
    staging.persist(&target).map_err(|e| ReportError::Io(e.error))?;
    Ok(target)
}

/// Read a single result from a JSON file, as exported by the backend.
pub fn load_result_file(path: &Path) -> Result<CorrelationResult> {
    let json = std::fs::read_to_string(path)?;
    CorrelationResult::from_json(&json)
}

/// Where the result to export comes from.
pub enum ResultOrigin<'a> {
    Gateway(&'a (dyn AnalysisSource + Sync), ResultSelector),
    /// A result already in hand, with its sequence number
    Loaded(CorrelationResult, usize, Option<&'a (dyn AnalysisSource + Sync)>),
}

/// Fetch (or take) a result, resolve the worker count, render and save.
///
/// The active worker lookup is best effort; every other failure aborts before
/// anything is written.
pub async fn export_report(
    origin: ResultOrigin<'_>,
    config: &Config,
    generated_at: String,
) -> Result<(RenderedReport, PathBuf)> {
    let (sequence, result, source) = match origin {
        ResultOrigin::Gateway(source, selector) => {
            let results = source.fetch_results(config.results_limit()).await?;
            let (sequence, result) = select_result(results, &selector)?;
            (sequence, result, Some(source))
        }
        ResultOrigin::Loaded(result, sequence, source) => (sequence, result, source),
    };
    log_result_loaded(
        &result.job_id,
        result.correlations.len(),
        result.insights.len(),
    );

    let active_workers = match source {
        Some(source) => resolve_active_workers(source).await,
        None => Default::default(),
    };
    let context = ReportContext {
        sequence,
        active_workers,
        generated_at,
    };

    let report = generate_report(&result, &context, config)?;
    let path = save_atomically(&config.output_dir(), &report.filename, &report.bytes)?;
    log_report_saved(&path);
    Ok((report, path))
}
