use crate::config::Config;
use log::{debug, error, info, warn};
use std::path::Path;

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    // A second initialization (tests, embedding) keeps the first logger
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .try_init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    info!(
        "Configuration: api={}, timeout={}s, limit={}",
        config.api_url(""),
        config.timeout_duration().as_secs(),
        config.results_limit()
    );
    info!(
        "Output: dir={}, prefix={}, format={}",
        config.output_dir().display(),
        config.filename_prefix(),
        config.output_format()
    );
}

/// Log the start of a gateway request
pub fn log_fetch_start(url: &str) {
    info!("Fetching {url}");
}

/// Log a result selected for rendering
pub fn log_result_loaded(job_id: &str, metrics: usize, insights: usize) {
    info!("Loaded result {job_id}: {metrics} metric(s), {insights} insight(s)");
}

/// Log report rendering completion
pub fn log_render_complete(pages: usize, bytes: usize, duration_ms: u128) {
    info!("Rendered {pages} page(s), {bytes} bytes ({duration_ms}ms)");
}

/// Log a saved report
pub fn log_report_saved<P: AsRef<Path>>(path: P) {
    info!("Report saved to {}", path.as_ref().display());
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}
