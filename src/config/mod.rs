//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use chrono::format::{Item, StrftimeItems};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::{defaults, output_formats, timeouts};
use crate::core::error::{ReportError, Result};
use crate::report::Branding;

static HTTP_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/]+").expect("url pattern is valid"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Gateway base URL, without the API prefix
    pub api_base_url: Option<String>,

    /// Path prefix of the versioned API
    pub api_prefix: Option<String>,

    /// Timeout in seconds for HTTP requests
    pub timeout: Option<u64>,

    /// Number of results requested when listing
    pub results_limit: Option<usize>,

    /// Directory reports are saved to
    pub output_dir: Option<String>,

    /// Report file name prefix, followed by part of the job id
    pub filename_prefix: Option<String>,

    /// Title printed in the header band
    pub product_name: Option<String>,

    /// Subtitle printed in the header band
    pub report_title: Option<String>,

    /// Left-hand footer text on every page
    pub copyright: Option<String>,

    /// chrono format string for the generation timestamp
    pub timestamp_format: Option<String>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// Output format (text, json)
    pub output_format: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Some(defaults::API_BASE_URL.to_string()),
            api_prefix: Some(defaults::API_PREFIX.to_string()),
            timeout: Some(timeouts::DEFAULT_TIMEOUT_SECONDS),
            results_limit: Some(defaults::RESULTS_LIMIT),
            output_dir: Some(defaults::OUTPUT_DIR.to_string()),
            filename_prefix: Some(defaults::FILENAME_PREFIX.to_string()),
            product_name: Some(defaults::PRODUCT_NAME.to_string()),
            report_title: Some(defaults::REPORT_TITLE.to_string()),
            copyright: Some(defaults::COPYRIGHT.to_string()),
            timestamp_format: Some(defaults::TIMESTAMP_FORMAT.to_string()),
            user_agent: None,
            output_format: Some(output_formats::DEFAULT.to_string()),
            verbose: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults for missing keys
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ReportError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content)?;

        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        if let Ok(config) = Self::load_from_file(defaults::CONFIG_FILE_NAME) {
            return config;
        }

        // Parent directories, up to 3 levels
        for i in 1..=3 {
            let path = format!("{}{}", "../".repeat(i), defaults::CONFIG_FILE_NAME);
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        if let Some(ref url) = cli_config.api_base_url {
            self.api_base_url = Some(url.clone());
        }
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(limit) = cli_config.results_limit {
            self.results_limit = Some(limit);
        }
        if let Some(ref dir) = cli_config.output_dir {
            self.output_dir = Some(dir.clone());
        }
        if cli_config.verbose {
            self.verbose = Some(true);
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(timeouts::DEFAULT_TIMEOUT_SECONDS))
    }

    /// Full URL of a gateway route, e.g. `api_url("/correlation/results")`
    pub fn api_url(&self, route: &str) -> String {
        let base = self
            .api_base_url
            .as_deref()
            .unwrap_or(defaults::API_BASE_URL)
            .trim_end_matches('/');
        let prefix = self
            .api_prefix
            .as_deref()
            .unwrap_or(defaults::API_PREFIX)
            .trim_end_matches('/');
        format!("{base}{prefix}{route}")
    }

    pub fn results_limit(&self) -> usize {
        self.results_limit.unwrap_or(defaults::RESULTS_LIMIT)
    }

    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(self.output_dir.as_deref().unwrap_or(defaults::OUTPUT_DIR))
    }

    pub fn filename_prefix(&self) -> &str {
        self.filename_prefix
            .as_deref()
            .unwrap_or(defaults::FILENAME_PREFIX)
    }

    pub fn timestamp_format(&self) -> &str {
        self.timestamp_format
            .as_deref()
            .unwrap_or(defaults::TIMESTAMP_FORMAT)
    }

    pub fn output_format(&self) -> &str {
        self.output_format
            .as_deref()
            .unwrap_or(output_formats::DEFAULT)
    }

    pub fn is_json(&self) -> bool {
        self.output_format() == output_formats::JSON
    }

    /// Strings printed on the report itself
    pub fn branding(&self) -> Branding {
        Branding {
            product_name: self
                .product_name
                .clone()
                .unwrap_or_else(|| defaults::PRODUCT_NAME.to_string()),
            report_title: self
                .report_title
                .clone()
                .unwrap_or_else(|| defaults::REPORT_TITLE.to_string()),
            copyright: self
                .copyright
                .clone()
                .unwrap_or_else(|| defaults::COPYRIGHT.to_string()),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err(ReportError::Config(
                    "Timeout cannot be 0. Expected a positive integer representing seconds."
                        .to_string(),
                ));
            }
            if timeout > timeouts::MAX_TIMEOUT_SECONDS {
                return Err(ReportError::Config(format!(
                    "Timeout of {timeout} seconds is extremely large (>24 hours). Consider using a smaller value."
                )));
            }
        }

        if let Some(limit) = self.results_limit
            && !(1..=defaults::MAX_RESULTS_LIMIT).contains(&limit)
        {
            return Err(ReportError::Config(format!(
                "Results limit {limit} is out of range. Expected a value between 1-{}.",
                defaults::MAX_RESULTS_LIMIT
            )));
        }

        if let Some(ref url) = self.api_base_url
            && !HTTP_URL.is_match(url)
        {
            return Err(ReportError::Config(format!(
                "API URL '{url}' must start with http:// or https:// followed by a host."
            )));
        }

        if let Some(ref prefix) = self.api_prefix
            && !prefix.is_empty()
            && !prefix.starts_with('/')
        {
            return Err(ReportError::Config(format!(
                "API prefix '{prefix}' must start with '/'."
            )));
        }

        if let Some(ref prefix) = self.filename_prefix
            && prefix.trim().is_empty()
        {
            return Err(ReportError::Config(
                "Filename prefix cannot be empty.".to_string(),
            ));
        }

        for (name, value) in [
            ("product_name", &self.product_name),
            ("report_title", &self.report_title),
        ] {
            if let Some(text) = value
                && text.trim().is_empty()
            {
                return Err(ReportError::Config(format!("{name} cannot be empty.")));
            }
        }

        if let Some(ref format) = self.timestamp_format
            && StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
        {
            return Err(ReportError::Config(format!(
                "Invalid timestamp format '{format}'."
            )));
        }

        if let Some(ref format) = self.output_format {
            match format.as_str() {
                f if output_formats::ALL.contains(&f) => {}
                _ => {
                    return Err(ReportError::Config(format!(
                        "Invalid output format '{format}'. Expected one of: {}.",
                        output_formats::ALL.join(", ")
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    pub api_base_url: Option<String>,  // --api-url
    pub timeout: Option<u64>,          // --timeout
    pub results_limit: Option<usize>,  // list --limit
    pub output_dir: Option<String>,    // export --output-dir
    pub quiet: bool,                   // --quiet
    pub verbose: bool,                 // --verbose
    pub output_format: Option<String>, // --format
    pub config_file: Option<String>,   // --config
    pub no_config: bool,               // --no-config
}
