// Command-line interface definitions and parsing for correlation-report

use crate::api::ResultSelector;
use crate::config::CliConfig;
use crate::core::constants::{output_formats, timeouts};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    // Gateway
    /// Gateway base URL (default: http://localhost:8000)
    #[arg(long, value_name = "URL", global = true, help_heading = "Gateway")]
    pub api_url: Option<String>,

    /// Request timeout in seconds (default: 30)
    #[arg(
        short = 't',
        long,
        value_name = "SECONDS",
        global = true,
        help_heading = "Gateway"
    )]
    pub timeout: Option<u64>,

    // Output & Verbosity
    /// Suppress notifications and progress
    #[arg(short = 'q', long, global = true, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Output format
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, global = true, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", global = true, help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, global = true, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List stored correlation results
    List {
        /// Number of results to request (default: 20)
        #[arg(long, value_name = "COUNT")]
        limit: Option<usize>,
    },
    /// Render a result as a PDF report
    Export {
        /// Job id of the result (default: latest)
        #[arg(value_name = "JOB_ID", conflicts_with_all = ["index", "input"])]
        job_id: Option<String>,

        /// 1-based position in the listing
        #[arg(long, value_name = "N", conflicts_with = "input")]
        index: Option<usize>,

        /// Read the result from a JSON file instead of the gateway
        #[arg(long, value_name = "FILE")]
        input: Option<String>,

        /// Directory to save the report in (default: current directory)
        #[arg(short = 'o', long, value_name = "DIR")]
        output_dir: Option<String>,
    },
    /// Delete a stored result
    Delete {
        /// Job id of the result
        #[arg(value_name = "JOB_ID")]
        job_id: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Generate shell completions
    #[command(name = "completion-generate", arg_required_else_help = true)]
    CompletionGenerate {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Commands {
    /// Result selector for `export`, `None` for other commands or file input.
    pub fn selector(&self) -> Option<ResultSelector> {
        match self {
            Commands::Export { input: Some(_), .. } => None,
            Commands::Export {
                job_id: Some(job_id),
                ..
            } => Some(ResultSelector::JobId(job_id.clone())),
            Commands::Export {
                index: Some(index), ..
            } => Some(ResultSelector::Index(*index)),
            Commands::Export { .. } => Some(ResultSelector::Latest),
            _ => None,
        }
    }
}

/// Convert parsed arguments into the overrides applied on top of file config
pub fn cli_to_config(cli: &Cli) -> Result<CliConfig, String> {
    let mut cli_config = CliConfig::default();

    if let Some(timeout) = cli.timeout {
        if timeout == 0 {
            return Err(
                "Timeout cannot be 0. Expected a positive integer representing seconds."
                    .to_string(),
            );
        }
        if timeout > timeouts::MAX_TIMEOUT_SECONDS {
            return Err(format!(
                "Timeout of {timeout} seconds is extremely large (>24 hours)."
            ));
        }
        cli_config.timeout = Some(timeout);
    }

    cli_config.api_base_url = cli.api_url.clone();
    cli_config.quiet = cli.quiet;
    cli_config.verbose = cli.verbose;
    cli_config.output_format = cli.format.clone();
    cli_config.config_file = cli.config.clone();
    cli_config.no_config = cli.no_config;

    match &cli.command {
        Commands::List { limit } => {
            if *limit == Some(0) {
                return Err("Limit must be at least 1.".to_string());
            }
            cli_config.results_limit = *limit;
        }
        Commands::Export { output_dir, .. } => {
            cli_config.output_dir = output_dir.clone();
        }
        _ => {}
    }

    Ok(cli_config)
}
