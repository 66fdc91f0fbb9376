use clap::Parser;
use correlation_report::api::{AnalysisSource, GatewayClient, ResultSelector};
use correlation_report::config::{CliConfig, Config};
use correlation_report::core::ReportError;
use correlation_report::core::constants::output_formats;
use correlation_report::export::{
    self, RenderedReport, ResultOrigin, format_timestamp, load_result_file,
};
use correlation_report::logging;
use correlation_report::ui::output;
use correlation_report::ui::{completion_script, confirm_delete};
use correlation_report::ui::{Cli, Commands, ProgressReporter, cli_to_config};

use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Handle completion commands first
    if let Some(exit_code) = handle_completion_commands(&cli) {
        std::process::exit(exit_code);
    }

    match run_command(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle completion commands and return exit code if a completion command was processed
pub fn handle_completion_commands(cli: &Cli) -> Option<i32> {
    match cli.command {
        Commands::CompletionGenerate { shell } => match completion_script(shell) {
            Ok(script) => {
                print!("{script}");
                Some(0)
            }
            Err(e) => {
                eprintln!("Error: {e}");
                Some(1)
            }
        },
        _ => None,
    }
}

/// Dispatch a subcommand, extracted from main() for testing
pub async fn run_command(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli)?;
    let config = load_and_merge_config(&cli_config)?;

    let output_settings = setup_output_settings(&cli_config, &config);
    logging::init_logger(output_settings.verbose, output_settings.quiet);
    logging::log_config_info(&config);

    match &cli.command {
        Commands::List { .. } => run_list(&config, &output_settings).await,
        Commands::Export { input, .. } => {
            let origin = input.as_deref().map(Path::new);
            Ok(run_export(cli, origin, &config, &output_settings).await)
        }
        Commands::Delete { job_id, yes } => {
            run_delete(job_id, *yes, &config, &output_settings).await
        }
        Commands::CompletionGenerate { .. } => Ok(0),
    }
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

/// Settings for output formatting and display
pub struct OutputSettings {
    pub quiet: bool,
    pub verbose: bool,
    pub output_format: String,
    pub show_progress: bool,
}

impl OutputSettings {
    pub fn is_json(&self) -> bool {
        self.output_format == output_formats::JSON
    }
}

/// Setup output settings based on CLI and config
pub fn setup_output_settings(cli_config: &CliConfig, config: &Config) -> OutputSettings {
    let quiet = cli_config.quiet;
    let verbose = config.verbose.unwrap_or(false);
    let output_format = config.output_format().to_string();
    let show_progress = !quiet && !config.is_json();

    OutputSettings {
        quiet,
        verbose,
        output_format,
        show_progress,
    }
}

/// Print the stored results
pub async fn run_list(
    config: &Config,
    settings: &OutputSettings,
) -> Result<i32, Box<dyn std::error::Error>> {
    let client = GatewayClient::new(config)?;
    let results = client
        .fetch_results(config.results_limit())
        .await
        .inspect_err(|e| logging::log_error("Could not list results", Some(e)))?;

    if settings.is_json() {
        println!("{}", output::results_table_json(&results));
    } else if !settings.quiet {
        println!("{}", output::results_table_text(&results));
    }
    Ok(0)
}

/// Render one result to a PDF; failures print one generic notification
pub async fn run_export(
    cli: &Cli,
    input: Option<&Path>,
    config: &Config,
    settings: &OutputSettings,
) -> i32 {
    let mut progress = ProgressReporter::new(settings.show_progress);
    let generated_at = format_timestamp(&chrono::Local::now(), config.timestamp_format());

    let outcome = fetch_and_export(cli, input, config, generated_at, &mut progress).await;
    progress.finish();

    match outcome {
        Ok((report, path)) => {
            if settings.is_json() {
                println!("{}", output::export_success_json(&report, &path));
            } else if !settings.quiet {
                println!("{}", output::export_success_text(&report, &path));
                if !report.out_of_domain_metrics.is_empty() {
                    eprintln!(
                        "{}",
                        output::warning_text(&format!(
                            "Correlations outside [-1, 1] were drawn unclamped: {}",
                            report.out_of_domain_metrics.join(", ")
                        ))
                    );
                }
            }
            0
        }
        Err(e) => {
            logging::log_error("Report generation failed", Some(&e));
            if settings.is_json() {
                println!("{}", output::failure_json(e.user_message()));
            } else {
                eprintln!("{}", output::failure_text(e.user_message()));
            }
            1
        }
    }
}

async fn fetch_and_export(
    cli: &Cli,
    input: Option<&Path>,
    config: &Config,
    generated_at: String,
    progress: &mut ProgressReporter,
) -> Result<(RenderedReport, PathBuf), ReportError> {
    let client = GatewayClient::new(config)?;
    let origin = match input {
        Some(path) => {
            progress.step("Reading result...");
            ResultOrigin::Loaded(load_result_file(path)?, 1, Some(&client))
        }
        None => {
            progress.step("Fetching results...");
            let selector = cli.command.selector().unwrap_or(ResultSelector::Latest);
            ResultOrigin::Gateway(&client, selector)
        }
    };
    progress.step("Rendering report...");
    export::export_report(origin, config, generated_at).await
}

/// Delete a stored result after confirmation
pub async fn run_delete(
    job_id: &str,
    assume_yes: bool,
    config: &Config,
    settings: &OutputSettings,
) -> Result<i32, Box<dyn std::error::Error>> {
    if !confirm_delete(job_id, assume_yes)? {
        if !settings.quiet {
            eprintln!("{}", output::warning_text("Deletion cancelled"));
        }
        return Ok(0);
    }

    let client = GatewayClient::new(config)?;
    client
        .delete_result(job_id)
        .await
        .inspect_err(|e| logging::log_error(&format!("Could not delete '{job_id}'"), Some(e)))?;

    if settings.is_json() {
        println!("{}", output::delete_success_json(job_id));
    } else if !settings.quiet {
        println!("{}", output::delete_success_text(job_id));
    }
    Ok(0)
}
