mod cli;

use clap::Parser;
use context_completion::completion::{self, CompletionRequest};
use context_completion::config;
use context_completion::epoch::EpochTable;
use context_completion::error::{ContextError, Result};
use context_completion::report;
use context_completion::types::config::EngineSettings;
use context_completion::types::indicator::Indicator;
use context_completion::types::report::CompletionReport;
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const INVALID_INPUT: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_engine(root: &Path) -> Result<(EngineSettings, EpochTable)> {
    if !root.exists() {
        return Err(ContextError::PathNotFound(root.display().to_string()));
    }
    let loaded = config::load_config(root)?;
    if loaded.is_none() {
        tracing::info!(root = %root.display(), "no context.toml found, using built-in defaults");
    }
    let cfg = loaded.unwrap_or_default();
    Ok((cfg.settings(), cfg.epoch_table()?))
}

fn read_request(input: &Path) -> Result<(Vec<u8>, CompletionRequest)> {
    if !input.exists() {
        return Err(ContextError::PathNotFound(input.display().to_string()));
    }
    let bytes = std::fs::read(input)?;
    let document: serde_json::Value = serde_json::from_slice(&bytes).map_err(|e| {
        ContextError::InvalidPhaseData(format!("{}: {}", input.display(), e))
    })?;
    let request = CompletionRequest::from_json(&document)?;
    Ok((bytes, request))
}

fn run(cli: cli::Cli) -> Result<i32> {
    match cli.command {
        cli::Commands::Complete(cmd) => {
            let (mut settings, epochs) = load_engine(&cmd.root)?;
            if let Some(max_passes) = cmd.max_passes {
                settings.max_passes = max_passes;
            }
            let (bytes, request) = read_request(&cmd.input)?;
            let completion = completion::complete(&request, &epochs, &settings)?;
            let completion_report = CompletionReport::new(completion, &settings, &bytes);

            let output_format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
            };
            let rendered = report::render(&completion_report, output_format)?;
            println!("{rendered}");

            if let Some(dir) = &cmd.out {
                let path = report::write_artifact(dir, &completion_report)?;
                eprintln!("report file: {}", path.display());
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Epochs(cmd) => {
            let (_, epochs) = load_engine(&cmd.root)?;
            if let Some(year) = cmd.year {
                let entry = epochs.resolve(year);
                println!("{year}: {}", entry.name);
                for indicator in Indicator::ALL {
                    if let Some(value) = entry.values.get(&indicator) {
                        println!("  {indicator} = {value}");
                    }
                }
                return Ok(exit_code::SUCCESS);
            }

            for entry in epochs.entries() {
                println!("{} ({} - {})", entry.name, entry.start_year, entry.end_year);
            }
            println!("{} (fallback)", epochs.fallback().name);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Validate(cmd) => {
            load_engine(&cmd.root)?;
            let (_, request) = read_request(&cmd.input)?;
            let supplied = request
                .phases
                .values()
                .map(|values| values.len())
                .sum::<usize>();
            println!(
                "valid: event {} - {}, {} supplied indicator value(s)",
                request.start_year, request.end_year, supplied
            );
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            let code = if e.is_structural() {
                exit_code::INVALID_INPUT
            } else {
                exit_code::RUNTIME_FAILURE
            };
            std::process::exit(code);
        }
    }
}
