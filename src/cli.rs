use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "context-completion",
    version,
    about = "Complete and score socio-economic context across the phases of a historical event"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fill missing indicators and score every phase of an event
    Complete(CompleteCommand),
    /// Show the epoch reference table in effect
    Epochs(EpochsCommand),
    /// Check an event file and the config without running the pipeline
    Validate(ValidateCommand),
}

#[derive(Args)]
pub struct CompleteCommand {
    /// JSON event file
    pub input: PathBuf,
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ReportFormat,
    /// Directory holding context.toml
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
    /// Also write the JSON report into this directory
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Override completion.max_passes
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=10))]
    pub max_passes: Option<u32>,
}

#[derive(Args)]
pub struct EpochsCommand {
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
    /// Show only the snapshot this year resolves to
    #[arg(long, allow_hyphen_values = true)]
    pub year: Option<i64>,
}

#[derive(Args)]
pub struct ValidateCommand {
    pub input: PathBuf,
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
