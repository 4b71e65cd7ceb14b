pub mod json;
pub mod md;

use crate::error::{ContextError, Result};
use crate::types::report::CompletionReport;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(report: &CompletionReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(ContextError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}

/// Write the report as a timestamped JSON artifact under `dir`.
pub fn write_artifact(dir: &Path, report: &CompletionReport) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(ContextError::Io)?;
    let stamp = Utc::now().format("%Y%m%dT%H%M%SZ");
    let out_path = dir.join(format!("completion-{stamp}.json"));
    let json = json::to_json(report)?;
    fs::write(&out_path, json).map_err(ContextError::Io)?;
    tracing::info!(path = %out_path.display(), "wrote completion artifact");
    Ok(out_path)
}
