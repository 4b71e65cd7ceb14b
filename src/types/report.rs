use crate::types::config::EngineSettings;
use crate::types::phase::ContextCompletion;
use crate::types::scoring::ScoreWeights;
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Serialize)]
pub struct ReportSettings {
    pub weights: ScoreWeights,
    pub max_passes: u32,
    pub trend_relation: f64,
}

impl From<&EngineSettings> for ReportSettings {
    fn from(settings: &EngineSettings) -> Self {
        Self {
            weights: settings.weights,
            max_passes: settings.max_passes,
            trend_relation: settings.trend_relation,
        }
    }
}

/// A completion result plus what is needed to reproduce it.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionReport {
    pub version: String,
    pub generated_at: String,
    pub input_sha256: String,
    pub settings: ReportSettings,
    pub completion: ContextCompletion,
}

impl CompletionReport {
    pub fn new(completion: ContextCompletion, settings: &EngineSettings, input: &[u8]) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now().to_rfc3339(),
            input_sha256: sha256_hex(input),
            settings: settings.into(),
            completion,
        }
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{digest:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_lowercase_hex_sha256() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
