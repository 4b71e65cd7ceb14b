use crate::epoch::{EpochEntry, EpochTable, Snapshot};
use crate::error::ContextError;
use crate::types::indicator::Indicator;
use crate::types::scoring::ScoreWeights;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

pub const DEFAULT_MAX_PASSES: u32 = 3;
pub const MAX_PASSES_LIMIT: u32 = 10;
pub const DEFAULT_TREND_RELATION: f64 = 1.0;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContextConfig {
    pub scoring: Option<ScoringConfig>,
    pub completion: Option<CompletionConfig>,
    #[serde(default)]
    pub epochs: Vec<EpochConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    pub weights: Option<HashMap<String, f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionConfig {
    pub max_passes: Option<u32>,
    pub trend_relation: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EpochConfig {
    pub name: String,
    pub start_year: i64,
    pub end_year: i64,
    #[serde(default)]
    pub values: BTreeMap<String, f64>,
}

/// Validated runtime knobs for one completion run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    pub weights: ScoreWeights,
    pub max_passes: u32,
    pub trend_relation: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            max_passes: DEFAULT_MAX_PASSES,
            trend_relation: DEFAULT_TREND_RELATION,
        }
    }
}

const ALLOWED_WEIGHT_KEYS: [&str; 4] = [
    "historical_epoch",
    "social_range",
    "age_range",
    "population_range",
];

impl ContextConfig {
    pub fn weights(&self) -> ScoreWeights {
        let defaults = ScoreWeights::default();
        match self.scoring.as_ref().and_then(|scoring| scoring.weights.as_ref()) {
            Some(weights) => ScoreWeights {
                historical_epoch: *weights
                    .get("historical_epoch")
                    .unwrap_or(&defaults.historical_epoch),
                social_range: *weights.get("social_range").unwrap_or(&defaults.social_range),
                age_range: *weights.get("age_range").unwrap_or(&defaults.age_range),
                population_range: *weights
                    .get("population_range")
                    .unwrap_or(&defaults.population_range),
            },
            None => defaults,
        }
    }

    pub fn settings(&self) -> EngineSettings {
        let completion = self.completion.as_ref();
        EngineSettings {
            weights: self.weights(),
            max_passes: completion
                .and_then(|completion| completion.max_passes)
                .unwrap_or(DEFAULT_MAX_PASSES),
            trend_relation: completion
                .and_then(|completion| completion.trend_relation)
                .unwrap_or(DEFAULT_TREND_RELATION),
        }
    }

    /// Configured epochs replace the built-in entries; the fallback is kept.
    pub fn epoch_table(&self) -> Result<EpochTable, ContextError> {
        if self.epochs.is_empty() {
            return Ok(EpochTable::builtin());
        }
        let entries = self
            .epochs
            .iter()
            .map(epoch_entry)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(EpochTable::new(entries, EpochTable::contemporary_default()))
    }

    pub fn validate(&self) -> Result<(), ContextError> {
        if let Some(weights) = self.scoring.as_ref().and_then(|scoring| scoring.weights.as_ref())
        {
            let mut unknown = weights
                .keys()
                .filter(|key| !ALLOWED_WEIGHT_KEYS.contains(&key.as_str()))
                .cloned()
                .collect::<Vec<_>>();
            if !unknown.is_empty() {
                unknown.sort();
                return Err(ContextError::ConfigParse(format!(
                    "scoring.weights contains unknown key(s): {}",
                    unknown.join(", ")
                )));
            }
            if weights
                .values()
                .any(|weight| !weight.is_finite() || *weight < 0.0)
            {
                return Err(ContextError::ConfigParse(
                    "scoring.weights values must be finite and non-negative".to_string(),
                ));
            }
        }

        if let Some(completion) = &self.completion {
            if let Some(max_passes) = completion.max_passes {
                if max_passes > MAX_PASSES_LIMIT {
                    return Err(ContextError::ConfigParse(format!(
                        "completion.max_passes must be at most {MAX_PASSES_LIMIT} (found {max_passes})"
                    )));
                }
            }
            if let Some(trend_relation) = completion.trend_relation {
                if !trend_relation.is_finite() {
                    return Err(ContextError::ConfigParse(
                        "completion.trend_relation must be a finite number".to_string(),
                    ));
                }
            }
        }

        for epoch in &self.epochs {
            epoch_entry(epoch)?;
        }

        Ok(())
    }
}

fn epoch_entry(epoch: &EpochConfig) -> Result<EpochEntry, ContextError> {
    let name = epoch.name.trim();
    if name.is_empty() {
        return Err(ContextError::ConfigParse(
            "epochs entries must have a non-empty name".to_string(),
        ));
    }
    if epoch.start_year > epoch.end_year {
        return Err(ContextError::ConfigParse(format!(
            "epoch '{name}' starts after it ends ({} > {})",
            epoch.start_year, epoch.end_year
        )));
    }

    let mut values = Snapshot::new();
    for (key, value) in &epoch.values {
        let indicator = Indicator::from_name(key).ok_or_else(|| {
            ContextError::ConfigParse(format!("epoch '{name}' has unknown indicator: {key}"))
        })?;
        if !value.is_finite() {
            return Err(ContextError::ConfigParse(format!(
                "epoch '{name}' value for {key} must be finite"
            )));
        }
        values.insert(indicator, *value);
    }

    let missing = Indicator::ALL
        .iter()
        .filter(|indicator| !values.contains_key(indicator))
        .map(|indicator| indicator.name())
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        return Err(ContextError::ConfigParse(format!(
            "epoch '{name}' is missing indicator(s): {}",
            missing.join(", ")
        )));
    }

    Ok(EpochEntry::new(name, epoch.start_year, epoch.end_year, values))
}
