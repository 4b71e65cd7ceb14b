use crate::types::indicator::Dimension;
use serde::Serialize;

pub type Score = f64;

/// One weight per dimension. Weights need not sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreWeights {
    pub historical_epoch: f64,
    pub social_range: f64,
    pub age_range: f64,
    pub population_range: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            historical_epoch: 0.30,
            social_range: 0.25,
            age_range: 0.20,
            population_range: 0.25,
        }
    }
}

impl ScoreWeights {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::HistoricalEpoch => self.historical_epoch,
            Dimension::SocialRange => self.social_range,
            Dimension::AgeRange => self.age_range,
            Dimension::PopulationRange => self.population_range,
        }
    }

    pub fn sum(&self) -> f64 {
        Dimension::ALL.iter().map(|dimension| self.get(*dimension)).sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DimensionScores {
    pub historical_epoch: Score,
    pub social_range: Score,
    pub age_range: Score,
    pub population_range: Score,
}

impl DimensionScores {
    pub fn get(&self, dimension: Dimension) -> Score {
        match dimension {
            Dimension::HistoricalEpoch => self.historical_epoch,
            Dimension::SocialRange => self.social_range,
            Dimension::AgeRange => self.age_range,
            Dimension::PopulationRange => self.population_range,
        }
    }

    pub fn set(&mut self, dimension: Dimension, score: Score) {
        match dimension {
            Dimension::HistoricalEpoch => self.historical_epoch = score,
            Dimension::SocialRange => self.social_range = score,
            Dimension::AgeRange => self.age_range = score,
            Dimension::PopulationRange => self.population_range = score,
        }
    }
}
