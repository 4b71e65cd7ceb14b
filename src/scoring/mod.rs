pub mod normalize;

use crate::types::indicator::Dimension;
use crate::types::phase::IndicatorMap;
use crate::types::scoring::{DimensionScores, Score, ScoreWeights};

pub use normalize::{clamp_to_domain, normalize};

/// Mean of the normalized indicators of `dimension` that carry a finite raw
/// value; 0 when none do.
pub fn aggregate_dimension(dimension: Dimension, indicators: &IndicatorMap) -> Score {
    let normalized = indicators
        .iter()
        .filter(|(indicator, _)| indicator.dimension() == dimension)
        .map(|(indicator, value)| (indicator.domain(), value.value()))
        .filter(|(_, raw)| raw.is_finite())
        .map(|(domain, raw)| normalize(Some(raw), domain))
        .collect::<Vec<_>>();

    if normalized.is_empty() {
        return 0.0;
    }
    normalized.iter().sum::<f64>() / normalized.len() as f64
}

pub fn dimension_scores(indicators: &IndicatorMap) -> DimensionScores {
    let mut scores = DimensionScores::default();
    for dimension in Dimension::ALL {
        scores.set(dimension, aggregate_dimension(dimension, indicators));
    }
    scores
}

/// Weighted mean of the dimension values. A zero (or non-positive) weight
/// sum yields 0 instead of dividing.
pub fn compute_score(dimensions: &DimensionScores, weights: &ScoreWeights) -> Score {
    let weight_sum = weights.sum();
    if !weight_sum.is_finite() || weight_sum <= 0.0 {
        return 0.0;
    }
    let weighted: f64 = Dimension::ALL
        .iter()
        .map(|dimension| dimensions.get(*dimension) * weights.get(*dimension))
        .sum();
    (weighted / weight_sum).clamp(0.0, 1.0)
}

pub fn phase_score(indicators: &IndicatorMap, weights: &ScoreWeights) -> Score {
    compute_score(&dimension_scores(indicators), weights)
}
