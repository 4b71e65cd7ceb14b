pub mod request;
pub mod trend;

use crate::epoch::EpochTable;
use crate::error::Result;
use crate::scoring::{clamp_to_domain, phase_score};
use crate::types::config::EngineSettings;
use crate::types::indicator::Indicator;
use crate::types::phase::{
    ContextCompletion, IndicatorMap, IndicatorValue, Phase, PhaseMap, PhaseRecord,
};
use crate::types::scoring::ScoreWeights;
use std::collections::BTreeMap;
use trend::{percentage_change, project, Direction};

pub use request::CompletionRequest;

pub type PhaseIndicators = BTreeMap<Phase, IndicatorMap>;

/// Passes stop early once no value moves by more than this.
const CONVERGENCE_EPSILON: f64 = 1e-9;

const OUTER_PHASE_OFFSET: i64 = 12;

/// Year whose epoch snapshot seeds `phase`.
pub fn representative_year(phase: Phase, start_year: i64, end_year: i64) -> i64 {
    match phase {
        Phase::Before => start_year.saturating_sub(OUTER_PHASE_OFFSET),
        Phase::Prelude => start_year.saturating_sub(1),
        Phase::During => {
            start_year.saturating_add(end_year.saturating_sub(start_year).div_euclid(2))
        }
        Phase::Transition => end_year.saturating_add(1),
        Phase::After => end_year.saturating_add(OUTER_PHASE_OFFSET),
    }
}

pub fn complete(
    request: &CompletionRequest,
    epochs: &EpochTable,
    settings: &EngineSettings,
) -> Result<ContextCompletion> {
    request.validate()?;
    tracing::info!(
        start_year = request.start_year,
        end_year = request.end_year,
        max_passes = settings.max_passes,
        "starting context completion"
    );

    let seeded = seed_from_epochs(request, epochs);
    let mut phases = score_phases(&seeded, &settings.weights);

    for pass in 1..=settings.max_passes {
        let refined = refine_pass(&phases, settings);
        let converged = max_change(&phases, &refined) <= CONVERGENCE_EPSILON;
        phases = score_phases(&refined, &settings.weights);
        if converged {
            tracing::debug!(pass, "refinement converged");
            break;
        }
    }

    let clamped = clamp_phases(&indicators_of(&phases));
    let phases = score_phases(&clamped, &settings.weights);

    for (phase, record) in &phases {
        tracing::info!(%phase, score = record.score, "phase scored");
    }

    Ok(ContextCompletion {
        start_year: request.start_year,
        end_year: request.end_year,
        phases,
    })
}

/// Caller values become `Present`; every remaining gap takes the epoch value
/// for the phase's representative year.
pub fn seed_from_epochs(request: &CompletionRequest, epochs: &EpochTable) -> PhaseIndicators {
    Phase::ALL
        .into_iter()
        .map(|phase| {
            let year = representative_year(phase, request.start_year, request.end_year);
            let epoch = epochs.resolve(year);
            tracing::debug!(%phase, year, epoch = %epoch.name, "seeding phase");

            let indicators = Indicator::ALL
                .into_iter()
                .map(|indicator| {
                    let value = match request.supplied(phase, indicator) {
                        Some(value) => IndicatorValue::Present(value),
                        None => IndicatorValue::Defaulted(
                            epoch
                                .values
                                .get(&indicator)
                                .copied()
                                .unwrap_or_else(|| midpoint(indicator)),
                        ),
                    };
                    (indicator, value)
                })
                .collect();
            (phase, indicators)
        })
        .collect()
}

pub fn score_phases(phases: &PhaseIndicators, weights: &ScoreWeights) -> PhaseMap {
    phases
        .iter()
        .map(|(phase, indicators)| {
            let record = PhaseRecord {
                indicators: indicators.clone(),
                score: phase_score(indicators, weights),
            };
            (*phase, record)
        })
        .collect()
}

/// One inference pass over every gap, reading only the previous state.
pub fn refine_pass(phases: &PhaseMap, settings: &EngineSettings) -> PhaseIndicators {
    phases
        .iter()
        .map(|(phase, record)| {
            let indicators = record
                .indicators
                .iter()
                .map(|(indicator, value)| {
                    let value = if value.is_present() {
                        *value
                    } else {
                        estimate(phases, *phase, *indicator, settings).unwrap_or(*value)
                    };
                    (*indicator, value)
                })
                .collect();
            (*phase, indicators)
        })
        .collect()
}

/// Every value forced into its indicator's domain, provenance kept.
pub fn clamp_phases(phases: &PhaseIndicators) -> PhaseIndicators {
    phases
        .iter()
        .map(|(phase, indicators)| {
            let clamped = indicators
                .iter()
                .map(|(indicator, value)| {
                    let bounded = clamp_to_domain(value.value(), indicator.domain());
                    (*indicator, value.with_value(bounded))
                })
                .collect();
            (*phase, clamped)
        })
        .collect()
}

/// Interpolate between caller-supplied neighbours, else extrapolate from
/// whichever side has one. `None` leaves the seed in place.
fn estimate(
    phases: &PhaseMap,
    phase: Phase,
    indicator: Indicator,
    settings: &EngineSettings,
) -> Option<IndicatorValue> {
    let current = phases.get(&phase)?;
    let previous = phase.previous().and_then(|p| phases.get(&p));
    let next = phase.next().and_then(|p| phases.get(&p));
    let supplied = |record: Option<&PhaseRecord>| {
        record.and_then(|record| {
            record
                .indicators
                .get(&indicator)
                .filter(|value| value.is_present())
                .map(|value| (value.value(), record.score))
        })
    };

    let estimate = match (supplied(previous), supplied(next)) {
        (Some((before, _)), Some((after, _))) => {
            tracing::debug!(%phase, %indicator, "interpolating");
            (before + after) / 2.0
        }
        (Some((known, score)), None) => {
            let pct = percentage_change(score, current.score);
            tracing::debug!(%phase, %indicator, pct, "extrapolating forward");
            project(known, pct, settings.trend_relation, Direction::Forward)
        }
        (None, Some((known, score))) => {
            let pct = percentage_change(current.score, score);
            tracing::debug!(%phase, %indicator, pct, "extrapolating backward");
            project(known, pct, settings.trend_relation, Direction::Backward)
        }
        (None, None) => return None,
    };

    Some(IndicatorValue::Inferred(clamp_to_domain(
        estimate,
        indicator.domain(),
    )))
}

fn indicators_of(phases: &PhaseMap) -> PhaseIndicators {
    phases
        .iter()
        .map(|(phase, record)| (*phase, record.indicators.clone()))
        .collect()
}

fn max_change(before: &PhaseMap, after: &PhaseIndicators) -> f64 {
    before
        .iter()
        .flat_map(|(phase, record)| {
            record.indicators.iter().map(move |(indicator, value)| {
                after
                    .get(phase)
                    .and_then(|indicators| indicators.get(indicator))
                    .map(|refined| (refined.value() - value.value()).abs())
                    .unwrap_or(0.0)
            })
        })
        .fold(0.0, f64::max)
}

fn midpoint(indicator: Indicator) -> f64 {
    let domain = indicator.domain();
    (domain.min + domain.max) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epoch::EpochEntry;

    fn full_phase(scale: f64) -> request::RawIndicators {
        Indicator::ALL
            .into_iter()
            .map(|indicator| {
                let domain = indicator.domain();
                (indicator, domain.min + (domain.max - domain.min) * scale)
            })
            .collect()
    }

    fn run(request: &CompletionRequest) -> ContextCompletion {
        complete(request, &EpochTable::builtin(), &EngineSettings::default())
            .expect("completion should succeed")
    }

    /// Feed a completed result back in as if every value were caller data.
    fn as_request(completion: &ContextCompletion) -> CompletionRequest {
        let mut request = CompletionRequest::new(completion.start_year, completion.end_year);
        for (phase, record) in &completion.phases {
            let values = record
                .indicators
                .iter()
                .map(|(indicator, value)| (*indicator, value.value()))
                .collect();
            request = request.with_phase(*phase, values);
        }
        request
    }

    #[test]
    fn representative_years_follow_offsets() {
        assert_eq!(representative_year(Phase::Before, 1789, 1799), 1777);
        assert_eq!(representative_year(Phase::Prelude, 1789, 1799), 1788);
        assert_eq!(representative_year(Phase::During, 1789, 1799), 1794);
        assert_eq!(representative_year(Phase::Transition, 1789, 1799), 1800);
        assert_eq!(representative_year(Phase::After, 1789, 1799), 1811);
        assert_eq!(representative_year(Phase::During, 1914, 1918), 1916);
        assert_eq!(representative_year(Phase::During, 1914, 1919), 1916);
    }

    #[test]
    fn rejects_inverted_years() {
        let request = CompletionRequest::new(1800, 1700);
        let err = complete(&request, &EpochTable::builtin(), &EngineSettings::default())
            .expect_err("inverted years should fail");
        assert!(err.is_structural());
    }

    #[test]
    fn empty_input_yields_epoch_values_everywhere() {
        let request = CompletionRequest::new(1789, 1799);
        let table = EpochTable::builtin();
        let completion = run(&request);

        for phase in Phase::ALL {
            let year = representative_year(phase, 1789, 1799);
            let record = &completion.phases[&phase];
            assert_eq!(record.indicators.len(), Indicator::ALL.len());
            for (indicator, value) in &record.indicators {
                assert_eq!(*value, IndicatorValue::Defaulted(table.lookup(year)[indicator]));
            }
        }
    }

    #[test]
    fn revolution_scenario_keeps_outer_phases_on_epoch_values() {
        let during = full_phase(0.4);
        let request = CompletionRequest::new(1789, 1799).with_phase(Phase::During, during.clone());
        let table = EpochTable::builtin();
        let completion = run(&request);

        for (phase, year) in [(Phase::Before, 1777), (Phase::After, 1811)] {
            for indicator in Indicator::ALL {
                assert_eq!(
                    completion.value(phase, indicator),
                    Some(IndicatorValue::Defaulted(table.lookup(year)[&indicator])),
                    "{phase} {indicator}"
                );
            }
        }

        for phase in Phase::ALL {
            let score = completion.score(phase).expect("every phase is scored");
            assert!((0.0..=1.0).contains(&score), "{phase} score {score}");
        }

        let supplied = during
            .iter()
            .map(|(indicator, value)| (*indicator, IndicatorValue::Present(*value)))
            .collect::<IndicatorMap>();
        let expected = phase_score(&supplied, &ScoreWeights::default());
        let during_score = completion.score(Phase::During).expect("during is scored");
        assert!((during_score - expected).abs() < 1e-12);
    }

    #[test]
    fn neighbours_of_supplied_phase_are_inferred() {
        let request = CompletionRequest::new(1789, 1799).with_phase(Phase::During, full_phase(0.4));
        let completion = run(&request);

        for phase in [Phase::Prelude, Phase::Transition] {
            for indicator in Indicator::ALL {
                assert!(
                    matches!(completion.value(phase, indicator), Some(IndicatorValue::Inferred(_))),
                    "{phase} {indicator} should be inferred"
                );
            }
        }
    }

    #[test]
    fn interpolates_between_supplied_neighbours() {
        let request = CompletionRequest::new(1900, 1910)
            .with_value(Phase::Prelude, Indicator::LiteracyRate, 40.0)
            .with_value(Phase::Transition, Indicator::LiteracyRate, 70.0)
            .with_value(Phase::Prelude, Indicator::LifeExpectancy, 45.0)
            .with_value(Phase::Transition, Indicator::LifeExpectancy, 50.0);
        let completion = run(&request);

        assert_eq!(
            completion.value(Phase::During, Indicator::LiteracyRate),
            Some(IndicatorValue::Inferred(55.0))
        );
        assert_eq!(
            completion.value(Phase::During, Indicator::LifeExpectancy),
            Some(IndicatorValue::Inferred(47.5))
        );
    }

    #[test]
    fn forward_extrapolation_tracks_score_change() {
        let request = CompletionRequest::new(1900, 1910)
            .with_value(Phase::During, Indicator::UrbanizationRate, 40.0);
        let settings = EngineSettings {
            max_passes: 1,
            ..EngineSettings::default()
        };
        let table = EpochTable::builtin();

        let seeded = seed_from_epochs(&request, &table);
        let provisional = score_phases(&seeded, &settings.weights);
        let refined = refine_pass(&provisional, &settings);

        let pct = percentage_change(
            provisional[&Phase::During].score,
            provisional[&Phase::Transition].score,
        );
        let expected = clamp_to_domain(
            40.0 * (1.0 + pct / 100.0),
            Indicator::UrbanizationRate.domain(),
        );
        assert_eq!(
            refined[&Phase::Transition][&Indicator::UrbanizationRate],
            IndicatorValue::Inferred(expected)
        );

        let pct = percentage_change(
            provisional[&Phase::Prelude].score,
            provisional[&Phase::During].score,
        );
        let expected = clamp_to_domain(
            40.0 * (1.0 - pct / 100.0),
            Indicator::UrbanizationRate.domain(),
        );
        assert_eq!(
            refined[&Phase::Prelude][&Indicator::UrbanizationRate],
            IndicatorValue::Inferred(expected)
        );
    }

    #[test]
    fn zero_passes_skip_refinement() {
        let request = CompletionRequest::new(1789, 1799).with_phase(Phase::During, full_phase(0.4));
        let settings = EngineSettings {
            max_passes: 0,
            ..EngineSettings::default()
        };
        let completion = complete(&request, &EpochTable::builtin(), &settings)
            .expect("completion should succeed");
        assert!(matches!(
            completion.value(Phase::Prelude, Indicator::LiteracyRate),
            Some(IndicatorValue::Defaulted(_))
        ));
    }

    #[test]
    fn out_of_domain_input_is_clamped_and_scores_bounded() {
        let request = CompletionRequest::new(1500, 2020)
            .with_value(Phase::Before, Indicator::LiteracyRate, 250.0)
            .with_value(Phase::During, Indicator::LifeExpectancy, -40.0)
            .with_value(Phase::After, Indicator::GdpPerCapita, 1e9)
            .with_value(Phase::Transition, Indicator::GiniCoefficient, 3.0);
        let completion = run(&request);

        for (phase, record) in &completion.phases {
            assert!((0.0..=1.0).contains(&record.score), "{phase}");
            for (indicator, value) in &record.indicators {
                assert!(
                    indicator.domain().contains(value.value()),
                    "{phase} {indicator} = {}",
                    value.value()
                );
            }
        }
        assert_eq!(
            completion.value(Phase::Before, Indicator::LiteracyRate),
            Some(IndicatorValue::Present(100.0))
        );
    }

    #[test]
    fn completing_a_completed_result_is_a_fixed_point() {
        let request = CompletionRequest::new(1914, 1918)
            .with_phase(Phase::During, full_phase(0.3))
            .with_value(Phase::After, Indicator::LiteracyRate, 92.0)
            .with_value(Phase::Before, Indicator::BirthRate, 31.0);
        let first = run(&request);
        let second = run(&as_request(&first));

        for phase in Phase::ALL {
            let a = &first.phases[&phase];
            let b = &second.phases[&phase];
            assert!((a.score - b.score).abs() < 1e-9, "{phase} score drifted");
            for indicator in Indicator::ALL {
                let x = a.indicators[&indicator].value();
                let y = b.indicators[&indicator].value();
                assert!((x - y).abs() < 1e-9, "{phase} {indicator} drifted");
            }
        }
    }

    #[test]
    fn zero_weights_produce_zero_scores() {
        let settings = EngineSettings {
            weights: ScoreWeights {
                historical_epoch: 0.0,
                social_range: 0.0,
                age_range: 0.0,
                population_range: 0.0,
            },
            ..EngineSettings::default()
        };
        let completion = complete(
            &CompletionRequest::new(1789, 1799).with_phase(Phase::During, full_phase(0.5)),
            &EpochTable::builtin(),
            &settings,
        )
        .expect("completion should succeed");
        assert!(completion.phases.values().all(|record| record.score == 0.0));
    }

    #[test]
    fn injected_epoch_table_drives_seeding() {
        let values = Indicator::ALL
            .into_iter()
            .map(|indicator| (indicator, indicator.domain().min))
            .collect();
        let table = EpochTable::new(
            vec![EpochEntry::new("Flat", 0, 3000, values)],
            EpochTable::contemporary_default(),
        );
        let completion = complete(
            &CompletionRequest::new(1789, 1799),
            &table,
            &EngineSettings::default(),
        )
        .expect("completion should succeed");
        assert!(completion.phases.values().all(|record| record.score == 0.0));
    }

    #[test]
    fn epoch_gaps_seed_the_domain_midpoint() {
        let values = Indicator::ALL
            .into_iter()
            .filter(|indicator| *indicator != Indicator::LiteracyRate)
            .map(|indicator| (indicator, indicator.domain().min))
            .collect();
        let table = EpochTable::new(
            vec![EpochEntry::new("Sparse", 0, 3000, values)],
            EpochTable::contemporary_default(),
        );
        let request = CompletionRequest::new(1789, 1799).with_value(
            Phase::During,
            Indicator::LiteracyRate,
            12.0,
        );

        let seeded = seed_from_epochs(&request, &table);
        assert_eq!(
            seeded[&Phase::Before][&Indicator::LiteracyRate],
            IndicatorValue::Defaulted(50.0)
        );
        assert_eq!(
            seeded[&Phase::During][&Indicator::LiteracyRate],
            IndicatorValue::Present(12.0)
        );
        assert_eq!(
            seeded[&Phase::Before][&Indicator::GdpPerCapita],
            IndicatorValue::Defaulted(0.0)
        );
    }
}
