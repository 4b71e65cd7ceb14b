use crate::types::indicator::Indicator;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Before,
    Prelude,
    During,
    Transition,
    After,
}

impl Phase {
    /// Phases in temporal order.
    pub const ALL: [Phase; 5] = [
        Phase::Before,
        Phase::Prelude,
        Phase::During,
        Phase::Transition,
        Phase::After,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Phase::Before => "before",
            Phase::Prelude => "prelude",
            Phase::During => "during",
            Phase::Transition => "transition",
            Phase::After => "after",
        }
    }

    pub fn from_label(label: &str) -> Option<Phase> {
        Self::ALL
            .into_iter()
            .find(|phase| phase.label() == label.trim())
    }

    fn index(self) -> usize {
        self as usize
    }

    pub fn previous(self) -> Option<Phase> {
        self.index()
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    pub fn next(self) -> Option<Phase> {
        Self::ALL.get(self.index() + 1).copied()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A raw indicator value tagged with where it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorValue {
    /// Supplied by the caller.
    Present(f64),
    /// Estimated from neighbouring phases.
    Inferred(f64),
    /// Seeded from the epoch reference table.
    Defaulted(f64),
}

impl IndicatorValue {
    pub fn value(self) -> f64 {
        match self {
            IndicatorValue::Present(v)
            | IndicatorValue::Inferred(v)
            | IndicatorValue::Defaulted(v) => v,
        }
    }

    pub fn source(self) -> &'static str {
        match self {
            IndicatorValue::Present(_) => "present",
            IndicatorValue::Inferred(_) => "inferred",
            IndicatorValue::Defaulted(_) => "defaulted",
        }
    }

    pub fn is_present(self) -> bool {
        matches!(self, IndicatorValue::Present(_))
    }

    /// Same provenance, new number.
    pub fn with_value(self, value: f64) -> Self {
        match self {
            IndicatorValue::Present(_) => IndicatorValue::Present(value),
            IndicatorValue::Inferred(_) => IndicatorValue::Inferred(value),
            IndicatorValue::Defaulted(_) => IndicatorValue::Defaulted(value),
        }
    }
}

impl Serialize for IndicatorValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("IndicatorValue", 2)?;
        state.serialize_field("value", &self.value())?;
        state.serialize_field("source", self.source())?;
        state.end()
    }
}

pub type IndicatorMap = BTreeMap<Indicator, IndicatorValue>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseRecord {
    pub indicators: IndicatorMap,
    pub score: f64,
}

pub type PhaseMap = BTreeMap<Phase, PhaseRecord>;

/// Completed indicator set and score for every phase of one event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextCompletion {
    pub start_year: i64,
    pub end_year: i64,
    pub phases: PhaseMap,
}

impl ContextCompletion {
    pub fn score(&self, phase: Phase) -> Option<f64> {
        self.phases.get(&phase).map(|record| record.score)
    }

    pub fn value(&self, phase: Phase, indicator: Indicator) -> Option<IndicatorValue> {
        self.phases
            .get(&phase)
            .and_then(|record| record.indicators.get(&indicator))
            .copied()
    }
}
