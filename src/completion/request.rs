use crate::error::{ContextError, Result};
use crate::types::indicator::Indicator;
use crate::types::phase::Phase;
use serde_json::Value;
use std::collections::BTreeMap;

pub type RawIndicators = BTreeMap<Indicator, f64>;

/// Caller input for one completion run: the event's year span plus whatever
/// indicator values are known per phase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionRequest {
    pub start_year: i64,
    pub end_year: i64,
    pub phases: BTreeMap<Phase, RawIndicators>,
}

impl CompletionRequest {
    pub fn new(start_year: i64, end_year: i64) -> Self {
        Self {
            start_year,
            end_year,
            phases: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, phase: Phase, indicator: Indicator, value: f64) -> Self {
        self.phases.entry(phase).or_default().insert(indicator, value);
        self
    }

    pub fn with_phase(mut self, phase: Phase, values: RawIndicators) -> Self {
        self.phases.insert(phase, values);
        self
    }

    /// Finite caller-supplied value, if any.
    pub fn supplied(&self, phase: Phase, indicator: Indicator) -> Option<f64> {
        self.phases
            .get(&phase)
            .and_then(|values| values.get(&indicator))
            .copied()
            .filter(|value| value.is_finite())
    }

    pub fn validate(&self) -> Result<()> {
        if self.start_year > self.end_year {
            return Err(ContextError::InvertedYears {
                start: self.start_year,
                end: self.end_year,
            });
        }
        Ok(())
    }

    /// Build a request from the JSON event document.
    ///
    /// Only structural problems are errors: non-integer years, an inverted
    /// span, or `initial_phase_data` that is not an object. Anything wrong
    /// inside a phase is dropped and logged.
    pub fn from_json(document: &Value) -> Result<Self> {
        let object = document.as_object().ok_or_else(|| {
            ContextError::InvalidPhaseData("event input must be a JSON object".to_string())
        })?;

        let start_year = read_year(object.get("event_start_year"), "event_start_year")?;
        let end_year = read_year(object.get("event_end_year"), "event_end_year")?;

        let mut request = Self::new(start_year, end_year);
        request.validate()?;

        let phase_data = match object.get("initial_phase_data") {
            None | Some(Value::Null) => return Ok(request),
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(ContextError::InvalidPhaseData(format!(
                    "initial_phase_data must be an object, found {}",
                    json_kind(other)
                )))
            }
        };

        for (label, data) in phase_data {
            let Some(phase) = Phase::from_label(label) else {
                tracing::warn!(phase = %label, "ignoring unknown phase");
                continue;
            };
            let Some(values) = data.as_object() else {
                tracing::warn!(
                    %phase,
                    kind = json_kind(data),
                    "phase data is not an object, treating as empty"
                );
                continue;
            };

            let mut indicators = RawIndicators::new();
            for (name, raw) in values {
                let Some(indicator) = Indicator::from_name(name) else {
                    tracing::warn!(%phase, indicator = %name, "ignoring unknown indicator");
                    continue;
                };
                match raw.as_f64().filter(|value| value.is_finite()) {
                    Some(value) => {
                        indicators.insert(indicator, value);
                    }
                    None => {
                        tracing::debug!(
                            %phase,
                            %indicator,
                            kind = json_kind(raw),
                            "treating non-numeric value as missing"
                        );
                    }
                }
            }
            request.phases.insert(phase, indicators);
        }

        Ok(request)
    }
}

fn read_year(value: Option<&Value>, field: &str) -> Result<i64> {
    let Some(value) = value else {
        return Err(ContextError::InvalidYear(format!("{field} is missing")));
    };
    if let Some(year) = value.as_i64() {
        return Ok(year);
    }
    match value.as_f64() {
        Some(year) if year.is_finite() && year.fract() == 0.0 && year.abs() < 1e15 => {
            Ok(year as i64)
        }
        _ => Err(ContextError::InvalidYear(format!(
            "{field} must be an integer, found {value}"
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
