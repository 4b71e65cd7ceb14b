use crate::types::indicator::Domain;

/// Map a raw value into [0, 1] relative to its domain.
///
/// Missing or non-finite input normalizes to 0 without error, so an absent
/// indicator is indistinguishable from one sitting at the domain minimum.
/// A degenerate domain (min == max) yields the midpoint 0.5.
pub fn normalize(raw: Option<f64>, domain: Domain) -> f64 {
    let Some(value) = raw.filter(|value| value.is_finite()) else {
        return 0.0;
    };
    let span = domain.max - domain.min;
    if span == 0.0 {
        return 0.5;
    }
    let clamped = clamp_to_domain(value, domain);
    ((clamped - domain.min) / span).clamp(0.0, 1.0)
}

pub fn clamp_to_domain(value: f64, domain: Domain) -> f64 {
    if domain.min > domain.max {
        return value.clamp(domain.max, domain.min);
    }
    value.clamp(domain.min, domain.max)
}
