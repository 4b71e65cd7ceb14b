#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// From an earlier phase onto a later one.
    Forward,
    /// From a later phase back onto an earlier one.
    Backward,
}

/// Percentage change from `from` to `to`. Returns 0 when `from` is zero or
/// either side is not a finite number.
pub fn percentage_change(from: f64, to: f64) -> f64 {
    if from == 0.0 || !from.is_finite() || !to.is_finite() {
        return 0.0;
    }
    (to - from) / from * 100.0
}

/// Scale `known` by `relation * pct` percent, in the given direction.
///
/// `pct` is always measured from the earlier phase to the later one, so a
/// backward projection undoes the change instead of applying it.
pub fn project(known: f64, pct: f64, relation: f64, direction: Direction) -> f64 {
    let delta = relation * pct / 100.0;
    match direction {
        Direction::Forward => known * (1.0 + delta),
        Direction::Backward => known * (1.0 - delta),
    }
}
