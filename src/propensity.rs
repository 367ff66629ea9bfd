//! Propensity evaluation and direct-method reaction selection.

use crate::network::{N_REACTIONS, ReactionNetwork};
use crate::rates::RateConstants;
use crate::species::State;

/// Propensity of every reaction in network order, plus their sum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Propensities {
    values: [f64; N_REACTIONS],
    total: f64,
}

impl Propensities {
    pub fn values(&self) -> &[f64; N_REACTIONS] {
        &self.values
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    /// Picks a reaction for a uniform draw `u2` in [0, 1).
    pub fn select(&self, u2: f64) -> Option<usize> {
        select_reaction(&self.values, u2 * self.total)
    }
}

pub fn evaluate(network: &ReactionNetwork, state: &State, rates: &RateConstants) -> Propensities {
    let mut values = [0.0; N_REACTIONS];
    let mut total = 0.0;
    for (slot, reaction) in values.iter_mut().zip(network.reactions()) {
        let value = reaction.law.propensity(state, rates);
        *slot = value;
        total += value;
    }
    Propensities { values, total }
}

/// Smallest index whose cumulative weight reaches `target`.
///
/// Zero-weight entries are never returned: for `target > 0` they cannot be
/// the smallest such index anyway, and for `target == 0` they are skipped.
/// If rounding leaves `target` above the final cumulative sum, the last
/// positive entry is chosen. Returns `None` when no weight is positive.
pub fn select_reaction(weights: &[f64], target: f64) -> Option<usize> {
    let mut cumulative = 0.0;
    let mut last_positive = None;
    for (idx, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        last_positive = Some(idx);
        if cumulative >= target {
            return Some(idx);
        }
    }
    last_positive
}
