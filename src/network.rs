//! The fixed 16-reaction activator/repressor network.
//!
//! Each [`Reaction`] carries its label, its stoichiometric delta and the
//! mass-action rate law that drives it, so the propensity vector and the
//! stoichiometric table cannot drift apart.

use crate::error::SimError;
use crate::rates::{RateConstants, RateId};
use crate::species::{CountError, N_SPECIES, Species, State};

pub const N_REACTIONS: usize = 16;

/// Highest supported reaction order.
const MAX_ORDER: usize = 2;

/// Mass-action propensity: `rate · Π count(reactant)` over at most two
/// reactant factors.
#[derive(Clone, Debug, PartialEq)]
pub struct RateLaw {
    pub label: String,
    pub rate: RateId,
    pub reactants: Vec<Species>,
}

impl RateLaw {
    pub fn new(label: impl Into<String>, rate: RateId, reactants: &[Species]) -> Self {
        Self {
            label: label.into(),
            rate,
            reactants: reactants.to_vec(),
        }
    }

    pub fn order(&self) -> usize {
        self.reactants.len()
    }

    #[inline]
    pub fn propensity(&self, state: &State, rates: &RateConstants) -> f64 {
        self.reactants
            .iter()
            .fold(rates.get(self.rate), |acc, &species| {
                acc * state.get(species) as f64
            })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Reaction {
    pub delta: [i32; N_SPECIES],
    pub law: RateLaw,
}

impl Reaction {
    pub fn label(&self) -> &str {
        &self.law.label
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReactionNetwork {
    reactions: Vec<Reaction>,
}

impl ReactionNetwork {
    /// Pairs stoichiometric rows with rate laws by position. The table must
    /// have one row per law, one column per species, and exactly
    /// [`N_REACTIONS`] rows.
    pub fn new(stoichiometry: Vec<Vec<i32>>, laws: Vec<RateLaw>) -> Result<Self, SimError> {
        if stoichiometry.len() != laws.len() {
            return Err(SimError::config(format!(
                "stoichiometry has {} rows but {} rate laws were given",
                stoichiometry.len(),
                laws.len()
            )));
        }
        if laws.len() != N_REACTIONS {
            return Err(SimError::config(format!(
                "network must define exactly {N_REACTIONS} reactions, got {}",
                laws.len()
            )));
        }
        let mut reactions = Vec::with_capacity(N_REACTIONS);
        for (idx, (row, law)) in stoichiometry.into_iter().zip(laws).enumerate() {
            let delta: [i32; N_SPECIES] = row.as_slice().try_into().map_err(|_| {
                SimError::config(format!(
                    "stoichiometry row {idx} has {} columns, expected {N_SPECIES}",
                    row.len()
                ))
            })?;
            if law.order() > MAX_ORDER {
                return Err(SimError::config(format!(
                    "reaction {idx} ('{}') has order {}, at most {MAX_ORDER} is supported",
                    law.label,
                    law.order()
                )));
            }
            reactions.push(Reaction { delta, law });
        }
        Ok(Self { reactions })
    }

    /// The activator/repressor oscillator.
    #[rustfmt::skip]
    pub fn oscillator() -> Self {
        use Species::*;
        let reactions = vec![
            reaction("A + R -> C", RateId::GammaC, &[Activator, Repressor], &[(Activator, -1), (Repressor, -1), (Complex, 1)]),
            reaction("A -> 0", RateId::DeltaA, &[Activator], &[(Activator, -1)]),
            reaction("C -> R", RateId::DeltaA, &[Complex], &[(Repressor, 1), (Complex, -1)]),
            reaction("R -> 0", RateId::DeltaR, &[Repressor], &[(Repressor, -1)]),
            reaction("D_A + A -> D'_A", RateId::GammaA, &[ActivatorGene, Activator], &[(ActivatorGene, -1), (BoundActivatorGene, 1), (Activator, -1)]),
            reaction("D_R + A -> D'_R", RateId::GammaR, &[RepressorGene, Activator], &[(RepressorGene, -1), (BoundRepressorGene, 1), (Activator, -1)]),
            reaction("D'_A -> D_A + A", RateId::ThetaA, &[BoundActivatorGene], &[(ActivatorGene, 1), (BoundActivatorGene, -1), (Activator, 1)]),
            reaction("D_A -> D_A + M_A", RateId::AlphaA, &[ActivatorGene], &[(ActivatorMrna, 1)]),
            reaction("D'_A -> D'_A + M_A", RateId::AlphaAPrime, &[BoundActivatorGene], &[(ActivatorMrna, 1)]),
            reaction("M_A -> 0", RateId::DeltaMa, &[ActivatorMrna], &[(ActivatorMrna, -1)]),
            reaction("M_A -> M_A + A", RateId::BetaA, &[ActivatorMrna], &[(Activator, 1)]),
            reaction("D'_R -> D_R + A", RateId::ThetaR, &[BoundRepressorGene], &[(RepressorGene, 1), (BoundRepressorGene, -1), (Activator, 1)]),
            reaction("D_R -> D_R + M_R", RateId::AlphaR, &[RepressorGene], &[(RepressorMrna, 1)]),
            reaction("D'_R -> D'_R + M_R", RateId::AlphaRPrime, &[BoundRepressorGene], &[(RepressorMrna, 1)]),
            reaction("M_R -> 0", RateId::DeltaMr, &[RepressorMrna], &[(RepressorMrna, -1)]),
            reaction("M_R -> M_R + R", RateId::BetaR, &[RepressorMrna], &[(Repressor, 1)]),
        ];
        debug_assert_eq!(reactions.len(), N_REACTIONS);
        Self { reactions }
    }

    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    pub fn reaction(&self, idx: usize) -> Option<&Reaction> {
        self.reactions.get(idx)
    }

    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }

    /// Rows of the stoichiometric table, in reaction order.
    pub fn stoichiometry(&self) -> Vec<[i32; N_SPECIES]> {
        self.reactions.iter().map(|r| r.delta).collect()
    }

    /// `state + delta[reaction]`. Fails with the species whose count would
    /// leave the `u32` range; the caller decides what that means.
    ///
    /// # Panics
    ///
    /// If `reaction >= N_REACTIONS`.
    pub fn apply(&self, state: &State, reaction: usize) -> Result<State, CountError> {
        state.checked_add(&self.reactions[reaction].delta)
    }
}

impl Default for ReactionNetwork {
    fn default() -> Self {
        Self::oscillator()
    }
}

fn reaction(
    label: &str,
    rate: RateId,
    reactants: &[Species],
    changes: &[(Species, i32)],
) -> Reaction {
    let mut delta = [0i32; N_SPECIES];
    for &(species, change) in changes {
        delta[species.index()] += change;
    }
    Reaction {
        delta,
        law: RateLaw::new(label, rate, reactants),
    }
}
