//! Species identifiers and the integer molecule-count state vector.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

pub const N_SPECIES: usize = 9;

/// One of the nine molecular species, in state-vector order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    /// Free activator gene (D_A).
    ActivatorGene = 0,
    /// Free repressor gene (D_R).
    RepressorGene = 1,
    /// Activator gene with activator bound to its promoter (D'_A).
    BoundActivatorGene = 2,
    /// Repressor gene with activator bound to its promoter (D'_R).
    BoundRepressorGene = 3,
    ActivatorMrna = 4,
    Activator = 5,
    RepressorMrna = 6,
    Repressor = 7,
    /// Activator–repressor sequestration complex (C).
    Complex = 8,
}

impl Species {
    pub const ALL: [Species; N_SPECIES] = [
        Species::ActivatorGene,
        Species::RepressorGene,
        Species::BoundActivatorGene,
        Species::BoundRepressorGene,
        Species::ActivatorMrna,
        Species::Activator,
        Species::RepressorMrna,
        Species::Repressor,
        Species::Complex,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Species::ActivatorGene => "D_A",
            Species::RepressorGene => "D_R",
            Species::BoundActivatorGene => "D'_A",
            Species::BoundRepressorGene => "D'_R",
            Species::ActivatorMrna => "M_A",
            Species::Activator => "A",
            Species::RepressorMrna => "M_R",
            Species::Repressor => "R",
            Species::Complex => "C",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a delta could not be applied to a [`State`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountError {
    /// The count would drop below zero.
    Underflow(Species),
    /// The count would exceed `u32::MAX`.
    Overflow(Species),
}

impl CountError {
    pub fn species(self) -> Species {
        match self {
            CountError::Underflow(species) | CountError::Overflow(species) => species,
        }
    }
}

/// Molecule counts for every species. Counts are unsigned, so a snapshot can
/// never hold a negative value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State([u32; N_SPECIES]);

impl State {
    /// One free copy of each gene, nothing else.
    pub const CANONICAL: State = State([1, 1, 0, 0, 0, 0, 0, 0, 0]);

    pub const fn new(counts: [u32; N_SPECIES]) -> Self {
        Self(counts)
    }

    #[inline]
    pub fn get(&self, species: Species) -> u32 {
        self.0[species.index()]
    }

    pub fn counts(&self) -> &[u32; N_SPECIES] {
        &self.0
    }

    /// Adds a stoichiometric delta. Fails with the first species whose
    /// count would leave the `u32` range.
    pub fn checked_add(&self, delta: &[i32; N_SPECIES]) -> Result<State, CountError> {
        let mut next = self.0;
        for (idx, (count, &d)) in next.iter_mut().zip(delta.iter()).enumerate() {
            let species = Species::ALL[idx];
            *count = count.checked_add_signed(d).ok_or(if d < 0 {
                CountError::Underflow(species)
            } else {
                CountError::Overflow(species)
            })?;
        }
        Ok(State(next))
    }

    pub fn activator_gene_total(&self) -> u64 {
        u64::from(self.get(Species::ActivatorGene))
            + u64::from(self.get(Species::BoundActivatorGene))
    }

    pub fn repressor_gene_total(&self) -> u64 {
        u64::from(self.get(Species::RepressorGene))
            + u64::from(self.get(Species::BoundRepressorGene))
    }
}

impl From<[u32; N_SPECIES]> for State {
    fn from(counts: [u32; N_SPECIES]) -> Self {
        Self(counts)
    }
}

impl Index<Species> for State {
    type Output = u32;

    fn index(&self, species: Species) -> &u32 {
        &self.0[species.index()]
    }
}
