//! Interface to the deterministic (mean-field) model and helpers that line a
//! stochastic trajectory up against its output.
//!
//! This crate does not integrate rate equations. A caller supplies an
//! implementation of [`DeterministicComparator`] backed by whatever ODE
//! solver it trusts; everything here only consumes the sampled solution.

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::rates::RateConstants;
use crate::species::{N_SPECIES, Species};
use crate::trajectory::Trajectory;

/// Integration scheme requested from the comparator. Rk45 is explicit
/// adaptive; Bdf and Radau are implicit and handle stiff regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationMethod {
    Rk45,
    Bdf,
    Radau,
}

/// Right-hand side of the rate equations: `d/dt y = f(t, y, rates)`.
pub type RateEquations = dyn Fn(f64, &[f64; N_SPECIES], &RateConstants) -> [f64; N_SPECIES] + Sync;

/// Sampled mean-field solution: `values[i]` holds all species at `times[i]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeterministicTrajectory {
    pub times: Vec<f64>,
    pub values: Vec<[f64; N_SPECIES]>,
}

impl DeterministicTrajectory {
    pub fn series(&self, species: Species) -> impl Iterator<Item = (f64, f64)> + Clone + '_ {
        self.times
            .iter()
            .copied()
            .zip(self.values.iter().map(move |row| row[species.index()]))
    }
}

pub trait DeterministicComparator {
    fn integrate(
        &self,
        rhs: &RateEquations,
        span: (f64, f64),
        initial: [f64; N_SPECIES],
        rates: &RateConstants,
        method: IntegrationMethod,
    ) -> Result<DeterministicTrajectory, SimError>;
}

/// One species from both models, sampled on the deterministic grid.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeciesComparison {
    pub species: Species,
    pub times: Vec<f64>,
    pub stochastic: Vec<f64>,
    pub deterministic: Vec<f64>,
}

impl SpeciesComparison {
    /// Mean absolute difference between the two series; zero for an empty
    /// grid.
    pub fn mean_abs_deviation(&self) -> f64 {
        if self.times.is_empty() {
            return 0.0;
        }
        let sum: f64 = self
            .stochastic
            .iter()
            .zip(&self.deterministic)
            .map(|(s, d)| (s - d).abs())
            .sum();
        sum / self.times.len() as f64
    }
}

pub fn compare_species(
    stochastic: &Trajectory,
    deterministic: &DeterministicTrajectory,
    species: Species,
) -> Result<SpeciesComparison, SimError> {
    if deterministic.times.len() != deterministic.values.len() {
        return Err(SimError::config(format!(
            "deterministic solution has {} times but {} value rows",
            deterministic.times.len(),
            deterministic.values.len()
        )));
    }
    let stochastic_values = stochastic
        .resample(&deterministic.times)
        .iter()
        .map(|state| state.get(species) as f64)
        .collect();
    Ok(SpeciesComparison {
        species,
        times: deterministic.times.clone(),
        stochastic: stochastic_values,
        deterministic: deterministic
            .values
            .iter()
            .map(|row| row[species.index()])
            .collect(),
    })
}

/// `points` evenly spaced times from `start` to `end` inclusive.
pub fn time_grid(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (points - 1) as f64;
            (0..points)
                .map(|i| if i == points - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}
