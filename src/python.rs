use std::collections::HashMap;

use numpy::{PyArray1, PyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::SimulationConfig;
use crate::ensemble::run_ensemble;
use crate::error::SimError;
use crate::network::ReactionNetwork;
use crate::rates::RateConstants;
use crate::species::{N_SPECIES, State};

impl From<SimError> for PyErr {
    fn from(err: SimError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

fn build_config(
    initial_state: &[u32],
    horizon: f64,
    seed: u64,
    rates: Option<HashMap<String, f64>>,
    max_iterations: Option<u64>,
) -> Result<SimulationConfig, SimError> {
    let counts: [u32; N_SPECIES] = initial_state.try_into().map_err(|_| {
        SimError::InvalidConfiguration(format!(
            "initial_state length {} does not match number of species {}",
            initial_state.len(),
            N_SPECIES
        ))
    })?;
    let rates = match rates {
        Some(map) => RateConstants::from_named(&map)?,
        None => RateConstants::default(),
    };
    let config = SimulationConfig {
        initial_state: State::new(counts),
        rates,
        horizon,
        seed,
        max_iterations,
        wall_clock_budget_secs: None,
    };
    config.validate()?;
    Ok(config)
}

/// Returns `(times, states, status)` where `states` has one row per event.
#[pyfunction(name = "simulate", signature = (
    initial_state,
    horizon,
    seed,
    rates=None,
    max_iterations=None
))]
fn simulate_trajectory<'py>(
    py: Python<'py>,
    initial_state: Vec<u32>,
    horizon: f64,
    seed: u64,
    rates: Option<HashMap<String, f64>>,
    max_iterations: Option<u64>,
) -> PyResult<(Bound<'py, PyArray1<f64>>, Bound<'py, PyArray2<u32>>, String)> {
    let config = build_config(&initial_state, horizon, seed, rates, max_iterations)?;
    let result = py.detach(move || {
        let network = ReactionNetwork::oscillator();
        crate::scheduler::simulate(&network, &config)
    })?;
    let times = PyArray1::from_slice(py, result.trajectory.times());
    let rows: Vec<Vec<u32>> = result
        .trajectory
        .states()
        .iter()
        .map(|state| state.counts().to_vec())
        .collect();
    let states = PyArray2::from_vec2(py, &rows)
        .map_err(|e| PyValueError::new_err(format!("failed to export states: {e}")))?;
    Ok((times, states, result.status.label().to_string()))
}

/// Final state of each replicate, shape `(replicates, 9)`.
#[pyfunction(signature = (
    initial_state,
    horizon,
    replicates,
    seed,
    rates=None,
    max_iterations=None,
    n_threads=None
))]
fn simulate_final_states<'py>(
    py: Python<'py>,
    initial_state: Vec<u32>,
    horizon: f64,
    replicates: usize,
    seed: u64,
    rates: Option<HashMap<String, f64>>,
    max_iterations: Option<u64>,
    n_threads: Option<usize>,
) -> PyResult<Bound<'py, PyArray2<u32>>> {
    let config = build_config(&initial_state, horizon, seed, rates, max_iterations)?;
    let results = py.detach(move || {
        let network = ReactionNetwork::oscillator();
        run_ensemble(&network, &config, replicates, n_threads)
    })?;
    let rows: Vec<Vec<u32>> = results
        .iter()
        .map(|result| result.final_state().counts().to_vec())
        .collect();
    PyArray2::from_vec2(py, &rows)
        .map_err(|e| PyValueError::new_err(format!("failed to export states: {e}")))
}

#[pymodule]
fn oscillator_ssa(_py: Python<'_>, module: &Bound<'_, PyModule>) -> PyResult<()> {
    module.add_function(wrap_pyfunction!(simulate_trajectory, module)?)?;
    module.add_function(wrap_pyfunction!(simulate_final_states, module)?)?;
    Ok(())
}
