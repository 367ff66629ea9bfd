//! Append-only record of `(time, state)` snapshots.

use crate::error::SimError;
use crate::species::{Species, State};

/// Snapshots in strictly increasing time order. The first entry is always
/// `(0, initial)`; entries are never modified once recorded.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    times: Vec<f64>,
    states: Vec<State>,
}

impl Trajectory {
    pub fn new(initial: State) -> Self {
        Self {
            times: vec![0.0],
            states: vec![initial],
        }
    }

    pub fn record(&mut self, time: f64, state: State) -> Result<(), SimError> {
        let last = self.last_time();
        if !time.is_finite() || time <= last {
            return Err(SimError::OutOfOrder(format!(
                "snapshot time {time} does not follow last recorded time {last}"
            )));
        }
        self.times.push(time);
        self.states.push(state);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn initial(&self) -> &State {
        &self.states[0]
    }

    pub fn last_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    pub fn last_state(&self) -> &State {
        &self.states[self.states.len() - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &State)> + Clone + '_ {
        self.times.iter().copied().zip(self.states.iter())
    }

    /// Lazy `(time, count)` pairs for one species. Clone the iterator, or
    /// call again, to restart it.
    pub fn series(&self, species: Species) -> impl Iterator<Item = (f64, u32)> + Clone + '_ {
        self.iter().map(move |(t, state)| (t, state.get(species)))
    }

    /// The paired time and count columns for one species.
    pub fn columns(&self, species: Species) -> (Vec<f64>, Vec<u32>) {
        self.series(species).unzip()
    }

    /// State in force at time `t`, treating the trajectory as a
    /// right-continuous step function. `None` before time zero.
    pub fn state_at(&self, t: f64) -> Option<&State> {
        let idx = self.times.partition_point(|&time| time <= t);
        idx.checked_sub(1).map(|i| &self.states[i])
    }

    /// Samples the step function on a time grid. Grid points before zero
    /// take the initial state.
    pub fn resample(&self, grid: &[f64]) -> Vec<State> {
        grid.iter()
            .map(|&t| *self.state_at(t).unwrap_or(self.initial()))
            .collect()
    }
}
