//! Gillespie direct-method event loop.
//!
//! Each step samples the waiting time to the next reaction from an
//! exponential with rate equal to the total propensity, then picks the
//! reaction with probability proportional to its propensity. The loop is
//! strictly sequential; independent replicates live in [`crate::ensemble`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use rand::distributions::OpenClosed01;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::SimulationConfig;
use crate::error::SimError;
use crate::network::ReactionNetwork;
use crate::propensity::evaluate;
use crate::rates::RateConstants;
use crate::species::{CountError, State};
use crate::trajectory::Trajectory;

/// Why a run stopped without failing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The next event would have fired after the horizon.
    HorizonReached,
    /// Total propensity is zero; nothing can happen any more.
    Absorbed,
    IterationBudgetExceeded,
    WallClockBudgetExceeded,
    Cancelled,
}

impl StopReason {
    pub fn as_str(self) -> &'static str {
        match self {
            StopReason::HorizonReached => "horizon_reached",
            StopReason::Absorbed => "absorbed",
            StopReason::IterationBudgetExceeded => "iteration_budget_exceeded",
            StopReason::WallClockBudgetExceeded => "wall_clock_budget_exceeded",
            StopReason::Cancelled => "cancelled",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Status {
    Running,
    Terminated(StopReason),
    Failed(SimError),
}

impl Status {
    pub fn is_running(&self) -> bool {
        matches!(self, Status::Running)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Running => "running",
            Status::Terminated(reason) => reason.as_str(),
            Status::Failed(SimError::NegativeState { .. }) => "negative_state_encountered",
            Status::Failed(SimError::CountOverflow { .. }) => "count_overflow",
            Status::Failed(_) => "failed",
        }
    }
}

/// Shared flag a caller can raise to stop a run between steps.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Outcome of a finished run. The trajectory is always returned, including
/// when the run failed part-way.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationResult {
    pub trajectory: Trajectory,
    pub status: Status,
    /// Number of reaction events applied.
    pub steps: u64,
}

impl SimulationResult {
    pub fn stop_reason(&self) -> Option<StopReason> {
        match self.status {
            Status::Terminated(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&SimError> {
        match &self.status {
            Status::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// True when the run reached the horizon or an absorbing state, i.e. the
    /// trajectory covers the whole requested window.
    pub fn is_complete(&self) -> bool {
        matches!(
            self.stop_reason(),
            Some(StopReason::HorizonReached | StopReason::Absorbed)
        )
    }

    pub fn final_time(&self) -> f64 {
        self.trajectory.last_time()
    }

    pub fn final_state(&self) -> &State {
        self.trajectory.last_state()
    }
}

pub struct EventScheduler<'a, R> {
    network: &'a ReactionNetwork,
    rates: RateConstants,
    horizon: f64,
    max_iterations: Option<u64>,
    wall_clock_budget: Option<Duration>,
    cancel: Option<CancelToken>,
    started: Instant,
    rng: R,
    time: f64,
    state: State,
    steps: u64,
    trajectory: Trajectory,
    status: Status,
}

impl<'a> EventScheduler<'a, ChaCha8Rng> {
    /// Scheduler driven by a `ChaCha8Rng` seeded from `config.seed`.
    pub fn seeded(network: &'a ReactionNetwork, config: &SimulationConfig) -> Result<Self, SimError> {
        Self::new(network, config, ChaCha8Rng::seed_from_u64(config.seed))
    }
}

impl<'a, R: Rng> EventScheduler<'a, R> {
    /// Validates `config` and prepares a run at time zero. `config.seed` is
    /// ignored; all randomness comes from `rng`.
    pub fn new(
        network: &'a ReactionNetwork,
        config: &SimulationConfig,
        rng: R,
    ) -> Result<Self, SimError> {
        config.validate()?;
        log::debug!(
            "Starting SSA run: horizon={}h, max_iterations={:?}, initial={:?}",
            config.horizon,
            config.max_iterations,
            config.initial_state.counts()
        );
        Ok(Self {
            network,
            rates: config.rates,
            horizon: config.horizon,
            max_iterations: config.max_iterations,
            wall_clock_budget: config.wall_clock_budget(),
            cancel: None,
            started: Instant::now(),
            rng,
            time: 0.0,
            state: config.initial_state,
            steps: 0,
            trajectory: Trajectory::new(config.initial_state),
            status: Status::Running,
        })
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Performs one transition. Once the status leaves `Running` further
    /// calls are no-ops.
    ///
    /// Absorption and the horizon are checked before any budget, so a run
    /// that has run its course is never reported as cut short.
    pub fn step(&mut self) -> &Status {
        if !self.status.is_running() {
            return &self.status;
        }

        let propensities = evaluate(self.network, &self.state, &self.rates);
        let total = propensities.total();
        if total <= 0.0 {
            return self.finish(Status::Terminated(StopReason::Absorbed));
        }

        let u1: f64 = self.rng.sample(OpenClosed01);
        let tau = -u1.ln() / total;
        let next_time = advance(self.time, tau);
        if next_time > self.horizon {
            return self.finish(Status::Terminated(StopReason::HorizonReached));
        }
        if let Some(reason) = self.budget_exhausted() {
            return self.finish(Status::Terminated(reason));
        }

        let u2: f64 = self.rng.r#gen();
        let Some(reaction) = propensities.select(u2) else {
            return self.finish(Status::Terminated(StopReason::Absorbed));
        };

        let next_state = match self.network.apply(&self.state, reaction) {
            Ok(next) => next,
            Err(err) => {
                let species = err.species();
                log::warn!(
                    "Reaction {} ('{}') would take {} out of range ({:?}) at t={}",
                    reaction,
                    self.network.reactions()[reaction].label(),
                    species,
                    err,
                    next_time
                );
                let failure = match err {
                    CountError::Underflow(_) => SimError::NegativeState {
                        reaction,
                        species,
                        time: next_time,
                    },
                    CountError::Overflow(_) => SimError::CountOverflow {
                        reaction,
                        species,
                        time: next_time,
                    },
                };
                return self.finish(Status::Failed(failure));
            }
        };
        if let Err(err) = self.trajectory.record(next_time, next_state) {
            return self.finish(Status::Failed(err));
        }

        self.time = next_time;
        self.state = next_state;
        self.steps += 1;
        log::trace!("t={:.6} fired reaction {}", self.time, reaction);
        &self.status
    }

    /// Steps until the run terminates or fails.
    pub fn run(mut self) -> SimulationResult {
        while self.status.is_running() {
            self.step();
        }
        self.into_result()
    }

    /// Hands back what has been recorded so far, whatever the status.
    pub fn into_result(self) -> SimulationResult {
        SimulationResult {
            trajectory: self.trajectory,
            status: self.status,
            steps: self.steps,
        }
    }

    fn budget_exhausted(&self) -> Option<StopReason> {
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Some(StopReason::Cancelled);
        }
        if self.max_iterations.is_some_and(|max| self.steps >= max) {
            return Some(StopReason::IterationBudgetExceeded);
        }
        if self
            .wall_clock_budget
            .is_some_and(|budget| self.started.elapsed() >= budget)
        {
            return Some(StopReason::WallClockBudgetExceeded);
        }
        None
    }

    fn finish(&mut self, status: Status) -> &Status {
        log::debug!(
            "SSA run finished: {} after {} steps at t={}",
            status.label(),
            self.steps,
            self.time
        );
        self.status = status;
        &self.status
    }
}

/// Validates `config`, seeds a generator from it and runs to completion.
/// Configuration errors are returned before any step is taken; runtime
/// failures are reported in the result's status.
pub fn simulate(
    network: &ReactionNetwork,
    config: &SimulationConfig,
) -> Result<SimulationResult, SimError> {
    Ok(EventScheduler::seeded(network, config)?.run())
}

/// `time + tau`, or the next representable time when `tau` is too small to
/// move the clock. `time` is finite and non-negative.
#[inline]
pub(crate) fn advance(time: f64, tau: f64) -> f64 {
    let next = time + tau;
    if next > time {
        next
    } else {
        f64::from_bits(time.to_bits() + 1)
    }
}
