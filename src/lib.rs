//! Exact stochastic simulation of a synthetic activator/repressor genetic
//! oscillator.
//!
//! The network has nine species (two genes in free and activator-bound
//! form, two mRNAs, two proteins and the activator–repressor complex) and
//! sixteen mass-action reactions. [`EventScheduler`] runs the Gillespie
//! direct method over it and records every event in a [`Trajectory`].
//!
//! ```no_run
//! use oscillator_ssa::{ReactionNetwork, SimulationConfig, Species, simulate};
//!
//! let network = ReactionNetwork::oscillator();
//! let config = SimulationConfig::default().with_seed(7);
//! let result = simulate(&network, &config)?;
//! let (times, activator) = result.trajectory.columns(Species::Activator);
//! # let _ = (times, activator);
//! # Ok::<(), oscillator_ssa::SimError>(())
//! ```

pub mod comparator;
pub mod config;
pub mod ensemble;
pub mod error;
pub mod network;
pub mod propensity;
pub mod rates;
pub mod scheduler;
pub mod species;
pub mod trajectory;

#[cfg(feature = "python")]
mod python;

pub use comparator::{
    DeterministicComparator, DeterministicTrajectory, IntegrationMethod, RateEquations,
    SpeciesComparison, compare_species, time_grid,
};
pub use config::SimulationConfig;
pub use ensemble::{derive_seed, ensemble_mean, run_ensemble, run_replicates};
pub use error::SimError;
pub use network::{N_REACTIONS, RateLaw, Reaction, ReactionNetwork};
pub use propensity::{Propensities, evaluate, select_reaction};
pub use rates::{N_RATES, RateConstants, RateId};
pub use scheduler::{CancelToken, EventScheduler, SimulationResult, Status, StopReason, simulate};
pub use species::{CountError, N_SPECIES, Species, State};
pub use trajectory::Trajectory;
