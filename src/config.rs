//! Run configuration, loadable from JSON.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::rates::RateConstants;
use crate::species::State;

pub const DEFAULT_HORIZON_HOURS: f64 = 400.0;
pub const DEFAULT_MAX_ITERATIONS: u64 = 10_000_000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub initial_state: State,
    pub rates: RateConstants,
    /// Simulated time limit in hours.
    pub horizon: f64,
    pub seed: u64,
    /// Maximum number of reaction events; `None` runs until the horizon.
    pub max_iterations: Option<u64>,
    pub wall_clock_budget_secs: Option<f64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_state: State::CANONICAL,
            rates: RateConstants::default(),
            horizon: DEFAULT_HORIZON_HOURS,
            seed: 0,
            max_iterations: Some(DEFAULT_MAX_ITERATIONS),
            wall_clock_budget_secs: None,
        }
    }
}

impl SimulationConfig {
    pub fn from_json_str(contents: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(contents).map_err(|e| {
            // Missing or unknown rate names surface as serde data errors.
            if e.is_data() {
                SimError::InvalidConfiguration(e.to_string())
            } else {
                SimError::Parse(e.to_string())
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SimError::Io(format!("{}: {e}", path.display())))?;
        let config = Self::from_json_str(&contents)?;
        log::info!("Loaded simulation configuration from {:?}", path);
        Ok(config)
    }

    /// Loads from `path`, falling back to the canonical configuration when
    /// the file is missing or invalid.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(SimError::Io(_)) => {
                log::info!("Simulation configuration file not found, using defaults");
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to load simulation configuration: {}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn to_json_string(&self) -> Result<String, SimError> {
        serde_json::to_string_pretty(self).map_err(|e| SimError::Parse(e.to_string()))
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_horizon(mut self, horizon: f64) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_rates(mut self, rates: RateConstants) -> Self {
        self.rates = rates;
        self
    }

    pub fn wall_clock_budget(&self) -> Option<Duration> {
        self.wall_clock_budget_secs
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !self.horizon.is_finite() || self.horizon < 0.0 {
            return Err(SimError::config(format!(
                "horizon must be finite and non-negative, got {}",
                self.horizon
            )));
        }
        if let Some(secs) = self.wall_clock_budget_secs {
            if !secs.is_finite() || secs <= 0.0 {
                return Err(SimError::config(format!(
                    "wall-clock budget must be finite and positive, got {secs}"
                )));
            }
        }
        self.rates.validate()
    }
}
