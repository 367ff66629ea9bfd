//! Kinetic parameters of the oscillator.
//!
//! All rates are in units of 1/h (first order) or 1/(molecule·h) for the
//! bimolecular binding and sequestration steps.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SimError;

pub const N_RATES: usize = 15;

/// Names a single rate constant. Declaration order is the order of the
/// mean-field parameter vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateId {
    AlphaA,
    AlphaAPrime,
    AlphaR,
    AlphaRPrime,
    BetaA,
    BetaR,
    DeltaMa,
    DeltaMr,
    DeltaA,
    DeltaR,
    GammaA,
    GammaR,
    GammaC,
    ThetaA,
    ThetaR,
}

impl RateId {
    pub const ALL: [RateId; N_RATES] = [
        RateId::AlphaA,
        RateId::AlphaAPrime,
        RateId::AlphaR,
        RateId::AlphaRPrime,
        RateId::BetaA,
        RateId::BetaR,
        RateId::DeltaMa,
        RateId::DeltaMr,
        RateId::DeltaA,
        RateId::DeltaR,
        RateId::GammaA,
        RateId::GammaR,
        RateId::GammaC,
        RateId::ThetaA,
        RateId::ThetaR,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RateId::AlphaA => "alpha_a",
            RateId::AlphaAPrime => "alpha_a_prime",
            RateId::AlphaR => "alpha_r",
            RateId::AlphaRPrime => "alpha_r_prime",
            RateId::BetaA => "beta_a",
            RateId::BetaR => "beta_r",
            RateId::DeltaMa => "delta_ma",
            RateId::DeltaMr => "delta_mr",
            RateId::DeltaA => "delta_a",
            RateId::DeltaR => "delta_r",
            RateId::GammaA => "gamma_a",
            RateId::GammaR => "gamma_r",
            RateId::GammaC => "gamma_c",
            RateId::ThetaA => "theta_a",
            RateId::ThetaR => "theta_r",
        }
    }

    /// Accepts the snake_case name, case-insensitively, so the original
    /// `alpha_A_prime` spelling also resolves.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for RateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RateConstants {
    /// Basal transcription of the activator gene.
    pub alpha_a: f64,
    /// Activated transcription of the activator gene.
    pub alpha_a_prime: f64,
    /// Basal transcription of the repressor gene.
    pub alpha_r: f64,
    /// Activated transcription of the repressor gene.
    pub alpha_r_prime: f64,
    /// Translation of activator mRNA.
    pub beta_a: f64,
    /// Translation of repressor mRNA.
    pub beta_r: f64,
    /// Activator mRNA decay.
    pub delta_ma: f64,
    /// Repressor mRNA decay.
    pub delta_mr: f64,
    /// Activator decay, free and within the complex.
    pub delta_a: f64,
    /// Repressor decay.
    pub delta_r: f64,
    /// Activator binding to the activator promoter.
    pub gamma_a: f64,
    /// Activator binding to the repressor promoter.
    pub gamma_r: f64,
    /// Activator–repressor complex formation.
    pub gamma_c: f64,
    /// Activator unbinding from the activator promoter.
    pub theta_a: f64,
    /// Activator unbinding from the repressor promoter.
    pub theta_r: f64,
}

impl Default for RateConstants {
    fn default() -> Self {
        Self {
            alpha_a: 50.0,
            alpha_a_prime: 500.0,
            alpha_r: 0.01,
            alpha_r_prime: 50.0,
            beta_a: 50.0,
            beta_r: 5.0,
            delta_ma: 10.0,
            delta_mr: 0.5,
            delta_a: 1.0,
            delta_r: 0.2,
            gamma_a: 1.0,
            gamma_r: 1.0,
            gamma_c: 2.0,
            theta_a: 50.0,
            theta_r: 100.0,
        }
    }
}

impl RateConstants {
    /// Canonical set with repressor decay lowered to 0.05/h.
    pub fn slow_repressor_decay() -> Self {
        Self::default().with(RateId::DeltaR, 0.05)
    }

    /// Every constant set to the same value; `uniform(0.0)` freezes the network.
    pub fn uniform(value: f64) -> Self {
        Self::from_ordered([value; N_RATES])
    }

    pub fn from_ordered(values: [f64; N_RATES]) -> Self {
        let [
            alpha_a,
            alpha_a_prime,
            alpha_r,
            alpha_r_prime,
            beta_a,
            beta_r,
            delta_ma,
            delta_mr,
            delta_a,
            delta_r,
            gamma_a,
            gamma_r,
            gamma_c,
            theta_a,
            theta_r,
        ] = values;
        Self {
            alpha_a,
            alpha_a_prime,
            alpha_r,
            alpha_r_prime,
            beta_a,
            beta_r,
            delta_ma,
            delta_mr,
            delta_a,
            delta_r,
            gamma_a,
            gamma_r,
            gamma_c,
            theta_a,
            theta_r,
        }
    }

    pub fn to_ordered(&self) -> [f64; N_RATES] {
        RateId::ALL.map(|id| self.get(id))
    }

    /// Builds a rate set from name/value pairs. Every constant must be named
    /// exactly once.
    pub fn from_named(values: &HashMap<String, f64>) -> Result<Self, SimError> {
        let mut ordered = [f64::NAN; N_RATES];
        let mut seen = [false; N_RATES];
        for (name, &value) in values {
            let id = RateId::from_name(name)
                .ok_or_else(|| SimError::config(format!("unknown rate constant '{name}'")))?;
            let slot = id as usize;
            if seen[slot] {
                return Err(SimError::config(format!(
                    "rate constant '{}' given more than once",
                    id
                )));
            }
            seen[slot] = true;
            ordered[slot] = value;
        }
        if let Some(missing) = RateId::ALL.into_iter().find(|&id| !seen[id as usize]) {
            return Err(SimError::config(format!(
                "missing rate constant '{missing}'"
            )));
        }
        let rates = Self::from_ordered(ordered);
        rates.validate()?;
        Ok(rates)
    }

    #[inline]
    pub fn get(&self, id: RateId) -> f64 {
        match id {
            RateId::AlphaA => self.alpha_a,
            RateId::AlphaAPrime => self.alpha_a_prime,
            RateId::AlphaR => self.alpha_r,
            RateId::AlphaRPrime => self.alpha_r_prime,
            RateId::BetaA => self.beta_a,
            RateId::BetaR => self.beta_r,
            RateId::DeltaMa => self.delta_ma,
            RateId::DeltaMr => self.delta_mr,
            RateId::DeltaA => self.delta_a,
            RateId::DeltaR => self.delta_r,
            RateId::GammaA => self.gamma_a,
            RateId::GammaR => self.gamma_r,
            RateId::GammaC => self.gamma_c,
            RateId::ThetaA => self.theta_a,
            RateId::ThetaR => self.theta_r,
        }
    }

    pub fn with(mut self, id: RateId, value: f64) -> Self {
        let slot = match id {
            RateId::AlphaA => &mut self.alpha_a,
            RateId::AlphaAPrime => &mut self.alpha_a_prime,
            RateId::AlphaR => &mut self.alpha_r,
            RateId::AlphaRPrime => &mut self.alpha_r_prime,
            RateId::BetaA => &mut self.beta_a,
            RateId::BetaR => &mut self.beta_r,
            RateId::DeltaMa => &mut self.delta_ma,
            RateId::DeltaMr => &mut self.delta_mr,
            RateId::DeltaA => &mut self.delta_a,
            RateId::DeltaR => &mut self.delta_r,
            RateId::GammaA => &mut self.gamma_a,
            RateId::GammaR => &mut self.gamma_r,
            RateId::GammaC => &mut self.gamma_c,
            RateId::ThetaA => &mut self.theta_a,
            RateId::ThetaR => &mut self.theta_r,
        };
        *slot = value;
        self
    }

    /// Rejects negative and non-finite constants. A zero rate is legal and
    /// switches its reaction off.
    pub fn validate(&self) -> Result<(), SimError> {
        for id in RateId::ALL {
            let value = self.get(id);
            if !value.is_finite() || value < 0.0 {
                return Err(SimError::config(format!(
                    "rate constant '{id}' must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}
