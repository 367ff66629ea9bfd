use thiserror::Error;

use crate::species::Species;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error(
        "negative state encountered: reaction {reaction} would drive {species} below zero at t={time}"
    )]
    NegativeState {
        reaction: usize,
        species: Species,
        time: f64,
    },
    #[error(
        "count overflow: reaction {reaction} would push {species} past u32::MAX at t={time}"
    )]
    CountOverflow {
        reaction: usize,
        species: Species,
        time: f64,
    },
    #[error("out-of-order snapshot: {0}")]
    OutOfOrder(String),
    #[error("thread pool error: {0}")]
    ThreadPool(String),
    #[error("failed to read configuration: {0}")]
    Io(String),
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

impl SimError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
