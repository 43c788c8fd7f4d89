//! Errors raised by plan validation and the scenario store.
use thiserror::Error;

use crate::scenario::ScenarioId;

/// Errors raised when a plan cannot be run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("plan has no channels selected")]
    EmptyChannels,
    #[error("channel {channel:?} is listed more than once")]
    DuplicateChannel { channel: String },
    #[error("streaming platform {platform:?} is listed more than once")]
    DuplicatePlatform { platform: String },
    #[error("{field} must not be blank")]
    BlankLabel { field: &'static str },
    #[error("at least {min} channels required (got {got})")]
    TooFewChannels { min: usize, got: usize },
    #[error("at least {min} waves required (got {got})")]
    TooFewWaves { min: usize, got: usize },
    #[error("{field} must be at least {min} (got {value})")]
    InvalidGuards {
        field: &'static str,
        min: usize,
        value: usize,
    },
}

/// Errors raised by scenario store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("scenario name must not be blank")]
    BlankName,
    #[error("scenario {id} not found")]
    NotFound { id: ScenarioId },
    #[error("comparison needs at least {min} scenarios (got {got})")]
    TooFewToCompare { min: usize, got: usize },
}

/// Errors raised by a full plan run.
#[derive(Debug, Error)]
pub enum RunError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error("taxonomy lookup failed: {0}")]
    Taxonomy(#[source] E),
}
