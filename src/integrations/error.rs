//! Errors raised while mapping between workout representations.

use thiserror::Error;

use crate::metrics::zones::ZoneError;
use crate::workouts::WorkoutError;

/// Shape of a source step, decided by whether it nests other steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepShape {
    /// Plain step with its own duration
    Atomic,
    /// Repeat block wrapping child steps
    Composite,
}

impl std::fmt::Display for StepShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepShape::Atomic => write!(f, "atomic"),
            StepShape::Composite => write!(f, "composite"),
        }
    }
}

/// Errors during workout mapping. Any of them aborts the workout.
#[derive(Debug, Error)]
pub enum MappingError {
    /// End condition kind the mapper cannot turn into a duration
    #[error("Unknown step end condition: {0}")]
    UnknownEndCondition(String),

    /// Repeat block without a usable iteration count
    #[error("Repeat block at step {0:?} has no number of iterations")]
    MissingIterations(Option<u32>),

    /// Step handed to the mapper for the other shape
    #[error("Expected a {expected} step, got a {found} step")]
    StructureMismatch {
        expected: StepShape,
        found: StepShape,
    },

    /// Required field absent from the source payload
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Sport key outside the supported set
    #[error("Unsupported sport: {0}")]
    UnsupportedSport(String),

    /// Power target requested without power zones
    #[error("No power zones specified")]
    MissingPowerZones,

    #[error(transparent)]
    Zone(#[from] ZoneError),

    #[error(transparent)]
    Workout(#[from] WorkoutError),
}
