//! Platform-neutral workout model.

pub mod container;
pub mod types;

pub use container::{Identified, StepSelector};
pub use types::{
    CompositeStep, LeafStep, Sport, StepType, Workout, WorkoutError, WorkoutStep,
    MAX_EXPANDED_INTERVALS,
};
