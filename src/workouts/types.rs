//! Platform-neutral workout types.
//!
//! A [`Workout`] is an ordered list of [`WorkoutStep`]s. Repeat blocks are
//! [`CompositeStep`]s whose children are plain [`LeafStep`]s, so composites
//! cannot nest.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::container::{self, Identified, StepSelector};

/// Intent of a workout step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepType {
    WarmUp,
    CoolDown,
    Recovery,
    Interval,
    /// No power target
    FreeRide,
}

impl std::fmt::Display for StepType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepType::WarmUp => write!(f, "Warm Up"),
            StepType::CoolDown => write!(f, "Cool Down"),
            StepType::Recovery => write!(f, "Recovery"),
            StepType::Interval => write!(f, "Interval"),
            StepType::FreeRide => write!(f, "Free Ride"),
        }
    }
}

/// Sport a workout is planned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sport {
    Cycling,
    Running,
    CrossCountrySkiing,
}

impl Sport {
    /// Parse a sport key such as `cycling` or `CROSS_COUNTRY_SKIING`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "cycling" => Some(Sport::Cycling),
            "running" => Some(Sport::Running),
            "cross_country_skiing" => Some(Sport::CrossCountrySkiing),
            _ => None,
        }
    }

    /// Lowercase key as used in plan and workout payloads.
    pub fn key(&self) -> &'static str {
        match self {
            Sport::Cycling => "cycling",
            Sport::Running => "running",
            Sport::CrossCountrySkiing => "cross_country_skiing",
        }
    }
}

impl std::fmt::Display for Sport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sport::Cycling => write!(f, "Cycling"),
            Sport::Running => write!(f, "Running"),
            Sport::CrossCountrySkiing => write!(f, "Cross Country Skiing"),
        }
    }
}

impl std::str::FromStr for Sport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sport::from_key(s).ok_or_else(|| format!("unsupported sport: {}", s))
    }
}

/// A step with its own duration and target: a standalone (atomic) step or a
/// child of a repeat block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafStep {
    /// Position within the owning container (1-based after reindexing)
    pub step_id: u32,
    /// Step intent
    pub step_type: StepType,
    /// Optional on-screen message
    pub description: Option<String>,
    /// Duration in seconds
    pub duration_seconds: u32,
    /// Power zone 1-7, `None` for no target
    pub power_zone: Option<u8>,
    /// Optional cadence target in RPM
    pub cadence: Option<u16>,
}

impl LeafStep {
    /// Create a step with no description and no cadence target.
    pub fn new(
        step_id: u32,
        step_type: StepType,
        duration_seconds: u32,
        power_zone: Option<u8>,
    ) -> Self {
        Self {
            step_id,
            step_type,
            description: None,
            duration_seconds,
            power_zone,
            cadence: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_cadence(mut self, rpm: u16) -> Self {
        self.cadence = Some(rpm);
        self
    }
}

impl Identified for LeafStep {
    fn step_id(&self) -> u32 {
        self.step_id
    }

    fn set_step_id(&mut self, step_id: u32) {
        self.step_id = step_id;
    }
}

/// Upper bound on `iterations × intervals` for one repeat block.
pub const MAX_EXPANDED_INTERVALS: usize = 1_000;

/// A repeat block: `iterations` passes over an ordered list of intervals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeStep {
    /// Position within the owning workout
    pub step_id: u32,
    /// Step intent
    pub step_type: StepType,
    /// Optional on-screen message
    pub description: Option<String>,
    iterations: u32,
    intervals: Vec<LeafStep>,
}

impl CompositeStep {
    /// Create a repeat block. Requires at least one iteration, one interval
    /// and at most [`MAX_EXPANDED_INTERVALS`] expanded intervals; the
    /// intervals are reindexed.
    pub fn new(
        step_id: u32,
        step_type: StepType,
        iterations: u32,
        intervals: Vec<LeafStep>,
    ) -> Result<Self, WorkoutError> {
        if iterations == 0 {
            return Err(WorkoutError::InvalidComposite(
                "iterations must be at least 1".to_string(),
            ));
        }
        if intervals.is_empty() {
            return Err(WorkoutError::InvalidComposite(
                "a repeat block needs at least one interval".to_string(),
            ));
        }
        check_expanded_size(iterations, intervals.len())?;

        let mut step = Self {
            step_id,
            step_type,
            description: None,
            iterations,
            intervals,
        };
        step.reindex();
        Ok(step)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn intervals(&self) -> &[LeafStep] {
        &self.intervals
    }

    /// Total duration: `iterations × Σ interval durations`, saturating at
    /// `u32::MAX`.
    ///
    /// This is the only place the iteration count multiplies a duration.
    pub fn duration_seconds(&self) -> u32 {
        let single_pass = self
            .intervals
            .iter()
            .fold(0u32, |total, i| total.saturating_add(i.duration_seconds));
        single_pass.saturating_mul(self.iterations)
    }

    /// Append an interval. Fails if the block would expand past
    /// [`MAX_EXPANDED_INTERVALS`].
    pub fn add_step(&mut self, interval: LeafStep) -> Result<(), WorkoutError> {
        check_expanded_size(self.iterations, self.intervals.len() + 1)?;
        container::push_step(&mut self.intervals, interval);
        Ok(())
    }

    /// Remove an interval. The last remaining interval cannot be removed.
    pub fn remove_step(&mut self, selector: StepSelector) -> Result<LeafStep, WorkoutError> {
        if self.intervals.len() == 1 {
            if let StepSelector::Id(step_id) = selector {
                self.get_interval_by_id(step_id)?;
            }
            return Err(WorkoutError::InvalidComposite(
                "cannot remove the last interval of a repeat block".to_string(),
            ));
        }
        container::remove_step(&mut self.intervals, selector)
    }

    pub fn reindex(&mut self) {
        container::reindex(&mut self.intervals);
    }

    pub fn find_interval(&self, step_id: u32) -> Option<&LeafStep> {
        container::find_step(&self.intervals, step_id)
    }

    /// Interval with the given id, or [`WorkoutError::StepNotFound`].
    pub fn get_interval_by_id(&self, step_id: u32) -> Result<&LeafStep, WorkoutError> {
        self.find_interval(step_id)
            .ok_or(WorkoutError::StepNotFound(step_id))
    }

    /// The intervals repeated `iterations` times, in order.
    pub fn expand(&self) -> impl Iterator<Item = &LeafStep> + '_ {
        (0..self.iterations).flat_map(move |_| self.intervals.iter())
    }
}

fn check_expanded_size(iterations: u32, intervals: usize) -> Result<(), WorkoutError> {
    let expanded = (iterations as usize).saturating_mul(intervals);
    if expanded > MAX_EXPANDED_INTERVALS {
        return Err(WorkoutError::InvalidComposite(format!(
            "{} iterations of {} intervals exceed {} steps",
            iterations, intervals, MAX_EXPANDED_INTERVALS
        )));
    }
    Ok(())
}

/// A single entry of a workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkoutStep {
    /// Standalone step
    Atomic(LeafStep),
    /// Interval, as found inside a repeat block
    Interval(LeafStep),
    /// Repeat block
    Composite(CompositeStep),
}

impl WorkoutStep {
    pub fn step_type(&self) -> StepType {
        match self {
            WorkoutStep::Atomic(s) | WorkoutStep::Interval(s) => s.step_type,
            WorkoutStep::Composite(c) => c.step_type,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            WorkoutStep::Atomic(s) | WorkoutStep::Interval(s) => s.description.as_deref(),
            WorkoutStep::Composite(c) => c.description.as_deref(),
        }
    }

    pub fn duration_seconds(&self) -> u32 {
        match self {
            WorkoutStep::Atomic(s) | WorkoutStep::Interval(s) => s.duration_seconds,
            WorkoutStep::Composite(c) => c.duration_seconds(),
        }
    }

    /// The leaf payload of an atomic or interval step.
    pub fn as_leaf(&self) -> Option<&LeafStep> {
        match self {
            WorkoutStep::Atomic(s) | WorkoutStep::Interval(s) => Some(s),
            WorkoutStep::Composite(_) => None,
        }
    }
}

impl Identified for WorkoutStep {
    fn step_id(&self) -> u32 {
        match self {
            WorkoutStep::Atomic(s) | WorkoutStep::Interval(s) => s.step_id,
            WorkoutStep::Composite(c) => c.step_id,
        }
    }

    fn set_step_id(&mut self, step_id: u32) {
        match self {
            WorkoutStep::Atomic(s) | WorkoutStep::Interval(s) => s.step_id = step_id,
            WorkoutStep::Composite(c) => c.step_id = step_id,
        }
    }
}

/// A structured training workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Workout name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Sport the workout is planned for
    pub sport: Sport,
    /// Date the workout is scheduled on, if any
    pub scheduled_date: Option<NaiveDate>,
    steps: Vec<WorkoutStep>,
}

impl Workout {
    /// Create a workout; the steps are reindexed.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        sport: Sport,
        steps: Vec<WorkoutStep>,
    ) -> Self {
        let mut workout = Self {
            name: name.into(),
            description: description.into(),
            sport,
            scheduled_date: None,
            steps,
        };
        workout.reindex();
        workout
    }

    pub fn with_scheduled_date(mut self, date: NaiveDate) -> Self {
        self.scheduled_date = Some(date);
        self
    }

    pub fn steps(&self) -> &[WorkoutStep] {
        &self.steps
    }

    pub fn add_step(&mut self, step: WorkoutStep) {
        container::push_step(&mut self.steps, step);
    }

    pub fn remove_step(&mut self, selector: StepSelector) -> Result<WorkoutStep, WorkoutError> {
        container::remove_step(&mut self.steps, selector)
    }

    pub fn reindex(&mut self) {
        container::reindex(&mut self.steps);
    }

    pub fn find_step(&self, step_id: u32) -> Option<&WorkoutStep> {
        container::find_step(&self.steps, step_id)
    }

    /// Step with the given id, or [`WorkoutError::StepNotFound`].
    pub fn get_step_by_id(&self, step_id: u32) -> Result<&WorkoutStep, WorkoutError> {
        self.find_step(step_id)
            .ok_or(WorkoutError::StepNotFound(step_id))
    }

    /// Total duration in seconds, repeat blocks included. Saturates at
    /// `u32::MAX`.
    pub fn duration_seconds(&self) -> u32 {
        self.steps
            .iter()
            .fold(0u32, |total, step| total.saturating_add(step.duration_seconds()))
    }

    /// Number of leaf steps the workout expands to.
    pub fn number_of_intervals(&self) -> usize {
        self.steps
            .iter()
            .map(|step| match step {
                WorkoutStep::Composite(c) => {
                    c.intervals().len().saturating_mul(c.iterations() as usize)
                }
                _ => 1,
            })
            .sum()
    }

    /// Expand repeat blocks into their literal leaf sequence.
    ///
    /// The workout is reindexed first so the output follows current ids.
    /// Intervals of a repeat block come out as [`WorkoutStep::Interval`].
    pub fn flatten_steps(&mut self) -> Vec<WorkoutStep> {
        self.reindex();

        let mut flat = Vec::with_capacity(self.number_of_intervals());
        for step in &self.steps {
            match step {
                WorkoutStep::Composite(composite) => {
                    flat.extend(composite.expand().cloned().map(WorkoutStep::Interval));
                }
                leaf => flat.push(leaf.clone()),
            }
        }
        flat
    }
}

/// Errors related to workout model operations.
#[derive(Debug, Error)]
pub enum WorkoutError {
    /// No step carries the requested id
    #[error("Step not found: {0}")]
    StepNotFound(u32),

    /// Removal from a container with no steps
    #[error("No steps to remove")]
    EmptyContainer,

    /// Repeat block violating its invariants
    #[error("Invalid repeat block: {0}")]
    InvalidComposite(String),
}
