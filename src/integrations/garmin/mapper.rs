//! Garmin workout → generic workout mapping.
//!
//! Garmin has no explicit discriminator between plain steps and repeat
//! blocks: a repeat block is any step carrying nested steps. [`classify_step`]
//! makes that decision once and [`map_step`] dispatches on it.

use chrono::NaiveDate;

use super::dto::{GarminTargetType, GarminWorkout, GarminWorkoutStep};
use crate::integrations::error::{MappingError, StepShape};
use crate::storage::config::{AppConfig, DEFAULT_LAP_BUTTON_DURATION_SECONDS};
use crate::workouts::{CompositeStep, LeafStep, Sport, StepType, Workout, WorkoutStep};

const END_CONDITION_TIME: &str = "time";
const END_CONDITION_LAP_BUTTON: &str = "lap.button";
const TARGET_CADENCE: &str = "cadence";

/// Options for the Garmin mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GarminMapperOptions {
    /// Duration assumed for steps ended by a lap button press
    pub lap_button_duration_seconds: u32,
}

impl Default for GarminMapperOptions {
    fn default() -> Self {
        Self {
            lap_button_duration_seconds: DEFAULT_LAP_BUTTON_DURATION_SECONDS,
        }
    }
}

impl From<&AppConfig> for GarminMapperOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            lap_button_duration_seconds: config.lap_button_duration_seconds,
        }
    }
}

/// Decide whether a step is a repeat block.
pub fn classify_step(step: &GarminWorkoutStep) -> StepShape {
    if step.children().is_empty() {
        StepShape::Atomic
    } else {
        StepShape::Composite
    }
}

/// Resolve a step's duration from its end condition.
pub fn step_duration_seconds(
    step: &GarminWorkoutStep,
    options: &GarminMapperOptions,
) -> Result<u32, MappingError> {
    let kind = step
        .end_condition_key()
        .ok_or(MappingError::MissingField("endCondition"))?;

    match kind {
        END_CONDITION_TIME => step
            .end_condition_value
            .map(|seconds| seconds.max(0.0) as u32)
            .ok_or(MappingError::MissingField("endConditionValue")),
        END_CONDITION_LAP_BUTTON => Ok(options.lap_button_duration_seconds),
        other => Err(MappingError::UnknownEndCondition(other.to_string())),
    }
}

/// Classify a step's intent. Steps without a zone are free rides.
pub fn map_step_type(step: &GarminWorkoutStep) -> StepType {
    if step.zone_number.is_none() {
        return StepType::FreeRide;
    }

    match step.step_type_key() {
        Some("warmup") => StepType::WarmUp,
        Some("cooldown") => StepType::CoolDown,
        Some("recovery") => StepType::Recovery,
        Some("interval") | Some("repeat") => StepType::Interval,
        _ => StepType::Interval,
    }
}

fn cadence_from(
    target: Option<&GarminTargetType>,
    low: Option<f64>,
    high: Option<f64>,
) -> Option<u16> {
    let key = target.and_then(|t| t.workout_target_type_key.as_deref())?;
    if key != TARGET_CADENCE {
        return None;
    }

    match (low, high) {
        (Some(low), Some(high)) => Some(((low + high) / 2.0).round() as u16),
        (Some(value), None) | (None, Some(value)) => Some(value.round() as u16),
        (None, None) => None,
    }
}

/// Cadence target in RPM, from the primary or secondary target.
pub fn cadence_target(step: &GarminWorkoutStep) -> Option<u16> {
    cadence_from(
        step.target_type.as_ref(),
        step.target_value_one,
        step.target_value_two,
    )
    .or_else(|| {
        cadence_from(
            step.secondary_target_type.as_ref(),
            step.secondary_target_value_one,
            step.secondary_target_value_two,
        )
    })
}

fn expect_shape(step: &GarminWorkoutStep, expected: StepShape) -> Result<(), MappingError> {
    let found = classify_step(step);
    if found == expected {
        Ok(())
    } else {
        Err(MappingError::StructureMismatch { expected, found })
    }
}

fn map_leaf(
    step: &GarminWorkoutStep,
    options: &GarminMapperOptions,
) -> Result<LeafStep, MappingError> {
    expect_shape(step, StepShape::Atomic)?;

    Ok(LeafStep {
        step_id: step.step_order.unwrap_or_default(),
        step_type: map_step_type(step),
        description: step.description.clone(),
        duration_seconds: step_duration_seconds(step, options)?,
        power_zone: step.zone_number,
        cadence: cadence_target(step),
    })
}

/// Map a top-level plain step.
pub fn map_atomic_step(
    step: &GarminWorkoutStep,
    options: &GarminMapperOptions,
) -> Result<WorkoutStep, MappingError> {
    map_leaf(step, options).map(WorkoutStep::Atomic)
}

/// Map a plain step nested inside a repeat block.
pub fn map_interval_step(
    step: &GarminWorkoutStep,
    options: &GarminMapperOptions,
) -> Result<LeafStep, MappingError> {
    map_leaf(step, options)
}

/// Map a repeat block and its children.
pub fn map_composite_step(
    step: &GarminWorkoutStep,
    options: &GarminMapperOptions,
) -> Result<CompositeStep, MappingError> {
    expect_shape(step, StepShape::Composite)?;

    let iterations = step
        .number_of_iterations
        .filter(|&n| n > 0)
        .ok_or(MappingError::MissingIterations(step.step_order))?;

    let intervals = step
        .children()
        .iter()
        .map(|child| map_interval_step(child, options))
        .collect::<Result<Vec<_>, _>>()?;

    let mut composite = CompositeStep::new(
        step.step_order.unwrap_or_default(),
        map_step_type(step),
        iterations,
        intervals,
    )?;
    composite.description = step.description.clone();

    Ok(composite)
}

/// Map any top-level step, dispatching on its shape.
pub fn map_step(
    step: &GarminWorkoutStep,
    options: &GarminMapperOptions,
) -> Result<WorkoutStep, MappingError> {
    match classify_step(step) {
        StepShape::Atomic => map_atomic_step(step, options),
        StepShape::Composite => map_composite_step(step, options).map(WorkoutStep::Composite),
    }
}

/// Map a full workout. Steps of all segments are concatenated in order and
/// renumbered once at the end.
pub fn map_workout(
    garmin: &GarminWorkout,
    options: &GarminMapperOptions,
) -> Result<Workout, MappingError> {
    let sport_key = garmin
        .sport_type
        .as_ref()
        .and_then(|s| s.sport_type_key.as_deref())
        .ok_or(MappingError::MissingField("sportType"))?;
    let sport = Sport::from_key(sport_key)
        .ok_or_else(|| MappingError::UnsupportedSport(sport_key.to_string()))?;

    let steps = garmin
        .workout_segments
        .iter()
        .flat_map(|segment| segment.workout_steps.iter())
        .map(|step| map_step(step, options))
        .collect::<Result<Vec<_>, _>>()?;

    let workout = Workout::new(
        garmin.workout_name.clone().unwrap_or_default(),
        garmin.description.clone().unwrap_or_default(),
        sport,
        steps,
    );

    tracing::debug!(
        "Mapped Garmin workout {:?} ({} steps, {}s)",
        garmin.workout_id,
        workout.steps().len(),
        workout.duration_seconds()
    );

    Ok(workout)
}

/// Map a workout and attach the date it is scheduled on.
pub fn map_scheduled_workout(
    garmin: &GarminWorkout,
    scheduled_date: NaiveDate,
    options: &GarminMapperOptions,
) -> Result<Workout, MappingError> {
    map_workout(garmin, options).map(|workout| workout.with_scheduled_date(scheduled_date))
}
