//! Unit tests for the Garmin → generic workout mapper.

use chrono::NaiveDate;
use whooshsync::integrations::garmin::mapper::{
    classify_step, map_atomic_step, map_composite_step, map_scheduled_workout, map_workout,
    GarminMapperOptions,
};
use whooshsync::integrations::garmin::{GarminWorkout, GarminWorkoutStep};
use whooshsync::integrations::{MappingError, StepShape};
use whooshsync::workouts::{Sport, StepType, WorkoutError, WorkoutStep};

const REPEAT_WORKOUT: &str = include_str!("../resources/garmin/workout_repeat.json");

fn garmin_workout() -> GarminWorkout {
    serde_json::from_str(REPEAT_WORKOUT).expect("fixture should parse")
}

fn top_level_steps(workout: &GarminWorkout) -> &[GarminWorkoutStep] {
    &workout.workout_segments[0].workout_steps
}

#[test]
fn test_map_fixture_workout() {
    let workout = map_workout(&garmin_workout(), &GarminMapperOptions::default()).unwrap();

    assert_eq!(workout.name, "Sweet Spot: 2x(5'/2')");
    assert_eq!(workout.description, "Sweet spot repeats");
    assert_eq!(workout.sport, Sport::Cycling);
    assert_eq!(workout.scheduled_date, None);
    assert_eq!(workout.steps().len(), 3);

    // 600 + 2 × (300 + 120) + 30 (lap button default)
    assert_eq!(workout.duration_seconds(), 1470);
    assert_eq!(workout.number_of_intervals(), 6);
}

#[test]
fn test_step_details() {
    let workout = map_workout(&garmin_workout(), &GarminMapperOptions::default()).unwrap();

    let warmup = workout.steps()[0].as_leaf().unwrap();
    assert_eq!(warmup.step_type, StepType::WarmUp);
    assert_eq!(warmup.power_zone, Some(2));
    assert_eq!(warmup.description.as_deref(), Some("Easy spin"));

    let WorkoutStep::Composite(block) = &workout.steps()[1] else {
        panic!("second step should be a repeat block");
    };
    assert_eq!(block.iterations(), 2);
    assert_eq!(block.intervals().len(), 2);
    assert_eq!(block.intervals()[0].cadence, Some(90));
    assert_eq!(block.intervals()[0].power_zone, Some(4));
    assert_eq!(block.intervals()[1].step_type, StepType::Recovery);

    let cooldown = workout.steps()[2].as_leaf().unwrap();
    assert_eq!(cooldown.step_type, StepType::FreeRide);
    assert_eq!(cooldown.power_zone, None);
    assert_eq!(cooldown.duration_seconds, 30);
}

#[test]
fn test_lap_button_duration_option() {
    let options = GarminMapperOptions {
        lap_button_duration_seconds: 90,
    };

    let workout = map_workout(&garmin_workout(), &options).unwrap();

    assert_eq!(workout.steps()[2].duration_seconds(), 90);
}

#[test]
fn test_classify_and_structure_mismatch() {
    let garmin = garmin_workout();
    let steps = top_level_steps(&garmin);
    let options = GarminMapperOptions::default();

    assert_eq!(classify_step(&steps[0]), StepShape::Atomic);
    assert_eq!(classify_step(&steps[1]), StepShape::Composite);

    assert!(matches!(
        map_atomic_step(&steps[1], &options),
        Err(MappingError::StructureMismatch {
            expected: StepShape::Atomic,
            found: StepShape::Composite
        })
    ));
    assert!(matches!(
        map_composite_step(&steps[0], &options),
        Err(MappingError::StructureMismatch { .. })
    ));
}

#[test]
fn test_unknown_end_condition_aborts_workout() {
    let mut garmin = garmin_workout();
    let step = &mut garmin.workout_segments[0].workout_steps[0];
    if let Some(condition) = step.end_condition.as_mut() {
        condition.condition_type_key = Some("distance".to_string());
    }

    let err = map_workout(&garmin, &GarminMapperOptions::default()).unwrap_err();

    assert!(matches!(err, MappingError::UnknownEndCondition(kind) if kind == "distance"));
}

#[test]
fn test_missing_iterations() {
    let mut garmin = garmin_workout();
    garmin.workout_segments[0].workout_steps[1].number_of_iterations = None;

    let err = map_workout(&garmin, &GarminMapperOptions::default()).unwrap_err();

    assert!(matches!(err, MappingError::MissingIterations(Some(2))));
}

#[test]
fn test_oversized_repeat_block_rejected() {
    let mut garmin = garmin_workout();
    garmin.workout_segments[0].workout_steps[1].number_of_iterations = Some(2_000_000);

    let err = map_workout(&garmin, &GarminMapperOptions::default()).unwrap_err();

    assert!(matches!(
        err,
        MappingError::Workout(WorkoutError::InvalidComposite(_))
    ));
}

#[test]
fn test_unsupported_sport() {
    let mut garmin = garmin_workout();
    if let Some(sport) = garmin.sport_type.as_mut() {
        sport.sport_type_key = Some("swimming".to_string());
    }

    assert!(matches!(
        map_workout(&garmin, &GarminMapperOptions::default()),
        Err(MappingError::UnsupportedSport(key)) if key == "swimming"
    ));
}

#[test]
fn test_scheduled_workout_date() {
    let date = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();

    let workout =
        map_scheduled_workout(&garmin_workout(), date, &GarminMapperOptions::default()).unwrap();

    assert_eq!(workout.scheduled_date, Some(date));
}
