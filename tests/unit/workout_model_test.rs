//! Unit tests for the generic workout model.

use whooshsync::workouts::{
    CompositeStep, Identified, LeafStep, Sport, StepSelector, StepType, Workout, WorkoutError,
    WorkoutStep,
};

fn atomic(id: u32, step_type: StepType, seconds: u32, zone: Option<u8>) -> WorkoutStep {
    WorkoutStep::Atomic(LeafStep::new(id, step_type, seconds, zone))
}

fn repeat_block(id: u32) -> CompositeStep {
    CompositeStep::new(
        id,
        StepType::Interval,
        2,
        vec![
            LeafStep::new(1, StepType::Interval, 120, Some(5)),
            LeafStep::new(2, StepType::Recovery, 60, Some(1)),
        ],
    )
    .expect("valid repeat block")
}

fn sample_workout() -> Workout {
    Workout::new(
        "Sample",
        "Warm up, repeats, cool down",
        Sport::Cycling,
        vec![
            atomic(1, StepType::WarmUp, 30, Some(2)),
            WorkoutStep::Composite(repeat_block(2)),
            atomic(3, StepType::CoolDown, 300, Some(1)),
        ],
    )
}

fn ids(workout: &Workout) -> Vec<u32> {
    workout.steps().iter().map(|s| s.step_id()).collect()
}

#[test]
fn test_composite_duration() {
    assert_eq!(repeat_block(1).duration_seconds(), 360);
}

#[test]
fn test_workout_duration_and_interval_count() {
    let workout = sample_workout();

    assert_eq!(workout.duration_seconds(), 30 + 360 + 300);
    assert_eq!(workout.number_of_intervals(), 6);
}

#[test]
fn test_flatten_expands_repeat_blocks() {
    let mut workout = sample_workout();

    let flat = workout.flatten_steps();

    assert_eq!(flat.len(), 6);
    assert_eq!(
        flat.iter().map(WorkoutStep::duration_seconds).sum::<u32>(),
        690
    );
    assert!(flat.iter().all(|s| s.as_leaf().is_some()));
    assert!(matches!(flat[0], WorkoutStep::Atomic(_)));
    assert!(matches!(flat[1], WorkoutStep::Interval(_)));
    assert!(matches!(flat[5], WorkoutStep::Atomic(_)));

    let durations: Vec<u32> = flat.iter().map(WorkoutStep::duration_seconds).collect();
    assert_eq!(durations, vec![30, 120, 60, 120, 60, 300]);
}

#[test]
fn test_add_step_appends_and_reindexes() {
    let mut workout = Workout::new(
        "Reorder",
        "",
        Sport::Cycling,
        vec![
            atomic(7, StepType::Interval, 60, Some(3)),
            atomic(3, StepType::WarmUp, 60, Some(2)),
        ],
    );

    // Construction sorts by the given ids: the warm-up comes first.
    assert_eq!(workout.steps()[0].step_type(), StepType::WarmUp);
    assert_eq!(ids(&workout), vec![1, 2]);

    workout.add_step(atomic(1, StepType::CoolDown, 60, None));

    assert_eq!(ids(&workout), vec![1, 2, 3]);
    assert_eq!(workout.steps()[2].step_type(), StepType::CoolDown);
}

#[test]
fn test_remove_step() {
    let mut workout = sample_workout();

    let removed = workout.remove_step(StepSelector::Id(2)).unwrap();
    assert!(matches!(removed, WorkoutStep::Composite(_)));
    assert_eq!(ids(&workout), vec![1, 2]);
    assert_eq!(workout.steps()[1].duration_seconds(), 300);

    let last = workout.remove_step(StepSelector::Last).unwrap();
    assert_eq!(last.duration_seconds(), 300);
    assert_eq!(ids(&workout), vec![1]);
}

#[test]
fn test_remove_errors() {
    let mut workout = sample_workout();
    assert!(matches!(
        workout.remove_step(StepSelector::Id(42)),
        Err(WorkoutError::StepNotFound(42))
    ));

    let mut empty = Workout::new("Empty", "", Sport::Running, Vec::new());
    assert!(matches!(
        empty.remove_step(StepSelector::Last),
        Err(WorkoutError::EmptyContainer)
    ));
}

#[test]
fn test_lookup() {
    let workout = sample_workout();

    assert!(workout.find_step(3).is_some());
    assert!(workout.find_step(4).is_none());
    assert_eq!(workout.get_step_by_id(1).unwrap().duration_seconds(), 30);
    assert!(matches!(
        workout.get_step_by_id(4),
        Err(WorkoutError::StepNotFound(4))
    ));

    let block = repeat_block(1);
    assert_eq!(block.find_interval(2).map(|s| s.duration_seconds), Some(60));
    assert!(matches!(
        block.get_interval_by_id(3),
        Err(WorkoutError::StepNotFound(3))
    ));
}

#[test]
fn test_composite_mutation() {
    let mut block = repeat_block(1);

    block
        .add_step(LeafStep::new(1, StepType::Interval, 30, Some(6)))
        .unwrap();
    assert_eq!(block.intervals().len(), 3);
    assert_eq!(block.intervals()[2].step_id, 3);
    assert_eq!(block.duration_seconds(), 2 * (120 + 60 + 30));

    let removed = block.remove_step(StepSelector::Id(1)).unwrap();
    assert_eq!(removed.duration_seconds, 120);
    let remaining: Vec<u32> = block.intervals().iter().map(|s| s.step_id).collect();
    assert_eq!(remaining, vec![1, 2]);
}

#[test]
fn test_invalid_composite() {
    let interval = LeafStep::new(1, StepType::Interval, 60, Some(3));

    assert!(matches!(
        CompositeStep::new(1, StepType::Interval, 0, vec![interval]),
        Err(WorkoutError::InvalidComposite(_))
    ));
    assert!(matches!(
        CompositeStep::new(1, StepType::Interval, 3, Vec::new()),
        Err(WorkoutError::InvalidComposite(_))
    ));
}

#[test]
fn test_sport_keys() {
    assert_eq!(Sport::from_key("CYCLING"), Some(Sport::Cycling));
    assert_eq!(
        Sport::from_key("cross_country_skiing"),
        Some(Sport::CrossCountrySkiing)
    );
    assert_eq!(Sport::from_key("swimming"), None);
    assert_eq!("running".parse::<Sport>(), Ok(Sport::Running));
}
