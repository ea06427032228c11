//! Generic workout → MyWhoosh workout mapping.
//!
//! MyWhoosh expresses power as a ratio of FTP, so a zone target is turned
//! into one ratio inside the zone (see [`power_target`]). Repeat blocks are
//! written out literally because MyWhoosh has no repeat construct.

use super::dto::{MyWhooshWorkout, MyWhooshWorkoutStep, STEP_TYPE_FREE_RIDE, STEP_TYPE_NORMAL};
use crate::integrations::error::MappingError;
use crate::metrics::zone_config::PowerZoneConfiguration;
use crate::metrics::zones::{PowerZones, ZONE_COUNT};
use crate::workouts::{LeafStep, StepType, Workout, WorkoutStep};

/// Inputs of the power target calculation.
#[derive(Debug, Clone, Default)]
pub struct MyWhooshMapperOptions {
    /// Zones of the athlete; required for any power target
    pub power_zones: Option<PowerZones>,
    /// Weighting rules inside each zone
    pub config: PowerZoneConfiguration,
}

impl MyWhooshMapperOptions {
    pub fn new(power_zones: PowerZones, config: PowerZoneConfiguration) -> Self {
        Self {
            power_zones: Some(power_zones),
            config,
        }
    }
}

/// Power target for a zone, as a ratio of FTP.
///
/// Zones 1-6 interpolate between floor and ceiling using the zone weight.
/// Zone 7 has no usable ceiling and scales its floor by the configured
/// multiplier. No zone means free ride and a target of 0.
pub fn power_target(
    zone: Option<u8>,
    power_zones: Option<&PowerZones>,
    config: &PowerZoneConfiguration,
) -> Result<f64, MappingError> {
    let power_zones = power_zones.ok_or(MappingError::MissingPowerZones)?;

    let Some(zone) = zone else {
        return Ok(0.0);
    };

    let (floor, ceiling) = power_zones.get_zone(zone)?;

    if zone == ZONE_COUNT {
        return Ok(floor * config.zone7_multiplier());
    }

    Ok(floor + (ceiling - floor) * config.zone_weight(zone))
}

fn map_leaf(
    step: &LeafStep,
    options: &MyWhooshMapperOptions,
) -> Result<MyWhooshWorkoutStep, MappingError> {
    let step_type = if step.step_type == StepType::FreeRide {
        STEP_TYPE_FREE_RIDE
    } else {
        STEP_TYPE_NORMAL
    };

    let power = power_target(
        step.power_zone,
        options.power_zones.as_ref(),
        &options.config,
    )?;

    Ok(MyWhooshWorkoutStep {
        step_type: step_type.to_string(),
        id: step.step_id,
        workout_message: step.description.iter().cloned().collect(),
        rpm: step.cadence.unwrap_or(0),
        power,
        time: step.duration_seconds,
        ..Default::default()
    })
}

/// Map one step. A repeat block maps each interval once and repeats the
/// resulting sequence `iterations` times; ids are left as they are.
pub fn map_step(
    step: &WorkoutStep,
    options: &MyWhooshMapperOptions,
) -> Result<Vec<MyWhooshWorkoutStep>, MappingError> {
    match step {
        WorkoutStep::Atomic(leaf) | WorkoutStep::Interval(leaf) => {
            Ok(vec![map_leaf(leaf, options)?])
        }
        WorkoutStep::Composite(composite) => {
            let single_pass = composite
                .intervals()
                .iter()
                .map(|interval| map_leaf(interval, options))
                .collect::<Result<Vec<_>, _>>()?;

            let iterations = composite.iterations() as usize;
            let mut mapped = Vec::with_capacity(single_pass.len() * iterations);
            for _ in 0..iterations {
                mapped.extend(single_pass.iter().cloned());
            }
            Ok(mapped)
        }
    }
}

/// Output name: optional `YYYYMMDD` date, a space, and the workout name
/// reduced to ASCII letters, digits and whitespace.
pub fn workout_name(workout: &Workout) -> String {
    let date = workout
        .scheduled_date
        .map(|d| d.format("%Y%m%d").to_string())
        .unwrap_or_default();
    let name: String = workout
        .name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    format!("{} {}", date, name)
}

/// Duration-weighted intensity factor, TSS and kilojoules of mapped steps.
fn estimates(steps: &[MyWhooshWorkoutStep], ftp: u32) -> (f64, f64, f64) {
    let total_seconds: u64 = steps.iter().map(|s| u64::from(s.time)).sum();
    if total_seconds == 0 {
        return (0.0, 0.0, 0.0);
    }

    let weighted_ratio: f64 = steps.iter().map(|s| s.power * s.time as f64).sum();
    let intensity_factor = weighted_ratio / total_seconds as f64;
    let hours = total_seconds as f64 / 3600.0;
    let tss = hours * intensity_factor * intensity_factor * 100.0;
    let kj = weighted_ratio * ftp as f64 / 1000.0;

    (intensity_factor, tss, kj)
}

/// Map a full workout.
///
/// Repeat blocks are expanded by [`Workout::flatten_steps`], each leaf is
/// mapped, and the output steps are renumbered from 1.
pub fn map_workout(
    workout: &Workout,
    options: &MyWhooshMapperOptions,
) -> Result<MyWhooshWorkout, MappingError> {
    let mut source = workout.clone();

    let mut steps = Vec::with_capacity(source.number_of_intervals());
    for leaf in source.flatten_steps() {
        steps.extend(map_step(&leaf, options)?);
    }

    for (idx, step) in steps.iter_mut().enumerate() {
        step.id = idx as u32 + 1;
    }

    let ftp = options.power_zones.as_ref().map(|z| z.ftp).unwrap_or_default();
    let (intensity_factor, tss, kj) = estimates(&steps, ftp);

    let mapped = MyWhooshWorkout {
        name: workout_name(workout),
        description: workout.description.clone(),
        time: workout.duration_seconds(),
        step_count: steps.len(),
        is_intervals: workout
            .steps()
            .iter()
            .any(|s| matches!(s, WorkoutStep::Composite(_))),
        workout_steps_array: steps,
        intensity_factor,
        tss,
        kj,
        ..Default::default()
    };

    tracing::debug!(
        "Mapped workout {:?}: {} steps, {}s",
        mapped.name,
        mapped.step_count,
        mapped.time
    );

    Ok(mapped)
}
