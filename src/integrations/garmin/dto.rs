//! Garmin Connect payloads.
//!
//! These mirror the JSON returned by the Garmin Connect API. Garmin omits or
//! nulls many fields, so nearly everything is optional.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Generic `{id, key, displayOrder}` lookup value used across the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarminSportType {
    pub sport_type_id: Option<u32>,
    pub sport_type_key: Option<String>,
    pub display_order: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarminStepType {
    pub step_type_id: Option<u32>,
    pub step_type_key: Option<String>,
    pub display_order: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarminConditionType {
    pub condition_type_id: Option<u32>,
    pub condition_type_key: Option<String>,
    pub display_order: Option<u32>,
    pub displayable: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarminTargetType {
    pub workout_target_type_id: Option<u32>,
    pub workout_target_type_key: Option<String>,
    pub display_order: Option<u32>,
}

/// One step of a workout. Repeat blocks carry their children in
/// `workout_steps`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarminWorkoutStep {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub step_id: Option<u64>,
    pub step_order: Option<u32>,
    pub step_type: Option<GarminStepType>,
    pub child_step_id: Option<u32>,
    pub description: Option<String>,
    pub end_condition: Option<GarminConditionType>,
    pub end_condition_value: Option<f64>,
    pub target_type: Option<GarminTargetType>,
    pub target_value_one: Option<f64>,
    pub target_value_two: Option<f64>,
    pub secondary_target_type: Option<GarminTargetType>,
    pub secondary_target_value_one: Option<f64>,
    pub secondary_target_value_two: Option<f64>,
    pub zone_number: Option<u8>,
    pub number_of_iterations: Option<u32>,
    pub workout_steps: Option<Vec<GarminWorkoutStep>>,
}

impl GarminWorkoutStep {
    /// Nested steps, empty for a plain step.
    pub fn children(&self) -> &[GarminWorkoutStep] {
        self.workout_steps.as_deref().unwrap_or_default()
    }

    pub fn end_condition_key(&self) -> Option<&str> {
        self.end_condition
            .as_ref()
            .and_then(|c| c.condition_type_key.as_deref())
    }

    pub fn step_type_key(&self) -> Option<&str> {
        self.step_type
            .as_ref()
            .and_then(|t| t.step_type_key.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarminWorkoutSegment {
    pub segment_order: Option<u32>,
    pub sport_type: Option<GarminSportType>,
    #[serde(default)]
    pub workout_steps: Vec<GarminWorkoutStep>,
}

/// A full workout as returned by the workout service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarminWorkout {
    pub workout_id: Option<u64>,
    pub owner_id: Option<u64>,
    pub workout_name: Option<String>,
    pub description: Option<String>,
    pub sport_type: Option<GarminSportType>,
    pub training_plan_id: Option<u64>,
    #[serde(default)]
    pub workout_segments: Vec<GarminWorkoutSegment>,
}

/// Per-sport power zones with absolute watt floors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarminPowerZones {
    pub sport: String,
    pub functional_threshold_power: f64,
    pub zone1_floor: f64,
    pub zone2_floor: f64,
    pub zone3_floor: f64,
    pub zone4_floor: f64,
    pub zone5_floor: f64,
    pub zone6_floor: f64,
    pub zone7_floor: f64,
    pub user_local_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarminTrainingType {
    pub type_id: Option<u32>,
    pub type_key: Option<String>,
}

/// Summary entry of the training plan list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarminTrainingPlan {
    pub training_plan_id: u64,
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub training_type: Option<GarminTrainingType>,
}

impl GarminTrainingPlan {
    pub fn sport_key(&self) -> Option<&str> {
        self.training_type
            .as_ref()
            .and_then(|t| t.type_key.as_deref())
    }

    /// Whether `day` lies within the plan's start and end dates.
    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        let start = self.start_date.as_deref().and_then(parse_garmin_date);
        let end = self.end_date.as_deref().and_then(parse_garmin_date);

        match (start, end) {
            (Some(start), Some(end)) => start <= day && day <= end,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarminTrainingPlanList {
    #[serde(default)]
    pub training_plan_list: Vec<GarminTrainingPlan>,
}

/// Workout reference attached to a plan task. Rest days have no workout id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarminTaskWorkout {
    pub workout_id: Option<u64>,
    pub workout_schedule_id: Option<u64>,
    pub scheduled_date: Option<String>,
}

/// One calendar entry of a training plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarminTask {
    pub calendar_date: Option<String>,
    pub task_workout: Option<GarminTaskWorkout>,
}

impl GarminTask {
    pub fn workout_id(&self) -> Option<u64> {
        self.task_workout.as_ref().and_then(|w| w.workout_id)
    }

    /// The task's own calendar date, else the linked workout's scheduled date.
    pub fn resolved_date(&self) -> Option<NaiveDate> {
        self.calendar_date
            .as_deref()
            .and_then(parse_garmin_date)
            .or_else(|| {
                self.task_workout
                    .as_ref()
                    .and_then(|w| w.scheduled_date.as_deref())
                    .and_then(parse_garmin_date)
            })
    }
}

/// Detail view of a training plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarminTrainingPlanDetail {
    pub training_plan_id: Option<u64>,
    #[serde(default)]
    pub task_list: Vec<GarminTask>,
}

/// Parse the date part of a Garmin date or timestamp.
///
/// Accepts `2025-01-15`, `2025-01-15T10:00:00` and `2025-01-15T10:00:00.0`;
/// Garmin sometimes pads timestamps with spaces, which are dropped.
pub fn parse_garmin_date(value: &str) -> Option<NaiveDate> {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(&compact, "%Y-%m-%d") {
        return Some(date);
    }

    NaiveDateTime::parse_from_str(&compact, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.date())
        .ok()
}
