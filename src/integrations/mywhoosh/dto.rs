//! MyWhoosh workout document.
//!
//! Field names follow the MyWhoosh JSON format. Fields the converter has no
//! source for carry fixed defaults.

use serde::{Deserialize, Serialize};

/// Author shown for converted workouts.
pub const AUTHOR_NAME: &str = "Garmin Connect via whooshsync";

/// `StepType` value for steps with a power target.
pub const STEP_TYPE_NORMAL: &str = "E_Normal";

/// `StepType` value for steps without a power target.
pub const STEP_TYPE_FREE_RIDE: &str = "E_FreeRide";

/// One step of a MyWhoosh workout. `Power` is a ratio of FTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MyWhooshWorkoutStep {
    pub interval_id: u32,
    pub step_type: String,
    pub id: u32,
    pub workout_message: Vec<String>,
    pub rpm: u16,
    pub power: f64,
    pub pace: f64,
    pub start_power: f64,
    pub end_power: f64,
    pub time: u32,
    pub is_manual_grade: bool,
    pub manual_grade_value: f64,
    pub show_average_power: bool,
    pub flat_road: u32,
}

impl Default for MyWhooshWorkoutStep {
    fn default() -> Self {
        Self {
            interval_id: 0,
            step_type: STEP_TYPE_NORMAL.to_string(),
            id: 0,
            workout_message: Vec::new(),
            rpm: 0,
            power: 0.0,
            pace: 0.0,
            start_power: 0.0,
            end_power: 0.0,
            time: 0,
            is_manual_grade: false,
            manual_grade_value: 0.0,
            show_average_power: true,
            flat_road: 0,
        }
    }
}

impl MyWhooshWorkoutStep {
    pub fn is_free_ride(&self) -> bool {
        self.step_type == STEP_TYPE_FREE_RIDE
    }
}

/// A MyWhoosh workout file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MyWhooshWorkout {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub mode: String,
    #[serde(rename = "ERGMode")]
    pub erg_mode: String,
    pub is_recovery: bool,
    pub is_intervals: bool,
    #[serde(rename = "FTPMode")]
    pub ftp_mode: String,
    #[serde(rename = "IsTT")]
    pub is_tt: bool,
    #[serde(rename = "IsTSS")]
    pub is_tss: bool,
    #[serde(rename = "IsIF")]
    pub is_if: bool,
    #[serde(rename = "FTPMultiplier")]
    pub ftp_multiplier: f64,
    pub stress_point: f64,
    /// Total duration in seconds
    pub time: u32,
    pub custom_tag_description: String,
    pub category_id: u32,
    pub subcategory_id: u32,
    #[serde(rename = "Type")]
    pub kind: String,
    pub display_type: String,
    pub step_count: usize,
    pub is_favorite: bool,
    pub completed_count: u32,
    pub workout_steps_array: Vec<MyWhooshWorkoutStep>,
    pub author_name: String,
    // MyWhoosh spells it this way.
    pub wokout_association_id: u32,
    #[serde(rename = "IF")]
    pub intensity_factor: f64,
    #[serde(rename = "TSS")]
    pub tss: f64,
    #[serde(rename = "KJ")]
    pub kj: f64,
}

impl Default for MyWhooshWorkout {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            description: String::new(),
            mode: String::new(),
            erg_mode: String::new(),
            is_recovery: false,
            is_intervals: false,
            ftp_mode: String::new(),
            is_tt: false,
            is_tss: false,
            is_if: false,
            ftp_multiplier: 1.0,
            stress_point: 0.0,
            time: 0,
            custom_tag_description: String::new(),
            category_id: 0,
            subcategory_id: 0,
            kind: String::new(),
            display_type: String::new(),
            step_count: 0,
            is_favorite: false,
            completed_count: 0,
            workout_steps_array: Vec::new(),
            author_name: AUTHOR_NAME.to_string(),
            wokout_association_id: 0,
            intensity_factor: 0.0,
            tss: 0.0,
            kj: 0.0,
        }
    }
}

impl MyWhooshWorkout {
    /// File name the workout is saved under.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.name)
    }

    /// Pretty-printed JSON document.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
