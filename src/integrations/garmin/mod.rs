//! Garmin Connect: API payloads, client and mapping to the generic model.

pub mod client;
pub mod dto;
pub mod mapper;

pub use client::{ClientError, GarminClient, TrainingPlanClient};
pub use dto::{
    GarminPowerZones, GarminTask, GarminTrainingPlan, GarminTrainingPlanDetail, GarminWorkout,
    GarminWorkoutStep,
};
pub use mapper::GarminMapperOptions;
