//! Training plan sync
//!
//! Pulls scheduled workouts from Garmin Connect training plans and converts
//! them into MyWhoosh workout files.

pub mod service;

use thiserror::Error;

use crate::integrations::error::MappingError;
use crate::integrations::garmin::ClientError;
use crate::storage::config::ConfigError;
use crate::workouts::Sport;

pub use service::WorkoutSyncService;

/// Sync-related errors
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Garmin Connect request failed: {0}")]
    Client(#[from] ClientError),

    #[error("Workout mapping failed: {0}")]
    Mapping(#[from] MappingError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("No end date can be derived from {0}")]
    DateOutOfRange(chrono::NaiveDate),

    #[error("No power zones found for {0}")]
    MissingPowerZones(Sport),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
