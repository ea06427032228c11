//! WhooshSync - Garmin Connect to MyWhoosh workout sync
//!
//! Fetches the workouts scheduled in active Garmin Connect training plans,
//! converts them into a generic step model, and writes them out as MyWhoosh
//! workout files with power targets derived from the athlete's power zones.

pub mod integrations;
pub mod metrics;
pub mod storage;
pub mod workouts;

// Re-export commonly used types
pub use integrations::garmin::GarminClient;
pub use integrations::sync::WorkoutSyncService;
pub use metrics::zones::PowerZones;
pub use storage::config::AppConfig;
pub use workouts::{Sport, Workout, WorkoutStep};
