//! External Integrations Module
//!
//! Garmin Connect as the workout source, MyWhoosh as the target format, and
//! the sync run tying them together.

pub mod error;
pub mod garmin;
pub mod mywhoosh;
pub mod sync;

// Re-export main types for convenience
pub use error::{MappingError, StepShape};
pub use garmin::{ClientError, GarminClient, GarminMapperOptions, TrainingPlanClient};
pub use mywhoosh::{MyWhooshMapperOptions, MyWhooshWorkout, MyWhooshWorkoutStep};
pub use sync::{SyncError, WorkoutSyncService};
