//! MyWhoosh workout files and mapping from the generic model.

pub mod dto;
pub mod mapper;

pub use dto::{MyWhooshWorkout, MyWhooshWorkoutStep};
pub use mapper::{map_workout, power_target, MyWhooshMapperOptions};
