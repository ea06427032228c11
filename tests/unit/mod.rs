//! Unit test modules.

mod garmin_mapper_test;
mod workout_model_test;
