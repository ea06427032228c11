//! Sync run: active plans → scheduled workouts → MyWhoosh files.

use std::path::{Path, PathBuf};

use chrono::{Days, Local, NaiveDate};

use super::SyncError;
use crate::integrations::garmin::mapper::{map_scheduled_workout, GarminMapperOptions};
use crate::integrations::garmin::{GarminTrainingPlan, GarminWorkout, TrainingPlanClient};
use crate::integrations::mywhoosh::{map_workout, MyWhooshMapperOptions, MyWhooshWorkout};
use crate::metrics::zones::PowerZones;
use crate::storage::config::AppConfig;
use crate::workouts::Sport;

/// Days covered when no end date is given.
pub const DEFAULT_SYNC_WINDOW_DAYS: u64 = 7;

/// Orchestrates one sync run against a training plan source.
///
/// Everything runs sequentially and the first error aborts the run.
pub struct WorkoutSyncService<C: TrainingPlanClient> {
    client: C,
    config: AppConfig,
    /// Fixed "today" for plan activity checks; local date when unset
    today: Option<NaiveDate>,
}

impl<C: TrainingPlanClient> WorkoutSyncService<C> {
    pub fn new(client: C, config: AppConfig) -> Self {
        Self {
            client,
            config,
            today: None,
        }
    }

    /// Use a fixed date instead of the local date to decide which plans are
    /// active.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Plans for `sport` whose date range contains today.
    pub fn active_plans(&self, sport: Sport) -> Result<Vec<GarminTrainingPlan>, SyncError> {
        let today = self.today();
        let plans: Vec<GarminTrainingPlan> = self
            .client
            .get_training_plans()?
            .into_iter()
            .filter(|plan| plan.sport_key().and_then(Sport::from_key) == Some(sport))
            .filter(|plan| plan.is_active_on(today))
            .collect();

        tracing::info!("Found {} active {} training plan(s)", plans.len(), sport);
        Ok(plans)
    }

    /// Workouts scheduled between `from` and `to` (inclusive) in the active
    /// plans for `sport`. `to` defaults to one week after `from`.
    pub fn scheduled_workouts(
        &self,
        sport: Sport,
        from: NaiveDate,
        to: Option<NaiveDate>,
    ) -> Result<Vec<(NaiveDate, GarminWorkout)>, SyncError> {
        let to = match to {
            Some(to) => to,
            None => from
                .checked_add_days(Days::new(DEFAULT_SYNC_WINDOW_DAYS))
                .ok_or(SyncError::DateOutOfRange(from))?,
        };

        let mut scheduled = Vec::new();
        for plan in self.active_plans(sport)? {
            let detail = self.client.get_training_plan_by_id(plan.training_plan_id)?;

            for task in &detail.task_list {
                // Rest days
                let Some(workout_id) = task.workout_id() else {
                    continue;
                };
                let Some(date) = task.resolved_date() else {
                    tracing::warn!("Skipping workout {} without a date", workout_id);
                    continue;
                };
                if date < from || date > to {
                    continue;
                }

                tracing::debug!("Fetching workout {} scheduled on {}", workout_id, date);
                scheduled.push((date, self.client.get_workout_by_id(workout_id)?));
            }
        }

        tracing::info!(
            "{} workout(s) scheduled between {} and {}",
            scheduled.len(),
            from,
            to
        );
        Ok(scheduled)
    }

    /// Power zones of `sport`.
    pub fn power_zones(&self, sport: Sport) -> Result<PowerZones, SyncError> {
        self.client
            .get_power_zones()?
            .iter()
            .find(|zones| Sport::from_key(&zones.sport) == Some(sport))
            .map(PowerZones::from_garmin)
            .ok_or(SyncError::MissingPowerZones(sport))
    }

    /// Convert the scheduled workouts of the window into MyWhoosh workouts.
    pub fn sync_workouts(
        &self,
        sport: Sport,
        from: NaiveDate,
        to: Option<NaiveDate>,
    ) -> Result<Vec<MyWhooshWorkout>, SyncError> {
        let scheduled = self.scheduled_workouts(sport, from, to)?;
        if scheduled.is_empty() {
            return Ok(Vec::new());
        }

        let zones = self.power_zones(sport)?;
        tracing::info!("Using FTP {}W for {}", zones.ftp, sport);

        let garmin_options = GarminMapperOptions::from(&self.config);
        let mywhoosh_options = MyWhooshMapperOptions::new(zones, self.config.power_zones.clone());

        scheduled
            .iter()
            .map(|(date, garmin)| {
                let workout = map_scheduled_workout(garmin, *date, &garmin_options)?;
                let mapped = map_workout(&workout, &mywhoosh_options)?;
                tracing::info!("Converted {:?}", mapped.name);
                Ok(mapped)
            })
            .collect()
    }

    /// Convert the scheduled workouts and write each one to
    /// `<output_dir>/<name>.json`. Returns the written paths.
    pub fn sync_and_download_workouts(
        &self,
        sport: Sport,
        from: NaiveDate,
        to: Option<NaiveDate>,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, SyncError> {
        let workouts = self.sync_workouts(sport, from, to)?;

        std::fs::create_dir_all(output_dir)?;

        let mut written = Vec::with_capacity(workouts.len());
        for workout in &workouts {
            let path = output_dir.join(workout.file_name());
            std::fs::write(&path, workout.to_json()?)?;
            tracing::info!("Saved workout to {:?}", path);
            written.push(path);
        }

        Ok(written)
    }
}
