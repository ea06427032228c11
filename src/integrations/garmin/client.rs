//! Garmin Connect API client.
//!
//! Blocking HTTP access to the training plan, workout and power zone
//! endpoints. Authentication is limited to attaching an already-issued
//! bearer token.

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::dto::{
    GarminPowerZones, GarminTrainingPlan, GarminTrainingPlanDetail, GarminTrainingPlanList,
    GarminWorkout,
};

/// Default API base URL.
pub const GARMIN_API_BASE: &str = "https://connectapi.garmin.com";

/// Errors talking to the source platform.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status} for {path}: {body}")]
    Api {
        status: u16,
        path: String,
        body: String,
    },

    #[error("Not authenticated with Garmin Connect")]
    NotAuthenticated,
}

/// Read access to the source platform needed by a sync run.
pub trait TrainingPlanClient {
    /// All training plans of the user.
    fn get_training_plans(&self) -> Result<Vec<GarminTrainingPlan>, ClientError>;

    /// Detail view, including the task list, of one plan.
    fn get_training_plan_by_id(
        &self,
        training_plan_id: u64,
    ) -> Result<GarminTrainingPlanDetail, ClientError>;

    /// A full workout with segments and steps.
    fn get_workout_by_id(&self, workout_id: u64) -> Result<GarminWorkout, ClientError>;

    /// Power zones of every sport.
    fn get_power_zones(&self) -> Result<Vec<GarminPowerZones>, ClientError>;
}

/// Garmin Connect client
pub struct GarminClient {
    http: Client,
    /// Bearer token for API calls
    access_token: Option<String>,
    /// API base URL
    base_url: String,
}

impl Default for GarminClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GarminClient {
    /// Create a client against the public API.
    pub fn new() -> Self {
        Self::with_base_url(GARMIN_API_BASE)
    }

    /// Create a client against another base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            access_token: None,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Set the access token for API calls
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = Some(token.into());
    }

    /// Clear the access token
    pub fn clear_token(&mut self) {
        self.access_token = None;
    }

    /// Check if client has a token configured
    pub fn is_configured(&self) -> bool {
        self.access_token.is_some()
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let token = self
            .access_token
            .as_deref()
            .ok_or(ClientError::NotAuthenticated)?;

        tracing::debug!("GET {}{}", self.base_url, path);

        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(token)
            .header("NK", "NT")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                path: path.to_string(),
                body,
            });
        }

        Ok(response.json()?)
    }
}

impl TrainingPlanClient for GarminClient {
    fn get_training_plans(&self) -> Result<Vec<GarminTrainingPlan>, ClientError> {
        let list: GarminTrainingPlanList =
            self.get_json("/trainingplan-service/trainingplan/plans")?;
        Ok(list.training_plan_list)
    }

    fn get_training_plan_by_id(
        &self,
        training_plan_id: u64,
    ) -> Result<GarminTrainingPlanDetail, ClientError> {
        self.get_json(&format!(
            "/trainingplan-service/trainingplan/phased/{}",
            training_plan_id
        ))
    }

    fn get_workout_by_id(&self, workout_id: u64) -> Result<GarminWorkout, ClientError> {
        self.get_json(&format!("/workout-service/workout/{}", workout_id))
    }

    fn get_power_zones(&self) -> Result<Vec<GarminPowerZones>, ClientError> {
        self.get_json("/biometric-service/powerZones/sports/all")
    }
}
