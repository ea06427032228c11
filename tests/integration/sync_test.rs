//! Integration tests for a full sync run against a mocked Garmin Connect API.

use chrono::NaiveDate;
use mockito::{Mock, Server, ServerGuard};
use whooshsync::integrations::mywhoosh::MyWhooshWorkout;
use whooshsync::integrations::sync::SyncError;
use whooshsync::{AppConfig, GarminClient, Sport, WorkoutSyncService};

const TRAINING_PLANS: &str = include_str!("../resources/garmin/training_plans.json");
const PLAN_DETAIL: &str = include_str!("../resources/garmin/training_plan_detail.json");
const WORKOUT: &str = include_str!("../resources/garmin/workout_repeat.json");
const POWER_ZONES: &str = include_str!("../resources/garmin/power_zones.json");

struct MockGarmin {
    server: ServerGuard,
    plans: Mock,
    detail: Mock,
    workout: Mock,
    zones: Mock,
}

fn json_mock(server: &mut ServerGuard, path: &str, body: &str, hits: usize) -> Mock {
    server
        .mock("GET", path)
        .match_header("authorization", "Bearer test_token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(hits)
        .create()
}

fn mock_garmin(detail_hits: usize, workout_hits: usize, zone_hits: usize) -> MockGarmin {
    let mut server = Server::new();

    let plans = json_mock(
        &mut server,
        "/trainingplan-service/trainingplan/plans",
        TRAINING_PLANS,
        1,
    );
    let detail = json_mock(
        &mut server,
        "/trainingplan-service/trainingplan/phased/77",
        PLAN_DETAIL,
        detail_hits,
    );
    let workout = json_mock(&mut server, "/workout-service/workout/1001", WORKOUT, workout_hits);
    let zones = json_mock(
        &mut server,
        "/biometric-service/powerZones/sports/all",
        POWER_ZONES,
        zone_hits,
    );

    MockGarmin {
        server,
        plans,
        detail,
        workout,
        zones,
    }
}

fn service(mock: &MockGarmin, today: NaiveDate) -> WorkoutSyncService<GarminClient> {
    let mut client = GarminClient::with_base_url(mock.server.url());
    client.set_access_token("test_token");

    WorkoutSyncService::new(client, AppConfig::default()).with_today(today)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_sync_and_download_week() {
    let mock = mock_garmin(1, 2, 1);
    let output = tempfile::tempdir().unwrap();

    let paths = service(&mock, date(2025, 1, 13))
        .sync_and_download_workouts(Sport::Cycling, date(2025, 1, 13), None, output.path())
        .unwrap();

    mock.plans.assert();
    mock.detail.assert();
    mock.workout.assert();
    mock.zones.assert();

    assert_eq!(
        paths,
        vec![
            output.path().join("20250113 Sweet Spot 2x52.json"),
            output.path().join("20250116 Sweet Spot 2x52.json"),
        ]
    );

    let content = std::fs::read_to_string(&paths[0]).unwrap();
    let workout: MyWhooshWorkout = serde_json::from_str(&content).unwrap();
    assert_eq!(workout.step_count, 6);
    assert_eq!(workout.time, 1470);
    assert_eq!(workout.workout_steps_array[0].id, 1);
    assert_eq!(workout.workout_steps_array[5].id, 6);

    // Cycling zones at 250W FTP: zone 2 is 0.55-0.75 of FTP
    assert!((workout.workout_steps_array[0].power - 0.65).abs() < 1e-9);
}

#[test]
fn test_no_active_plans() {
    let mock = mock_garmin(0, 0, 0);

    let workouts = service(&mock, date(2026, 6, 1))
        .sync_workouts(Sport::Cycling, date(2026, 6, 1), None)
        .unwrap();

    assert!(workouts.is_empty());
    mock.plans.assert();
    mock.detail.assert();
    mock.zones.assert();
}

#[test]
fn test_window_excludes_later_tasks() {
    let mock = mock_garmin(1, 1, 0);

    let scheduled = service(&mock, date(2025, 1, 13))
        .scheduled_workouts(Sport::Cycling, date(2025, 1, 13), Some(date(2025, 1, 15)))
        .unwrap();

    assert_eq!(scheduled.len(), 1);
    assert_eq!(scheduled[0].0, date(2025, 1, 13));
    mock.workout.assert();
}

#[test]
fn test_api_failure_aborts() {
    let mut server = Server::new();
    server
        .mock("GET", "/trainingplan-service/trainingplan/plans")
        .with_status(401)
        .with_body("Unauthorized")
        .create();

    let mut client = GarminClient::with_base_url(server.url());
    client.set_access_token("expired");
    let service =
        WorkoutSyncService::new(client, AppConfig::default()).with_today(date(2025, 1, 13));

    let err = service
        .sync_workouts(Sport::Cycling, date(2025, 1, 13), None)
        .unwrap_err();

    assert!(matches!(err, SyncError::Client(_)));
    assert!(err.to_string().contains("401"));
}
