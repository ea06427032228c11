//! WhooshSync command line entry point.

use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use whooshsync::storage::config::{get_config_path, load_config_from};
use whooshsync::{GarminClient, Sport, WorkoutSyncService};

#[derive(Parser)]
#[command(
    name = "whooshsync",
    version,
    about = "Convert Garmin Connect training plan workouts into MyWhoosh workouts"
)]
struct Args {
    /// Sport of the training plans to sync
    #[arg(long, default_value = "cycling")]
    sport: Sport,

    /// First day to sync (YYYY-MM-DD), defaults to today
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last day to sync (YYYY-MM-DD), defaults to one week after --from
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Directory the workout files are written to
    #[arg(long, default_value = "workouts")]
    output_dir: PathBuf,

    /// Configuration file, defaults to the user config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Garmin Connect access token
    #[arg(long, env = "GARMIN_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    tracing::info!("Starting WhooshSync v{}", env!("CARGO_PKG_VERSION"));

    let config_path = args.config.unwrap_or_else(get_config_path);
    let config = load_config_from(&config_path)
        .with_context(|| format!("Failed to load configuration from {:?}", config_path))?;

    let Some(token) = args.token else {
        bail!("No Garmin Connect access token; pass --token or set GARMIN_ACCESS_TOKEN");
    };
    let mut client = GarminClient::new();
    client.set_access_token(token);

    let from = args.from.unwrap_or_else(|| Local::now().date_naive());
    let service = WorkoutSyncService::new(client, config);
    let written = service
        .sync_and_download_workouts(args.sport, from, args.to, &args.output_dir)
        .context("Workout sync failed")?;

    if written.is_empty() {
        tracing::info!("No scheduled {} workouts found", args.sport);
    }
    for path in &written {
        println!("{}", path.display());
    }

    Ok(())
}
