// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! FindMyRoute command-line tool
//!
//! Discovers runnable routes around a point, plans paths between two points
//! and prints filter options, all as JSON on stdout.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use findmyroute::{
    config::Config,
    db::FirestoreDb,
    models::{Difficulty, GeoPoint, RouteFilters, SurfaceType},
    services::{filter, TravelProfile},
    AppState,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "findmyroute", version, about = "Find running routes near you")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Discover OpenStreetMap routes around a point
    Discover(DiscoverArgs),
    /// Plan a path between two points with OSRM
    Plan(PlanArgs),
    /// Print the filter option lists
    Options,
    /// Print the Strava authorization URL
    StravaUrl,
}

#[derive(Args)]
struct DiscoverArgs {
    /// Latitude of the search center
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude of the search center
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// Search radius in kilometers
    #[arg(long, default_value_t = 2.0)]
    radius: f64,

    /// Print parsed routes without measuring or filtering them
    #[arg(long)]
    drafts: bool,

    /// Minimum distance in kilometers
    #[arg(long)]
    min_distance: Option<f64>,

    /// Maximum distance in kilometers
    #[arg(long)]
    max_distance: Option<f64>,

    /// Accepted difficulty: easy, moderate or challenging (repeatable)
    #[arg(long, value_parser = parse_wire_name::<Difficulty>)]
    difficulty: Vec<Difficulty>,

    /// Accepted surface type: pavement, trail, track or mixed (repeatable)
    #[arg(long, value_parser = parse_wire_name::<SurfaceType>)]
    surface: Vec<SurfaceType>,

    /// Only routes known to be lit
    #[arg(long)]
    lit: bool,
}

impl DiscoverArgs {
    fn filters(&self) -> RouteFilters {
        RouteFilters {
            min_distance: self.min_distance,
            max_distance: self.max_distance,
            difficulty: self.difficulty.clone(),
            surface_types: self.surface.clone(),
            has_lighting: self.lit,
            ..Default::default()
        }
    }
}

#[derive(Args)]
struct PlanArgs {
    #[arg(long, allow_hyphen_values = true)]
    from_lat: f64,
    #[arg(long, allow_hyphen_values = true)]
    from_lon: f64,
    #[arg(long, allow_hyphen_values = true)]
    to_lat: f64,
    #[arg(long, allow_hyphen_values = true)]
    to_lon: f64,

    #[arg(long, value_enum, default_value_t = TravelProfile::Foot)]
    profile: TravelProfile,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        overpass = %config.overpass_url,
        osrm = %config.osrm_url,
        "Starting FindMyRoute"
    );

    // None of the commands below read or write Firestore.
    let state = AppState::new(config, FirestoreDb::new_mock());

    match cli.command {
        Command::Discover(args) => {
            let center = GeoPoint::new(args.lat, args.lon);
            if args.drafts {
                let drafts = state.discovery.discover(center, args.radius).await?;
                print_json(&drafts)?;
            } else {
                let routes = state
                    .discovery
                    .discover_measured(center, args.radius, &args.filters())
                    .await?;
                print_json(&routes)?;
            }
        }
        Command::Plan(args) => {
            let path = state
                .planner
                .calculate_path(
                    GeoPoint::new(args.from_lat, args.from_lon),
                    GeoPoint::new(args.to_lat, args.to_lon),
                    args.profile,
                )
                .await?;
            print_json(&path)?;
        }
        Command::Options => {
            print_json(&serde_json::json!({
                "distanceRanges": filter::distance_range_options(),
                "difficulties": filter::difficulty_options(),
                "surfaceTypes": filter::surface_type_options(),
                "elevationRanges": filter::elevation_range_options(),
            }))?;
        }
        Command::StravaUrl => {
            let strava = state
                .strava_service
                .as_ref()
                .context("Strava is not configured (set STRAVA_CLIENT_ID and STRAVA_CLIENT_SECRET)")?;
            println!("{}", strava.authorize_url());
        }
    }

    Ok(())
}

/// Parse a model enum from its lowercase JSON name (e.g. `easy`, `trail`).
fn parse_wire_name<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(raw.trim().to_lowercase()))
        .map_err(|_| format!("unknown value '{}'", raw))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Initialize structured JSON logging on stderr.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("findmyroute=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
