// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! FindMyRoute: discover, filter and plan running routes.
//!
//! This crate provides the core of the running-route app: OpenStreetMap
//! route discovery, the route filter engine, OSRM path planning, Firebase
//! accounts and the Strava connection.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

use config::Config;
use db::FirestoreDb;
use services::{
    AuthService, FirebaseAuthClient, OsrmClient, OverpassClient, RouteDiscovery, RoutePlanner,
    StravaClient, StravaService,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    /// Present only when a Firebase API key is configured
    pub auth_service: Option<AuthService>,
    pub discovery: RouteDiscovery,
    pub planner: RoutePlanner,
    /// Present only when Strava credentials are configured
    pub strava_service: Option<StravaService>,
}

impl AppState {
    /// Wire up every service from configuration and a database handle.
    pub fn new(config: Config, db: FirestoreDb) -> Self {
        let auth_service = config
            .firebase_api_key
            .as_ref()
            .map(|key| AuthService::new(FirebaseAuthClient::new(key.clone()), db.clone()));
        let discovery = RouteDiscovery::new(
            OverpassClient::new(config.overpass_url.clone()),
            config.running_pace_min_per_km,
        );
        let planner = RoutePlanner::new(OsrmClient::new(config.osrm_url.clone()));
        let strava_service = config
            .strava
            .as_ref()
            .map(|strava| StravaService::new(StravaClient::new(strava), db.clone()));

        Self {
            config,
            db,
            auth_service,
            discovery,
            planner,
            strava_service,
        }
    }
}
