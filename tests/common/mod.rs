// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{TimeZone, Utc};
use findmyroute::config::Config;
use findmyroute::db::FirestoreDb;
use findmyroute::models::{
    AmenityStatus, Amenities, Difficulty, GeoPoint, Route, SurfaceType,
};
use findmyroute::services::AuthSession;
use findmyroute::AppState;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create app state with an offline database.
///
/// Network endpoints point at a closed local port so accidental calls fail fast.
#[allow(dead_code)]
pub fn test_state_offline() -> AppState {
    let config = Config {
        overpass_url: "http://127.0.0.1:9/api/interpreter".to_string(),
        osrm_url: "http://127.0.0.1:9".to_string(),
        ..Config::default()
    };
    AppState::new(config, FirestoreDb::new_mock())
}

#[allow(dead_code)]
pub fn test_session(uid: &str) -> AuthSession {
    AuthSession {
        uid: uid.to_string(),
        email: Some(format!("{}@example.com", uid)),
        display_name: Some("Test Runner".to_string()),
        photo_url: None,
        id_token: "test-id-token".to_string(),
        refresh_token: "test-refresh-token".to_string(),
    }
}

/// Build a measured route with the given metrics and default everything else.
#[allow(dead_code)]
pub fn route(id: &str, distance: f64, difficulty: Difficulty) -> Route {
    let start = GeoPoint::new(37.4, -122.1);
    let end = GeoPoint::new(37.41, -122.1);
    let timestamp = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();

    Route {
        id: id.to_string(),
        name: format!("Route {}", id),
        description: None,
        distance,
        estimated_duration: (distance * 6.0).ceil() as u32,
        elevation_gain: 0.0,
        difficulty,
        surface_type: vec![SurfaceType::Trail],
        start_point: start,
        end_point: end,
        waypoints: vec![start, end],
        created_by: "test-user".to_string(),
        is_public: true,
        safety_score: None,
        amenities: Amenities::default(),
        created_at: timestamp,
        updated_at: timestamp,
    }
}

/// Amenity record from (parking, bathrooms, water fountains, lighting) flags.
#[allow(dead_code)]
pub fn amenities(parking: bool, bathrooms: bool, fountains: bool, lighting: bool) -> Amenities {
    let status = |present: bool| {
        if present {
            AmenityStatus::Yes
        } else {
            AmenityStatus::Unknown
        }
    };
    Amenities {
        has_parking: status(parking),
        has_bathrooms: status(bathrooms),
        has_water_fountains: status(fountains),
        has_lighting: status(lighting),
    }
}
