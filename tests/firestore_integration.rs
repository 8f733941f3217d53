// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running and
//! FIRESTORE_EMULATOR_HOST to point at it.

use findmyroute::models::user::ElevationPreference;
use findmyroute::models::{Difficulty, ProfileUpdate, StravaTokens, UserPreferences, UserProfile};

mod common;
use common::{route, test_db};

/// Generate a unique ID for test isolation.
fn unique_id(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4())
}

fn test_profile(uid: &str) -> UserProfile {
    UserProfile::new(
        uid,
        Some("test@example.com"),
        Some("Test Runner".to_string()),
        None,
        chrono::Utc::now(),
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// PROFILE TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_profile_creation() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_id("user");

    assert!(!db.user_exists(&uid).await.unwrap());

    db.create_user_profile(&test_profile(&uid)).await.unwrap();

    let fetched = db.get_user_profile(&uid).await.unwrap().unwrap();
    assert_eq!(fetched.id, uid);
    assert_eq!(fetched.email, "test@example.com");
    assert!(!fetched.strava_connected);
    assert!(db.user_exists(&uid).await.unwrap());
}

#[tokio::test]
async fn test_profile_update_and_preferences() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_id("user");
    db.create_user_profile(&test_profile(&uid)).await.unwrap();

    db.update_user_profile(
        &uid,
        ProfileUpdate {
            display_name: Some("Renamed".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let preferences = UserPreferences {
        preferred_distance: Some(5.0),
        preferred_elevation: Some(ElevationPreference::Flat),
        preferred_difficulty: Some(Difficulty::Easy),
        ..Default::default()
    };
    db.update_user_preferences(&uid, preferences.clone())
        .await
        .unwrap();

    let fetched = db.get_user_profile(&uid).await.unwrap().unwrap();
    assert_eq!(fetched.display_name.as_deref(), Some("Renamed"));
    assert_eq!(fetched.email, "test@example.com");
    assert_eq!(fetched.preferences, Some(preferences));
}

#[tokio::test]
async fn test_update_missing_profile_is_not_found() {
    require_emulator!();

    let db = test_db().await;
    let result = db
        .update_user_profile(&unique_id("ghost"), ProfileUpdate::default())
        .await;

    assert!(matches!(
        result,
        Err(findmyroute::error::AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_strava_connection_lifecycle() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_id("user");
    db.create_user_profile(&test_profile(&uid)).await.unwrap();

    db.connect_strava(
        &uid,
        StravaTokens {
            athlete_id: "12345".to_string(),
            access_token: "access-1".to_string(),
            refresh_token: "refresh-1".to_string(),
            expires_at: 1_700_000_000,
        },
    )
    .await
    .unwrap();

    db.set_strava_tokens(&uid, "access-2", "refresh-2", 1_700_021_600)
        .await
        .unwrap();

    let connected = db.get_user_profile(&uid).await.unwrap().unwrap();
    assert!(connected.strava_connected);
    assert_eq!(connected.strava_id.as_deref(), Some("12345"));
    assert_eq!(connected.strava_access_token.as_deref(), Some("access-2"));
    assert_eq!(connected.strava_token_expires_at, Some(1_700_021_600));

    db.disconnect_strava(&uid).await.unwrap();

    let disconnected = db.get_user_profile(&uid).await.unwrap().unwrap();
    assert!(!disconnected.strava_connected);
    assert!(disconnected.strava_access_token.is_none());
    assert!(disconnected.strava_refresh_token.is_none());
}

// ═══════════════════════════════════════════════════════════════════════════
// ROUTE TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_save_and_list_routes() {
    require_emulator!();

    let db = test_db().await;
    let owner = unique_id("owner");

    let mut private = route("", 4.2, Difficulty::Moderate);
    private.created_by = owner.clone();
    private.is_public = false;
    let saved = db.save_route(private).await.unwrap();
    assert!(!saved.id.is_empty());

    let fetched = db.get_route(&saved.id).await.unwrap().unwrap();
    assert_eq!(fetched.distance, 4.2);
    assert_eq!(fetched.waypoints, saved.waypoints);

    let mine = db.list_routes_for_user(&owner).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, saved.id);

    let public = db.list_public_routes(50).await.unwrap();
    assert!(public.iter().all(|r| r.is_public));
    assert!(!public.iter().any(|r| r.id == saved.id));
}
