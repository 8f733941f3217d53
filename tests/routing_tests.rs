// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OSRM response handling, difficulty bands and route creation guards.

use findmyroute::error::AppError;
use findmyroute::models::{Difficulty, GeoPoint};
use findmyroute::services::routing::{
    calculate_route_difficulty, elevation_gain, parse_osrm_response, NewRouteRequest,
};

mod common;
use common::{test_session, test_state_offline};

#[test]
fn test_osrm_geometry_is_swapped_to_lat_lon() {
    let body = r#"{
        "code": "Ok",
        "routes": [{
            "geometry": {
                "type": "LineString",
                "coordinates": [[-122.1, 37.4], [-122.11, 37.41], [-122.12, 37.42]]
            },
            "distance": 2950.4,
            "duration": 2124.0,
            "legs": []
        }],
        "waypoints": []
    }"#;

    let path = parse_osrm_response(body).unwrap();

    assert_eq!(
        path.waypoints,
        vec![
            GeoPoint::new(37.4, -122.1),
            GeoPoint::new(37.41, -122.11),
            GeoPoint::new(37.42, -122.12),
        ]
    );
    assert_eq!(path.distance_m, 2950.4);
    assert_eq!(path.duration_s, 2124.0);
}

#[test]
fn test_osrm_no_route() {
    let no_route = r#"{"code": "NoRoute", "message": "Impossible route between points", "routes": []}"#;
    let err = parse_osrm_response(no_route).unwrap_err();
    assert!(matches!(&err, AppError::Routing(msg) if msg == AppError::NO_ROUTE_FOUND));

    let empty = r#"{"code": "Ok", "routes": []}"#;
    assert!(matches!(
        parse_osrm_response(empty),
        Err(AppError::Routing(_))
    ));

    assert!(parse_osrm_response("not json").is_err());
}

#[test]
fn test_difficulty_thresholds_are_strict() {
    assert_eq!(calculate_route_difficulty(2999.0, 49.0), Difficulty::Easy);
    assert_eq!(calculate_route_difficulty(3000.0, 0.0), Difficulty::Moderate);
    assert_eq!(calculate_route_difficulty(1000.0, 50.0), Difficulty::Moderate);
    assert_eq!(calculate_route_difficulty(7999.0, 149.0), Difficulty::Moderate);
    assert_eq!(
        calculate_route_difficulty(8000.0, 0.0),
        Difficulty::Challenging
    );
    assert_eq!(
        calculate_route_difficulty(1000.0, 150.0),
        Difficulty::Challenging
    );
}

#[test]
fn test_elevation_gain_ignores_descents() {
    assert_eq!(elevation_gain(&[]), 0.0);
    assert_eq!(elevation_gain(&[100.0]), 0.0);
    assert_eq!(elevation_gain(&[100.0, 90.0, 80.0]), 0.0);
    assert_eq!(elevation_gain(&[10.0, 30.0, 20.0, 45.0]), 45.0);
}

#[tokio::test]
async fn test_create_route_rejects_missing_points_before_network() {
    let state = test_state_offline();
    let request = NewRouteRequest {
        name: "Lunch Run".to_string(),
        start_point: None,
        end_point: Some(GeoPoint::new(37.0, -122.0)),
        ..Default::default()
    };

    let err = state
        .planner
        .create_complete_route(Some(&test_session("runner")), &request)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_create_route_transport_failure_is_routing_error() {
    let state = test_state_offline();
    let request = NewRouteRequest {
        name: "Lunch Run".to_string(),
        start_point: Some(GeoPoint::new(37.0, -122.0)),
        end_point: Some(GeoPoint::new(37.01, -122.0)),
        ..Default::default()
    };

    let err = state
        .planner
        .create_complete_route(Some(&test_session("runner")), &request)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Routing(_)));
    assert!(!err.is_user_facing());
}
