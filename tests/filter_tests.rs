// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route filter engine behavior over realistic route lists.

use findmyroute::models::{Difficulty, RouteFilters, SurfaceType};
use findmyroute::services::filter::{
    distance_range_options, elevation_range_options, filter_routes,
};

mod common;
use common::{amenities, route};

fn ids(routes: &[findmyroute::models::Route]) -> Vec<&str> {
    routes.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn test_empty_filters_keep_everything_in_order() {
    let routes = vec![
        route("c", 12.3, Difficulty::Challenging),
        route("a", 2.5, Difficulty::Easy),
        route("b", 5.8, Difficulty::Moderate),
    ];

    let result = filter_routes(&routes, &RouteFilters::default());

    assert_eq!(result, routes);
}

#[test]
fn test_distance_window_selects_middle_route() {
    let routes = vec![
        route("short", 2.5, Difficulty::Easy),
        route("medium", 5.8, Difficulty::Moderate),
        route("long", 12.3, Difficulty::Challenging),
    ];
    let filters = RouteFilters {
        min_distance: Some(5.0),
        max_distance: Some(10.0),
        ..Default::default()
    };

    assert_eq!(ids(&filter_routes(&routes, &filters)), vec!["medium"]);
}

#[test]
fn test_range_bounds_are_inclusive() {
    let routes = vec![
        route("at-max", 10.0, Difficulty::Moderate),
        route("over-max", 10.0 + 1e-9, Difficulty::Moderate),
        route("at-min", 5.0, Difficulty::Moderate),
    ];
    let filters = RouteFilters {
        min_distance: Some(5.0),
        max_distance: Some(10.0),
        ..Default::default()
    };

    assert_eq!(
        ids(&filter_routes(&routes, &filters)),
        vec!["at-max", "at-min"]
    );
}

#[test]
fn test_elevation_bounds_are_inclusive() {
    let gains = [
        ("at-min", 50.0),
        ("under-min", 50.0 - 1e-9),
        ("at-max", 150.0),
        ("over-max", 150.0 + 1e-9),
    ];
    let routes: Vec<_> = gains
        .iter()
        .map(|(id, gain)| {
            let mut r = route(id, 5.0, Difficulty::Moderate);
            r.elevation_gain = *gain;
            r
        })
        .collect();
    let filters = RouteFilters {
        min_elevation: Some(50.0),
        max_elevation: Some(150.0),
        ..Default::default()
    };

    assert_eq!(
        ids(&filter_routes(&routes, &filters)),
        vec!["at-min", "at-max"]
    );
}

#[test]
fn test_difficulty_is_any_of() {
    let routes = vec![
        route("1", 2.0, Difficulty::Easy),
        route("2", 5.0, Difficulty::Moderate),
        route("3", 12.0, Difficulty::Challenging),
    ];
    let filters = RouteFilters {
        difficulty: vec![Difficulty::Easy, Difficulty::Moderate],
        ..Default::default()
    };

    assert_eq!(ids(&filter_routes(&routes, &filters)), vec!["1", "2"]);
}

#[test]
fn test_surface_and_difficulty_combine_with_and() {
    let mut paved_easy = route("paved-easy", 2.0, Difficulty::Easy);
    paved_easy.surface_type = vec![SurfaceType::Pavement];
    let mut mixed_easy = route("mixed-easy", 2.0, Difficulty::Easy);
    mixed_easy.surface_type = vec![SurfaceType::Trail, SurfaceType::Pavement];
    let mut paved_hard = route("paved-hard", 20.0, Difficulty::Challenging);
    paved_hard.surface_type = vec![SurfaceType::Pavement];
    let trail_easy = route("trail-easy", 2.0, Difficulty::Easy);

    let routes = vec![paved_easy, mixed_easy, paved_hard, trail_easy];
    let filters = RouteFilters {
        difficulty: vec![Difficulty::Easy],
        surface_types: vec![SurfaceType::Pavement, SurfaceType::Track],
        ..Default::default()
    };

    assert_eq!(
        ids(&filter_routes(&routes, &filters)),
        vec!["paved-easy", "mixed-easy"]
    );
}

#[test]
fn test_amenity_flags_require_presence() {
    let mut parking_fountains = route("1", 3.0, Difficulty::Moderate);
    parking_fountains.amenities = amenities(true, false, true, false);
    let mut bathrooms_only = route("2", 3.0, Difficulty::Moderate);
    bathrooms_only.amenities = amenities(false, true, false, false);
    let mut everything = route("3", 3.0, Difficulty::Moderate);
    everything.amenities = amenities(true, true, true, false);

    let routes = vec![parking_fountains, bathrooms_only, everything];
    let filters = RouteFilters {
        has_bathrooms: true,
        has_water_fountains: true,
        ..Default::default()
    };

    assert_eq!(ids(&filter_routes(&routes, &filters)), vec!["3"]);
}

#[test]
fn test_false_amenity_flag_never_removes_routes() {
    let mut no_parking = route("1", 3.0, Difficulty::Moderate);
    no_parking.amenities.has_parking = findmyroute::models::AmenityStatus::No;
    let unknown = route("2", 3.0, Difficulty::Moderate);

    let routes = vec![no_parking, unknown];
    let filters = RouteFilters {
        has_parking: false,
        ..Default::default()
    };

    assert_eq!(filter_routes(&routes, &filters).len(), 2);
}

#[test]
fn test_output_is_subsequence_without_duplicates() {
    let routes: Vec<_> = (0..20)
        .map(|i| route(&i.to_string(), i as f64, Difficulty::Moderate))
        .collect();
    let filters = RouteFilters {
        min_distance: Some(4.5),
        max_elevation: Some(10.0),
        ..Default::default()
    };

    let result = filter_routes(&routes, &filters);

    let expected: Vec<String> = (5..20).map(|i| i.to_string()).collect();
    assert_eq!(
        result.iter().map(|r| r.id.clone()).collect::<Vec<_>>(),
        expected
    );
}

#[test]
fn test_open_ended_band_applies_no_upper_bound() {
    let bands = distance_range_options();
    let very_long = bands.last().unwrap();
    assert!(very_long.max.is_none());

    let routes = vec![
        route("half", 21.1, Difficulty::Challenging),
        route("ultra", 100.0, Difficulty::Challenging),
        route("short", 3.0, Difficulty::Easy),
    ];
    let filters = RouteFilters::default().with_distance_range(very_long);

    assert_eq!(
        ids(&filter_routes(&routes, &filters)),
        vec!["half", "ultra"]
    );
}

#[test]
fn test_elevation_band_filters_gain() {
    let hilly = elevation_range_options()
        .into_iter()
        .find(|o| o.label.starts_with("Hilly"))
        .unwrap();

    let mut flat = route("flat", 5.0, Difficulty::Moderate);
    flat.elevation_gain = 20.0;
    let mut climb = route("climb", 5.0, Difficulty::Challenging);
    climb.elevation_gain = 220.0;

    let filters = RouteFilters::default().with_elevation_range(&hilly);
    assert_eq!(ids(&filter_routes(&[flat, climb], &filters)), vec!["climb"]);
}
