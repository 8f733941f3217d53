// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route filter engine and filter option lists.

use crate::models::user::{ElevationPreference, SafetyPreference, UserPreferences};
use crate::models::{Difficulty, RangeOption, Route, RouteFilters, SurfaceType, ValueOption};

/// Return the routes matching every criterion in `filters`, in input order.
pub fn filter_routes(routes: &[Route], filters: &RouteFilters) -> Vec<Route> {
    routes
        .iter()
        .filter(|route| route_matches(route, filters))
        .cloned()
        .collect()
}

/// Whether a single route satisfies all criteria.
pub fn route_matches(route: &Route, filters: &RouteFilters) -> bool {
    if filters.min_distance.is_some_and(|min| route.distance < min) {
        return false;
    }
    if filters.max_distance.is_some_and(|max| route.distance > max) {
        return false;
    }

    if !filters.difficulty.is_empty() && !filters.difficulty.contains(&route.difficulty) {
        return false;
    }

    if !filters.surface_types.is_empty()
        && !route
            .surface_type
            .iter()
            .any(|surface| filters.surface_types.contains(surface))
    {
        return false;
    }

    if filters
        .min_elevation
        .is_some_and(|min| route.elevation_gain < min)
    {
        return false;
    }
    if filters
        .max_elevation
        .is_some_and(|max| route.elevation_gain > max)
    {
        return false;
    }

    // Amenity flags only ever require presence; unknown counts as missing.
    let amenities = &route.amenities;
    let required = [
        (filters.has_parking, amenities.has_parking),
        (filters.has_bathrooms, amenities.has_bathrooms),
        (filters.has_water_fountains, amenities.has_water_fountains),
        (filters.has_lighting, amenities.has_lighting),
    ];
    required
        .into_iter()
        .all(|(wanted, status)| !wanted || status.is_yes())
}

/// Distance ladder in kilometers.
pub fn distance_range_options() -> Vec<RangeOption> {
    vec![
        RangeOption::new("Short (0-3 km)", 0.0, Some(3.0)),
        RangeOption::new("Medium (3-8 km)", 3.0, Some(8.0)),
        RangeOption::new("Long (8-15 km)", 8.0, Some(15.0)),
        RangeOption::new("Very Long (15+ km)", 15.0, None),
    ]
}

pub fn difficulty_options() -> Vec<ValueOption<Difficulty>> {
    [
        ("Easy", Difficulty::Easy),
        ("Moderate", Difficulty::Moderate),
        ("Challenging", Difficulty::Challenging),
    ]
    .into_iter()
    .map(|(label, value)| ValueOption {
        label: label.to_string(),
        value,
    })
    .collect()
}

pub fn surface_type_options() -> Vec<ValueOption<SurfaceType>> {
    [
        ("Pavement", SurfaceType::Pavement),
        ("Trail", SurfaceType::Trail),
        ("Track", SurfaceType::Track),
        ("Mixed", SurfaceType::Mixed),
    ]
    .into_iter()
    .map(|(label, value)| ValueOption {
        label: label.to_string(),
        value,
    })
    .collect()
}

/// Elevation gain ladder in meters.
pub fn elevation_range_options() -> Vec<RangeOption> {
    vec![
        RangeOption::new("Flat (0-50m)", 0.0, Some(50.0)),
        RangeOption::new("Rolling (50-150m)", 50.0, Some(150.0)),
        RangeOption::new("Hilly (150-300m)", 150.0, Some(300.0)),
        RangeOption::new("Mountainous (300m+)", 300.0, None),
    ]
}

/// Starting filters derived from a user's saved preferences.
///
/// The preferred distance selects the first distance band containing it.
pub fn filters_from_preferences(preferences: &UserPreferences) -> RouteFilters {
    let mut filters = RouteFilters::default();

    if let Some(distance) = preferences.preferred_distance {
        if let Some(range) = distance_range_options()
            .iter()
            .find(|r| r.contains(distance))
        {
            filters = filters.with_distance_range(range);
        }
    }

    match preferences.preferred_elevation {
        Some(ElevationPreference::Flat) => {
            filters = filters.with_elevation_range(&elevation_range_options()[0]);
        }
        Some(ElevationPreference::Hilly) => {
            // Hilly and above
            filters.min_elevation = Some(elevation_range_options()[2].min);
        }
        Some(ElevationPreference::Any) | None => {}
    }

    if let Some(surfaces) = &preferences.preferred_surface_types {
        filters.surface_types = surfaces.clone();
    }
    if let Some(difficulty) = preferences.preferred_difficulty {
        filters.difficulty = vec![difficulty];
    }
    if preferences.safety_preference == Some(SafetyPreference::WellLit) {
        filters.has_lighting = true;
    }

    filters
}
