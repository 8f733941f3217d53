// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route computation: OSRM path lookup and route measurement.
//!
//! Handles:
//! - Path geometry, distance and duration between two points (OSRM)
//! - Difficulty classification from distance and elevation gain
//! - Measuring parsed OSM drafts from their own geometry
//! - Building a complete user route from a creation request

use crate::error::AppError;
use crate::models::{
    Amenities, Difficulty, GeoPoint, Route, RouteDraft, RouteMetrics, SurfaceType,
};
use crate::services::auth::AuthSession;
use chrono::Utc;
use geo::{Distance, Haversine, LineString};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Owner recorded on routes measured from OpenStreetMap data.
pub const OSM_ROUTE_OWNER: &str = "openstreetmap";

/// Travel profile understood by OSRM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TravelProfile {
    #[default]
    Foot,
    Bike,
}

impl TravelProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelProfile::Foot => "foot",
            TravelProfile::Bike => "bike",
        }
    }
}

/// Path returned by the routing provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedPath {
    /// (latitude, longitude) points in travel order
    pub waypoints: Vec<GeoPoint>,
    pub distance_m: f64,
    pub duration_s: f64,
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: geojson::Geometry,
    distance: f64,
    duration: f64,
}

/// OSRM HTTP client.
#[derive(Clone)]
pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
}

impl OsrmClient {
    /// Create a client for an OSRM server (e.g. `https://router.project-osrm.org`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build the route request URL. OSRM expects `lon,lat` pairs.
    pub fn route_url(&self, start: GeoPoint, end: GeoPoint, profile: TravelProfile) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}?overview=full&geometries=geojson",
            self.base_url,
            profile.as_str(),
            start.longitude,
            start.latitude,
            end.longitude,
            end.latitude
        )
    }

    /// Compute a path between two points.
    pub async fn calculate_route(
        &self,
        start: GeoPoint,
        end: GeoPoint,
        profile: TravelProfile,
    ) -> Result<ComputedPath, AppError> {
        let url = self.route_url(start, end, profile);

        let response = self.http.get(&url).send().await.map_err(|e| {
            tracing::error!(error = %e, "OSRM request failed");
            AppError::Routing(e.to_string())
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "OSRM returned an error");
            return Err(AppError::Routing(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Routing(format!("Failed to read response: {}", e)))?;

        let path = parse_osrm_response(&body).inspect_err(|e| {
            tracing::error!(error = %e, "Error calculating route");
        })?;

        tracing::debug!(
            profile = profile.as_str(),
            distance_m = path.distance_m,
            points = path.waypoints.len(),
            "Route calculated"
        );

        Ok(path)
    }
}

/// Convert an OSRM JSON response into a path, swapping GeoJSON (lon, lat)
/// into (lat, lon) order.
pub fn parse_osrm_response(body: &str) -> Result<ComputedPath, AppError> {
    let data: OsrmResponse = serde_json::from_str(body)
        .map_err(|e| AppError::Routing(format!("JSON parse error: {}", e)))?;

    if data.code != "Ok" {
        if let Some(message) = &data.message {
            tracing::debug!(code = %data.code, message = %message, "OSRM rejected request");
        }
        return Err(AppError::Routing(AppError::NO_ROUTE_FOUND.to_string()));
    }

    let route = data
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Routing(AppError::NO_ROUTE_FOUND.to_string()))?;

    let line: LineString<f64> = route
        .geometry
        .value
        .try_into()
        .map_err(|e: geojson::Error| AppError::Routing(format!("Unexpected geometry: {}", e)))?;

    Ok(ComputedPath {
        waypoints: line.coords().map(|c| GeoPoint::from(*c)).collect(),
        distance_m: route.distance,
        duration_s: route.duration,
    })
}

/// Classify difficulty from distance (meters) and elevation gain (meters).
pub fn calculate_route_difficulty(distance_m: f64, elevation_gain_m: f64) -> Difficulty {
    let distance_km = distance_m / 1000.0;

    if distance_km < 3.0 && elevation_gain_m < 50.0 {
        Difficulty::Easy
    } else if distance_km < 8.0 && elevation_gain_m < 150.0 {
        Difficulty::Moderate
    } else {
        Difficulty::Challenging
    }
}

/// Sum of positive deltas along an elevation profile.
pub fn elevation_gain(profile: &[f64]) -> f64 {
    profile
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|diff| *diff > 0.0)
        .sum()
}

/// Great-circle length of a waypoint sequence in kilometers.
pub fn path_length_km(waypoints: &[GeoPoint]) -> f64 {
    let meters: f64 = waypoints
        .windows(2)
        .map(|w| Haversine.distance(geo::Point::from(w[0]), geo::Point::from(w[1])))
        .sum();
    meters / 1000.0
}

/// Measure a parsed OSM draft from its own geometry.
///
/// No elevation data source exists, so elevation gain is zero and
/// difficulty depends on distance alone.
pub fn enrich_draft(draft: RouteDraft, pace_min_per_km: f64) -> Result<Route, AppError> {
    let distance_km = path_length_km(&draft.waypoints);
    let metrics = RouteMetrics {
        distance_km,
        estimated_duration_min: (distance_km * pace_min_per_km).ceil() as u32,
        elevation_gain_m: 0.0,
        difficulty: calculate_route_difficulty(distance_km * 1000.0, 0.0),
    };

    let id = draft.id.clone();
    draft
        .into_route(metrics, OSM_ROUTE_OWNER, true, Utc::now())
        .ok_or_else(|| {
            AppError::BadRequest(format!("Route {} has fewer than two waypoints", id))
        })
}

/// Input for creating a route between two user-selected points.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewRouteRequest {
    #[validate(length(min = 1, max = 100, message = "Please enter a name for your route"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(required(message = "Please select a start point"), nested)]
    pub start_point: Option<GeoPoint>,
    #[validate(required(message = "Please select an end point"), nested)]
    pub end_point: Option<GeoPoint>,
    #[serde(default)]
    pub profile: TravelProfile,
    #[serde(default)]
    pub is_public: bool,
    /// Elevations (meters) sampled along the path, when known
    #[serde(default)]
    pub elevation_profile: Option<Vec<f64>>,
}

/// Builds complete routes for signed-in users.
#[derive(Clone)]
pub struct RoutePlanner {
    osrm: OsrmClient,
}

impl RoutePlanner {
    pub fn new(osrm: OsrmClient) -> Self {
        Self { osrm }
    }

    /// Raw path between two points, without building a route.
    pub async fn calculate_path(
        &self,
        start: GeoPoint,
        end: GeoPoint,
        profile: TravelProfile,
    ) -> Result<ComputedPath, AppError> {
        self.osrm.calculate_route(start, end, profile).await
    }

    /// Validate the request, compute the path and measure it.
    ///
    /// The returned route has an empty `id`; one is assigned when it is saved.
    pub async fn create_complete_route(
        &self,
        session: Option<&AuthSession>,
        request: &NewRouteRequest,
    ) -> Result<Route, AppError> {
        request.validate()?;
        let session = session.ok_or(AppError::Unauthorized)?;

        let (start_point, end_point) = match (request.start_point, request.end_point) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(AppError::BadRequest(
                    "Start and end points are required".to_string(),
                ))
            }
        };

        let path = self
            .osrm
            .calculate_route(start_point, end_point, request.profile)
            .await?;

        let route = build_route(session, request, start_point, end_point, path);

        tracing::info!(
            user_id = %session.uid,
            distance_km = route.distance,
            difficulty = ?route.difficulty,
            "Route created"
        );

        Ok(route)
    }
}

fn build_route(
    session: &AuthSession,
    request: &NewRouteRequest,
    start_point: GeoPoint,
    end_point: GeoPoint,
    path: ComputedPath,
) -> Route {
    let gain = request
        .elevation_profile
        .as_deref()
        .map(elevation_gain)
        .unwrap_or(0.0);
    let now = Utc::now();

    Route {
        id: String::new(),
        name: request.name.clone(),
        description: request.description.clone().filter(|d| !d.is_empty()),
        distance: path.distance_m / 1000.0,
        estimated_duration: (path.duration_s / 60.0).ceil() as u32,
        elevation_gain: gain,
        difficulty: calculate_route_difficulty(path.distance_m, gain),
        surface_type: vec![SurfaceType::Mixed],
        start_point,
        end_point,
        waypoints: path.waypoints,
        created_by: session.uid.clone(),
        is_public: request.is_public,
        safety_score: None,
        amenities: Amenities::default(),
        created_at: now,
        updated_at: now,
    }
}
