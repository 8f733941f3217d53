// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route model: geometry, metrics and metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/types/generated/")
)]
pub struct GeoPoint {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(p: GeoPoint) -> Self {
        geo::Point::new(p.longitude, p.latitude)
    }
}

impl From<geo::Coord<f64>> for GeoPoint {
    /// `geo` coordinates are (x = longitude, y = latitude).
    fn from(c: geo::Coord<f64>) -> Self {
        Self::new(c.y, c.x)
    }
}

/// Coarse three-tier route difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/types/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Challenging,
}

/// Coarse classification of path material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/types/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceType {
    Pavement,
    Trail,
    Track,
    Mixed,
}

/// Known state of a single amenity.
///
/// Stored as an optional boolean: `true`, `false`, or absent for `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum AmenityStatus {
    Yes,
    No,
    #[default]
    Unknown,
}

impl AmenityStatus {
    pub fn is_yes(&self) -> bool {
        *self == AmenityStatus::Yes
    }

    pub fn is_unknown(&self) -> bool {
        *self == AmenityStatus::Unknown
    }
}

impl From<Option<bool>> for AmenityStatus {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => AmenityStatus::Yes,
            Some(false) => AmenityStatus::No,
            None => AmenityStatus::Unknown,
        }
    }
}

impl From<AmenityStatus> for Option<bool> {
    fn from(value: AmenityStatus) -> Self {
        match value {
            AmenityStatus::Yes => Some(true),
            AmenityStatus::No => Some(false),
            AmenityStatus::Unknown => None,
        }
    }
}

/// Amenities available along a route. Every flag defaults to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/types/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Amenities {
    #[serde(default, skip_serializing_if = "AmenityStatus::is_unknown")]
    #[cfg_attr(feature = "binding-generation", ts(type = "boolean | undefined"))]
    pub has_parking: AmenityStatus,
    #[serde(default, skip_serializing_if = "AmenityStatus::is_unknown")]
    #[cfg_attr(feature = "binding-generation", ts(type = "boolean | undefined"))]
    pub has_bathrooms: AmenityStatus,
    #[serde(default, skip_serializing_if = "AmenityStatus::is_unknown")]
    #[cfg_attr(feature = "binding-generation", ts(type = "boolean | undefined"))]
    pub has_water_fountains: AmenityStatus,
    #[serde(default, skip_serializing_if = "AmenityStatus::is_unknown")]
    #[cfg_attr(feature = "binding-generation", ts(type = "boolean | undefined"))]
    pub has_lighting: AmenityStatus,
}

/// A fully measured route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/types/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Firestore document ID or OSM way ID
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Distance in kilometers
    pub distance: f64,
    /// Estimated duration in minutes
    pub estimated_duration: u32,
    /// Cumulative positive elevation change in meters
    pub elevation_gain: f64,
    pub difficulty: Difficulty,
    pub surface_type: Vec<SurfaceType>,
    pub start_point: GeoPoint,
    pub end_point: GeoPoint,
    /// Path geometry in travel order
    pub waypoints: Vec<GeoPoint>,
    /// Owning user ID
    pub created_by: String,
    pub is_public: bool,
    /// 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_score: Option<u8>,
    #[serde(default)]
    pub amenities: Amenities,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub created_at: DateTime<Utc>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub updated_at: DateTime<Utc>,
}

/// Numeric measurements that turn a draft into a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteMetrics {
    pub distance_km: f64,
    pub estimated_duration_min: u32,
    pub elevation_gain_m: f64,
    pub difficulty: Difficulty,
}

impl RouteMetrics {
    /// Values reported for a route whose metrics have not been computed.
    pub const UNMEASURED: RouteMetrics = RouteMetrics {
        distance_km: 0.0,
        estimated_duration_min: 0,
        elevation_gain_m: 0.0,
        difficulty: Difficulty::Moderate,
    };
}

/// A route parsed from OpenStreetMap that has geometry but no metrics yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/types/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct RouteDraft {
    /// OSM way ID as text
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Exactly one classification per parsed way
    pub surface_type: SurfaceType,
    pub waypoints: Vec<GeoPoint>,
    #[serde(default)]
    pub amenities: Amenities,
}

impl RouteDraft {
    /// Convert into a measured route.
    ///
    /// Returns `None` unless the draft has at least two waypoints.
    pub fn into_route(
        self,
        metrics: RouteMetrics,
        created_by: &str,
        is_public: bool,
        now: DateTime<Utc>,
    ) -> Option<Route> {
        if self.waypoints.len() < 2 {
            return None;
        }
        let start_point = *self.waypoints.first()?;
        let end_point = *self.waypoints.last()?;

        Some(Route {
            id: self.id,
            name: self.name,
            description: self.description,
            distance: metrics.distance_km,
            estimated_duration: metrics.estimated_duration_min,
            elevation_gain: metrics.elevation_gain_m,
            difficulty: metrics.difficulty,
            surface_type: vec![self.surface_type],
            start_point,
            end_point,
            waypoints: self.waypoints,
            created_by: created_by.to_string(),
            is_public,
            safety_score: None,
            amenities: self.amenities,
            created_at: now,
            updated_at: now,
        })
    }
}
