// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route discovery around a point: Overpass fetch, parse, measure, filter.

use crate::error::AppError;
use crate::models::{GeoPoint, Route, RouteDraft, RouteFilters};
use crate::services::filter::filter_routes;
use crate::services::osm::parse_osm_routes;
use crate::services::overpass::OverpassClient;
use crate::services::routing::enrich_draft;

#[derive(Clone)]
pub struct RouteDiscovery {
    overpass: OverpassClient,
    pace_min_per_km: f64,
}

impl RouteDiscovery {
    pub fn new(overpass: OverpassClient, pace_min_per_km: f64) -> Self {
        Self {
            overpass,
            pace_min_per_km,
        }
    }

    /// Unmeasured drafts for every runnable way within `radius_km` of `center`.
    pub async fn discover(
        &self,
        center: GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<RouteDraft>, AppError> {
        let elements = self.overpass.fetch_elements(center, radius_km).await?;
        let drafts = parse_osm_routes(&elements);

        tracing::info!(
            elements = elements.len(),
            drafts = drafts.len(),
            "Parsed OSM routes"
        );

        Ok(drafts)
    }

    /// Discover, measure and filter routes around `center`.
    pub async fn discover_measured(
        &self,
        center: GeoPoint,
        radius_km: f64,
        filters: &RouteFilters,
    ) -> Result<Vec<Route>, AppError> {
        let drafts = self.discover(center, radius_km).await?;
        let routes = measure_drafts(drafts, self.pace_min_per_km);
        let filtered = filter_routes(&routes, filters);

        tracing::info!(
            measured = routes.len(),
            matched = filtered.len(),
            "Filtered discovered routes"
        );

        Ok(filtered)
    }
}

/// Measure every draft, skipping those too short to form a route.
pub fn measure_drafts(drafts: Vec<RouteDraft>, pace_min_per_km: f64) -> Vec<Route> {
    drafts
        .into_iter()
        .filter_map(|draft| match enrich_draft(draft, pace_min_per_km) {
            Ok(route) => Some(route),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping unmeasurable route");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amenities, SurfaceType};

    fn draft(id: &str, waypoints: Vec<GeoPoint>) -> RouteDraft {
        RouteDraft {
            id: id.to_string(),
            name: format!("Route {}", id),
            description: None,
            surface_type: SurfaceType::Trail,
            waypoints,
            amenities: Amenities::default(),
        }
    }

    #[test]
    fn test_measure_drafts_skips_short_paths() {
        let drafts = vec![
            draft("1", vec![GeoPoint::new(37.0, -122.0)]),
            draft("2", vec![GeoPoint::new(37.0, -122.0), GeoPoint::new(37.01, -122.0)]),
        ];

        let routes = measure_drafts(drafts, 6.0);

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].id, "2");
        assert!(routes[0].distance > 1.0 && routes[0].distance < 1.2);
    }

    #[tokio::test]
    async fn test_discover_rejects_bad_radius_before_network() {
        let discovery = RouteDiscovery::new(OverpassClient::new("http://127.0.0.1:9"), 6.0);
        let err = discovery
            .discover(GeoPoint::new(37.0, -122.0), 0.0)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
