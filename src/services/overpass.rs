// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Overpass API client for runnable paths around a point.

use crate::error::AppError;
use crate::models::GeoPoint;
use crate::services::osm::OsmElement;
use serde::Deserialize;

/// `highway` values considered runnable.
const RUNNABLE_HIGHWAYS: [&str; 4] = ["footway", "path", "track", "pedestrian"];

/// Overpass API client.
#[derive(Clone)]
pub struct OverpassClient {
    http: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OsmElement>,
}

impl OverpassClient {
    /// Create a client for the given interpreter endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Fetch all runnable ways (and their nodes) within `radius_km` of `center`.
    pub async fn fetch_elements(
        &self,
        center: GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<OsmElement>, AppError> {
        let query = build_query(center, radius_km)?;

        let response = self
            .http
            .post(&self.endpoint)
            .body(query)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Overpass request failed");
                AppError::Overpass(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Overpass returned an error");
            return Err(AppError::Overpass(format!("HTTP {}", status)));
        }

        let data: OverpassResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse Overpass response");
            AppError::Overpass(format!("JSON parse error: {}", e))
        })?;

        tracing::info!(
            latitude = center.latitude,
            longitude = center.longitude,
            radius_km,
            elements = data.elements.len(),
            "Fetched OSM elements"
        );

        Ok(data.elements)
    }
}

/// Build the Overpass QL query body.
pub fn build_query(center: GeoPoint, radius_km: f64) -> Result<String, AppError> {
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(AppError::BadRequest(format!(
            "Search radius must be a positive number of kilometers, got {}",
            radius_km
        )));
    }

    let radius_m = radius_km * 1000.0;
    let around = format!(
        "(around:{},{},{})",
        radius_m, center.latitude, center.longitude
    );

    let ways: String = RUNNABLE_HIGHWAYS
        .iter()
        .map(|highway| format!("  way[\"highway\"=\"{}\"]{};\n", highway, around))
        .collect();

    Ok(format!(
        "[out:json];\n(\n{});\nout body;\n>;\nout skel qt;\n",
        ways
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_selects_runnable_ways() {
        let query = build_query(GeoPoint::new(37.5, -122.25), 2.0).unwrap();

        assert!(query.starts_with("[out:json];"));
        for highway in RUNNABLE_HIGHWAYS {
            assert!(
                query.contains(&format!(
                    "way[\"highway\"=\"{}\"](around:2000,37.5,-122.25);",
                    highway
                )),
                "missing {} clause in {}",
                highway,
                query
            );
        }
        assert!(query.trim_end().ends_with("out skel qt;"));
    }

    #[test]
    fn test_build_query_rejects_bad_radius() {
        let center = GeoPoint::new(0.0, 0.0);
        assert!(matches!(
            build_query(center, 0.0),
            Err(AppError::BadRequest(_))
        ));
        assert!(build_query(center, -1.0).is_err());
        assert!(build_query(center, f64::NAN).is_err());
    }

    #[test]
    fn test_response_without_elements_is_empty() {
        let data: OverpassResponse = serde_json::from_str(r#"{"version": 0.6}"#).unwrap();
        assert!(data.elements.is_empty());
    }
}
