// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OpenStreetMap element model and route parsing.
//!
//! Overpass returns a flat element list in which a way's node records may
//! appear before or after the way itself, so parsing indexes all nodes
//! first and resolves way references second.

use crate::models::{AmenityStatus, Amenities, GeoPoint, RouteDraft, SurfaceType};
use serde::Deserialize;
use std::collections::HashMap;

/// An element from an Overpass JSON response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OsmElement {
    Node {
        id: i64,
        lat: f64,
        lon: f64,
        #[serde(default)]
        tags: Option<HashMap<String, String>>,
    },
    Way {
        id: i64,
        #[serde(default)]
        nodes: Vec<i64>,
        #[serde(default)]
        tags: Option<HashMap<String, String>>,
    },
    /// Relations and anything else Overpass may emit; ignored by the parser.
    #[serde(other)]
    Other,
}

/// Parse raw Overpass elements into unmeasured route drafts, one per way.
///
/// Node references that cannot be resolved are dropped.
pub fn parse_osm_routes(elements: &[OsmElement]) -> Vec<RouteDraft> {
    let nodes: HashMap<i64, GeoPoint> = elements
        .iter()
        .filter_map(|element| match element {
            OsmElement::Node { id, lat, lon, .. } => Some((*id, GeoPoint::new(*lat, *lon))),
            _ => None,
        })
        .collect();

    let drafts: Vec<RouteDraft> = elements
        .iter()
        .filter_map(|element| match element {
            OsmElement::Way { id, nodes: refs, tags } => {
                Some(parse_way(*id, refs, tags.as_ref(), &nodes))
            }
            _ => None,
        })
        .collect();

    tracing::debug!(
        nodes = nodes.len(),
        ways = drafts.len(),
        "Parsed OSM elements"
    );

    drafts
}

fn parse_way(
    id: i64,
    refs: &[i64],
    tags: Option<&HashMap<String, String>>,
    nodes: &HashMap<i64, GeoPoint>,
) -> RouteDraft {
    let waypoints: Vec<GeoPoint> = refs.iter().filter_map(|r| nodes.get(r).copied()).collect();

    if waypoints.len() < refs.len() {
        tracing::trace!(
            way_id = id,
            missing = refs.len() - waypoints.len(),
            "Dropped unresolved node references"
        );
    }

    let tag = |key: &str| tags.and_then(|t| t.get(key)).map(String::as_str);

    RouteDraft {
        id: id.to_string(),
        name: tag("name")
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Route {}", id)),
        description: tag("description")
            .filter(|d| !d.is_empty())
            .map(str::to_string),
        surface_type: classify_surface(tag("surface")),
        waypoints,
        amenities: Amenities {
            has_lighting: classify_lit(tag("lit")),
            ..Default::default()
        },
    }
}

/// Map an OSM `surface` tag value onto a coarse surface type.
pub fn classify_surface(surface: Option<&str>) -> SurfaceType {
    match surface {
        Some("asphalt" | "paved" | "concrete") => SurfaceType::Pavement,
        Some("dirt" | "unpaved" | "ground" | "grass") => SurfaceType::Trail,
        Some("track") => SurfaceType::Track,
        _ => SurfaceType::Mixed,
    }
}

/// Map an OSM `lit` tag value onto a lighting status.
fn classify_lit(lit: Option<&str>) -> AmenityStatus {
    match lit {
        Some("yes" | "24/7" | "automatic" | "limited") => AmenityStatus::Yes,
        Some("no" | "disused") => AmenityStatus::No,
        _ => AmenityStatus::Unknown,
    }
}
