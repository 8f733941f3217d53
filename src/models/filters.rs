// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route filter criteria and the option types used to populate filter widgets.

use crate::models::route::{Difficulty, SurfaceType};
use serde::{Deserialize, Deserializer, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Sparse filter criteria. Unset fields place no constraint on routes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/types/generated/")
)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteFilters {
    /// Kilometers, inclusive
    pub min_distance: Option<f64>,
    /// Kilometers, inclusive
    pub max_distance: Option<f64>,
    /// Accepted difficulties (any of)
    #[serde(deserialize_with = "null_as_default")]
    pub difficulty: Vec<Difficulty>,
    /// Accepted surfaces (route must share at least one)
    #[serde(deserialize_with = "null_as_default")]
    pub surface_types: Vec<SurfaceType>,
    /// Meters, inclusive
    pub min_elevation: Option<f64>,
    /// Meters, inclusive
    pub max_elevation: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub has_parking: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub has_bathrooms: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub has_water_fountains: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub has_lighting: bool,
}

/// Treat an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl RouteFilters {
    /// Whether no criterion is set.
    pub fn is_empty(&self) -> bool {
        *self == RouteFilters::default()
    }

    /// Constrain distance to the given range option.
    pub fn with_distance_range(mut self, range: &RangeOption) -> Self {
        self.min_distance = Some(range.min);
        self.max_distance = range.max;
        self
    }

    /// Constrain elevation gain to the given range option.
    pub fn with_elevation_range(mut self, range: &RangeOption) -> Self {
        self.min_elevation = Some(range.min);
        self.max_elevation = range.max;
        self
    }
}

/// A labelled numeric range. `max: None` means no upper bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/types/generated/")
)]
pub struct RangeOption {
    pub label: String,
    pub min: f64,
    pub max: Option<f64>,
}

impl RangeOption {
    pub(crate) fn new(label: &str, min: f64, max: Option<f64>) -> Self {
        Self {
            label: label.to_string(),
            min,
            max,
        }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && self.max.map_or(true, |max| value <= max)
    }
}

/// A labelled choice for a set-membership criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/types/generated/")
)]
pub struct ValueOption<T> {
    pub label: String,
    pub value: T,
}
