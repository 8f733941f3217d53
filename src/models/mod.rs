// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod filters;
pub mod route;
pub mod user;

pub use filters::{RangeOption, RouteFilters, ValueOption};
pub use route::{
    Amenities, AmenityStatus, Difficulty, GeoPoint, Route, RouteDraft, RouteMetrics, SurfaceType,
};
pub use user::{ProfileUpdate, StravaTokens, UserPreferences, UserProfile};
