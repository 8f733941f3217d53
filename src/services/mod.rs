// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod auth;
pub mod discovery;
pub mod filter;
pub mod osm;
pub mod overpass;
pub mod routing;
pub mod strava;

pub use auth::{AuthService, AuthSession, FirebaseAuthClient, IdentityProvider};
pub use discovery::RouteDiscovery;
pub use overpass::OverpassClient;
pub use routing::{OsrmClient, RoutePlanner, TravelProfile};
pub use strava::{StravaClient, StravaService};
