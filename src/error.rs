// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types shared by every external-facing service.

/// Application error type.
///
/// Pure components (filter engine, OSM parser) never produce these; every
/// wrapper around an external API logs and returns one without retrying.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Strava account not connected")]
    StravaNotConnected,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Overpass API error: {0}")]
    Overpass(String),

    #[error("Routing error: {0}")]
    Routing(String),

    #[error("Firebase Auth error: {0}")]
    Auth(String),

    #[error("Strava API error: {0}")]
    StravaApi(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Message used when Strava rejects a request with 429.
    pub const STRAVA_RATE_LIMIT: &'static str = "Rate limit exceeded";
    /// Message used when Strava rejects the access token with 401.
    pub const STRAVA_TOKEN_ERROR: &'static str = "Invalid or expired Strava token";
    /// Message used when the routing provider returns no usable route.
    pub const NO_ROUTE_FOUND: &'static str = "No route found";

    /// Whether this is a Strava authorization failure (expired, revoked or invalid token).
    pub fn is_strava_token_error(&self) -> bool {
        match self {
            AppError::StravaApi(msg) => {
                let msg = msg.to_lowercase();
                msg.contains("token") || msg.contains("invalid") || msg.contains("unauthorized")
            }
            _ => false,
        }
    }

    /// Whether Strava rejected the request because of rate limiting.
    pub fn is_strava_rate_limit(&self) -> bool {
        matches!(self, AppError::StravaApi(msg) if msg == Self::STRAVA_RATE_LIMIT)
    }

    /// Whether the error is a semantic or authorization failure that a
    /// caller should show to the user rather than treat as a transport fault.
    pub fn is_user_facing(&self) -> bool {
        match self {
            AppError::Unauthorized
            | AppError::StravaNotConnected
            | AppError::BadRequest(_)
            | AppError::Validation(_)
            | AppError::NotFound(_) => true,
            AppError::Routing(msg) => msg == Self::NO_ROUTE_FOUND,
            _ => false,
        }
    }
}

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, AppError>;
