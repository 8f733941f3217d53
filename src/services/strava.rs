// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client and account connection service.
//!
//! Handles:
//! - OAuth authorization URL, code exchange and token refresh
//! - Activity listing and details
//! - Importing an activity as a route

use crate::config::StravaConfig;
use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::{Amenities, GeoPoint, Route, StravaTokens, SurfaceType, UserProfile};
use crate::services::auth::AuthSession;
use crate::services::routing::calculate_route_difficulty;
use chrono::Utc;
use serde::{Deserialize, Serialize};

const STRAVA_AUTH_URL: &str = "https://www.strava.com/oauth/authorize";
const STRAVA_TOKEN_URL: &str = "https://www.strava.com/oauth/token";
const STRAVA_API_BASE_URL: &str = "https://www.strava.com/api/v3";
const STRAVA_SCOPE: &str = "read,activity:read";

/// Margin before token expiration when we proactively refresh (5 minutes).
const TOKEN_REFRESH_MARGIN_SECS: i64 = 5 * 60;

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl StravaClient {
    /// Create a new Strava client with OAuth credentials.
    pub fn new(config: &StravaConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: STRAVA_API_BASE_URL.to_string(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
        }
    }

    /// URL to send the user to for the authorization-code flow.
    pub fn authorize_url(&self) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&approval_prompt=auto&scope={}",
            STRAVA_AUTH_URL,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(STRAVA_SCOPE),
        )
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenExchangeResponse, AppError> {
        let response = self
            .http
            .post(STRAVA_TOKEN_URL)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::StravaApi(format!("Token exchange failed: {}", e)))?;

        check_response_json(response).await
    }

    /// Refresh an expired access token.
    pub async fn refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenRefreshResponse, AppError> {
        let response = self
            .http
            .post(STRAVA_TOKEN_URL)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| AppError::StravaApi(format!("Token refresh request failed: {}", e)))?;

        check_response_json(response).await
    }

    /// List the athlete's activities (paginated, newest first).
    pub async fn list_activities(
        &self,
        access_token: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<StravaActivitySummary>, AppError> {
        let url = format!("{}/athlete/activities", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&[
                ("per_page", per_page.to_string()),
                ("page", page.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::StravaApi(e.to_string()))?;

        check_response_json(response).await
    }

    /// Get a detailed activity by ID.
    pub async fn get_activity(
        &self,
        access_token: &str,
        activity_id: u64,
    ) -> Result<StravaActivity, AppError> {
        let url = format!("{}/activities/{}", self.base_url, activity_id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::StravaApi(e.to_string()))?;

        check_response_json(response).await
    }
}

/// Check response status and parse the JSON body.
async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, AppError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        return Err(match status.as_u16() {
            429 => {
                tracing::warn!("Strava rate limit hit (429)");
                AppError::StravaApi(AppError::STRAVA_RATE_LIMIT.to_string())
            }
            401 => AppError::StravaApi(AppError::STRAVA_TOKEN_ERROR.to_string()),
            _ => AppError::StravaApi(format!("HTTP {}: {}", status, body)),
        });
    }

    response
        .json()
        .await
        .map_err(|e| AppError::StravaApi(format!("JSON parse error: {}", e)))
}

/// Token exchange response from Strava OAuth (includes athlete info).
#[derive(Debug, Clone, Deserialize)]
pub struct TokenExchangeResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
    pub athlete: StravaAthlete,
}

/// Token refresh response from Strava.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
}

/// Athlete info from OAuth token exchange.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StravaAthlete {
    pub id: u64,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
}

/// Summary activity for list endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StravaActivitySummary {
    pub id: u64,
    pub name: String,
    pub sport_type: String,
    pub start_date: String,
    /// Meters
    pub distance: f64,
    /// Seconds
    #[serde(default)]
    pub moving_time: u64,
    /// Meters
    #[serde(default)]
    pub total_elevation_gain: f64,
}

/// Detailed Strava activity response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StravaActivity {
    pub id: u64,
    pub name: String,
    pub sport_type: String,
    pub start_date: String,
    /// Meters
    pub distance: f64,
    /// Seconds
    #[serde(default)]
    pub moving_time: u64,
    /// Meters
    #[serde(default)]
    pub total_elevation_gain: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub map: StravaMap,
}

impl StravaActivity {
    /// Get the detailed polyline, falling back to summary if not available.
    pub fn get_polyline(&self) -> Option<&str> {
        self.map
            .polyline
            .as_deref()
            .filter(|p| !p.is_empty())
            .or(self.map.summary_polyline.as_deref())
            .filter(|p| !p.is_empty())
    }
}

/// Activity map data with polylines.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StravaMap {
    #[serde(default)]
    pub polyline: Option<String>,
    #[serde(default)]
    pub summary_polyline: Option<String>,
}

/// Convert a Strava activity into a private route owned by `user_id`.
pub fn activity_to_route(activity: &StravaActivity, user_id: &str) -> Result<Route, AppError> {
    let encoded = activity
        .get_polyline()
        .ok_or_else(|| AppError::BadRequest("Activity has no polyline".to_string()))?;

    let line = polyline::decode_polyline(encoded, 5)
        .map_err(|e| AppError::BadRequest(format!("Failed to decode polyline: {}", e)))?;
    let waypoints: Vec<GeoPoint> = line.coords().map(|c| GeoPoint::from(*c)).collect();

    let (start_point, end_point) = match (waypoints.first(), waypoints.last()) {
        (Some(start), Some(end)) if waypoints.len() >= 2 => (*start, *end),
        _ => {
            return Err(AppError::BadRequest(
                "Activity path has fewer than two points".to_string(),
            ))
        }
    };

    let now = Utc::now();
    Ok(Route {
        id: String::new(),
        name: activity.name.clone(),
        description: activity.description.clone().filter(|d| !d.is_empty()),
        distance: activity.distance / 1000.0,
        estimated_duration: activity.moving_time.div_ceil(60) as u32,
        elevation_gain: activity.total_elevation_gain,
        difficulty: calculate_route_difficulty(activity.distance, activity.total_elevation_gain),
        surface_type: vec![SurfaceType::Mixed],
        start_point,
        end_point,
        waypoints,
        created_by: user_id.to_string(),
        is_public: false,
        safety_score: None,
        amenities: Amenities::default(),
        created_at: now,
        updated_at: now,
    })
}

/// Whether a stored token should be refreshed before use.
///
/// Tokens without a recorded expiry are always refreshed.
pub fn needs_refresh(expires_at: Option<i64>, now: i64) -> bool {
    match expires_at {
        Some(expires_at) => now + TOKEN_REFRESH_MARGIN_SECS >= expires_at,
        None => true,
    }
}

/// High-level Strava service that ties the API to the user's profile.
#[derive(Clone)]
pub struct StravaService {
    client: StravaClient,
    db: FirestoreDb,
}

impl StravaService {
    pub fn new(client: StravaClient, db: FirestoreDb) -> Self {
        Self { client, db }
    }

    pub fn authorize_url(&self) -> String {
        self.client.authorize_url()
    }

    /// Exchange an authorization code and store the connection on the profile.
    pub async fn connect_account(
        &self,
        session: Option<&AuthSession>,
        code: &str,
    ) -> Result<UserProfile, AppError> {
        let session = session.ok_or(AppError::Unauthorized)?;

        let token_response = self.client.exchange_code(code).await.map_err(|e| {
            tracing::error!(error = %e, "Error exchanging Strava code");
            e
        })?;

        let athlete_id = token_response.athlete.id;
        let profile = self
            .db
            .connect_strava(
                &session.uid,
                StravaTokens {
                    athlete_id: athlete_id.to_string(),
                    access_token: token_response.access_token,
                    refresh_token: token_response.refresh_token,
                    expires_at: token_response.expires_at,
                },
            )
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Error connecting Strava account");
                e
            })?;

        tracing::info!(uid = %session.uid, athlete_id, "Strava account connected");
        Ok(profile)
    }

    pub async fn disconnect_account(
        &self,
        session: Option<&AuthSession>,
    ) -> Result<UserProfile, AppError> {
        let session = session.ok_or(AppError::Unauthorized)?;

        let profile = self.db.disconnect_strava(&session.uid).await.map_err(|e| {
            tracing::error!(error = %e, "Error disconnecting Strava account");
            e
        })?;

        tracing::info!(uid = %session.uid, "Strava account disconnected");
        Ok(profile)
    }

    /// Load the profile and require a Strava connection.
    async fn connected_profile(
        &self,
        session: Option<&AuthSession>,
    ) -> Result<UserProfile, AppError> {
        let session = session.ok_or(AppError::Unauthorized)?;

        let profile = self
            .db
            .get_user_profile(&session.uid)
            .await?
            .ok_or_else(|| AppError::NotFound("User profile not found".to_string()))?;

        if !profile.strava_connected || profile.strava_access_token.is_none() {
            return Err(AppError::StravaNotConnected);
        }
        Ok(profile)
    }

    /// Return a usable access token, refreshing and persisting it when expiring.
    ///
    /// A failed refresh falls back to the stored token.
    async fn access_token(&self, profile: &UserProfile) -> Result<String, AppError> {
        let stored = profile
            .strava_access_token
            .clone()
            .ok_or(AppError::StravaNotConnected)?;

        let refresh_token = match &profile.strava_refresh_token {
            Some(t) if needs_refresh(profile.strava_token_expires_at, Utc::now().timestamp()) => t,
            _ => return Ok(stored),
        };

        match self.client.refresh_token(refresh_token).await {
            Ok(new_tokens) => {
                self.db
                    .set_strava_tokens(
                        &profile.id,
                        &new_tokens.access_token,
                        &new_tokens.refresh_token,
                        new_tokens.expires_at,
                    )
                    .await?;
                tracing::info!(uid = %profile.id, "Strava token refreshed");
                Ok(new_tokens.access_token)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    uid = %profile.id,
                    "Error refreshing token, trying with existing token"
                );
                Ok(stored)
            }
        }
    }

    /// List the signed-in user's Strava activities.
    pub async fn get_activities(
        &self,
        session: Option<&AuthSession>,
        limit: u32,
        page: u32,
    ) -> Result<Vec<StravaActivitySummary>, AppError> {
        let profile = self.connected_profile(session).await?;
        let access_token = self.access_token(&profile).await?;

        self.client
            .list_activities(&access_token, page, limit)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Error getting Strava activities");
                e
            })
    }

    pub async fn get_activity_details(
        &self,
        session: Option<&AuthSession>,
        activity_id: u64,
    ) -> Result<StravaActivity, AppError> {
        let profile = self.connected_profile(session).await?;
        let access_token = self.access_token(&profile).await?;

        self.client
            .get_activity(&access_token, activity_id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, activity_id, "Error getting Strava activity details");
                e
            })
    }

    /// Fetch an activity and convert it into a private route for the user.
    pub async fn import_activity_as_route(
        &self,
        session: Option<&AuthSession>,
        activity_id: u64,
    ) -> Result<Route, AppError> {
        let activity = self.get_activity_details(session, activity_id).await?;
        let uid = session.map(|s| s.uid.as_str()).ok_or(AppError::Unauthorized)?;

        let route = activity_to_route(&activity, uid)?;
        tracing::info!(
            activity_id,
            points = route.waypoints.len(),
            "Imported Strava activity as route"
        );
        Ok(route)
    }
}
