//! User profile model for storage.

use crate::models::route::{Difficulty, SurfaceType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User profile stored in Firestore (document ID = Firebase uid).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Firebase Auth uid
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Gates the Strava fields below
    #[serde(default)]
    pub strava_connected: bool,
    #[serde(default)]
    pub strava_id: Option<String>,
    #[serde(default)]
    pub strava_access_token: Option<String>,
    #[serde(default)]
    pub strava_refresh_token: Option<String>,
    /// Access token expiry (Unix timestamp)
    #[serde(default)]
    pub strava_token_expires_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<UserPreferences>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// A fresh profile with Strava disconnected.
    pub fn new(
        id: &str,
        email: Option<&str>,
        display_name: Option<String>,
        photo_url: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.to_string(),
            email: email.unwrap_or_default().to_string(),
            display_name,
            photo_url,
            strava_connected: false,
            strava_id: None,
            strava_access_token: None,
            strava_refresh_token: None,
            strava_token_expires_at: None,
            preferences: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark Strava as connected with the given tokens.
    pub fn connect_strava(&mut self, tokens: StravaTokens, now: DateTime<Utc>) {
        self.strava_connected = true;
        self.strava_id = Some(tokens.athlete_id);
        self.strava_access_token = Some(tokens.access_token);
        self.strava_refresh_token = Some(tokens.refresh_token);
        self.strava_token_expires_at = Some(tokens.expires_at);
        self.updated_at = now;
    }

    /// Clear the Strava connection and all stored tokens.
    pub fn disconnect_strava(&mut self, now: DateTime<Utc>) {
        self.strava_connected = false;
        self.strava_id = None;
        self.strava_access_token = None;
        self.strava_refresh_token = None;
        self.strava_token_expires_at = None;
        self.updated_at = now;
    }
}

/// Strava tokens and athlete identity to store on a profile.
#[derive(Debug, Clone)]
pub struct StravaTokens {
    pub athlete_id: String,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
}

/// Fields a user may change on their own profile.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub display_name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
}

impl ProfileUpdate {
    /// Apply set fields onto a profile.
    pub fn apply(self, profile: &mut UserProfile, now: DateTime<Utc>) {
        if let Some(email) = self.email {
            profile.email = email;
        }
        if let Some(display_name) = self.display_name {
            profile.display_name = Some(display_name);
        }
        if let Some(photo_url) = self.photo_url {
            profile.photo_url = Some(photo_url);
        }
        profile.updated_at = now;
    }
}

/// Route preferences saved on a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    /// Kilometers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_elevation: Option<ElevationPreference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_surface_types: Option<Vec<SurfaceType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_preference: Option<SafetyPreference>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElevationPreference {
    Flat,
    Hilly,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SafetyPreference {
    Standard,
    WellLit,
    HighTraffic,
}
