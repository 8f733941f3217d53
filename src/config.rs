//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.

use std::env;

const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
const DEFAULT_OSRM_URL: &str = "https://router.project-osrm.org";
const DEFAULT_RUNNING_PACE_MIN_PER_KM: f64 = 6.0;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Firebase Web API key (Identity Toolkit); account features are disabled when absent
    pub firebase_api_key: Option<String>,
    /// GCP / Firebase project ID (Firestore)
    pub gcp_project_id: String,
    /// Strava OAuth credentials; Strava features are disabled when absent
    pub strava: Option<StravaConfig>,
    /// Overpass API interpreter endpoint
    pub overpass_url: String,
    /// OSRM server base URL (without `/route/v1`)
    pub osrm_url: String,
    /// Pace used to estimate duration of measured OSM routes
    pub running_pace_min_per_km: f64,
}

/// Strava OAuth application credentials.
#[derive(Debug, Clone)]
pub struct StravaConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Redirect URI registered with Strava for the authorization-code flow
    pub redirect_uri: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            firebase_api_key: Some("test_api_key".to_string()),
            gcp_project_id: "test-project".to_string(),
            strava: Some(StravaConfig {
                client_id: "test_client_id".to_string(),
                client_secret: "test_secret".to_string(),
                redirect_uri: "http://localhost:8081/strava-callback".to_string(),
            }),
            overpass_url: DEFAULT_OVERPASS_URL.to_string(),
            osrm_url: DEFAULT_OSRM_URL.to_string(),
            running_pace_min_per_km: DEFAULT_RUNNING_PACE_MIN_PER_KM,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let strava = match (
            env::var("STRAVA_CLIENT_ID"),
            env::var("STRAVA_CLIENT_SECRET"),
        ) {
            (Ok(client_id), Ok(client_secret)) => Some(StravaConfig {
                client_id: client_id.trim().to_string(),
                client_secret: client_secret.trim().to_string(),
                redirect_uri: env::var("STRAVA_REDIRECT_URI")
                    .map_err(|_| ConfigError::Missing("STRAVA_REDIRECT_URI"))?,
            }),
            _ => None,
        };

        let running_pace_min_per_km = match env::var("RUNNING_PACE_MIN_PER_KM") {
            Ok(raw) => parse_pace(&raw)?,
            Err(_) => DEFAULT_RUNNING_PACE_MIN_PER_KM,
        };

        Ok(Self {
            firebase_api_key: optional_env("FIREBASE_API_KEY"),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            strava,
            overpass_url: env::var("OVERPASS_URL")
                .unwrap_or_else(|_| DEFAULT_OVERPASS_URL.to_string()),
            osrm_url: env::var("OSRM_URL").unwrap_or_else(|_| DEFAULT_OSRM_URL.to_string()),
            running_pace_min_per_km,
        })
    }
}

/// Read a variable, treating unset and blank values alike.
fn optional_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_pace(raw: &str) -> Result<f64, ConfigError> {
    match raw.trim().parse::<f64>() {
        Ok(pace) if pace.is_finite() && pace > 0.0 => Ok(pace),
        _ => Err(ConfigError::Invalid {
            name: "RUNNING_PACE_MIN_PER_KM",
            value: raw.to_string(),
        }),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}
