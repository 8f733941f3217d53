// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - User profiles (identity, Strava connection, preferences)
//! - Saved routes

use crate::db::collections;
use crate::error::AppError;
use crate::models::{ProfileUpdate, Route, StravaTokens, UserPreferences, UserProfile};
use chrono::Utc;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Profile Operations ─────────────────────────────────

    /// Get a user profile by Firebase uid.
    pub async fn get_user_profile(&self, user_id: &str) -> Result<Option<UserProfile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn user_exists(&self, user_id: &str) -> Result<bool, AppError> {
        Ok(self.get_user_profile(user_id).await?.is_some())
    }

    /// Write a profile document, replacing any existing one.
    pub async fn create_user_profile(&self, profile: &UserProfile) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&profile.id)
            .object(profile)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Load, modify and write back a profile.
    async fn modify_user_profile<F>(&self, user_id: &str, modify: F) -> Result<UserProfile, AppError>
    where
        F: FnOnce(&mut UserProfile),
    {
        let mut profile = self
            .get_user_profile(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User profile {}", user_id)))?;

        modify(&mut profile);
        self.create_user_profile(&profile).await?;
        Ok(profile)
    }

    /// Apply user-editable profile fields.
    pub async fn update_user_profile(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<UserProfile, AppError> {
        self.modify_user_profile(user_id, |profile| update.apply(profile, Utc::now()))
            .await
    }

    /// Replace saved route preferences.
    pub async fn update_user_preferences(
        &self,
        user_id: &str,
        preferences: UserPreferences,
    ) -> Result<UserProfile, AppError> {
        self.modify_user_profile(user_id, |profile| {
            profile.preferences = Some(preferences);
            profile.updated_at = Utc::now();
        })
        .await
    }

    /// Mark Strava as connected and store its tokens.
    pub async fn connect_strava(
        &self,
        user_id: &str,
        tokens: StravaTokens,
    ) -> Result<UserProfile, AppError> {
        self.modify_user_profile(user_id, |profile| {
            profile.connect_strava(tokens, Utc::now())
        })
        .await
    }

    /// Clear the Strava connection and tokens.
    pub async fn disconnect_strava(&self, user_id: &str) -> Result<UserProfile, AppError> {
        self.modify_user_profile(user_id, |profile| profile.disconnect_strava(Utc::now()))
            .await
    }

    /// Store refreshed Strava tokens without touching the connection flag.
    pub async fn set_strava_tokens(
        &self,
        user_id: &str,
        access_token: &str,
        refresh_token: &str,
        expires_at: i64,
    ) -> Result<UserProfile, AppError> {
        self.modify_user_profile(user_id, |profile| {
            profile.strava_access_token = Some(access_token.to_string());
            profile.strava_refresh_token = Some(refresh_token.to_string());
            profile.strava_token_expires_at = Some(expires_at);
            profile.updated_at = Utc::now();
        })
        .await
    }

    // ─── Route Operations ────────────────────────────────────────

    /// Save a route, assigning a document ID if it has none.
    pub async fn save_route(&self, mut route: Route) -> Result<Route, AppError> {
        let now = Utc::now();
        if route.id.is_empty() {
            route.id = uuid::Uuid::new_v4().to_string();
            route.created_at = now;
        }
        route.updated_at = now;

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::ROUTES)
            .document_id(&route.id)
            .object(&route)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::info!(route_id = %route.id, created_by = %route.created_by, "Route saved");
        Ok(route)
    }

    pub async fn get_route(&self, route_id: &str) -> Result<Option<Route>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::ROUTES)
            .obj()
            .one(route_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Most recently created public routes.
    pub async fn list_public_routes(&self, limit: u32) -> Result<Vec<Route>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::ROUTES)
            .filter(|q| q.for_all([q.field("isPublic").eq(true)]))
            .order_by([("createdAt", firestore::FirestoreQueryDirection::Descending)])
            .limit(limit)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All routes created by a user, newest first.
    pub async fn list_routes_for_user(&self, user_id: &str) -> Result<Vec<Route>, AppError> {
        let user_id = user_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::ROUTES)
            .filter(move |q| q.for_all([q.field("createdBy").eq(user_id.clone())]))
            .order_by([("createdAt", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_db_returns_database_error() {
        let db = FirestoreDb::new_mock();

        let result = db.get_user_profile("uid").await;
        assert!(matches!(result, Err(AppError::Database(_))));

        let result = db.list_public_routes(10).await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }
}
