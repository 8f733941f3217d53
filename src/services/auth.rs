// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firebase Authentication (Identity Toolkit REST API) and profile bootstrap.

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::UserProfile;
use serde::{Deserialize, Serialize};

const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// A signed-in Firebase user.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Firebase uid (also the profile document ID)
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub id_token: String,
    pub refresh_token: String,
}

/// Federated identity providers accepted by `sign_in_with_provider`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityProvider {
    Google,
    Apple,
}

impl IdentityProvider {
    pub fn provider_id(&self) -> &'static str {
        match self {
            IdentityProvider::Google => "google.com",
            IdentityProvider::Apple => "apple.com",
        }
    }
}

/// Identity Toolkit sign-in/sign-up response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
    id_token: String,
    refresh_token: String,
}

impl From<SignInResponse> for AuthSession {
    fn from(r: SignInResponse) -> Self {
        Self {
            uid: r.local_id,
            email: r.email.filter(|e| !e.is_empty()),
            display_name: r.display_name.filter(|n| !n.is_empty()),
            photo_url: r.photo_url.filter(|p| !p.is_empty()),
            id_token: r.id_token,
            refresh_token: r.refresh_token,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FirebaseErrorBody {
    error: FirebaseErrorDetail,
}

#[derive(Debug, Deserialize)]
struct FirebaseErrorDetail {
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdpRequest {
    post_body: String,
    request_uri: &'static str,
    return_idp_credential: bool,
    return_secure_token: bool,
}

/// Firebase Auth REST client.
#[derive(Clone)]
pub struct FirebaseAuthClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FirebaseAuthClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: IDENTITY_TOOLKIT_URL.to_string(),
            api_key,
        }
    }

    /// Create an email/password account.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        self.post_json(
            "accounts:signUp",
            &PasswordRequest {
                email,
                password,
                return_secure_token: true,
            },
        )
        .await
    }

    /// Sign in with email and password.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AppError> {
        self.post_json(
            "accounts:signInWithPassword",
            &PasswordRequest {
                email,
                password,
                return_secure_token: true,
            },
        )
        .await
    }

    /// Exchange a provider-issued ID token for a Firebase session.
    pub async fn sign_in_with_idp(
        &self,
        provider: IdentityProvider,
        provider_id_token: &str,
    ) -> Result<AuthSession, AppError> {
        let post_body = format!(
            "id_token={}&providerId={}",
            urlencoding::encode(provider_id_token),
            provider.provider_id()
        );
        self.post_json(
            "accounts:signInWithIdp",
            &IdpRequest {
                post_body,
                request_uri: "http://localhost",
                return_idp_credential: true,
                return_secure_token: true,
            },
        )
        .await
    }

    async fn post_json<B: Serialize>(&self, method: &str, body: &B) -> Result<AuthSession, AppError> {
        let url = format!("{}/{}", self.base_url, method);

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Auth(firebase_error_message(status.as_u16(), &body)));
        }

        let parsed: SignInResponse = response
            .json()
            .await
            .map_err(|e| AppError::Auth(format!("Failed to parse auth response: {}", e)))?;

        Ok(parsed.into())
    }
}

/// Extract the Firebase error code (e.g. `EMAIL_EXISTS`) from an error body.
pub fn firebase_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<FirebaseErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| format!("HTTP {}", status))
}

/// Authentication service: Firebase sign-in plus Firestore profile bootstrap.
#[derive(Clone)]
pub struct AuthService {
    client: FirebaseAuthClient,
    db: FirestoreDb,
}

impl AuthService {
    pub fn new(client: FirebaseAuthClient, db: FirestoreDb) -> Self {
        Self { client, db }
    }

    /// Create an account and its profile document.
    pub async fn sign_up_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AppError> {
        let session = self.client.sign_up(email, password).await.map_err(|e| {
            tracing::error!(error = %e, "Error signing up with email");
            e
        })?;

        self.create_profile(&session).await?;
        tracing::info!(uid = %session.uid, "User signed up");
        Ok(session)
    }

    pub async fn sign_in_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AppError> {
        let session = self
            .client
            .sign_in_with_password(email, password)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Error signing in with email");
                e
            })?;

        tracing::info!(uid = %session.uid, "User signed in");
        Ok(session)
    }

    /// Sign in with a Google or Apple ID token, creating the profile on first sign-in.
    pub async fn sign_in_with_provider(
        &self,
        provider: IdentityProvider,
        provider_id_token: &str,
    ) -> Result<AuthSession, AppError> {
        let session = self
            .client
            .sign_in_with_idp(provider, provider_id_token)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, provider = provider.provider_id(), "Error signing in with provider");
                e
            })?;

        if !self.db.user_exists(&session.uid).await? {
            self.create_profile(&session).await?;
        }

        tracing::info!(uid = %session.uid, provider = provider.provider_id(), "User signed in");
        Ok(session)
    }

    /// End a session. Firebase ID tokens are stateless, so this only drops it.
    pub fn sign_out(&self, session: AuthSession) {
        tracing::info!(uid = %session.uid, "User signed out");
    }

    /// Profile of the signed-in user, if any.
    pub async fn current_user_profile(
        &self,
        session: Option<&AuthSession>,
    ) -> Result<Option<UserProfile>, AppError> {
        match session {
            Some(session) => self.db.get_user_profile(&session.uid).await,
            None => Ok(None),
        }
    }

    async fn create_profile(&self, session: &AuthSession) -> Result<(), AppError> {
        let profile = UserProfile::new(
            &session.uid,
            session.email.as_deref(),
            session.display_name.clone(),
            session.photo_url.clone(),
            chrono::Utc::now(),
        );

        self.db.create_user_profile(&profile).await.map_err(|e| {
            tracing::error!(error = %e, uid = %session.uid, "Error creating user profile");
            e
        })
    }
}
