//! HTTP client for the identity service.
//!
//! The identity service is a GoTrue-compatible token API: it owns user
//! accounts, issues access/refresh token pairs, and validates access
//! tokens on `GET /auth/v1/user`. This adapter implements both the
//! `SessionValidator` and `AuthGateway` ports against it.
//!
//! One client is constructed at startup from [`AuthConfig`]; per-request
//! credentials travel as arguments, never as client state.

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_json::json;

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, AuthenticatedUser, SessionTokens, UserId};
use crate::ports::{AuthGateway, Credentials, SessionValidator, SignUpRequest, SignedInSession};

/// Identity service client.
pub struct IdentityClient {
    base_url: String,
    publishable_key: Secret<String>,
    http_client: reqwest::Client,
}

/// User payload returned by `GET /auth/v1/user` and inside token grants.
#[derive(Debug, Deserialize)]
struct UserPayload {
    id: String,
    email: Option<String>,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    #[serde(default)]
    display_name: Option<String>,
}

/// Token grant payload returned by `POST /auth/v1/token` and signup.
#[derive(Debug, Deserialize)]
struct TokenGrant {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
    user: UserPayload,
}

/// Error body the identity service returns on 4xx responses.
#[derive(Debug, Deserialize)]
struct IdentityErrorBody {
    #[serde(alias = "error_code", alias = "code")]
    error: Option<String>,
    #[serde(alias = "error_description", alias = "msg")]
    message: Option<String>,
}

impl IdentityClient {
    /// Creates a client from the auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: config.identity_url.trim_end_matches('/').to_string(),
            publishable_key: config.publishable_key.clone(),
            http_client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn map_transport_error(e: reqwest::Error) -> AuthError {
        tracing::error!("Identity service request failed: {}", e);
        AuthError::service_unavailable(e.to_string())
    }

    /// Maps a non-success response to an `AuthError`, consuming the body.
    async fn map_error_response(response: reqwest::Response) -> AuthError {
        let status = response.status();
        if status.is_server_error() {
            tracing::error!("Identity service returned {}", status);
            return AuthError::service_unavailable(format!("identity service returned {}", status));
        }

        let body: Option<IdentityErrorBody> = response.json().await.ok();
        let code = body.as_ref().and_then(|b| b.error.as_deref());

        // Expired tokens come back as 401 with a distinguishable code so
        // the middleware can try a refresh.
        if code == Some("session_expired") || code == Some("bad_jwt_expired") {
            return AuthError::TokenExpired;
        }

        match status.as_u16() {
            400 | 422 => AuthError::InvalidCredentials,
            401 | 403 => {
                tracing::debug!(
                    "Identity service rejected token: {}",
                    body.and_then(|b| b.message).unwrap_or_default()
                );
                AuthError::InvalidToken
            }
            _ => AuthError::service_unavailable(format!("identity service returned {}", status)),
        }
    }

    fn user_from_payload(payload: UserPayload) -> Result<AuthenticatedUser, AuthError> {
        let user_id = UserId::new(&payload.id).map_err(|_| {
            tracing::warn!("Identity service returned empty user id");
            AuthError::InvalidToken
        })?;

        let email = payload.email.unwrap_or_default();
        Ok(AuthenticatedUser::new(
            user_id,
            email,
            payload.user_metadata.display_name,
        ))
    }

    fn tokens_from_grant(grant: &TokenGrant) -> SessionTokens {
        SessionTokens {
            access_token: grant.access_token.clone(),
            refresh_token: grant.refresh_token.clone(),
            expires_in: grant.expires_in,
        }
    }
}

#[async_trait]
impl SessionValidator for IdentityClient {
    async fn validate(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError> {
        let response = self
            .http_client
            .get(self.url("/auth/v1/user"))
            .header("apikey", self.publishable_key.expose_secret())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        if !response.status().is_success() {
            return Err(Self::map_error_response(response).await);
        }

        let payload: UserPayload = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse identity user payload: {}", e);
            AuthError::service_unavailable(format!("unparseable user payload: {}", e))
        })?;

        Self::user_from_payload(payload)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<SessionTokens, AuthError> {
        let response = self
            .http_client
            .post(self.url("/auth/v1/token?grant_type=refresh_token"))
            .header("apikey", self.publishable_key.expose_secret())
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        if !response.status().is_success() {
            return Err(Self::map_error_response(response).await);
        }

        let grant: TokenGrant = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse token grant: {}", e);
            AuthError::service_unavailable(format!("unparseable token grant: {}", e))
        })?;

        Ok(Self::tokens_from_grant(&grant))
    }
}

#[async_trait]
impl AuthGateway for IdentityClient {
    async fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> Result<SignedInSession, AuthError> {
        let response = self
            .http_client
            .post(self.url("/auth/v1/token?grant_type=password"))
            .header("apikey", self.publishable_key.expose_secret())
            .json(&json!({
                "email": credentials.email,
                "password": credentials.password,
            }))
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        if !response.status().is_success() {
            return Err(Self::map_error_response(response).await);
        }

        let grant: TokenGrant = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse token grant: {}", e);
            AuthError::service_unavailable(format!("unparseable token grant: {}", e))
        })?;

        let tokens = Self::tokens_from_grant(&grant);
        let user = Self::user_from_payload(grant.user)?;
        Ok(SignedInSession { tokens, user })
    }

    async fn sign_up(
        &self,
        request: &SignUpRequest,
    ) -> Result<Option<SignedInSession>, AuthError> {
        let response = self
            .http_client
            .post(self.url("/auth/v1/signup"))
            .header("apikey", self.publishable_key.expose_secret())
            .json(&json!({
                "email": request.email,
                "password": request.password,
                "data": { "display_name": request.display_name },
            }))
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        if !response.status().is_success() {
            return Err(Self::map_error_response(response).await);
        }

        // With email confirmation enabled the service returns the user
        // without a token pair; the session starts after confirmation.
        let body: serde_json::Value = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse signup response: {}", e);
            AuthError::service_unavailable(format!("unparseable signup response: {}", e))
        })?;

        if body.get("access_token").is_some() {
            let grant: TokenGrant = serde_json::from_value(body).map_err(|e| {
                AuthError::service_unavailable(format!("unparseable token grant: {}", e))
            })?;
            let tokens = Self::tokens_from_grant(&grant);
            let user = Self::user_from_payload(grant.user)?;
            Ok(Some(SignedInSession { tokens, user }))
        } else {
            Ok(None)
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .http_client
            .post(self.url("/auth/v1/logout"))
            .header("apikey", self.publishable_key.expose_secret())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        // An already-dead session is fine; sign-out is idempotent from the
        // caller's point of view.
        if response.status().is_success() || response.status().as_u16() == 401 {
            Ok(())
        } else {
            Err(Self::map_error_response(response).await)
        }
    }
}

impl std::fmt::Debug for IdentityClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
