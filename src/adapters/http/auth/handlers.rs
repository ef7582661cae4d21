//! HTTP handlers for auth endpoints.
//!
//! These proxy to the identity service through the `AuthGateway` port and
//! translate its token pairs into session cookies.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::AuthError;
use crate::ports::{AuthGateway, Credentials, SignUpRequest};

use super::super::dto::ErrorResponse;
use super::super::middleware::{cookie_value, SessionCookies};
use super::dto::{ConfirmationPendingResponse, LoginRequest, SessionUserResponse, SignUpBody};

#[derive(Clone)]
pub struct AuthHandlers {
    gateway: Arc<dyn AuthGateway>,
    cookies: SessionCookies,
}

impl AuthHandlers {
    pub fn new(gateway: Arc<dyn AuthGateway>, cookies: SessionCookies) -> Self {
        Self { gateway, cookies }
    }
}

/// POST /auth/login - Password sign in; sets session cookies
pub async fn login(
    State(handlers): State<AuthHandlers>,
    Json(req): Json<LoginRequest>,
) -> Response {
    let credentials = Credentials {
        email: req.email,
        password: req.password,
    };

    match handlers.gateway.sign_in_with_password(&credentials).await {
        Ok(session) => {
            let body: SessionUserResponse = session.user.into();
            let mut response = (StatusCode::OK, Json(body)).into_response();
            handlers
                .cookies
                .apply(&mut response, &handlers.cookies.set_values(&session.tokens));
            response
        }
        Err(e) => handle_auth_error(e),
    }
}

/// POST /auth/sign-up - Register; sets session cookies when one is issued
pub async fn sign_up(
    State(handlers): State<AuthHandlers>,
    Json(req): Json<SignUpBody>,
) -> Response {
    let request = SignUpRequest {
        email: req.email,
        password: req.password,
        display_name: req.display_name,
    };

    match handlers.gateway.sign_up(&request).await {
        Ok(Some(session)) => {
            let body: SessionUserResponse = session.user.into();
            let mut response = (StatusCode::CREATED, Json(body)).into_response();
            handlers
                .cookies
                .apply(&mut response, &handlers.cookies.set_values(&session.tokens));
            response
        }
        Ok(None) => (
            StatusCode::CREATED,
            Json(ConfirmationPendingResponse {
                message: "Check your email to confirm your account".to_string(),
            }),
        )
            .into_response(),
        Err(e) => handle_auth_error(e),
    }
}

/// POST /auth/sign-out - Revoke the session and clear cookies
pub async fn sign_out(State(handlers): State<AuthHandlers>, headers: HeaderMap) -> Response {
    if let Some(access_token) = cookie_value(&headers, &handlers.cookies.access_name) {
        // Best-effort revocation; the cookies are cleared regardless.
        if let Err(e) = handlers.gateway.sign_out(&access_token).await {
            tracing::warn!("Upstream sign-out failed: {}", e);
        }
    }

    let mut response = StatusCode::NO_CONTENT.into_response();
    handlers
        .cookies
        .apply(&mut response, &handlers.cookies.clear_values());
    response
}

/// GET /auth/login and /auth/sign-up - Resolvable targets for the
/// middleware redirect; point API clients at the POST endpoints.
pub async fn describe_login() -> Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "message": "Sign in with POST /auth/login",
        })),
    )
        .into_response()
}

pub async fn describe_sign_up() -> Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "message": "Register with POST /auth/sign-up",
        })),
    )
        .into_response()
}

fn handle_auth_error(error: AuthError) -> Response {
    match error {
        AuthError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::unauthorized("Invalid email or password")),
        )
            .into_response(),
        AuthError::ServiceUnavailable(msg) => {
            tracing::error!("Identity service unavailable: {}", msg);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::unavailable(
                    "Authentication service unavailable",
                )),
            )
                .into_response()
        }
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::unauthorized("Authentication failed")),
        )
            .into_response(),
    }
}
