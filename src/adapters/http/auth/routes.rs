//! HTTP routes for auth endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{describe_login, describe_sign_up, login, sign_out, sign_up, AuthHandlers};

/// Creates the auth router.
pub fn auth_routes(handlers: AuthHandlers) -> Router {
    Router::new()
        .route("/auth/login", get(describe_login))
        .route("/auth/login", post(login))
        .route("/auth/sign-up", get(describe_sign_up))
        .route("/auth/sign-up", post(sign_up))
        .route("/auth/sign-out", post(sign_out))
        .with_state(handlers)
}
