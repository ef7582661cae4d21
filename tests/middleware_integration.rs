//! End-to-end tests for the session middleware's access policy.
//!
//! A real axum `Router` is driven through `tower::ServiceExt::oneshot`
//! with a mock session validator, covering the redirect, refresh, and
//! fail-closed behaviors.

use std::sync::Arc;

use axum::{
    http::{header, Request, StatusCode},
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use http_body_util::BodyExt;
use secrecy::Secret;
use tower::ServiceExt;

use burrow::adapters::auth::MockSessionValidator;
use burrow::adapters::http::middleware::{
    session_middleware, OptionalAuth, RequireAuth, SessionContext,
};
use burrow::config::AuthConfig;
use burrow::domain::foundation::{AuthError, SessionTokens};

fn auth_config() -> AuthConfig {
    AuthConfig {
        identity_url: "https://identity.example.com".to_string(),
        publishable_key: Secret::new("pk_test_xxx".to_string()),
        login_path: "/auth/login".to_string(),
        access_cookie: "burrow-access-token".to_string(),
        refresh_cookie: "burrow-refresh-token".to_string(),
        http_timeout_secs: 10,
    }
}

async fn protected_page(RequireAuth(user): RequireAuth) -> impl IntoResponse {
    Json(serde_json::json!({ "user_id": user.id.to_string() }))
}

async fn public_page(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    Json(serde_json::json!({
        "signed_in": user.is_some(),
    }))
}

fn test_router(validator: MockSessionValidator) -> Router {
    let ctx = SessionContext::new(&auth_config(), Arc::new(validator), false);
    Router::new()
        .route("/", get(public_page))
        .route("/items/:id", get(public_page))
        .route("/my-listings", get(protected_page))
        .route("/requests", get(protected_page))
        .route("/requests/:id", get(protected_page))
        .layer(middleware::from_fn_with_state(ctx, session_middleware))
}

fn request(path: &str, cookies: Option<&str>) -> Request<axum::body::Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(cookies) = cookies {
        builder = builder.header(header::COOKIE, cookies);
    }
    builder.body(axum::body::Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn protected_path_without_session_redirects_to_login() {
    let app = test_router(MockSessionValidator::new());

    let response = app.oneshot(request("/my-listings", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/auth/login"
    );
}

#[tokio::test]
async fn protected_subpath_without_session_redirects_to_login() {
    let app = test_router(MockSessionValidator::new());

    let response = app.oneshot(request("/requests/abc123", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn protected_path_with_invalid_token_redirects_to_login() {
    let app = test_router(MockSessionValidator::new());

    let response = app
        .oneshot(request("/my-listings", Some("burrow-access-token=bogus")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn public_path_never_redirects() {
    let app = test_router(MockSessionValidator::new());

    // Anonymous
    let response = app
        .clone()
        .oneshot(request("/", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["signed_in"], false);

    // Invalid token still passes through as anonymous
    let response = app
        .oneshot(request("/", Some("burrow-access-token=bogus")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["signed_in"], false);
}

#[tokio::test]
async fn valid_session_reaches_protected_handler() {
    let app = test_router(MockSessionValidator::new().with_test_user("good-token", "user-7"));

    let response = app
        .oneshot(request(
            "/my-listings",
            Some("burrow-access-token=good-token"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["user_id"], "user-7");
}

#[tokio::test]
async fn valid_session_is_visible_on_public_pages() {
    let app = test_router(MockSessionValidator::new().with_test_user("good-token", "user-7"));

    let response = app
        .oneshot(request("/", Some("burrow-access-token=good-token")))
        .await
        .unwrap();

    assert_eq!(body_json(response).await["signed_in"], true);
}

#[tokio::test]
async fn expired_session_refreshes_and_rewrites_cookies() {
    let validator = MockSessionValidator::new()
        .with_expired_token("stale-token")
        .with_test_user("fresh-token", "user-7")
        .with_refresh(
            "refresh-1",
            SessionTokens {
                access_token: "fresh-token".to_string(),
                refresh_token: "refresh-2".to_string(),
                expires_in: Some(3600),
            },
        );
    let app = test_router(validator);

    let response = app
        .oneshot(request(
            "/my-listings",
            Some("burrow-access-token=stale-token; burrow-refresh-token=refresh-1"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let set_cookies: Vec<String> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert!(set_cookies
        .iter()
        .any(|c| c.starts_with("burrow-access-token=fresh-token")));
    assert!(set_cookies
        .iter()
        .any(|c| c.starts_with("burrow-refresh-token=refresh-2")));

    assert_eq!(body_json(response).await["user_id"], "user-7");
}

#[tokio::test]
async fn expired_session_without_refresh_redirects() {
    let app = test_router(MockSessionValidator::new().with_expired_token("stale-token"));

    let response = app
        .oneshot(request(
            "/my-listings",
            Some("burrow-access-token=stale-token"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn identity_outage_fails_closed_on_protected_paths() {
    let app = test_router(
        MockSessionValidator::new().with_error(AuthError::service_unavailable("down")),
    );

    let response = app
        .oneshot(request(
            "/my-listings",
            Some("burrow-access-token=whatever"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn identity_outage_passes_public_paths_through_anonymously() {
    let app = test_router(
        MockSessionValidator::new().with_error(AuthError::service_unavailable("down")),
    );

    let response = app
        .oneshot(request("/", Some("burrow-access-token=whatever")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["signed_in"], false);
}

#[tokio::test]
async fn successful_validation_sets_no_cookies() {
    let app = test_router(MockSessionValidator::new().with_test_user("good-token", "user-7"));

    let response = app
        .oneshot(request(
            "/my-listings",
            Some("burrow-access-token=good-token"),
        ))
        .await
        .unwrap();

    assert!(response.headers().get(header::SET_COOKIE).is_none());
}
