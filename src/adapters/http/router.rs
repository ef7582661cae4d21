//! Top-level router assembly.

use axum::{middleware as axum_middleware, response::IntoResponse, routing::get, Json, Router};

use super::auth::{auth_routes, AuthHandlers};
use super::catalog::{catalog_routes, CatalogHandlers};
use super::middleware::{session_middleware, SessionContext};
use super::profile::{profile_routes, ProfileHandlers};
use super::rental::{rental_routes, RentalHandlers};

/// Assembles the full application router.
///
/// Every route, including the public ones, sits behind the session
/// middleware: public paths pass through anonymously, protected prefixes
/// enforce the redirect policy.
pub fn app_router(
    catalog: CatalogHandlers,
    rental: RentalHandlers,
    profile: ProfileHandlers,
    auth: AuthHandlers,
    session: SessionContext,
) -> Router {
    Router::new()
        .merge(catalog_routes(catalog))
        .merge(rental_routes(rental))
        .merge(profile_routes(profile))
        .merge(auth_routes(auth))
        .route("/health", get(health_check))
        .layer(axum_middleware::from_fn_with_state(
            session,
            session_middleware,
        ))
}

/// GET /health - liveness probe
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
