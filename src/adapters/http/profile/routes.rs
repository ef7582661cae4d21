//! HTTP routes for profile endpoints.

use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers::{get_profile, update_profile, ProfileHandlers};

/// Creates the profile router.
pub fn profile_routes(handlers: ProfileHandlers) -> Router {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/profile", patch(update_profile))
        .with_state(handlers)
}
