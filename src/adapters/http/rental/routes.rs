//! HTTP routes for rental endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    approve_request, cancel_request, complete_request, create_request, decline_request,
    list_requests, my_rentals, RentalHandlers,
};

/// Creates the rental router with all endpoints.
pub fn rental_routes(handlers: RentalHandlers) -> Router {
    Router::new()
        .route("/requests", get(list_requests))
        .route("/requests", post(create_request))
        .route("/requests/:id/approve", post(approve_request))
        .route("/requests/:id/decline", post(decline_request))
        .route("/requests/:id/cancel", post(cancel_request))
        .route("/requests/:id/complete", post(complete_request))
        .route("/my-rentals", get(my_rentals))
        .with_state(handlers)
}
