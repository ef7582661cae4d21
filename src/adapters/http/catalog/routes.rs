//! HTTP routes for catalog endpoints.

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::handlers::{
    add_review, browse_items, create_listing, get_item, my_listings, update_listing,
    CatalogHandlers,
};

/// Creates the catalog router with all endpoints.
pub fn catalog_routes(handlers: CatalogHandlers) -> Router {
    Router::new()
        .route("/", get(browse_items))
        .route("/items/:id", get(get_item))
        .route("/items/:id", patch(update_listing))
        .route("/items/:id/reviews", post(add_review))
        .route("/my-listings", get(my_listings))
        .route("/list-item", post(create_listing))
        .with_state(handlers)
}
