//! HTTP handlers for catalog endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::catalog::{
    AddReviewCommand, AddReviewHandler, BrowseItemsHandler, BrowseItemsQuery,
    CreateListingCommand, CreateListingHandler, GetItemHandler, ListMyListingsHandler,
    UpdateListingCommand, UpdateListingHandler,
};
use crate::domain::catalog::{CatalogError, ItemCondition, ItemUpdate};
use crate::domain::foundation::{CategoryId, ItemId};

use super::super::dto::ErrorResponse;
use super::super::middleware::{OptionalAuth, RequireAuth};
use super::dto::{
    AddReviewRequest, BrowsePageResponse, BrowseQuery, CreateListingRequest, ItemCardResponse,
    ItemDetailResponse, ListingOverviewResponse, ReviewResponse, UpdateListingRequest,
    ViewerResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct CatalogHandlers {
    browse_handler: Arc<BrowseItemsHandler>,
    get_item_handler: Arc<GetItemHandler>,
    my_listings_handler: Arc<ListMyListingsHandler>,
    create_handler: Arc<CreateListingHandler>,
    update_handler: Arc<UpdateListingHandler>,
    add_review_handler: Arc<AddReviewHandler>,
}

impl CatalogHandlers {
    pub fn new(
        browse_handler: Arc<BrowseItemsHandler>,
        get_item_handler: Arc<GetItemHandler>,
        my_listings_handler: Arc<ListMyListingsHandler>,
        create_handler: Arc<CreateListingHandler>,
        update_handler: Arc<UpdateListingHandler>,
        add_review_handler: Arc<AddReviewHandler>,
    ) -> Self {
        Self {
            browse_handler,
            get_item_handler,
            my_listings_handler,
            create_handler,
            update_handler,
            add_review_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET / - Browse available items
pub async fn browse_items(
    State(handlers): State<CatalogHandlers>,
    OptionalAuth(viewer): OptionalAuth,
    Query(params): Query<BrowseQuery>,
) -> Response {
    let query = BrowseItemsQuery {
        category_slug: params.category,
        search: params.search,
    };

    match handlers.browse_handler.handle(query).await {
        Ok(page) => {
            let mut response: BrowsePageResponse = page.into();
            response.viewer = viewer.map(|user| ViewerResponse {
                user_id: user.id.to_string(),
                email: user.email,
            });
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_catalog_error(e),
    }
}

/// GET /items/:id - Item detail
pub async fn get_item(
    State(handlers): State<CatalogHandlers>,
    Path(item_id): Path<String>,
) -> Response {
    let item_id = match item_id.parse::<ItemId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid item ID")),
            )
                .into_response()
        }
    };

    match handlers.get_item_handler.handle(item_id).await {
        Ok(detail) => {
            let response: ItemDetailResponse = detail.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_catalog_error(e),
    }
}

/// GET /my-listings - The caller's listings with pending-request counts
pub async fn my_listings(
    State(handlers): State<CatalogHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers.my_listings_handler.handle(&user.id).await {
        Ok(rows) => {
            let response: Vec<ListingOverviewResponse> =
                rows.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_catalog_error(e),
    }
}

/// POST /list-item - Create a listing
pub async fn create_listing(
    State(handlers): State<CatalogHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateListingRequest>,
) -> Response {
    let condition = match req.condition.parse::<ItemCondition>() {
        Ok(condition) => condition,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    let category_id = match parse_category_id(req.category_id.as_deref()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = CreateListingCommand {
        owner_id: user.id,
        category_id,
        title: req.title,
        description: req.description,
        price_per_day: req.price_per_day,
        location: req.location,
        condition,
        image_url: req.image_url,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(item) => {
            let response = ItemCardResponse::from_listing(
                crate::ports::ItemWithCategory {
                    item,
                    category: None,
                },
                None,
            );
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_catalog_error(e),
    }
}

/// PATCH /items/:id - Update a listing (owner only)
pub async fn update_listing(
    State(handlers): State<CatalogHandlers>,
    RequireAuth(user): RequireAuth,
    Path(item_id): Path<String>,
    Json(req): Json<UpdateListingRequest>,
) -> Response {
    let item_id = match item_id.parse::<ItemId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid item ID")),
            )
                .into_response()
        }
    };

    let condition = match req
        .condition
        .as_deref()
        .map(str::parse::<ItemCondition>)
        .transpose()
    {
        Ok(condition) => condition,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    let category_id = match req.category_id {
        None => None,
        Some(None) => Some(None),
        Some(Some(ref raw)) => match parse_category_id(Some(raw.as_str())) {
            Ok(id) => Some(id),
            Err(response) => return response,
        },
    };

    let update = ItemUpdate {
        category_id,
        title: req.title,
        description: req.description,
        price_per_day: req.price_per_day,
        location: req.location,
        condition,
        is_available: req.is_available,
        image_url: req.image_url,
    };

    if update.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("No fields to update")),
        )
            .into_response();
    }

    let cmd = UpdateListingCommand {
        item_id,
        actor: user.id,
        update,
    };

    match handlers.update_handler.handle(cmd).await {
        Ok(item) => {
            let response = ItemCardResponse::from_listing(
                crate::ports::ItemWithCategory {
                    item,
                    category: None,
                },
                None,
            );
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_catalog_error(e),
    }
}

/// POST /items/:id/reviews - Add a review
pub async fn add_review(
    State(handlers): State<CatalogHandlers>,
    RequireAuth(user): RequireAuth,
    Path(item_id): Path<String>,
    Json(req): Json<AddReviewRequest>,
) -> Response {
    let item_id = match item_id.parse::<ItemId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid item ID")),
            )
                .into_response()
        }
    };

    let cmd = AddReviewCommand {
        item_id,
        reviewer_id: user.id,
        rating: req.rating,
        comment: req.comment,
    };

    match handlers.add_review_handler.handle(cmd).await {
        Ok(review) => {
            let response = ReviewResponse {
                id: review.id.to_string(),
                reviewer_name: user.display_name,
                rating: review.rating.value(),
                comment: review.comment,
                created_at: review.created_at.to_rfc3339(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_catalog_error(e),
    }
}

fn parse_category_id(raw: Option<&str>) -> Result<Option<CategoryId>, Response> {
    match raw {
        None => Ok(None),
        Some(raw) => raw.parse::<CategoryId>().map(Some).map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid category ID")),
            )
                .into_response()
        }),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_catalog_error(error: CatalogError) -> Response {
    match error {
        CatalogError::ItemNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Item", &id.to_string())),
        )
            .into_response(),
        CatalogError::Forbidden => (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::forbidden("Permission denied")),
        )
            .into_response(),
        CatalogError::Validation(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(e.to_string())),
        )
            .into_response(),
        CatalogError::Infrastructure(msg) => {
            tracing::error!("Catalog infrastructure error: {}", msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Storage error")),
            )
                .into_response()
        }
    }
}
