//! HTTP handlers for rental endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::rental::{
    CancelRequestHandler, CompleteRequestHandler, CreateRequestCommand, CreateRequestHandler,
    ListRequestsHandler, RequestResponse, RespondToRequestHandler,
};
use crate::domain::foundation::{ItemId, RequestId};
use crate::domain::rental::RentalError;

use super::super::dto::ErrorResponse;
use super::super::middleware::RequireAuth;
use super::dto::{CreateRequestRequest, RequestCardResponse, RequestsOverviewResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct RentalHandlers {
    list_handler: Arc<ListRequestsHandler>,
    create_handler: Arc<CreateRequestHandler>,
    respond_handler: Arc<RespondToRequestHandler>,
    cancel_handler: Arc<CancelRequestHandler>,
    complete_handler: Arc<CompleteRequestHandler>,
}

impl RentalHandlers {
    pub fn new(
        list_handler: Arc<ListRequestsHandler>,
        create_handler: Arc<CreateRequestHandler>,
        respond_handler: Arc<RespondToRequestHandler>,
        cancel_handler: Arc<CancelRequestHandler>,
        complete_handler: Arc<CompleteRequestHandler>,
    ) -> Self {
        Self {
            list_handler,
            create_handler,
            respond_handler,
            cancel_handler,
            complete_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /requests - Borrowing and lending lists
pub async fn list_requests(
    State(handlers): State<RentalHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers.list_handler.overview(&user.id).await {
        Ok(overview) => {
            let response: RequestsOverviewResponse = overview.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_rental_error(e),
    }
}

/// GET /my-rentals - Outgoing (borrowing) requests only
pub async fn my_rentals(
    State(handlers): State<RentalHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers.list_handler.borrowing(&user.id).await {
        Ok(rows) => {
            let response: Vec<RequestCardResponse> = rows.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_rental_error(e),
    }
}

/// POST /requests - Submit a rental request
pub async fn create_request(
    State(handlers): State<RentalHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateRequestRequest>,
) -> Response {
    let item_id = match req.item_id.parse::<ItemId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid item ID")),
            )
                .into_response()
        }
    };

    let cmd = CreateRequestCommand {
        item_id,
        borrower_id: user.id,
        start_date: req.start_date,
        end_date: req.end_date,
        message: req.message,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(request) => {
            let response = RequestCardResponse::from(crate::ports::BorrowedRequest {
                request,
                item: None,
            });
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_rental_error(e),
    }
}

/// POST /requests/:id/approve - Owner approves a pending request
pub async fn approve_request(
    State(handlers): State<RentalHandlers>,
    RequireAuth(user): RequireAuth,
    Path(request_id): Path<String>,
) -> Response {
    respond(handlers, user, request_id, RequestResponse::Approve).await
}

/// POST /requests/:id/decline - Owner declines a pending request
pub async fn decline_request(
    State(handlers): State<RentalHandlers>,
    RequireAuth(user): RequireAuth,
    Path(request_id): Path<String>,
) -> Response {
    respond(handlers, user, request_id, RequestResponse::Decline).await
}

async fn respond(
    handlers: RentalHandlers,
    user: crate::domain::foundation::AuthenticatedUser,
    request_id: String,
    response: RequestResponse,
) -> Response {
    let request_id = match request_id.parse::<RequestId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid request ID")),
            )
                .into_response()
        }
    };

    match handlers
        .respond_handler
        .handle(request_id, &user.id, response)
        .await
    {
        Ok(request) => {
            let body = RequestCardResponse::from(crate::ports::BorrowedRequest {
                request,
                item: None,
            });
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handle_rental_error(e),
    }
}

/// POST /requests/:id/cancel - Borrower withdraws a request
pub async fn cancel_request(
    State(handlers): State<RentalHandlers>,
    RequireAuth(user): RequireAuth,
    Path(request_id): Path<String>,
) -> Response {
    let request_id = match request_id.parse::<RequestId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid request ID")),
            )
                .into_response()
        }
    };

    match handlers.cancel_handler.handle(request_id, &user.id).await {
        Ok(request) => {
            let body = RequestCardResponse::from(crate::ports::BorrowedRequest {
                request,
                item: None,
            });
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handle_rental_error(e),
    }
}

/// POST /requests/:id/complete - Owner closes out an approved rental
pub async fn complete_request(
    State(handlers): State<RentalHandlers>,
    RequireAuth(user): RequireAuth,
    Path(request_id): Path<String>,
) -> Response {
    let request_id = match request_id.parse::<RequestId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid request ID")),
            )
                .into_response()
        }
    };

    match handlers.complete_handler.handle(request_id, &user.id).await {
        Ok(request) => {
            let body = RequestCardResponse::from(crate::ports::BorrowedRequest {
                request,
                item: None,
            });
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handle_rental_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_rental_error(error: RentalError) -> Response {
    match error {
        RentalError::RequestNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Rental request", &id.to_string())),
        )
            .into_response(),
        RentalError::ItemNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Item", &id.to_string())),
        )
            .into_response(),
        RentalError::Forbidden => (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::forbidden("Permission denied")),
        )
            .into_response(),
        RentalError::InvalidTransition { from, to } => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::bad_request(format!(
                "Cannot move request from {} to {}",
                from, to
            ))),
        )
            .into_response(),
        RentalError::OwnItem => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Cannot request your own item")),
        )
            .into_response(),
        RentalError::ItemUnavailable => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::bad_request("Item is not available for rent")),
        )
            .into_response(),
        RentalError::Validation(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(e.to_string())),
        )
            .into_response(),
        RentalError::Infrastructure(msg) => {
            tracing::error!("Rental infrastructure error: {}", msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Storage error")),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rental::RequestStatus;

    #[test]
    fn request_not_found_maps_to_404() {
        let response = handle_rental_error(RentalError::RequestNotFound(RequestId::new()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn forbidden_maps_to_403() {
        let response = handle_rental_error(RentalError::Forbidden);
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn invalid_transition_maps_to_409() {
        let response = handle_rental_error(RentalError::InvalidTransition {
            from: RequestStatus::Approved,
            to: RequestStatus::Rejected,
        });
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn own_item_maps_to_400() {
        let response = handle_rental_error(RentalError::OwnItem);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unavailable_item_maps_to_409() {
        let response = handle_rental_error(RentalError::ItemUnavailable);
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
