//! HTTP handlers for profile endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::profile::{
    GetProfileHandler, UpdateProfileCommand, UpdateProfileHandler,
};
use crate::ports::ProfileError;

use super::super::dto::ErrorResponse;
use super::super::middleware::RequireAuth;
use super::dto::{ProfileResponse, UpdateProfileRequest};

#[derive(Clone)]
pub struct ProfileHandlers {
    get_handler: Arc<GetProfileHandler>,
    update_handler: Arc<UpdateProfileHandler>,
}

impl ProfileHandlers {
    pub fn new(get_handler: Arc<GetProfileHandler>, update_handler: Arc<UpdateProfileHandler>) -> Self {
        Self {
            get_handler,
            update_handler,
        }
    }
}

/// GET /profile - The caller's profile
pub async fn get_profile(
    State(handlers): State<ProfileHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers.get_handler.handle(&user).await {
        Ok(view) => {
            let response: ProfileResponse = view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_profile_error(e),
    }
}

/// PATCH /profile - Update the caller's display name
pub async fn update_profile(
    State(handlers): State<ProfileHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<UpdateProfileRequest>,
) -> Response {
    let cmd = UpdateProfileCommand {
        user_id: user.id,
        display_name: req.display_name,
    };

    match handlers.update_handler.handle(cmd).await {
        Ok(profile) => {
            let response = ProfileResponse {
                user_id: profile.user_id.to_string(),
                email: user.email,
                display_name: profile.display_name,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_profile_error(e),
    }
}

fn handle_profile_error(error: ProfileError) -> Response {
    match error {
        ProfileError::Infrastructure(msg) => {
            tracing::error!("Profile infrastructure error: {}", msg);
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

    #[test]
    fn infrastructure_maps_to_500() {
        let response = handle_profile_error(ProfileError::Infrastructure("boom".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
