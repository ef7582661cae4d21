//! HTTP DTOs for profile endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::profile::ProfileView;

/// Request to update the caller's profile.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub display_name: Option<String>,
}

/// The profile page.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl From<ProfileView> for ProfileResponse {
    fn from(view: ProfileView) -> Self {
        Self {
            user_id: view.user_id,
            email: view.email,
            display_name: view.display_name,
        }
    }
}
