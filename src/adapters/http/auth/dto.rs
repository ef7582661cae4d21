//! HTTP DTOs for auth endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::AuthenticatedUser;

/// Request to sign in with email and password.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request to register a new account.
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpBody {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// The signed-in (or registered) user.
#[derive(Debug, Clone, Serialize)]
pub struct SessionUserResponse {
    pub user_id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl From<AuthenticatedUser> for SessionUserResponse {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            user_id: user.id.to_string(),
            email: user.email,
            display_name: user.display_name,
        }
    }
}

/// Returned from sign-up when email confirmation is still pending.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmationPendingResponse {
    pub message: String,
}
