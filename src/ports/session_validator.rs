//! Session validation port.
//!
//! The middleware talks to the identity service only through this trait,
//! so tests and local development can swap in a mock without touching the
//! request pipeline.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, SessionTokens};

/// Validates and refreshes sessions issued by the identity service.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate an access token and return the user it belongs to.
    ///
    /// Returns `AuthError::TokenExpired` for expired-but-otherwise-valid
    /// tokens so the caller can attempt a refresh.
    async fn validate(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError>;

    /// Exchange a refresh token for a new token pair.
    async fn refresh(&self, refresh_token: &str) -> Result<SessionTokens, AuthError>;
}
