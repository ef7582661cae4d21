//! Authentication types for the domain layer.
//!
//! These types represent an authenticated user extracted from a validated
//! session. They have no provider dependencies: any identity service can
//! populate them via the `SessionValidator` port.

use super::UserId;
use thiserror::Error;

/// Authenticated user extracted from a validated session.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the identity service.
    pub id: UserId,

    /// User's email address.
    pub email: String,

    /// Display name if the identity service knows one.
    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, email: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            id,
            email: email.into(),
            display_name,
        }
    }

    /// Returns the user's display name, or email as fallback.
    pub fn display_name_or_email(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

/// A session token pair issued by the identity service.
///
/// Produced on login and on refresh; the HTTP layer writes these back as
/// session cookies so the browser carries the extended session.
#[derive(Debug, Clone)]
pub struct SessionTokens {
    /// Short-lived access token presented on every request.
    pub access_token: String,

    /// Long-lived token used to mint a new access token once it expires.
    pub refresh_token: String,

    /// Access token lifetime in seconds, if the identity service reports it.
    pub expires_in: Option<u64>,
}

/// Authentication errors that can occur during session validation.
///
/// The distinction between `SessionMissing`/`InvalidToken` and
/// `ServiceUnavailable` matters: the former mean "no session, fail closed
/// for protected paths by redirecting to login", the latter means "we could
/// not find out", which also fails closed but as a service error rather
/// than a redirect.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// No session token was presented.
    #[error("No session")]
    SessionMissing,

    /// The token is malformed, revoked, or otherwise not accepted.
    #[error("Invalid token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken so the caller can
    /// attempt a refresh).
    #[error("Token expired")]
    TokenExpired,

    /// The identity service is unreachable or returned a server error.
    #[error("Identity service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The supplied credentials were rejected on login.
    #[error("Invalid credentials")]
    InvalidCredentials,
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error means the caller has no usable session.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            AuthError::SessionMissing | AuthError::InvalidToken | AuthError::TokenExpired
        )
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}
