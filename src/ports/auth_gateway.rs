//! Account operations against the identity service.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, SessionTokens};

/// Email/password credentials for sign-in.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Sign-up payload. Display name seeds the user's profile.
#[derive(Debug, Clone)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

/// A freshly established session: the tokens to set as cookies plus the
/// user they identify.
#[derive(Debug, Clone)]
pub struct SignedInSession {
    pub tokens: SessionTokens,
    pub user: AuthenticatedUser,
}

/// Sign-in/sign-up/sign-out against the identity service.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Password-grant sign in.
    async fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> Result<SignedInSession, AuthError>;

    /// Register a new account. Identity services configured for email
    /// confirmation may return no session until the address is verified.
    async fn sign_up(&self, request: &SignUpRequest)
        -> Result<Option<SignedInSession>, AuthError>;

    /// Revoke the session behind an access token.
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_gateway_is_object_safe() {
        fn _accepts_dyn(_gateway: &dyn AuthGateway) {}
    }
}
