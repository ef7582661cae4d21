//! Mock session validator for testing.
//!
//! Implements the `SessionValidator` port against an in-memory token map,
//! avoiding the need for a live identity service in tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, SessionTokens, UserId};
use crate::ports::SessionValidator;

/// Mock session validator.
///
/// Access tokens map to users; refresh tokens map to new token pairs.
/// Unknown access tokens return `InvalidToken`, unknown refresh tokens
/// return `TokenExpired`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    refreshes: RwLock<HashMap<String, SessionTokens>>,
    expired: RwLock<Vec<String>>,
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    /// Creates a new empty mock validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid access token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens.write().unwrap().insert(token.into(), user);
        self
    }

    /// Adds a valid access token with a simple test user.
    pub fn with_test_user(self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        let user = AuthenticatedUser::new(
            UserId::new(&user_id).unwrap(),
            format!("{}@test.example.edu", user_id),
            Some(format!("Test User {}", user_id)),
        );
        self.with_user(token, user)
    }

    /// Marks an access token as expired (validate returns `TokenExpired`).
    pub fn with_expired_token(self, token: impl Into<String>) -> Self {
        self.expired.write().unwrap().push(token.into());
        self
    }

    /// Adds a refresh token that exchanges for the given token pair.
    pub fn with_refresh(self, refresh_token: impl Into<String>, tokens: SessionTokens) -> Self {
        self.refreshes
            .write()
            .unwrap()
            .insert(refresh_token.into(), tokens);
        self
    }

    /// Forces all calls to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }
        if self.expired.read().unwrap().iter().any(|t| t == access_token) {
            return Err(AuthError::TokenExpired);
        }
        self.tokens
            .read()
            .unwrap()
            .get(access_token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<SessionTokens, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }
        self.refreshes
            .read()
            .unwrap()
            .get(refresh_token)
            .cloned()
            .ok_or(AuthError::TokenExpired)
    }
}
