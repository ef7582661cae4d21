//! Profile ports.
//!
//! Profiles mirror identity-service users into the application database so
//! display names can be joined onto request lists.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

/// A user's public profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    pub display_name: Option<String>,
}

/// Errors raised by profile storage.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProfileError {
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

/// Read access to profiles.
#[async_trait]
pub trait ProfileReader: Send + Sync {
    /// Get one user's profile. Returns `None` if none is stored.
    async fn get(&self, user_id: &UserId) -> Result<Option<Profile>, ProfileError>;
}

/// Write access to profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Create or update the profile row for a user.
    async fn upsert(&self, profile: &Profile) -> Result<(), ProfileError>;
}
