//! GetProfileHandler - the profile page query.

use std::sync::Arc;

use crate::domain::foundation::AuthenticatedUser;
use crate::ports::{ProfileError, ProfileReader};

/// The profile page view: identity plus stored display name.
#[derive(Debug, Clone)]
pub struct ProfileView {
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// Handler for the profile view.
pub struct GetProfileHandler {
    profiles: Arc<dyn ProfileReader>,
}

impl GetProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileReader>) -> Self {
        Self { profiles }
    }

    pub async fn handle(&self, user: &AuthenticatedUser) -> Result<ProfileView, ProfileError> {
        let stored = self.profiles.get(&user.id).await?;

        // The stored profile wins over whatever the identity service has,
        // since users edit it here.
        let display_name = stored
            .and_then(|p| p.display_name)
            .or_else(|| user.display_name.clone());

        Ok(ProfileView {
            user_id: user.id.to_string(),
            email: user.email.clone(),
            display_name,
        })
    }
}
