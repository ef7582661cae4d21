//! UpdateProfileHandler - change the caller's display name.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::ports::{Profile, ProfileError, ProfileRepository};

/// Command to update the caller's profile.
#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub user_id: UserId,
    pub display_name: Option<String>,
}

/// Handler for profile updates.
pub struct UpdateProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
}

impl UpdateProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn handle(&self, cmd: UpdateProfileCommand) -> Result<Profile, ProfileError> {
        // Blank names are stored as absent, not as empty strings.
        let display_name = cmd
            .display_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let profile = Profile {
            user_id: cmd.user_id,
            display_name,
        };
        self.profiles.upsert(&profile).await?;
        Ok(profile)
    }
}
