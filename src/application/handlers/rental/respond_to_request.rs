//! RespondToRequestHandler - the owner approves or declines a pending request.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::foundation::{RequestId, UserId};
use crate::domain::rental::{RentalError, RentalRequest};
use crate::ports::RentalRequestRepository;

/// The owner's decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestResponse {
    Approve,
    Decline,
}

/// Handler for owner responses.
pub struct RespondToRequestHandler {
    requests: Arc<dyn RentalRequestRepository>,
}

impl RespondToRequestHandler {
    pub fn new(requests: Arc<dyn RentalRequestRepository>) -> Self {
        Self { requests }
    }

    pub async fn handle(
        &self,
        request_id: RequestId,
        actor: &UserId,
        response: RequestResponse,
    ) -> Result<RentalRequest, RentalError> {
        let mut request = self
            .requests
            .get_by_id(&request_id)
            .await?
            .ok_or(RentalError::RequestNotFound(request_id))?;

        let now = Utc::now();
        match response {
            RequestResponse::Approve => request.approve(actor, now)?,
            RequestResponse::Decline => request.decline(actor, now)?,
        }

        self.requests.update_status(&request).await?;
        Ok(request)
    }
}
