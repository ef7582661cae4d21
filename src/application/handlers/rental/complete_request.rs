//! CompleteRequestHandler - the owner closes out an approved rental.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::foundation::{RequestId, UserId};
use crate::domain::rental::{RentalError, RentalRequest};
use crate::ports::RentalRequestRepository;

/// Handler for marking rentals completed.
pub struct CompleteRequestHandler {
    requests: Arc<dyn RentalRequestRepository>,
}

impl CompleteRequestHandler {
    pub fn new(requests: Arc<dyn RentalRequestRepository>) -> Self {
        Self { requests }
    }

    pub async fn handle(
        &self,
        request_id: RequestId,
        actor: &UserId,
    ) -> Result<RentalRequest, RentalError> {
        let mut request = self
            .requests
            .get_by_id(&request_id)
            .await?
            .ok_or(RentalError::RequestNotFound(request_id))?;

        request.complete(actor, Utc::now())?;
        self.requests.update_status(&request).await?;
        Ok(request)
    }
}
