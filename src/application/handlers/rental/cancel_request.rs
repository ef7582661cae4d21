//! CancelRequestHandler - the borrower withdraws a request.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::foundation::{RequestId, UserId};
use crate::domain::rental::{RentalError, RentalRequest};
use crate::ports::RentalRequestRepository;

/// Handler for borrower cancellations.
pub struct CancelRequestHandler {
    requests: Arc<dyn RentalRequestRepository>,
}

impl CancelRequestHandler {
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

        request.cancel(actor, Utc::now())?;
        self.requests.update_status(&request).await?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ItemId;
    use crate::domain::rental::{DateRange, RequestStatus};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    struct MockRequestRepository {
        request: Mutex<Option<RentalRequest>>,
    }

    #[async_trait]
    impl RentalRequestRepository for MockRequestRepository {
        async fn get_by_id(&self, _id: &RequestId) -> Result<Option<RentalRequest>, RentalError> {
            Ok(self.request.lock().unwrap().clone())
        }

        async fn insert(&self, _request: &RentalRequest) -> Result<(), RentalError> {
            Ok(())
        }

        async fn update_status(&self, request: &RentalRequest) -> Result<(), RentalError> {
            *self.request.lock().unwrap() = Some(request.clone());
            Ok(())
        }
    }

    fn borrower() -> UserId {
        UserId::new("borrower-1").unwrap()
    }

    fn pending_request() -> RentalRequest {
        RentalRequest::create(
            ItemId::new(),
            borrower(),
            UserId::new("owner-1").unwrap(),
            DateRange::new(
                NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 6, 4).unwrap(),
            )
            .unwrap(),
            None,
            Utc::now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn borrower_cancels_pending_request() {
        let request = pending_request();
        let repo = Arc::new(MockRequestRepository {
            request: Mutex::new(Some(request.clone())),
        });
        let handler = CancelRequestHandler::new(repo.clone());

        let updated = handler.handle(request.id, &borrower()).await.unwrap();
        assert_eq!(updated.status, RequestStatus::Cancelled);
    }

    #[tokio::test]
    async fn owner_cannot_cancel() {
        let request = pending_request();
        let repo = Arc::new(MockRequestRepository {
            request: Mutex::new(Some(request.clone())),
        });
        let handler = CancelRequestHandler::new(repo);

        let result = handler
            .handle(request.id, &UserId::new("owner-1").unwrap())
            .await;
        assert!(matches!(result, Err(RentalError::Forbidden)));
    }

    #[tokio::test]
    async fn completed_request_cannot_be_cancelled() {
        let mut request = pending_request();
        let owner = UserId::new("owner-1").unwrap();
        request.approve(&owner, Utc::now()).unwrap();
        request.complete(&owner, Utc::now()).unwrap();

        let repo = Arc::new(MockRequestRepository {
            request: Mutex::new(Some(request.clone())),
        });
        let handler = CancelRequestHandler::new(repo);

        let result = handler.handle(request.id, &borrower()).await;
        assert!(matches!(result, Err(RentalError::InvalidTransition { .. })));
    }
}
