//! ListRequestsHandler - borrowing and lending views.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::rental::RentalError;
use crate::ports::{BorrowedRequest, LendingRequest, RentalRequestReader};

/// Both tabs of the requests page.
#[derive(Debug, Clone)]
pub struct RequestsOverview {
    pub borrowing: Vec<BorrowedRequest>,
    pub lending: Vec<LendingRequest>,
}

/// Handler for request list views.
pub struct ListRequestsHandler {
    requests: Arc<dyn RentalRequestReader>,
}

impl ListRequestsHandler {
    pub fn new(requests: Arc<dyn RentalRequestReader>) -> Self {
        Self { requests }
    }

    /// The requests page: both directions at once.
    pub async fn overview(&self, user_id: &UserId) -> Result<RequestsOverview, RentalError> {
        let borrowing = self.requests.list_by_borrower(user_id).await?;
        let lending = self.requests.list_by_owner(user_id).await?;
        Ok(RequestsOverview { borrowing, lending })
    }

    /// The my-rentals page: outgoing requests only.
    pub async fn borrowing(&self, user_id: &UserId) -> Result<Vec<BorrowedRequest>, RentalError> {
        self.requests.list_by_borrower(user_id).await
    }
}
