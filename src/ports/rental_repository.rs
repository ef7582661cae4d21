//! Rental request repository port (write side).

use async_trait::async_trait;

use crate::domain::foundation::RequestId;
use crate::domain::rental::{RentalError, RentalRequest};

/// Persistence for the rental request aggregate.
#[async_trait]
pub trait RentalRequestRepository: Send + Sync {
    /// Load a request for mutation. Returns `None` if not found.
    async fn get_by_id(&self, id: &RequestId) -> Result<Option<RentalRequest>, RentalError>;

    /// Persist a newly created request.
    async fn insert(&self, request: &RentalRequest) -> Result<(), RentalError>;

    /// Persist a status change (status and updated_at).
    async fn update_status(&self, request: &RentalRequest) -> Result<(), RentalError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rental_request_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn RentalRequestRepository) {}
    }
}
