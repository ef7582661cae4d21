//! Rental request reader port (read side).

use async_trait::async_trait;

use crate::domain::foundation::{ItemId, UserId};
use crate::domain::rental::{RentalError, RentalRequest};

/// The slice of an item shown on a request card.
#[derive(Debug, Clone)]
pub struct ItemSummary {
    pub id: ItemId,
    pub title: String,
    pub price_per_day: f64,
    pub location: String,
    pub image_url: Option<String>,
}

/// A request the user sent, joined with the item it targets.
///
/// The item is optional: a listing can be deleted out from under its
/// requests, and the card still renders.
#[derive(Debug, Clone)]
pub struct BorrowedRequest {
    pub request: RentalRequest,
    pub item: Option<ItemSummary>,
}

/// An incoming request on one of the user's items, joined with the
/// borrower's display name for attribution.
#[derive(Debug, Clone)]
pub struct LendingRequest {
    pub request: RentalRequest,
    pub item: Option<ItemSummary>,
    pub borrower_name: Option<String>,
}

/// Read-optimized rental request queries.
#[async_trait]
pub trait RentalRequestReader: Send + Sync {
    /// Requests where the user is the borrower, newest-first.
    async fn list_by_borrower(
        &self,
        borrower_id: &UserId,
    ) -> Result<Vec<BorrowedRequest>, RentalError>;

    /// Requests where the user is the owner, newest-first.
    async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<LendingRequest>, RentalError>;

    /// One item-id row per *pending* request against the given items, for
    /// in-memory grouping into per-item counts.
    async fn pending_item_ids(&self, item_ids: &[ItemId]) -> Result<Vec<ItemId>, RentalError>;
}
