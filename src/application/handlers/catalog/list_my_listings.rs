//! ListMyListingsHandler - the owner's listings with pending-request badges.

use std::sync::Arc;

use crate::domain::catalog::CatalogError;
use crate::domain::foundation::UserId;
use crate::domain::rental::pending_counts;
use crate::ports::{ItemReader, ItemWithCategory, RentalRequestReader};

/// One row of the my-listings view.
#[derive(Debug, Clone)]
pub struct ListingOverview {
    pub listing: ItemWithCategory,
    /// Number of requests for this item with status exactly `pending`.
    pub pending_requests: u32,
}

/// Handler for the my-listings view.
pub struct ListMyListingsHandler {
    items: Arc<dyn ItemReader>,
    requests: Arc<dyn RentalRequestReader>,
}

impl ListMyListingsHandler {
    pub fn new(items: Arc<dyn ItemReader>, requests: Arc<dyn RentalRequestReader>) -> Self {
        Self { items, requests }
    }

    pub async fn handle(&self, owner_id: &UserId) -> Result<Vec<ListingOverview>, CatalogError> {
        let listings = self.items.list_by_owner(owner_id).await?;

        let item_ids: Vec<_> = listings.iter().map(|l| l.item.id).collect();
        let pending_rows = self
            .requests
            .pending_item_ids(&item_ids)
            .await
            .map_err(|e| CatalogError::infrastructure(e.to_string()))?;
        let counts = pending_counts(&pending_rows);

        Ok(listings
            .into_iter()
            .map(|listing| {
                let pending_requests = counts.get(&listing.item.id).copied().unwrap_or(0);
                ListingOverview {
                    listing,
                    pending_requests,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Item, ItemCondition, ItemDraft};
    use crate::domain::foundation::ItemId;
    use crate::domain::rental::RentalError;
    use crate::ports::{BorrowedRequest, BrowseFilter, LendingRequest};
    use async_trait::async_trait;
    use chrono::Utc;

    struct MockItemReader {
        listings: Vec<ItemWithCategory>,
    }

    #[async_trait]
    impl ItemReader for MockItemReader {
        async fn get_by_id(
            &self,
            _id: &ItemId,
        ) -> Result<Option<ItemWithCategory>, CatalogError> {
            Ok(None)
        }

        async fn browse(
            &self,
            _filter: &BrowseFilter,
        ) -> Result<Vec<ItemWithCategory>, CatalogError> {
            Ok(vec![])
        }

        async fn list_by_owner(
            &self,
            _owner_id: &UserId,
        ) -> Result<Vec<ItemWithCategory>, CatalogError> {
            Ok(self.listings.clone())
        }
    }

    struct MockRequestReader {
        pending: Vec<ItemId>,
    }

    #[async_trait]
    impl RentalRequestReader for MockRequestReader {
        async fn list_by_borrower(
            &self,
            _borrower_id: &UserId,
        ) -> Result<Vec<BorrowedRequest>, RentalError> {
            Ok(vec![])
        }

        async fn list_by_owner(
            &self,
            _owner_id: &UserId,
        ) -> Result<Vec<LendingRequest>, RentalError> {
            Ok(vec![])
        }

        async fn pending_item_ids(&self, item_ids: &[ItemId]) -> Result<Vec<ItemId>, RentalError> {
            Ok(self
                .pending
                .iter()
                .filter(|id| item_ids.contains(id))
                .copied()
                .collect())
        }
    }

    fn listing(title: &str) -> ItemWithCategory {
        let item = Item::create(
            ItemDraft {
                owner_id: UserId::new("owner-1").unwrap(),
                category_id: None,
                title: title.to_string(),
                description: None,
                price_per_day: 4.0,
                location: "Dorm 3".to_string(),
                condition: ItemCondition::Good,
                image_url: None,
            },
            Utc::now(),
        )
        .unwrap();
        ItemWithCategory {
            item,
            category: None,
        }
    }

    #[tokio::test]
    async fn counts_pending_requests_per_item() {
        let busy = listing("Fog Machine");
        let quiet = listing("Extension Cord");
        let busy_id = busy.item.id;
        let quiet_id = quiet.item.id;

        let handler = ListMyListingsHandler::new(
            Arc::new(MockItemReader {
                listings: vec![busy, quiet],
            }),
            Arc::new(MockRequestReader {
                pending: vec![busy_id, busy_id],
            }),
        );

        let rows = handler
            .handle(&UserId::new("owner-1").unwrap())
            .await
            .unwrap();

        let by_id = |id| rows.iter().find(|r| r.listing.item.id == id).unwrap();
        assert_eq!(by_id(busy_id).pending_requests, 2);
        assert_eq!(by_id(quiet_id).pending_requests, 0);
    }

    #[tokio::test]
    async fn no_listings_yields_empty_view() {
        let handler = ListMyListingsHandler::new(
            Arc::new(MockItemReader { listings: vec![] }),
            Arc::new(MockRequestReader { pending: vec![] }),
        );

        let rows = handler
            .handle(&UserId::new("owner-1").unwrap())
            .await
            .unwrap();
        assert!(rows.is_empty());
    }
}
