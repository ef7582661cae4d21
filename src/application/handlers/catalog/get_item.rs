//! GetItemHandler - the item detail query.

use std::sync::Arc;

use crate::domain::catalog::{rating_summaries, CatalogError, RatingSummary};
use crate::domain::foundation::ItemId;
use crate::ports::{ItemReader, ItemWithCategory, ProfileReader, ReviewReader, ReviewView};

/// The assembled item detail view.
#[derive(Debug, Clone)]
pub struct ItemDetail {
    pub listing: ItemWithCategory,
    pub rating: Option<RatingSummary>,
    pub owner_name: Option<String>,
    pub reviews: Vec<ReviewView>,
}

/// Handler for the item detail view.
pub struct GetItemHandler {
    items: Arc<dyn ItemReader>,
    reviews: Arc<dyn ReviewReader>,
    profiles: Arc<dyn ProfileReader>,
}

impl GetItemHandler {
    pub fn new(
        items: Arc<dyn ItemReader>,
        reviews: Arc<dyn ReviewReader>,
        profiles: Arc<dyn ProfileReader>,
    ) -> Self {
        Self {
            items,
            reviews,
            profiles,
        }
    }

    pub async fn handle(&self, item_id: ItemId) -> Result<ItemDetail, CatalogError> {
        let listing = self
            .items
            .get_by_id(&item_id)
            .await?
            .ok_or(CatalogError::ItemNotFound(item_id))?;

        let rating_rows = self.reviews.ratings_for_items(&[item_id]).await?;
        let rating = rating_summaries(&rating_rows).remove(&item_id);
        let reviews = self.reviews.list_for_item(&item_id).await?;

        let owner_name = self
            .profiles
            .get(&listing.item.owner_id)
            .await
            .map_err(|e| CatalogError::infrastructure(e.to_string()))?
            .and_then(|p| p.display_name);

        Ok(ItemDetail {
            listing,
            rating,
            owner_name,
            reviews,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Item, ItemCondition, ItemDraft, Rating};
    use crate::domain::foundation::UserId;
    use crate::ports::{BrowseFilter, Profile, ProfileError};
    use async_trait::async_trait;
    use chrono::Utc;

    struct MockItemReader {
        listing: Option<ItemWithCategory>,
    }

    #[async_trait]
    impl ItemReader for MockItemReader {
        async fn get_by_id(
            &self,
            _id: &ItemId,
        ) -> Result<Option<ItemWithCategory>, CatalogError> {
            Ok(self.listing.clone())
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
            Ok(vec![])
        }
    }

    struct MockReviewReader {
        rows: Vec<(ItemId, Rating)>,
    }

    #[async_trait]
    impl ReviewReader for MockReviewReader {
        async fn ratings_for_items(
            &self,
            _item_ids: &[ItemId],
        ) -> Result<Vec<(ItemId, Rating)>, CatalogError> {
            Ok(self.rows.clone())
        }

        async fn list_for_item(&self, _item_id: &ItemId) -> Result<Vec<ReviewView>, CatalogError> {
            Ok(vec![])
        }
    }

    struct MockProfileReader {
        name: Option<String>,
    }

    #[async_trait]
    impl ProfileReader for MockProfileReader {
        async fn get(&self, user_id: &UserId) -> Result<Option<Profile>, ProfileError> {
            Ok(Some(Profile {
                user_id: user_id.clone(),
                display_name: self.name.clone(),
            }))
        }
    }

    fn listing() -> ItemWithCategory {
        let item = Item::create(
            ItemDraft {
                owner_id: UserId::new("owner-1").unwrap(),
                category_id: None,
                title: "Karaoke Machine".to_string(),
                description: None,
                price_per_day: 8.0,
                location: "West Hall".to_string(),
                condition: ItemCondition::Fair,
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
    async fn assembles_detail_with_rating_and_owner() {
        let l = listing();
        let id = l.item.id;
        let handler = GetItemHandler::new(
            Arc::new(MockItemReader { listing: Some(l) }),
            Arc::new(MockReviewReader {
                rows: vec![(id, Rating::new(5).unwrap()), (id, Rating::new(3).unwrap())],
            }),
            Arc::new(MockProfileReader {
                name: Some("Dana".to_string()),
            }),
        );

        let detail = handler.handle(id).await.unwrap();
        assert_eq!(detail.rating.unwrap().average, 4.0);
        assert_eq!(detail.owner_name.as_deref(), Some("Dana"));
    }

    #[tokio::test]
    async fn missing_item_is_not_found() {
        let handler = GetItemHandler::new(
            Arc::new(MockItemReader { listing: None }),
            Arc::new(MockReviewReader { rows: vec![] }),
            Arc::new(MockProfileReader { name: None }),
        );

        let result = handler.handle(ItemId::new()).await;
        assert!(matches!(result, Err(CatalogError::ItemNotFound(_))));
    }

    #[tokio::test]
    async fn unreviewed_item_detail_has_no_rating() {
        let l = listing();
        let id = l.item.id;
        let handler = GetItemHandler::new(
            Arc::new(MockItemReader { listing: Some(l) }),
            Arc::new(MockReviewReader { rows: vec![] }),
            Arc::new(MockProfileReader { name: None }),
        );

        let detail = handler.handle(id).await.unwrap();
        assert!(detail.rating.is_none());
        assert!(detail.reviews.is_empty());
    }
}
