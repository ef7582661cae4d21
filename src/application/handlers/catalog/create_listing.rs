//! CreateListingHandler - list an item for rent.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::catalog::{CatalogError, Item, ItemCondition, ItemDraft};
use crate::domain::foundation::{CategoryId, UserId};
use crate::ports::ItemRepository;

/// Command to create a listing.
#[derive(Debug, Clone)]
pub struct CreateListingCommand {
    pub owner_id: UserId,
    pub category_id: Option<CategoryId>,
    pub title: String,
    pub description: Option<String>,
    pub price_per_day: f64,
    pub location: String,
    pub condition: ItemCondition,
    pub image_url: Option<String>,
}

/// Handler for creating listings.
pub struct CreateListingHandler {
    items: Arc<dyn ItemRepository>,
}

impl CreateListingHandler {
    pub fn new(items: Arc<dyn ItemRepository>) -> Self {
        Self { items }
    }

    pub async fn handle(&self, cmd: CreateListingCommand) -> Result<Item, CatalogError> {
        let item = Item::create(
            ItemDraft {
                owner_id: cmd.owner_id,
                category_id: cmd.category_id,
                title: cmd.title,
                description: cmd.description,
                price_per_day: cmd.price_per_day,
                location: cmd.location,
                condition: cmd.condition,
                image_url: cmd.image_url,
            },
            Utc::now(),
        )?;

        self.items.insert(&item).await?;
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ItemId;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockItemRepository {
        inserted: Mutex<Vec<Item>>,
    }

    #[async_trait]
    impl ItemRepository for MockItemRepository {
        async fn get_by_id(&self, _id: &ItemId) -> Result<Option<Item>, CatalogError> {
            Ok(None)
        }

        async fn insert(&self, item: &Item) -> Result<(), CatalogError> {
            self.inserted.lock().unwrap().push(item.clone());
            Ok(())
        }

        async fn update(&self, _item: &Item) -> Result<(), CatalogError> {
            Ok(())
        }
    }

    fn command() -> CreateListingCommand {
        CreateListingCommand {
            owner_id: UserId::new("owner-1").unwrap(),
            category_id: None,
            title: "Inflatable Dinosaur Costume".to_string(),
            description: None,
            price_per_day: 6.0,
            location: "East Quad".to_string(),
            condition: ItemCondition::LikeNew,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn creates_and_persists_listing() {
        let repo = Arc::new(MockItemRepository::default());
        let handler = CreateListingHandler::new(repo.clone());

        let item = handler.handle(command()).await.unwrap();

        assert!(item.is_available);
        let inserted = repo.inserted.lock().unwrap();
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].id, item.id);
    }

    #[tokio::test]
    async fn invalid_draft_is_rejected_before_persistence() {
        let repo = Arc::new(MockItemRepository::default());
        let handler = CreateListingHandler::new(repo.clone());

        let mut cmd = command();
        cmd.price_per_day = 0.0;
        assert!(handler.handle(cmd).await.is_err());
        assert!(repo.inserted.lock().unwrap().is_empty());
    }
}
