//! BrowseItemsHandler - the home page query.
//!
//! Fetches available items (optionally filtered), the category list, and
//! raw rating rows, then folds the ratings into per-item summaries in
//! memory.

use std::sync::Arc;

use crate::domain::catalog::{rating_summaries, CatalogError, Category, RatingSummary};
use crate::ports::{BrowseFilter, CategoryReader, ItemReader, ItemWithCategory, ReviewReader};

/// Query for the browse view.
#[derive(Debug, Clone, Default)]
pub struct BrowseItemsQuery {
    pub category_slug: Option<String>,
    pub search: Option<String>,
}

impl BrowseItemsQuery {
    fn to_filter(&self) -> BrowseFilter {
        BrowseFilter {
            category_slug: self.category_slug.clone(),
            search: self.search.clone(),
        }
    }
}

/// One browse card: item, category, and rating summary if reviewed.
#[derive(Debug, Clone)]
pub struct BrowseItem {
    pub listing: ItemWithCategory,
    pub rating: Option<RatingSummary>,
}

/// The assembled browse view.
#[derive(Debug, Clone)]
pub struct BrowsePage {
    pub items: Vec<BrowseItem>,
    pub categories: Vec<Category>,
}

/// Handler for the browse view.
pub struct BrowseItemsHandler {
    items: Arc<dyn ItemReader>,
    categories: Arc<dyn CategoryReader>,
    reviews: Arc<dyn ReviewReader>,
}

impl BrowseItemsHandler {
    pub fn new(
        items: Arc<dyn ItemReader>,
        categories: Arc<dyn CategoryReader>,
        reviews: Arc<dyn ReviewReader>,
    ) -> Self {
        Self {
            items,
            categories,
            reviews,
        }
    }

    pub async fn handle(&self, query: BrowseItemsQuery) -> Result<BrowsePage, CatalogError> {
        let listings = self.items.browse(&query.to_filter()).await?;
        let categories = self.categories.list_all().await?;

        let item_ids: Vec<_> = listings.iter().map(|l| l.item.id).collect();
        let rating_rows = self.reviews.ratings_for_items(&item_ids).await?;
        let mut summaries = rating_summaries(&rating_rows);

        let items = listings
            .into_iter()
            .map(|listing| {
                let rating = summaries.remove(&listing.item.id);
                BrowseItem { listing, rating }
            })
            .collect();

        Ok(BrowsePage { items, categories })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Item, ItemCondition, ItemDraft, Rating};
    use crate::domain::foundation::{ItemId, UserId};
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
            filter: &BrowseFilter,
        ) -> Result<Vec<ItemWithCategory>, CatalogError> {
            let listings = self
                .listings
                .iter()
                .filter(|l| match &filter.search {
                    Some(term) => l
                        .item
                        .title
                        .to_lowercase()
                        .contains(&term.to_lowercase()),
                    None => true,
                })
                .cloned()
                .collect();
            Ok(listings)
        }

        async fn list_by_owner(
            &self,
            _owner_id: &UserId,
        ) -> Result<Vec<ItemWithCategory>, CatalogError> {
            Ok(vec![])
        }
    }

    struct MockCategoryReader;

    #[async_trait]
    impl CategoryReader for MockCategoryReader {
        async fn list_all(&self) -> Result<Vec<Category>, CatalogError> {
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
            item_ids: &[ItemId],
        ) -> Result<Vec<(ItemId, Rating)>, CatalogError> {
            Ok(self
                .rows
                .iter()
                .filter(|(id, _)| item_ids.contains(id))
                .cloned()
                .collect())
        }

        async fn list_for_item(
            &self,
            _item_id: &ItemId,
        ) -> Result<Vec<crate::ports::ReviewView>, CatalogError> {
            Ok(vec![])
        }
    }

    fn listing(title: &str) -> ItemWithCategory {
        let item = Item::create(
            ItemDraft {
                owner_id: UserId::new("owner-1").unwrap(),
                category_id: None,
                title: title.to_string(),
                description: None,
                price_per_day: 2.0,
                location: "Campus".to_string(),
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

    fn handler(
        listings: Vec<ItemWithCategory>,
        rows: Vec<(ItemId, Rating)>,
    ) -> BrowseItemsHandler {
        BrowseItemsHandler::new(
            Arc::new(MockItemReader { listings }),
            Arc::new(MockCategoryReader),
            Arc::new(MockReviewReader { rows }),
        )
    }

    #[tokio::test]
    async fn enriches_items_with_rating_summaries() {
        let reviewed = listing("Projector");
        let reviewed_id = reviewed.item.id;
        let rows = vec![
            (reviewed_id, Rating::new(4).unwrap()),
            (reviewed_id, Rating::new(5).unwrap()),
            (reviewed_id, Rating::new(3).unwrap()),
        ];

        let page = handler(vec![reviewed], rows)
            .handle(BrowseItemsQuery::default())
            .await
            .unwrap();

        let rating = page.items[0].rating.unwrap();
        assert_eq!(rating.average, 4.0);
        assert_eq!(rating.count, 3);
    }

    #[tokio::test]
    async fn unreviewed_item_has_no_rating() {
        let page = handler(vec![listing("Tent")], vec![])
            .handle(BrowseItemsQuery::default())
            .await
            .unwrap();

        assert_eq!(page.items.len(), 1);
        assert!(page.items[0].rating.is_none());
    }

    #[tokio::test]
    async fn search_filters_items() {
        let query = BrowseItemsQuery {
            search: Some("calc".to_string()),
            ..Default::default()
        };
        let page = handler(vec![listing("TI-84 Calculator"), listing("Tent")], vec![])
            .handle(query)
            .await
            .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].listing.item.title, "TI-84 Calculator");
    }

    #[tokio::test]
    async fn empty_catalog_yields_empty_page() {
        let page = handler(vec![], vec![])
            .handle(BrowseItemsQuery::default())
            .await
            .unwrap();
        assert!(page.items.is_empty());
    }
}
