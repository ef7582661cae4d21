//! Review reader port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::catalog::{CatalogError, Rating};
use crate::domain::foundation::{ItemId, ReviewId};

/// A review joined with its reviewer's display name for the detail view.
#[derive(Debug, Clone)]
pub struct ReviewView {
    pub id: ReviewId,
    pub item_id: ItemId,
    pub reviewer_name: Option<String>,
    pub rating: Rating,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Read access to reviews.
#[async_trait]
pub trait ReviewReader: Send + Sync {
    /// Raw `(item_id, rating)` rows for the given items, for in-memory
    /// aggregation into per-item averages.
    async fn ratings_for_items(
        &self,
        item_ids: &[ItemId],
    ) -> Result<Vec<(ItemId, Rating)>, CatalogError>;

    /// One item's reviews newest-first.
    async fn list_for_item(&self, item_id: &ItemId) -> Result<Vec<ReviewView>, CatalogError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn ReviewReader) {}
    }
}
