//! Item repository port (write side).

use async_trait::async_trait;

use crate::domain::catalog::{CatalogError, Item};
use crate::domain::foundation::ItemId;

/// Persistence for the item aggregate.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Load an item for mutation. Returns `None` if not found.
    async fn get_by_id(&self, id: &ItemId) -> Result<Option<Item>, CatalogError>;

    /// Persist a newly created item.
    async fn insert(&self, item: &Item) -> Result<(), CatalogError>;

    /// Persist changes to an existing item.
    async fn update(&self, item: &Item) -> Result<(), CatalogError>;
}
