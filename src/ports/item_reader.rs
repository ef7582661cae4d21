//! Item reader port (read side).

use async_trait::async_trait;

use crate::domain::catalog::{CatalogError, Category, Item};
use crate::domain::foundation::{ItemId, UserId};

/// An item joined with its category, the shape every listing view wants.
#[derive(Debug, Clone)]
pub struct ItemWithCategory {
    pub item: Item,
    pub category: Option<Category>,
}

/// Filters for the browse view.
#[derive(Debug, Clone, Default)]
pub struct BrowseFilter {
    /// Restrict to one category by slug.
    pub category_slug: Option<String>,

    /// Case-insensitive substring match on the title.
    pub search: Option<String>,
}

impl BrowseFilter {
    /// Filter for a single category.
    pub fn for_category(slug: impl Into<String>) -> Self {
        Self {
            category_slug: Some(slug.into()),
            search: None,
        }
    }
}

/// Read-optimized item queries.
#[async_trait]
pub trait ItemReader: Send + Sync {
    /// Get one item with its category. Returns `None` if not found.
    async fn get_by_id(&self, id: &ItemId) -> Result<Option<ItemWithCategory>, CatalogError>;

    /// Available items newest-first, optionally filtered.
    async fn browse(&self, filter: &BrowseFilter) -> Result<Vec<ItemWithCategory>, CatalogError>;

    /// All of one owner's items newest-first, available or not.
    async fn list_by_owner(&self, owner_id: &UserId)
        -> Result<Vec<ItemWithCategory>, CatalogError>;
}
