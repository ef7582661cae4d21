//! Category reader port.

use async_trait::async_trait;

use crate::domain::catalog::{CatalogError, Category};

/// Read access to the static category table.
#[async_trait]
pub trait CategoryReader: Send + Sync {
    /// All categories ordered by name.
    async fn list_all(&self) -> Result<Vec<Category>, CatalogError>;
}
