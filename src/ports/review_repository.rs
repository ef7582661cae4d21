//! Review repository port (write side).

use async_trait::async_trait;

use crate::domain::catalog::{CatalogError, Review};

/// Persistence for reviews.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Persist a new review.
    async fn insert(&self, review: &Review) -> Result<(), CatalogError>;
}
