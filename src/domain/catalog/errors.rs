//! Catalog error types.

use thiserror::Error;

use crate::domain::foundation::{ItemId, ValidationError};

/// Errors raised by catalog operations.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("Item {0} not found")]
    ItemNotFound(ItemId),

    #[error("Permission denied")]
    Forbidden,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl CatalogError {
    /// Wraps a storage-layer failure.
    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::Infrastructure(message.into())
    }
}
