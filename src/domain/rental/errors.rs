//! Rental error types.

use thiserror::Error;

use crate::domain::foundation::{ItemId, RequestId, ValidationError};

use super::RequestStatus;

/// Errors raised by rental request operations.
#[derive(Debug, Clone, Error)]
pub enum RentalError {
    #[error("Rental request {0} not found")]
    RequestNotFound(RequestId),

    #[error("Item {0} not found")]
    ItemNotFound(ItemId),

    #[error("Permission denied")]
    Forbidden,

    #[error("Cannot move request from {from} to {to}")]
    InvalidTransition {
        from: RequestStatus,
        to: RequestStatus,
    },

    #[error("Cannot request your own item")]
    OwnItem,

    #[error("Item is not available for rent")]
    ItemUnavailable,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl RentalError {
    /// Wraps a storage-layer failure.
    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::Infrastructure(message.into())
    }
}
