//! The rental request aggregate.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ItemId, RequestId, UserId};

use super::{DateRange, RentalError, RequestStatus};

/// A borrower's time-boxed request to rent an item from its owner.
///
/// The owner id is denormalized from the item at creation so that
/// lending queries need no join, matching the stored shape of the
/// `rental_requests` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalRequest {
    pub id: RequestId,
    pub item_id: ItemId,
    pub borrower_id: UserId,
    pub owner_id: UserId,
    pub period: DateRange,
    pub status: RequestStatus,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RentalRequest {
    /// Creates a pending request.
    ///
    /// The borrower must not be the item's owner; availability is checked
    /// by the caller against the item row.
    pub fn create(
        item_id: ItemId,
        borrower_id: UserId,
        owner_id: UserId,
        period: DateRange,
        message: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, RentalError> {
        if borrower_id == owner_id {
            return Err(RentalError::OwnItem);
        }
        Ok(Self {
            id: RequestId::new(),
            item_id,
            borrower_id,
            owner_id,
            period,
            status: RequestStatus::Pending,
            message,
            created_at: now,
            updated_at: now,
        })
    }

    /// Owner approves a pending request.
    pub fn approve(&mut self, actor: &UserId, now: DateTime<Utc>) -> Result<(), RentalError> {
        self.ensure_owner(actor)?;
        self.transition(RequestStatus::Approved, now)
    }

    /// Owner declines a pending request.
    pub fn decline(&mut self, actor: &UserId, now: DateTime<Utc>) -> Result<(), RentalError> {
        self.ensure_owner(actor)?;
        self.transition(RequestStatus::Rejected, now)
    }

    /// Borrower cancels a request that has not finished.
    pub fn cancel(&mut self, actor: &UserId, now: DateTime<Utc>) -> Result<(), RentalError> {
        if actor != &self.borrower_id {
            return Err(RentalError::Forbidden);
        }
        self.transition(RequestStatus::Cancelled, now)
    }

    /// Owner marks an approved rental as completed.
    pub fn complete(&mut self, actor: &UserId, now: DateTime<Utc>) -> Result<(), RentalError> {
        self.ensure_owner(actor)?;
        self.transition(RequestStatus::Completed, now)
    }

    fn ensure_owner(&self, actor: &UserId) -> Result<(), RentalError> {
        if actor == &self.owner_id {
            Ok(())
        } else {
            Err(RentalError::Forbidden)
        }
    }

    fn transition(&mut self, next: RequestStatus, now: DateTime<Utc>) -> Result<(), RentalError> {
        if !self.status.can_transition_to(next) {
            return Err(RentalError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.updated_at = now;
        Ok(())
    }
}

/// Counts pending requests per item from raw item-id rows.
///
/// The rows come pre-filtered to `status = 'pending'`; this just groups by
/// the item foreign key. Items with no pending requests are absent from
/// the map.
pub fn pending_counts(pending_item_ids: &[ItemId]) -> HashMap<ItemId, u32> {
    let mut counts: HashMap<ItemId, u32> = HashMap::new();
    for item_id in pending_item_ids {
        *counts.entry(*item_id).or_insert(0) += 1;
    }
    counts
}
