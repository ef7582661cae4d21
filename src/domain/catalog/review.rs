//! Item reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ItemId, ReviewId, UserId};

use super::errors::CatalogError;
use super::Rating;

/// A borrower's review of an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub item_id: ItemId,
    pub reviewer_id: UserId,
    pub rating: Rating,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Creates a review. Owners cannot review their own items.
    pub fn create(
        item_id: ItemId,
        item_owner_id: &UserId,
        reviewer_id: UserId,
        rating: Rating,
        comment: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, CatalogError> {
        if &reviewer_id == item_owner_id {
            return Err(CatalogError::Forbidden);
        }
        Ok(Self {
            id: ReviewId::new(),
            item_id,
            reviewer_id,
            rating,
            comment,
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reviewer_can_review_someone_elses_item() {
        let owner = UserId::new("owner-1").unwrap();
        let reviewer = UserId::new("borrower-1").unwrap();
        let review = Review::create(
            ItemId::new(),
            &owner,
            reviewer,
            Rating::new(4).unwrap(),
            Some("Worked great".to_string()),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(review.rating.value(), 4);
    }

    #[test]
    fn owner_cannot_review_own_item() {
        let owner = UserId::new("owner-1").unwrap();
        let result = Review::create(
            ItemId::new(),
            &owner,
            owner.clone(),
            Rating::new(5).unwrap(),
            None,
            Utc::now(),
        );
        assert!(matches!(result, Err(CatalogError::Forbidden)));
    }
}
