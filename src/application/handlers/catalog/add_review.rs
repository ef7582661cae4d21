//! AddReviewHandler - leave a rating on someone else's item.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::catalog::{CatalogError, Rating, Review};
use crate::domain::foundation::{ItemId, UserId};
use crate::ports::{ItemRepository, ReviewRepository};

/// Command to add a review.
#[derive(Debug, Clone)]
pub struct AddReviewCommand {
    pub item_id: ItemId,
    pub reviewer_id: UserId,
    pub rating: i16,
    pub comment: Option<String>,
}

/// Handler for adding reviews.
pub struct AddReviewHandler {
    items: Arc<dyn ItemRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl AddReviewHandler {
    pub fn new(items: Arc<dyn ItemRepository>, reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { items, reviews }
    }

    pub async fn handle(&self, cmd: AddReviewCommand) -> Result<Review, CatalogError> {
        let item = self
            .items
            .get_by_id(&cmd.item_id)
            .await?
            .ok_or(CatalogError::ItemNotFound(cmd.item_id))?;

        let rating = Rating::new(cmd.rating)?;
        let review = Review::create(
            item.id,
            &item.owner_id,
            cmd.reviewer_id,
            rating,
            cmd.comment,
            Utc::now(),
        )?;

        self.reviews.insert(&review).await?;
        Ok(review)
    }
}
