//! PostgreSQL implementation of ReviewReader.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::catalog::{CatalogError, Rating};
use crate::domain::foundation::{ItemId, ReviewId};
use crate::ports::{ReviewReader, ReviewView};

/// PostgreSQL implementation of ReviewReader.
#[derive(Clone)]
pub struct PostgresReviewReader {
    pool: PgPool,
}

impl PostgresReviewReader {
    /// Creates a new PostgresReviewReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewReader for PostgresReviewReader {
    async fn ratings_for_items(
        &self,
        item_ids: &[ItemId],
    ) -> Result<Vec<(ItemId, Rating)>, CatalogError> {
        if item_ids.is_empty() {
            return Ok(vec![]);
        }

        let uuids: Vec<uuid::Uuid> = item_ids.iter().map(|id| *id.as_uuid()).collect();

        let rows = sqlx::query(
            r#"
            SELECT item_id, rating FROM reviews WHERE item_id = ANY($1)
            "#,
        )
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CatalogError::infrastructure(e.to_string()))?;

        rows.into_iter()
            .map(|row| {
                let rating = Rating::new(row.get::<i16, _>("rating"))
                    .map_err(|e| CatalogError::infrastructure(e.to_string()))?;
                Ok((ItemId::from_uuid(row.get("item_id")), rating))
            })
            .collect()
    }

    async fn list_for_item(&self, item_id: &ItemId) -> Result<Vec<ReviewView>, CatalogError> {
        let rows = sqlx::query(
            r#"
            SELECT r.id, r.item_id, r.rating, r.comment, r.created_at,
                   p.display_name AS reviewer_name
            FROM reviews r
            LEFT JOIN profiles p ON p.user_id = r.reviewer_id
            WHERE r.item_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(item_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CatalogError::infrastructure(e.to_string()))?;

        rows.into_iter()
            .map(|row| {
                let rating = Rating::new(row.get::<i16, _>("rating"))
                    .map_err(|e| CatalogError::infrastructure(e.to_string()))?;
                Ok(ReviewView {
                    id: ReviewId::from_uuid(row.get("id")),
                    item_id: ItemId::from_uuid(row.get("item_id")),
                    reviewer_name: row.get("reviewer_name"),
                    rating,
                    comment: row.get("comment"),
                    created_at: row.get("created_at"),
                })
            })
            .collect()
    }
}
