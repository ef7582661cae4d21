//! PostgreSQL implementation of ReviewRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::catalog::{CatalogError, Review};
use crate::ports::ReviewRepository;

/// PostgreSQL implementation of ReviewRepository.
#[derive(Clone)]
pub struct PostgresReviewRepository {
    pool: PgPool,
}

impl PostgresReviewRepository {
    /// Creates a new PostgresReviewRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn insert(&self, review: &Review) -> Result<(), CatalogError> {
        sqlx::query(
            r#"
            INSERT INTO reviews (id, item_id, reviewer_id, rating, comment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(review.id.as_uuid())
        .bind(review.item_id.as_uuid())
        .bind(review.reviewer_id.as_str())
        .bind(review.rating.value())
        .bind(&review.comment)
        .bind(review.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| CatalogError::infrastructure(e.to_string()))?;

        Ok(())
    }
}
