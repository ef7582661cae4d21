//! PostgreSQL implementation of CategoryReader.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::catalog::{CatalogError, Category};
use crate::domain::foundation::CategoryId;
use crate::ports::CategoryReader;

/// PostgreSQL implementation of CategoryReader.
#[derive(Clone)]
pub struct PostgresCategoryReader {
    pool: PgPool,
}

impl PostgresCategoryReader {
    /// Creates a new PostgresCategoryReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryReader for PostgresCategoryReader {
    async fn list_all(&self) -> Result<Vec<Category>, CatalogError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, slug FROM categories ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CatalogError::infrastructure(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| Category {
                id: CategoryId::from_uuid(row.get("id")),
                name: row.get("name"),
                slug: row.get("slug"),
            })
            .collect())
    }
}
