//! PostgreSQL implementation of ItemRepository.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::domain::catalog::{CatalogError, Item};
use crate::domain::foundation::{CategoryId, ItemId, UserId};
use crate::ports::ItemRepository;

/// PostgreSQL implementation of ItemRepository.
#[derive(Clone)]
pub struct PostgresItemRepository {
    pool: PgPool,
}

impl PostgresItemRepository {
    /// Creates a new PostgresItemRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn item_from_row(row: &PgRow) -> Result<Item, CatalogError> {
    let owner_id: String = row.get("owner_id");
    let condition: String = row.get("condition");

    Ok(Item {
        id: ItemId::from_uuid(row.get("id")),
        owner_id: UserId::new(owner_id)
            .map_err(|e| CatalogError::infrastructure(e.to_string()))?,
        category_id: row
            .get::<Option<uuid::Uuid>, _>("category_id")
            .map(CategoryId::from_uuid),
        title: row.get("title"),
        description: row.get("description"),
        price_per_day: row.get("price_per_day"),
        location: row.get("location"),
        condition: condition
            .parse()
            .map_err(|e: crate::domain::foundation::ValidationError| {
                CatalogError::infrastructure(e.to_string())
            })?,
        is_available: row.get("is_available"),
        image_url: row.get("image_url"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

#[async_trait]
impl ItemRepository for PostgresItemRepository {
    async fn get_by_id(&self, id: &ItemId) -> Result<Option<Item>, CatalogError> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, category_id, title, description, price_per_day,
                   location, condition, is_available, image_url, created_at, updated_at
            FROM items
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CatalogError::infrastructure(e.to_string()))?;

        row.as_ref().map(item_from_row).transpose()
    }

    async fn insert(&self, item: &Item) -> Result<(), CatalogError> {
        sqlx::query(
            r#"
            INSERT INTO items (
                id, owner_id, category_id, title, description, price_per_day,
                location, condition, is_available, image_url, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(item.id.as_uuid())
        .bind(item.owner_id.as_str())
        .bind(item.category_id.as_ref().map(|c| *c.as_uuid()))
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.price_per_day)
        .bind(&item.location)
        .bind(item.condition.as_str())
        .bind(item.is_available)
        .bind(&item.image_url)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| CatalogError::infrastructure(e.to_string()))?;

        Ok(())
    }

    async fn update(&self, item: &Item) -> Result<(), CatalogError> {
        let result = sqlx::query(
            r#"
            UPDATE items
            SET category_id = $2, title = $3, description = $4, price_per_day = $5,
                location = $6, condition = $7, is_available = $8, image_url = $9,
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(item.id.as_uuid())
        .bind(item.category_id.as_ref().map(|c| *c.as_uuid()))
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.price_per_day)
        .bind(&item.location)
        .bind(item.condition.as_str())
        .bind(item.is_available)
        .bind(&item.image_url)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| CatalogError::infrastructure(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::ItemNotFound(item.id));
        }
        Ok(())
    }
}
