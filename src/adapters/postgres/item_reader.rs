//! PostgreSQL implementation of ItemReader.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, QueryBuilder, Row};

use crate::domain::catalog::{CatalogError, Category, Item};
use crate::domain::foundation::{CategoryId, ItemId, UserId};
use crate::ports::{BrowseFilter, ItemReader, ItemWithCategory};

/// PostgreSQL implementation of ItemReader.
#[derive(Clone)]
pub struct PostgresItemReader {
    pool: PgPool,
}

impl PostgresItemReader {
    /// Creates a new PostgresItemReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ITEM_WITH_CATEGORY_COLUMNS: &str = r#"
    i.id, i.owner_id, i.category_id, i.title, i.description, i.price_per_day,
    i.location, i.condition, i.is_available, i.image_url, i.created_at, i.updated_at,
    c.name AS category_name, c.slug AS category_slug
"#;

/// Maps a joined `items LEFT JOIN categories` row.
fn item_with_category_from_row(row: &PgRow) -> Result<ItemWithCategory, CatalogError> {
    let owner_id: String = row.get("owner_id");
    let condition: String = row.get("condition");

    let item = Item {
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
    };

    let category = match (item.category_id, row.get::<Option<String>, _>("category_name")) {
        (Some(id), Some(name)) => Some(Category {
            id,
            name,
            slug: row.get::<Option<String>, _>("category_slug").unwrap_or_default(),
        }),
        _ => None,
    };

    Ok(ItemWithCategory { item, category })
}

#[async_trait]
impl ItemReader for PostgresItemReader {
    async fn get_by_id(&self, id: &ItemId) -> Result<Option<ItemWithCategory>, CatalogError> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {ITEM_WITH_CATEGORY_COLUMNS}
            FROM items i
            LEFT JOIN categories c ON c.id = i.category_id
            WHERE i.id = $1
            "#
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CatalogError::infrastructure(e.to_string()))?;

        row.as_ref().map(item_with_category_from_row).transpose()
    }

    async fn browse(&self, filter: &BrowseFilter) -> Result<Vec<ItemWithCategory>, CatalogError> {
        let mut builder: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(format!(
            r#"
            SELECT {ITEM_WITH_CATEGORY_COLUMNS}
            FROM items i
            LEFT JOIN categories c ON c.id = i.category_id
            WHERE i.is_available = TRUE
            "#
        ));

        if let Some(ref slug) = filter.category_slug {
            builder.push(" AND c.slug = ");
            builder.push_bind(slug);
        }
        if let Some(ref search) = filter.search {
            builder.push(" AND i.title ILIKE ");
            builder.push_bind(format!("%{}%", search));
        }
        builder.push(" ORDER BY i.created_at DESC");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| CatalogError::infrastructure(e.to_string()))?;

        rows.iter().map(item_with_category_from_row).collect()
    }

    async fn list_by_owner(
        &self,
        owner_id: &UserId,
    ) -> Result<Vec<ItemWithCategory>, CatalogError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {ITEM_WITH_CATEGORY_COLUMNS}
            FROM items i
            LEFT JOIN categories c ON c.id = i.category_id
            WHERE i.owner_id = $1
            ORDER BY i.created_at DESC
            "#
        ))
        .bind(owner_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CatalogError::infrastructure(e.to_string()))?;

        rows.iter().map(item_with_category_from_row).collect()
    }
}
