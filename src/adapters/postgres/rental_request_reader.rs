//! PostgreSQL implementation of RentalRequestReader.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::domain::foundation::{ItemId, RequestId, UserId};
use crate::domain::rental::{DateRange, RentalError, RentalRequest, RequestStatus};
use crate::ports::{BorrowedRequest, ItemSummary, LendingRequest, RentalRequestReader};

/// PostgreSQL implementation of RentalRequestReader.
#[derive(Clone)]
pub struct PostgresRentalRequestReader {
    pool: PgPool,
}

impl PostgresRentalRequestReader {
    /// Creates a new PostgresRentalRequestReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const REQUEST_WITH_ITEM_COLUMNS: &str = r#"
    r.id, r.item_id, r.borrower_id, r.owner_id, r.start_date, r.end_date,
    r.status, r.message, r.created_at, r.updated_at,
    i.id AS joined_item_id, i.title AS item_title, i.price_per_day AS item_price_per_day,
    i.location AS item_location, i.image_url AS item_image_url
"#;

fn request_from_row(row: &PgRow) -> Result<RentalRequest, RentalError> {
    let borrower_id: String = row.get("borrower_id");
    let owner_id: String = row.get("owner_id");
    let status: String = row.get("status");

    let period = DateRange::new(row.get("start_date"), row.get("end_date"))
        .map_err(|e| RentalError::infrastructure(e.to_string()))?;

    Ok(RentalRequest {
        id: RequestId::from_uuid(row.get("id")),
        item_id: ItemId::from_uuid(row.get("item_id")),
        borrower_id: UserId::new(borrower_id)
            .map_err(|e| RentalError::infrastructure(e.to_string()))?,
        owner_id: UserId::new(owner_id)
            .map_err(|e| RentalError::infrastructure(e.to_string()))?,
        period,
        status: status
            .parse::<RequestStatus>()
            .map_err(|e| RentalError::infrastructure(e.to_string()))?,
        message: row.get("message"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

fn item_summary_from_row(row: &PgRow) -> Option<ItemSummary> {
    let joined_id: Option<uuid::Uuid> = row.get("joined_item_id");
    joined_id.map(|id| ItemSummary {
        id: ItemId::from_uuid(id),
        title: row.get("item_title"),
        price_per_day: row.get("item_price_per_day"),
        location: row.get("item_location"),
        image_url: row.get("item_image_url"),
    })
}

#[async_trait]
impl RentalRequestReader for PostgresRentalRequestReader {
    async fn list_by_borrower(
        &self,
        borrower_id: &UserId,
    ) -> Result<Vec<BorrowedRequest>, RentalError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {REQUEST_WITH_ITEM_COLUMNS}
            FROM rental_requests r
            LEFT JOIN items i ON i.id = r.item_id
            WHERE r.borrower_id = $1
            ORDER BY r.created_at DESC
            "#
        ))
        .bind(borrower_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RentalError::infrastructure(e.to_string()))?;

        rows.iter()
            .map(|row| {
                Ok(BorrowedRequest {
                    request: request_from_row(row)?,
                    item: item_summary_from_row(row),
                })
            })
            .collect()
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<LendingRequest>, RentalError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {REQUEST_WITH_ITEM_COLUMNS},
                   p.display_name AS borrower_name
            FROM rental_requests r
            LEFT JOIN items i ON i.id = r.item_id
            LEFT JOIN profiles p ON p.user_id = r.borrower_id
            WHERE r.owner_id = $1
            ORDER BY r.created_at DESC
            "#
        ))
        .bind(owner_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RentalError::infrastructure(e.to_string()))?;

        rows.iter()
            .map(|row| {
                Ok(LendingRequest {
                    request: request_from_row(row)?,
                    item: item_summary_from_row(row),
                    borrower_name: row.get("borrower_name"),
                })
            })
            .collect()
    }

    async fn pending_item_ids(&self, item_ids: &[ItemId]) -> Result<Vec<ItemId>, RentalError> {
        if item_ids.is_empty() {
            return Ok(vec![]);
        }

        let uuids: Vec<uuid::Uuid> = item_ids.iter().map(|id| *id.as_uuid()).collect();

        let rows = sqlx::query(
            r#"
            SELECT item_id FROM rental_requests
            WHERE item_id = ANY($1) AND status = 'pending'
            "#,
        )
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RentalError::infrastructure(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| ItemId::from_uuid(row.get("item_id")))
            .collect())
    }
}
