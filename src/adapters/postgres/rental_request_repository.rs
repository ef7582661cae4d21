//! PostgreSQL implementation of RentalRequestRepository.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::domain::foundation::{ItemId, RequestId, UserId};
use crate::domain::rental::{DateRange, RentalError, RentalRequest, RequestStatus};
use crate::ports::RentalRequestRepository;

/// PostgreSQL implementation of RentalRequestRepository.
#[derive(Clone)]
pub struct PostgresRentalRequestRepository {
    pool: PgPool,
}

impl PostgresRentalRequestRepository {
    /// Creates a new PostgresRentalRequestRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

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

#[async_trait]
impl RentalRequestRepository for PostgresRentalRequestRepository {
    async fn get_by_id(&self, id: &RequestId) -> Result<Option<RentalRequest>, RentalError> {
        let row = sqlx::query(
            r#"
            SELECT id, item_id, borrower_id, owner_id, start_date, end_date,
                   status, message, created_at, updated_at
            FROM rental_requests
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RentalError::infrastructure(e.to_string()))?;

        row.as_ref().map(request_from_row).transpose()
    }

    async fn insert(&self, request: &RentalRequest) -> Result<(), RentalError> {
        sqlx::query(
            r#"
            INSERT INTO rental_requests (
                id, item_id, borrower_id, owner_id, start_date, end_date,
                status, message, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(request.id.as_uuid())
        .bind(request.item_id.as_uuid())
        .bind(request.borrower_id.as_str())
        .bind(request.owner_id.as_str())
        .bind(request.period.start_date())
        .bind(request.period.end_date())
        .bind(request.status.as_str())
        .bind(&request.message)
        .bind(request.created_at)
        .bind(request.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RentalError::infrastructure(e.to_string()))?;

        Ok(())
    }

    async fn update_status(&self, request: &RentalRequest) -> Result<(), RentalError> {
        let result = sqlx::query(
            r#"
            UPDATE rental_requests
            SET status = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(request.id.as_uuid())
        .bind(request.status.as_str())
        .bind(request.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RentalError::infrastructure(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RentalError::RequestNotFound(request.id));
        }
        Ok(())
    }
}
