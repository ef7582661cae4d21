//! CreateRequestHandler - a borrower asks to rent an item.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::domain::foundation::{ItemId, UserId};
use crate::domain::rental::{DateRange, RentalError, RentalRequest};
use crate::ports::{ItemRepository, RentalRequestRepository};

/// Command to submit a rental request.
#[derive(Debug, Clone)]
pub struct CreateRequestCommand {
    pub item_id: ItemId,
    pub borrower_id: UserId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub message: Option<String>,
}

/// Handler for submitting rental requests.
pub struct CreateRequestHandler {
    items: Arc<dyn ItemRepository>,
    requests: Arc<dyn RentalRequestRepository>,
}

impl CreateRequestHandler {
    pub fn new(
        items: Arc<dyn ItemRepository>,
        requests: Arc<dyn RentalRequestRepository>,
    ) -> Self {
        Self { items, requests }
    }

    pub async fn handle(&self, cmd: CreateRequestCommand) -> Result<RentalRequest, RentalError> {
        let item = self
            .items
            .get_by_id(&cmd.item_id)
            .await
            .map_err(|e| RentalError::infrastructure(e.to_string()))?
            .ok_or(RentalError::ItemNotFound(cmd.item_id))?;

        if !item.is_available {
            return Err(RentalError::ItemUnavailable);
        }

        let period = DateRange::new(cmd.start_date, cmd.end_date)?;
        let request = RentalRequest::create(
            item.id,
            cmd.borrower_id,
            item.owner_id.clone(),
            period,
            cmd.message,
            Utc::now(),
        )?;

        self.requests.insert(&request).await?;
        Ok(request)
    }
}
