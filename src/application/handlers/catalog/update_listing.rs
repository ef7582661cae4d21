//! UpdateListingHandler - owner edits to an existing listing.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::catalog::{CatalogError, Item, ItemUpdate};
use crate::domain::foundation::{ItemId, UserId};
use crate::ports::ItemRepository;

/// Command to update a listing. Only the owner may apply it.
#[derive(Debug, Clone)]
pub struct UpdateListingCommand {
    pub item_id: ItemId,
    pub actor: UserId,
    pub update: ItemUpdate,
}

/// Handler for listing updates.
pub struct UpdateListingHandler {
    items: Arc<dyn ItemRepository>,
}

impl UpdateListingHandler {
    pub fn new(items: Arc<dyn ItemRepository>) -> Self {
        Self { items }
    }

    pub async fn handle(&self, cmd: UpdateListingCommand) -> Result<Item, CatalogError> {
        let mut item = self
            .items
            .get_by_id(&cmd.item_id)
            .await?
            .ok_or(CatalogError::ItemNotFound(cmd.item_id))?;

        item.ensure_owned_by(&cmd.actor)?;
        item.apply_update(cmd.update, Utc::now())?;
        self.items.update(&item).await?;
        Ok(item)
    }
}
