//! The rental item aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CategoryId, ItemId, UserId, ValidationError};

use super::errors::CatalogError;
use super::ItemCondition;

/// An item listed for rent.
///
/// Items are created through [`Item::create`] and mutated only through the
/// methods here, which keep the validation rules (nonempty title/location,
/// strictly positive daily price) in one place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub owner_id: UserId,
    pub category_id: Option<CategoryId>,
    pub title: String,
    pub description: Option<String>,
    pub price_per_day: f64,
    pub location: String,
    pub condition: ItemCondition,
    pub is_available: bool,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a listing.
#[derive(Debug, Clone)]
pub struct ItemDraft {
    pub owner_id: UserId,
    pub category_id: Option<CategoryId>,
    pub title: String,
    pub description: Option<String>,
    pub price_per_day: f64,
    pub location: String,
    pub condition: ItemCondition,
    pub image_url: Option<String>,
}

/// Partial update applied by the owner. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    pub category_id: Option<Option<CategoryId>>,
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub price_per_day: Option<f64>,
    pub location: Option<String>,
    pub condition: Option<ItemCondition>,
    pub is_available: Option<bool>,
    pub image_url: Option<Option<String>>,
}

impl ItemUpdate {
    /// True when the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.category_id.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.price_per_day.is_none()
            && self.location.is_none()
            && self.condition.is_none()
            && self.is_available.is_none()
            && self.image_url.is_none()
    }
}

impl Item {
    /// Creates a new listing from a draft, validating its fields.
    pub fn create(draft: ItemDraft, now: DateTime<Utc>) -> Result<Self, CatalogError> {
        validate_title(&draft.title)?;
        validate_location(&draft.location)?;
        validate_price(draft.price_per_day)?;

        Ok(Self {
            id: ItemId::new(),
            owner_id: draft.owner_id,
            category_id: draft.category_id,
            title: draft.title,
            description: draft.description,
            price_per_day: draft.price_per_day,
            location: draft.location,
            condition: draft.condition,
            is_available: true,
            image_url: draft.image_url,
            created_at: now,
            updated_at: now,
        })
    }

    /// Returns an error unless `user_id` owns this item.
    pub fn ensure_owned_by(&self, user_id: &UserId) -> Result<(), CatalogError> {
        if &self.owner_id == user_id {
            Ok(())
        } else {
            Err(CatalogError::Forbidden)
        }
    }

    /// Applies a partial update, validating each changed field.
    pub fn apply_update(
        &mut self,
        update: ItemUpdate,
        now: DateTime<Utc>,
    ) -> Result<(), CatalogError> {
        if let Some(ref title) = update.title {
            validate_title(title)?;
        }
        if let Some(ref location) = update.location {
            validate_location(location)?;
        }
        if let Some(price) = update.price_per_day {
            validate_price(price)?;
        }

        if let Some(category_id) = update.category_id {
            self.category_id = category_id;
        }
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price_per_day {
            self.price_per_day = price;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(condition) = update.condition {
            self.condition = condition;
        }
        if let Some(is_available) = update.is_available {
            self.is_available = is_available;
        }
        if let Some(image_url) = update.image_url {
            self.image_url = image_url;
        }
        self.updated_at = now;
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::empty_field("title"));
    }
    Ok(())
}

fn validate_location(location: &str) -> Result<(), ValidationError> {
    if location.trim().is_empty() {
        return Err(ValidationError::empty_field("location"));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ValidationError::invalid_format(
            "price_per_day",
            "must be a positive amount",
        ));
    }
    Ok(())
}
