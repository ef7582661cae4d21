//! HTTP DTOs for catalog endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::catalog::{BrowseItem, BrowsePage, ItemDetail, ListingOverview};
use crate::domain::catalog::{Category, RatingSummary};
use crate::ports::{ItemWithCategory, ReviewView};

use super::super::dto::double_option;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Query parameters for the browse view.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrowseQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

/// Request to create a listing.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateListingRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price_per_day: f64,
    pub location: String,
    pub condition: String,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Request to update a listing. Absent fields are left unchanged; explicit
/// nulls clear the optional fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateListingRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub price_per_day: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub category_id: Option<Option<String>>,
    #[serde(default)]
    pub is_available: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
}

/// Request to add a review.
#[derive(Debug, Clone, Deserialize)]
pub struct AddReviewRequest {
    pub rating: i16,
    #[serde(default)]
    pub comment: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Category as returned in views.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name,
            slug: category.slug,
        }
    }
}

/// An item card, the unit of every listing view.
///
/// `avg_rating` and `review_count` are null (not zero) for items that have
/// no reviews.
#[derive(Debug, Clone, Serialize)]
pub struct ItemCardResponse {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price_per_day: f64,
    pub location: String,
    pub condition: String,
    pub condition_label: String,
    pub is_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub category: Option<CategoryResponse>,
    pub avg_rating: Option<f64>,
    pub review_count: Option<u32>,
    pub created_at: String,
}

impl ItemCardResponse {
    pub fn from_listing(listing: ItemWithCategory, rating: Option<RatingSummary>) -> Self {
        let item = listing.item;
        Self {
            id: item.id.to_string(),
            title: item.title,
            description: item.description,
            price_per_day: item.price_per_day,
            location: item.location,
            condition: item.condition.as_str().to_string(),
            condition_label: item.condition.label().to_string(),
            is_available: item.is_available,
            image_url: item.image_url,
            category: listing.category.map(Into::into),
            avg_rating: rating.map(|r| r.average),
            review_count: rating.map(|r| r.count),
            created_at: item.created_at.to_rfc3339(),
        }
    }
}

impl From<BrowseItem> for ItemCardResponse {
    fn from(browse_item: BrowseItem) -> Self {
        Self::from_listing(browse_item.listing, browse_item.rating)
    }
}

/// The signed-in viewer, if any, for the page header.
#[derive(Debug, Clone, Serialize)]
pub struct ViewerResponse {
    pub user_id: String,
    pub email: String,
}

/// The browse page.
#[derive(Debug, Clone, Serialize)]
pub struct BrowsePageResponse {
    pub items: Vec<ItemCardResponse>,
    pub categories: Vec<CategoryResponse>,
    pub total: usize,
    pub viewer: Option<ViewerResponse>,
}

impl From<BrowsePage> for BrowsePageResponse {
    fn from(page: BrowsePage) -> Self {
        let items: Vec<ItemCardResponse> = page.items.into_iter().map(Into::into).collect();
        let total = items.len();
        Self {
            items,
            categories: page.categories.into_iter().map(Into::into).collect(),
            total,
            viewer: None,
        }
    }
}

/// One review on the item detail page.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer_name: Option<String>,
    pub rating: i16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: String,
}

impl From<ReviewView> for ReviewResponse {
    fn from(view: ReviewView) -> Self {
        Self {
            id: view.id.to_string(),
            reviewer_name: view.reviewer_name,
            rating: view.rating.value(),
            comment: view.comment,
            created_at: view.created_at.to_rfc3339(),
        }
    }
}

/// The item detail page.
#[derive(Debug, Clone, Serialize)]
pub struct ItemDetailResponse {
    #[serde(flatten)]
    pub item: ItemCardResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    pub reviews: Vec<ReviewResponse>,
}

impl From<ItemDetail> for ItemDetailResponse {
    fn from(detail: ItemDetail) -> Self {
        Self {
            item: ItemCardResponse::from_listing(detail.listing, detail.rating),
            owner_name: detail.owner_name,
            reviews: detail.reviews.into_iter().map(Into::into).collect(),
        }
    }
}

/// One row of the my-listings page.
#[derive(Debug, Clone, Serialize)]
pub struct ListingOverviewResponse {
    #[serde(flatten)]
    pub item: ItemCardResponse,
    pub pending_requests: u32,
}

impl From<ListingOverview> for ListingOverviewResponse {
    fn from(overview: ListingOverview) -> Self {
        Self {
            item: ItemCardResponse::from_listing(overview.listing, None),
            pending_requests: overview.pending_requests,
        }
    }
}
