//! HTTP DTOs for rental endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::handlers::rental::RequestsOverview;
use crate::domain::rental::RentalRequest;
use crate::ports::{BorrowedRequest, ItemSummary, LendingRequest};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to submit a rental request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequestRequest {
    pub item_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub message: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// The item slice shown on a request card.
#[derive(Debug, Clone, Serialize)]
pub struct RequestItemResponse {
    pub id: String,
    pub title: String,
    pub price_per_day: f64,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<ItemSummary> for RequestItemResponse {
    fn from(summary: ItemSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            title: summary.title,
            price_per_day: summary.price_per_day,
            location: summary.location,
            image_url: summary.image_url,
        }
    }
}

/// One rental request card.
#[derive(Debug, Clone, Serialize)]
pub struct RequestCardResponse {
    pub id: String,
    pub status: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub item: Option<RequestItemResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borrower_name: Option<String>,
    pub created_at: String,
}

impl RequestCardResponse {
    fn from_request(
        request: RentalRequest,
        item: Option<ItemSummary>,
        borrower_name: Option<String>,
    ) -> Self {
        Self {
            id: request.id.to_string(),
            status: request.status.as_str().to_string(),
            start_date: request.period.start_date(),
            end_date: request.period.end_date(),
            message: request.message,
            item: item.map(Into::into),
            borrower_name,
            created_at: request.created_at.to_rfc3339(),
        }
    }
}

impl From<BorrowedRequest> for RequestCardResponse {
    fn from(borrowed: BorrowedRequest) -> Self {
        Self::from_request(borrowed.request, borrowed.item, None)
    }
}

impl From<LendingRequest> for RequestCardResponse {
    fn from(lending: LendingRequest) -> Self {
        Self::from_request(lending.request, lending.item, lending.borrower_name)
    }
}

/// Both tabs of the requests page.
#[derive(Debug, Clone, Serialize)]
pub struct RequestsOverviewResponse {
    pub borrowing: Vec<RequestCardResponse>,
    pub lending: Vec<RequestCardResponse>,
}

impl From<RequestsOverview> for RequestsOverviewResponse {
    fn from(overview: RequestsOverview) -> Self {
        Self {
            borrowing: overview.borrowing.into_iter().map(Into::into).collect(),
            lending: overview.lending.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ItemId, UserId};
    use crate::domain::rental::DateRange;
    use chrono::Utc;

    fn request() -> RentalRequest {
        RentalRequest::create(
            ItemId::new(),
            UserId::new("borrower-1").unwrap(),
            UserId::new("owner-1").unwrap(),
            DateRange::new(
                NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 9, 3).unwrap(),
            )
            .unwrap(),
            Some("please".to_string()),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn borrowed_card_has_no_borrower_name() {
        let card: RequestCardResponse = BorrowedRequest {
            request: request(),
            item: None,
        }
        .into();
        assert_eq!(card.status, "pending");
        assert!(card.borrower_name.is_none());
        assert!(card.item.is_none());
    }

    #[test]
    fn lending_card_carries_borrower_name() {
        let card: RequestCardResponse = LendingRequest {
            request: request(),
            item: Some(ItemSummary {
                id: ItemId::new(),
                title: "Beamer".to_string(),
                price_per_day: 7.0,
                location: "Lab".to_string(),
                image_url: None,
            }),
            borrower_name: Some("Riley".to_string()),
        }
        .into();
        assert_eq!(card.borrower_name.as_deref(), Some("Riley"));
        assert_eq!(card.item.as_ref().unwrap().title, "Beamer");
    }

    #[test]
    fn create_request_parses_dates() {
        let body: CreateRequestRequest = serde_json::from_str(
            r#"{"item_id": "0e4f0c72-45f8-4c9e-a17c-d24b8a5f0a11",
                "start_date": "2026-09-01", "end_date": "2026-09-03"}"#,
        )
        .unwrap();
        assert_eq!(body.start_date.to_string(), "2026-09-01");
        assert!(body.message.is_none());
    }
}
