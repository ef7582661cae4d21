//! Review ratings and the per-item rating aggregation.
//!
//! Browse and detail views show each item's average rating and review
//! count, computed in memory from raw `(item_id, rating)` rows. An item
//! with no reviews has *no* summary rather than a zero one, so the view
//! layer can render "no reviews yet" instead of "0.0 stars".

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ItemId, ValidationError};

/// A review rating, always in 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(i16);

impl Rating {
    pub const MIN: i16 = 1;
    pub const MAX: i16 = 5;

    /// Creates a rating, rejecting values outside 1..=5.
    pub fn new(value: i16) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::out_of_range(
                "rating",
                Self::MIN as i32,
                Self::MAX as i32,
                value as i32,
            ));
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    pub fn value(&self) -> i16 {
        self.0
    }
}

/// Aggregated rating statistics for one item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub average: f64,
    pub count: u32,
}

/// Groups raw rating rows by item and averages them.
///
/// Items absent from `rows` are absent from the result; callers treat a
/// missing entry as "no reviews" (null average, null count).
pub fn rating_summaries(rows: &[(ItemId, Rating)]) -> HashMap<ItemId, RatingSummary> {
    let mut totals: HashMap<ItemId, (i64, u32)> = HashMap::new();
    for (item_id, rating) in rows {
        let entry = totals.entry(*item_id).or_insert((0, 0));
        entry.0 += rating.value() as i64;
        entry.1 += 1;
    }

    totals
        .into_iter()
        .map(|(item_id, (total, count))| {
            (
                item_id,
                RatingSummary {
                    average: total as f64 / count as f64,
                    count,
                },
            )
        })
        .collect()
}
