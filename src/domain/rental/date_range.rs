//! Rental period value object.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// An inclusive rental period. Start must not be after end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting start > end.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, ValidationError> {
        if start_date > end_date {
            return Err(ValidationError::invalid_format(
                "date_range",
                "start date is after end date",
            ));
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Number of days in the range, counting both endpoints.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn accepts_ordered_range() {
        let range = DateRange::new(d("2026-03-01"), d("2026-03-05")).unwrap();
        assert_eq!(range.days(), 5);
    }

    #[test]
    fn accepts_single_day() {
        let range = DateRange::new(d("2026-03-01"), d("2026-03-01")).unwrap();
        assert_eq!(range.days(), 1);
    }

    #[test]
    fn rejects_inverted_range() {
        assert!(DateRange::new(d("2026-03-05"), d("2026-03-01")).is_err());
    }
}
