//! Guest bookings as listed on the partner's bookings page.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::Displayable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub property_id: Option<String>,
    #[serde(default)]
    pub property_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default)]
    pub guests: u32,
    #[serde(default)]
    pub total_amount: f64,
    /// Free-form status string as sent by the backend.
    pub status: String,
}

impl Booking {
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days().max(0)
    }

    pub fn bucket(&self) -> Option<BookingBucket> {
        BookingBucket::from_status(&self.status)
    }
}

impl Displayable for Booking {
    fn display_label(&self) -> String {
        format!(
            "{} {} -> {} ({} nights, {} guests) {:.2} [{}]",
            self.property_name,
            self.check_in,
            self.check_out,
            self.nights(),
            self.guests,
            self.total_amount,
            self.status
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Tabs of the bookings page.
pub enum BookingBucket {
    Upcoming,
    Completed,
    Cancelled,
}

impl BookingBucket {
    /// Classifies a backend status string; unknown statuses yield `None`.
    pub fn from_status(status: &str) -> Option<Self> {
        match status.trim().to_ascii_lowercase().as_str() {
            "pending" | "confirmed" | "upcoming" | "booked" => Some(BookingBucket::Upcoming),
            "completed" | "checked_out" | "checked-out" => Some(BookingBucket::Completed),
            "cancelled" | "canceled" | "refunded" => Some(BookingBucket::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for BookingBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BookingBucket::Upcoming => "Upcoming",
            BookingBucket::Completed => "Completed",
            BookingBucket::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification_is_case_insensitive() {
        assert_eq!(
            BookingBucket::from_status("CONFIRMED"),
            Some(BookingBucket::Upcoming)
        );
        assert_eq!(
            BookingBucket::from_status("Canceled"),
            Some(BookingBucket::Cancelled)
        );
        assert_eq!(
            BookingBucket::from_status("checked_out"),
            Some(BookingBucket::Completed)
        );
        assert_eq!(BookingBucket::from_status("on_hold"), None);
    }

    #[test]
    fn nights_never_negative() {
        let booking = Booking {
            id: "b1".into(),
            property_id: None,
            property_name: "Sea Breeze".into(),
            check_in: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2025, 3, 8).unwrap(),
            guests: 2,
            total_amount: 0.0,
            status: "pending".into(),
        };
        assert_eq!(booking.nights(), 0);
    }
}
