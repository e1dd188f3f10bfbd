//! Partner bookings page: fetch and split into tabs.

use std::cmp::Reverse;
use std::sync::Arc;

use stayhub_domain::{Booking, BookingBucket};
use tracing::{debug, warn};

use crate::gateway::BookingGateway;
use crate::CoreError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingBuckets {
    /// Soonest check-in first.
    pub upcoming: Vec<Booking>,
    /// Most recent check-in first.
    pub completed: Vec<Booking>,
    pub cancelled: Vec<Booking>,
}

impl BookingBuckets {
    pub fn get(&self, bucket: BookingBucket) -> &[Booking] {
        match bucket {
            BookingBucket::Upcoming => &self.upcoming,
            BookingBucket::Completed => &self.completed,
            BookingBucket::Cancelled => &self.cancelled,
        }
    }

    pub fn total(&self) -> usize {
        self.upcoming.len() + self.completed.len() + self.cancelled.len()
    }
}

/// Splits bookings by status. Unrecognized statuses are logged and dropped.
pub fn bucket_bookings(bookings: Vec<Booking>) -> BookingBuckets {
    let mut buckets = BookingBuckets::default();
    for booking in bookings {
        match booking.bucket() {
            Some(BookingBucket::Upcoming) => buckets.upcoming.push(booking),
            Some(BookingBucket::Completed) => buckets.completed.push(booking),
            Some(BookingBucket::Cancelled) => buckets.cancelled.push(booking),
            None => warn!(booking = %booking.id, status = %booking.status, "unknown booking status"),
        }
    }
    buckets.upcoming.sort_by_key(|booking| booking.check_in);
    buckets.completed.sort_by_key(|booking| Reverse(booking.check_in));
    buckets.cancelled.sort_by_key(|booking| Reverse(booking.check_in));
    buckets
}

pub struct BookingService {
    gateway: Arc<dyn BookingGateway>,
}

impl BookingService {
    pub fn new(gateway: Arc<dyn BookingGateway>) -> Self {
        Self { gateway }
    }

    pub async fn load(&self) -> Result<BookingBuckets, CoreError> {
        let bookings = self.gateway.my_bookings().await?;
        debug!(count = bookings.len(), "fetched bookings");
        Ok(bucket_bookings(bookings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn booking(id: &str, day: u32, status: &str) -> Booking {
        let check_in = NaiveDate::from_ymd_opt(2025, 3, day).unwrap();
        Booking {
            id: id.into(),
            property_id: Some("prop_1".into()),
            property_name: "Palm Grove".into(),
            check_in,
            check_out: check_in + chrono::Duration::days(2),
            guests: 2,
            total_amount: 9000.0,
            status: status.into(),
        }
    }

    #[test]
    fn statuses_land_in_their_tabs() {
        let buckets = bucket_bookings(vec![
            booking("b1", 20, "confirmed"),
            booking("b2", 5, "Pending"),
            booking("b3", 2, "checked_out"),
            booking("b4", 8, "completed"),
            booking("b5", 9, "CANCELED"),
            booking("b6", 10, "no_show"),
        ]);

        let ids = |list: &[Booking]| list.iter().map(|b| b.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&buckets.upcoming), vec!["b2", "b1"]);
        assert_eq!(ids(&buckets.completed), vec!["b4", "b3"]);
        assert_eq!(ids(buckets.get(BookingBucket::Cancelled)), vec!["b5"]);
        assert_eq!(buckets.total(), 5);
    }
}
