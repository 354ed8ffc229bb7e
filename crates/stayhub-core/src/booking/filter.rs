use chrono::NaiveDate;

use super::{Booking, BookingStatus};

/// Back-office booking search. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub apartment_title: Option<String>,
    /// Earliest check-in day, inclusive.
    pub check_in_from: Option<NaiveDate>,
    /// Latest check-in day, inclusive.
    pub check_in_to: Option<NaiveDate>,
}

impl BookingFilter {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.title_needle().is_none()
            && self.check_in_from.is_none()
            && self.check_in_to.is_none()
    }

    fn title_needle(&self) -> Option<String> {
        self.apartment_title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        if self.status.is_some_and(|s| s != booking.status()) {
            return false;
        }
        if let Some(needle) = self.title_needle() {
            if !booking.apartment().title.to_lowercase().contains(&needle) {
                return false;
            }
        }
        if self.check_in_from.is_some_and(|from| booking.check_in() < from) {
            return false;
        }
        if self.check_in_to.is_some_and(|to| booking.check_in() > to) {
            return false;
        }
        true
    }

    pub fn apply(&self, bookings: Vec<Booking>) -> Vec<Booking> {
        bookings.into_iter().filter(|b| self.matches(b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::tests::{booking_on, d};
    use crate::booking::BookingRecord;
    use crate::ids::ApartmentId;

    fn titled(title: &str, check_in: &str, status: BookingStatus) -> Booking {
        let mut record: BookingRecord =
            booking_on(&ApartmentId::new(), check_in, "2030-01-01", status).to_record();
        record.apartment.title = title.into();
        Booking::from(record)
    }

    #[test]
    fn default_filter_is_empty_and_matches_all() {
        let filter = BookingFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&titled("Loft", "2024-01-01", BookingStatus::Cancelled)));
    }

    #[test]
    fn blank_title_counts_as_unset() {
        let filter = BookingFilter {
            apartment_title: Some("   ".into()),
            ..Default::default()
        };
        assert!(filter.is_empty());
    }

    #[test]
    fn status_and_title_narrow_results() {
        let bookings = vec![
            titled("Harbour Loft", "2024-01-01", BookingStatus::Pending),
            titled("Harbour Loft", "2024-01-01", BookingStatus::Confirmed),
            titled("Garden Flat", "2024-01-01", BookingStatus::Pending),
        ];
        let filter = BookingFilter {
            status: Some(BookingStatus::Pending),
            apartment_title: Some("harbour".into()),
            ..Default::default()
        };
        let hits = filter.apply(bookings);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].apartment().title, "Harbour Loft");
        assert_eq!(hits[0].status(), BookingStatus::Pending);
    }

    #[test]
    fn check_in_range_is_inclusive_on_both_ends() {
        let filter = BookingFilter {
            check_in_from: Some(d("2024-01-10")),
            check_in_to: Some(d("2024-01-20")),
            ..Default::default()
        };
        let at = |day: &str| filter.matches(&titled("Loft", day, BookingStatus::Pending));
        assert!(!at("2024-01-09"));
        assert!(at("2024-01-10"));
        assert!(at("2024-01-20"));
        assert!(!at("2024-01-21"));
    }
}
