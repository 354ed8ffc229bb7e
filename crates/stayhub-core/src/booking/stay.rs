use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A validated stay: the guest occupies the nights `check_in..check_out`.
///
/// `check_out` is exclusive, so a stay always covers at least one night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StayDates {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayDates {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, DomainError> {
        if check_out <= check_in {
            return Err(DomainError::InvalidStayPeriod);
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn nights(&self) -> u32 {
        // Positive by construction.
        (self.check_out - self.check_in).num_days() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn rejects_equal_and_inverted_ranges() {
        assert_eq!(
            StayDates::new(d("2024-01-05"), d("2024-01-05")),
            Err(DomainError::InvalidStayPeriod)
        );
        assert_eq!(
            StayDates::new(d("2024-01-05"), d("2024-01-01")),
            Err(DomainError::InvalidStayPeriod)
        );
    }

    #[test]
    fn counts_nights_across_month_boundary() {
        let stay = StayDates::new(d("2024-01-30"), d("2024-02-02")).unwrap();
        assert_eq!(stay.nights(), 3);
    }
}
