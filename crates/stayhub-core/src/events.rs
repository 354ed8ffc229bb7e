use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::ids::{ApartmentId, BookingId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DomainEvent {
    BookingRequested(BookingRequested),
    BookingConfirmed(BookingConfirmed),
    BookingCancelled(BookingCancelled),
    BookingRescheduled(BookingRescheduled),
}

impl DomainEvent {
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Self::BookingRequested(e) => e.occurred_at,
            Self::BookingConfirmed(e) => e.occurred_at,
            Self::BookingCancelled(e) => e.occurred_at,
            Self::BookingRescheduled(e) => e.occurred_at,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            Self::BookingRequested(_) => "booking.requested",
            Self::BookingConfirmed(_) => "booking.confirmed",
            Self::BookingCancelled(_) => "booking.cancelled",
            Self::BookingRescheduled(_) => "booking.rescheduled",
        }
    }

    pub fn booking_id(&self) -> &BookingId {
        match self {
            Self::BookingRequested(e) => &e.booking_id,
            Self::BookingConfirmed(e) => &e.booking_id,
            Self::BookingCancelled(e) => &e.booking_id,
            Self::BookingRescheduled(e) => &e.booking_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingRequested {
    pub booking_id: BookingId,
    pub apartment_id: ApartmentId,
    pub guest_id: UserId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingConfirmed {
    pub booking_id: BookingId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingCancelled {
    pub booking_id: BookingId,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingRescheduled {
    pub booking_id: BookingId,
    pub previous_check_in: NaiveDate,
    pub previous_check_out: NaiveDate,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub occurred_at: DateTime<Utc>,
}
