pub mod filter;
pub mod status;
pub mod stay;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::apartment::Apartment;
use crate::error::DomainError;
use crate::events::{
    BookingCancelled, BookingConfirmed, BookingRequested, BookingRescheduled, DomainEvent,
};
use crate::ids::{ApartmentId, BookingId, UserId};
use crate::session::Session;

pub use filter::BookingFilter;
pub use status::BookingStatus;
pub use stay::StayDates;

/// Listing details copied onto the booking when it is made.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApartmentSummary {
    pub title: String,
    pub address: String,
    pub image: Option<String>,
    pub nightly_price: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GuestContact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Every field of a booking as the booking service stores it.
///
/// Dates are taken as-is: a record is not required to describe a valid stay.
/// Older records carry neither the guest nor the creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: BookingId,
    pub apartment_id: ApartmentId,
    pub guest_id: Option<UserId>,
    pub apartment: ApartmentSummary,
    pub contact: GuestContact,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub nights: u32,
    pub total_price: f64,
    pub status: BookingStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub cancel_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    id: BookingId,
    apartment_id: ApartmentId,
    guest_id: Option<UserId>,
    apartment: ApartmentSummary,
    contact: GuestContact,
    check_in: NaiveDate,
    check_out: NaiveDate,
    guests: u32,
    nights: u32,
    total_price: f64,
    status: BookingStatus,
    created_at: Option<DateTime<Utc>>,
    cancel_reason: Option<String>,
}

impl Booking {
    pub fn request(
        apartment: &Apartment,
        stay: StayDates,
        guests: u32,
        guest: &Session,
        now: DateTime<Utc>,
    ) -> Result<(Self, Vec<DomainEvent>), DomainError> {
        if guests == 0 {
            return Err(DomainError::InvalidGuestCount);
        }
        let id = BookingId::new();
        let nights = stay.nights();
        let booking = Self {
            id: id.clone(),
            apartment_id: apartment.id().clone(),
            guest_id: Some(guest.user_id().clone()),
            apartment: ApartmentSummary {
                title: apartment.title().to_string(),
                address: apartment.address().to_string(),
                image: apartment.cover_image().map(str::to_string),
                nightly_price: apartment.price(),
            },
            contact: GuestContact {
                name: Some(guest.name().to_string()),
                email: Some(guest.email().to_string()),
                phone: guest.phone().map(str::to_string),
            },
            check_in: stay.check_in(),
            check_out: stay.check_out(),
            guests,
            nights,
            total_price: apartment.price() * f64::from(nights),
            status: BookingStatus::Pending,
            created_at: Some(now),
            cancel_reason: None,
        };
        let events = vec![DomainEvent::BookingRequested(BookingRequested {
            booking_id: id,
            apartment_id: booking.apartment_id.clone(),
            guest_id: guest.user_id().clone(),
            check_in: booking.check_in,
            check_out: booking.check_out,
            occurred_at: now,
        })];
        Ok((booking, events))
    }

    pub fn confirm(&mut self, now: DateTime<Utc>) -> Result<Vec<DomainEvent>, DomainError> {
        match self.status {
            BookingStatus::Cancelled => Err(DomainError::BookingCancelled),
            BookingStatus::Confirmed => Ok(vec![]),
            BookingStatus::Pending => {
                self.status = BookingStatus::Confirmed;
                Ok(vec![DomainEvent::BookingConfirmed(BookingConfirmed {
                    booking_id: self.id.clone(),
                    occurred_at: now,
                })])
            }
        }
    }

    pub fn cancel(&mut self, reason: Option<String>, now: DateTime<Utc>) -> Vec<DomainEvent> {
        if self.status == BookingStatus::Cancelled {
            return vec![];
        }
        let reason = reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        self.status = BookingStatus::Cancelled;
        self.cancel_reason = reason.clone();
        vec![DomainEvent::BookingCancelled(BookingCancelled {
            booking_id: self.id.clone(),
            reason,
            occurred_at: now,
        })]
    }

    pub fn reschedule(
        &mut self,
        stay: StayDates,
        now: DateTime<Utc>,
    ) -> Result<Vec<DomainEvent>, DomainError> {
        if self.status == BookingStatus::Cancelled {
            return Err(DomainError::BookingCancelled);
        }
        if stay.check_in() == self.check_in && stay.check_out() == self.check_out {
            return Ok(vec![]);
        }
        let event = BookingRescheduled {
            booking_id: self.id.clone(),
            previous_check_in: self.check_in,
            previous_check_out: self.check_out,
            check_in: stay.check_in(),
            check_out: stay.check_out(),
            occurred_at: now,
        };
        self.check_in = stay.check_in();
        self.check_out = stay.check_out();
        self.nights = stay.nights();
        self.total_price = self.apartment.nightly_price * f64::from(self.nights);
        Ok(vec![DomainEvent::BookingRescheduled(event)])
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// A booking without a recorded guest belongs to nobody.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.guest_id.as_ref() == Some(user_id)
    }

    pub fn id(&self) -> &BookingId {
        &self.id
    }

    pub fn apartment_id(&self) -> &ApartmentId {
        &self.apartment_id
    }

    pub fn guest_id(&self) -> Option<&UserId> {
        self.guest_id.as_ref()
    }

    pub fn apartment(&self) -> &ApartmentSummary {
        &self.apartment
    }

    pub fn contact(&self) -> &GuestContact {
        &self.contact
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn guests(&self) -> u32 {
        self.guests
    }

    pub fn nights(&self) -> u32 {
        self.nights
    }

    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn cancel_reason(&self) -> Option<&str> {
        self.cancel_reason.as_deref()
    }

    pub fn to_record(&self) -> BookingRecord {
        BookingRecord {
            id: self.id.clone(),
            apartment_id: self.apartment_id.clone(),
            guest_id: self.guest_id.clone(),
            apartment: self.apartment.clone(),
            contact: self.contact.clone(),
            check_in: self.check_in,
            check_out: self.check_out,
            guests: self.guests,
            nights: self.nights,
            total_price: self.total_price,
            status: self.status,
            created_at: self.created_at,
            cancel_reason: self.cancel_reason.clone(),
        }
    }
}

impl From<BookingRecord> for Booking {
    fn from(r: BookingRecord) -> Self {
        Self {
            id: r.id,
            apartment_id: r.apartment_id,
            guest_id: r.guest_id,
            apartment: r.apartment,
            contact: r.contact,
            check_in: r.check_in,
            check_out: r.check_out,
            guests: r.guests,
            nights: r.nights,
            total_price: r.total_price,
            status: r.status,
            created_at: r.created_at,
            cancel_reason: r.cancel_reason,
        }
    }
}
