use chrono::{DateTime, NaiveDate, Utc};

use stayhub_core::availability;
use stayhub_core::booking::{Booking, BookingFilter, BookingStatus, StayDates};
use stayhub_core::ids::{ApartmentId, BookingId};
use stayhub_core::session::Session;
use stayhub_ports::error::PortError;
use stayhub_ports::outbound::{ApartmentRepository, BookingRepository, EventPublisher};

use crate::error::AppError;

pub struct BookingService<B, A, EP>
where
    B: BookingRepository,
    A: ApartmentRepository,
    EP: EventPublisher,
{
    bookings: B,
    apartments: A,
    events: EP,
}

impl<B, A, EP> BookingService<B, A, EP>
where
    B: BookingRepository,
    A: ApartmentRepository,
    EP: EventPublisher,
{
    pub fn new(bookings: B, apartments: A, events: EP) -> Self {
        Self {
            bookings,
            apartments,
            events,
        }
    }

    /// Fresh snapshot of the bookings holding dates on `apartment_id`.
    pub async fn active_bookings(
        &self,
        apartment_id: &ApartmentId,
        excluding: Option<&BookingId>,
    ) -> Result<Vec<Booking>, AppError> {
        let all = self.bookings.list_for_apartment(apartment_id).await?;
        Ok(availability::active_bookings(&all, apartment_id, excluding)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn is_date_booked(
        &self,
        apartment_id: &ApartmentId,
        date: NaiveDate,
    ) -> Result<bool, AppError> {
        let active = self.active_bookings(apartment_id, None).await?;
        Ok(availability::is_date_booked(date, &active))
    }

    pub async fn booked_days(
        &self,
        apartment_id: &ApartmentId,
        from: NaiveDate,
        days: usize,
    ) -> Result<Vec<NaiveDate>, AppError> {
        let active = self.active_bookings(apartment_id, None).await?;
        Ok(availability::booked_days(from, days, &active))
    }

    /// The booking that blocks `[check_in, check_out)`, if any.
    pub async fn find_conflict(
        &self,
        apartment_id: &ApartmentId,
        check_in: NaiveDate,
        check_out: NaiveDate,
        excluding: Option<&BookingId>,
    ) -> Result<Option<BookingId>, AppError> {
        let active = self.active_bookings(apartment_id, excluding).await?;
        Ok(availability::first_conflict(check_in, check_out, &active).map(|b| b.id().clone()))
    }

    async fn ensure_free(
        &self,
        apartment_id: &ApartmentId,
        stay: StayDates,
        excluding: Option<&BookingId>,
    ) -> Result<(), AppError> {
        match self
            .find_conflict(apartment_id, stay.check_in(), stay.check_out(), excluding)
            .await?
        {
            Some(blocking) => Err(AppError::Unavailable(blocking)),
            None => Ok(()),
        }
    }

    async fn load(&self, booking_id: &BookingId) -> Result<Booking, AppError> {
        self.bookings
            .find_by_id(booking_id)
            .await?
            .ok_or(AppError::Port(PortError::NotFound))
    }

    pub async fn create_booking(
        &self,
        session: &Session,
        apartment_id: &ApartmentId,
        stay: StayDates,
        guests: u32,
        now: DateTime<Utc>,
    ) -> Result<BookingId, AppError> {
        let apartment = self
            .apartments
            .find_by_id(apartment_id)
            .await?
            .ok_or(AppError::Port(PortError::NotFound))?;

        if stay.check_in() < apartment.available_from() {
            return Err(AppError::NotYetAvailable(apartment.available_from()));
        }
        self.ensure_free(apartment_id, stay, None).await?;

        let (booking, events) = Booking::request(&apartment, stay, guests, session, now)?;
        self.bookings.create(&booking).await?;
        self.events.publish(events).await?;

        Ok(booking.id().clone())
    }

    pub async fn reschedule(
        &self,
        session: &Session,
        booking_id: &BookingId,
        stay: StayDates,
        now: DateTime<Utc>,
    ) -> Result<Booking, AppError> {
        let mut booking = self.load(booking_id).await?;
        if !session.is_admin() && !booking.is_owned_by(session.user_id()) {
            return Err(AppError::Forbidden);
        }

        // The booking's current dates must not block its own move.
        self.ensure_free(booking.apartment_id(), stay, Some(booking.id()))
            .await?;

        let events = booking.reschedule(stay, now)?;
        if !events.is_empty() {
            self.bookings.reschedule(&booking).await?;
            self.events.publish(events).await?;
        }
        Ok(booking)
    }

    /// Guests may withdraw their own pending requests. Admins may cancel any
    /// booking but must say why.
    pub async fn cancel(
        &self,
        session: &Session,
        booking_id: &BookingId,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let mut booking = self.load(booking_id).await?;

        if session.is_admin() {
            if reason.as_deref().map_or(true, |r| r.trim().is_empty()) {
                return Err(AppError::ReasonRequired);
            }
        } else if !booking.is_owned_by(session.user_id())
            || booking.status() == BookingStatus::Confirmed
        {
            return Err(AppError::Forbidden);
        }

        let events = booking.cancel(reason, now);
        if !events.is_empty() {
            self.bookings
                .cancel(booking.id(), booking.cancel_reason())
                .await?;
            self.events.publish(events).await?;
        }
        Ok(())
    }

    pub async fn confirm(
        &self,
        session: &Session,
        booking_id: &BookingId,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        if !session.is_admin() {
            return Err(AppError::Forbidden);
        }
        let mut booking = self.load(booking_id).await?;
        let events = booking.confirm(now)?;
        if !events.is_empty() {
            self.bookings.confirm(booking.id()).await?;
            self.events.publish(events).await?;
        }
        Ok(())
    }

    /// Removes a booking record from the guest's history.
    pub async fn delete(&self, session: &Session, booking_id: &BookingId) -> Result<(), AppError> {
        let booking = self.load(booking_id).await?;
        if !session.is_admin() && !booking.is_owned_by(session.user_id()) {
            return Err(AppError::Forbidden);
        }
        self.bookings.delete(booking.id()).await?;
        Ok(())
    }

    pub async fn list_for_user(&self, session: &Session) -> Result<Vec<Booking>, AppError> {
        Ok(self.bookings.list_for_guest(session.user_id()).await?)
    }

    pub async fn list_all(
        &self,
        session: &Session,
        filter: &BookingFilter,
    ) -> Result<Vec<Booking>, AppError> {
        if !session.is_admin() {
            return Err(AppError::Forbidden);
        }
        let all = self.bookings.list_all().await?;
        if filter.is_empty() {
            return Ok(all);
        }
        Ok(filter.apply(all))
    }
}
