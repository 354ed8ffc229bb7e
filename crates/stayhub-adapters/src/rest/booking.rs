use async_trait::async_trait;

use stayhub_core::booking::Booking;
use stayhub_core::ids::{ApartmentId, BookingId, UserId};
use stayhub_ports::error::PortError;
use stayhub_ports::outbound::BookingRepository;

use super::wire::{BookingDto, CancelDto, RescheduleDto};
use super::RestClient;

impl RestClient {
    async fn list_bookings(&self, query: &[(&str, String)]) -> Result<Vec<Booking>, PortError> {
        let request = self.http.get(self.bookings_url("/")).query(query);
        let dtos: Vec<BookingDto> = self.fetch(request).await?;
        decode_listing(dtos)
    }
}

/// A listing with any undecodable booking is rejected whole: a missing
/// booking would read as free nights.
fn decode_listing(dtos: Vec<BookingDto>) -> Result<Vec<Booking>, PortError> {
    dtos.into_iter()
        .map(|dto| {
            let id = dto.id.clone();
            Booking::try_from(dto).map_err(|e| {
                tracing::warn!(booking_id = %id, error = %e, "undecodable booking in listing");
                e
            })
        })
        .collect()
}

#[async_trait]
impl BookingRepository for RestClient {
    async fn list_for_apartment(
        &self,
        apartment_id: &ApartmentId,
    ) -> Result<Vec<Booking>, PortError> {
        let bookings = self
            .list_bookings(&[("apartmentId", apartment_id.to_string())])
            .await?;
        // Filter again in case the service ignores the query.
        Ok(bookings
            .into_iter()
            .filter(|b| b.apartment_id() == apartment_id)
            .collect())
    }

    async fn list_for_guest(&self, guest_id: &UserId) -> Result<Vec<Booking>, PortError> {
        let bookings = self
            .list_bookings(&[("userId", guest_id.to_string())])
            .await?;
        Ok(bookings
            .into_iter()
            .filter(|b| b.guest_id() == Some(guest_id))
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Booking>, PortError> {
        self.list_bookings(&[]).await
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, PortError> {
        let request = self.http.get(self.bookings_url(&format!("/{id}")));
        match self.fetch_optional::<BookingDto>(request).await? {
            Some(dto) => Ok(Some(Booking::try_from(dto)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, booking: &Booking) -> Result<(), PortError> {
        let request = self
            .http
            .post(self.bookings_url(""))
            .json(&BookingDto::from(booking));
        self.send(request).await?;
        tracing::info!(booking_id = %booking.id(), apartment_id = %booking.apartment_id(), "booking created");
        Ok(())
    }

    async fn reschedule(&self, booking: &Booking) -> Result<(), PortError> {
        let request = self
            .http
            .post(self.bookings_url(&format!("/{}/reschedule", booking.id())))
            .json(&RescheduleDto::from(booking));
        self.send(request).await?;
        Ok(())
    }

    async fn confirm(&self, id: &BookingId) -> Result<(), PortError> {
        let request = self.http.post(self.bookings_url(&format!("/{id}/confirm")));
        self.send(request).await?;
        Ok(())
    }

    async fn cancel(&self, id: &BookingId, reason: Option<&str>) -> Result<(), PortError> {
        let request = self
            .http
            .post(self.bookings_url(&format!("/{id}/cancel")))
            .json(&CancelDto {
                cancel_reason: reason,
            });
        self.send(request).await?;
        Ok(())
    }

    async fn delete(&self, id: &BookingId) -> Result<(), PortError> {
        let request = self.http.delete(self.bookings_url(&format!("/{id}")));
        self.send(request).await?;
        Ok(())
    }
}
