use async_trait::async_trait;

use stayhub_core::apartment::Apartment;
use stayhub_core::booking::Booking;
use stayhub_core::events::DomainEvent;
use stayhub_core::ids::{ApartmentId, BookingId, UserId};

use crate::error::PortError;

/// The external booking service. It owns booking state and is the final
/// authority on conflicts; each call reflects its current view.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn list_for_apartment(&self, apartment_id: &ApartmentId)
        -> Result<Vec<Booking>, PortError>;
    async fn list_for_guest(&self, guest_id: &UserId) -> Result<Vec<Booking>, PortError>;
    async fn list_all(&self) -> Result<Vec<Booking>, PortError>;
    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, PortError>;
    async fn create(&self, booking: &Booking) -> Result<(), PortError>;
    /// Stores new stay dates (and the repriced totals) for an existing booking.
    async fn reschedule(&self, booking: &Booking) -> Result<(), PortError>;
    async fn confirm(&self, id: &BookingId) -> Result<(), PortError>;
    async fn cancel(&self, id: &BookingId, reason: Option<&str>) -> Result<(), PortError>;
    async fn delete(&self, id: &BookingId) -> Result<(), PortError>;
}

#[async_trait]
pub trait ApartmentRepository: Send + Sync {
    async fn find_by_id(&self, id: &ApartmentId) -> Result<Option<Apartment>, PortError>;
    async fn list_all(&self) -> Result<Vec<Apartment>, PortError>;
    async fn create(&self, apartment: &Apartment) -> Result<(), PortError>;
    /// Replaces an existing listing; `NotFound` when the id is unknown.
    async fn update(&self, apartment: &Apartment) -> Result<(), PortError>;
}

#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), PortError>;
}
