use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid id: {0}")]
    InvalidId(String),
    #[error("check-out must be after check-in")]
    InvalidStayPeriod,
    #[error("a booking needs at least one guest")]
    InvalidGuestCount,
    #[error("booking is cancelled")]
    BookingCancelled,
    #[error("invalid apartment: {0}")]
    InvalidApartment(String),
}
