use chrono::NaiveDate;
use stayhub_core::error::DomainError;
use stayhub_core::ids::BookingId;
use stayhub_ports::error::PortError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
    #[error("port error: {0}")]
    Port(#[from] PortError),
    #[error("dates overlap booking {0}")]
    Unavailable(BookingId),
    #[error("apartment is not available before {0}")]
    NotYetAvailable(NaiveDate),
    #[error("not allowed for this user")]
    Forbidden,
    #[error("a cancellation reason is required")]
    ReasonRequired,
}
