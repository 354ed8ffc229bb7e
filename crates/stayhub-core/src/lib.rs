pub mod apartment;
pub mod availability;
pub mod booking;
pub mod error;
pub mod events;
pub mod ids;
pub mod session;
