pub mod apartment_service;
pub mod booking_service;
pub mod error;
