pub mod error;
pub mod outbound;
