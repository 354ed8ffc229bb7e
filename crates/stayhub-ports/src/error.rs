use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortError {
    #[error("not found")]
    NotFound,
    #[error("connection error: {0}")]
    Connection(String),
    #[error("remote service returned {status}: {message}")]
    Remote { status: u16, message: String },
    #[error("could not decode response: {0}")]
    Decode(String),
}
