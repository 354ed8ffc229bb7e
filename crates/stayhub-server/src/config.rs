use std::{env, fmt::Display, str::FromStr, time::Duration};

use stayhub_adapters::rest::RestConfig;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
#[error("invalid value for {key}: {message}")]
pub struct ConfigError {
    key: &'static str,
    message: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub booking_api_url: String,
    pub apartment_api_url: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            booking_api_url: try_load("STAYHUB_BOOKING_API_URL", "https://localhost:7221")?,
            apartment_api_url: try_load("STAYHUB_APARTMENT_API_URL", "https://localhost:7147")?,
            request_timeout: Duration::from_millis(try_load("STAYHUB_REQUEST_TIMEOUT_MS", "10000")?),
        })
    }

    pub fn rest(&self) -> RestConfig {
        RestConfig {
            booking_url: self.booking_api_url.clone(),
            apartment_url: self.apartment_api_url.clone(),
            timeout: self.request_timeout,
        }
    }
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError {
            key,
            message: e.to_string(),
        }
    })
}
