mod apartment;
mod booking;
mod wire;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use stayhub_ports::error::PortError;

/// Base URLs of the external services, e.g. `https://localhost:7221`.
#[derive(Debug, Clone)]
pub struct RestConfig {
    pub booking_url: String,
    pub apartment_url: String,
    pub timeout: Duration,
}

/// HTTP client for the booking and apartment services.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    booking_url: String,
    apartment_url: String,
}

impl RestClient {
    pub fn new(config: &RestConfig) -> Result<Self, PortError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PortError::Connection(e.to_string()))?;
        Ok(Self {
            http,
            booking_url: config.booking_url.trim_end_matches('/').to_string(),
            apartment_url: config.apartment_url.trim_end_matches('/').to_string(),
        })
    }

    fn bookings_url(&self, path: &str) -> String {
        format!("{}/api/bookings{}", self.booking_url, path)
    }

    fn apartments_url(&self, path: &str) -> String {
        format!("{}/api/apartment{}", self.apartment_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, PortError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "request to remote service failed");
            PortError::Connection(e.to_string())
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PortError::NotFound);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), message = %message, "remote service error");
            return Err(PortError::Remote {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, PortError> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| PortError::Decode(e.to_string()))
    }

    /// Like [`Self::fetch`], but a 404 means "no such entity".
    async fn fetch_optional<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Option<T>, PortError> {
        match self.fetch(request).await {
            Ok(value) => Ok(Some(value)),
            Err(PortError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(booking_url: &str) -> RestClient {
        RestClient::new(&RestConfig {
            booking_url: booking_url.into(),
            apartment_url: "http://apartments.local/".into(),
            timeout: Duration::from_secs(1),
        })
        .unwrap()
    }

    #[test]
    fn urls_drop_trailing_slash_from_base() {
        let c = client("https://localhost:7221/");
        assert_eq!(c.bookings_url("/"), "https://localhost:7221/api/bookings/");
        assert_eq!(
            c.bookings_url("/abc/confirm"),
            "https://localhost:7221/api/bookings/abc/confirm"
        );
        assert_eq!(c.apartments_url("/"), "http://apartments.local/api/apartment/");
        assert_eq!(
            c.apartments_url("/abc"),
            "http://apartments.local/api/apartment/abc"
        );
    }

    #[tokio::test]
    async fn unreachable_service_is_connection_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let c = client("http://127.0.0.1:9");
        let result: Result<serde_json::Value, _> =
            c.fetch(c.http.get(c.bookings_url("/"))).await;
        assert!(matches!(result, Err(PortError::Connection(_))));
    }
}
