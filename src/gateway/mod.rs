pub mod dummy;
pub mod entities;
pub mod error;
pub mod https;
pub mod response;

use async_trait::async_trait;

use crate::notifications::Notification;
use entities::TransportResponse;
use error::TransportError;

/// Performs the HTTP exchange with the push gateway.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// POSTs the notification's headers and body to its target URI.
    async fn post(&self, notification: &Notification) -> Result<TransportResponse, TransportError>;
}

#[cfg(test)]
pub(crate) fn test_headers(pairs: &[(&str, &str)]) -> reqwest::header::HeaderMap {
    use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        headers.insert(
            HeaderName::from_bytes(name.as_bytes()).unwrap(),
            HeaderValue::from_str(value).unwrap(),
        );
    }
    headers
}
