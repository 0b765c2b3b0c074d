use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::info;

use super::{
    Transport,
    entities::{
        DEVICE_STATUS_HEADER, NOTIFICATION_STATUS_HEADER, SUBSCRIPTION_STATUS_HEADER,
        TransportResponse,
    },
    error::TransportError,
};
use crate::notifications::Notification;

/// Logs notifications instead of sending them and reports every one as received.
pub struct DummyTransport;

#[async_trait]
impl Transport for DummyTransport {
    async fn post(&self, notification: &Notification) -> Result<TransportResponse, TransportError> {
        info!(
            "Notification to {}: {}",
            notification.target_uri(),
            notification.body().unwrap_or_default()
        );

        let mut headers = HeaderMap::new();
        headers.insert(NOTIFICATION_STATUS_HEADER, HeaderValue::from_static("Received"));
        headers.insert(SUBSCRIPTION_STATUS_HEADER, HeaderValue::from_static("Active"));
        headers.insert(DEVICE_STATUS_HEADER, HeaderValue::from_static("Connected"));

        Ok(TransportResponse::new(200, headers))
    }
}
