use async_trait::async_trait;
use reqwest::{Client, Identity};
use std::{fs::File, io::Read, path::Path, time::Duration};
use tracing::instrument;

use super::{Transport, entities::TransportResponse, error::TransportError};
use crate::{notifications::Notification, settings::TransportSettings};

/// HTTPS transport to the push gateway, optionally authenticating with a
/// client certificate.
pub struct HttpsTransport {
    client: Client,
}

impl HttpsTransport {
    /// Create a transport from PEM data holding the client certificate and
    /// its private key. Without a certificate only unauthenticated pushing
    /// is possible.
    pub fn new(pem: Option<&[u8]>) -> Result<Self, TransportError> {
        Self::build(pem, None)
    }

    /// Create a transport from a PEM file holding the client certificate and its private key
    pub fn from_file<P: AsRef<Path>>(pem_path: P) -> Result<Self, TransportError> {
        let pem = read_pem(pem_path)?;
        Self::new(Some(&pem))
    }

    pub fn from_settings(settings: &TransportSettings) -> Result<Self, TransportError> {
        let pem = settings
            .client_certificate
            .as_ref()
            .map(read_pem)
            .transpose()?;
        let timeout = settings.timeout_secs.map(Duration::from_secs);

        Self::build(pem.as_deref(), timeout)
    }

    fn build(pem: Option<&[u8]>, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = Client::builder().use_rustls_tls().http1_title_case_headers();

        if let Some(pem) = pem {
            let identity = Identity::from_pem(pem)
                .map_err(|err| TransportError::InitializationFailed(err.to_string()))?;
            builder = builder.identity(identity);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|err| TransportError::InitializationFailed(err.to_string()))?;

        Ok(Self { client })
    }
}

fn read_pem<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, TransportError> {
    let mut pem = Vec::new();
    File::open(path)
        .map_err(|err| TransportError::InitializationFailed(err.to_string()))?
        .read_to_end(&mut pem)
        .map_err(|err| TransportError::InitializationFailed(err.to_string()))?;
    Ok(pem)
}

#[async_trait]
impl Transport for HttpsTransport {
    #[instrument(skip_all)]
    async fn post(&self, notification: &Notification) -> Result<TransportResponse, TransportError> {
        let mut request = self
            .client
            .post(notification.target_uri().clone())
            .headers(notification.headers().clone());
        if let Some(body) = notification.body() {
            request = request.body(body.to_string());
        }

        let response = request.send().await?;

        Ok(TransportResponse::new(
            response.status().as_u16(),
            response.headers().clone(),
        ))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::RequestFailed(err.to_string())
    }
}
