use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::{
    gateway::{
        Transport,
        entities::NotificationStatus,
        error::{PushError, TransportError},
        https::HttpsTransport,
        response::classify_response,
    },
    notifications::Notification,
    settings::TransportSettings,
};

/// Sends notifications to the push gateway, one request per notification.
pub struct Pusher<T: Transport> {
    transport: Arc<T>,
}

impl<T: Transport> Clone for Pusher<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
        }
    }
}

impl Pusher<HttpsTransport> {
    pub fn https(settings: &TransportSettings) -> Result<Self, TransportError> {
        let transport = HttpsTransport::from_settings(settings)?;
        Ok(Self::new(Arc::new(transport)))
    }
}

impl<T: Transport> Pusher<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// Send the notification and interpret the gateway's answer. Fails if the
    /// gateway rejected the request, the response could not be interpreted,
    /// or the notification will never be delivered.
    #[instrument(skip_all, fields(uri = %notification.target_uri()))]
    pub async fn send(&self, notification: &Notification) -> Result<NotificationStatus, PushError> {
        debug!("Sending request");
        let response = self.transport.post(notification).await?;
        debug!("Response code: {}", response.code);

        let outcome = classify_response(&response);
        let status = match &outcome {
            Ok(status) => Some(status),
            Err(err) => err.context().and_then(|context| context.status.as_ref()),
        };
        if let Some(status) = status {
            debug!("Notification {}", status.notification);
            debug!("Subscription {}", status.subscription);
            debug!("Device {}", status.device);
        }
        if let Err(err) = &outcome {
            warn!(
                code = response.code,
                status = ?status,
                "Notification not accepted: {}",
                err
            );
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{
        MockTransport, dummy::DummyTransport, entities::TransportResponse, test_headers,
    };
    use crate::notifications::{RawOptions, ToastOptions};

    const URI: &str = "http://sn1.notify.live.net/throttledthirdparty/01.00/AQG";

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn toast() -> Notification {
        Notification::toast(
            URI,
            ToastOptions {
                text1: Some("hi".to_string()),
                ..Default::default()
            },
        )
        .unwrap()
    }

    fn response(code: u16, notification: &str, subscription: &str, device: &str) -> TransportResponse {
        TransportResponse::new(
            code,
            test_headers(&[
                ("X-NotificationStatus", notification),
                ("X-SubscriptionStatus", subscription),
                ("X-DeviceConnectionStatus", device),
            ]),
        )
    }

    #[tokio::test]
    async fn test_send_received() {
        init_tracing();

        let mut mock_transport = MockTransport::new();
        mock_transport
            .expect_post()
            .once()
            .withf(|notification: &Notification| {
                notification.target_uri().as_str() == URI
                    && notification.body().is_some_and(|body| body.contains("<wp:Text1>hi</wp:Text1>"))
            })
            .returning(|_| Ok(response(200, "Received", "Active", "Connected")));

        let pusher = Pusher::new(Arc::new(mock_transport));
        let status = pusher.send(&toast()).await.unwrap();

        assert_eq!(
            status,
            NotificationStatus::new("Received", "Active", "Connected")
        );
    }

    #[tokio::test]
    async fn test_send_subscription_expired() {
        let mut mock_transport = MockTransport::new();
        mock_transport
            .expect_post()
            .once()
            .returning(|_| Ok(response(404, "Dropped", "Expired", "Connected")));

        let pusher = Pusher::new(Arc::new(mock_transport));
        let err = pusher.send(&toast()).await.unwrap_err();

        assert!(err.is_subscription_expired());
        assert!(err.is_delivery_failure());
        assert_eq!(err.response_code(), Some(404));
        assert_eq!(
            err.context().and_then(|context| context.status.clone()),
            Some(NotificationStatus::new("Dropped", "Expired", "Connected"))
        );
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_statuses_are_logged_for_failures() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut mock_transport = MockTransport::new();
        mock_transport
            .expect_post()
            .once()
            .returning(|_| Ok(response(412, "Dropped", "Active", "Inactive")));

        let pusher = Pusher::new(Arc::new(mock_transport));
        let result = pusher.send(&toast()).await;
        assert!(matches!(result, Err(PushError::DeviceDisconnected(_))));

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Notification Dropped"));
        assert!(output.contains("Subscription Active"));
        assert!(output.contains("Device Inactive"));
        assert!(output.contains("Notification not accepted: Device disconnected"));
    }

    #[tokio::test]
    async fn test_send_rejected_request() {
        let mut mock_transport = MockTransport::new();
        mock_transport
            .expect_post()
            .once()
            .returning(|_| Ok(TransportResponse::new(401, Default::default())));

        let pusher = Pusher::new(Arc::new(mock_transport));
        let result = pusher.send(&toast()).await;

        assert!(matches!(
            result,
            Err(PushError::Http {
                message: "Unauthorized",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_send_transport_failure() {
        let mut mock_transport = MockTransport::new();
        mock_transport
            .expect_post()
            .once()
            .returning(|_| Err(TransportError::RequestFailed("connection reset".to_string())));

        let pusher = Pusher::new(Arc::new(mock_transport));
        let result = pusher.send(&toast()).await;

        assert_eq!(
            result,
            Err(PushError::Transport(TransportError::RequestFailed(
                "connection reset".to_string()
            )))
        );
    }

    #[tokio::test]
    async fn test_each_send_posts_once() {
        let mut mock_transport = MockTransport::new();
        mock_transport
            .expect_post()
            .times(2)
            .returning(|_| Ok(response(406, "Dropped", "Active", "Connected")));

        let pusher = Pusher::new(Arc::new(mock_transport));
        let notification = Notification::raw(URI, RawOptions::default()).unwrap();

        for _ in 0..2 {
            let result = pusher.send(&notification).await;
            assert!(matches!(result, Err(PushError::ThrottlingLimit(_))));
        }
    }

    #[tokio::test]
    async fn test_concurrent_sends() {
        let pusher = Pusher::new(Arc::new(DummyTransport));

        let handles = (0..4)
            .map(|_| {
                let pusher = pusher.clone();
                tokio::spawn(async move { pusher.send(&toast()).await })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            let status = handle.await.unwrap().unwrap();
            assert_eq!(status.notification, "Received");
        }
    }
}
