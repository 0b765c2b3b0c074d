use reqwest::header::HeaderMap;

pub const NOTIFICATION_STATUS_HEADER: &str = "X-NotificationStatus";
pub const SUBSCRIPTION_STATUS_HEADER: &str = "X-SubscriptionStatus";
pub const DEVICE_STATUS_HEADER: &str = "X-DeviceConnectionStatus";

/// Status code and headers of a gateway response.
#[derive(Debug, Clone, Default)]
pub struct TransportResponse {
    pub code: u16,
    pub headers: HeaderMap,
}

impl TransportResponse {
    pub fn new(code: u16, headers: HeaderMap) -> Self {
        Self { code, headers }
    }

    /// First value of the named header, or an empty string when it is
    /// missing or not valid UTF-8.
    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
    }
}

/// Statuses reported by the gateway for a processed notification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationStatus {
    pub notification: String,
    pub subscription: String,
    pub device: String,
}

impl NotificationStatus {
    pub fn new(
        notification: impl Into<String>,
        subscription: impl Into<String>,
        device: impl Into<String>,
    ) -> Self {
        Self {
            notification: notification.into(),
            subscription: subscription.into(),
            device: device.into(),
        }
    }

    pub fn from_response(response: &TransportResponse) -> Self {
        Self::new(
            response.header(NOTIFICATION_STATUS_HEADER),
            response.header(SUBSCRIPTION_STATUS_HEADER),
            response.header(DEVICE_STATUS_HEADER),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::test_headers;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_missing_headers_default_to_empty() {
        let response = TransportResponse::new(200, HeaderMap::new());
        let status = NotificationStatus::from_response(&response);

        assert_eq!(status, NotificationStatus::new("", "", ""));
    }

    #[test]
    fn test_headers_are_looked_up_case_insensitively() {
        let headers = test_headers(&[
            ("x-notificationstatus", "Received"),
            ("X-SUBSCRIPTIONSTATUS", "Active"),
        ]);
        let response = TransportResponse::new(200, headers);

        let status = NotificationStatus::from_response(&response);
        assert_eq!(status, NotificationStatus::new("Received", "Active", ""));
    }

    #[test]
    fn test_first_value_wins() {
        let mut headers = test_headers(&[(DEVICE_STATUS_HEADER, "Connected")]);
        let name = headers.keys().next().unwrap().clone();
        headers.append(name, HeaderValue::from_static("Inactive"));
        let response = TransportResponse::new(200, headers);

        assert_eq!(response.header(DEVICE_STATUS_HEADER), "Connected");
    }

    #[test]
    fn test_non_utf8_header_is_empty() {
        let mut headers = test_headers(&[(NOTIFICATION_STATUS_HEADER, "")]);
        let name = headers.keys().next().unwrap().clone();
        headers.insert(name, HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap());
        let response = TransportResponse::new(200, headers);

        assert_eq!(response.header(NOTIFICATION_STATUS_HEADER), "");
    }
}
