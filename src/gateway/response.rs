use super::{
    entities::{NotificationStatus, TransportResponse},
    error::{FailureContext, PushError},
};

/// Response codes that carry notification statuses worth interpreting.
pub const PROCESSABLE_RESPONSES: [u16; 4] = [200, 404, 406, 412];

/// Interprets a gateway response as a delivery outcome.
pub fn classify_response(response: &TransportResponse) -> Result<NotificationStatus, PushError> {
    if PROCESSABLE_RESPONSES.contains(&response.code) {
        classify(response.code, NotificationStatus::from_response(response))
    } else {
        Err(classify_error_code(response.code))
    }
}

/// Maps a processable response code and its statuses to an outcome. Rules
/// are checked most specific first: the same notification status means
/// different things depending on the code and the other statuses.
pub fn classify(code: u16, status: NotificationStatus) -> Result<NotificationStatus, PushError> {
    let failure: Option<fn(FailureContext) -> PushError> = match (
        code,
        status.notification.as_str(),
        status.subscription.as_str(),
    ) {
        (200, "Received" | "Suppressed", _) => None,
        (200, "QueueFull", _) => Some(PushError::QueueFull),
        (404, _, "Expired") => Some(PushError::SubscriptionExpired),
        (406, _, _) => Some(PushError::ThrottlingLimit),
        (412, _, _) => Some(PushError::DeviceDisconnected),
        (_, "Dropped", _) => Some(PushError::Delivery),
        _ => Some(PushError::InvalidResponse),
    };

    match failure {
        None => Ok(status),
        Some(failure) => Err(failure(FailureContext::new(code, Some(status)))),
    }
}

/// Maps a response code the gateway uses to refuse a request.
pub fn classify_error_code(code: u16) -> PushError {
    let message = match code {
        400 => "Bad request",
        401 => "Unauthorized",
        405 => "Method not allowed",
        503 => "Service unavailable",
        _ => "Unknown response code",
    };

    PushError::Http {
        message,
        context: FailureContext::new(code, None),
    }
}
