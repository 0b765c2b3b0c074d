use thiserror::Error;

use super::entities::NotificationStatus;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Failed to initialize transport: {0}")]
    InitializationFailed(String),

    #[error("Failed to send request: {0}")]
    RequestFailed(String),
}

/// Diagnostics attached to every failure derived from a gateway response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureContext {
    pub response_code: u16,
    /// Status triple read from the response. Absent on the error path.
    pub status: Option<NotificationStatus>,
}

impl FailureContext {
    pub fn new(response_code: u16, status: Option<NotificationStatus>) -> Self {
        Self {
            response_code,
            status,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PushError {
    /// Processable response code, but a status combination the protocol does not define.
    #[error("Invalid notification status")]
    InvalidResponse(FailureContext),

    /// The gateway refused to process the request.
    #[error("{message}")]
    Http {
        message: &'static str,
        context: FailureContext,
    },

    /// The gateway dropped the notification without naming a reason.
    #[error("Dropped for unknown reason")]
    Delivery(FailureContext),

    /// The channel URI is no longer valid and should be forgotten.
    #[error("Subscription expired")]
    SubscriptionExpired(FailureContext),

    #[error("Queue full")]
    QueueFull(FailureContext),

    #[error("Device disconnected")]
    DeviceDisconnected(FailureContext),

    /// Per-day limit for unauthenticated pushers, or too many notifications per second.
    #[error("Throttling limit hit")]
    ThrottlingLimit(FailureContext),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl PushError {
    /// Response diagnostics, if the failure came from a gateway response.
    pub fn context(&self) -> Option<&FailureContext> {
        match self {
            PushError::InvalidResponse(context)
            | PushError::Http { context, .. }
            | PushError::Delivery(context)
            | PushError::SubscriptionExpired(context)
            | PushError::QueueFull(context)
            | PushError::DeviceDisconnected(context)
            | PushError::ThrottlingLimit(context) => Some(context),
            PushError::Transport(_) => None,
        }
    }

    pub fn response_code(&self) -> Option<u16> {
        self.context().map(|context| context.response_code)
    }

    /// The gateway understood the request but the notification will never be delivered.
    pub fn is_delivery_failure(&self) -> bool {
        matches!(
            self,
            PushError::Delivery(_)
                | PushError::SubscriptionExpired(_)
                | PushError::QueueFull(_)
                | PushError::DeviceDisconnected(_)
                | PushError::ThrottlingLimit(_)
        )
    }

    /// Sending the same notification again later may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            PushError::QueueFull(_) | PushError::ThrottlingLimit(_) => true,
            PushError::Http { context, .. } => context.response_code == 503,
            _ => false,
        }
    }

    pub fn is_subscription_expired(&self) -> bool {
        matches!(self, PushError::SubscriptionExpired(_))
    }
}
