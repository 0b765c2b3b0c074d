use reqwest::{Url, header::HeaderMap};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};
use uuid::Uuid;

use super::error::FormattingError;

/// Delivery priority requested from the gateway.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Priority {
    #[default]
    #[serde(rename = "deliver_immediately")]
    DeliverImmediately,
    #[serde(rename = "deliver_within_450_s")]
    DeliverWithin450S,
    #[serde(rename = "deliver_within_950_s")]
    DeliverWithin950S,
}

impl Priority {
    pub const ALL: [Priority; 3] = [
        Priority::DeliverImmediately,
        Priority::DeliverWithin450S,
        Priority::DeliverWithin950S,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::DeliverImmediately => "deliver_immediately",
            Priority::DeliverWithin450S => "deliver_within_450_s",
            Priority::DeliverWithin950S => "deliver_within_950_s",
        }
    }
}

impl FromStr for Priority {
    type Err = FormattingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|priority| priority.as_str() == value)
            .ok_or_else(|| FormattingError::InvalidPriority(value.to_string()))
    }
}

impl TryFrom<String> for Priority {
    type Error = FormattingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The closed set of notification formats the gateway understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Raw,
    Toast,
    Tile,
}

impl NotificationKind {
    /// Value of the `X-NotificationClass` header for this kind and priority.
    pub fn class_header(&self, priority: Priority) -> &'static str {
        use Priority::*;

        match (self, priority) {
            (NotificationKind::Raw, DeliverImmediately) => "3",
            (NotificationKind::Raw, DeliverWithin450S) => "13",
            (NotificationKind::Raw, DeliverWithin950S) => "23",
            (NotificationKind::Toast, DeliverImmediately) => "2",
            (NotificationKind::Toast, DeliverWithin450S) => "12",
            (NotificationKind::Toast, DeliverWithin950S) => "22",
            (NotificationKind::Tile, DeliverImmediately) => "1",
            (NotificationKind::Tile, DeliverWithin450S) => "11",
            (NotificationKind::Tile, DeliverWithin950S) => "21",
        }
    }

    /// Value of the `X-WindowsPhone-Target` header, if the kind declares one.
    pub fn target(&self) -> Option<&'static str> {
        match self {
            NotificationKind::Raw => None,
            NotificationKind::Toast => Some("toast"),
            NotificationKind::Tile => Some("token"),
        }
    }

    /// Root element of the XML envelope. Raw notifications carry no envelope.
    pub(super) fn xml_root(&self) -> Option<&'static str> {
        match self {
            NotificationKind::Raw => None,
            NotificationKind::Toast => Some("Toast"),
            NotificationKind::Tile => Some("Tile"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RawOptions {
    pub priority: Priority,
    pub message_id: Option<Uuid>,
    /// Opaque payload, interpreted only by the receiving application.
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ToastOptions {
    pub priority: Priority,
    pub message_id: Option<Uuid>,
    /// Title of the toast
    pub text1: Option<String>,
    /// Content of the toast
    pub text2: Option<String>,
    /// Deep link parameters into an application page
    pub param: Option<String>,
    /// Path to a sound file played on arrival
    pub sound: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TileOptions {
    pub priority: Priority,
    pub message_id: Option<Uuid>,
    pub title: Option<String>,
    pub count: Option<String>,
    /// URI of the tile background image
    pub background: Option<String>,
}

/// A fully formatted request, ready to be posted to the device's channel URI.
#[derive(Debug, Clone)]
pub struct Notification {
    pub(super) kind: NotificationKind,
    pub(super) target_uri: Url,
    pub(super) headers: HeaderMap,
    pub(super) body: Option<String>,
}

impl Notification {
    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Target as parsed by [`Url::parse`], so it is normalized: a URI
    /// without a path gains a trailing `/`.
    pub fn target_uri(&self) -> &Url {
        &self.target_uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}
