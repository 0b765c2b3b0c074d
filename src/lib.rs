//! Client for the Microsoft Push Notification Service (MPNS).
//!
//! Notifications are formatted with [`Notification::raw`], [`Notification::toast`]
//! or [`Notification::tile`] and sent with a [`Pusher`], which reports the
//! gateway's answer as a [`NotificationStatus`] or a [`PushError`].

pub mod gateway;
pub mod notifications;
pub mod pusher;
pub mod settings;

pub use gateway::{
    Transport,
    dummy::DummyTransport,
    entities::{NotificationStatus, TransportResponse},
    error::{FailureContext, PushError, TransportError},
    https::HttpsTransport,
};
pub use notifications::{
    FormattingError, Notification, NotificationKind, Priority, RawOptions, TileOptions,
    ToastOptions,
};
pub use pusher::Pusher;
pub use settings::{Settings, TransportSettings};
