pub mod entities;
pub mod error;
mod formatter;

pub use entities::{Notification, NotificationKind, Priority, RawOptions, TileOptions, ToastOptions};
pub use error::FormattingError;

pub const NOTIFICATION_CLASS_HEADER: &str = "X-NotificationClass";
pub const MESSAGE_ID_HEADER: &str = "X-MessageID";
pub const TARGET_HEADER: &str = "X-WindowsPhone-Target";
