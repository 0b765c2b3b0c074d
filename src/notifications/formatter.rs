use reqwest::{
    Url,
    header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use uuid::Uuid;

use super::{
    MESSAGE_ID_HEADER, NOTIFICATION_CLASS_HEADER, TARGET_HEADER,
    entities::{Notification, NotificationKind, Priority, RawOptions, TileOptions, ToastOptions},
    error::FormattingError,
};

impl Notification {
    /// Formats a raw notification. Its body is passed through untouched.
    pub fn raw(uri: &str, options: RawOptions) -> Result<Self, FormattingError> {
        Self::format(
            NotificationKind::Raw,
            uri,
            options.priority,
            options.message_id,
            options.body,
        )
    }

    /// Formats a toast notification.
    pub fn toast(uri: &str, options: ToastOptions) -> Result<Self, FormattingError> {
        let body = xml_envelope(
            NotificationKind::Toast,
            &[
                ("Text1", options.text1.as_deref()),
                ("Text2", options.text2.as_deref()),
                ("Param", options.param.as_deref()),
                ("Sound", options.sound.as_deref()),
            ],
        );

        Self::format(
            NotificationKind::Toast,
            uri,
            options.priority,
            options.message_id,
            body,
        )
    }

    /// Formats a tile notification.
    pub fn tile(uri: &str, options: TileOptions) -> Result<Self, FormattingError> {
        let body = xml_envelope(
            NotificationKind::Tile,
            &[
                ("Title", options.title.as_deref()),
                ("Count", options.count.as_deref()),
                ("BackgroundImage", options.background.as_deref()),
            ],
        );

        Self::format(
            NotificationKind::Tile,
            uri,
            options.priority,
            options.message_id,
            body,
        )
    }

    fn format(
        kind: NotificationKind,
        uri: &str,
        priority: Priority,
        message_id: Option<Uuid>,
        body: Option<String>,
    ) -> Result<Self, FormattingError> {
        let target_uri = parse_target_uri(uri)?;

        let mut headers = HeaderMap::new();
        set_header(
            &mut headers,
            NOTIFICATION_CLASS_HEADER,
            kind.class_header(priority),
        )?;
        if let Some(message_id) = message_id {
            set_header(&mut headers, MESSAGE_ID_HEADER, &message_id.to_string())?;
        }
        if kind.xml_root().is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/xml"));
        }
        if let Some(target) = kind.target() {
            set_header(&mut headers, TARGET_HEADER, target)?;
        }

        Ok(Self {
            kind,
            target_uri,
            headers,
            body,
        })
    }
}

fn parse_target_uri(uri: &str) -> Result<Url, FormattingError> {
    let url = Url::parse(uri).map_err(|err| FormattingError::InvalidUri(err.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(FormattingError::InvalidUri(format!(
            "unsupported scheme {}",
            scheme
        ))),
    }
}

fn set_header(headers: &mut HeaderMap, name: &str, value: &str) -> Result<(), FormattingError> {
    let name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| FormattingError::InvalidHeader(name.to_string()))?;
    let value =
        HeaderValue::from_str(value).map_err(|_| FormattingError::InvalidHeader(name.to_string()))?;
    headers.insert(name, value);
    Ok(())
}

/// Wraps the present elements in the `wp:Notification` envelope, in order.
/// Values are interpolated as-is; callers are responsible for well-formed content.
fn xml_envelope(kind: NotificationKind, elements: &[(&str, Option<&str>)]) -> Option<String> {
    let root = kind.xml_root()?;

    let mut xml = format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
         <wp:Notification xmlns:wp=\"WPNotification\">\
         <wp:{root}>"
    );
    for (name, value) in elements {
        if let Some(value) = value {
            xml.push_str(&format!("<wp:{name}>{value}</wp:{name}>"));
        }
    }
    xml.push_str(&format!("</wp:{root}></wp:Notification>"));

    Some(xml)
}
