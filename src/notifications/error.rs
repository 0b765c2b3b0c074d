#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormattingError {
    #[error("Invalid priority value: {0}")]
    InvalidPriority(String),
    #[error("Invalid target URI: {0}")]
    InvalidUri(String),
    #[error("Invalid value for header {0}")]
    InvalidHeader(String),
}
