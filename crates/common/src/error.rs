use thiserror::Error;

/// Errors raised while polling the review API and delivering notifications.
///
/// Everything raised inside a poll cycle is caught by the poll loop; only
/// `Config` and `Channel` errors during startup end the process.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected HTTP status from review API: {status}")]
    UnexpectedHttpStatus { status: u16 },

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Unknown homework status: {0}")]
    UnknownStatus(String),

    #[error("No submissions since the anchor timestamp")]
    NoSubmissions,

    #[error("Channel error: {0}")]
    Channel(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Field-free discriminant of [`PollError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    UnexpectedHttpStatus,
    InvalidPayload,
    Schema,
    MissingField,
    UnknownStatus,
    NoSubmissions,
    Channel,
    Config,
}

impl PollError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PollError::Transport(_) => ErrorKind::Transport,
            PollError::UnexpectedHttpStatus { .. } => ErrorKind::UnexpectedHttpStatus,
            PollError::InvalidPayload(_) => ErrorKind::InvalidPayload,
            PollError::Schema(_) => ErrorKind::Schema,
            PollError::MissingField(_) => ErrorKind::MissingField,
            PollError::UnknownStatus(_) => ErrorKind::UnknownStatus,
            PollError::NoSubmissions => ErrorKind::NoSubmissions,
            PollError::Channel(_) => ErrorKind::Channel,
            PollError::Config(_) => ErrorKind::Config,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Transport => write!(f, "transport"),
            ErrorKind::UnexpectedHttpStatus => write!(f, "unexpected_http_status"),
            ErrorKind::InvalidPayload => write!(f, "invalid_payload"),
            ErrorKind::Schema => write!(f, "schema"),
            ErrorKind::MissingField => write!(f, "missing_field"),
            ErrorKind::UnknownStatus => write!(f, "unknown_status"),
            ErrorKind::NoSubmissions => write!(f, "no_submissions"),
            ErrorKind::Channel => write!(f, "channel"),
            ErrorKind::Config => write!(f, "config"),
        }
    }
}
