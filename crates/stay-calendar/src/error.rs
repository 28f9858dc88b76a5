use thiserror::Error;

/// Failures talking to the calendar service.
#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("calendar service unreachable: {0}")]
    Connectivity(#[from] reqwest::Error),

    #[error("calendar access denied (HTTP {status}): {message}")]
    Permission { status: u16, message: String },

    #[error("calendar API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("unexpected calendar response: {0}")]
    Decode(String),

    #[error("reservation has no calendar event id")]
    MissingEventId,

    #[error("reservation has no stay date to schedule")]
    MissingStayDate,
}

pub type Result<T> = std::result::Result<T, CalendarError>;
