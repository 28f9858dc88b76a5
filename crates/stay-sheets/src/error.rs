use thiserror::Error;

/// Failures talking to the spreadsheet store.
///
/// Connectivity and permission problems abort the calling operation; there
/// are no retries anywhere, every failure surfaces once.
#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("spreadsheet service unreachable: {0}")]
    Connectivity(#[from] reqwest::Error),

    #[error("spreadsheet access denied (HTTP {status}): {message}")]
    Permission { status: u16, message: String },

    #[error("spreadsheet API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("unexpected spreadsheet response: {0}")]
    Decode(String),

    #[error("no row at position {0}")]
    NoSuchRow(usize),
}

pub type Result<T> = std::result::Result<T, SheetsError>;
