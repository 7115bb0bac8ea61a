use thiserror::Error;

pub type Result<T> = std::result::Result<T, SheetsError>;

#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Authentication error: {0}")]
    Auth(String),
}

impl From<reqwest::Error> for SheetsError {
    fn from(err: reqwest::Error) -> Self {
        SheetsError::Network(err.to_string())
    }
}
