use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Invalid url: {0}")]
    InvalidUrl(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Maps a non-2xx response to an error, keeping the body as a plain-text
    /// message.
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == 404 {
            return RepositoryError::NotFound;
        }
        let body = body.trim();
        let message = if body.is_empty() {
            "no details".to_string()
        } else {
            body.to_string()
        };
        RepositoryError::Status { status, message }
    }
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            RepositoryError::ConnectionError(err.to_string())
        } else if err.is_decode() {
            RepositoryError::DecodeError(err.to_string())
        } else if err.is_builder() {
            RepositoryError::InvalidUrl(err.to_string())
        } else if let Some(status) = err.status() {
            RepositoryError::from_status(status.as_u16(), &err.to_string())
        } else {
            RepositoryError::Unexpected(format!("Unexpected http error: {err}"))
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::DecodeError(err.to_string())
    }
}
