use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum RepositoryError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Not found")]
    NotFound,

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Custom: {0}")]
    Custom(String),
}

impl From<reqwest::Error> for RepositoryError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            RepositoryError::Decode(error.to_string())
        } else {
            RepositoryError::Network(error.to_string())
        }
    }
}
