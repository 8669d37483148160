//! Session error types

use thiserror::Error;
use voyage_http::{ApiError, ErrorDetail};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(ErrorDetail),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Storage error: {0}")]
    Storage(#[from] voyage_storage::StorageError),

    #[error("Server issued an empty token")]
    MissingToken,

    #[error("Session changed while the request was in flight")]
    Superseded,
}

impl SessionError {
    /// Message a page can show next to the login form
    pub fn detail(&self) -> ErrorDetail {
        match self {
            SessionError::InvalidCredentials(detail) => detail.clone(),
            SessionError::Api(e) => e.detail(),
            SessionError::Storage(_) => ErrorDetail::plain("Could not save your session"),
            SessionError::MissingToken => {
                ErrorDetail::plain("Unexpected response from the server")
            }
            SessionError::Superseded => {
                ErrorDetail::plain("Your session changed, please sign in again")
            }
        }
    }
}

impl From<SessionError> for ErrorDetail {
    fn from(err: SessionError) -> Self {
        err.detail()
    }
}
