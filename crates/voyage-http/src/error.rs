//! HTTP error types

use thiserror::Error;

use crate::detail::ErrorDetail;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request path: {0}")]
    InvalidPath(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server responded {status}: {}", .detail.message())]
    Status { status: u16, detail: ErrorDetail },

    #[error("Malformed response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// User-facing description of the failure
    pub fn detail(&self) -> ErrorDetail {
        match self {
            ApiError::Status { detail, .. } => detail.clone(),
            ApiError::Transport(e) if e.is_timeout() => {
                ErrorDetail::plain("The server took too long to respond")
            }
            ApiError::Transport(e) if e.is_connect() => {
                ErrorDetail::plain("Unable to reach the server")
            }
            ApiError::Transport(e) => ErrorDetail::plain(e.to_string()),
            ApiError::InvalidPath(_) | ApiError::Decode(_) => {
                ErrorDetail::plain("Unexpected response from the server")
            }
        }
    }
}
