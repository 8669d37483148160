//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] voyage_storage::StorageError),

    #[error("API error: {0}")]
    Api(#[from] voyage_http::ApiError),

    #[error("Session error: {0}")]
    Session(#[from] voyage_session::SessionError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
