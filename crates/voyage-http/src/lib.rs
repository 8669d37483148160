//! Voyage HTTP Client
//!
//! Every backend call goes through [`ApiClient`]: fixed base address, fixed
//! timeout, and a bearer token picked from the persisted session record of
//! whichever actor namespace the path belongs to. One attempt per call.

mod client;
mod detail;
mod error;

pub use client::{ApiClient, HttpConfig, RequestOptions, DEFAULT_TIMEOUT};
pub use detail::ErrorDetail;
pub use error::ApiError;

pub use reqwest::Method;

pub type Result<T> = std::result::Result<T, ApiError>;
