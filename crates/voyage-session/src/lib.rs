//! Voyage Session Management
//!
//! One [`SessionManager`] per actor kind (tourist, agency):
//! - Startup re-validates a persisted token against the "who am I" endpoint
//! - Login replaces the session and its persisted record together
//! - Logout is local and always succeeds
//! - Late results from superseded requests are dropped, never applied

mod backend;
mod credentials;
mod error;
mod manager;
mod principal;
mod session;
mod state;

pub use backend::{AuthBackend, HttpAuthBackend, LoginGrant};
pub use credentials::Credentials;
pub use error::SessionError;
pub use manager::SessionManager;
pub use principal::{Agency, Principal, PrincipalId, Tourist};
pub use session::Session;
pub use state::SessionState;

pub use voyage_http::ErrorDetail;
pub use voyage_storage::ActorKind;

pub type Result<T> = std::result::Result<T, SessionError>;
