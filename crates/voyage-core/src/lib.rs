//! Voyage Core
//!
//! Application context for the marketplace client. Built once at startup
//! and handed to page code; there is no global session state.

mod app;
mod config;
mod error;
mod guard;

pub use app::App;
pub use config::Config;
pub use error::CoreError;
pub use guard::{guest_only, home_route, login_route, protect, Access};

// Re-export core components
pub use voyage_http::{ApiClient, ApiError, ErrorDetail, HttpConfig, Method, RequestOptions};
pub use voyage_session::{
    Agency, Credentials, Principal, PrincipalId, Session, SessionError, SessionManager,
    SessionState, Tourist,
};
pub use voyage_storage::{ActorKind, Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
