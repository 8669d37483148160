//! Voyage Storage Layer
//!
//! SQLite-backed stand-in for browser local storage. Each actor kind owns
//! exactly one persisted session record, keyed by [`ActorKind::storage_key`].

mod actor;
mod database;
mod error;
mod migrations;
mod record;

pub use actor::ActorKind;
pub use database::Database;
pub use error::StorageError;
pub use record::{PersistedRecord, RecordLoad, RecordSlot};

pub type Result<T> = std::result::Result<T, StorageError>;
