//! Session State Machine
//!
//! ```text
//! Uninitialized ──bootstrap──▶ Validating ──ok──▶ Authenticated
//!       │                          │
//!       │                          └──fail──▶ Unauthenticated
//!       └──bootstrap (no record)──────────▶ Unauthenticated
//!
//! login:  Unauthenticated ──▶ Authenticated
//! logout: any ──▶ Unauthenticated
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Before bootstrap has looked at the persisted record
    Uninitialized,
    /// Cached token shown optimistically while the server re-checks it
    Validating,
    Unauthenticated,
    Authenticated,
}

impl SessionState {
    pub fn can_transition_to(&self, target: SessionState) -> bool {
        match (self, target) {
            (_, SessionState::Uninitialized) => false,
            (SessionState::Uninitialized, SessionState::Validating) => true,
            (_, SessionState::Validating) => false,
            // Login may land before, during or after bootstrap
            (_, SessionState::Authenticated) => true,
            // Logout and failed revalidation
            (_, SessionState::Unauthenticated) => true,
        }
    }

    /// True once nothing is in flight and the token can be trusted
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            SessionState::Authenticated | SessionState::Unauthenticated
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Uninitialized => "uninitialized",
            SessionState::Validating => "validating",
            SessionState::Unauthenticated => "unauthenticated",
            SessionState::Authenticated => "authenticated",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
