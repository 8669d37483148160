//! Session data structure

use serde::Serialize;

use crate::state::SessionState;

/// What the rest of the client sees of one actor's authentication.
///
/// `token` is the authority on "signed in"; `identity` may be stale while
/// `loading` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session<P> {
    pub identity: Option<P>,
    pub token: Option<String>,
    pub loading: bool,
}

impl<P> Session<P> {
    /// Placeholder before bootstrap has run; not yet authoritative
    pub fn pending() -> Self {
        Self {
            identity: None,
            token: None,
            loading: true,
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            identity: None,
            token: None,
            loading: false,
        }
    }

    pub fn validating(identity: Option<P>, token: String) -> Self {
        Self {
            identity,
            token: Some(token),
            loading: true,
        }
    }

    pub fn authenticated(identity: P, token: String) -> Self {
        Self {
            identity: Some(identity),
            token: Some(token),
            loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// State implied by the snapshot alone
    pub fn state(&self) -> SessionState {
        match (self.loading, self.token.is_some()) {
            (true, true) => SessionState::Validating,
            (true, false) => SessionState::Uninitialized,
            (false, true) => SessionState::Authenticated,
            (false, false) => SessionState::Unauthenticated,
        }
    }
}

impl<P> Default for Session<P> {
    fn default() -> Self {
        Self::pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_states() {
        assert_eq!(Session::<()>::pending().state(), SessionState::Uninitialized);
        assert_eq!(
            Session::<()>::unauthenticated().state(),
            SessionState::Unauthenticated
        );
        assert_eq!(
            Session::<()>::validating(None, "t".into()).state(),
            SessionState::Validating
        );
        assert_eq!(
            Session::authenticated((), "t".into()).state(),
            SessionState::Authenticated
        );
    }

    #[test]
    fn test_token_decides_authentication() {
        let session = Session::<()>::validating(None, "t".into());
        assert!(session.is_authenticated());
        assert!(session.identity.is_none());
        assert!(!Session::<()>::unauthenticated().is_authenticated());
    }
}
