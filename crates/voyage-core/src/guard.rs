//! Route guards
//!
//! Pages ask before rendering whether the current session lets them
//! through. Nothing is decided while a session is still unsettled.

use voyage_session::SessionState;
use voyage_storage::ActorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// Session not settled yet; show a spinner, do not redirect
    Pending,
    Redirect(&'static str),
}

pub fn login_route(kind: ActorKind) -> &'static str {
    match kind {
        ActorKind::Tourist => "/login",
        ActorKind::Agency => "/agency/login",
    }
}

/// Landing page after a successful login
pub fn home_route(kind: ActorKind) -> &'static str {
    match kind {
        ActorKind::Tourist => "/",
        ActorKind::Agency => "/agency/dashboard",
    }
}

/// Pages that need a signed-in actor of `kind`
pub fn protect(state: SessionState, kind: ActorKind) -> Access {
    if !state.is_settled() {
        return Access::Pending;
    }

    match state {
        SessionState::Authenticated => Access::Granted,
        _ => Access::Redirect(login_route(kind)),
    }
}

/// Login and signup pages; signed-in actors are sent home
pub fn guest_only(state: SessionState, kind: ActorKind) -> Access {
    if !state.is_settled() {
        return Access::Pending;
    }

    match state {
        SessionState::Authenticated => Access::Redirect(home_route(kind)),
        _ => Access::Granted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protect() {
        assert_eq!(
            protect(SessionState::Authenticated, ActorKind::Agency),
            Access::Granted
        );
        assert_eq!(
            protect(SessionState::Validating, ActorKind::Agency),
            Access::Pending
        );
        assert_eq!(
            protect(SessionState::Uninitialized, ActorKind::Tourist),
            Access::Pending
        );
        assert_eq!(
            protect(SessionState::Unauthenticated, ActorKind::Agency),
            Access::Redirect("/agency/login")
        );
        assert_eq!(
            protect(SessionState::Unauthenticated, ActorKind::Tourist),
            Access::Redirect("/login")
        );
    }

    #[test]
    fn test_guest_only() {
        assert_eq!(
            guest_only(SessionState::Authenticated, ActorKind::Agency),
            Access::Redirect("/agency/dashboard")
        );
        assert_eq!(
            guest_only(SessionState::Authenticated, ActorKind::Tourist),
            Access::Redirect("/")
        );
        assert_eq!(
            guest_only(SessionState::Validating, ActorKind::Tourist),
            Access::Pending
        );
        assert_eq!(
            guest_only(SessionState::Unauthenticated, ActorKind::Tourist),
            Access::Granted
        );
    }
}
