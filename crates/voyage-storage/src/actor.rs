//! Actor kinds
//!
//! The two independent identity domains the client supports.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    Tourist,
    Agency,
}

impl ActorKind {
    /// Local storage key holding this actor's persisted session record
    pub fn storage_key(&self) -> &'static str {
        match self {
            ActorKind::Tourist => "tourist_session",
            ActorKind::Agency => "agency_session",
        }
    }

    pub fn login_path(&self) -> &'static str {
        match self {
            ActorKind::Tourist => "/auth/login",
            ActorKind::Agency => "/agency/auth/login",
        }
    }

    /// "Who am I" endpoint used to revalidate a cached token
    pub fn me_path(&self) -> &'static str {
        match self {
            ActorKind::Tourist => "/auth/me",
            ActorKind::Agency => "/agency/auth/me",
        }
    }

    /// Classify a request path by namespace.
    ///
    /// Anything whose first path segment is `agency` belongs to the agency
    /// domain; every other path is tourist traffic.
    pub fn for_path(path: &str) -> ActorKind {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let first_segment = path.trim_start_matches('/').split('/').next();

        if first_segment == Some("agency") {
            ActorKind::Agency
        } else {
            ActorKind::Tourist
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActorKind::Tourist => "tourist",
            ActorKind::Agency => "agency",
        }
    }
}

impl std::fmt::Display for ActorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_keys_are_disjoint() {
        assert_ne!(
            ActorKind::Tourist.storage_key(),
            ActorKind::Agency.storage_key()
        );
    }

    #[test]
    fn test_for_path() {
        assert_eq!(ActorKind::for_path("/agency/auth/me"), ActorKind::Agency);
        assert_eq!(ActorKind::for_path("agency/tours"), ActorKind::Agency);
        assert_eq!(ActorKind::for_path("/agency"), ActorKind::Agency);
        assert_eq!(ActorKind::for_path("/agency?page=2"), ActorKind::Agency);

        assert_eq!(ActorKind::for_path("/auth/me"), ActorKind::Tourist);
        assert_eq!(ActorKind::for_path("/public/tours"), ActorKind::Tourist);
        // Only the leading segment decides
        assert_eq!(
            ActorKind::for_path("/public/agency/42"),
            ActorKind::Tourist
        );
        assert_eq!(ActorKind::for_path("/agencyfoo"), ActorKind::Tourist);
        assert_eq!(ActorKind::for_path(""), ActorKind::Tourist);
    }
}
