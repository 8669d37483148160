//! Authenticated principals
//!
//! Profiles keep whatever the server sends and nothing more: unknown fields
//! land in `extra`, absent optional fields stay absent, and a Mongo-style
//! `_id` is kept under its own key. A profile therefore serializes back
//! exactly as it was received.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Debug;

use voyage_storage::ActorKind;

/// Profile type of one actor kind
pub trait Principal:
    Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const KIND: ActorKind;

    /// `id` when present, otherwise `_id`
    fn id(&self) -> Option<&PrincipalId>;
}

/// Server ids come as numbers or as strings depending on the endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrincipalId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrincipalId::Number(n) => write!(f, "{}", n),
            PrincipalId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for PrincipalId {
    fn from(n: i64) -> Self {
        PrincipalId::Number(n)
    }
}

impl From<&str> for PrincipalId {
    fn from(s: &str) -> Self {
        PrincipalId::Text(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tourist {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PrincipalId>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<PrincipalId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Tourist {
    pub fn new(id: impl Into<PrincipalId>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            object_id: None,
            name: Some(name.into()),
            email: None,
            phone: None,
            avatar: None,
            role: None,
            extra: Map::new(),
        }
    }
}

impl Principal for Tourist {
    const KIND: ActorKind = ActorKind::Tourist;

    fn id(&self) -> Option<&PrincipalId> {
        self.id.as_ref().or(self.object_id.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agency {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PrincipalId>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<PrincipalId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Set once the marketplace has approved the agency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Agency {
    pub fn new(id: impl Into<PrincipalId>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            object_id: None,
            name: Some(name.into()),
            email: None,
            phone: None,
            address: None,
            logo: None,
            verified: None,
            extra: Map::new(),
        }
    }

    pub fn is_verified(&self) -> bool {
        self.verified.unwrap_or(false)
    }
}

impl Principal for Agency {
    const KIND: ActorKind = ActorKind::Agency;

    fn id(&self) -> Option<&PrincipalId> {
        self.id.as_ref().or(self.object_id.as_ref())
    }
}
