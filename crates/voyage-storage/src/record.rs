//! Persisted session records
//!
//! One JSON text entry per actor kind: `{"identity": ..., "token": "..."}`.
//! Only the session manager of that actor kind writes it; the HTTP layer
//! reads the token through [`RecordSlot::token`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::actor::ActorKind;
use crate::database::Database;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedRecord<I> {
    /// Cached profile; may be missing when only the credential survived
    #[serde(alias = "user", alias = "agency")]
    pub identity: Option<I>,
    pub token: String,
}

impl<I> PersistedRecord<I> {
    pub fn new(identity: Option<I>, token: String) -> Self {
        Self { identity, token }
    }
}

/// Outcome of reading a slot
#[derive(Debug, Clone, PartialEq)]
pub enum RecordLoad<I> {
    Absent,
    /// Present but unusable: unparsable, or no non-empty token
    Malformed(String),
    /// Usable token; the identity is `None` when it was absent or did not
    /// match the profile type
    Valid(PersistedRecord<I>),
}

#[derive(Deserialize)]
struct TokenOnly {
    #[serde(default)]
    token: Option<String>,
}

/// Handle on the storage entry owned by one actor kind
pub struct RecordSlot {
    db: Database,
    kind: ActorKind,
}

impl RecordSlot {
    pub fn new(db: Database, kind: ActorKind) -> Self {
        Self { db, kind }
    }

    pub fn kind(&self) -> ActorKind {
        self.kind
    }

    /// Classify the stored record.
    ///
    /// Validity depends on the token alone. A cached identity that does not
    /// decode as `I` is dropped, the token is kept.
    pub fn load<I: DeserializeOwned>(&self) -> Result<RecordLoad<I>> {
        let Some(raw) = self.db.get_item(self.kind.storage_key())? else {
            return Ok(RecordLoad::Absent);
        };

        let record: PersistedRecord<Value> = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => return Ok(RecordLoad::Malformed(e.to_string())),
        };

        if record.token.trim().is_empty() {
            return Ok(RecordLoad::Malformed("empty token".to_string()));
        }

        let identity = match record.identity {
            Some(value) => match serde_json::from_value::<I>(value) {
                Ok(identity) => Some(identity),
                Err(e) => {
                    tracing::warn!(actor = %self.kind, error = %e, "Ignoring cached identity of unexpected shape");
                    None
                }
            },
            None => None,
        };

        Ok(RecordLoad::Valid(PersistedRecord::new(identity, record.token)))
    }

    pub fn save<I: Serialize>(&self, record: &PersistedRecord<I>) -> Result<()> {
        let raw = serde_json::to_string(record)?;
        self.db.set_item(self.kind.storage_key(), &raw)
    }

    pub fn clear(&self) -> Result<()> {
        self.db.remove_item(self.kind.storage_key())
    }

    /// Bearer token only, ignoring the identity's shape.
    ///
    /// An unparsable record yields `None` rather than an error.
    pub fn token(&self) -> Result<Option<String>> {
        let Some(raw) = self.db.get_item(self.kind.storage_key())? else {
            return Ok(None);
        };

        match serde_json::from_str::<TokenOnly>(&raw) {
            Ok(parsed) => Ok(parsed.token.filter(|t| !t.trim().is_empty())),
            Err(e) => {
                tracing::debug!(actor = %self.kind, error = %e, "Ignoring unparsable session record");
                Ok(None)
            }
        }
    }
}

impl Clone for RecordSlot {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            kind: self.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn slot(kind: ActorKind) -> (Database, RecordSlot) {
        let db = Database::open_in_memory().unwrap();
        let slot = RecordSlot::new(db.clone(), kind);
        (db, slot)
    }

    #[test]
    fn test_absent() {
        let (_db, slot) = slot(ActorKind::Tourist);
        assert_eq!(slot.load::<Value>().unwrap(), RecordLoad::Absent);
        assert_eq!(slot.token().unwrap(), None);
    }

    #[test]
    fn test_save_and_load() {
        let (db, slot) = slot(ActorKind::Tourist);
        let record = PersistedRecord::new(Some(json!({"id": 1, "name": "A"})), "tok1".into());
        slot.save(&record).unwrap();

        assert_eq!(slot.load::<Value>().unwrap(), RecordLoad::Valid(record));
        assert_eq!(slot.token().unwrap().as_deref(), Some("tok1"));
        assert!(db.contains_key("tourist_session").unwrap());
        assert!(!db.contains_key("agency_session").unwrap());
    }

    #[test]
    fn test_token_without_identity_is_valid() {
        let (db, slot) = slot(ActorKind::Agency);
        db.set_item("agency_session", r#"{"token":"expired"}"#).unwrap();

        match slot.load::<Value>().unwrap() {
            RecordLoad::Valid(record) => {
                assert_eq!(record.identity, None);
                assert_eq!(record.token, "expired");
            }
            other => panic!("expected valid record, got {:?}", other),
        }
    }

    #[test]
    fn test_legacy_field_names() {
        let (db, slot) = slot(ActorKind::Agency);
        db.set_item("agency_session", r#"{"agency":{"id":"a1"},"token":"t"}"#)
            .unwrap();

        match slot.load::<Value>().unwrap() {
            RecordLoad::Valid(record) => assert_eq!(record.identity, Some(json!({"id": "a1"}))),
            other => panic!("expected valid record, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_records() {
        let (db, slot) = slot(ActorKind::Tourist);

        for raw in [
            "not json",
            "{}",
            r#"{"identity":{"id":1}}"#,
            r#"{"token":null}"#,
            r#"{"token":""}"#,
            r#"{"token":"   "}"#,
            "42",
        ] {
            db.set_item("tourist_session", raw).unwrap();
            assert!(
                matches!(slot.load::<Value>().unwrap(), RecordLoad::Malformed(_)),
                "{raw} should be malformed"
            );
            assert_eq!(slot.token().unwrap(), None, "{raw} should carry no token");
        }
    }

    #[test]
    fn test_unfamiliar_identity_keeps_token() {
        #[derive(Debug, PartialEq, Deserialize)]
        #[allow(dead_code)]
        struct Strict {
            name: String,
        }

        let (db, slot) = slot(ActorKind::Tourist);

        for raw in [
            r#"{"identity":"oops","token":"t"}"#,
            r#"{"identity":{"id":1,"email":"a@b.com"},"token":"t"}"#,
            r#"{"identity":null,"token":"t"}"#,
        ] {
            db.set_item("tourist_session", raw).unwrap();

            assert_eq!(
                slot.load::<Strict>().unwrap(),
                RecordLoad::Valid(PersistedRecord::new(None, "t".to_string())),
                "{raw}"
            );
            assert_eq!(slot.token().unwrap().as_deref(), Some("t"), "{raw}");
        }
    }

    #[test]
    fn test_clear() {
        let (_db, slot) = slot(ActorKind::Tourist);
        slot.save(&PersistedRecord::<Value>::new(None, "t".into()))
            .unwrap();
        slot.clear().unwrap();
        assert_eq!(slot.load::<Value>().unwrap(), RecordLoad::Absent);
    }
}
