//! Session Manager
//!
//! Owns one actor kind's in-memory session and its persisted record.
//! Every asynchronous result is stamped with the generation it started
//! under and dropped if the session moved on before it resolved.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;

use voyage_http::ApiError;
use voyage_storage::{ActorKind, Database, PersistedRecord, RecordLoad, RecordSlot};

use crate::backend::{AuthBackend, HttpAuthBackend};
use crate::credentials::Credentials;
use crate::error::SessionError;
use crate::principal::Principal;
use crate::session::Session;
use crate::state::SessionState;
use crate::Result;

struct Inner<P> {
    session: Session<P>,
    state: SessionState,
    /// Advanced by bootstrap start, applied login, and logout
    generation: u64,
}

pub struct SessionManager<P: Principal, B = HttpAuthBackend> {
    inner: Arc<Mutex<Inner<P>>>,
    /// Persisted record; written by nobody else
    slot: RecordSlot,
    backend: Arc<B>,
    updates: Arc<watch::Sender<Session<P>>>,
}

impl<P: Principal, B: AuthBackend<P>> SessionManager<P, B> {
    pub fn new(db: Database, backend: B) -> Self {
        let (updates, _) = watch::channel(Session::pending());

        Self {
            inner: Arc::new(Mutex::new(Inner {
                session: Session::pending(),
                state: SessionState::Uninitialized,
                generation: 0,
            })),
            slot: RecordSlot::new(db, P::KIND),
            backend: Arc::new(backend),
            updates: Arc::new(updates),
        }
    }

    pub fn kind(&self) -> ActorKind {
        P::KIND
    }

    pub fn snapshot(&self) -> Session<P> {
        self.inner.lock().session.clone()
    }

    pub fn identity(&self) -> Option<P> {
        self.inner.lock().session.identity.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.lock().session.token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.lock().session.is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.lock().session.loading
    }

    pub fn state(&self) -> SessionState {
        self.inner.lock().state
    }

    /// Receiver that always holds the latest session snapshot
    pub fn subscribe(&self) -> watch::Receiver<Session<P>> {
        self.updates.subscribe()
    }

    /// Load the persisted record and re-validate it against the server.
    ///
    /// Never fails: anything unusable degrades to signed out. Only the first
    /// call does any work.
    pub async fn bootstrap(&self) -> SessionState {
        let Some((generation, token)) = self.begin_bootstrap() else {
            return self.state();
        };

        let result = self.backend.me(&token).await;
        self.finish_bootstrap(generation, token, result);

        self.state()
    }

    fn begin_bootstrap(&self) -> Option<(u64, String)> {
        let mut inner = self.inner.lock();

        if inner.state != SessionState::Uninitialized {
            tracing::debug!(actor = %P::KIND, state = %inner.state, "Bootstrap already ran");
            return None;
        }

        let record = match self.slot.load::<P>() {
            Ok(RecordLoad::Valid(record)) => record,
            Ok(RecordLoad::Absent) => {
                tracing::info!(actor = %P::KIND, "No stored session");
                self.apply(&mut inner, Session::unauthenticated(), SessionState::Unauthenticated);
                return None;
            }
            Ok(RecordLoad::Malformed(reason)) => {
                tracing::warn!(actor = %P::KIND, reason = %reason, "Discarding malformed session record");
                self.discard_record();
                self.apply(&mut inner, Session::unauthenticated(), SessionState::Unauthenticated);
                return None;
            }
            Err(e) => {
                tracing::warn!(actor = %P::KIND, error = %e, "Failed to read session record");
                self.discard_record();
                self.apply(&mut inner, Session::unauthenticated(), SessionState::Unauthenticated);
                return None;
            }
        };

        inner.generation += 1;
        let generation = inner.generation;
        let token = record.token.clone();

        self.apply(
            &mut inner,
            Session::validating(record.identity, record.token),
            SessionState::Validating,
        );

        tracing::info!(actor = %P::KIND, "Revalidating stored session");

        Some((generation, token))
    }

    fn finish_bootstrap(
        &self,
        generation: u64,
        token: String,
        result: std::result::Result<P, ApiError>,
    ) {
        let mut inner = self.inner.lock();

        if inner.generation != generation {
            tracing::info!(actor = %P::KIND, "Dropping revalidation result for a superseded session");
            return;
        }

        match result {
            Ok(identity) => {
                let record = PersistedRecord::new(Some(identity.clone()), token.clone());
                if let Err(e) = self.slot.save(&record) {
                    tracing::warn!(actor = %P::KIND, error = %e, "Failed to persist refreshed session");
                }

                tracing::info!(actor = %P::KIND, id = ?identity.id(), "Session revalidated");
                self.apply(
                    &mut inner,
                    Session::authenticated(identity, token),
                    SessionState::Authenticated,
                );
            }
            Err(e) => {
                tracing::warn!(actor = %P::KIND, error = %e, "Session revalidation failed, signing out");
                self.discard_record();
                self.apply(&mut inner, Session::unauthenticated(), SessionState::Unauthenticated);
            }
        }
    }

    /// Sign in with one request.
    ///
    /// On any failure the session and the persisted record stay as they were.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session<P>> {
        credentials
            .validate()
            .map_err(SessionError::InvalidCredentials)?;

        let generation = self.inner.lock().generation;

        let grant = match self.backend.login(credentials).await {
            Ok(grant) => grant,
            Err(e) => {
                tracing::warn!(actor = %P::KIND, error = %e, "Login failed");
                return Err(e.into());
            }
        };

        if grant.token.trim().is_empty() {
            return Err(SessionError::MissingToken);
        }

        let mut inner = self.inner.lock();

        if inner.generation != generation {
            tracing::info!(actor = %P::KIND, "Dropping login result for a superseded session");
            return Err(SessionError::Superseded);
        }

        let record = PersistedRecord::new(Some(grant.identity.clone()), grant.token.clone());
        self.slot.save(&record)?;

        inner.generation += 1;
        tracing::info!(actor = %P::KIND, id = ?grant.identity.id(), "Signed in");
        self.apply(
            &mut inner,
            Session::authenticated(grant.identity, grant.token),
            SessionState::Authenticated,
        );

        Ok(inner.session.clone())
    }

    /// Local sign-out; no server call and no way to fail
    pub fn logout(&self) {
        let mut inner = self.inner.lock();

        inner.generation += 1;
        self.discard_record();
        self.apply(&mut inner, Session::unauthenticated(), SessionState::Unauthenticated);

        tracing::info!(actor = %P::KIND, "Signed out");
    }

    fn discard_record(&self) {
        if let Err(e) = self.slot.clear() {
            tracing::warn!(actor = %P::KIND, error = %e, "Failed to remove session record");
        }
    }

    fn apply(&self, inner: &mut Inner<P>, session: Session<P>, state: SessionState) {
        if !inner.state.can_transition_to(state) {
            tracing::warn!(actor = %P::KIND, from = %inner.state, to = %state, "Unexpected session transition");
        }

        tracing::debug!(actor = %P::KIND, from = %inner.state, to = %state, "Session transition");
        debug_assert_eq!(session.state(), state, "snapshot disagrees with session state");

        inner.session = session;
        inner.state = state;
        self.updates.send_replace(inner.session.clone());
    }
}

impl<P: Principal, B> Clone for SessionManager<P, B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            slot: self.slot.clone(),
            backend: Arc::clone(&self.backend),
            updates: Arc::clone(&self.updates),
        }
    }
}
