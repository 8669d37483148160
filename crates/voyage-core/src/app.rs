//! Application context
//!
//! Owns storage, the API client and one session manager per actor kind.

use voyage_http::{ApiClient, ErrorDetail};
use voyage_session::{
    Agency, Credentials, HttpAuthBackend, SessionManager, SessionState, Tourist,
};
use voyage_storage::{ActorKind, Database};

use crate::config::Config;
use crate::guard::{self, Access};
use crate::Result;

pub struct App {
    config: Config,
    db: Database,
    api: ApiClient,
    tourist: SessionManager<Tourist>,
    agency: SessionManager<Agency>,
}

impl App {
    /// Open the on-disk local storage and wire everything up
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        Self::with_database(config, db)
    }

    pub fn with_database(config: Config, db: Database) -> Result<Self> {
        let api = ApiClient::new(config.http_config()?, db.clone())?;

        let tourist = SessionManager::new(db.clone(), HttpAuthBackend::new(api.clone()));
        let agency = SessionManager::new(db.clone(), HttpAuthBackend::new(api.clone()));

        Ok(Self {
            config,
            db,
            api,
            tourist,
            agency,
        })
    }

    /// Bootstrap both sessions; they share nothing, so run them together
    pub async fn init(&self) -> (SessionState, SessionState) {
        let (tourist, agency) = tokio::join!(self.tourist.bootstrap(), self.agency.bootstrap());

        tracing::info!(
            api = %self.api.base_url(),
            tourist = %tourist,
            agency = %agency,
            "Client initialized"
        );

        (tourist, agency)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn tourist(&self) -> &SessionManager<Tourist> {
        &self.tourist
    }

    pub fn agency(&self) -> &SessionManager<Agency> {
        &self.agency
    }

    pub fn state(&self, kind: ActorKind) -> SessionState {
        match kind {
            ActorKind::Tourist => self.tourist.state(),
            ActorKind::Agency => self.agency.state(),
        }
    }

    /// Guard decision for a page that needs a signed-in `kind`
    pub fn access(&self, kind: ActorKind) -> Access {
        guard::protect(self.state(kind), kind)
    }

    /// Login form submit: landing route on success, displayable detail on failure
    pub async fn sign_in(
        &self,
        kind: ActorKind,
        credentials: &Credentials,
    ) -> std::result::Result<&'static str, ErrorDetail> {
        let result = match kind {
            ActorKind::Tourist => self.tourist.login(credentials).await.map(|_| ()),
            ActorKind::Agency => self.agency.login(credentials).await.map(|_| ()),
        };

        result
            .map(|()| guard::home_route(kind))
            .map_err(ErrorDetail::from)
    }

    /// Sign out `kind` and return where to send the user
    pub fn sign_out(&self, kind: ActorKind) -> &'static str {
        match kind {
            ActorKind::Tourist => self.tourist.logout(),
            ActorKind::Agency => self.agency.logout(),
        }

        guard::login_route(kind)
    }
}
