//! Authentication endpoints
//!
//! The manager only talks to the server through [`AuthBackend`]; the
//! production implementation goes through the shared [`ApiClient`].

use async_trait::async_trait;
use serde::Deserialize;

use voyage_http::{ApiClient, ApiError, RequestOptions};

use crate::credentials::Credentials;
use crate::principal::Principal;

/// Successful login payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginGrant<P> {
    pub token: String,
    #[serde(alias = "user", alias = "agency")]
    pub identity: P,
}

#[derive(Deserialize)]
struct MeResponse<P> {
    #[serde(alias = "user", alias = "agency")]
    identity: P,
}

#[async_trait]
pub trait AuthBackend<P: Principal>: Send + Sync + 'static {
    /// One attempt, no retry
    async fn login(&self, credentials: &Credentials) -> Result<LoginGrant<P>, ApiError>;

    /// Fresh profile for `token`
    async fn me(&self, token: &str) -> Result<P, ApiError>;
}

pub struct HttpAuthBackend {
    api: ApiClient,
}

impl HttpAuthBackend {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl<P: Principal> AuthBackend<P> for HttpAuthBackend {
    async fn login(&self, credentials: &Credentials) -> Result<LoginGrant<P>, ApiError> {
        self.api
            .post_json(P::KIND.login_path(), credentials, &RequestOptions::default())
            .await
    }

    async fn me(&self, token: &str) -> Result<P, ApiError> {
        // The token under revalidation, not whatever storage holds right now
        let options = RequestOptions::default().with_bearer(token);
        let response: MeResponse<P> = self.api.get_json(P::KIND.me_path(), &options).await?;
        Ok(response.identity)
    }
}
