//! REST client wrapper

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

use voyage_storage::{ActorKind, Database, RecordSlot};

use crate::detail::ErrorDetail;
use crate::error::ApiError;
use crate::Result;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Base address every relative path is resolved against
    pub base_url: Url,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl HttpConfig {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidPath(format!("{base_url}: {e}")))?;

        // Url::join drops the last segment unless the base ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { base_url, timeout })
    }
}

/// Per-request knobs
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Use this token instead of the persisted one
    pub bearer: Option<String>,
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
    tourist: RecordSlot,
    agency: RecordSlot,
}

impl ApiClient {
    pub fn new(config: HttpConfig, db: Database) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url,
            tourist: RecordSlot::new(db.clone(), ActorKind::Tourist),
            agency: RecordSlot::new(db, ActorKind::Agency),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a relative path against the base address
    pub fn url_for(&self, path: &str) -> Result<Url> {
        if path.contains("://") || path.starts_with("//") {
            return Err(ApiError::InvalidPath(path.to_string()));
        }

        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidPath(format!("{path}: {e}")))
    }

    /// Token persisted for the namespace `path` belongs to, if any.
    ///
    /// Storage problems are logged and treated as "no token".
    pub fn bearer_for(&self, path: &str) -> Option<String> {
        let slot = match ActorKind::for_path(path) {
            ActorKind::Tourist => &self.tourist,
            ActorKind::Agency => &self.agency,
        };

        match slot.token() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(actor = %slot.kind(), error = %e, "Failed to read session record");
                None
            }
        }
    }

    /// Build a request with the bearer token already attached
    pub fn request(
        &self,
        method: Method,
        path: &str,
        options: &RequestOptions,
    ) -> Result<RequestBuilder> {
        let url = self.url_for(path)?;
        let mut builder = self.client.request(method, url);

        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }

        let token = options.bearer.clone().or_else(|| self.bearer_for(path));
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        Ok(builder)
    }

    /// Dispatch once; non-2xx statuses become [`ApiError::Status`]
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();

        tracing::debug!(url = %response.url(), status = status.as_u16(), "Request completed");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            detail: ErrorDetail::from_body(status.as_u16(), &body),
        })
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<T> {
        let builder = self.request(Method::GET, path, options)?;
        let response = self.send(builder).await?;
        decode(response).await
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<T> {
        let builder = self.request(Method::POST, path, options)?.json(body);
        let response = self.send(builder).await?;
        decode(response).await
    }

    pub async fn delete(&self, path: &str, options: &RequestOptions) -> Result<()> {
        let builder = self.request(Method::DELETE, path, options)?;
        self.send(builder).await?;
        Ok(())
    }
}

impl Clone for ApiClient {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            tourist: self.tourist.clone(),
            agency: self.agency.clone(),
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}
