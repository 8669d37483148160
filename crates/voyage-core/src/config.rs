//! Client configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use voyage_http::HttpConfig;

use crate::error::CoreError;
use crate::Result;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding client-side state
    pub data_dir: PathBuf,
    /// Local storage database file
    pub database_path: PathBuf,
    /// Base address of the marketplace REST API
    pub api_base_url: String,
    /// Fixed timeout applied to every request
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("voyage.db"),
            data_dir,
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("Voyage"))
            .unwrap_or_else(|| PathBuf::from(".voyage"))
    }

    /// Defaults overridden by `VOYAGE_DATA_DIR`, `VOYAGE_API_URL` and
    /// `VOYAGE_REQUEST_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("VOYAGE_DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(Self::data_dir);

        let mut config = Self::new(data_dir);

        if let Some(url) = lookup("VOYAGE_API_URL").filter(|v| !v.trim().is_empty()) {
            config.api_base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup("VOYAGE_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = raw.trim().parse().map_err(|_| {
                CoreError::Config(format!("VOYAGE_REQUEST_TIMEOUT_SECS is not a number: {raw}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(CoreError::Config(
                "request timeout must be at least one second".to_string(),
            ));
        }

        self.http_config().map(|_| ())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn http_config(&self) -> Result<HttpConfig> {
        HttpConfig::new(&self.api_base_url, self.request_timeout())
            .map_err(|e| CoreError::Config(e.to_string()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::new(PathBuf::from("/tmp/voyage"));
        assert_eq!(config.database_path, PathBuf::from("/tmp/voyage/voyage.db"));
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("VOYAGE_DATA_DIR", "/srv/voyage"),
            ("VOYAGE_API_URL", " https://api.voyage.test/v1 "),
            ("VOYAGE_REQUEST_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/srv/voyage/voyage.db"));
        assert_eq!(config.api_base_url, "https://api.voyage.test/v1");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("VOYAGE_REQUEST_TIMEOUT_SECS", "soon")])),
            Err(CoreError::Config(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("VOYAGE_REQUEST_TIMEOUT_SECS", "0")])),
            Err(CoreError::Config(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("VOYAGE_API_URL", "not a url")])),
            Err(CoreError::Config(_))
        ));
    }
}
