//! Optional YAML configuration for the outbound client.
//!
//! Every field may be omitted; missing values keep the defaults from
//! [`ClientConfig::default`]. Command-line flags are applied on top.
//!
//! ```yaml
//! user_agent: "Mozilla/5.0 ..."
//! video_timeout_secs: 10
//! news_timeout_secs: 10
//! enrich_timeout_secs: 5
//! enrich_thumbnails: false
//! extra_headers:
//!   DNT: "1"
//! ```

use crate::client::ClientConfig;
use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::{info, instrument};

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub user_agent: Option<String>,
    pub video_timeout_secs: Option<u64>,
    pub news_timeout_secs: Option<u64>,
    pub enrich_timeout_secs: Option<u64>,
    pub enrich_thumbnails: Option<bool>,
    /// Added to (or overriding) the default browser headers on news requests.
    pub extra_headers: BTreeMap<String, String>,
}

impl AppConfig {
    /// Read and parse a YAML config file.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let config = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded configuration");
        Ok(config)
    }

    /// Merge onto the defaults.
    pub fn client_config(&self) -> ClientConfig {
        let defaults = ClientConfig::default();
        let secs = |value: Option<u64>, default: Duration| value.map(Duration::from_secs).unwrap_or(default);

        let mut browser_headers = defaults.browser_headers;
        browser_headers.extend(self.extra_headers.clone());

        ClientConfig {
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
            browser_headers,
            video_timeout: secs(self.video_timeout_secs, defaults.video_timeout),
            news_timeout: secs(self.news_timeout_secs, defaults.news_timeout),
            enrich_timeout: secs(self.enrich_timeout_secs, defaults.enrich_timeout),
            enrich_thumbnails: self.enrich_thumbnails.unwrap_or(defaults.enrich_thumbnails),
        }
    }
}
