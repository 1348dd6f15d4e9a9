//! HTTP content backend for the hosted CMS query API.
//!
//! Queries go out as `GET .../data/query/{dataset}?query=...&$param=<json>`
//! and the `result` field of the response envelope is handed back.

use async_trait::async_trait;
use pharos_core::{config::BackendConfig, error::FetchError, query::Query, traits::ContentBackend};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Response envelope of the query API.
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
}

/// Backend reached over HTTPS with reqwest.
pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpBackend {
    /// Create from config values.
    pub fn from_config(cfg: &BackendConfig) -> Result<Self, FetchError> {
        if cfg.project_id.trim().is_empty() {
            return Err(FetchError::Unavailable("backend.project_id is empty".into()));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs.max(1)))
            .build()
            .map_err(|e| FetchError::Transport(format!("failed to build http client: {e}")))?;
        let token = Some(cfg.token.trim().to_string()).filter(|t| !t.is_empty());
        Ok(Self {
            client,
            endpoint: query_endpoint(cfg),
            token,
        })
    }
}

/// Query URL for the configured project, dataset, and API version.
pub fn query_endpoint(cfg: &BackendConfig) -> String {
    let host = if cfg.use_cdn && cfg.token.trim().is_empty() {
        "apicdn"
    } else {
        "api"
    };
    let version = cfg.api_version.trim_start_matches('v');
    format!(
        "https://{}.{host}.sanity.io/v{version}/data/query/{}",
        cfg.project_id.trim(),
        cfg.dataset
    )
}

/// Query-string pairs: the query text plus one `$name` entry per parameter.
pub fn query_pairs(query: &Query) -> Vec<(String, String)> {
    let mut pairs = vec![("query".to_string(), query.text.to_string())];
    for (key, value) in &query.params {
        pairs.push((format!("${key}"), value.to_string()));
    }
    pairs
}

#[async_trait]
impl ContentBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn query(&self, query: &Query) -> Result<Value, FetchError> {
        debug!("content: GET {} query={}", self.endpoint, query.name);

        let mut req = self.client.get(&self.endpoint).query(&query_pairs(query));
        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Transport(e.to_string())
            }
        })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        let parsed: QueryResponse = resp.json().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Decode(e.to_string())
            }
        })?;
        Ok(parsed.result)
    }
}

/// Backend used when no remote is configured. Every query fails, so every
/// resolver operation serves the fallback corpus.
pub struct OfflineBackend {
    reason: String,
}

impl OfflineBackend {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl ContentBackend for OfflineBackend {
    fn name(&self) -> &str {
        "offline"
    }

    async fn query(&self, _query: &Query) -> Result<Value, FetchError> {
        Err(FetchError::Unavailable(self.reason.clone()))
    }
}

/// Build the backend described by `cfg`, degrading to [`OfflineBackend`].
pub fn build_backend(cfg: &BackendConfig) -> Box<dyn ContentBackend> {
    if !cfg.is_usable() {
        let reason = if cfg.enabled {
            "backend.project_id is empty"
        } else {
            "backend disabled in config"
        };
        debug!("content: no remote backend, serving fallback corpus ({reason})");
        return Box::new(OfflineBackend::new(reason));
    }
    match HttpBackend::from_config(cfg) {
        Ok(backend) => Box::new(backend),
        Err(e) => {
            tracing::warn!("content backend not usable, serving fallback corpus: {e}");
            Box::new(OfflineBackend::new(e.to_string()))
        }
    }
}
