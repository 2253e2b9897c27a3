//! Memoizing store for JSON content collections.
//!
//! Resources live at `{base_url}/{name}.json` on the content origin. Each
//! resource is fetched once and cached until `invalidate_all` or a forced
//! refresh; the request carries a timestamp query parameter so intermediary
//! HTTP caches never serve a stale document.
//!
//! Typed accessors never fail: load or decode problems are logged and
//! degrade to an empty collection, so a broken origin can't take the
//! consumer down with it.

use std::collections::HashMap;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::{Article, Condition, Term, Treatment};

use super::fetch::{Fetch, FetchError, HttpFetcher};

/// Resource names for the fixed collections
pub const ARTICLES: &str = "articles";
pub const CONDITIONS: &str = "conditions";
pub const TREATMENTS: &str = "treatments";
pub const TERMS: &str = "terms";

/// Errors from loading a content resource
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to fetch '{resource}': HTTP status {status}")]
    Fetch { resource: String, status: u16 },

    #[error("failed to fetch '{resource}': {message}")]
    Transport { resource: String, message: String },

    #[error("invalid JSON in '{resource}': {source}")]
    Parse {
        resource: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Memoizing client for the content origin
pub struct ContentStore {
    base_url: String,
    fetcher: Box<dyn Fetch>,
    cache: Mutex<HashMap<String, Value>>,
}

impl ContentStore {
    /// Create a store for a content origin using the real HTTP fetcher
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_fetcher(base_url, Box::new(HttpFetcher::new()))
    }

    /// Create a store with a custom fetcher (used by tests)
    pub fn with_fetcher(base_url: impl Into<String>, fetcher: Box<dyn Fetch>) -> Self {
        Self {
            base_url: base_url.into(),
            fetcher,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Get the configured origin base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Load a resource document, serving from cache unless `force_refresh`
    pub async fn load(&self, resource: &str, force_refresh: bool) -> Result<Value, ContentError> {
        if !force_refresh {
            if let Some(value) = self.cache.lock().await.get(resource) {
                return Ok(value.clone());
            }
        }

        // Timestamp query param defeats intermediary HTTP caches
        let url = format!(
            "{}/{}.json?v={}",
            self.base_url.trim_end_matches('/'),
            resource,
            Utc::now().timestamp_millis()
        );

        let body = self.fetcher.fetch(&url).await.map_err(|e| match e {
            FetchError::Status(status) => ContentError::Fetch {
                resource: resource.to_string(),
                status,
            },
            FetchError::Transport(message) => ContentError::Transport {
                resource: resource.to_string(),
                message,
            },
        })?;

        let value: Value = serde_json::from_str(&body).map_err(|source| ContentError::Parse {
            resource: resource.to_string(),
            source,
        })?;

        self.cache
            .lock()
            .await
            .insert(resource.to_string(), value.clone());

        Ok(value)
    }

    /// Drop every cached entry; the next load of any resource re-fetches
    pub async fn invalidate_all(&self) {
        self.cache.lock().await.clear();
    }

    /// Load all articles (empty on failure)
    pub async fn articles(&self) -> Vec<Article> {
        self.collection(ARTICLES, false).await
    }

    /// Load all conditions (empty on failure)
    pub async fn conditions(&self) -> Vec<Condition> {
        self.collection(CONDITIONS, false).await
    }

    /// Load all treatments (empty on failure)
    pub async fn treatments(&self) -> Vec<Treatment> {
        self.collection(TREATMENTS, false).await
    }

    /// Load all glossary terms (empty on failure)
    pub async fn terms(&self) -> Vec<Term> {
        self.collection(TERMS, false).await
    }

    /// Look up a single article by id
    pub async fn article(&self, id: &str) -> Option<Article> {
        self.articles().await.into_iter().find(|a| a.id == id)
    }

    /// Extract and decode the named array from a resource document.
    ///
    /// A missing field is an empty collection (tolerates partially-shaped
    /// documents); malformed records are dropped individually.
    async fn collection<T: DeserializeOwned>(&self, resource: &str, force: bool) -> Vec<T> {
        let document = match self.load(resource, force).await {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("content load failed: {}", e);
                return Vec::new();
            }
        };

        decode_records(resource, document.get(resource))
    }
}

/// Decode an array of records, skipping (and logging) malformed entries
fn decode_records<T: DeserializeOwned>(resource: &str, field: Option<&Value>) -> Vec<T> {
    let items = match field.and_then(Value::as_array) {
        Some(items) => items,
        None => return Vec::new(),
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("skipping malformed record in '{}': {}", resource, e);
                None
            }
        })
        .collect()
}
