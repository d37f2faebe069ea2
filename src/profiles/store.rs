//! Access to the external workspace document store.
//!
//! [`CandidateStore`] is the seam the rest of the module works against;
//! [`NotionClient`] is the production implementation speaking the store's
//! JSON API with a static bearer credential and a pinned protocol version.
//! Reads on the render path go through a short fixed-TTL cache; the
//! view-counter read bypasses it so increments see the latest count.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde_json::{json, Value};

use crate::config::StoreConfig;

use super::domain::RecordId;

const API_BASE: &str = "https://api.notion.com/v1";
const PROTOCOL_VERSION: &str = "2022-06-28";
const VIEW_COUNT_PROPERTY: &str = "Profil Views";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Transport(String),
    #[error("store rejected the request with status {status}")]
    Rejected { status: u16 },
    #[error("store payload unreadable: {0}")]
    Payload(String),
}

/// Narrow view of the store: the four reads and the single write this
/// service performs. Every method is keyed to one record or one collection
/// query; there is no bulk access.
pub trait CandidateStore: Send + Sync {
    /// Fetch one record by canonical id. `None` when the store has no such
    /// record (or refuses the id).
    fn fetch_record(
        &self,
        id: &RecordId,
    ) -> impl Future<Output = Result<Option<Value>, StoreError>> + Send;

    /// Query the candidates collection for an alternate key (share token,
    /// stored profile id, or a display-name prefix) and return the first
    /// match, if any. Ties are broken by store ordering.
    fn query_alternate(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<Value>, StoreError>> + Send;

    /// Body blocks of one record, in document order.
    fn fetch_blocks(
        &self,
        id: &RecordId,
    ) -> impl Future<Output = Result<Vec<Value>, StoreError>> + Send;

    /// Uncached read of the record's view counter. `None` when the record
    /// is missing.
    fn current_view_count(
        &self,
        id: &RecordId,
    ) -> impl Future<Output = Result<Option<i64>, StoreError>> + Send;

    /// Overwrite the record's view counter. Unsynchronized read-then-write;
    /// concurrent viewers may lose increments, which is accepted.
    fn write_view_count(
        &self,
        id: &RecordId,
        views: i64,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

struct CacheEntry {
    stored_at: Instant,
    payload: Value,
}

/// Client for the workspace document API, scoped to one candidates
/// collection.
pub struct NotionClient {
    http: reqwest::Client,
    api_key: String,
    database_id: String,
    cache_ttl: Duration,
    cache: Mutex<HashMap<String, CacheEntry>>,
}

impl NotionClient {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            database_id: config.database_id.clone(),
            cache_ttl: config.cache_ttl,
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn cached(&self, path: &str) -> Option<Value> {
        let cache = self.cache.lock().expect("store cache mutex poisoned");
        cache
            .get(path)
            .filter(|entry| entry.stored_at.elapsed() < self.cache_ttl)
            .map(|entry| entry.payload.clone())
    }

    fn remember(&self, path: &str, payload: &Value) {
        let mut cache = self.cache.lock().expect("store cache mutex poisoned");
        cache.insert(
            path.to_string(),
            CacheEntry {
                stored_at: Instant::now(),
                payload: payload.clone(),
            },
        );
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{API_BASE}{path}"))
            .bearer_auth(&self.api_key)
            .header("Notion-Version", PROTOCOL_VERSION)
    }

    /// GET with the read-through cache in front. A 404 is a `None`, not an
    /// error; anything else unexpected surfaces as `StoreError` for the
    /// caller to log.
    async fn get_cached(&self, path: &str) -> Result<Option<Value>, StoreError> {
        if let Some(payload) = self.cached(path) {
            return Ok(Some(payload));
        }

        match self.get_uncached(path).await? {
            Some(payload) => {
                self.remember(path, &payload);
                Ok(Some(payload))
            }
            None => Ok(None),
        }
    }

    async fn get_uncached(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let response = self
            .request(reqwest::Method::GET, path)
            .send()
            .await
            .map_err(|err| StoreError::Transport(err.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND || status == reqwest::StatusCode::BAD_REQUEST {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(StoreError::Rejected {
                status: status.as_u16(),
            });
        }

        let payload = response
            .json::<Value>()
            .await
            .map_err(|err| StoreError::Payload(err.to_string()))?;
        Ok(Some(payload))
    }
}

impl std::fmt::Debug for NotionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionClient")
            .field("database_id", &self.database_id)
            .finish_non_exhaustive()
    }
}

impl CandidateStore for NotionClient {
    async fn fetch_record(&self, id: &RecordId) -> Result<Option<Value>, StoreError> {
        self.get_cached(&format!("/pages/{}", id.as_str())).await
    }

    async fn query_alternate(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let body = json!({
            "filter": {
                "or": [
                    { "property": "Profil-Token", "rich_text": { "equals": key } },
                    { "property": "Profil-ID", "rich_text": { "equals": key } },
                    { "property": "Name", "title": { "contains": key } }
                ]
            },
            "page_size": 1
        });

        let response = self
            .request(
                reqwest::Method::POST,
                &format!("/databases/{}/query", self.database_id),
            )
            .json(&body)
            .send()
            .await
            .map_err(|err| StoreError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Rejected {
                status: status.as_u16(),
            });
        }

        let payload = response
            .json::<Value>()
            .await
            .map_err(|err| StoreError::Payload(err.to_string()))?;

        Ok(payload
            .get("results")
            .and_then(Value::as_array)
            .and_then(|results| results.first())
            .cloned())
    }

    async fn fetch_blocks(&self, id: &RecordId) -> Result<Vec<Value>, StoreError> {
        let payload = self
            .get_cached(&format!("/blocks/{}/children", id.as_str()))
            .await?;

        Ok(payload
            .and_then(|body| body.get("results").cloned())
            .and_then(|results| results.as_array().cloned())
            .unwrap_or_default())
    }

    async fn current_view_count(&self, id: &RecordId) -> Result<Option<i64>, StoreError> {
        let Some(page) = self.get_uncached(&format!("/pages/{}", id.as_str())).await? else {
            return Ok(None);
        };

        Ok(Some(
            page.get("properties")
                .and_then(|props| props.get(VIEW_COUNT_PROPERTY))
                .and_then(|prop| prop.get("number"))
                .and_then(Value::as_i64)
                .unwrap_or(0),
        ))
    }

    async fn write_view_count(&self, id: &RecordId, views: i64) -> Result<(), StoreError> {
        let body = json!({
            "properties": { (VIEW_COUNT_PROPERTY): { "number": views } }
        });

        let response = self
            .request(reqwest::Method::PATCH, &format!("/pages/{}", id.as_str()))
            .json(&body)
            .send()
            .await
            .map_err(|err| StoreError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
