//! Resolves inbound identifiers to normalized profiles.
//!
//! Anything that prevents a lookup — unknown id, malformed id, transport
//! failure — folds into "not found". The distinction is logged here and
//! deliberately not surfaced; a viewer holding a broken link gets the same
//! generic page either way.

use std::sync::Arc;

use tracing::warn;

use super::domain::{CandidateProfile, RecordId};
use super::mapper;
use super::store::CandidateStore;

pub struct LookupService<S> {
    store: Arc<S>,
}

impl<S: CandidateStore> LookupService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Lookup by the store's native record id; dashes in the raw identifier
    /// are stripped before querying.
    pub async fn find_by_id(&self, raw: &str) -> Option<CandidateProfile> {
        let id = RecordId::canonicalize(raw);
        if id.as_str().is_empty() {
            return None;
        }

        match self.store.fetch_record(&id).await {
            Ok(Some(page)) => mapper::map_record(&page),
            Ok(None) => None,
            Err(err) => {
                warn!(record = id.as_str(), error = %err, "record lookup failed");
                None
            }
        }
    }

    /// Lookup by share token, stored profile id, or display-name prefix.
    /// At most one result; the store's ordering decides ties.
    pub async fn find_by_alternate_key(&self, key: &str) -> Option<CandidateProfile> {
        let key = key.trim();
        if key.is_empty() {
            return None;
        }

        match self.store.query_alternate(key).await {
            Ok(Some(page)) => mapper::map_record(&page),
            Ok(None) => None,
            Err(err) => {
                warn!(%key, error = %err, "alternate key lookup failed");
                None
            }
        }
    }

    /// Native key first, alternate key as fallback; inbound links carry
    /// either interchangeably.
    pub async fn resolve(&self, identifier: &str) -> Option<CandidateProfile> {
        if let Some(profile) = self.find_by_id(identifier).await {
            return Some(profile);
        }
        self.find_by_alternate_key(identifier).await
    }
}
