//! Best-effort page-view counter on the external record.

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use super::domain::RecordId;
use super::store::{CandidateStore, StoreError};

/// Result of one counted view. `updated: false` means the write was lost and
/// `views` still holds the pre-increment count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewCountOutcome {
    pub views: i64,
    pub updated: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ViewCountError {
    #[error("record not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct ViewCounter<S> {
    store: Arc<S>,
}

impl<S: CandidateStore> ViewCounter<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Read-then-write increment. A failed write is logged and reported as
    /// `updated: false`; view tracking must never fail a request. The read
    /// side still errors so the caller can tell "record gone" from
    /// "counting unavailable".
    pub async fn record_view(&self, raw_id: &str) -> Result<ViewCountOutcome, ViewCountError> {
        let id = RecordId::canonicalize(raw_id);
        let current = self
            .store
            .current_view_count(&id)
            .await?
            .ok_or(ViewCountError::NotFound)?;

        match self.store.write_view_count(&id, current + 1).await {
            Ok(()) => Ok(ViewCountOutcome {
                views: current + 1,
                updated: true,
            }),
            Err(err) => {
                warn!(record = id.as_str(), error = %err, "view count write failed");
                Ok(ViewCountOutcome {
                    views: current,
                    updated: false,
                })
            }
        }
    }
}
