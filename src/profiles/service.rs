//! Facade composing lookup, expiry gating, enrichment, and view counting.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use super::content;
use super::domain::{CandidateProfile, RecordId};
use super::expiry::ExpiryPolicy;
use super::inference::{self, EmploymentHint};
use super::lookup::LookupService;
use super::render::AgencyDetails;
use super::store::CandidateStore;
use super::views::{ViewCountError, ViewCountOutcome, ViewCounter};

/// Outcome of preparing one profile page. Expiry is distinct from not-found
/// on purpose: an archived profile must never look like a dead link.
#[derive(Debug)]
pub enum ProfilePage {
    NotFound,
    Expired,
    Ready {
        profile: CandidateProfile,
        content: String,
        employments: Vec<EmploymentHint>,
    },
}

pub struct ProfileService<S> {
    store: Arc<S>,
    lookup: LookupService<S>,
    views: ViewCounter<S>,
    expiry_policy: ExpiryPolicy,
    agency: AgencyDetails,
}

impl<S: CandidateStore> ProfileService<S> {
    pub fn new(store: Arc<S>, expiry_policy: ExpiryPolicy, agency: AgencyDetails) -> Self {
        Self {
            lookup: LookupService::new(store.clone()),
            views: ViewCounter::new(store.clone()),
            store,
            expiry_policy,
            agency,
        }
    }

    pub fn agency(&self) -> &AgencyDetails {
        &self.agency
    }

    /// Resolve an inbound identifier into a renderable page, evaluated
    /// against today's date.
    pub async fn page(&self, identifier: &str) -> ProfilePage {
        self.page_at(identifier, Local::now().date_naive()).await
    }

    /// Same as [`page`](Self::page) with the evaluation date injected.
    pub async fn page_at(&self, identifier: &str, today: NaiveDate) -> ProfilePage {
        let Some(profile) = self.lookup.resolve(identifier).await else {
            return ProfilePage::NotFound;
        };

        if self.expiry_policy.is_expired(&profile, today) {
            return ProfilePage::Expired;
        }

        // Enrichment is best-effort: a failed body fetch renders an empty
        // details section, and inference runs on whatever text came back.
        let record_id = RecordId::canonicalize(&profile.id);
        let content = content::fetch_content(self.store.as_ref(), &record_id).await;
        let employments = inference::infer_employments(&content);

        ProfilePage::Ready {
            profile,
            content,
            employments,
        }
    }

    /// Count one view against the record. Triggered from the delivered page,
    /// never from the render path.
    pub async fn record_view(&self, raw_id: &str) -> Result<ViewCountOutcome, ViewCountError> {
        self.views.record_view(raw_id).await
    }
}
