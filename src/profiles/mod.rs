//! Candidate profile retrieval and rendering.
//!
//! Records live in an external workspace document store; this module only
//! reads them, gates access by expiry, and writes back a single best-effort
//! view counter field. Everything renders from a normalized
//! [`CandidateProfile`] so the store's payload shape stays contained in
//! [`mapper`] and [`store`].

pub mod content;
pub mod domain;
pub mod expiry;
pub mod inference;
pub mod lookup;
pub mod mapper;
pub mod render;
pub mod router;
pub mod service;
pub mod store;
pub mod views;

pub use domain::{CandidateProfile, ContactDetails, RecordId};
pub use expiry::ExpiryPolicy;
pub use inference::EmploymentHint;
pub use lookup::LookupService;
pub use render::AgencyDetails;
pub use router::profile_router;
pub use service::{ProfilePage, ProfileService};
pub use store::{CandidateStore, NotionClient, StoreError};
pub use views::{ViewCountError, ViewCountOutcome, ViewCounter};
