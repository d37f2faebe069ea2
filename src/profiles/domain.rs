use chrono::{Duration, Local, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Identifier of a record in the external store, canonicalized by stripping
/// the formatting dashes links sometimes carry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn canonicalize(raw: &str) -> Self {
        Self(raw.trim().replace('-', ""))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Optional reach-out coordinates, shown only when the record carries them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Normalized, render-ready view of one candidate record.
///
/// Every field defaults to empty when the store omits it; absence is never an
/// error at this layer. `display_id` and `executive_summary` are synthesized
/// per render when missing and never written back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: String,
    pub name: String,
    pub position: String,
    pub location: String,
    pub contact: ContactDetails,
    pub compensation_range: String,
    pub availability: String,
    pub industries: Vec<String>,
    pub tech_stack: Vec<String>,
    pub pipeline_status: String,
    pub source_url: String,
    pub token: Option<String>,
    pub display_id: Option<String>,
    pub executive_summary: Option<String>,
    pub created_at: Option<NaiveDate>,
    pub expires_at: Option<NaiveDate>,
    pub view_count: i64,
}

impl CandidateProfile {
    /// Human-facing profile id: the stored one, or `TC-{year}-{id prefix}`.
    pub fn resolved_display_id(&self, year: i32) -> String {
        if let Some(display_id) = self.display_id.as_deref() {
            if !display_id.trim().is_empty() {
                return display_id.to_string();
            }
        }

        let prefix: String = self
            .id
            .chars()
            .filter(|c| *c != '-')
            .take(8)
            .collect::<String>()
            .to_uppercase();
        format!("TC-{year}-{prefix}")
    }

    /// Stored executive summary, or one synthesized from position, leading
    /// industries, and availability.
    pub fn resolved_summary(&self) -> String {
        if let Some(summary) = self.executive_summary.as_deref() {
            if !summary.trim().is_empty() {
                return summary.to_string();
            }
        }

        let position = if self.position.is_empty() {
            "Engineering"
        } else {
            self.position.as_str()
        };
        let industries = if self.industries.is_empty() {
            "technischen Industrien".to_string()
        } else {
            self.industries
                .iter()
                .take(3)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        };
        let availability = if self.availability.is_empty() {
            "nach Vereinbarung".to_string()
        } else {
            format!("ab {}", self.availability)
        };

        format!(
            "Erfahrene Fachkraft im Bereich {position} mit fundierter Expertise in {industries}. \
             Verfügbar für neue Herausforderungen {availability}."
        )
    }

    /// Coarse experience estimate derived from the breadth of industry
    /// history. Display-only.
    pub fn estimated_experience_years(&self) -> &'static str {
        match self.industries.len() {
            n if n >= 4 => "15+",
            3 => "10+",
            2 => "5+",
            _ => "3+",
        }
    }
}

const TOKEN_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const TOKEN_LEN: usize = 12;

/// Mint an alternate lookup token for a freshly shared profile link. The
/// token is stored on the record in the external store, not here.
pub fn generate_profile_token() -> String {
    let mut rng = rand::thread_rng();
    (0..TOKEN_LEN)
        .map(|_| TOKEN_CHARS[rng.gen_range(0..TOKEN_CHARS.len())] as char)
        .collect()
}

/// Expiry date written alongside a new share link, `weeks` weeks from today.
pub fn expiry_date_from_today(weeks: i64) -> NaiveDate {
    Local::now().date_naive() + Duration::weeks(weeks)
}
