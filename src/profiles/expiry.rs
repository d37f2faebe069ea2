//! Gate deciding whether a stored profile may still be rendered.
//!
//! Two policies exist in the field and gate access differently, so the
//! deployment has to pick one explicitly (`APP_EXPIRY_POLICY`). Both are
//! fail-open: a record without the relevant date never expires.

use chrono::{Months, NaiveDate};

use super::domain::CandidateProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpiryPolicy {
    /// Invalid once `expires_at` lies strictly before today.
    #[default]
    Absolute,
    /// Invalid once `created_at` lies more than one calendar month back.
    /// Calendar months, not a fixed 30-day window.
    RelativeToCreation,
}

impl ExpiryPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "absolute" => Some(Self::Absolute),
            "relative" | "relative_to_creation" => Some(Self::RelativeToCreation),
            _ => None,
        }
    }

    pub fn is_expired(&self, profile: &CandidateProfile, today: NaiveDate) -> bool {
        match self {
            Self::Absolute => match profile.expires_at {
                Some(expires_at) => expires_at < today,
                None => false,
            },
            Self::RelativeToCreation => match (
                profile.created_at,
                today.checked_sub_months(Months::new(1)),
            ) {
                (Some(created_at), Some(cutoff)) => created_at < cutoff,
                _ => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn profile(created_at: Option<NaiveDate>, expires_at: Option<NaiveDate>) -> CandidateProfile {
        CandidateProfile {
            created_at,
            expires_at,
            ..CandidateProfile::default()
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn absent_dates_never_expire_under_either_policy() {
        let bare = profile(None, None);
        let today = day(2031, 12, 31);
        assert!(!ExpiryPolicy::Absolute.is_expired(&bare, today));
        assert!(!ExpiryPolicy::RelativeToCreation.is_expired(&bare, today));
    }

    #[test]
    fn absolute_policy_expires_strictly_before_today() {
        let today = day(2024, 6, 15);
        let yesterday = profile(None, Some(day(2024, 6, 14)));
        let ends_today = profile(None, Some(day(2024, 6, 15)));

        assert!(ExpiryPolicy::Absolute.is_expired(&yesterday, today));
        assert!(!ExpiryPolicy::Absolute.is_expired(&ends_today, today));
    }

    #[test]
    fn relative_policy_uses_calendar_month_boundary() {
        let today = day(2024, 3, 15);
        let just_inside = profile(Some(day(2024, 2, 16)), None);
        let just_outside = profile(Some(day(2024, 2, 14)), None);
        let on_boundary = profile(Some(day(2024, 2, 15)), None);

        let policy = ExpiryPolicy::RelativeToCreation;
        assert!(!policy.is_expired(&just_inside, today));
        assert!(policy.is_expired(&just_outside, today));
        assert!(!policy.is_expired(&on_boundary, today));
    }

    #[test]
    fn relative_policy_varies_with_month_length() {
        // One month back from March 30 is February 29 in a leap year, so a
        // profile created 30 days earlier is already outside the window.
        let today = day(2024, 3, 30);
        let created = today - Duration::days(31);
        let policy = ExpiryPolicy::RelativeToCreation;
        assert!(policy.is_expired(&profile(Some(created), None), today));
    }

    #[test]
    fn relative_policy_ignores_expiry_field() {
        let today = day(2024, 6, 15);
        let stale_expiry = profile(Some(day(2024, 6, 1)), Some(day(2020, 1, 1)));
        assert!(!ExpiryPolicy::RelativeToCreation.is_expired(&stale_expiry, today));
    }

    #[test]
    fn parse_recognizes_both_policies() {
        assert_eq!(ExpiryPolicy::parse("absolute"), Some(ExpiryPolicy::Absolute));
        assert_eq!(
            ExpiryPolicy::parse(" Relative "),
            Some(ExpiryPolicy::RelativeToCreation)
        );
        assert_eq!(ExpiryPolicy::parse("monthly"), None);
    }
}
