//! Schema-mapping layer between the store's property payloads and
//! [`CandidateProfile`].
//!
//! Each accessor is total: a missing, null, or differently-typed property
//! yields the empty default for its field kind instead of an error. The only
//! way to get `None` out of [`map_record`] is a record without the basic
//! page shape (id plus properties object).

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use super::domain::{CandidateProfile, ContactDetails};

pub fn map_record(page: &Value) -> Option<CandidateProfile> {
    let id = page.get("id").and_then(Value::as_str)?;
    let props = page.get("properties")?.as_object()?;
    let prop = |name: &str| props.get(name);

    Some(CandidateProfile {
        id: id.to_string(),
        name: title_text(prop("Name")),
        position: rich_text(prop("Position")),
        location: rich_text(prop("Wohnort")),
        contact: ContactDetails {
            email: email(prop("E-Mail")),
            phone: phone_number(prop("Handynummer")),
        },
        compensation_range: rich_text(prop("Gehaltsvorstellung")),
        availability: rich_text(prop("Verfügbarkeit")),
        industries: multi_select(prop("Branchenerfahrung")),
        tech_stack: multi_select(prop("Tech Stack")),
        pipeline_status: select(prop("Pipeline Status")),
        source_url: page
            .get("url")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        token: non_empty(rich_text(prop("Profil-Token"))),
        display_id: non_empty(rich_text(prop("Profil-ID"))),
        executive_summary: non_empty(rich_text(prop("Executive Summary"))),
        created_at: page
            .get("created_time")
            .and_then(Value::as_str)
            .and_then(parse_date),
        expires_at: date(prop("Gültig bis")),
        view_count: number(prop("Profil Views")).unwrap_or(0),
    })
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn title_text(prop: Option<&Value>) -> String {
    first_plain_text(prop.and_then(|p| p.get("title")))
}

fn rich_text(prop: Option<&Value>) -> String {
    first_plain_text(prop.and_then(|p| p.get("rich_text")))
}

fn first_plain_text(fragments: Option<&Value>) -> String {
    fragments
        .and_then(Value::as_array)
        .and_then(|parts| parts.first())
        .and_then(|part| part.get("plain_text"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn email(prop: Option<&Value>) -> Option<String> {
    scalar_string(prop, "email")
}

fn phone_number(prop: Option<&Value>) -> Option<String> {
    scalar_string(prop, "phone_number")
}

fn scalar_string(prop: Option<&Value>, key: &str) -> Option<String> {
    prop.and_then(|p| p.get(key))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn select(prop: Option<&Value>) -> String {
    prop.and_then(|p| p.get("select"))
        .and_then(|s| s.get("name"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Order-preserving; the store's ordering is the display ordering.
fn multi_select(prop: Option<&Value>) -> Vec<String> {
    prop.and_then(|p| p.get("multi_select"))
        .and_then(Value::as_array)
        .map(|options| {
            options
                .iter()
                .filter_map(|option| option.get("name").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn date(prop: Option<&Value>) -> Option<NaiveDate> {
    prop.and_then(|p| p.get("date"))
        .and_then(|d| d.get("start"))
        .and_then(Value::as_str)
        .and_then(parse_date)
}

fn number(prop: Option<&Value>) -> Option<i64> {
    prop.and_then(|p| p.get("number")).and_then(Value::as_i64)
}

/// The store emits either plain `YYYY-MM-DD` dates or RFC 3339 timestamps.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_page() -> Value {
        json!({
            "id": "1429989f-e8fc-4e13-a13b-86662a528fd1",
            "url": "https://workspace.example/1429989fe8fc",
            "created_time": "2024-06-01T09:30:00.000Z",
            "properties": {
                "Name": { "title": [{ "plain_text": "M. Mustermann" }] },
                "Position": { "rich_text": [{ "plain_text": "Lead Engineer" }] },
                "Wohnort": { "rich_text": [{ "plain_text": "München" }] },
                "E-Mail": { "email": "m.mustermann@example.de" },
                "Handynummer": { "phone_number": "0171 2345678" },
                "Gehaltsvorstellung": { "rich_text": [{ "plain_text": "90-100k" }] },
                "Verfügbarkeit": { "rich_text": [{ "plain_text": "sofort" }] },
                "Branchenerfahrung": { "multi_select": [
                    { "name": "Defense" }, { "name": "Aerospace" }
                ]},
                "Tech Stack": { "multi_select": [
                    { "name": "Rust" }, { "name": "C++" }
                ]},
                "Pipeline Status": { "select": { "name": "Vorgestellt" } },
                "Profil-Token": { "rich_text": [{ "plain_text": "q3w8r2k9m1x5" }] },
                "Gültig bis": { "date": { "start": "2024-07-15" } },
                "Profil Views": { "number": 7 }
            }
        })
    }

    #[test]
    fn maps_all_recognized_fields() {
        let profile = map_record(&sample_page()).expect("page maps");
        assert_eq!(profile.name, "M. Mustermann");
        assert_eq!(profile.position, "Lead Engineer");
        assert_eq!(profile.location, "München");
        assert_eq!(
            profile.contact.email.as_deref(),
            Some("m.mustermann@example.de")
        );
        assert_eq!(profile.contact.phone.as_deref(), Some("0171 2345678"));
        assert_eq!(profile.compensation_range, "90-100k");
        assert_eq!(profile.availability, "sofort");
        assert_eq!(profile.industries, vec!["Defense", "Aerospace"]);
        assert_eq!(profile.tech_stack, vec!["Rust", "C++"]);
        assert_eq!(profile.pipeline_status, "Vorgestellt");
        assert_eq!(profile.token.as_deref(), Some("q3w8r2k9m1x5"));
        assert_eq!(
            profile.created_at,
            NaiveDate::from_ymd_opt(2024, 6, 1)
        );
        assert_eq!(
            profile.expires_at,
            NaiveDate::from_ymd_opt(2024, 7, 15)
        );
        assert_eq!(profile.view_count, 7);
    }

    #[test]
    fn record_with_zero_recognized_fields_maps_to_defaults() {
        let page = json!({ "id": "abc123", "properties": {} });
        let profile = map_record(&page).expect("bare page still maps");
        assert_eq!(profile.id, "abc123");
        assert_eq!(profile.name, "");
        assert!(profile.industries.is_empty());
        assert!(profile.contact.email.is_none());
        assert!(profile.created_at.is_none());
        assert!(profile.expires_at.is_none());
        assert_eq!(profile.view_count, 0);
    }

    #[test]
    fn mistyped_properties_fall_back_to_defaults() {
        let page = json!({
            "id": "abc123",
            "properties": {
                "Name": { "rich_text": [{ "plain_text": "wrong kind" }] },
                "Profil Views": { "number": "seven" },
                "Gültig bis": { "date": { "start": "not-a-date" } }
            }
        });
        let profile = map_record(&page).expect("page maps");
        assert_eq!(profile.name, "");
        assert_eq!(profile.view_count, 0);
        assert!(profile.expires_at.is_none());
    }

    #[test]
    fn structurally_unrecognizable_record_maps_to_none() {
        assert!(map_record(&json!({ "properties": {} })).is_none());
        assert!(map_record(&json!({ "id": "abc123" })).is_none());
        assert!(map_record(&json!("just a string")).is_none());
    }

    #[test]
    fn multi_select_order_is_preserved() {
        let page = json!({
            "id": "abc123",
            "properties": {
                "Branchenerfahrung": { "multi_select": [
                    { "name": "Robotik" }, { "name": "Aviation" }, { "name": "Robotik" }
                ]}
            }
        });
        let profile = map_record(&page).expect("page maps");
        assert_eq!(profile.industries, vec!["Robotik", "Aviation", "Robotik"]);
    }
}
