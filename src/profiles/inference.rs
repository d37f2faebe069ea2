//! Best-effort anonymization of past employers mentioned in a free-text
//! narrative.
//!
//! A fixed employer-name table maps substring hits to industry labels; the
//! role is pulled from the first "als <Rolle>" phrase in the text. Hits are
//! emitted in table order, not text order, and nothing anchors a role to the
//! employer mention it sits next to, so a narrative naming several employers
//! can attribute one role to all of them. Known limitation, kept lax on
//! purpose: the output is an anonymized hint list, not a CV.

use serde::Serialize;

/// Anonymized employment station: the role as written, the employer replaced
/// by its industry label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmploymentHint {
    pub role: String,
    pub industry: &'static str,
}

/// Table order is emission order.
const EMPLOYER_INDUSTRIES: &[(&str, &str)] = &[
    ("airbus", "Aerospace / Luftfahrt"),
    ("mtu aero", "Aerospace / Antriebstechnik"),
    ("ohb", "Aerospace / Raumfahrt"),
    ("rheinmetall", "Defense / Wehrtechnik"),
    ("hensoldt", "Defense / Sensorik"),
    ("diehl", "Defense / Luftfahrtausrüstung"),
    ("krauss-maffei", "Defense / Fahrzeugtechnik"),
    ("thales", "Defense / Elektronik"),
    ("lufthansa", "Aviation / Luftverkehr"),
    ("mtu friedrichshafen", "Antriebstechnik / Maschinenbau"),
    ("siemens", "Industrie / Automatisierung"),
    ("kuka", "Robotik / Automatisierung"),
    ("festo", "Automatisierungstechnik"),
    ("bosch", "Automotive / Zulieferindustrie"),
    ("continental", "Automotive / Zulieferindustrie"),
    ("zf friedrichshafen", "Automotive / Antriebstechnik"),
    ("bmw", "Automotive / OEM"),
    ("mercedes", "Automotive / OEM"),
    ("daimler", "Automotive / OEM"),
    ("volkswagen", "Automotive / OEM"),
    ("audi", "Automotive / OEM"),
    ("porsche", "Automotive / OEM"),
    ("zeiss", "Optik / Präzisionstechnik"),
    ("trumpf", "Lasertechnik / Maschinenbau"),
    ("infineon", "Halbleiter / Mikroelektronik"),
    ("sap", "Enterprise Software"),
    ("telekom", "IT / Telekommunikation"),
    ("ibm", "IT / Beratung"),
];

const MAX_HINTS: usize = 5;
const MAX_ROLE_CHARS: usize = 50;
const FALLBACK_ROLE: &str = "Spezialist";

/// Scan `narrative` for known employer names and emit anonymized
/// role/industry pairs, capped at five entries.
pub fn infer_employments(narrative: &str) -> Vec<EmploymentHint> {
    let haystack = narrative.to_lowercase();
    let role = extract_role(narrative);

    let mut hints = Vec::new();
    for (employer, industry) in EMPLOYER_INDUSTRIES {
        if hints.len() >= MAX_HINTS {
            break;
        }
        if haystack.contains(employer) {
            hints.push(EmploymentHint {
                role: role.clone(),
                industry,
            });
        }
    }
    hints
}

/// First "als <Rolle>" phrase in the text, cut at the next clause boundary.
fn extract_role(narrative: &str) -> String {
    let start = ["als ", "Als "]
        .iter()
        .filter_map(|marker| narrative.find(marker))
        .min();

    let Some(start) = start else {
        return FALLBACK_ROLE.to_string();
    };

    let rest = &narrative[start + 4..];
    let mut end = rest.len();
    for stop in [" bei ", " für ", " und ", ",", ".", ";", "\n"] {
        if let Some(idx) = rest.find(stop) {
            end = end.min(idx);
        }
    }

    let role = rest[..end].trim();
    if role.is_empty() {
        return FALLBACK_ROLE.to_string();
    }

    if role.chars().count() > MAX_ROLE_CHARS {
        let truncated: String = role.chars().take(MAX_ROLE_CHARS).collect();
        format!("{truncated}...")
    } else {
        role.to_string()
    }
}
