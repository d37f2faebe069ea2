//! Pure presentation: profile, not-found, archived, and landing pages.
//!
//! Markup stays deliberately plain; these pages are meant to read well in a
//! browser and survive printing, nothing more. All rendering is a function
//! of its inputs — agency contact details come in as a value, not a global.

use super::domain::CandidateProfile;
use super::inference::EmploymentHint;

/// Contact details of the agency sharing the profile, shown on every page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgencyDetails {
    pub name: String,
    pub contact: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub website: String,
}

impl Default for AgencyDetails {
    fn default() -> Self {
        Self {
            name: "TEKOM Industrielle Systemtechnik GmbH".to_string(),
            contact: "Deniz L. Tulay".to_string(),
            email: "d.l.tulay@tekom-gmbh.de".to_string(),
            phone: "089 290 33815".to_string(),
            address: "Westenriederstraße 49, 80331 München".to_string(),
            website: "www.tekom-gmbh.de".to_string(),
        }
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn page_shell(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"de\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"robots\" content=\"noindex\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        title = escape(title),
    )
}

/// Fire-and-forget view tracking, dispatched from the delivered page so a
/// failed or dropped increment never touches the render path.
fn view_counter_script(record_id: &str) -> String {
    format!(
        "<script>\nfetch(\"/api/view\", {{\n  method: \"POST\",\n  \
         headers: {{ \"Content-Type\": \"application/json\" }},\n  \
         body: JSON.stringify({{ pageId: \"{id}\" }})\n}}).catch(function () {{}});\n</script>",
        id = escape(record_id),
    )
}

pub fn render_profile(
    profile: &CandidateProfile,
    content: &str,
    employments: &[EmploymentHint],
    agency: &AgencyDetails,
    year: i32,
) -> String {
    let display_id = profile.resolved_display_id(year);
    let position = if profile.position.is_empty() {
        "Fachkraft"
    } else {
        profile.position.as_str()
    };
    let location = if profile.location.is_empty() {
        "Deutschland"
    } else {
        profile.location.as_str()
    };
    let availability = if profile.availability.is_empty() {
        "nach Vereinbarung"
    } else {
        profile.availability.as_str()
    };
    let compensation = if profile.compensation_range.is_empty() {
        "Auf Anfrage"
    } else {
        profile.compensation_range.as_str()
    };

    let mut body = String::new();

    body.push_str(&format!(
        "<header>\n<p><strong>{name}</strong> · Headhunting</p>\n\
         <p>Vermittlung innovativer Köpfe in Defense · IT · Robotik · Aviation · Aerospace</p>\n\
         </header>\n",
        name = escape(&agency.name),
    ));

    body.push_str(&format!(
        "<section>\n<p>{display_id}</p>\n<h1>{position}</h1>\n\
         <p>{location} · {years} Jahre Erfahrung · Verfügbar {availability}</p>\n</section>\n",
        display_id = escape(&display_id),
        position = escape(position),
        location = escape(location),
        years = profile.estimated_experience_years(),
        availability = escape(availability),
    ));

    body.push_str(&format!(
        "<section>\n<dl>\n<dt>Gehaltsrahmen</dt><dd>{compensation}</dd>\n\
         <dt>Verfügbarkeit</dt><dd>{availability}</dd>\n\
         <dt>Arbeitsmodell</dt><dd>Hybrid</dd>\n</dl>\n</section>\n",
        compensation = escape(compensation),
        availability = escape(availability),
    ));

    body.push_str(&format!(
        "<section>\n<h2>Executive Summary</h2>\n<p>{summary}</p>\n",
        summary = escape(&profile.resolved_summary()),
    ));
    if !profile.tech_stack.is_empty() {
        body.push_str(&format!(
            "<h3>Kernqualifikationen</h3>\n<p>{stack}</p>\n",
            stack = escape(&profile.tech_stack.join(" · ")),
        ));
    }
    body.push_str("</section>\n");

    if !profile.industries.is_empty() {
        body.push_str("<section>\n<h2>Branchenerfahrung</h2>\n<ol>\n");
        for industry in &profile.industries {
            body.push_str(&format!("<li>{}</li>\n", escape(industry)));
        }
        body.push_str("</ol>\n</section>\n");
    }

    if !employments.is_empty() {
        body.push_str("<section>\n<h2>Stationen (anonymisiert)</h2>\n<ul>\n");
        for hint in employments {
            body.push_str(&format!(
                "<li>{role} — {industry}</li>\n",
                role = escape(&hint.role),
                industry = escape(hint.industry),
            ));
        }
        body.push_str("</ul>\n</section>\n");
    }

    if !content.is_empty() {
        body.push_str(&format!(
            "<section>\n<h2>Details</h2>\n<pre>{content}</pre>\n</section>\n",
            content = escape(content),
        ));
    }

    body.push_str(&format!(
        "<section>\n<h2>Vertraulichkeitshinweis</h2>\n\
         <p>Dieses Dokument enthält vertrauliche Informationen und ist ausschließlich für den \
         vorgesehenen Empfänger bestimmt. Jegliche Weitergabe, Vervielfältigung oder \
         Veröffentlichung bedarf der schriftlichen Genehmigung der {name}.</p>\n\
         <p>Bei versehentlichem Erhalt bitten wir um umgehende Benachrichtigung und Löschung \
         des Dokuments. Datenschutz gemäß DSGVO.</p>\n</section>\n",
        name = escape(&agency.name),
    ));

    body.push_str(&format!(
        "<footer>\n<p>{name}<br>{address}</p>\n<p>{email} · {phone}</p>\n<p>{website}</p>\n</footer>\n",
        name = escape(&agency.name),
        address = escape(&agency.address),
        email = escape(&agency.email),
        phone = escape(&agency.phone),
        website = escape(&agency.website),
    ));

    body.push_str(&view_counter_script(&profile.id));

    page_shell(&format!("Kandidatenprofil {display_id}"), &body)
}

pub fn render_not_found(agency: &AgencyDetails) -> String {
    let body = format!(
        "<h1>Profil nicht gefunden</h1>\n\
         <p>Dieses Kandidaten-Profil existiert nicht oder wurde deaktiviert. \
         Bitte kontaktieren Sie uns für einen aktualisierten Link.</p>\n\
         <p><a href=\"/\">Zurück</a></p>\n\
         <p>{name}<br>{email}</p>",
        name = escape(&agency.name),
        email = escape(&agency.email),
    );
    page_shell("Profil nicht gefunden", &body)
}

pub fn render_expired(agency: &AgencyDetails) -> String {
    let body = format!(
        "<h1>Profil nicht mehr verfügbar</h1>\n\
         <p>Dieses Kandidatenprofil ist abgelaufen und wurde archiviert. \
         Für aktuelle Profile kontaktieren Sie uns bitte direkt.</p>\n\
         <p>{email} · {phone}</p>\n\
         <p>{name}</p>",
        email = escape(&agency.email),
        phone = escape(&agency.phone),
        name = escape(&agency.name),
    );
    page_shell("Profil nicht mehr verfügbar", &body)
}

pub fn render_landing(agency: &AgencyDetails) -> String {
    let body = format!(
        "<h1>Kandidaten-Profile</h1>\n\
         <p>Diese Seite enthält vertrauliche Kandidaten-Profile. Bitte verwenden Sie den \
         direkten Link, den Sie von uns erhalten haben.</p>\n\
         <p>Profile sind nur mit direktem Link zugänglich und werden nach Ablauf \
         automatisch deaktiviert.</p>\n\
         <p>{name}<br>{address}<br>{website}</p>",
        name = escape(&agency.name),
        address = escape(&agency.address),
        website = escape(&agency.website),
    );
    page_shell("Kandidaten-Profile", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agency() -> AgencyDetails {
        AgencyDetails::default()
    }

    fn profile() -> CandidateProfile {
        CandidateProfile {
            id: "1429989fe8fc4e13".to_string(),
            position: "Lead Engineer".to_string(),
            location: "München".to_string(),
            industries: vec!["Defense".to_string(), "Aerospace".to_string()],
            tech_stack: vec!["Rust".to_string(), "C++".to_string()],
            ..CandidateProfile::default()
        }
    }

    #[test]
    fn profile_page_contains_identity_and_sections() {
        let html = render_profile(&profile(), "## Skills\n- Rust", &[], &agency(), 2024);
        assert!(html.contains("TC-2024-1429989F"));
        assert!(html.contains("Lead Engineer"));
        assert!(html.contains("Rust · C++"));
        assert!(html.contains("Branchenerfahrung"));
        assert!(html.contains("## Skills"));
        assert!(html.contains("Vertraulichkeitshinweis"));
    }

    #[test]
    fn profile_page_embeds_view_counter_dispatch() {
        let html = render_profile(&profile(), "", &[], &agency(), 2024);
        assert!(html.contains("/api/view"));
        assert!(html.contains("1429989fe8fc4e13"));
    }

    #[test]
    fn empty_fields_render_on_request_defaults() {
        let bare = CandidateProfile {
            id: "abc".to_string(),
            ..CandidateProfile::default()
        };
        let html = render_profile(&bare, "", &[], &agency(), 2024);
        assert!(html.contains("Fachkraft"));
        assert!(html.contains("Auf Anfrage"));
        assert!(html.contains("nach Vereinbarung"));
        assert!(!html.contains("Branchenerfahrung"));
        assert!(!html.contains("<h2>Details</h2>"));
    }

    #[test]
    fn employment_hints_are_listed_anonymized() {
        let hints = vec![EmploymentHint {
            role: "Lead Engineer".to_string(),
            industry: "Aerospace / Luftfahrt",
        }];
        let html = render_profile(&profile(), "", &hints, &agency(), 2024);
        assert!(html.contains("Stationen (anonymisiert)"));
        assert!(html.contains("Lead Engineer — Aerospace / Luftfahrt"));
    }

    #[test]
    fn markup_in_store_data_is_escaped() {
        let mut hostile = profile();
        hostile.position = "<script>alert(1)</script>".to_string();
        let html = render_profile(&hostile, "", &[], &agency(), 2024);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn archived_page_differs_from_not_found() {
        let expired = render_expired(&agency());
        let missing = render_not_found(&agency());
        assert!(expired.contains("archiviert"));
        assert!(missing.contains("existiert nicht"));
        assert_ne!(expired, missing);
    }
}
