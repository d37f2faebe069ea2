//! Flattens a record's loosely structured body blocks into one display blob.

use serde_json::Value;
use tracing::warn;

use super::domain::RecordId;
use super::store::CandidateStore;

/// Fetch and flatten the body of a record. Enrichment only: any failure is
/// logged and collapses to an empty string, never an error for the caller.
pub async fn fetch_content<S: CandidateStore>(store: &S, id: &RecordId) -> String {
    match store.fetch_blocks(id).await {
        Ok(blocks) => flatten_blocks(&blocks),
        Err(err) => {
            warn!(record = id.as_str(), error = %err, "content fetch failed");
            String::new()
        }
    }
}

/// Paragraphs become raw text with a blank line, level-2 headings become
/// `## text`, bullets become `- text`. Other block kinds are skipped.
pub fn flatten_blocks(blocks: &[Value]) -> String {
    let mut out = String::new();

    for block in blocks {
        let kind = block.get("type").and_then(Value::as_str).unwrap_or_default();
        let text = plain_text(block.get(kind));
        if text.is_empty() {
            continue;
        }

        match kind {
            "paragraph" => {
                out.push_str(&text);
                out.push_str("\n\n");
            }
            "heading_2" => {
                out.push_str("## ");
                out.push_str(&text);
                out.push_str("\n\n");
            }
            "bulleted_list_item" => {
                out.push_str("- ");
                out.push_str(&text);
                out.push('\n');
            }
            _ => {}
        }
    }

    out.trim().to_string()
}

fn plain_text(body: Option<&Value>) -> String {
    body.and_then(|b| b.get("rich_text"))
        .and_then(Value::as_array)
        .map(|fragments| {
            fragments
                .iter()
                .filter_map(|fragment| fragment.get("plain_text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block(kind: &str, text: &str) -> Value {
        json!({ "type": kind, kind: { "rich_text": [{ "plain_text": text }] } })
    }

    #[test]
    fn flattens_paragraphs_headings_and_bullets() {
        let blocks = vec![
            block("paragraph", "Hello"),
            block("heading_2", "Skills"),
            block("bulleted_list_item", "Go"),
            block("bulleted_list_item", "Rust"),
        ];
        assert_eq!(flatten_blocks(&blocks), "Hello\n\n## Skills\n\n- Go\n- Rust");
    }

    #[test]
    fn unrecognized_blocks_are_skipped() {
        let blocks = vec![
            block("paragraph", "Intro"),
            block("heading_1", "Ignored"),
            block("to_do", "Ignored too"),
            json!({ "object": "block" }),
        ];
        assert_eq!(flatten_blocks(&blocks), "Intro");
    }

    #[test]
    fn empty_text_fragments_emit_nothing() {
        let blocks = vec![
            block("paragraph", ""),
            json!({ "type": "paragraph", "paragraph": { "rich_text": [] } }),
        ];
        assert_eq!(flatten_blocks(&blocks), "");
    }

    #[test]
    fn rich_text_fragments_are_joined() {
        let blocks = vec![json!({
            "type": "paragraph",
            "paragraph": { "rich_text": [
                { "plain_text": "Zehn Jahre " },
                { "plain_text": "Embedded-Entwicklung" }
            ]}
        })];
        assert_eq!(flatten_blocks(&blocks), "Zehn Jahre Embedded-Entwicklung");
    }
}
