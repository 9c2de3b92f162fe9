//! Placeholder rendering for pulled notes.

use crate::model::Note;

/// Layout written for pulled notes unless the user supplies their own.
pub const DEFAULT_TEMPLATE: &str = "---\nid: ${id}\ntitle: ${title}\nsource: ${source}\ncreated_date: ${datetime}\nmodified_date: ${datetime}\n---\n${content}\n";

/// Renders `note` through `template`.
///
/// A single left-to-right pass: every known `${...}` occurrence is replaced,
/// unknown placeholders are left untouched, and substituted text is never
/// re-scanned, so note content carrying placeholder syntax survives verbatim.
pub fn render(template: &str, note: &Note) -> String {
    let datetime = date_part(note.timestamp());
    let mut out = String::with_capacity(template.len() + note.content.len());
    let mut rest = template;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match tail.find('}') {
            Some(end) => {
                match &tail[2..end] {
                    "id" => out.push_str(&note.id),
                    "title" => out.push_str(&note.title),
                    "content" => out.push_str(&note.content),
                    "source" => out.push_str(&note.source),
                    "datetime" => out.push_str(datetime),
                    _ => out.push_str(&tail[..=end]),
                }
                rest = &tail[end + 1..];
            }
            None => {
                out.push_str(tail);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Date portion of an ISO-8601 timestamp: the first 10 characters.
fn date_part(timestamp: &str) -> &str {
    timestamp.get(..10).unwrap_or(timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter;

    fn note() -> Note {
        Note {
            id: "abc".into(),
            title: "Groceries".into(),
            content: "milk\neggs".into(),
            source: "https://example.com".into(),
            modified_at: "2024-01-02T03:04:05Z".into(),
            ..Note::default()
        }
    }

    #[test]
    fn substitutes_all_occurrences() {
        let out = render("${id} ${id} ${title}", &note());
        assert_eq!(out, "abc abc Groceries");
    }

    #[test]
    fn unknown_placeholders_left_untouched() {
        let out = render("${id} ${unknown} ${", &note());
        assert_eq!(out, "abc ${unknown} ${");
    }

    #[test]
    fn datetime_is_date_portion() {
        let out = render("${datetime}", &note());
        assert_eq!(out, "2024-01-02");
    }

    #[test]
    fn datetime_falls_back_to_created() {
        let mut n = note();
        n.modified_at = String::new();
        n.created_at = "2023-12-31T23:59:59Z".into();
        assert_eq!(render("${datetime}", &n), "2023-12-31");
    }

    #[test]
    fn short_timestamp_renders_as_is() {
        let mut n = note();
        n.modified_at = "2024".into();
        assert_eq!(render("${datetime}", &n), "2024");
    }

    #[test]
    fn substituted_content_is_not_rescanned() {
        let mut n = note();
        n.content = "literal ${source} and ${id}".into();
        let out = render("${content}|${source}", &n);
        assert_eq!(out, "literal ${source} and ${id}|https://example.com");
    }

    #[test]
    fn default_template_round_trips_id() {
        let rendered = render(DEFAULT_TEMPLATE, &note());
        let (meta, body) = frontmatter::parse("x.md", &rendered).unwrap();
        assert_eq!(meta.note_id(), Some("abc"));
        assert_eq!(meta.title.as_deref(), Some("Groceries"));
        assert_eq!(body, "milk\neggs\n");
    }

    #[test]
    fn untitled_note_renders_empty_title_line() {
        let mut n = note();
        n.title = String::new();
        let rendered = render(DEFAULT_TEMPLATE, &n);
        let (meta, _) = frontmatter::parse("x.md", &rendered).unwrap();
        assert_eq!(meta.note_id(), Some("abc"));
        assert_eq!(meta.title, None);
    }
}
