//! Front-matter handling: a `---` line at byte 0, a YAML key/value block,
//! and a closing `---` line ahead of the free-form body.

use crate::error::{Result, SyncError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parsed front-matter block.
///
/// Recognized keys are explicit optional fields; anything else the user put
/// in the block survives in `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrontMatter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// The note id, when present and non-empty.
    pub fn note_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Splits `content` into its front-matter block and body.
///
/// Returns `None` when the file does not start with a `---` line or the
/// block is never closed; the caller then treats the whole file as body.
pub fn split(content: &str) -> Option<(&str, &str)> {
    let first_nl = content.find('\n')?;
    if content[..first_nl].trim_end_matches('\r') != "---" {
        return None;
    }

    let block_start = first_nl + 1;
    let mut pos = block_start;
    while pos <= content.len() {
        let line_end = content[pos..].find('\n').map(|i| pos + i);
        let line = match line_end {
            Some(end) => &content[pos..end],
            None => &content[pos..],
        };
        if line.trim_end_matches('\r') == "---" {
            let block = &content[block_start..pos];
            let body = match line_end {
                Some(end) => &content[end + 1..],
                None => "",
            };
            return Some((block, body));
        }
        match line_end {
            Some(end) => pos = end + 1,
            None => break,
        }
    }
    None
}

/// Parses a file's text into metadata and body.
///
/// `path` names the file in the error when the block is malformed.
pub fn parse(path: &str, content: &str) -> Result<(FrontMatter, String)> {
    match split(content) {
        Some((block, body)) => {
            let meta = if block.trim().is_empty() {
                FrontMatter::default()
            } else {
                serde_yaml::from_str(block).map_err(|source| SyncError::Parse {
                    path: path.to_string(),
                    source,
                })?
            };
            Ok((meta, body.to_string()))
        }
        None => Ok((FrontMatter::default(), content.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_block_and_body() {
        let text = "---\nid: abc\ntitle: Groceries\nsource: https://example.com\n---\nmilk\neggs\n";
        let (meta, body) = parse("Notes/g.md", text).unwrap();
        assert_eq!(meta.note_id(), Some("abc"));
        assert_eq!(meta.title.as_deref(), Some("Groceries"));
        assert_eq!(meta.source.as_deref(), Some("https://example.com"));
        assert_eq!(body, "milk\neggs\n");
    }

    #[test]
    fn no_block_means_empty_metadata() {
        let (meta, body) = parse("a.md", "just a body\n").unwrap();
        assert_eq!(meta, FrontMatter::default());
        assert_eq!(body, "just a body\n");
    }

    #[test]
    fn delimiter_must_start_at_byte_zero() {
        let text = "\n---\nid: abc\n---\nbody";
        let (meta, body) = parse("a.md", text).unwrap();
        assert_eq!(meta.note_id(), None);
        assert_eq!(body, text);
    }

    #[test]
    fn unclosed_block_is_all_body() {
        let text = "---\nid: abc\nnever closed";
        let (meta, body) = parse("a.md", text).unwrap();
        assert_eq!(meta.note_id(), None);
        assert_eq!(body, text);
    }

    #[test]
    fn empty_block_parses() {
        let (meta, body) = parse("a.md", "---\n---\nbody").unwrap();
        assert_eq!(meta, FrontMatter::default());
        assert_eq!(body, "body");
    }

    #[test]
    fn empty_id_is_not_a_note_id() {
        let (meta, _) = parse("a.md", "---\nid: \"\"\n---\n").unwrap();
        assert_eq!(meta.note_id(), None);
    }

    #[test]
    fn tags_and_unknown_keys_survive() {
        let text = "---\nid: abc\ntags:\n  - inbox\n  - later\naliases: gro\n---\n";
        let (meta, _) = parse("a.md", text).unwrap();
        assert_eq!(
            meta.tags,
            Some(vec!["inbox".to_string(), "later".to_string()])
        );
        assert!(meta.extra.contains_key("aliases"));
    }

    #[test]
    fn malformed_yaml_names_the_path() {
        let text = "---\nid: [unterminated\n---\nbody";
        let err = parse("Notes/bad.md", text).unwrap_err();
        assert!(err.to_string().contains("Notes/bad.md"));
    }

    #[test]
    fn crlf_delimiters_accepted() {
        let text = "---\r\nid: abc\r\n---\r\nbody";
        let (meta, body) = parse("a.md", text).unwrap();
        assert_eq!(meta.note_id(), Some("abc"));
        assert_eq!(body, "body");
    }
}
