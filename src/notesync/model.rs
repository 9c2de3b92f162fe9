use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sync direction and delete-propagation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncMode {
    OneWay,
    OneWayWithDelete,
    TwoWay,
    TwoWayWithDelete,
}

impl SyncMode {
    /// Whether local edits are pushed before pulling.
    pub fn pushes(self) -> bool {
        matches!(self, SyncMode::TwoWay | SyncMode::TwoWayWithDelete)
    }

    /// Whether remote tombstones delete the matching local file.
    pub fn deletes(self) -> bool {
        matches!(self, SyncMode::OneWayWithDelete | SyncMode::TwoWayWithDelete)
    }
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SyncMode::OneWay => "one-way",
            SyncMode::OneWayWithDelete => "one-way-with-delete",
            SyncMode::TwoWay => "two-way",
            SyncMode::TwoWayWithDelete => "two-way-with-delete",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for SyncMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "one-way" => Ok(SyncMode::OneWay),
            "one-way-with-delete" => Ok(SyncMode::OneWayWithDelete),
            "two-way" => Ok(SyncMode::TwoWay),
            "two-way-with-delete" => Ok(SyncMode::TwoWayWithDelete),
            other => Err(format!("Unknown sync mode: {}", other)),
        }
    }
}

/// A note as the remote store represents it.
///
/// All string fields default to empty rather than absent so comparisons never
/// have to reason about missing values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub source: String,
    #[serde(default, rename = "createdAt")]
    pub created_at: String,
    #[serde(default, rename = "modifiedAt")]
    pub modified_at: String,
    #[serde(default, rename = "_isDeleted")]
    pub is_deleted: bool,
}

impl Note {
    /// The timestamp a rendered file carries: modified when set, created otherwise.
    pub fn timestamp(&self) -> &str {
        if self.modified_at.is_empty() {
            &self.created_at
        } else {
            &self.modified_at
        }
    }

    /// Target file name: the title when present, the id for untitled notes.
    pub fn file_name(&self) -> String {
        if self.title.is_empty() {
            format!("{}.md", self.id)
        } else {
            format!("{}.md", self.title)
        }
    }
}

/// A local edit formatted for upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteUpdate {
    pub id: String,
    pub title: String,
    pub content: String,
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_policies() {
        assert!(!SyncMode::OneWay.pushes());
        assert!(!SyncMode::OneWay.deletes());
        assert!(SyncMode::OneWayWithDelete.deletes());
        assert!(SyncMode::TwoWay.pushes());
        assert!(!SyncMode::TwoWay.deletes());
        assert!(SyncMode::TwoWayWithDelete.pushes());
        assert!(SyncMode::TwoWayWithDelete.deletes());
    }

    #[test]
    fn mode_round_trips_through_str() {
        for mode in [
            SyncMode::OneWay,
            SyncMode::OneWayWithDelete,
            SyncMode::TwoWay,
            SyncMode::TwoWayWithDelete,
        ] {
            assert_eq!(mode.to_string().parse::<SyncMode>().unwrap(), mode);
        }
        assert!("both-ways".parse::<SyncMode>().is_err());
    }

    #[test]
    fn note_deserializes_wire_names() {
        let note: Note = serde_json::from_str(
            r#"{"id":"1","title":"","content":"hi","source":"","modifiedAt":"2024-01-01T00:00:00Z","_isDeleted":false}"#,
        )
        .unwrap();
        assert_eq!(note.id, "1");
        assert_eq!(note.content, "hi");
        assert_eq!(note.timestamp(), "2024-01-01T00:00:00Z");
        assert!(!note.is_deleted);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let note: Note = serde_json::from_str(r#"{"id":"abc"}"#).unwrap();
        assert_eq!(note.title, "");
        assert_eq!(note.content, "");
        assert_eq!(note.source, "");
        assert!(!note.is_deleted);
    }

    #[test]
    fn file_name_falls_back_to_id() {
        let untitled = Note {
            id: "abc".into(),
            ..Note::default()
        };
        assert_eq!(untitled.file_name(), "abc.md");

        let titled = Note {
            id: "abc".into(),
            title: "Groceries".into(),
            ..Note::default()
        };
        assert_eq!(titled.file_name(), "Groceries.md");
    }
}
