//! Push-side reconciliation: which local records go back to the remote.

use crate::index::{LocalIndex, LocalNoteRecord};
use crate::model::NoteUpdate;
use chrono::{DateTime, Utc};

/// Records that changed since `last_sync`.
///
/// A record qualifies when its file was modified strictly after the last
/// sync, or when its front-matter `title` no longer matches the file's base
/// name, a rename applied locally that must be echoed to the remote title.
pub fn modified_since(index: &LocalIndex, last_sync: DateTime<Utc>) -> Vec<&LocalNoteRecord> {
    let mut modified: Vec<&LocalNoteRecord> = index
        .records()
        .filter(|record| record.file.mtime > last_sync || title_renamed(record))
        .collect();
    modified.sort_by(|a, b| a.file.path.cmp(&b.file.path));
    modified
}

fn title_renamed(record: &LocalNoteRecord) -> bool {
    match &record.meta.title {
        Some(title) => title != record.file.basename(),
        None => false,
    }
}

/// Formats qualifying records for upload.
///
/// The pushed title is the file's base name when the record tracks a title
/// at all, so a local rename propagates; missing fields become empty
/// strings, never null.
pub fn updates_for_push(records: &[&LocalNoteRecord]) -> Vec<NoteUpdate> {
    records
        .iter()
        .map(|record| NoteUpdate {
            id: record.meta.id.clone().unwrap_or_default(),
            title: if record.meta.title.is_some() {
                record.file.basename().to_string()
            } else {
                String::new()
            },
            content: record.body.clone(),
            source: record.meta.source.clone().unwrap_or_default(),
        })
        .collect()
}
