use crate::apply;
use crate::commands::{CmdMessage, CmdResult};
use crate::config::SyncSettings;
use crate::error::Result;
use crate::index::LocalIndex;
use crate::model::Note;
use crate::remote::NoteStore;
use crate::vault::Vault;
use tracing::debug;

pub async fn run<V: Vault + ?Sized, R: NoteStore + ?Sized>(
    vault: &V,
    store: &R,
    settings: &SyncSettings,
) -> Result<CmdResult> {
    let notes = store.fetch_all().await?;
    let notes = filter_notes(notes, &settings.filter);
    let (tombstones, live): (Vec<Note>, Vec<Note>) =
        notes.into_iter().partition(|note| note.is_deleted);
    debug!(live = live.len(), tombstones = tombstones.len(), "pulled notes");

    let index = LocalIndex::scan(vault, &settings.folder).await?;
    let mut stats = apply::apply_notes(
        vault,
        &live,
        &index,
        &settings.folder,
        &settings.template,
    )
    .await?;
    if settings.mode.deletes() {
        stats.deleted += apply::delete_notes(vault, &tombstones, &index).await?;
    }

    let mut result = CmdResult::default();
    result.stats = stats;
    if stats.changes() == 0 {
        result.add_message(CmdMessage::info("Vault already up to date"));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Pulled {} note(s): {} created, {} updated, {} renamed, {} deleted",
            live.len(),
            stats.created,
            stats.updated,
            stats.renamed,
            stats.deleted
        )));
    }
    Ok(result)
}

/// Pre-filter on the pulled set: keep notes whose title or content contains
/// the configured substring. An empty filter keeps everything.
fn filter_notes(notes: Vec<Note>, filter: &str) -> Vec<Note> {
    if filter.is_empty() {
        return notes;
    }
    notes
        .into_iter()
        .filter(|note| note.title.contains(filter) || note.content.contains(filter))
        .collect()
}
