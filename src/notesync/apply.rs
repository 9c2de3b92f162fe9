//! Pull-side reconciliation: materialize remote notes onto the vault.

use crate::error::{Result, ResultExt};
use crate::index::LocalIndex;
use crate::model::Note;
use crate::template;
use crate::vault::{join_path, Vault};
use tracing::debug;

/// What an apply pass did to the vault.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ApplyStats {
    pub created: usize,
    pub updated: usize,
    pub renamed: usize,
    pub deleted: usize,
}

impl ApplyStats {
    pub fn changes(&self) -> usize {
        self.created + self.updated + self.renamed + self.deleted
    }
}

/// Applies `notes` (tombstones already removed) onto the vault folder.
///
/// Folder existence is ensured once up front. Fail-fast: the first per-note
/// failure aborts the remaining notes, wrapped as "failed to write notes".
pub async fn apply_notes<V: Vault + ?Sized>(
    vault: &V,
    notes: &[Note],
    index: &LocalIndex,
    folder: &str,
    template: &str,
) -> Result<ApplyStats> {
    if !vault.exists(folder).await? {
        vault.create_folder(folder).await?;
    }

    let mut stats = ApplyStats::default();
    for note in notes {
        apply_note(vault, note, index, folder, template, &mut stats)
            .await
            .context("failed to write notes")?;
    }
    Ok(stats)
}

async fn apply_note<V: Vault + ?Sized>(
    vault: &V,
    note: &Note,
    index: &LocalIndex,
    folder: &str,
    template: &str,
    stats: &mut ApplyStats,
) -> Result<()> {
    let target = join_path(folder, &note.file_name());
    let content = template::render(template, note);

    match index.get(&note.id) {
        Some(record) => {
            // modify before rename: the write must land on the existing
            // file identity while its handle still points at it
            let current = vault.read(&record.file).await?;
            if current != content {
                vault.write(&record.file, &content).await?;
                stats.updated += 1;
                debug!(id = %note.id, path = %record.file.path, "updated note");
            }
            if record.file.path != target {
                vault.rename(&record.file, &target).await?;
                stats.renamed += 1;
                debug!(id = %note.id, old = %record.file.path, new = %target, "renamed note");
            }
        }
        None => {
            if vault.exists(&target).await? {
                // orphan with the same derived name but no matching id
                vault.remove(&target).await?;
                stats.deleted += 1;
                debug!(path = %target, "removed orphaned file");
            }
            vault.create(&target, &content).await?;
            stats.created += 1;
            debug!(id = %note.id, path = %target, "created note");
        }
    }
    Ok(())
}

/// Removes the local files joined by id to `tombstones`. Used by the
/// with-delete sync modes.
pub async fn delete_notes<V: Vault + ?Sized>(
    vault: &V,
    tombstones: &[Note],
    index: &LocalIndex,
) -> Result<usize> {
    let mut deleted = 0;
    for note in tombstones {
        if let Some(record) = index.get(&note.id) {
            vault
                .remove(&record.file.path)
                .await
                .context("failed to delete notes")?;
            deleted += 1;
            debug!(id = %note.id, path = %record.file.path, "deleted tombstoned note");
        }
    }
    Ok(deleted)
}
