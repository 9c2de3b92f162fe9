use crate::commands::{CmdMessage, CmdResult};
use crate::config::SyncSettings;
use crate::diff;
use crate::error::Result;
use crate::index::LocalIndex;
use crate::remote::NoteStore;
use crate::vault::Vault;
use tracing::debug;

pub async fn run<V: Vault + ?Sized, R: NoteStore + ?Sized>(
    vault: &V,
    store: &R,
    settings: &SyncSettings,
) -> Result<CmdResult> {
    let index = LocalIndex::scan(vault, &settings.folder).await?;
    let modified = diff::modified_since(&index, settings.last_sync_or_epoch());

    let mut result = CmdResult::default();
    if modified.is_empty() {
        debug!("no local changes since last sync, skipping push");
        result.add_message(CmdMessage::info("No local changes to push"));
        return Ok(result);
    }

    let updates = diff::updates_for_push(&modified);
    store.push_updates(&updates).await?;

    result.pushed = updates.len();
    result.add_message(CmdMessage::success(format!(
        "Pushed {} note(s)",
        updates.len()
    )));
    Ok(result)
}
