use crate::commands::{pull, push, CmdMessage, CmdResult};
use crate::config::SyncSettings;
use crate::error::{Result, ResultExt};
use crate::remote::NoteStore;
use crate::vault::Vault;
use chrono::Utc;
use tracing::info;

/// One full sync cycle: push (two-way modes), then pull.
///
/// A push failure aborts the cycle before pull is attempted. Only a fully
/// successful cycle carries a `completed_at` instant for the caller to
/// persist as the new last-sync timestamp; any failure leaves the previous
/// window in place so the next attempt re-evaluates it.
pub async fn run<V: Vault + ?Sized, R: NoteStore + ?Sized>(
    vault: &V,
    store: &R,
    settings: &SyncSettings,
) -> Result<CmdResult> {
    info!(mode = %settings.mode, folder = %settings.folder, "starting sync");
    let mut result = CmdResult::default();

    if settings.mode.pushes() {
        let pushed = push::run(vault, store, settings)
            .await
            .context("failed to push notes")?;
        result.merge(pushed);
    }

    let pulled = pull::run(vault, store, settings)
        .await
        .context("failed to pull notes")?;
    result.merge(pulled);

    result.completed_at = Some(Utc::now());
    result.add_message(CmdMessage::success("Sync complete"));
    info!("sync complete");
    Ok(result)
}
