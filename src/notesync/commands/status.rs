use crate::commands::{CmdMessage, CmdResult};
use crate::config::SyncSettings;
use crate::error::Result;
use crate::index::LocalIndex;
use crate::vault::Vault;

pub async fn run<V: Vault + ?Sized>(vault: &V, settings: &SyncSettings) -> Result<CmdResult> {
    let index = LocalIndex::scan(vault, &settings.folder).await?;

    let folder = if settings.folder.is_empty() {
        "the vault root".to_string()
    } else {
        format!("\"{}\"", settings.folder)
    };

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "{} synced note(s) in {}",
        index.len(),
        folder
    )));
    result.add_message(CmdMessage::info(format!("Sync mode: {}", settings.mode)));
    match settings.last_sync {
        Some(at) => result.add_message(CmdMessage::info(format!(
            "Last synced: {}",
            at.to_rfc3339()
        ))),
        None => result.add_message(CmdMessage::info("Never synced")),
    }
    Ok(result)
}
