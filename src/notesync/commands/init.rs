use crate::commands::{CmdMessage, CmdResult};
use crate::config::SyncSettings;
use crate::error::Result;
use crate::vault::Vault;

pub async fn run<V: Vault + ?Sized>(vault: &V, settings: &SyncSettings) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if settings.folder.is_empty() || vault.exists(&settings.folder).await? {
        result.add_message(CmdMessage::info("Sync folder already in place"));
    } else {
        vault.create_folder(&settings.folder).await?;
        result.add_message(CmdMessage::success(format!(
            "Created sync folder \"{}\"",
            settings.folder
        )));
    }
    Ok(result)
}
