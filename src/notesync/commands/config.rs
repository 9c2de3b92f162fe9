use crate::commands::{CmdMessage, CmdResult};
use crate::config::SyncConfig;
use crate::error::{Result, SyncError};
use crate::model::SyncMode;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

const KEYS: &[&str] = &[
    "folder",
    "mode",
    "filter",
    "sync-on-startup",
    "server-url",
    "email",
    "vault-path",
];

pub fn run(config: &mut SyncConfig, action: ConfigAction) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match action {
        ConfigAction::ShowAll => {
            for key in KEYS {
                result.add_message(CmdMessage::info(format!(
                    "{} = {}",
                    key,
                    show(config, key)?
                )));
            }
        }
        ConfigAction::ShowKey(key) => {
            result.add_message(CmdMessage::info(format!(
                "{} = {}",
                key,
                show(config, &key)?
            )));
        }
        ConfigAction::Set(key, value) => {
            set(config, &key, &value)?;
            result.add_message(CmdMessage::success(format!("Set {} = {}", key, value)));
        }
    }
    Ok(result)
}

fn show(config: &SyncConfig, key: &str) -> Result<String> {
    let value = match key {
        "folder" => config.sync.folder.clone(),
        "mode" => config.sync.mode.to_string(),
        "filter" => config.sync.filter.clone(),
        "sync-on-startup" => config.sync.sync_on_startup.to_string(),
        "server-url" => config.server.url.clone(),
        "email" => config.server.email.clone(),
        "vault-path" => config.vault_path.display().to_string(),
        other => return Err(SyncError::Api(format!("Unknown config key: {}", other))),
    };
    Ok(value)
}

fn set(config: &mut SyncConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "folder" => config.sync.folder = value.trim_matches('/').to_string(),
        "mode" => {
            config.sync.mode = value.parse::<SyncMode>().map_err(SyncError::Api)?;
        }
        "filter" => config.sync.filter = value.to_string(),
        "sync-on-startup" => {
            config.sync.sync_on_startup = value
                .parse::<bool>()
                .map_err(|_| SyncError::Api(format!("Expected true or false, got: {}", value)))?;
        }
        "server-url" => config.server.url = value.trim_end_matches('/').to_string(),
        "email" => config.server.email = value.to_string(),
        "vault-path" => config.vault_path = value.into(),
        other => return Err(SyncError::Api(format!("Unknown config key: {}", other))),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sets_and_shows_mode() {
        let mut config = SyncConfig::default();
        run(
            &mut config,
            ConfigAction::Set("mode".into(), "two-way".into()),
        )
        .unwrap();
        assert_eq!(config.sync.mode, SyncMode::TwoWay);

        let result = run(&mut config, ConfigAction::ShowKey("mode".into())).unwrap();
        assert!(result.messages[0].content.contains("two-way"));
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        let mut config = SyncConfig::default();
        assert!(run(&mut config, ConfigAction::ShowKey("nope".into())).is_err());
        assert!(run(
            &mut config,
            ConfigAction::Set("mode".into(), "sideways".into())
        )
        .is_err());
        assert!(run(
            &mut config,
            ConfigAction::Set("sync-on-startup".into(), "yep".into())
        )
        .is_err());
    }

    #[test]
    fn folder_is_stored_without_surrounding_separators() {
        let mut config = SyncConfig::default();
        run(
            &mut config,
            ConfigAction::Set("folder".into(), "/Inbox/".into()),
        )
        .unwrap();
        assert_eq!(config.sync.folder, "Inbox");
    }

    #[test]
    fn show_all_lists_every_key() {
        let mut config = SyncConfig::default();
        let result = run(&mut config, ConfigAction::ShowAll).unwrap();
        assert_eq!(result.messages.len(), KEYS.len());
    }
}
