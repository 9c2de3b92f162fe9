use crate::error::{Result, SyncError};
use crate::model::SyncMode;
use crate::template::DEFAULT_TEMPLATE;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_FOLDER: &str = "Notes";

/// Settings the reconciliation engine runs under.
///
/// Owned by the caller and passed explicitly into every command; the engine
/// never reaches for ambient state. `last_sync` is persisted back by the
/// caller only after a fully successful cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyncSettings {
    /// Vault-relative folder the synced files live in. Empty means the vault root.
    #[serde(default = "default_folder")]
    pub folder: String,

    /// Placeholder template rendered for every pulled note.
    #[serde(default = "default_template")]
    pub template: String,

    #[serde(default = "default_mode")]
    pub mode: SyncMode,

    /// Run a sync cycle when the app starts.
    #[serde(default)]
    pub sync_on_startup: bool,

    /// Substring filter applied to title/content before import. Empty keeps everything.
    #[serde(default)]
    pub filter: String,

    /// Completion instant of the last fully successful sync.
    #[serde(default)]
    pub last_sync: Option<DateTime<Utc>>,
}

fn default_folder() -> String {
    DEFAULT_FOLDER.to_string()
}

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

fn default_mode() -> SyncMode {
    SyncMode::OneWay
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            folder: default_folder(),
            template: default_template(),
            mode: default_mode(),
            sync_on_startup: false,
            filter: String::new(),
            last_sync: None,
        }
    }
}

impl SyncSettings {
    /// The modification window floor: epoch when nothing has synced yet, so
    /// every local file qualifies on the first push.
    pub fn last_sync_or_epoch(&self) -> DateTime<Utc> {
        self.last_sync.unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Remote account coordinates. The password is never stored here; the CLI
/// sources it from the environment and only the HTTP client ever sees it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub email: String,
}

/// Everything persisted in config.json.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SyncConfig {
    /// Root directory the vault is anchored at. Empty falls back to the
    /// current directory.
    #[serde(default)]
    pub vault_path: PathBuf,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub sync: SyncSettings,
}

impl SyncConfig {
    /// Load config from the given directory, or return defaults if not found.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(SyncError::Io)?;
        let config: SyncConfig =
            serde_json::from_str(&content).map_err(SyncError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory.
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(SyncError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(SyncError::Serialization)?;
        fs::write(config_path, content).map_err(SyncError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let settings = SyncSettings::default();
        assert_eq!(settings.folder, "Notes");
        assert_eq!(settings.mode, SyncMode::OneWay);
        assert!(settings.last_sync.is_none());
        assert_eq!(settings.template, DEFAULT_TEMPLATE);
    }

    #[test]
    fn epoch_floor_when_never_synced() {
        let settings = SyncSettings::default();
        assert_eq!(settings.last_sync_or_epoch(), DateTime::<Utc>::MIN_UTC);

        let synced = SyncSettings {
            last_sync: Some(Utc::now()),
            ..SyncSettings::default()
        };
        assert!(synced.last_sync_or_epoch() > DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = SyncConfig::load(temp_dir.path().join("nope")).unwrap();
        assert_eq!(config, SyncConfig::default());
    }

    #[test]
    fn save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();

        let mut config = SyncConfig::default();
        config.server.url = "https://notes.example.com".to_string();
        config.server.email = "me@example.com".to_string();
        config.sync.mode = SyncMode::TwoWay;
        config.sync.last_sync = Some(Utc::now());
        config.save(temp_dir.path()).unwrap();

        let loaded = SyncConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILENAME),
            r#"{"sync": {"mode": "two-way-with-delete"}}"#,
        )
        .unwrap();

        let config = SyncConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config.sync.mode, SyncMode::TwoWayWithDelete);
        assert_eq!(config.sync.folder, "Notes");
        assert_eq!(config.server.url, "");
    }
}
