use super::{Vault, VaultFile};
use crate::error::{Result, SyncError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Production vault backend over a directory tree.
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn abs(&self, rel: &str) -> PathBuf {
        let mut path = self.root.clone();
        for part in rel.split('/').filter(|p| !p.is_empty()) {
            path.push(part);
        }
        path
    }
}

fn mtime_of(meta: &std::fs::Metadata) -> DateTime<Utc> {
    meta.modified()
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| DateTime::<Utc>::MIN_UTC)
}

#[async_trait]
impl Vault for FsVault {
    async fn list_files(&self, folder: &str) -> Result<Vec<VaultFile>> {
        let start = self.abs(folder);
        if !start.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        let mut pending = vec![(start, folder.trim_matches('/').to_string())];
        while let Some((dir, rel)) = pending.pop() {
            let mut entries = fs::read_dir(&dir)
                .await
                .map_err(|e| SyncError::vault(format!("failed to list {}", dir.display()), e))?;
            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| SyncError::vault(format!("failed to list {}", dir.display()), e))?
            {
                let name = entry.file_name().to_string_lossy().to_string();
                let child_rel = if rel.is_empty() {
                    name
                } else {
                    format!("{}/{}", rel, name)
                };
                let meta = entry.metadata().await.map_err(|e| {
                    SyncError::vault(format!("failed to stat {}", child_rel), e)
                })?;
                if meta.is_dir() {
                    pending.push((entry.path(), child_rel));
                } else {
                    files.push(VaultFile::new(child_rel, mtime_of(&meta)));
                }
            }
        }
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    async fn read(&self, file: &VaultFile) -> Result<String> {
        fs::read_to_string(self.abs(&file.path))
            .await
            .map_err(|e| SyncError::vault(format!("failed to read {}", file.path), e))
    }

    async fn write(&self, file: &VaultFile, content: &str) -> Result<()> {
        fs::write(self.abs(&file.path), content)
            .await
            .map_err(|e| SyncError::vault(format!("failed to write {}", file.path), e))
    }

    async fn rename(&self, file: &VaultFile, to: &str) -> Result<()> {
        fs::rename(self.abs(&file.path), self.abs(to))
            .await
            .map_err(|e| {
                SyncError::vault(format!("failed to rename {} to {}", file.path, to), e)
            })
    }

    async fn create(&self, path: &str, content: &str) -> Result<()> {
        fs::write(self.abs(path), content)
            .await
            .map_err(|e| SyncError::vault(format!("failed to create {}", path), e))
    }

    async fn remove(&self, path: &str) -> Result<()> {
        fs::remove_file(self.abs(path))
            .await
            .map_err(|e| SyncError::vault(format!("failed to delete {}", path), e))
    }

    async fn create_folder(&self, folder: &str) -> Result<()> {
        fs::create_dir_all(self.abs(folder))
            .await
            .map_err(|e| SyncError::vault(format!("failed to create folder {}", folder), e))
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        fs::try_exists(self.abs(path))
            .await
            .map_err(|e| SyncError::vault(format!("failed to stat {}", path), e))
    }
}
