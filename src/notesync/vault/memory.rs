use super::{Vault, VaultFile};
use crate::error::{Result, SyncError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::io;

#[derive(Debug, Clone)]
struct FileEntry {
    id: u64,
    content: String,
    mtime: DateTime<Utc>,
}

#[derive(Default)]
struct Inner {
    files: HashMap<String, FileEntry>,
    folders: HashSet<String>,
    next_id: u64,
    ops: Vec<String>,
}

/// In-memory vault for tests.
///
/// Files carry a stable numeric identity that survives `rename`, and every
/// mutating operation is appended to an inspectable log so tests can assert
/// on exactly which operations a reconciliation pass performed.
#[derive(Default)]
pub struct InMemoryVault {
    inner: Mutex<Inner>,
}

impl InMemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file without touching the operation log.
    pub fn seed(&self, path: &str, content: &str, mtime: DateTime<Utc>) {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.files.insert(
            path.to_string(),
            FileEntry {
                id,
                content: content.to_string(),
                mtime,
            },
        );
    }

    /// The file's stable identity, for rename-preservation assertions.
    pub fn file_id(&self, path: &str) -> Option<u64> {
        self.inner.lock().files.get(path).map(|f| f.id)
    }

    pub fn content(&self, path: &str) -> Option<String> {
        self.inner.lock().files.get(path).map(|f| f.content.clone())
    }

    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.inner.lock().files.keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Mutating operations performed so far, in order.
    pub fn ops(&self) -> Vec<String> {
        self.inner.lock().ops.clone()
    }

    pub fn clear_ops(&self) {
        self.inner.lock().ops.clear();
    }

    fn not_found(path: &str) -> SyncError {
        SyncError::vault(
            format!("failed to open {}", path),
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        )
    }
}

#[async_trait]
impl Vault for InMemoryVault {
    async fn list_files(&self, folder: &str) -> Result<Vec<VaultFile>> {
        let prefix = if folder.is_empty() {
            String::new()
        } else {
            format!("{}/", folder.trim_matches('/'))
        };
        let inner = self.inner.lock();
        let mut files: Vec<VaultFile> = inner
            .files
            .iter()
            .filter(|(path, _)| path.starts_with(&prefix))
            .map(|(path, entry)| VaultFile::new(path.clone(), entry.mtime))
            .collect();
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    async fn read(&self, file: &VaultFile) -> Result<String> {
        self.inner
            .lock()
            .files
            .get(&file.path)
            .map(|f| f.content.clone())
            .ok_or_else(|| Self::not_found(&file.path))
    }

    async fn write(&self, file: &VaultFile, content: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.ops.push(format!("write {}", file.path));
        match inner.files.get_mut(&file.path) {
            Some(entry) => {
                entry.content = content.to_string();
                entry.mtime = Utc::now();
                Ok(())
            }
            None => Err(Self::not_found(&file.path)),
        }
    }

    async fn rename(&self, file: &VaultFile, to: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.ops.push(format!("rename {} -> {}", file.path, to));
        match inner.files.remove(&file.path) {
            Some(entry) => {
                inner.files.insert(to.to_string(), entry);
                Ok(())
            }
            None => Err(Self::not_found(&file.path)),
        }
    }

    async fn create(&self, path: &str, content: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.ops.push(format!("create {}", path));
        inner.next_id += 1;
        let id = inner.next_id;
        inner.files.insert(
            path.to_string(),
            FileEntry {
                id,
                content: content.to_string(),
                mtime: Utc::now(),
            },
        );
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.ops.push(format!("remove {}", path));
        match inner.files.remove(path) {
            Some(_) => Ok(()),
            None => Err(Self::not_found(path)),
        }
    }

    async fn create_folder(&self, folder: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.ops.push(format!("mkdir {}", folder));
        inner.folders.insert(folder.to_string());
        Ok(())
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        let inner = self.inner.lock();
        Ok(inner.files.contains_key(path)
            || inner.folders.contains(path)
            || inner.files.keys().any(|p| p.starts_with(&format!("{}/", path))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rename_preserves_identity() {
        let vault = InMemoryVault::new();
        vault.seed("Notes/Old.md", "x", Utc::now());
        let id = vault.file_id("Notes/Old.md").unwrap();

        let file = &vault.list_files("Notes").await.unwrap()[0];
        vault.rename(file, "Notes/New.md").await.unwrap();

        assert_eq!(vault.file_id("Notes/New.md"), Some(id));
        assert_eq!(vault.file_id("Notes/Old.md"), None);
    }

    #[tokio::test]
    async fn create_mints_a_fresh_identity() {
        let vault = InMemoryVault::new();
        vault.seed("a.md", "x", Utc::now());
        let first = vault.file_id("a.md").unwrap();
        vault.remove("a.md").await.unwrap();
        vault.create("a.md", "y").await.unwrap();
        assert_ne!(vault.file_id("a.md").unwrap(), first);
    }

    #[tokio::test]
    async fn op_log_records_mutations_only() {
        let vault = InMemoryVault::new();
        vault.seed("Notes/a.md", "x", Utc::now());
        let file = &vault.list_files("Notes").await.unwrap()[0];
        vault.read(file).await.unwrap();
        assert!(vault.ops().is_empty());

        vault.write(file, "y").await.unwrap();
        vault.create_folder("Notes").await.unwrap();
        assert_eq!(vault.ops(), vec!["write Notes/a.md", "mkdir Notes"]);
    }

    #[tokio::test]
    async fn exists_sees_files_folders_and_implied_parents() {
        let vault = InMemoryVault::new();
        vault.seed("Notes/a.md", "x", Utc::now());
        assert!(vault.exists("Notes/a.md").await.unwrap());
        assert!(vault.exists("Notes").await.unwrap());
        assert!(!vault.exists("Other").await.unwrap());
    }
}
