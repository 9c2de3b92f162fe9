//! # Local Note Index
//!
//! A fresh index is built from a folder scan on every reconciliation pass
//! and discarded afterwards; nothing persists between runs. Only files whose
//! front matter carries a non-empty `id` enter the index; everything else
//! is invisible to the engine and never matched or overwritten.

use crate::error::Result;
use crate::frontmatter::{self, FrontMatter};
use crate::vault::{Vault, VaultFile};
use std::collections::HashMap;
use tracing::debug;

/// A synced note as it exists on disk right now.
#[derive(Debug, Clone)]
pub struct LocalNoteRecord {
    /// Vault-owned file handle.
    pub file: VaultFile,
    /// Parsed front-matter block.
    pub meta: FrontMatter,
    /// Body content with the front-matter block stripped.
    pub body: String,
}

/// Mapping from note id to the local file carrying it.
#[derive(Debug, Default)]
pub struct LocalIndex {
    records: HashMap<String, LocalNoteRecord>,
}

impl LocalIndex {
    /// Builds the index by scanning `folder`.
    ///
    /// Fail-fast: the first unreadable or unparseable file aborts the scan
    /// with an error naming its path.
    pub async fn scan<V: Vault + ?Sized>(vault: &V, folder: &str) -> Result<Self> {
        let mut records = HashMap::new();
        for file in vault.list_files(folder).await? {
            if !in_folder(&file, folder) {
                continue;
            }
            let text = vault.read(&file).await?;
            let (meta, body) = frontmatter::parse(&file.path, &text)?;
            let id = match meta.note_id() {
                Some(id) => id.to_string(),
                None => continue,
            };
            records.insert(id, LocalNoteRecord { file, meta, body });
        }
        debug!(count = records.len(), folder, "scanned local notes");
        Ok(Self { records })
    }

    pub fn get(&self, id: &str) -> Option<&LocalNoteRecord> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &LocalNoteRecord> {
        self.records.values()
    }
}

/// A file is "in" the folder by exact parent containment, or, for the
/// vault root, by having no separator in its relative path.
fn in_folder(file: &VaultFile, folder: &str) -> bool {
    if folder.is_empty() {
        !file.path.contains('/')
    } else {
        file.parent() == folder.trim_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::memory::InMemoryVault;
    use chrono::Utc;

    #[tokio::test]
    async fn indexes_files_with_ids_only() {
        let vault = InMemoryVault::new();
        vault.seed("Notes/a.md", "---\nid: one\n---\nbody a", Utc::now());
        vault.seed("Notes/b.md", "---\ntitle: NoId\n---\nbody b", Utc::now());
        vault.seed("Notes/c.md", "plain body, no front matter", Utc::now());

        let index = LocalIndex::scan(&vault, "Notes").await.unwrap();
        assert_eq!(index.len(), 1);
        let record = index.get("one").unwrap();
        assert_eq!(record.file.path, "Notes/a.md");
        assert_eq!(record.body, "body a");
    }

    #[tokio::test]
    async fn subfolder_files_are_not_in_the_folder() {
        let vault = InMemoryVault::new();
        vault.seed("Notes/a.md", "---\nid: one\n---\n", Utc::now());
        vault.seed("Notes/sub/b.md", "---\nid: two\n---\n", Utc::now());

        let index = LocalIndex::scan(&vault, "Notes").await.unwrap();
        assert!(index.get("one").is_some());
        assert!(index.get("two").is_none());
    }

    #[tokio::test]
    async fn vault_root_keeps_separator_free_paths() {
        let vault = InMemoryVault::new();
        vault.seed("top.md", "---\nid: one\n---\n", Utc::now());
        vault.seed("Notes/nested.md", "---\nid: two\n---\n", Utc::now());

        let index = LocalIndex::scan(&vault, "").await.unwrap();
        assert!(index.get("one").is_some());
        assert!(index.get("two").is_none());
    }

    #[tokio::test]
    async fn parse_failure_aborts_naming_the_path() {
        let vault = InMemoryVault::new();
        vault.seed("Notes/good.md", "---\nid: one\n---\n", Utc::now());
        vault.seed("Notes/bad.md", "---\nid: [broken\n---\n", Utc::now());

        let err = LocalIndex::scan(&vault, "Notes").await.unwrap_err();
        assert!(err.to_string().contains("Notes/bad.md"));
    }

    #[tokio::test]
    async fn empty_id_is_invisible() {
        let vault = InMemoryVault::new();
        vault.seed("Notes/a.md", "---\nid: \"\"\n---\n", Utc::now());
        let index = LocalIndex::scan(&vault, "Notes").await.unwrap();
        assert!(index.is_empty());
    }
}
