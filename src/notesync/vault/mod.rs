//! # Vault Layer
//!
//! The vault owns the files; the engine only holds [`VaultFile`] handles.
//! Storage is abstracted behind the [`Vault`] trait to:
//! - Enable **testing** with `InMemoryVault` (no filesystem needed)
//! - Keep reconciliation logic **decoupled** from filesystem details
//!
//! ## Implementations
//!
//! - [`fs::FsVault`]: production backend anchored at a root directory
//! - [`memory::InMemoryVault`]: in-memory backend with stable file
//!   identities and an operation log, for tests
//!
//! Paths are vault-relative strings with `/` separators; the empty path is
//! the vault root.

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub mod fs;
pub mod memory;

/// Handle to a file inside the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultFile {
    /// Vault-relative path, `/`-separated.
    pub path: String,
    /// Last-modified instant from the vault's file stat.
    pub mtime: DateTime<Utc>,
}

impl VaultFile {
    pub fn new(path: impl Into<String>, mtime: DateTime<Utc>) -> Self {
        Self {
            path: path.into(),
            mtime,
        }
    }

    /// File name without its parent folders.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Base name: the file name without its extension.
    pub fn basename(&self) -> &str {
        let name = self.name();
        name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(name)
    }

    /// Parent folder path; empty for a file at the vault root.
    pub fn parent(&self) -> &str {
        self.path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
    }
}

/// Joins a folder and a file name, collapsing duplicate separators and
/// trimming a leading one.
pub fn join_path(folder: &str, name: &str) -> String {
    let joined = format!("{}/{}", folder, name);
    let mut out = String::with_capacity(joined.len());
    let mut prev_sep = true;
    for c in joined.chars() {
        if c == '/' {
            if !prev_sep {
                out.push(c);
            }
            prev_sep = true;
        } else {
            out.push(c);
            prev_sep = false;
        }
    }
    out
}

/// Abstract interface to the note vault.
///
/// Implementations must keep a file's identity stable across `rename` so
/// references held elsewhere stay valid.
#[async_trait]
pub trait Vault: Send + Sync {
    /// All files under `folder`, recursively. An empty folder means the
    /// vault root (every file in the vault).
    async fn list_files(&self, folder: &str) -> Result<Vec<VaultFile>>;

    /// Read the file's text.
    async fn read(&self, file: &VaultFile) -> Result<String>;

    /// Overwrite the file's content in place.
    async fn write(&self, file: &VaultFile, content: &str) -> Result<()>;

    /// Move the file to `to`, preserving its identity.
    async fn rename(&self, file: &VaultFile, to: &str) -> Result<()>;

    /// Create a new file at `path` with `content`.
    async fn create(&self, path: &str, content: &str) -> Result<()>;

    /// Delete the file at `path`.
    async fn remove(&self, path: &str) -> Result<()>;

    /// Create `folder` (and any missing parents).
    async fn create_folder(&self, folder: &str) -> Result<()>;

    /// Whether a file or folder exists at `path`.
    async fn exists(&self, path: &str) -> Result<bool>;
}
